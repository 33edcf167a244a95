//! Legacy transaction messages: account compilation and the wire codec.

use core::fmt;
use std::str::FromStr;

use super::error::{SolanaError, SolanaResult};
use super::instruction::{AccountMeta, CompiledInstruction, Instruction};
use super::pubkey::{PUBKEY_LEN, Pubkey};
use super::shortvec::{self, Cursor};

pub const HASH_LEN: usize = 32;

/// A recent blockhash anchoring a message to a slot window.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Hash([u8; HASH_LEN]);

impl Hash {
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = SolanaError;

    fn from_str(s: &str) -> SolanaResult<Self> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|_| SolanaError::InvalidBlockhash(s.to_string()))?;
        bytes
            .try_into()
            .map(Hash)
            .map_err(|_| SolanaError::InvalidBlockhash(s.to_string()))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(&self.0).into_string())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Counts describing how the account key table is split between signers,
/// read-only signers, and read-only non-signers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

/// An unsigned legacy message.
///
/// Account keys are ordered signers first, then writable non-signers, then
/// read-only non-signers, with the fee payer always at index 0. Instruction
/// account references are indices into that table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Compiles `instructions` into a message paying fees from `fee_payer`.
    ///
    /// Duplicate account references are merged with their signer and
    /// writability flags OR-ed together, matching how wallet tooling builds
    /// the account table.
    pub fn compile(
        fee_payer: &Pubkey,
        instructions: &[Instruction],
        recent_blockhash: Hash,
    ) -> SolanaResult<Self> {
        let mut metas: Vec<AccountMeta> = Vec::new();
        for instruction in instructions {
            metas.extend(instruction.accounts.iter().cloned());
        }
        for instruction in instructions {
            metas.push(AccountMeta::new_readonly(instruction.program_id, false));
        }

        let mut unique: Vec<AccountMeta> = Vec::new();
        for meta in metas {
            match unique.iter_mut().find(|seen| seen.pubkey == meta.pubkey) {
                Some(seen) => {
                    seen.is_signer |= meta.is_signer;
                    seen.is_writable |= meta.is_writable;
                }
                None => unique.push(meta),
            }
        }

        // Signers ahead of non-signers, writable ahead of read-only within
        // each group, base58 order as the tie break.
        unique.sort_by(|a, b| {
            b.is_signer
                .cmp(&a.is_signer)
                .then(b.is_writable.cmp(&a.is_writable))
                .then_with(|| a.pubkey.to_string().cmp(&b.pubkey.to_string()))
        });

        unique.retain(|meta| meta.pubkey != *fee_payer);
        unique.insert(0, AccountMeta::new(*fee_payer, true));

        if unique.len() > u8::MAX as usize {
            return Err(SolanaError::TooManyAccounts);
        }

        let mut header = MessageHeader::default();
        for meta in &unique {
            if meta.is_signer {
                header.num_required_signatures += 1;
                if !meta.is_writable {
                    header.num_readonly_signed_accounts += 1;
                }
            } else if !meta.is_writable {
                header.num_readonly_unsigned_accounts += 1;
            }
        }

        let account_keys: Vec<Pubkey> = unique.iter().map(|meta| meta.pubkey).collect();
        let compiled = instructions
            .iter()
            .map(|instruction| {
                let accounts = instruction
                    .accounts
                    .iter()
                    .map(|meta| index_of(&account_keys, &meta.pubkey))
                    .collect::<SolanaResult<Vec<u8>>>()?;
                Ok(CompiledInstruction {
                    program_id_index: index_of(&account_keys, &instruction.program_id)?,
                    accounts,
                    data: instruction.data.clone(),
                })
            })
            .collect::<SolanaResult<Vec<CompiledInstruction>>>()?;

        Ok(Self {
            header,
            account_keys,
            recent_blockhash,
            instructions: compiled,
        })
    }

    /// The keys that must sign this message, in signature order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        &self.account_keys[..self.header.num_required_signatures as usize]
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_size());
        out.push(self.header.num_required_signatures);
        out.push(self.header.num_readonly_signed_accounts);
        out.push(self.header.num_readonly_unsigned_accounts);
        shortvec::encode_len(&mut out, self.account_keys.len());
        for key in &self.account_keys {
            out.extend_from_slice(key.as_bytes());
        }
        out.extend_from_slice(self.recent_blockhash.as_bytes());
        shortvec::encode_len(&mut out, self.instructions.len());
        for instruction in &self.instructions {
            out.push(instruction.program_id_index);
            shortvec::encode_len(&mut out, instruction.accounts.len());
            out.extend_from_slice(&instruction.accounts);
            shortvec::encode_len(&mut out, instruction.data.len());
            out.extend_from_slice(&instruction.data);
        }
        out
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> SolanaResult<Self> {
        let first = cursor.read_u8()?;
        // Versioned messages set the high bit of the first byte.
        if first & 0x80 != 0 {
            return Err(SolanaError::UnsupportedVersion);
        }
        let header = MessageHeader {
            num_required_signatures: first,
            num_readonly_signed_accounts: cursor.read_u8()?,
            num_readonly_unsigned_accounts: cursor.read_u8()?,
        };

        let key_count = cursor.read_compact_u16()?;
        if (header.num_required_signatures as usize) > key_count {
            return Err(SolanaError::MalformedTransaction(
                "more required signers than account keys",
            ));
        }
        let mut account_keys = Vec::with_capacity(key_count);
        for _ in 0..key_count {
            account_keys.push(Pubkey::new(cursor.read_array()?));
        }

        let recent_blockhash = Hash::new(cursor.read_array()?);

        let instruction_count = cursor.read_compact_u16()?;
        let mut instructions = Vec::with_capacity(instruction_count);
        for _ in 0..instruction_count {
            let program_id_index = cursor.read_u8()?;
            let account_count = cursor.read_compact_u16()?;
            let accounts = cursor.read_bytes(account_count)?.to_vec();
            let data_len = cursor.read_compact_u16()?;
            let data = cursor.read_bytes(data_len)?.to_vec();
            instructions.push(CompiledInstruction {
                program_id_index,
                accounts,
                data,
            });
        }

        for instruction in &instructions {
            let in_range = (instruction.program_id_index as usize) < account_keys.len()
                && instruction
                    .accounts
                    .iter()
                    .all(|index| (*index as usize) < account_keys.len());
            if !in_range {
                return Err(SolanaError::MalformedTransaction(
                    "account index out of range",
                ));
            }
        }

        Ok(Self {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    }

    fn serialized_size(&self) -> usize {
        let instruction_bytes: usize = self
            .instructions
            .iter()
            .map(|ix| 1 + 3 + ix.accounts.len() + 3 + ix.data.len())
            .sum();
        3 + 3 + self.account_keys.len() * PUBKEY_LEN + HASH_LEN + 3 + instruction_bytes
    }
}

fn index_of(account_keys: &[Pubkey], key: &Pubkey) -> SolanaResult<u8> {
    account_keys
        .iter()
        .position(|candidate| candidate == key)
        .map(|position| position as u8)
        .ok_or(SolanaError::MalformedTransaction("missing account key"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solana::spl;

    fn pyusd_transfer_fixture() -> (Pubkey, Vec<Instruction>, Hash) {
        let wallet =
            Pubkey::from_str("GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB").unwrap();
        let mint = Pubkey::from_str("CXk2AMBfi3TwaEL2468s6zP8xq9NxTXjp9gjMgzeUynM").unwrap();
        let source =
            Pubkey::from_str("CD2D9eXHts8TLFYJyGpRP7kydKP4diujq4nAVKP6WNBa").unwrap();
        let destination =
            Pubkey::from_str("8s2urXPSoMzfwZKmCdiSE7z41N7j4UpJiVayFnMSQqyR").unwrap();
        let transfer = spl::transfer_checked(
            &spl::TOKEN_2022_PROGRAM_ID,
            &source,
            &mint,
            &destination,
            &wallet,
            250_000,
            6,
        );
        (wallet, vec![transfer], Hash::new([9; 32]))
    }

    #[test]
    fn compiles_fee_payer_first_and_sorts_remaining_keys() {
        let (wallet, instructions, blockhash) = pyusd_transfer_fixture();
        let message = Message::compile(&wallet, &instructions, blockhash).unwrap();

        let keys: Vec<String> = message.account_keys.iter().map(Pubkey::to_string).collect();
        assert_eq!(
            keys,
            vec![
                // Fee payer, the only signer.
                "GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB",
                // Writable token accounts in base58 order.
                "8s2urXPSoMzfwZKmCdiSE7z41N7j4UpJiVayFnMSQqyR",
                "CD2D9eXHts8TLFYJyGpRP7kydKP4diujq4nAVKP6WNBa",
                // Read-only: the mint, then the token program.
                "CXk2AMBfi3TwaEL2468s6zP8xq9NxTXjp9gjMgzeUynM",
                "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb",
            ]
        );
        assert_eq!(message.header.num_required_signatures, 1);
        assert_eq!(message.header.num_readonly_signed_accounts, 0);
        assert_eq!(message.header.num_readonly_unsigned_accounts, 2);

        let transfer = &message.instructions[0];
        assert_eq!(transfer.program_id_index, 4);
        assert_eq!(transfer.accounts, vec![2, 3, 1, 0]);
        assert_eq!(transfer.data[0], 12);
    }

    #[test]
    fn merges_duplicate_references_with_strongest_flags() {
        let payer = Pubkey::new([1; 32]);
        let shared = Pubkey::new([2; 32]);
        let program = Pubkey::new([3; 32]);
        let instruction = Instruction {
            program_id: program,
            accounts: vec![
                AccountMeta::new_readonly(shared, false),
                AccountMeta::new(shared, false),
            ],
            data: vec![1],
        };
        let message = Message::compile(&payer, &[instruction], Hash::new([0; 32])).unwrap();

        // The shared account appears once and keeps the writable flag, so it
        // sorts ahead of the read-only program account.
        assert_eq!(message.account_keys, vec![payer, shared, program]);
        assert_eq!(message.header.num_readonly_unsigned_accounts, 1);
    }

    #[test]
    fn wire_round_trip_preserves_the_message() {
        let (wallet, instructions, blockhash) = pyusd_transfer_fixture();
        let message = Message::compile(&wallet, &instructions, blockhash).unwrap();

        let bytes = message.serialize();
        let mut cursor = Cursor::new(&bytes);
        let parsed = Message::parse(&mut cursor).unwrap();
        assert!(cursor.is_empty());
        assert_eq!(parsed, message);
    }

    #[test]
    fn rejects_out_of_range_account_indices() {
        let (wallet, instructions, blockhash) = pyusd_transfer_fixture();
        let mut message = Message::compile(&wallet, &instructions, blockhash).unwrap();
        message.instructions[0].accounts[0] = 200;

        let bytes = message.serialize();
        let mut cursor = Cursor::new(&bytes);
        assert!(matches!(
            Message::parse(&mut cursor),
            Err(SolanaError::MalformedTransaction(_))
        ));
    }

    #[test]
    fn blockhash_parses_from_base58() {
        let hash = Hash::new([7; 32]);
        let parsed = Hash::from_str(&hash.to_string()).unwrap();
        assert_eq!(parsed, hash);
        assert!(Hash::from_str("tooshort").is_err());
    }
}

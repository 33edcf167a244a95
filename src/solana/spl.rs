//! SPL token instruction builders and associated token account derivation.
//!
//! Only the two instructions this service emits are implemented: creating an
//! associated token account and a checked token transfer. Both work against
//! the Token-2022 program as well as the classic token program, since the
//! token program id is an explicit parameter.

use super::error::SolanaResult;
use super::instruction::{AccountMeta, Instruction};
use super::pubkey::Pubkey;

/// `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new([0; 32]);

/// `TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb`
pub const TOKEN_2022_PROGRAM_ID: Pubkey = Pubkey::new([
    6, 221, 246, 225, 238, 117, 143, 222, 24, 66, 93, 188, 228, 108, 205, 218, 182, 26, 252, 77,
    131, 185, 13, 39, 254, 189, 249, 40, 216, 161, 139, 252,
]);

/// `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = Pubkey::new([
    140, 151, 37, 143, 78, 36, 137, 241, 187, 61, 16, 41, 20, 142, 13, 131, 11, 90, 19, 153, 218,
    255, 16, 132, 4, 142, 123, 216, 219, 233, 248, 89,
]);

/// TransferChecked discriminant in the token program instruction set.
const TRANSFER_CHECKED_TAG: u8 = 12;

/// The canonical token account for `owner` holding `mint`, derived as a
/// program address of the associated token account program.
pub fn derive_associated_token_address(
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> SolanaResult<Pubkey> {
    let (address, _bump) = Pubkey::find_program_address(
        &[owner.as_bytes(), token_program.as_bytes(), mint.as_bytes()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )?;
    Ok(address)
}

/// Creates `associated_account` for `owner` and `mint`, funded by `payer`.
///
/// The instruction carries no data; the program infers everything from the
/// account list.
pub fn create_associated_token_account(
    payer: &Pubkey,
    associated_account: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*associated_account, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
            AccountMeta::new_readonly(*token_program, false),
        ],
        data: Vec::new(),
    }
}

/// Moves `amount` base units from `source` to `destination`, with the mint
/// and decimals checked by the token program.
pub fn transfer_checked(
    token_program: &Pubkey,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Instruction {
    let mut data = Vec::with_capacity(10);
    data.push(TRANSFER_CHECKED_TAG);
    data.extend_from_slice(&amount.to_le_bytes());
    data.push(decimals);
    Instruction {
        program_id: *token_program,
        accounts: vec![
            AccountMeta::new(*source, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*owner, true),
        ],
        data,
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn program_ids_match_their_known_addresses() {
        assert_eq!(
            SYSTEM_PROGRAM_ID.to_string(),
            "11111111111111111111111111111111"
        );
        assert_eq!(
            TOKEN_2022_PROGRAM_ID.to_string(),
            "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb"
        );
        assert_eq!(
            ASSOCIATED_TOKEN_PROGRAM_ID.to_string(),
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
        );
    }

    #[test]
    fn derives_known_associated_accounts() {
        let mint = Pubkey::from_str("CXk2AMBfi3TwaEL2468s6zP8xq9NxTXjp9gjMgzeUynM").unwrap();

        let recipient = Pubkey::from_str("ARFwpM41PsUudu1HQE7i1HbbP6nkDAnKYRc77KQMS18e").unwrap();
        let ata =
            derive_associated_token_address(&recipient, &mint, &TOKEN_2022_PROGRAM_ID).unwrap();
        assert_eq!(ata.to_string(), "8s2urXPSoMzfwZKmCdiSE7z41N7j4UpJiVayFnMSQqyR");

        let wallet = Pubkey::from_str("GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB").unwrap();
        let ata = derive_associated_token_address(&wallet, &mint, &TOKEN_2022_PROGRAM_ID).unwrap();
        assert_eq!(ata.to_string(), "CD2D9eXHts8TLFYJyGpRP7kydKP4diujq4nAVKP6WNBa");
    }

    #[test]
    fn derivation_walks_the_bump_down_when_needed() {
        // This owner's associated account only lands off-curve at bump 254.
        let mint = Pubkey::from_str("CXk2AMBfi3TwaEL2468s6zP8xq9NxTXjp9gjMgzeUynM").unwrap();
        let wallet = Pubkey::from_str("J2xccRtuG43drESLYznHhLhQkLTdfepcKYbiQ9BsJVaf").unwrap();
        let (ata, bump) = Pubkey::find_program_address(
            &[
                wallet.as_bytes(),
                TOKEN_2022_PROGRAM_ID.as_bytes(),
                mint.as_bytes(),
            ],
            &ASSOCIATED_TOKEN_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(bump, 254);
        assert_eq!(ata.to_string(), "C1i8Hiufi82rx2F9ZqUpuF1GCgy99NcGAZG4oxMsi41J");
    }

    #[test]
    fn transfer_checked_encodes_tag_amount_and_decimals() {
        let mint = Pubkey::new([1; 32]);
        let source = Pubkey::new([2; 32]);
        let destination = Pubkey::new([3; 32]);
        let owner = Pubkey::new([4; 32]);

        let ix = transfer_checked(
            &TOKEN_2022_PROGRAM_ID,
            &source,
            &mint,
            &destination,
            &owner,
            250_000,
            6,
        );

        assert_eq!(ix.program_id, TOKEN_2022_PROGRAM_ID);
        assert_eq!(ix.data, vec![12, 0x90, 0xd0, 0x03, 0, 0, 0, 0, 0, 6]);
        assert_eq!(ix.accounts.len(), 4);
        assert!(ix.accounts[0].is_writable && !ix.accounts[0].is_signer);
        assert!(!ix.accounts[1].is_writable);
        assert!(ix.accounts[2].is_writable);
        assert!(ix.accounts[3].is_signer && !ix.accounts[3].is_writable);
    }

    #[test]
    fn create_associated_account_lists_the_expected_accounts() {
        let payer = Pubkey::new([5; 32]);
        let ata = Pubkey::new([6; 32]);
        let owner = Pubkey::new([7; 32]);
        let mint = Pubkey::new([8; 32]);

        let ix = create_associated_token_account(&payer, &ata, &owner, &mint, &TOKEN_2022_PROGRAM_ID);

        assert_eq!(ix.program_id, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert!(ix.data.is_empty());
        let keys: Vec<Pubkey> = ix.accounts.iter().map(|meta| meta.pubkey).collect();
        assert_eq!(
            keys,
            vec![payer, ata, owner, mint, SYSTEM_PROGRAM_ID, TOKEN_2022_PROGRAM_ID]
        );
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(ix.accounts[1].is_writable && !ix.accounts[1].is_signer);
    }
}

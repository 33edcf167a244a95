//! Builds and relays the PYUSD transfer that buys one credit.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::config;
use crate::solana::error::SolanaResult;
use crate::solana::rpc::RpcClient;
use crate::solana::spl;
use crate::solana::{Message, Pubkey, Transaction};

/// Assembles the unsigned purchase transaction for `wallet_address`.
///
/// The transfer moves [`config::CREDIT_PRICE_BASE_UNITS`] of PYUSD from the
/// buyer's associated token account to the service recipient's, prefixed
/// with instructions creating either associated account if it does not exist
/// on chain yet. The buyer pays fees and rent, signs nothing here, and gets
/// the result back base64-encoded.
pub async fn build_transfer_transaction(
    rpc: &RpcClient,
    wallet_address: &str,
) -> SolanaResult<String> {
    let buyer: Pubkey = wallet_address.parse()?;
    let mint: Pubkey = config::PYUSD_MINT.parse()?;
    let recipient: Pubkey = config::RECIPIENT_ADDRESS.parse()?;

    let source = spl::derive_associated_token_address(&buyer, &mint, &spl::TOKEN_2022_PROGRAM_ID)?;
    let destination =
        spl::derive_associated_token_address(&recipient, &mint, &spl::TOKEN_2022_PROGRAM_ID)?;

    let mut instructions = Vec::new();
    if !rpc.account_exists(&source).await? {
        tracing::info!(account = %source, "buyer token account missing, adding create instruction");
        instructions.push(spl::create_associated_token_account(
            &buyer,
            &source,
            &buyer,
            &mint,
            &spl::TOKEN_2022_PROGRAM_ID,
        ));
    }
    if !rpc.account_exists(&destination).await? {
        tracing::info!(account = %destination, "recipient token account missing, adding create instruction");
        instructions.push(spl::create_associated_token_account(
            &buyer,
            &destination,
            &recipient,
            &mint,
            &spl::TOKEN_2022_PROGRAM_ID,
        ));
    }
    instructions.push(spl::transfer_checked(
        &spl::TOKEN_2022_PROGRAM_ID,
        &source,
        &mint,
        &destination,
        &buyer,
        config::CREDIT_PRICE_BASE_UNITS,
        config::PYUSD_DECIMALS,
    ));

    let recent_blockhash = rpc.get_latest_blockhash().await?;
    let message = Message::compile(&buyer, &instructions, recent_blockhash)?;
    let transaction = Transaction::new_unsigned(message);
    Ok(BASE64.encode(transaction.serialize()))
}

/// Decodes a wallet-signed transaction, checks its signatures, and relays it
/// to the network, returning the signature once the cluster confirms it.
pub async fn submit_signed_transaction(
    rpc: &RpcClient,
    signed_transaction: &str,
) -> SolanaResult<String> {
    let bytes = BASE64.decode(signed_transaction)?;
    let transaction = Transaction::deserialize(&bytes)?;
    transaction.verify_signatures()?;

    let signature = rpc
        .send_transaction(&BASE64.encode(transaction.serialize()))
        .await?;
    tracing::info!(%signature, "transaction submitted, awaiting confirmation");
    rpc.confirm_transaction(&signature).await?;
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::solana::error::SolanaError;

    const WALLET: &str = "GmaDrppBC7P5ARKV8g3djiwP89vz1jLK23V2GBjuAEGB";

    fn mock_blockhash(server: &MockServer) {
        server.mock(|when, then| {
            when.method(POST)
                .json_body_partial(r#"{"method": "getLatestBlockhash"}"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"context": {"slot": 1}, "value": {
                    "blockhash": bs58::encode([7u8; 32]).into_string(),
                    "lastValidBlockHeight": 100,
                }},
            }));
        });
    }

    fn mock_account_info(server: &MockServer, value: serde_json::Value) {
        server.mock(|when, then| {
            when.method(POST)
                .json_body_partial(r#"{"method": "getAccountInfo"}"#);
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {"context": {"slot": 1}, "value": value},
            }));
        });
    }

    async fn build(server: &MockServer) -> Transaction {
        let rpc = RpcClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
        let encoded = build_transfer_transaction(&rpc, WALLET).await.unwrap();
        Transaction::deserialize(&BASE64.decode(encoded).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn existing_accounts_produce_a_lone_transfer() {
        let server = MockServer::start();
        mock_account_info(&server, json!({"lamports": 1, "owner": "x", "data": ["", "base64"]}));
        mock_blockhash(&server);

        let transaction = build(&server).await;
        assert_eq!(transaction.message.instructions.len(), 1);
        assert_eq!(transaction.message.account_keys[0].to_string(), WALLET);
        assert!(transaction.signatures[0].is_placeholder());

        let transfer = &transaction.message.instructions[0];
        assert_eq!(
            transfer.data,
            vec![12, 0x90, 0xd0, 0x03, 0, 0, 0, 0, 0, 6]
        );
    }

    #[tokio::test]
    async fn missing_accounts_get_create_instructions_first() {
        let server = MockServer::start();
        mock_account_info(&server, serde_json::Value::Null);
        mock_blockhash(&server);

        let transaction = build(&server).await;
        assert_eq!(transaction.message.instructions.len(), 3);

        let ata_program_index = transaction
            .message
            .account_keys
            .iter()
            .position(|key| *key == spl::ASSOCIATED_TOKEN_PROGRAM_ID)
            .unwrap() as u8;
        assert_eq!(
            transaction.message.instructions[0].program_id_index,
            ata_program_index
        );
        assert_eq!(
            transaction.message.instructions[1].program_id_index,
            ata_program_index
        );
        // The transfer itself stays last.
        assert_eq!(transaction.message.instructions[2].data[0], 12);
    }

    #[tokio::test]
    async fn malformed_addresses_fail_before_any_rpc_call() {
        let rpc = RpcClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let err = build_transfer_transaction(&rpc, "definitely-not-base58")
            .await
            .unwrap_err();
        assert!(matches!(err, SolanaError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn submission_rejects_payloads_that_are_not_base64() {
        let rpc = RpcClient::new("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let err = submit_signed_transaction(&rpc, "!!not base64!!")
            .await
            .unwrap_err();
        assert!(matches!(err, SolanaError::InvalidBase64(_)));
    }
}

use crate::core::keypair::Ed25519Keypair;
use crate::core::transaction::TransactionBuilder;
use crate::domain::model::SuiAddress;
use crate::domain::ports::SuiApi;
use crate::domain::rpc_types::{
    execution_status, DevInspectResults, DryRunResponse, ExecuteRequestType,
    TransactionBlockResponse,
};
use crate::utils::error::{Result, ScriptError};

/// Runs a built transaction either read-only or for real.
pub struct TransactionExecutor<A: SuiApi> {
    api: A,
}

impl<A: SuiApi> TransactionExecutor<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Read-only execution of the transaction kind. No gas or signature is
    /// needed, and non-entry functions may be called for their return values.
    pub async fn inspect(
        &self,
        builder: &TransactionBuilder,
        sender: Option<SuiAddress>,
    ) -> Result<DevInspectResults> {
        let sender = sender.unwrap_or(SuiAddress::ZERO);
        let kind = builder.build_kind(&self.api).await?;
        tracing::debug!("Dev-inspecting {} call(s) as {}", builder.call_count(), sender);

        let results = self.api.dev_inspect(&sender, &kind.to_bytes()?).await?;
        if let Some(error) = &results.error {
            return Err(ScriptError::TransactionFailed {
                message: error.clone(),
            });
        }
        Ok(results)
    }

    pub async fn dry_run(
        &self,
        builder: &TransactionBuilder,
        sender: SuiAddress,
    ) -> Result<DryRunResponse> {
        let mut builder = builder.clone();
        builder.set_sender(sender);
        let data = builder.build(&self.api).await?;
        tracing::info!("Dry-running transaction {}", data.digest()?);

        let response = self.api.dry_run(&data.to_bytes()?).await?;
        execution_status(&response.effects)
            .map_err(|message| ScriptError::TransactionFailed { message })?;
        Ok(response)
    }

    pub async fn sign_and_execute(
        &self,
        builder: &TransactionBuilder,
        keypair: &Ed25519Keypair,
    ) -> Result<TransactionBlockResponse> {
        let mut builder = builder.clone();
        builder.set_sender(keypair.address());
        let data = builder.build(&self.api).await?;
        let bytes = data.to_bytes()?;
        let signature = keypair.sign_transaction(&bytes);

        tracing::info!(
            "Submitting transaction {} from {}",
            data.digest()?,
            data.sender()
        );
        let response = self
            .api
            .execute(&bytes, vec![signature], ExecuteRequestType::WaitForLocalExecution)
            .await?;

        if let Some(effects) = &response.effects {
            execution_status(effects)
                .map_err(|message| ScriptError::TransactionFailed { message })?;
        }
        tracing::info!("Transaction {} executed", response.digest);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{self, MockSuiApi};
    use crate::domain::model::{MoveCallTarget, CLOCK_OBJECT_ID};
    use serde_json::json;

    fn claim_builder() -> TransactionBuilder {
        let mut txb = TransactionBuilder::new();
        let game = txb.object(testing::id(0x11));
        let clock = txb.object(CLOCK_OBJECT_ID);
        txb.move_call(
            MoveCallTarget::new(testing::id(0xaa), "movevault", "claim_jackpot"),
            vec![],
            vec![game, clock],
        );
        txb
    }

    fn api() -> MockSuiApi {
        let game = testing::id(0x11);
        let mut api = MockSuiApi::new()
            .with_object(game, testing::shared_object(game, 5, json!({})))
            .with_object(
                CLOCK_OBJECT_ID,
                testing::shared_object(CLOCK_OBJECT_ID, 1, json!({})),
            )
            .with_function("movevault", "claim_jackpot", testing::game_clock_signature());
        api.coins = vec![testing::coin(testing::id(0x41), 1_000_000_000)];
        api
    }

    #[tokio::test]
    async fn test_inspect_uses_zero_sender_by_default() {
        let executor = TransactionExecutor::new(api());
        executor.inspect(&claim_builder(), None).await.unwrap();

        let calls = executor.api().recorded_calls().await;
        assert!(calls.contains(&format!("dev_inspect {}", SuiAddress::ZERO)));
        assert!(!calls.iter().any(|c| c.starts_with("get_coins")));
    }

    #[tokio::test]
    async fn test_inspect_error_is_transaction_failure() {
        let mut api = api();
        api.dev_inspect_result = Some(json!({
            "effects": {"status": {"status": "failure"}},
            "error": "MoveAbort in movevault::claim_jackpot, code 2"
        }));
        let executor = TransactionExecutor::new(api);

        let err = executor.inspect(&claim_builder(), None).await.unwrap_err();
        assert!(matches!(err, ScriptError::TransactionFailed { .. }));
    }

    #[tokio::test]
    async fn test_sign_and_execute_submits_signed_bytes() {
        let executor = TransactionExecutor::new(api());
        let keypair = Ed25519Keypair::from_secret_key([3u8; 32]);

        let response = executor
            .sign_and_execute(&claim_builder(), &keypair)
            .await
            .unwrap();
        assert_eq!(response.digest, testing::digest(9));

        let executed = executor.api().executed.lock().await;
        assert_eq!(executed.len(), 1);
        let (bytes, signatures) = &executed[0];
        assert!(!bytes.is_empty());
        assert_eq!(signatures, &vec![keypair.sign_transaction(bytes)]);
    }

    #[tokio::test]
    async fn test_failed_effects_are_reported() {
        let mut api = api();
        api.execute_effects = Some(json!({
            "status": {"status": "failure", "error": "InsufficientCoinBalance"}
        }));
        let executor = TransactionExecutor::new(api);
        let keypair = Ed25519Keypair::from_secret_key([3u8; 32]);

        let err = executor
            .sign_and_execute(&claim_builder(), &keypair)
            .await
            .unwrap_err();
        match err {
            ScriptError::TransactionFailed { message } => {
                assert_eq!(message, "InsufficientCoinBalance")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dry_run_does_not_execute() {
        let executor = TransactionExecutor::new(api());
        executor
            .dry_run(&claim_builder(), SuiAddress::new([4u8; 32]))
            .await
            .unwrap();

        let calls = executor.api().recorded_calls().await;
        assert!(calls.contains(&"dry_run".to_string()));
        assert!(!calls.contains(&"execute".to_string()));
    }
}

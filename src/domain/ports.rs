use crate::domain::model::{ObjectId, SuiAddress};
use crate::domain::rpc_types::{
    CoinPage, DevInspectResults, DryRunResponse, DynamicFieldPage, ExecuteRequestType,
    NormalizedMoveFunction, SuiObjectResponse, TransactionBlockResponse,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The subset of the fullnode API the scripts rely on.
#[async_trait]
pub trait SuiApi: Send + Sync {
    /// Fetches an object with its owner and content.
    async fn get_object(&self, id: &ObjectId) -> Result<SuiObjectResponse>;

    async fn get_dynamic_fields(
        &self,
        parent: &ObjectId,
        cursor: Option<&str>,
        limit: Option<usize>,
    ) -> Result<DynamicFieldPage>;

    async fn get_reference_gas_price(&self) -> Result<u64>;

    async fn get_coins(
        &self,
        owner: &SuiAddress,
        coin_type: &str,
        cursor: Option<&str>,
    ) -> Result<CoinPage>;

    async fn get_normalized_move_function(
        &self,
        package: &ObjectId,
        module: &str,
        function: &str,
    ) -> Result<NormalizedMoveFunction>;

    /// Runs BCS `TransactionKind` bytes read-only.
    async fn dev_inspect(&self, sender: &SuiAddress, tx_kind: &[u8]) -> Result<DevInspectResults>;

    /// Simulates BCS `TransactionData` bytes, gas included.
    async fn dry_run(&self, tx_data: &[u8]) -> Result<DryRunResponse>;

    async fn execute(
        &self,
        tx_data: &[u8],
        signatures: Vec<String>,
        request_type: ExecuteRequestType,
    ) -> Result<TransactionBlockResponse>;
}

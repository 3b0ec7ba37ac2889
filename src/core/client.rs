use crate::domain::model::{ObjectId, SuiAddress};
use crate::domain::ports::SuiApi;
use crate::domain::rpc_types::{
    de_u64, CoinPage, DevInspectResults, DryRunResponse, DynamicFieldPage, ExecuteRequestType,
    NormalizedMoveFunction, SuiObjectResponse, TransactionBlockResponse,
};
use crate::utils::error::{Result, ScriptError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct GasPrice(#[serde(deserialize_with = "de_u64")] u64);

/// JSON-RPC 2.0 client for a Sui fullnode.
#[derive(Debug)]
pub struct SuiClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl SuiClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!("RPC {} (id {}) -> {}", method, id, self.url);
        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        tracing::debug!("RPC {} response status: {}", method, status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ScriptError::response(format!(
                "{} returned HTTP {}: {}",
                method, status, text
            )));
        }

        let rpc: RpcResponse<T> = response.json().await?;
        if let Some(err) = rpc.error {
            return Err(ScriptError::RpcError {
                code: err.code,
                message: err.message,
            });
        }
        rpc.result
            .ok_or_else(|| ScriptError::response(format!("{} returned no result", method)))
    }
}

#[async_trait]
impl SuiApi for SuiClient {
    async fn get_object(&self, id: &ObjectId) -> Result<SuiObjectResponse> {
        self.call(
            "sui_getObject",
            json!([
                id.to_string(),
                {"showContent": true, "showOwner": true, "showType": true}
            ]),
        )
        .await
    }

    async fn get_dynamic_fields(
        &self,
        parent: &ObjectId,
        cursor: Option<&str>,
        limit: Option<usize>,
    ) -> Result<DynamicFieldPage> {
        self.call(
            "suix_getDynamicFields",
            json!([parent.to_string(), cursor, limit]),
        )
        .await
    }

    async fn get_reference_gas_price(&self) -> Result<u64> {
        let price: GasPrice = self.call("suix_getReferenceGasPrice", json!([])).await?;
        Ok(price.0)
    }

    async fn get_coins(
        &self,
        owner: &SuiAddress,
        coin_type: &str,
        cursor: Option<&str>,
    ) -> Result<CoinPage> {
        self.call(
            "suix_getCoins",
            json!([owner.to_string(), coin_type, cursor, Value::Null]),
        )
        .await
    }

    async fn get_normalized_move_function(
        &self,
        package: &ObjectId,
        module: &str,
        function: &str,
    ) -> Result<NormalizedMoveFunction> {
        self.call(
            "sui_getNormalizedMoveFunction",
            json!([package.to_string(), module, function]),
        )
        .await
    }

    async fn dev_inspect(&self, sender: &SuiAddress, tx_kind: &[u8]) -> Result<DevInspectResults> {
        self.call(
            "sui_devInspectTransactionBlock",
            json!([sender.to_string(), BASE64.encode(tx_kind), Value::Null, Value::Null]),
        )
        .await
    }

    async fn dry_run(&self, tx_data: &[u8]) -> Result<DryRunResponse> {
        self.call(
            "sui_dryRunTransactionBlock",
            json!([BASE64.encode(tx_data)]),
        )
        .await
    }

    async fn execute(
        &self,
        tx_data: &[u8],
        signatures: Vec<String>,
        request_type: ExecuteRequestType,
    ) -> Result<TransactionBlockResponse> {
        self.call(
            "sui_executeTransactionBlock",
            json!([
                BASE64.encode(tx_data),
                signatures,
                {"showEffects": true, "showEvents": true},
                request_type
            ]),
        )
        .await
    }
}

//! In-memory fullnode used by the unit tests.

use crate::domain::model::{ObjectDigest, ObjectId, SuiAddress};
use crate::domain::ports::SuiApi;
use crate::domain::rpc_types::{
    CoinPage, DevInspectResults, DryRunResponse, DynamicFieldPage, ExecuteRequestType,
    NormalizedMoveFunction, SuiObjectResponse, TransactionBlockResponse,
};
use crate::utils::error::{Result, ScriptError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::Mutex;

pub fn digest(seed: u8) -> String {
    ObjectDigest::new([seed; 32]).to_string()
}

pub fn id(value: u8) -> ObjectId {
    ObjectId::new([value; 32])
}

pub fn shared_object(object_id: ObjectId, initial_shared_version: u64, fields: Value) -> Value {
    json!({
        "data": {
            "objectId": object_id.to_string(),
            "version": "17",
            "digest": digest(1),
            "owner": {"Shared": {"initial_shared_version": initial_shared_version}},
            "content": {"dataType": "moveObject", "fields": fields}
        }
    })
}

pub fn owned_object(object_id: ObjectId, version: u64, fields: Value) -> Value {
    json!({
        "data": {
            "objectId": object_id.to_string(),
            "version": version.to_string(),
            "digest": digest(2),
            "owner": {"AddressOwner": SuiAddress::ZERO.to_string()},
            "content": {"dataType": "moveObject", "fields": fields}
        }
    })
}

pub fn entry_function(parameters: Value) -> Value {
    json!({"isEntry": true, "parameters": parameters, "return": []})
}

pub fn game_clock_signature() -> Value {
    entry_function(json!([
        {"MutableReference": {"Struct": {"address": "0x1", "module": "m", "name": "Game", "typeArguments": []}}},
        {"Reference": {"Struct": {"address": "0x2", "module": "clock", "name": "Clock", "typeArguments": []}}},
        {"MutableReference": {"Struct": {"address": "0x2", "module": "tx_context", "name": "TxContext", "typeArguments": []}}}
    ]))
}

pub fn coin(object_id: ObjectId, balance: u64) -> Value {
    json!({
        "coinType": "0x2::sui::SUI",
        "coinObjectId": object_id.to_string(),
        "version": "3",
        "digest": digest(3),
        "balance": balance.to_string()
    })
}

fn stalled_page<T: serde::de::DeserializeOwned>(cursor: Option<&str>) -> Result<T> {
    Ok(serde_json::from_value(json!({
        "data": [],
        "nextCursor": cursor.unwrap_or("0"),
        "hasNextPage": true
    }))?)
}

#[derive(Default)]
pub struct MockSuiApi {
    pub objects: HashMap<ObjectId, Value>,
    /// Pages of dynamic field infos per parent, served in order.
    pub dynamic_fields: HashMap<ObjectId, Vec<Vec<Value>>>,
    /// Keyed by `module::function`.
    pub functions: HashMap<String, Value>,
    pub coins: Vec<Value>,
    pub gas_price: u64,
    pub dev_inspect_result: Option<Value>,
    pub execute_effects: Option<Value>,
    /// Pagers keep answering "more pages" with the cursor they were given.
    pub stalled_cursor: bool,
    pub calls: Mutex<Vec<String>>,
    pub executed: Mutex<Vec<(Vec<u8>, Vec<String>)>>,
}

impl MockSuiApi {
    pub fn new() -> Self {
        Self {
            gas_price: 1000,
            ..Default::default()
        }
    }

    pub fn with_object(mut self, object_id: ObjectId, response: Value) -> Self {
        self.objects.insert(object_id, response);
        self
    }

    pub fn with_function(mut self, module: &str, function: &str, signature: Value) -> Self {
        self.functions
            .insert(format!("{}::{}", module, function), signature);
        self
    }

    pub async fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: String) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl SuiApi for MockSuiApi {
    async fn get_object(&self, object_id: &ObjectId) -> Result<SuiObjectResponse> {
        self.record(format!("get_object {}", object_id)).await;
        let value = self
            .objects
            .get(object_id)
            .cloned()
            .unwrap_or_else(|| json!({"error": {"code": "notExists"}}));
        Ok(serde_json::from_value(value)?)
    }

    async fn get_dynamic_fields(
        &self,
        parent: &ObjectId,
        cursor: Option<&str>,
        _limit: Option<usize>,
    ) -> Result<DynamicFieldPage> {
        self.record(format!("get_dynamic_fields {} {:?}", parent, cursor))
            .await;
        if self.stalled_cursor {
            return stalled_page(cursor);
        }
        let pages = self.dynamic_fields.get(parent).cloned().unwrap_or_default();
        let index: usize = cursor.map(|c| c.parse().unwrap_or(0)).unwrap_or(0);
        let data = pages.get(index).cloned().unwrap_or_default();
        let has_next_page = index + 1 < pages.len();
        let next_cursor = has_next_page.then(|| (index + 1).to_string());
        Ok(serde_json::from_value(json!({
            "data": data,
            "nextCursor": next_cursor,
            "hasNextPage": has_next_page
        }))?)
    }

    async fn get_reference_gas_price(&self) -> Result<u64> {
        self.record("get_reference_gas_price".to_string()).await;
        Ok(self.gas_price)
    }

    async fn get_coins(
        &self,
        owner: &SuiAddress,
        _coin_type: &str,
        cursor: Option<&str>,
    ) -> Result<CoinPage> {
        self.record(format!("get_coins {}", owner)).await;
        if self.stalled_cursor {
            return stalled_page(cursor);
        }
        Ok(serde_json::from_value(json!({
            "data": self.coins,
            "nextCursor": null,
            "hasNextPage": false
        }))?)
    }

    async fn get_normalized_move_function(
        &self,
        _package: &ObjectId,
        module: &str,
        function: &str,
    ) -> Result<NormalizedMoveFunction> {
        let key = format!("{}::{}", module, function);
        self.record(format!("get_normalized_move_function {}", key))
            .await;
        let value = self.functions.get(&key).cloned().ok_or_else(|| ScriptError::RpcError {
            code: -32602,
            message: format!("No function {}", key),
        })?;
        Ok(serde_json::from_value(value)?)
    }

    async fn dev_inspect(&self, sender: &SuiAddress, _tx_kind: &[u8]) -> Result<DevInspectResults> {
        self.record(format!("dev_inspect {}", sender)).await;
        let value = self.dev_inspect_result.clone().unwrap_or_else(|| {
            json!({"effects": {"status": {"status": "success"}}, "events": [], "results": []})
        });
        Ok(serde_json::from_value(value)?)
    }

    async fn dry_run(&self, _tx_data: &[u8]) -> Result<DryRunResponse> {
        self.record("dry_run".to_string()).await;
        Ok(serde_json::from_value(json!({
            "effects": {"status": {"status": "success"}},
            "events": [],
            "balanceChanges": [],
            "objectChanges": []
        }))?)
    }

    async fn execute(
        &self,
        tx_data: &[u8],
        signatures: Vec<String>,
        _request_type: ExecuteRequestType,
    ) -> Result<TransactionBlockResponse> {
        self.record("execute".to_string()).await;
        self.executed
            .lock()
            .await
            .push((tx_data.to_vec(), signatures));
        let effects = self
            .execute_effects
            .clone()
            .unwrap_or_else(|| json!({"status": {"status": "success"}}));
        Ok(serde_json::from_value(json!({
            "digest": digest(9),
            "effects": effects,
            "confirmedLocalExecution": true
        }))?)
    }
}

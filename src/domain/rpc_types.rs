//! Response shapes of the fullnode JSON-RPC methods used by the scripts.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::model::{ObjectDigest, ObjectId, ObjectRef};
use crate::utils::error::{Result, ScriptError};

/// The node returns u64 values as decimal strings in most places and as
/// numbers in a few.
pub fn de_u64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Number(n) => Ok(n),
        StringOrNumber::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    AddressOwner(String),
    ObjectOwner(String),
    Shared {
        #[serde(deserialize_with = "de_u64")]
        initial_shared_version: u64,
    },
    Immutable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiObjectData {
    pub object_id: String,
    #[serde(deserialize_with = "de_u64")]
    pub version: u64,
    pub digest: String,
    #[serde(rename = "type", default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub content: Option<Value>,
}

impl SuiObjectData {
    pub fn object_ref(&self) -> Result<ObjectRef> {
        let object_id = self
            .object_id
            .parse::<ObjectId>()
            .map_err(|e| ScriptError::response(e.to_string()))?;
        Ok(ObjectRef {
            object_id,
            version: self.version,
            digest: self.digest.parse::<ObjectDigest>()?,
        })
    }

    /// `content.fields` of a Move object, if content was requested.
    pub fn fields(&self) -> Option<&Value> {
        self.content.as_ref()?.get("fields")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiObjectResponse {
    #[serde(default)]
    pub data: Option<SuiObjectData>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl SuiObjectResponse {
    pub fn into_data(self, object_id: &ObjectId) -> Result<SuiObjectData> {
        self.data.ok_or_else(|| ScriptError::ObjectNotFound {
            object_id: object_id.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFieldInfo {
    pub name: Value,
    pub object_id: String,
    #[serde(default)]
    pub object_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

pub type DynamicFieldPage = Page<DynamicFieldInfo>;
pub type CoinPage = Page<Coin>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_type: String,
    pub coin_object_id: String,
    #[serde(deserialize_with = "de_u64")]
    pub version: u64,
    pub digest: String,
    #[serde(deserialize_with = "de_u64")]
    pub balance: u64,
}

impl Coin {
    pub fn object_ref(&self) -> Result<ObjectRef> {
        let object_id = self
            .coin_object_id
            .parse::<ObjectId>()
            .map_err(|e| ScriptError::response(e.to_string()))?;
        Ok(ObjectRef {
            object_id,
            version: self.version,
            digest: self.digest.parse::<ObjectDigest>()?,
        })
    }
}

/// How a Move function takes a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterPassing {
    ByImmutableReference,
    ByMutableReference,
    ByValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMoveFunction {
    #[serde(default)]
    pub is_entry: bool,
    pub parameters: Vec<Value>,
    #[serde(rename = "return", default)]
    pub return_types: Vec<Value>,
}

impl NormalizedMoveFunction {
    pub fn parameter_passing(&self, index: usize) -> Option<ParameterPassing> {
        let param = self.parameters.get(index)?;
        Some(if param.get("Reference").is_some() {
            ParameterPassing::ByImmutableReference
        } else if param.get("MutableReference").is_some() {
            ParameterPassing::ByMutableReference
        } else {
            ParameterPassing::ByValue
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(default)]
    pub mutable_reference_outputs: Vec<Value>,
    /// `[bcs bytes, move type]` pairs.
    #[serde(default)]
    pub return_values: Vec<(Vec<u8>, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevInspectResults {
    pub effects: Value,
    #[serde(default)]
    pub events: Vec<Value>,
    #[serde(default)]
    pub results: Option<Vec<ExecutionResult>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunResponse {
    pub effects: Value,
    #[serde(default)]
    pub events: Vec<Value>,
    #[serde(default)]
    pub balance_changes: Vec<Value>,
    #[serde(default)]
    pub object_changes: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    pub digest: String,
    #[serde(default)]
    pub effects: Option<Value>,
    #[serde(default)]
    pub events: Option<Vec<Value>>,
    #[serde(default)]
    pub confirmed_local_execution: Option<bool>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExecuteRequestType {
    WaitForEffectsCert,
    WaitForLocalExecution,
}

/// `effects.status`: `Ok` on success, the node's error text otherwise.
pub fn execution_status(effects: &Value) -> std::result::Result<(), String> {
    let status = effects.get("status");
    match status.and_then(|s| s.get("status")).and_then(Value::as_str) {
        Some("success") => Ok(()),
        Some(_) => Err(status
            .and_then(|s| s.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("unknown failure")
            .to_string()),
        None => Err("effects carry no status".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_owner_variants() {
        let shared: Owner =
            serde_json::from_value(json!({"Shared": {"initial_shared_version": 1}})).unwrap();
        assert_eq!(
            shared,
            Owner::Shared {
                initial_shared_version: 1
            }
        );

        let shared_str: Owner =
            serde_json::from_value(json!({"Shared": {"initial_shared_version": "42"}})).unwrap();
        assert_eq!(
            shared_str,
            Owner::Shared {
                initial_shared_version: 42
            }
        );

        let immutable: Owner = serde_json::from_value(json!("Immutable")).unwrap();
        assert_eq!(immutable, Owner::Immutable);

        let owned: Owner = serde_json::from_value(json!({"AddressOwner": "0xabc"})).unwrap();
        assert_eq!(owned, Owner::AddressOwner("0xabc".to_string()));
    }

    #[test]
    fn test_object_response_without_data() {
        let resp: SuiObjectResponse = serde_json::from_value(json!({
            "error": {"code": "notExists", "object_id": "0x1"}
        }))
        .unwrap();
        let err = resp.into_data(&ObjectId::from_short(1)).unwrap_err();
        assert!(matches!(err, ScriptError::ObjectNotFound { .. }));
    }

    #[test]
    fn test_parameter_passing() {
        let func: NormalizedMoveFunction = serde_json::from_value(json!({
            "visibility": "Public",
            "isEntry": true,
            "typeParameters": [],
            "parameters": [
                {"MutableReference": {"Struct": {"address": "0x1", "module": "m", "name": "Game", "typeArguments": []}}},
                {"Reference": {"Struct": {"address": "0x2", "module": "clock", "name": "Clock", "typeArguments": []}}},
                "U64"
            ],
            "return": []
        }))
        .unwrap();
        assert_eq!(
            func.parameter_passing(0),
            Some(ParameterPassing::ByMutableReference)
        );
        assert_eq!(
            func.parameter_passing(1),
            Some(ParameterPassing::ByImmutableReference)
        );
        assert_eq!(func.parameter_passing(2), Some(ParameterPassing::ByValue));
        assert_eq!(func.parameter_passing(3), None);
    }

    #[test]
    fn test_execution_status() {
        assert!(execution_status(&json!({"status": {"status": "success"}})).is_ok());
        let err = execution_status(&json!({
            "status": {"status": "failure", "error": "MoveAbort(..., 3)"}
        }))
        .unwrap_err();
        assert!(err.contains("MoveAbort"));
        assert!(execution_status(&json!({})).is_err());
    }

    #[test]
    fn test_dev_inspect_return_values() {
        let results: DevInspectResults = serde_json::from_value(json!({
            "effects": {"status": {"status": "success"}},
            "events": [],
            "results": [{"returnValues": [[[16, 39, 0, 0, 0, 0, 0, 0], "u64"]]}]
        }))
        .unwrap();
        let values = &results.results.unwrap()[0].return_values;
        assert_eq!(values[0].1, "u64");
        assert_eq!(values[0].0.len(), 8);
    }
}

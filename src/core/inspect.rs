use crate::domain::model::SuiAddress;
use crate::domain::rpc_types::DevInspectResults;
use crate::utils::error::{Result, ScriptError};
use serde::Serialize;
use std::fmt;

/// A dev-inspect return value decoded by its Move type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MoveValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    // u128 does not fit a JSON number
    U128(String),
    Address(String),
    Raw { move_type: String, bytes: Vec<u8> },
}

impl fmt::Display for MoveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveValue::Bool(v) => write!(f, "{}", v),
            MoveValue::U8(v) => write!(f, "{}", v),
            MoveValue::U16(v) => write!(f, "{}", v),
            MoveValue::U32(v) => write!(f, "{}", v),
            MoveValue::U64(v) => write!(f, "{}", v),
            MoveValue::U128(v) | MoveValue::Address(v) => f.write_str(v),
            MoveValue::Raw { move_type, bytes } => write!(f, "{} {:?}", move_type, bytes),
        }
    }
}

pub fn decode_return_value(bytes: &[u8], move_type: &str) -> Result<MoveValue> {
    let value = match move_type {
        "bool" => MoveValue::Bool(bcs::from_bytes(bytes)?),
        "u8" => MoveValue::U8(bcs::from_bytes(bytes)?),
        "u16" => MoveValue::U16(bcs::from_bytes(bytes)?),
        "u32" => MoveValue::U32(bcs::from_bytes(bytes)?),
        "u64" => MoveValue::U64(bcs::from_bytes(bytes)?),
        "u128" => MoveValue::U128(bcs::from_bytes::<u128>(bytes)?.to_string()),
        "address" => {
            let raw: [u8; 32] = bytes.try_into().map_err(|_| {
                ScriptError::response(format!("address return value has {} bytes", bytes.len()))
            })?;
            MoveValue::Address(SuiAddress::new(raw).to_string())
        }
        other => MoveValue::Raw {
            move_type: other.to_string(),
            bytes: bytes.to_vec(),
        },
    };
    Ok(value)
}

/// `results[0].returnValues[0]`
pub fn first_return_value(results: &DevInspectResults) -> Option<&(Vec<u8>, String)> {
    results.results.as_ref()?.first()?.return_values.first()
}

/// Decodes every return value of every command, in order.
pub fn decode_all(results: &DevInspectResults) -> Result<Vec<Vec<MoveValue>>> {
    let Some(commands) = results.results.as_ref() else {
        return Ok(Vec::new());
    };
    commands
        .iter()
        .map(|command| {
            command
                .return_values
                .iter()
                .map(|(bytes, move_type)| decode_return_value(bytes, move_type))
                .collect()
        })
        .collect()
}

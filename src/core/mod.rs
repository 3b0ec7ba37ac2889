pub mod client;
pub mod dynamic_fields;
pub mod executor;
pub mod inspect;
pub mod keypair;
pub mod transaction;
pub mod vault;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::ports::SuiApi;
pub use crate::utils::error::Result;

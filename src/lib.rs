pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{CommandOutput, ScriptApp};
pub use config::{Cli, EnvConfig, Network, ProfileConfig, ScriptCommand, ScriptConfig};
pub use core::client::SuiClient;
pub use core::executor::TransactionExecutor;
pub use core::keypair::Ed25519Keypair;
pub use core::transaction::TransactionBuilder;
pub use domain::ports::SuiApi;
pub use utils::error::{Result, ScriptError};

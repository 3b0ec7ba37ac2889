pub mod script_app;

pub use script_app::{CommandOutput, ScriptApp};

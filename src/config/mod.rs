pub mod cli;
pub mod env_config;
pub mod toml_config;

use crate::core::keypair::Ed25519Keypair;
use crate::core::transaction::DEFAULT_GAS_BUDGET;
use crate::domain::model::ObjectId;
use crate::utils::error::{Result, ScriptError};
use crate::utils::validation::{
    validate_object_id, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use cli::{Cli, ConfigOverrides, ScriptCommand};
pub use env_config::EnvConfig;
pub use toml_config::ProfileConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    pub fn fullnode_url(&self) -> String {
        match self {
            Network::Localnet => "http://127.0.0.1:9000".to_string(),
            other => format!("https://fullnode.{}.sui.io:443", other),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        };
        f.write_str(name)
    }
}

impl FromStr for Network {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            "localnet" => Ok(Network::Localnet),
            _ => Err(ScriptError::InvalidConfigValueError {
                field: "network".to_string(),
                value: s.to_string(),
                reason: "expected mainnet, testnet, devnet or localnet".to_string(),
            }),
        }
    }
}

/// Fully merged configuration for one invocation.
#[derive(Clone)]
pub struct ScriptConfig {
    pub network: Network,
    pub rpc_url: String,
    pub gas_budget: u64,
    pub mnemonic: Option<String>,
    pub ark_package: Option<String>,
    pub ark_game: Option<String>,
    pub vault_package: Option<String>,
    pub vault_game: Option<String>,
    pub vault_manager_cap: Option<String>,
    pub user_data: Option<String>,
    pub movescription_package: Option<String>,
    pub inscription: Option<String>,
}

fn pick(env: Option<String>, profile: Option<String>) -> Option<String> {
    env.or_else(|| profile.filter(|v| !toml_config::is_placeholder(v)))
}

impl ScriptConfig {
    /// Merges CLI overrides, then the environment, then the profile file.
    pub fn resolve(
        overrides: &ConfigOverrides,
        env: EnvConfig,
        profile: Option<ProfileConfig>,
    ) -> Result<Self> {
        let profile = profile.unwrap_or_default();

        let env_names_network = env.network.is_some();
        let network = match overrides.network {
            Some(network) => network,
            None => match pick(env.network, profile.network.name) {
                Some(name) => name.parse()?,
                None => Network::default(),
            },
        };

        // A network chosen at one level outranks any RPC URL from a lower level.
        let rpc_url = if let Some(url) = overrides.rpc_url.clone() {
            url
        } else if overrides.network.is_some() {
            network.fullnode_url()
        } else if let Some(url) = env.rpc_url {
            url
        } else if env_names_network {
            network.fullnode_url()
        } else {
            profile
                .network
                .rpc_url
                .filter(|v| !toml_config::is_placeholder(v))
                .unwrap_or_else(|| network.fullnode_url())
        };

        let gas_budget = match (overrides.gas_budget, env.gas_budget) {
            (Some(budget), _) => budget,
            (None, Some(raw)) => {
                raw.trim()
                    .parse()
                    .map_err(|_| ScriptError::InvalidConfigValueError {
                        field: "gas_budget".to_string(),
                        value: raw.clone(),
                        reason: "expected an integer amount of MIST".to_string(),
                    })?
            }
            (None, None) => profile.gas.budget.unwrap_or(DEFAULT_GAS_BUDGET),
        };

        Ok(Self {
            network,
            rpc_url,
            gas_budget,
            mnemonic: pick(env.mnemonic, profile.signer.mnemonic),
            ark_package: pick(env.ark_package, profile.ark.package_id),
            ark_game: pick(env.ark_game, profile.ark.game),
            vault_package: pick(env.vault_package, profile.vault.package_id),
            vault_game: pick(env.vault_game, profile.vault.game),
            vault_manager_cap: pick(env.vault_manager_cap, profile.vault.manager_cap),
            user_data: pick(env.user_data, profile.vault.user_data),
            movescription_package: pick(
                env.movescription_package,
                profile.movescription.package_id,
            ),
            inscription: pick(env.inscription, profile.movescription.inscription_id),
        })
    }

    pub fn ark_package(&self) -> Result<ObjectId> {
        require(&self.ark_package, "ark package id", env_config::ARK_PACKAGE)
    }

    pub fn ark_game(&self) -> Result<ObjectId> {
        require(&self.ark_game, "ark game object", env_config::ARK_GAME)
    }

    pub fn vault_package(&self) -> Result<ObjectId> {
        require(&self.vault_package, "vault package id", env_config::VAULT_PACKAGE)
    }

    pub fn vault_game(&self) -> Result<ObjectId> {
        require(&self.vault_game, "vault game object", env_config::VAULT_GAME)
    }

    pub fn vault_manager_cap(&self) -> Result<ObjectId> {
        require(
            &self.vault_manager_cap,
            "vault manager cap",
            env_config::VAULT_MANAGER_CAP,
        )
    }

    pub fn user_data(&self) -> Result<ObjectId> {
        require(&self.user_data, "user data object", env_config::USER_DATA)
    }

    pub fn movescription_package(&self) -> Result<ObjectId> {
        require(
            &self.movescription_package,
            "movescription package id",
            env_config::MOVESCRIPTION_PACKAGE,
        )
    }

    pub fn inscription(&self) -> Result<ObjectId> {
        require(&self.inscription, "inscription object", env_config::INSCRIPTION)
    }

    pub fn keypair(&self) -> Result<Ed25519Keypair> {
        let phrase = self
            .mnemonic
            .as_deref()
            .ok_or_else(|| ScriptError::MissingConfig {
                field: "signer mnemonic".to_string(),
                env_var: env_config::MNEMONIC.to_string(),
            })?;
        Ed25519Keypair::from_mnemonic(phrase)
    }

    fn object_ids(&self) -> [(&'static str, &Option<String>); 8] {
        [
            (env_config::ARK_PACKAGE, &self.ark_package),
            (env_config::ARK_GAME, &self.ark_game),
            (env_config::VAULT_PACKAGE, &self.vault_package),
            (env_config::VAULT_GAME, &self.vault_game),
            (env_config::VAULT_MANAGER_CAP, &self.vault_manager_cap),
            (env_config::USER_DATA, &self.user_data),
            (env_config::MOVESCRIPTION_PACKAGE, &self.movescription_package),
            (env_config::INSCRIPTION, &self.inscription),
        ]
    }
}

fn require(value: &Option<String>, field: &str, env_var: &str) -> Result<ObjectId> {
    match value {
        Some(raw) => validate_object_id(env_var, raw),
        None => Err(ScriptError::MissingConfig {
            field: field.to_string(),
            env_var: env_var.to_string(),
        }),
    }
}

impl Validate for ScriptConfig {
    fn validate(&self) -> Result<()> {
        validate_url("rpc_url", &self.rpc_url)?;
        validate_positive_number("gas_budget", self.gas_budget, 1)?;
        for (name, value) in self.object_ids() {
            if let Some(raw) = value {
                validate_object_id(name, raw)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ScriptConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptConfig")
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url)
            .field("gas_budget", &self.gas_budget)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("ark_package", &self.ark_package)
            .field("ark_game", &self.ark_game)
            .field("vault_package", &self.vault_package)
            .field("vault_game", &self.vault_game)
            .field("vault_manager_cap", &self.vault_manager_cap)
            .field("user_data", &self.user_data)
            .field("movescription_package", &self.movescription_package)
            .field("inscription", &self.inscription)
            .finish()
    }
}

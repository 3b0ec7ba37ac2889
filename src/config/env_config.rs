pub const NETWORK: &str = "Network";
pub const RPC_URL: &str = "SUI_RPC_URL";
pub const MNEMONIC: &str = "SECRET_KEY_ED25519_1_MNEMONICS";
pub const ARK_PACKAGE: &str = "MoveArkPackageId";
pub const ARK_GAME: &str = "MoveArkGame";
pub const VAULT_PACKAGE: &str = "MoveVaultPackageId";
pub const VAULT_GAME: &str = "MoveVaultGame";
pub const VAULT_MANAGER_CAP: &str = "MoveVaultManagerCap";
pub const USER_DATA: &str = "UserDataObjectId";
pub const MOVESCRIPTION_PACKAGE: &str = "PACKAGE_ID";
pub const INSCRIPTION: &str = "INSCRIPTION_ID";
pub const GAS_BUDGET: &str = "GAS_BUDGET";

/// Values read from the process environment (and `.env`).
#[derive(Clone, Default)]
pub struct EnvConfig {
    pub network: Option<String>,
    pub rpc_url: Option<String>,
    pub mnemonic: Option<String>,
    pub ark_package: Option<String>,
    pub ark_game: Option<String>,
    pub vault_package: Option<String>,
    pub vault_game: Option<String>,
    pub vault_manager_cap: Option<String>,
    pub user_data: Option<String>,
    pub movescription_package: Option<String>,
    pub inscription: Option<String>,
    pub gas_budget: Option<String>,
}

impl EnvConfig {
    /// Loads `.env` from the working directory (if any), then reads the
    /// environment.
    pub fn load() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) => tracing::debug!("No .env file loaded: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            network: get(NETWORK),
            rpc_url: get(RPC_URL),
            mnemonic: get(MNEMONIC),
            ark_package: get(ARK_PACKAGE),
            ark_game: get(ARK_GAME),
            vault_package: get(VAULT_PACKAGE),
            vault_game: get(VAULT_GAME),
            vault_manager_cap: get(VAULT_MANAGER_CAP),
            user_data: get(USER_DATA),
            movescription_package: get(MOVESCRIPTION_PACKAGE),
            inscription: get(INSCRIPTION),
            gas_budget: get(GAS_BUDGET),
        }
    }
}

impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url)
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .field("ark_package", &self.ark_package)
            .field("ark_game", &self.ark_game)
            .field("vault_package", &self.vault_package)
            .field("vault_game", &self.vault_game)
            .field("vault_manager_cap", &self.vault_manager_cap)
            .field("user_data", &self.user_data)
            .field("movescription_package", &self.movescription_package)
            .field("inscription", &self.inscription)
            .field("gas_budget", &self.gas_budget)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_reads_script_variable_names() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("Network", "devnet"),
            ("MoveArkPackageId", "0xa"),
            ("MoveArkGame", "0xb"),
            ("PACKAGE_ID", "0xc"),
            ("SECRET_KEY_ED25519_1_MNEMONICS", "word word word"),
            ("MoveVaultGame", "  "),
        ]);
        let env = EnvConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(env.network.as_deref(), Some("devnet"));
        assert_eq!(env.ark_package.as_deref(), Some("0xa"));
        assert_eq!(env.ark_game.as_deref(), Some("0xb"));
        assert_eq!(env.movescription_package.as_deref(), Some("0xc"));
        assert!(env.vault_game.is_none());
        assert!(env.rpc_url.is_none());
    }

    #[test]
    fn test_debug_redacts_mnemonic() {
        let env = EnvConfig {
            mnemonic: Some("secret words".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", env);
        assert!(!rendered.contains("secret words"));
        assert!(rendered.contains("<redacted>"));
    }
}

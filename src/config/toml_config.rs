use crate::utils::error::{Result, ScriptError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML profile holding per-deployment ids.
///
/// ```toml
/// [network]
/// name = "testnet"
///
/// [signer]
/// mnemonic = "${SECRET_KEY_ED25519_1_MNEMONICS}"
///
/// [vault]
/// package_id = "0x..."
/// game = "0x..."
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub signer: SignerSection,
    #[serde(default)]
    pub ark: ArkSection,
    #[serde(default)]
    pub vault: VaultSection,
    #[serde(default)]
    pub movescription: MovescriptionSection,
    #[serde(default)]
    pub gas: GasSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSection {
    pub name: Option<String>,
    pub rpc_url: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SignerSection {
    pub mnemonic: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArkSection {
    pub package_id: Option<String>,
    pub game: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultSection {
    pub package_id: Option<String>,
    pub game: Option<String>,
    pub manager_cap: Option<String>,
    pub user_data: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovescriptionSection {
    pub package_id: Option<String>,
    pub inscription_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GasSection {
    pub budget: Option<u64>,
}

impl ProfileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScriptError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_vars(content, |name| std::env::var(name).ok())?;
        Ok(toml::from_str(&processed)?)
    }
}

/// Replaces `${VAR}` with `lookup(VAR)`; unknown variables stay verbatim.
pub fn substitute_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScriptError::config(e.to_string()))?;
    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| format!("${{{}}}", var_name))
    });
    Ok(result.to_string())
}

/// True for values still holding an unexpanded `${VAR}`.
pub fn is_placeholder(value: &str) -> bool {
    value.contains("${")
}

impl std::fmt::Debug for SignerSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerSection")
            .field("mnemonic", &self.mnemonic.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl std::fmt::Debug for ProfileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileConfig")
            .field("network", &self.network)
            .field("signer", &self.signer)
            .field("ark", &self.ark)
            .field("vault", &self.vault)
            .field("movescription", &self.movescription)
            .field("gas", &self.gas)
            .finish()
    }
}

use crate::config::Network;
use crate::core::vault::DEFAULT_SPLIT_AMOUNT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "vault-scripts")]
#[command(about = "Simulate and submit transactions against the ark and vault Move packages")]
pub struct Cli {
    /// TOML profile with object ids; `${VAR}` placeholders are expanded
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub network: Option<Network>,

    /// Overrides the fullnode URL derived from the network
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Gas budget in MIST
    #[arg(long, global = true)]
    pub gas_budget: Option<u64>,

    /// Dry-run signing commands instead of submitting them
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: ScriptCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ScriptCommand {
    /// Print the signer address
    Address,
    /// moveark::deposit_reward
    DepositReward,
    /// Split an inscription and deposit the piece into the vault
    Deposit {
        #[arg(long, default_value_t = DEFAULT_SPLIT_AMOUNT)]
        amount: u64,
    },
    /// Inspect movevault::available for a user data object
    Available {
        /// Defaults to UserDataObjectId
        #[arg(long)]
        user_data: Option<String>,
    },
    /// Inspect movevault::jackpot_claimable
    JackpotClaimable,
    /// movevault::claim_jackpot
    Claim,
    /// movevault::set_pause (requires the manager cap)
    SetPause {
        #[arg(long, action = clap::ArgAction::Set)]
        paused: bool,
    },
    /// List the values stored under a table field of a game object
    UserData {
        /// Defaults to MoveArkGame
        #[arg(long)]
        parent: Option<String>,
        #[arg(long, default_value = "user_datas")]
        field: String,
    },
}

impl ScriptCommand {
    /// Commands that need the mnemonic.
    pub fn needs_signer(&self) -> bool {
        matches!(
            self,
            ScriptCommand::Address
                | ScriptCommand::DepositReward
                | ScriptCommand::Deposit { .. }
                | ScriptCommand::Claim
                | ScriptCommand::SetPause { .. }
        )
    }

    /// Whether the binary prints `Signer address:` to stderr first.
    /// `address` already prints it as its result.
    pub fn announces_signer(&self) -> bool {
        self.needs_signer() && *self != ScriptCommand::Address
    }
}

/// Settings given on the command line, which win over env and profile.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub network: Option<Network>,
    pub rpc_url: Option<String>,
    pub gas_budget: Option<u64>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            network: self.network,
            rpc_url: self.rpc_url.clone(),
            gas_budget: self.gas_budget,
        }
    }
}

use crate::config::{ScriptCommand, ScriptConfig};
use crate::core::dynamic_fields::{fetch_dynamic_field_values, DynamicFieldEntry};
use crate::core::executor::TransactionExecutor;
use crate::core::inspect::{self, MoveValue};
use crate::core::transaction::TransactionBuilder;
use crate::core::vault::{self, SplitDeposit};
use crate::domain::model::ObjectId;
use crate::domain::ports::SuiApi;
use crate::utils::error::{Result, ScriptError};
use crate::utils::validation::{validate_non_empty_string, validate_object_id};
use serde::Serialize;
use serde_json::Value;

/// What a command produced; printed as JSON by the binary.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    Address {
        address: String,
    },
    Submitted {
        sender: String,
        digest: String,
        effects: Option<Value>,
        events: Vec<Value>,
    },
    Simulated {
        sender: String,
        effects: Value,
        balance_changes: Vec<Value>,
    },
    Inspected {
        function: String,
        values: Vec<Vec<MoveValue>>,
    },
    ReturnValue {
        function: String,
        value: Option<MoveValue>,
    },
    DynamicFields {
        parent: String,
        field: String,
        entries: Vec<DynamicFieldEntry>,
    },
}

pub struct ScriptApp<A: SuiApi> {
    executor: TransactionExecutor<A>,
    config: ScriptConfig,
    dry_run: bool,
}

impl<A: SuiApi> ScriptApp<A> {
    pub fn new(api: A, config: ScriptConfig) -> Self {
        Self {
            executor: TransactionExecutor::new(api),
            config,
            dry_run: false,
        }
    }

    /// Simulate signing commands instead of submitting them.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn api(&self) -> &A {
        self.executor.api()
    }

    pub async fn run(&self, command: &ScriptCommand) -> Result<CommandOutput> {
        tracing::debug!("Running {:?}", command);
        match command {
            ScriptCommand::Address => {
                let keypair = self.config.keypair()?;
                Ok(CommandOutput::Address {
                    address: keypair.address().to_string(),
                })
            }
            ScriptCommand::DepositReward => {
                let mut txb = TransactionBuilder::new();
                vault::deposit_reward(
                    &mut txb,
                    self.config.ark_package()?,
                    self.config.ark_game()?,
                );
                self.submit(txb).await
            }
            ScriptCommand::Deposit { amount } => {
                if *amount == 0 {
                    return Err(ScriptError::InvalidConfigValueError {
                        field: "amount".to_string(),
                        value: amount.to_string(),
                        reason: "cannot split zero".to_string(),
                    });
                }
                let params = SplitDeposit {
                    movescription_package: self.config.movescription_package()?,
                    inscription: self.config.inscription()?,
                    amount: *amount,
                    vault_package: self.config.vault_package()?,
                    game: self.config.vault_game()?,
                };
                let mut txb = TransactionBuilder::new();
                vault::split_and_deposit(&mut txb, &params);
                self.submit(txb).await
            }
            ScriptCommand::Available { user_data } => {
                let user_data = match user_data {
                    Some(raw) => validate_object_id("user_data", raw)?,
                    None => self.config.user_data()?,
                };
                let mut txb = TransactionBuilder::new();
                vault::available(&mut txb, self.config.vault_package()?, user_data);

                let results = self.executor.inspect(&txb, None).await?;
                Ok(CommandOutput::Inspected {
                    function: format!("{}::available", vault::VAULT_MODULE),
                    values: inspect::decode_all(&results)?,
                })
            }
            ScriptCommand::JackpotClaimable => {
                let mut txb = TransactionBuilder::new();
                vault::jackpot_claimable(
                    &mut txb,
                    self.config.vault_package()?,
                    self.config.vault_game()?,
                );

                let results = self.executor.inspect(&txb, None).await?;
                let value = inspect::first_return_value(&results)
                    .map(|(bytes, move_type)| inspect::decode_return_value(bytes, move_type))
                    .transpose()?;
                if value.is_none() {
                    tracing::warn!("jackpot_claimable returned no value");
                }
                Ok(CommandOutput::ReturnValue {
                    function: format!("{}::jackpot_claimable", vault::VAULT_MODULE),
                    value,
                })
            }
            ScriptCommand::Claim => {
                let mut txb = TransactionBuilder::new();
                vault::claim_jackpot(
                    &mut txb,
                    self.config.vault_package()?,
                    self.config.vault_game()?,
                );
                self.submit(txb).await
            }
            ScriptCommand::SetPause { paused } => {
                let mut txb = TransactionBuilder::new();
                vault::set_pause(
                    &mut txb,
                    self.config.vault_package()?,
                    self.config.vault_manager_cap()?,
                    self.config.vault_game()?,
                    *paused,
                );
                self.submit(txb).await
            }
            ScriptCommand::UserData { parent, field } => {
                validate_non_empty_string("field", field)?;
                let parent: ObjectId = match parent {
                    Some(raw) => validate_object_id("parent", raw)?,
                    None => self.config.ark_game()?,
                };
                let entries = fetch_dynamic_field_values(self.api(), &parent, field).await?;
                Ok(CommandOutput::DynamicFields {
                    parent: parent.to_string(),
                    field: field.clone(),
                    entries,
                })
            }
        }
    }

    async fn submit(&self, mut txb: TransactionBuilder) -> Result<CommandOutput> {
        let keypair = self.config.keypair()?;
        let sender = keypair.address();
        tracing::debug!("Signing as {}", sender);
        txb.set_gas_budget(self.config.gas_budget);

        if self.dry_run {
            let response = self.executor.dry_run(&txb, sender).await?;
            return Ok(CommandOutput::Simulated {
                sender: sender.to_string(),
                effects: response.effects,
                balance_changes: response.balance_changes,
            });
        }

        let response = self.executor.sign_and_execute(&txb, &keypair).await?;
        Ok(CommandOutput::Submitted {
            sender: sender.to_string(),
            digest: response.digest,
            effects: response.effects,
            events: response.events.unwrap_or_default(),
        })
    }
}

use crate::domain::model::{
    Argument, CallArg, Command, GasData, MoveCallTarget, ObjectArg, ObjectId, ObjectRef,
    ProgrammableMoveCall, ProgrammableTransaction, SuiAddress, TransactionData,
    TransactionDataV1, TransactionExpiration, TransactionKind, TypeTag,
};
use crate::domain::ports::SuiApi;
use crate::domain::rpc_types::{NormalizedMoveFunction, Owner, ParameterPassing};
use crate::utils::error::{Result, ScriptError};
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_GAS_BUDGET: u64 = 40_000_000;
pub const MAX_GAS_OBJECTS: usize = 256;
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

#[derive(Debug, Clone, PartialEq, Eq)]
enum BuilderInput {
    Pure(Vec<u8>),
    Object(ObjectId),
}

#[derive(Debug, Clone)]
struct PendingMoveCall {
    target: MoveCallTarget,
    type_arguments: Vec<TypeTag>,
    arguments: Vec<Argument>,
}

/// Assembles a programmable transaction from unresolved object ids and pure
/// values. Object references and shared-object mutability are looked up on
/// the fullnode when the transaction is built.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    inputs: Vec<BuilderInput>,
    calls: Vec<PendingMoveCall>,
    sender: Option<SuiAddress>,
    gas_budget: Option<u64>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_input(&mut self, input: BuilderInput) -> Argument {
        self.inputs.push(input);
        Argument::Input((self.inputs.len() - 1) as u16)
    }

    /// Adds an object input. Repeated ids share one input slot.
    pub fn object(&mut self, id: ObjectId) -> Argument {
        let existing = self
            .inputs
            .iter()
            .position(|input| *input == BuilderInput::Object(id));
        match existing {
            Some(index) => Argument::Input(index as u16),
            None => self.push_input(BuilderInput::Object(id)),
        }
    }

    pub fn pure<T: Serialize>(&mut self, value: &T) -> Result<Argument> {
        let bytes = bcs::to_bytes(value)?;
        Ok(self.push_input(BuilderInput::Pure(bytes)))
    }

    pub fn pure_u64(&mut self, value: u64) -> Argument {
        self.push_input(BuilderInput::Pure(value.to_le_bytes().to_vec()))
    }

    pub fn pure_bool(&mut self, value: bool) -> Argument {
        self.push_input(BuilderInput::Pure(vec![value as u8]))
    }

    /// Appends a Move call; the returned argument refers to its result.
    pub fn move_call(
        &mut self,
        target: MoveCallTarget,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Argument {
        self.calls.push(PendingMoveCall {
            target,
            type_arguments,
            arguments,
        });
        Argument::Result((self.calls.len() - 1) as u16)
    }

    pub fn set_sender(&mut self, sender: SuiAddress) {
        self.sender = Some(sender);
    }

    pub fn set_gas_budget(&mut self, budget: u64) {
        self.gas_budget = Some(budget);
    }

    pub fn gas_budget(&self) -> u64 {
        self.gas_budget.unwrap_or(DEFAULT_GAS_BUDGET)
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn object_inputs(&self) -> Vec<ObjectId> {
        self.inputs
            .iter()
            .filter_map(|input| match input {
                BuilderInput::Object(id) => Some(*id),
                BuilderInput::Pure(_) => None,
            })
            .collect()
    }

    /// Input index -> whether any call takes that object mutably.
    async fn object_mutability<A: SuiApi + ?Sized>(&self, api: &A) -> Result<HashMap<u16, bool>> {
        let mut signatures: HashMap<MoveCallTarget, NormalizedMoveFunction> = HashMap::new();
        let mut mutability: HashMap<u16, bool> = HashMap::new();

        for call in &self.calls {
            let object_args: Vec<(usize, u16)> = call
                .arguments
                .iter()
                .enumerate()
                .filter_map(|(position, arg)| match arg {
                    Argument::Input(index)
                        if matches!(
                            self.inputs.get(*index as usize),
                            Some(BuilderInput::Object(_))
                        ) =>
                    {
                        Some((position, *index))
                    }
                    _ => None,
                })
                .collect();
            if object_args.is_empty() {
                continue;
            }

            if !signatures.contains_key(&call.target) {
                let function = api
                    .get_normalized_move_function(
                        &call.target.package,
                        &call.target.module,
                        &call.target.function,
                    )
                    .await?;
                signatures.insert(call.target.clone(), function);
            }
            let function = &signatures[&call.target];

            for (position, index) in object_args {
                let mutable = function.parameter_passing(position)
                    != Some(ParameterPassing::ByImmutableReference);
                *mutability.entry(index).or_insert(false) |= mutable;
            }
        }

        Ok(mutability)
    }

    pub async fn build_kind<A: SuiApi + ?Sized>(&self, api: &A) -> Result<TransactionKind> {
        let mutability = self.object_mutability(api).await?;

        let mut inputs = Vec::with_capacity(self.inputs.len());
        for (index, input) in self.inputs.iter().enumerate() {
            let call_arg = match input {
                BuilderInput::Pure(bytes) => CallArg::Pure(bytes.clone()),
                BuilderInput::Object(id) => {
                    let data = api.get_object(id).await?.into_data(id)?;
                    match data.owner {
                        Some(Owner::Shared {
                            initial_shared_version,
                        }) => CallArg::Object(ObjectArg::SharedObject {
                            id: *id,
                            initial_shared_version,
                            mutable: mutability.get(&(index as u16)).copied().unwrap_or(true),
                        }),
                        _ => CallArg::Object(ObjectArg::ImmOrOwnedObject(data.object_ref()?)),
                    }
                }
            };
            inputs.push(call_arg);
        }

        let commands = self
            .calls
            .iter()
            .map(|call| {
                Command::MoveCall(Box::new(ProgrammableMoveCall {
                    package: call.target.package,
                    module: call.target.module.clone(),
                    function: call.target.function.clone(),
                    type_arguments: call.type_arguments.clone(),
                    arguments: call.arguments.clone(),
                }))
            })
            .collect();

        Ok(TransactionKind::ProgrammableTransaction(
            ProgrammableTransaction { inputs, commands },
        ))
    }

    pub async fn build<A: SuiApi + ?Sized>(&self, api: &A) -> Result<TransactionData> {
        let sender = self
            .sender
            .ok_or_else(|| ScriptError::config("transaction sender is not set"))?;
        let kind = self.build_kind(api).await?;
        let budget = self.gas_budget();
        let price = api.get_reference_gas_price().await?;
        let payment = select_gas_coins(api, &sender, budget, &self.object_inputs()).await?;

        tracing::debug!(
            "Gas: budget {} price {} paid with {} coin(s)",
            budget,
            price,
            payment.len()
        );

        Ok(TransactionData::V1(TransactionDataV1 {
            kind,
            sender,
            gas_data: GasData {
                payment,
                owner: sender,
                price,
                budget,
            },
            expiration: TransactionExpiration::None,
        }))
    }
}

/// Picks the owner's largest SUI coins until `budget` is covered, skipping
/// coins already used as transaction inputs.
pub async fn select_gas_coins<A: SuiApi + ?Sized>(
    api: &A,
    owner: &SuiAddress,
    budget: u64,
    exclude: &[ObjectId],
) -> Result<Vec<ObjectRef>> {
    let mut coins = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = api.get_coins(owner, SUI_COIN_TYPE, cursor.as_deref()).await?;
        coins.extend(page.data);
        match page.next_cursor {
            Some(next) if page.has_next_page => {
                if cursor.as_deref() == Some(next.as_str()) {
                    return Err(ScriptError::response(format!(
                        "coin cursor {} did not advance for {}",
                        next, owner
                    )));
                }
                cursor = Some(next);
            }
            _ => break,
        }
    }

    let mut candidates = Vec::with_capacity(coins.len());
    for coin in &coins {
        let object_ref = coin.object_ref()?;
        if !exclude.contains(&object_ref.object_id) {
            candidates.push((coin.balance, object_ref));
        }
    }
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    let mut total: u64 = 0;
    let mut payment = Vec::new();
    for (balance, object_ref) in candidates.into_iter().take(MAX_GAS_OBJECTS) {
        if total >= budget {
            break;
        }
        total = total.saturating_add(balance);
        payment.push(object_ref);
    }

    if total < budget {
        return Err(ScriptError::InsufficientGas {
            message: format!(
                "{} holds {} MIST in usable SUI coins, budget is {}",
                owner, total, budget
            ),
        });
    }

    Ok(payment)
}

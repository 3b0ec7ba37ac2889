//! Calls into the ark, vault and movescription Move modules.

use crate::core::transaction::TransactionBuilder;
use crate::domain::model::{Argument, MoveCallTarget, ObjectId, CLOCK_OBJECT_ID};

pub const ARK_MODULE: &str = "moveark";
pub const VAULT_MODULE: &str = "movevault";
pub const MOVESCRIPTION_MODULE: &str = "movescription";

pub const DEFAULT_SPLIT_AMOUNT: u64 = 10_000;

/// `moveark::deposit_reward(game, clock)`
pub fn deposit_reward(
    txb: &mut TransactionBuilder,
    ark_package: ObjectId,
    game: ObjectId,
) -> Argument {
    let game = txb.object(game);
    let clock = txb.object(CLOCK_OBJECT_ID);
    txb.move_call(
        MoveCallTarget::new(ark_package, ARK_MODULE, "deposit_reward"),
        vec![],
        vec![game, clock],
    )
}

/// `movescription::do_split(inscription, amount)`; the result is the split-off
/// inscription.
pub fn split_inscription(
    txb: &mut TransactionBuilder,
    movescription_package: ObjectId,
    inscription: ObjectId,
    amount: u64,
) -> Argument {
    let inscription = txb.object(inscription);
    let amount = txb.pure_u64(amount);
    txb.move_call(
        MoveCallTarget::new(movescription_package, MOVESCRIPTION_MODULE, "do_split"),
        vec![],
        vec![inscription, amount],
    )
}

/// `movevault::deposit(game, coin, clock)`
pub fn deposit(
    txb: &mut TransactionBuilder,
    vault_package: ObjectId,
    game: ObjectId,
    coin: Argument,
) -> Argument {
    let game = txb.object(game);
    let clock = txb.object(CLOCK_OBJECT_ID);
    txb.move_call(
        MoveCallTarget::new(vault_package, VAULT_MODULE, "deposit"),
        vec![],
        vec![game, coin, clock],
    )
}

pub struct SplitDeposit {
    pub movescription_package: ObjectId,
    pub inscription: ObjectId,
    pub amount: u64,
    pub vault_package: ObjectId,
    pub game: ObjectId,
}

/// Splits `amount` off the inscription and deposits the piece in one block.
pub fn split_and_deposit(txb: &mut TransactionBuilder, params: &SplitDeposit) -> Argument {
    let piece = split_inscription(
        txb,
        params.movescription_package,
        params.inscription,
        params.amount,
    );
    deposit(txb, params.vault_package, params.game, piece)
}

/// `movevault::available(user_data, clock)`
pub fn available(
    txb: &mut TransactionBuilder,
    vault_package: ObjectId,
    user_data: ObjectId,
) -> Argument {
    let user_data = txb.object(user_data);
    let clock = txb.object(CLOCK_OBJECT_ID);
    txb.move_call(
        MoveCallTarget::new(vault_package, VAULT_MODULE, "available"),
        vec![],
        vec![user_data, clock],
    )
}

/// `movevault::jackpot_claimable(game, clock)`
pub fn jackpot_claimable(
    txb: &mut TransactionBuilder,
    vault_package: ObjectId,
    game: ObjectId,
) -> Argument {
    let game = txb.object(game);
    let clock = txb.object(CLOCK_OBJECT_ID);
    txb.move_call(
        MoveCallTarget::new(vault_package, VAULT_MODULE, "jackpot_claimable"),
        vec![],
        vec![game, clock],
    )
}

/// `movevault::claim_jackpot(game, clock)`
pub fn claim_jackpot(
    txb: &mut TransactionBuilder,
    vault_package: ObjectId,
    game: ObjectId,
) -> Argument {
    let game = txb.object(game);
    let clock = txb.object(CLOCK_OBJECT_ID);
    txb.move_call(
        MoveCallTarget::new(vault_package, VAULT_MODULE, "claim_jackpot"),
        vec![],
        vec![game, clock],
    )
}

/// `movevault::set_pause(manager_cap, game, paused)`
pub fn set_pause(
    txb: &mut TransactionBuilder,
    vault_package: ObjectId,
    manager_cap: ObjectId,
    game: ObjectId,
    paused: bool,
) -> Argument {
    let cap = txb.object(manager_cap);
    let game = txb.object(game);
    let paused = txb.pure_bool(paused);
    txb.move_call(
        MoveCallTarget::new(vault_package, VAULT_MODULE, "set_pause"),
        vec![],
        vec![cap, game, paused],
    )
}

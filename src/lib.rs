//! Quest automation for on-chain heroes.
//!
//! Each polling tick completes finished quests, pauses automation once the tracked hero
//! is about to level up, tops up stamina where needed and starts new quest batches.
//! Every write goes through [`executor::TxExecutor`]; a failed or stuck transaction is
//! surfaced as [`error::TxError`] and ends the run.

pub mod context;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod quest;
pub mod runtime;
pub mod scheduler;
pub mod utils;

pub mod config {
    pub mod quests;
}

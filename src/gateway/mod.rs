//! Typed access to the quest, item and hero contracts plus the hero metadata endpoint.
//!
//! Reads reflect the latest block on every call; nothing is cached. Writes are only
//! reachable through [`crate::executor::TxExecutor`], which owns the timeout and the
//! receipt status check.

pub mod chain;
pub mod contracts;
pub mod metadata;

use crate::error::Result;
use alloy::primitives::{Address, Log, B256};
use async_trait::async_trait;

pub use chain::ChainGateway;
pub use metadata::HeroMetadataClient;

pub type HeroId = u64;

/// Snapshot of one in-flight quest for the account, as reported by the quest contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuest {
    pub id: u64,
    pub quest: Address,
    pub heroes: Vec<HeroId>,
    pub complete_at_time: u64,
    pub attempts: u8,
}

impl ActiveQuest {
    /// The first hero in the group leads the quest and is the key for `completeQuest`.
    pub fn leader(&self) -> Option<HeroId> {
        self.heroes.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroStats {
    pub level: u16,
    pub xp: u64,
    pub stamina: u16,
}

/// Confirmed transaction, reduced to what the quest logic consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: B256,
    pub success: bool,
    pub logs: Vec<Log>,
}

#[async_trait]
pub trait QuestGateway: Send + Sync {
    async fn active_quests(&self, account: Address) -> Result<Vec<ActiveQuest>>;
    async fn current_stamina(&self, hero: HeroId) -> Result<u64>;
    async fn hero_stats(&self, hero: HeroId) -> Result<HeroStats>;
    async fn hero_name(&self, hero: HeroId) -> Result<String>;

    // Each write resolves once the transaction is mined (or broadcasting failed).
    async fn start_quest(
        &self,
        heroes: &[HeroId],
        quest: Address,
        attempts: u8,
        level: u8,
    ) -> anyhow::Result<TxReceipt>;
    async fn complete_quest(&self, hero: HeroId) -> anyhow::Result<TxReceipt>;
    async fn consume_item(&self, item: Address, hero: HeroId) -> anyhow::Result<TxReceipt>;
}

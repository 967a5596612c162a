//! The outer polling loop.
//!
//! One tick runs `check -> complete -> level evaluation -> start` to completion before
//! the scheduler sleeps for the polling interval. Transient errors abandon the tick and
//! the whole tick is retried after the interval; transaction errors end the loop.

use crate::context::RunnerContext;
use crate::error::{Result, RunnerError, TxError};
use crate::gateway::QuestGateway;
use crate::quest::hero_label;
use crate::quest::leveling::should_halt_for_level_up;
use crate::quest::lifecycle::{
    complete_quest, compute_quests_to_start, partition_by_completion, start_quest,
};
use crate::utils::error::compact_error;
use chrono::{DateTime, Local};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The tracked hero is close enough to levelling up that automation must pause.
    Halted,
}

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Local wall-clock `HH:MM:SS` for a chain timestamp.
pub fn display_time(timestamp_secs: u64) -> String {
    i64::try_from(timestamp_secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|utc| utc.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| format!("t={timestamp_secs}"))
}

pub struct QuestScheduler<G> {
    ctx: RunnerContext<G>,
}

impl<G: QuestGateway> QuestScheduler<G> {
    pub fn new(ctx: RunnerContext<G>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &RunnerContext<G> {
        &self.ctx
    }

    /// Loop until the level-up halt (`Ok`) or a transaction failure (`Err`).
    pub async fn run(&self) -> std::result::Result<(), TxError> {
        loop {
            match self.run_tick().await {
                Ok(TickOutcome::Halted) => return Ok(()),
                Ok(TickOutcome::Continue) => {}
                Err(RunnerError::Tx(err)) => return Err(err),
                Err(err) => {
                    tracing::error!(
                        "[TICK] An error occurred. Will retry in {} seconds. Error: {}",
                        self.ctx.settings.polling_interval.as_secs(),
                        compact_error(&err)
                    );
                }
            }
            self.wait_for_next_tick().await;
        }
    }

    pub async fn run_tick(&self) -> Result<TickOutcome> {
        self.run_tick_at(now_unix_secs()).await
    }

    pub async fn run_tick_at(&self, now_secs: u64) -> Result<TickOutcome> {
        let ctx = &self.ctx;
        let account = ctx.settings.account;

        tracing::info!("[TICK] Checking for quests...");
        let active = ctx.gateway.active_quests(account).await?;
        let (running, done) = partition_by_completion(active, now_secs);
        for quest in &running {
            if let Some(leader) = quest.leader() {
                tracing::info!(
                    "[QUEST] Quest led by {} is due to complete at {}",
                    hero_label(ctx, leader).await,
                    display_time(quest.complete_at_time)
                );
            }
        }

        for quest in &done {
            let Some(leader) = quest.leader() else {
                tracing::warn!("[QUEST] Active quest {} has no heroes; skipping.", quest.id);
                continue;
            };
            match complete_quest(ctx, leader).await {
                Ok(_) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => tracing::warn!(
                    "[QUEST] Error completing quest led by hero #{leader} - this will be retried next polling interval: {}",
                    compact_error(&err)
                ),
            }
        }

        let tracked = ctx.settings.tracked_hero;
        let stats = ctx.gateway.hero_stats(tracked).await?;
        if should_halt_for_level_up(&stats, ctx.settings.level_up_margin_xp) {
            tracing::info!(
                "[TICK] ***** {} is almost at full XP - Time to Level Up! *****",
                hero_label(ctx, tracked).await
            );
            return Ok(TickOutcome::Halted);
        }

        let active = ctx.gateway.active_quests(account).await?;
        let requests = compute_quests_to_start(ctx, &active).await?;
        for request in &requests {
            match start_quest(ctx, request).await {
                Ok(_) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => tracing::warn!(
                    "[QUEST] Error determining questing group for {} - this will be retried next polling interval: {}",
                    request.name,
                    compact_error(&err)
                ),
            }
        }

        Ok(TickOutcome::Continue)
    }

    async fn wait_for_next_tick(&self) {
        let mut remaining = self.ctx.settings.polling_interval;
        tracing::info!(
            "[TICK] Waiting for quests to finish: {} seconds remaining.",
            remaining.as_secs()
        );
        while !remaining.is_zero() {
            let step = remaining.min(COUNTDOWN_STEP);
            tokio::time::sleep(step).await;
            remaining -= step;
            tracing::debug!(
                "[TICK] Waiting for quests to finish: {} seconds remaining.",
                remaining.as_secs()
            );
        }
    }
}

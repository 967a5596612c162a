use super::hero_label;
use super::leveling::format_xp_progress;
use super::rewards::CompletionSummary;
use super::stamina::select_ready_heroes;
use crate::context::RunnerContext;
use crate::error::{Result, RunnerError};
use crate::gateway::{ActiveQuest, HeroId, QuestGateway};
use crate::utils::error::compact_error;
use alloy::primitives::Address;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestStartRequest {
    pub name: String,
    pub quest: Address,
    pub level: u8,
    pub attempts: u8,
    pub heroes: Vec<HeroId>,
}

/// Splits active quests into `(running, done)`. A quest whose completion time is at or
/// after `now_secs` is still running; everything else must be completed.
pub fn partition_by_completion(
    active: Vec<ActiveQuest>,
    now_secs: u64,
) -> (Vec<ActiveQuest>, Vec<ActiveQuest>) {
    active
        .into_iter()
        .partition(|quest| quest.complete_at_time >= now_secs)
}

pub fn busy_heroes(active: &[ActiveQuest]) -> HashSet<HeroId> {
    active
        .iter()
        .flat_map(|quest| quest.heroes.iter().copied())
        .collect()
}

/// Consecutive groups of at most `max_group_size` heroes, preserving order.
pub fn plan_batches(heroes: &[HeroId], max_group_size: usize) -> Result<Vec<&[HeroId]>> {
    if max_group_size == 0 {
        return Err(RunnerError::Batch(
            "max quest group size must be at least 1".to_string(),
        ));
    }
    Ok(heroes.chunks(max_group_size).collect())
}

/// One start request per configured quest that lists any hero. The request is emitted
/// even when no hero is ready; starting it is then a no-op.
///
/// Heroes claimed by an earlier quest definition in this pass are treated as busy for
/// later ones, so a hero listed under two quests is never started twice.
pub async fn compute_quests_to_start<G: QuestGateway>(
    ctx: &RunnerContext<G>,
    active: &[ActiveQuest],
) -> Result<Vec<QuestStartRequest>> {
    let mut busy = busy_heroes(active);
    let mut requests = Vec::new();
    for quest in ctx.settings.quests.iter().filter(|q| !q.heroes.is_empty()) {
        let heroes = select_ready_heroes(ctx, quest, &busy).await?;
        busy.extend(heroes.iter().copied());
        requests.push(QuestStartRequest {
            name: quest.name.clone(),
            quest: quest.contract_address,
            level: quest.level,
            attempts: quest.attempts_or(ctx.settings.quest_attempts),
            heroes,
        });
    }
    Ok(requests)
}

/// Start `request` in sequential batches. Returns the number of batches started.
pub async fn start_quest<G: QuestGateway>(
    ctx: &RunnerContext<G>,
    request: &QuestStartRequest,
) -> Result<usize> {
    let batches = plan_batches(&request.heroes, ctx.settings.max_group_size)?;
    let total = batches.len();
    for (index, batch) in batches.into_iter().enumerate() {
        tracing::info!(
            "[QUEST] Starting {} quest with heroes {:?} (batch {}/{})",
            request.name,
            batch,
            index + 1,
            total
        );
        ctx.executor
            .send_and_confirm(&format!("startQuest({})", request.name), || {
                ctx.gateway
                    .start_quest(batch, request.quest, request.attempts, request.level)
            })
            .await?;
    }
    Ok(total)
}

/// Complete the quest led by `leader`, then report rewards and the leader's XP.
pub async fn complete_quest<G: QuestGateway>(
    ctx: &RunnerContext<G>,
    leader: HeroId,
) -> Result<CompletionSummary> {
    let label = hero_label(ctx, leader).await;
    tracing::info!("[QUEST] Completing quest led by {label}.");

    let receipt = ctx
        .executor
        .send_and_confirm(&format!("completeQuest(hero #{leader})"), || {
            ctx.gateway.complete_quest(leader)
        })
        .await?;

    tracing::info!("[QUEST] ***** Completed quest led by {label} *****");
    let summary = CompletionSummary::from_logs(&receipt.logs);
    summary.log_report(&ctx.settings.rewards);

    // Completion is already confirmed; the stats read is report-only.
    match ctx.gateway.hero_stats(leader).await {
        Ok(stats) => tracing::info!("[QUEST] Current XP: {}", format_xp_progress(&stats)),
        Err(err) => tracing::warn!(
            "[QUEST] Unable to read XP for {label} after completion: {}",
            compact_error(&err)
        ),
    }
    Ok(summary)
}

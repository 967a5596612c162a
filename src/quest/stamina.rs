use crate::config::quests::QuestDefinition;
use crate::context::RunnerContext;
use crate::error::Result;
use crate::gateway::{HeroId, QuestGateway};
use futures::future::try_join_all;
use std::collections::HashSet;

/// Heroes of `quest` that can start now, in definition order.
///
/// Heroes in `busy` and repeated entries are skipped. Stamina is read for the rest in
/// parallel; any read failure aborts the whole selection. A hero below the minimum gets a
/// stamina vial consumed for it and is still reported ready without re-reading its stamina.
pub async fn select_ready_heroes<G: QuestGateway>(
    ctx: &RunnerContext<G>,
    quest: &QuestDefinition,
    busy: &HashSet<HeroId>,
) -> Result<Vec<HeroId>> {
    let mut seen = HashSet::new();
    let candidates = quest
        .heroes
        .iter()
        .copied()
        .filter(|hero| !busy.contains(hero) && seen.insert(*hero))
        .collect::<Vec<_>>();

    let stamina = try_join_all(
        candidates
            .iter()
            .map(|hero| ctx.gateway.current_stamina(*hero)),
    )
    .await?;

    let min_stamina = ctx.settings.min_stamina;
    let vial = ctx.settings.stamina_vial;
    let mut ready = Vec::with_capacity(candidates.len());
    for (hero, current) in candidates.into_iter().zip(stamina) {
        tracing::info!("[STAMINA] Hero #{hero} has {current} stamina");
        if current < min_stamina {
            tracing::info!("[STAMINA] Consuming stamina vial with hero #{hero}");
            ctx.executor
                .send_and_confirm(&format!("consumeItem(hero #{hero})"), || {
                    ctx.gateway.consume_item(vial, hero)
                })
                .await?;
        }
        ready.push(hero);
    }

    if ready.is_empty() {
        tracing::info!("[QUEST] {} quest is not ready to start.", quest.name);
    }
    Ok(ready)
}

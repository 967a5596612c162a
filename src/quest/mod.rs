pub mod leveling;
pub mod lifecycle;
pub mod rewards;
pub mod stamina;

use crate::context::RunnerContext;
use crate::gateway::{HeroId, QuestGateway};
use crate::utils::error::compact_error;

/// Display name for log lines. Metadata is cosmetic, so a failed lookup falls back to the id.
pub async fn hero_label<G: QuestGateway>(ctx: &RunnerContext<G>, hero: HeroId) -> String {
    match ctx.gateway.hero_name(hero).await {
        Ok(name) => format!("{name} (#{hero})"),
        Err(err) => {
            tracing::debug!("[META] {}", compact_error(&err));
            format!("hero #{hero}")
        }
    }
}

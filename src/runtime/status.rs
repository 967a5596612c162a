use crate::utils::config::Config;

pub fn emit_config_status(config: &Config) {
    let mut entries = config
        .summary()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>();
    entries.sort();
    tracing::info!("[STARTUP] Configuration resolved: {}", entries.join(" "));

    for quest in &config.settings.quests {
        tracing::info!(
            "[STARTUP] Quest `{}` at {:#x} level={} heroes={:?}",
            quest.name,
            quest.contract_address,
            quest.level,
            quest.heroes
        );
    }
}

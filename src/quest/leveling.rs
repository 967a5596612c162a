use crate::gateway::HeroStats;

/// `XP_LEVEL_TABLE[level]` is the XP a hero at `level` needs to level up.
pub const XP_LEVEL_TABLE: [u64; 22] = [
    0, 2_000, 3_000, 4_000, 5_000, 6_000, 8_000, 10_000, 12_000, 16_000, 20_000, 24_000, 28_000,
    32_000, 36_000, 40_000, 45_000, 50_000, 55_000, 60_000, 65_000, 70_000,
];

pub const DEFAULT_LEVEL_UP_MARGIN_XP: u64 = 250;

pub fn xp_threshold(level: u16) -> Option<u64> {
    XP_LEVEL_TABLE.get(usize::from(level)).copied()
}

/// True once `xp >= threshold(level) - margin`. Levels past the table never halt.
pub fn should_halt_for_level_up(stats: &HeroStats, margin_xp: u64) -> bool {
    xp_threshold(stats.level)
        .map(|threshold| stats.xp >= threshold.saturating_sub(margin_xp))
        .unwrap_or(false)
}

pub fn format_xp_progress(stats: &HeroStats) -> String {
    match xp_threshold(stats.level) {
        Some(threshold) => format!("{} / {}", stats.xp, threshold),
        None => format!("{} (level {} beyond XP table)", stats.xp, stats.level),
    }
}

//! Reporting-only summary of the events emitted by `completeQuest`.

use crate::config::quests::RewardTable;
use crate::gateway::contracts::IQuestCore::{QuestReward, QuestSkillUp, QuestXP};
use alloy::primitives::{Address, Log, U256};
use alloy::sol_types::SolEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSummary {
    pub xp_earned: u64,
    /// Skill gains in tenths of a point, as emitted on chain.
    pub skill_up_tenths: u64,
    pub rewards: Vec<(Address, U256)>,
}

impl CompletionSummary {
    pub fn from_logs(logs: &[Log]) -> Self {
        let mut summary = Self::default();
        for log in logs {
            let Some(topic0) = log.topics().first() else {
                continue;
            };
            if *topic0 == QuestXP::SIGNATURE_HASH {
                if let Ok(event) = QuestXP::decode_log_data(&log.data, true) {
                    summary.xp_earned = summary.xp_earned.saturating_add(event.xpEarned);
                }
            } else if *topic0 == QuestSkillUp::SIGNATURE_HASH {
                if let Ok(event) = QuestSkillUp::decode_log_data(&log.data, true) {
                    summary.skill_up_tenths += u64::from(event.skillUp);
                }
            } else if *topic0 == QuestReward::SIGNATURE_HASH {
                if let Ok(event) = QuestReward::decode_log_data(&log.data, true) {
                    summary.rewards.push((event.rewardItem, event.itemQuantity));
                }
            }
        }
        summary
    }

    pub fn log_report(&self, rewards: &RewardTable) {
        tracing::info!("[QUEST] XP: +{}", self.xp_earned);
        if self.skill_up_tenths > 0 {
            tracing::info!(
                "[QUEST] *** SkillUp! *** +{}.{}",
                self.skill_up_tenths / 10,
                self.skill_up_tenths % 10
            );
        }
        for (item, quantity) in &self.rewards {
            tracing::info!("[QUEST] {} x {}", quantity, rewards.describe(*item));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, B256};

    const QUEST_CORE: Address = address!("E9AbfBC143d7cef74b5b793ec5907fa62ca53154");

    fn log<E: SolEvent>(event: &E) -> Log {
        Log {
            address: QUEST_CORE,
            data: event.encode_log_data(),
        }
    }

    fn xp(amount: u64) -> Log {
        log(&QuestXP {
            questId: U256::from(9),
            player: Address::ZERO,
            heroId: U256::from(1),
            xpEarned: amount,
        })
    }

    #[test]
    fn sums_xp_across_events() {
        let summary = CompletionSummary::from_logs(&[xp(20), xp(22), xp(26)]);
        assert_eq!(summary.xp_earned, 68);
        assert_eq!(summary.skill_up_tenths, 0);
        assert!(summary.rewards.is_empty());
    }

    #[test]
    fn collects_skill_ups_and_rewards() {
        let gaia = address!("24eA0D436d3c2602fbfEfBe6a16bBc304C963D04");
        let logs = vec![
            xp(10),
            log(&QuestSkillUp {
                questId: U256::from(9),
                player: Address::ZERO,
                heroId: U256::from(1),
                profession: 2,
                skillUp: 3,
            }),
            log(&QuestReward {
                questId: U256::from(9),
                player: Address::ZERO,
                heroId: U256::from(1),
                rewardItem: gaia,
                itemQuantity: U256::from(2),
            }),
        ];
        let summary = CompletionSummary::from_logs(&logs);
        assert_eq!(summary.xp_earned, 10);
        assert_eq!(summary.skill_up_tenths, 3);
        assert_eq!(summary.rewards, vec![(gaia, U256::from(2))]);
    }

    #[test]
    fn unrelated_logs_are_ignored() {
        let foreign = Log::new_unchecked(QUEST_CORE, vec![B256::repeat_byte(7)], Default::default());
        let anonymous = Log::new_unchecked(QUEST_CORE, Vec::new(), Default::default());
        assert_eq!(
            CompletionSummary::from_logs(&[foreign, anonymous]),
            CompletionSummary::default()
        );
    }
}

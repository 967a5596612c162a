#![allow(dead_code)]

use alloy::primitives::{address, Address, Log, B256, U256};
use alloy::sol_types::SolEvent;
use async_trait::async_trait;
use quest_runner::config::quests::{QuestDefinition, RewardTable};
use quest_runner::context::RunnerContext;
use quest_runner::error::{ReadError, Result};
use quest_runner::gateway::contracts::IQuestCore::QuestXP;
use quest_runner::gateway::{ActiveQuest, HeroId, HeroStats, QuestGateway, TxReceipt};
use quest_runner::utils::config::RunnerSettings;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub const ACCOUNT: Address = address!("000000000000000000000000000000000000dEaD");
pub const VIAL: Address = address!("242078edFDca25ef2A497C8D9f256Fd641472E5F");
pub const FISHING: Address = address!("0000000000000000000000000000000000000f15");
pub const FORAGING: Address = address!("0000000000000000000000000000000000000f0a");
const QUEST_DURATION_SECS: u64 = 1_200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Start {
        heroes: Vec<HeroId>,
        quest: Address,
        attempts: u8,
        level: u8,
    },
    Complete(HeroId),
    Consume { item: Address, hero: HeroId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBehaviour {
    Confirm,
    Revert,
    Reject,
    Hang,
}

#[derive(Debug, Default)]
struct MockState {
    active: Vec<ActiveQuest>,
    stamina: HashMap<HeroId, u64>,
    stats: HashMap<HeroId, HeroStats>,
    names: HashMap<HeroId, String>,
    failing_stamina: HashSet<HeroId>,
    failing_stats: HashSet<HeroId>,
    writes: Vec<Write>,
    behaviour: HashMap<&'static str, WriteBehaviour>,
    xp_per_completion: u64,
    next_quest_id: u64,
    now_secs: u64,
    active_reads: usize,
}

/// In-memory chain: starts and completions mutate the active quest list like the contract would.
#[derive(Debug, Default)]
pub struct MockGateway {
    state: Mutex<MockState>,
}

impl MockGateway {
    pub fn new(now_secs: u64) -> Self {
        let gateway = Self::default();
        {
            let mut state = gateway.state.lock().expect("mock lock");
            state.now_secs = now_secs;
            state.xp_per_completion = 24;
            state.next_quest_id = 1;
        }
        gateway
    }

    fn with<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self.state.lock().expect("mock lock");
        f(&mut state)
    }

    pub fn with_hero(self, hero: HeroId, stamina: u64, level: u16, xp: u64) -> Self {
        self.with(|s| {
            s.stamina.insert(hero, stamina);
            s.stats.insert(
                hero,
                HeroStats {
                    level,
                    xp,
                    stamina: stamina as u16,
                },
            );
            s.names.insert(hero, format!("Hero{hero}"));
        });
        self
    }

    pub fn with_active(self, heroes: &[HeroId], quest: Address, complete_at_time: u64) -> Self {
        self.with(|s| {
            let id = s.next_quest_id;
            s.next_quest_id += 1;
            s.active.push(ActiveQuest {
                id,
                quest,
                heroes: heroes.to_vec(),
                complete_at_time,
                attempts: 5,
            });
        });
        self
    }

    pub fn failing_stamina(self, hero: HeroId) -> Self {
        self.with(|s| {
            s.failing_stamina.insert(hero);
        });
        self
    }

    pub fn failing_stats(self, hero: HeroId) -> Self {
        self.with(|s| {
            s.failing_stats.insert(hero);
        });
        self
    }

    pub fn behaviour(self, write: &'static str, behaviour: WriteBehaviour) -> Self {
        self.with(|s| {
            s.behaviour.insert(write, behaviour);
        });
        self
    }

    pub fn clear_failing_stamina(&self) {
        self.with(|s| s.failing_stamina.clear());
    }

    pub fn writes(&self) -> Vec<Write> {
        self.with(|s| s.writes.clone())
    }

    pub fn active(&self) -> Vec<ActiveQuest> {
        self.with(|s| s.active.clone())
    }

    pub fn active_reads(&self) -> usize {
        self.with(|s| s.active_reads)
    }

    pub fn stats(&self, hero: HeroId) -> Option<HeroStats> {
        self.with(|s| s.stats.get(&hero).copied())
    }

    pub fn start_count(&self) -> usize {
        self.writes()
            .iter()
            .filter(|w| matches!(w, Write::Start { .. }))
            .count()
    }

    async fn settle(&self, kind: &'static str, write: Write) -> anyhow::Result<TxReceipt> {
        let behaviour = self.with(|s| {
            s.writes.push(write.clone());
            s.behaviour.get(kind).copied().unwrap_or(WriteBehaviour::Confirm)
        });
        match behaviour {
            WriteBehaviour::Reject => anyhow::bail!("replacement transaction underpriced"),
            WriteBehaviour::Hang => {
                tokio::time::sleep(Duration::from_secs(3_600)).await;
                anyhow::bail!("dropped from mempool")
            }
            WriteBehaviour::Revert => Ok(TxReceipt {
                tx_hash: B256::repeat_byte(0xee),
                success: false,
                logs: Vec::new(),
            }),
            WriteBehaviour::Confirm => Ok(self.apply(write)),
        }
    }

    fn apply(&self, write: Write) -> TxReceipt {
        self.with(|s| {
            let mut logs = Vec::new();
            match write {
                Write::Start {
                    heroes,
                    quest,
                    attempts,
                    ..
                } => {
                    let id = s.next_quest_id;
                    s.next_quest_id += 1;
                    s.active.push(ActiveQuest {
                        id,
                        quest,
                        heroes,
                        complete_at_time: s.now_secs + QUEST_DURATION_SECS,
                        attempts,
                    });
                }
                Write::Complete(leader) => {
                    if let Some(pos) = s.active.iter().position(|q| q.leader() == Some(leader)) {
                        let quest = s.active.remove(pos);
                        for hero in &quest.heroes {
                            let xp = s.xp_per_completion;
                            if let Some(stats) = s.stats.get_mut(hero) {
                                stats.xp += xp;
                            }
                            logs.push(xp_log(quest.id, *hero, xp));
                        }
                    }
                }
                Write::Consume { hero, .. } => {
                    s.stamina.insert(hero, 25);
                }
            }
            TxReceipt {
                tx_hash: B256::repeat_byte(0x01),
                success: true,
                logs,
            }
        })
    }
}

fn xp_log(quest_id: u64, hero: HeroId, xp: u64) -> Log {
    Log {
        address: Address::repeat_byte(0x0e),
        data: QuestXP {
            questId: U256::from(quest_id),
            player: ACCOUNT,
            heroId: U256::from(hero),
            xpEarned: xp,
        }
        .encode_log_data(),
    }
}

#[async_trait]
impl QuestGateway for MockGateway {
    async fn active_quests(&self, account: Address) -> Result<Vec<ActiveQuest>> {
        assert_eq!(account, ACCOUNT);
        Ok(self.with(|s| {
            s.active_reads += 1;
            s.active.clone()
        }))
    }

    async fn current_stamina(&self, hero: HeroId) -> Result<u64> {
        self.with(|s| {
            if s.failing_stamina.contains(&hero) {
                return Err(ReadError::Rpc {
                    call: "getCurrentStamina",
                    reason: "header not found".to_string(),
                }
                .into());
            }
            Ok(s.stamina.get(&hero).copied().unwrap_or(0))
        })
    }

    async fn hero_stats(&self, hero: HeroId) -> Result<HeroStats> {
        self.with(|s| {
            if s.failing_stats.contains(&hero) {
                return Err(ReadError::Rpc {
                    call: "getHero",
                    reason: "timeout".to_string(),
                }
                .into());
            }
            s.stats.get(&hero).copied().ok_or_else(|| {
                ReadError::Decode {
                    call: "getHero",
                    reason: format!("unknown hero {hero}"),
                }
                .into()
            })
        })
    }

    async fn hero_name(&self, hero: HeroId) -> Result<String> {
        self.with(|s| {
            s.names.get(&hero).cloned().ok_or_else(|| {
                ReadError::Metadata {
                    hero,
                    reason: "404 Not Found".to_string(),
                }
                .into()
            })
        })
    }

    async fn start_quest(
        &self,
        heroes: &[HeroId],
        quest: Address,
        attempts: u8,
        level: u8,
    ) -> anyhow::Result<TxReceipt> {
        self.settle(
            "start",
            Write::Start {
                heroes: heroes.to_vec(),
                quest,
                attempts,
                level,
            },
        )
        .await
    }

    async fn complete_quest(&self, hero: HeroId) -> anyhow::Result<TxReceipt> {
        self.settle("complete", Write::Complete(hero)).await
    }

    async fn consume_item(&self, item: Address, hero: HeroId) -> anyhow::Result<TxReceipt> {
        self.settle("consume", Write::Consume { item, hero }).await
    }
}

pub fn quest_def(name: &str, contract: Address, heroes: &[HeroId]) -> QuestDefinition {
    QuestDefinition {
        name: name.to_string(),
        contract_address: contract,
        level: 0,
        heroes: heroes.to_vec(),
        attempts: None,
    }
}

pub fn settings(quests: Vec<QuestDefinition>, max_group_size: usize) -> RunnerSettings {
    let tracked_hero = quests
        .iter()
        .find_map(|q| q.heroes.first().copied())
        .unwrap_or(1);
    RunnerSettings {
        account: ACCOUNT,
        quests,
        polling_interval: Duration::from_secs(2),
        max_group_size,
        min_stamina: 15,
        quest_attempts: 5,
        stamina_vial: VIAL,
        tracked_hero,
        level_up_margin_xp: 250,
        tx_timeout: Duration::from_secs(60),
        rewards: RewardTable::default(),
    }
}

pub fn context(gateway: MockGateway, settings: RunnerSettings) -> RunnerContext<MockGateway> {
    RunnerContext::new(gateway, settings)
}

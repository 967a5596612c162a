use super::contracts::{IHeroCore, IItemConsumer, IQuestCore};
use super::metadata::HeroMetadataClient;
use super::{ActiveQuest, HeroId, HeroStats, QuestGateway, TxReceipt};
use crate::error::{ReadError, Result};
use crate::utils::error::compact_error;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::Provider;
use alloy::rpc::types::eth::TransactionRequest;
use alloy::sol_types::SolCall;
use alloy::transports::http::Http;
use async_trait::async_trait;
use reqwest::Client;

#[derive(Debug, Clone, Copy)]
pub struct ContractAddresses {
    pub quest: Address,
    pub item: Address,
    pub hero: Address,
}

/// Fixed gas parameters applied to every write; no fee estimation.
#[derive(Debug, Clone, Copy)]
pub struct GasSettings {
    pub price_wei: u128,
    pub limit: u64,
}

/// alloy-backed gateway. `P` is expected to carry a wallet filler for the configured account.
pub struct ChainGateway<P> {
    provider: P,
    account: Address,
    contracts: ContractAddresses,
    gas: GasSettings,
    metadata: HeroMetadataClient,
}

fn hero_u256(hero: HeroId) -> U256 {
    U256::from(hero)
}

fn u256_to_u64(call: &'static str, value: U256) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        ReadError::Decode {
            call,
            reason: format!("value {value} does not fit in u64"),
        }
        .into()
    })
}

impl<P> ChainGateway<P>
where
    P: Provider<Http<Client>> + Send + Sync,
{
    pub fn new(
        provider: P,
        account: Address,
        contracts: ContractAddresses,
        gas: GasSettings,
        metadata: HeroMetadataClient,
    ) -> Self {
        Self {
            provider,
            account,
            contracts,
            gas,
            metadata,
        }
    }

    pub async fn chain_id(&self) -> anyhow::Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn view_call<C: SolCall>(
        &self,
        name: &'static str,
        to: Address,
        call: C,
    ) -> Result<C::Return> {
        let request = TransactionRequest::default()
            .with_to(to)
            .with_input(Bytes::from(call.abi_encode()));
        let raw = self
            .provider
            .call(&request)
            .await
            .map_err(|err| ReadError::Rpc {
                call: name,
                reason: compact_error(&err),
            })?;
        C::abi_decode_returns(raw.as_ref(), true).map_err(|err| {
            ReadError::Decode {
                call: name,
                reason: err.to_string(),
            }
            .into()
        })
    }

    async fn send_write(&self, to: Address, input: Vec<u8>) -> anyhow::Result<TxReceipt> {
        let request = TransactionRequest::default()
            .with_from(self.account)
            .with_to(to)
            .with_input(Bytes::from(input))
            .with_gas_price(self.gas.price_wei)
            .with_gas_limit(self.gas.limit);
        let pending = self.provider.send_transaction(request).await?;
        tracing::debug!("[TX] Broadcast {:#x}", pending.tx_hash());
        let receipt = pending.get_receipt().await?;
        Ok(TxReceipt {
            tx_hash: receipt.transaction_hash,
            success: receipt.status(),
            logs: receipt
                .inner
                .logs()
                .iter()
                .map(|log| log.inner.clone())
                .collect(),
        })
    }
}

#[async_trait]
impl<P> QuestGateway for ChainGateway<P>
where
    P: Provider<Http<Client>> + Send + Sync,
{
    async fn active_quests(&self, account: Address) -> Result<Vec<ActiveQuest>> {
        let ret = self
            .view_call(
                "getAccountActiveQuests",
                self.contracts.quest,
                IQuestCore::getAccountActiveQuestsCall { account },
            )
            .await?;
        ret.quests
            .into_iter()
            .map(|quest| {
                let heroes = quest
                    .heroes
                    .into_iter()
                    .map(|hero| u256_to_u64("getAccountActiveQuests", hero))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ActiveQuest {
                    id: u256_to_u64("getAccountActiveQuests", quest.id)?,
                    quest: quest.quest,
                    heroes,
                    complete_at_time: u256_to_u64("getAccountActiveQuests", quest.completeAtTime)?,
                    attempts: quest.attempts,
                })
            })
            .collect()
    }

    async fn current_stamina(&self, hero: HeroId) -> Result<u64> {
        let ret = self
            .view_call(
                "getCurrentStamina",
                self.contracts.quest,
                IQuestCore::getCurrentStaminaCall {
                    heroId: hero_u256(hero),
                },
            )
            .await?;
        u256_to_u64("getCurrentStamina", ret.stamina)
    }

    async fn hero_stats(&self, hero: HeroId) -> Result<HeroStats> {
        let ret = self
            .view_call(
                "getHero",
                self.contracts.hero,
                IHeroCore::getHeroCall { id: hero_u256(hero) },
            )
            .await?;
        Ok(HeroStats {
            level: ret.hero.state.level,
            xp: ret.hero.state.xp,
            stamina: ret.hero.stats.stamina,
        })
    }

    async fn hero_name(&self, hero: HeroId) -> Result<String> {
        self.metadata.display_name(hero).await
    }

    async fn start_quest(
        &self,
        heroes: &[HeroId],
        quest: Address,
        attempts: u8,
        level: u8,
    ) -> anyhow::Result<TxReceipt> {
        let call = IQuestCore::startQuestCall {
            heroIds: heroes.iter().copied().map(hero_u256).collect(),
            questAddress: quest,
            attempts,
            level,
        };
        self.send_write(self.contracts.quest, call.abi_encode()).await
    }

    async fn complete_quest(&self, hero: HeroId) -> anyhow::Result<TxReceipt> {
        let call = IQuestCore::completeQuestCall {
            heroId: hero_u256(hero),
        };
        self.send_write(self.contracts.quest, call.abi_encode()).await
    }

    async fn consume_item(&self, item: Address, hero: HeroId) -> anyhow::Result<TxReceipt> {
        let call = IItemConsumer::consumeItemCall {
            item,
            heroId: hero_u256(hero),
        };
        self.send_write(self.contracts.item, call.abi_encode()).await
    }
}

use crate::config::quests::{load_quest_definitions, QuestDefinition, RewardTable};
use crate::error::{ConfigError, Result};
use crate::gateway::chain::{ContractAddresses, GasSettings};
use crate::gateway::HeroId;
use crate::quest::leveling::DEFAULT_LEVEL_UP_MARGIN_XP;
use crate::utils::hex::is_private_key_hex;
use alloy::primitives::{address, Address};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_TX_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_MAX_QUEST_GROUP_SIZE: usize = 6;
pub const DEFAULT_MIN_STAMINA: u64 = 15;
pub const DEFAULT_QUEST_ATTEMPTS: u8 = 5;
pub const DEFAULT_GAS_LIMIT: u64 = 3_000_000;
pub const DEFAULT_HERO_METADATA_URL: &str = "https://heroes.defikingdoms.com/token";
pub const DEFAULT_STAMINA_VIAL: Address = address!("242078edFDca25ef2A497C8D9f256Fd641472E5F");

pub enum WalletSource {
    PrivateKey(String),
    Keystore { path: PathBuf, password: String },
}

impl fmt::Debug for WalletSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateKey(_) => f.write_str("PrivateKey(<redacted>)"),
            Self::Keystore { path, .. } => f
                .debug_struct("Keystore")
                .field("path", path)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Everything the tick logic reads; independent of how the chain is reached.
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub account: Address,
    pub quests: Vec<QuestDefinition>,
    pub polling_interval: Duration,
    pub max_group_size: usize,
    pub min_stamina: u64,
    pub quest_attempts: u8,
    pub stamina_vial: Address,
    pub tracked_hero: HeroId,
    pub level_up_margin_xp: u64,
    pub tx_timeout: Duration,
    pub rewards: RewardTable,
}

#[derive(Debug)]
pub struct Config {
    pub rpc_url: String,
    pub using_backup_rpc: bool,
    pub chain_id: Option<u64>,
    pub wallet: WalletSource,
    pub contracts: ContractAddresses,
    pub gas: GasSettings,
    pub hero_metadata_url: String,
    pub settings: RunnerSettings,
}

fn validate_http_url(name: &str, raw: &str) -> Result<()> {
    let parsed = raw.parse::<reqwest::Url>().map_err(|e| {
        ConfigError::Invalid(format!("{name} must be a valid URL, got `{raw}`: {e}"))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid(format!(
            "{name} must use http(s) scheme, got `{other}`"
        ))
        .into()),
    }
}

/// Accepts `1/0`, `true/false`, `yes/no` and `on/off`, case-insensitively.
pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Key lookup with blank values treated as unset.
struct EnvSource<F> {
    lookup: F,
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.get(key)
            .ok_or_else(|| ConfigError::Missing(format!("{key} must be set")).into())
    }

    fn address(&self, key: &str) -> Result<Address> {
        let raw = self.required(key)?;
        Address::from_str(&raw).map_err(|e| {
            ConfigError::Invalid(format!("{key} must be a 0x-prefixed address, got `{raw}`: {e}"))
                .into()
        })
    }

    fn optional_address(&self, key: &str) -> Result<Option<Address>> {
        match self.get(key) {
            Some(_) => self.address(key).map(Some),
            None => Ok(None),
        }
    }

    fn number<T>(&self, key: &str, default: T, valid: impl Fn(&T) -> bool) -> Result<T>
    where
        T: FromStr + fmt::Display,
    {
        let Some(raw) = self.get(key) else {
            return Ok(default);
        };
        let value = raw.parse::<T>().map_err(|_| {
            ConfigError::Invalid(format!("{key} must be a number, got `{raw}`"))
        })?;
        if !valid(&value) {
            return Err(ConfigError::Invalid(format!("{key} is out of range: {value}")).into());
        }
        Ok(value)
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(raw) => parse_bool_flag(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!("{key} must be a boolean, got `{raw}`")).into()
            }),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key source (the process environment in production).
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvSource { lookup };

        let primary_rpc = env.required("RPC_URL")?;
        validate_http_url("RPC_URL", &primary_rpc)?;
        let backup_rpc = env.get("BACKUP_RPC_URL");
        if let Some(url) = backup_rpc.as_deref() {
            validate_http_url("BACKUP_RPC_URL", url)?;
        }
        let using_backup_rpc = env.flag("USE_BACKUP_RPC")?;
        let rpc_url = if using_backup_rpc {
            backup_rpc.ok_or_else(|| {
                ConfigError::Missing("USE_BACKUP_RPC=true requires BACKUP_RPC_URL".to_string())
            })?
        } else {
            primary_rpc
        };

        let chain_id = match env.get("CHAIN_ID") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                ConfigError::Invalid(format!("CHAIN_ID must be a valid u64, got `{raw}`"))
            })?),
            None => None,
        };

        let wallet = match (env.get("ETH_PRIVATE_KEY"), env.get("WALLET_KEYSTORE_PATH")) {
            (Some(pk), _) => {
                if !is_private_key_hex(&pk) {
                    return Err(ConfigError::Invalid(
                        "ETH_PRIVATE_KEY must be 32 bytes of hex (optionally 0x-prefixed)"
                            .to_string(),
                    )
                    .into());
                }
                WalletSource::PrivateKey(pk)
            }
            (None, Some(path)) => WalletSource::Keystore {
                path: PathBuf::from(path),
                password: env.required("WALLET_PASSWORD")?,
            },
            (None, None) => {
                return Err(ConfigError::Missing(
                    "ETH_PRIVATE_KEY or WALLET_KEYSTORE_PATH must be set".to_string(),
                )
                .into())
            }
        };
        let account = env.address("WALLET_ADDRESS")?;

        let contracts = ContractAddresses {
            quest: env.address("QUEST_CONTRACT")?,
            item: env.address("ITEM_CONTRACT")?,
            hero: env.address("HERO_CONTRACT")?,
        };
        let stamina_vial = env
            .optional_address("STAMINA_VIAL_ADDRESS")?
            .unwrap_or(DEFAULT_STAMINA_VIAL);

        let gas_price_raw = env.required("GAS_PRICE_WEI")?;
        let gas = GasSettings {
            price_wei: gas_price_raw.parse::<u128>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "GAS_PRICE_WEI must be an integer wei amount, got `{gas_price_raw}`"
                ))
            })?,
            limit: env.number("GAS_LIMIT", DEFAULT_GAS_LIMIT, |v| *v >= 21_000)?,
        };

        let hero_metadata_url = env
            .get("HERO_METADATA_URL")
            .unwrap_or_else(|| DEFAULT_HERO_METADATA_URL.to_string());
        validate_http_url("HERO_METADATA_URL", &hero_metadata_url)?;

        let quests_file = PathBuf::from(env.required("QUESTS_FILE")?);
        let quests = load_quest_definitions(&quests_file)?;
        let rewards = match env.get("REWARDS_FILE") {
            Some(path) => RewardTable::load(&PathBuf::from(path))?,
            None => RewardTable::default(),
        };

        let default_tracked = quests
            .iter()
            .find_map(|q| q.heroes.first().copied())
            .ok_or_else(|| {
                ConfigError::Invalid("no quest definition lists any hero".to_string())
            })?;
        let tracked_hero = env.number("TRACKED_HERO_ID", default_tracked, |_| true)?;

        let settings = RunnerSettings {
            account,
            quests,
            polling_interval: Duration::from_millis(env.number(
                "POLLING_INTERVAL_MS",
                DEFAULT_POLLING_INTERVAL_MS,
                |v| *v >= 1_000,
            )?),
            max_group_size: env.number("MAX_QUEST_GROUP_SIZE", DEFAULT_MAX_QUEST_GROUP_SIZE, |v| {
                *v > 0
            })?,
            min_stamina: env.number("MIN_STAMINA", DEFAULT_MIN_STAMINA, |_| true)?,
            quest_attempts: env.number("QUEST_ATTEMPTS", DEFAULT_QUEST_ATTEMPTS, |v| *v > 0)?,
            stamina_vial,
            tracked_hero,
            level_up_margin_xp: env.number(
                "LEVEL_UP_MARGIN_XP",
                DEFAULT_LEVEL_UP_MARGIN_XP,
                |_| true,
            )?,
            tx_timeout: Duration::from_millis(env.number(
                "TX_TIMEOUT_MS",
                DEFAULT_TX_TIMEOUT_MS,
                |v| *v >= 1_000,
            )?),
            rewards,
        };

        Ok(Self {
            rpc_url,
            using_backup_rpc,
            chain_id,
            wallet,
            contracts,
            gas,
            hero_metadata_url,
            settings,
        })
    }

    /// Non-secret key/value view of the resolved configuration for startup logging.
    pub fn summary(&self) -> HashMap<&'static str, String> {
        let s = &self.settings;
        HashMap::from([
            ("rpc", if self.using_backup_rpc { "backup" } else { "primary" }.to_string()),
            ("account", format!("{:#x}", s.account)),
            ("quest_contract", format!("{:#x}", self.contracts.quest)),
            ("item_contract", format!("{:#x}", self.contracts.item)),
            ("hero_contract", format!("{:#x}", self.contracts.hero)),
            ("gas_price_wei", self.gas.price_wei.to_string()),
            ("gas_limit", self.gas.limit.to_string()),
            ("quests", s.quests.len().to_string()),
            ("polling_interval_ms", s.polling_interval.as_millis().to_string()),
            ("max_group_size", s.max_group_size.to_string()),
            ("min_stamina", s.min_stamina.to_string()),
            ("quest_attempts", s.quest_attempts.to_string()),
            ("tracked_hero", s.tracked_hero.to_string()),
            ("level_up_margin_xp", s.level_up_margin_xp.to_string()),
            ("tx_timeout_ms", s.tx_timeout.as_millis().to_string()),
            ("reward_names", s.rewards.len().to_string()),
        ])
    }
}

use alloy::network::EthereumWallet;
use alloy::providers::ProviderBuilder;
use quest_runner::context::RunnerContext;
use quest_runner::gateway::chain::ChainGateway;
use quest_runner::gateway::HeroMetadataClient;
use quest_runner::runtime::wallet::ensure_signer_matches;
use quest_runner::runtime::{emit_config_status, load_signer, parse_runtime_args};
use quest_runner::scheduler::QuestScheduler;
use quest_runner::utils::config::Config;
use quest_runner::utils::error::compact_error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let runtime_args = parse_runtime_args()?;
    quest_runner::utils::env_guard::harden_env_setup();

    // Default to `info` when `RUST_LOG` is unset or invalid to avoid silent startup.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    emit_config_status(&config);
    if runtime_args.explain_config {
        tracing::info!("[STARTUP] EXPLAIN_CONFIG=true requested; exiting after config report.");
        return Ok(());
    }

    let signer = load_signer(&config.wallet)?;
    ensure_signer_matches(&signer, config.settings.account)?;
    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(EthereumWallet::from(signer))
        .on_http(config.rpc_url.parse()?);

    let gateway = ChainGateway::new(
        provider,
        config.settings.account,
        config.contracts,
        config.gas,
        HeroMetadataClient::new(config.hero_metadata_url.clone()),
    );

    match gateway.chain_id().await {
        Ok(chain_id) => {
            tracing::info!(
                "[STARTUP] Connected to {} RPC, chain id {}",
                if config.using_backup_rpc { "backup" } else { "primary" },
                chain_id
            );
            if let Some(expected) = config.chain_id {
                if expected != chain_id {
                    anyhow::bail!("CHAIN_ID is {expected} but the RPC endpoint serves chain {chain_id}");
                }
            }
        }
        Err(err) => tracing::warn!(
            "[STARTUP] Connectivity probe failed: {}; the first tick will retry.",
            compact_error(&err)
        ),
    }

    let scheduler = QuestScheduler::new(RunnerContext::new(gateway, config.settings));
    match scheduler.run().await {
        Ok(()) => {
            tracing::info!("[STARTUP] Automation paused for level up. Restart after levelling.");
            Ok(())
        }
        Err(err) => {
            tracing::error!("[TX] {err} - should restart now.");
            std::process::exit(1);
        }
    }
}

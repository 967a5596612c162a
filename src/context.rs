use crate::executor::TxExecutor;
use crate::gateway::QuestGateway;
use crate::utils::config::RunnerSettings;

/// Handles shared by every component for the lifetime of the process.
pub struct RunnerContext<G> {
    pub gateway: G,
    pub executor: TxExecutor,
    pub settings: RunnerSettings,
}

impl<G: QuestGateway> RunnerContext<G> {
    pub fn new(gateway: G, settings: RunnerSettings) -> Self {
        Self {
            gateway,
            executor: TxExecutor::new(settings.tx_timeout),
            settings,
        }
    }
}

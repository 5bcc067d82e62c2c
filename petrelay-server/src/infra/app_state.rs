use std::{fmt, sync::Arc};

use petrelay_core::FindingsStore;

use crate::infra::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub findings: Arc<FindingsStore>,
    pub config: Arc<ServerConfig>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("findings", &self.findings.len())
            .field("config", &self.config)
            .finish()
    }
}

impl AppState {
    pub fn new(findings: Arc<FindingsStore>, config: Arc<ServerConfig>) -> Self {
        Self { findings, config }
    }

    pub fn findings(&self) -> &FindingsStore {
        &self.findings
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

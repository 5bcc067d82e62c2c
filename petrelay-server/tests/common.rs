use std::sync::Arc;

use axum_test::TestServer;
use petrelay_core::{FindingsStore, ManualClock};
use petrelay_server::{AppState, create_app, infra::config::ServerConfig};

// Code is used by test modules, but not in this scope
#[allow(unused, missing_debug_implementations)]
pub struct TestApp {
    pub server: TestServer,
    pub clock: Arc<ManualClock>,
    pub state: AppState,
}

#[allow(unused)]
pub fn build_test_app() -> TestApp {
    build_test_app_with_config(ServerConfig::default())
}

#[allow(unused)]
pub fn build_test_app_with_config(config: ServerConfig) -> TestApp {
    let clock = Arc::new(ManualClock::starting_now());
    let findings = Arc::new(FindingsStore::with_clock(clock.clone()));
    let state = AppState::new(findings, Arc::new(config));
    let server =
        TestServer::new(create_app(state.clone())).expect("build test server");

    TestApp {
        server,
        clock,
        state,
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::{Arc, Mutex};

use shorty::api::routes::routes;
use shorty::domain::{ProviderRegistry, Shortener, ShortenerError, ShorteningProviderName};
use shorty::state::AppState;

/// Shared record of `(provider, long_url)` calls, in call order.
pub type CallLog = Arc<Mutex<Vec<(ShorteningProviderName, String)>>>;

/// Shortener returning a fixed outcome and recording every call.
pub struct StubShortener {
    name: ShorteningProviderName,
    outcome: Result<String, ShortenerError>,
    calls: CallLog,
}

#[async_trait]
impl Shortener for StubShortener {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenerError> {
        self.calls
            .lock()
            .unwrap()
            .push((self.name, long_url.to_string()));
        self.outcome.clone()
    }
}

pub fn ok(link: &str) -> Result<String, ShortenerError> {
    Ok(link.to_string())
}

/// Builds a state whose registry holds one stub per entry, in the given order.
pub fn create_test_state(
    entries: Vec<(ShorteningProviderName, Result<String, ShortenerError>)>,
    debug: bool,
) -> (AppState, CallLog) {
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));

    let providers = entries.into_iter().map(|(name, outcome)| {
        let stub: Arc<dyn Shortener> = Arc::new(StubShortener {
            name,
            outcome,
            calls: calls.clone(),
        });
        (name, stub)
    });
    let registry = ProviderRegistry::new(providers).unwrap();

    (AppState::new(Arc::new(registry), debug), calls)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(routes().with_state(state)).unwrap()
}

pub fn recorded(calls: &CallLog) -> Vec<ShorteningProviderName> {
    calls.lock().unwrap().iter().map(|(name, _)| *name).collect()
}

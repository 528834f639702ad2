#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::connect_info::MockConnectInfo;
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

use link_resolver::domain::click_event::ClickEvent;
use link_resolver::domain::entities::{Mapping, MappingProperties, RedirectMode};
use link_resolver::domain::repositories::MappingRepository;
use link_resolver::domain::services::ReachabilityValidator;
use link_resolver::infrastructure::persistence::{
    InMemoryClickRepository, InMemoryMappingRepository,
};
use link_resolver::infrastructure::task_pool::{TaskPool, TaskPoolConfig};
use link_resolver::routes::router;
use link_resolver::state::{AppState, StateOptions};
use link_resolver::utils::url_check::parse_http_url;

pub const BASE_URL: &str = "http://short.test";
pub const NOTIFY_DELAY: Duration = Duration::from_millis(300);

/// Reachability double: real syntax check, canned probe answer.
#[derive(Default)]
pub struct StubReachability {
    unreachable: AtomicBool,
    probes: AtomicUsize,
}

impl StubReachability {
    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, Ordering::SeqCst);
    }

    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReachabilityValidator for StubReachability {
    fn is_syntactically_valid(&self, url: &str) -> bool {
        parse_http_url(url).is_ok()
    }

    async fn is_reachable(&self, _url: &str) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        !self.unreachable.load(Ordering::SeqCst)
    }
}

/// Everything a handler test needs to look behind the HTTP surface.
pub struct TestContext {
    pub state: AppState,
    pub mappings: Arc<InMemoryMappingRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
    pub reachability: Arc<StubReachability>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

pub fn create_test_context() -> TestContext {
    create_test_context_with(StateOptions::default())
}

pub fn create_test_context_with(options: StateOptions) -> TestContext {
    let mappings = Arc::new(InMemoryMappingRepository::new());
    let clicks = Arc::new(InMemoryClickRepository::new());
    let reachability = Arc::new(StubReachability::default());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        mappings.clone(),
        clicks.clone(),
        reachability.clone(),
        tx,
        TaskPool::new(TaskPoolConfig::default()),
        StateOptions {
            base_url: BASE_URL.to_string(),
            notify_delay: NOTIFY_DELAY,
            ..options
        },
    );

    TestContext {
        state,
        mappings,
        clicks,
        reachability,
        click_rx: rx,
    }
}

fn peer() -> SocketAddr {
    "127.0.0.1:12345".parse().unwrap()
}

/// In-process server; enough for plain HTTP.
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state).layer(MockConnectInfo(peer()))).unwrap()
}

/// Server on a real socket; needed for WebSocket upgrades.
pub fn ws_test_server(state: AppState) -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(router(state).layer(MockConnectInfo(peer())))
        .unwrap()
}

pub async fn insert_mapping(
    mappings: &InMemoryMappingRepository,
    key: &str,
    target: &str,
    interstitial: bool,
    permanent: bool,
) {
    let properties = MappingProperties {
        redirect_mode: if permanent {
            RedirectMode::Permanent
        } else {
            RedirectMode::Temporary
        },
        interstitial,
        qr: key.starts_with("qr"),
        ..Default::default()
    };

    mappings
        .save(Mapping::new(key.to_string(), target.to_string(), properties))
        .await
        .unwrap();
}

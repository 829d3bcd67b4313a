#![allow(dead_code)]

use gorbit::configuration::Settings;
use gorbit::stores::{BackingStores, Pingable, StoreError};
use std::net::TcpListener;
use std::sync::Arc;

pub const API_KEY: &str = "test-api-key";
pub const JWT_SECRET: &str = "test-jwt-secret";

/// Scripted stand-in for a backing store.
#[derive(Clone, Copy)]
pub enum StubStore {
    Up,
    Down(&'static str),
    Hanging,
}

#[async_trait::async_trait]
impl Pingable for StubStore {
    async fn ping(&self) -> Result<(), StoreError> {
        match self {
            StubStore::Up => Ok(()),
            StubStore::Down(reason) => Err(StoreError::Other(reason.to_string())),
            StubStore::Hanging => {
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                Ok(())
            }
        }
    }
}

pub struct TestApp {
    pub address: String,
    pub settings: Settings,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.server.host = "127.0.0.1".to_string();
    settings.server.port = 0;
    settings.app.version = "9.9.9".to_string();
    settings.app.api_key = API_KEY.to_string();
    settings.app.jwt_secret = JWT_SECRET.to_string();
    settings
}

/// Stores in `mysql, postgres, mongodb, redis` order.
pub async fn spawn_app_with_stores(stores: [StubStore; 4]) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let [mysql, postgres, mongodb, redis] = stores;
    let stores = BackingStores::new(
        Arc::new(mysql),
        Arc::new(postgres),
        Arc::new(mongodb),
        Arc::new(redis),
    );

    let settings = test_settings();
    let server = gorbit::startup::run(listener, stores, settings.clone())
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    TestApp { address, settings }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_stores([StubStore::Up; 4]).await
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use shellydoor_bridge::app::create_app;
use shellydoor_bridge::services::HostService;
use shellydoor_core::mock::MockActuator;
use shellydoor_core::{AccessoryConfig, GarageDoorOpener};

pub const OPEN_URL: &str = "http://relay.local/relay/0?turn=on";
pub const CLOSE_URL: &str = "http://relay.local/relay/0?turn=off";
pub const STATUS_URL: &str = "http://relay.local/status";

pub struct MockApp {
    pub router: Router,
    pub accessory: Arc<GarageDoorOpener>,
    pub actuator: Arc<MockActuator>,
    pub host: Arc<HostService>,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_config(Self::config()).await
    }

    /// Slow door with a status endpoint and polling left to the tests.
    pub fn config() -> AccessoryConfig {
        let mut config = AccessoryConfig::new("Test Garage", OPEN_URL, CLOSE_URL);
        config.status_url = Some(STATUS_URL.to_string());
        config.open_time = 30.0;
        config.close_time = 30.0;
        config
    }

    pub async fn with_config(config: AccessoryConfig) -> Self {
        let actuator = Arc::new(MockActuator::new());
        let host = Arc::new(HostService::new());
        let accessory = Arc::new(
            GarageDoorOpener::with_actuator(config, actuator.clone(), host.clone()).unwrap(),
        );
        accessory.start().await;

        let router = create_app(accessory.clone(), host.clone());

        Self {
            router,
            accessory,
            actuator,
            host,
        }
    }

    /// Sends a request and returns the status with the JSON body, `Null` when empty.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(method);
        let body = match body {
            Some(value) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_string(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

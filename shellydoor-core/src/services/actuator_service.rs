use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::configs::AccessoryConfig;
use crate::errors::{ConfigError, TransportError};

/// What came back from the relay. Any status code counts as a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorResponse {
    pub status: u16,
    pub body: String,
}

impl ActuatorResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Actuator: Send + Sync {
    async fn send(&self, url: &str, body: &str, method: &Method) -> Result<ActuatorResponse, TransportError>;
}

/// Calls relay endpoints over HTTP(S).
///
/// Certificate verification is switched off: relay boards usually serve
/// self-signed certificates. This trusts whatever answers on the configured
/// address.
pub struct HttpActuator {
    client: Client,
    credentials: Option<(String, String)>,
}

impl HttpActuator {
    pub fn new(config: &AccessoryConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let credentials = config
            .credentials()
            .map(|(username, password)| (username.to_string(), password.to_string()));

        Ok(Self { client, credentials })
    }
}

#[async_trait]
impl Actuator for HttpActuator {
    async fn send(&self, url: &str, body: &str, method: &Method) -> Result<ActuatorResponse, TransportError> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .body(body.to_string());

        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        let response = ActuatorResponse { status, body };
        if !response.is_success() {
            tracing::debug!("{} {} answered with status {}", method, url, status);
        }

        Ok(response)
    }
}

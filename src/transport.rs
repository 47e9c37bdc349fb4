//! HTTP transport used by the fetch loop

use crate::{constants::USER_AGENT, error::ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Performs one GET and decodes the body as JSON
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value, ProviderError>;
}

/// reqwest-backed transport with a per-request timeout
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a new transport
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::Network)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, ProviderError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body = response.bytes().await.map_err(request_error)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// The client timeout also covers reading the body
fn request_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(e)
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock transport for testing
    ///
    /// Hands out queued responses in order, repeating the last one once the
    /// queue is down to a single entry.
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<Value, String>>>,
        requests: Mutex<Vec<Url>>,
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn push_json(&self, value: Value) -> &Self {
            self.responses.lock().unwrap().push_back(Ok(value));
            self
        }

        pub fn push_error(&self, message: &str) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(message.to_string()));
            self
        }

        pub fn requests(&self) -> Vec<Url> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get_json(&self, url: &Url) -> Result<Value, ProviderError> {
            self.requests.lock().unwrap().push(url.clone());
            let mut responses = self.responses.lock().unwrap();
            let next = if responses.len() > 1 {
                responses.pop_front()
            } else {
                responses.front().cloned()
            };
            match next {
                Some(Ok(value)) => Ok(value),
                Some(Err(message)) => Err(ProviderError::HttpStatus {
                    status: 503,
                    body: message,
                }),
                None => Err(ProviderError::Timeout),
            }
        }
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::BackendConfig;

use super::wire::WireMessage;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to backend failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend rejected message with status {status}")]
    Status { status: u16 },
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Delivers one message to the backend. Only success or failure is observed.
pub trait Transport: Send + Sync {
    fn send(&self, message: &WireMessage)
        -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Posts messages form-encoded to the backend's chooser endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, url: url.into() })
    }

    pub fn from_config(backend: &BackendConfig) -> Result<Self, TransportError> {
        Self::new(backend.message_url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, message: &WireMessage) -> Result<(), TransportError> {
        debug!(url = %self.url, %message, "posting chooser message");
        let response = self.client.post(&self.url).form(&message.form_fields()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16() });
        }
        Ok(())
    }
}

//! Companion backend: allocation data fetches and post-confirmation notifications.

pub mod csrf;

pub use csrf::{CsrfTokenSource, StaticCsrfSource};

use crate::foundation::util::encoding::redact_url;
use crate::foundation::{Address, ClaimError, TxId, CSRF_HEADER_NAME, CSRF_TOKEN_MISSING_MSG};
use crate::infrastructure::config::BackendConfig;
use log::{debug, error, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Pending allocations the backend wants added on-chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAllocationsData {
    pub addresses: Vec<Address>,
    pub amounts: Vec<Decimal>,
}

/// Addresses whose allocations may be reclaimed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReclaimAllocationsData {
    pub addresses: Vec<Address>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllocationsSuccessfulPayload<'a> {
    addresses: &'a [Address],
    tx_ids: &'a [TxId],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReclaimSuccessfulPayload<'a> {
    address: &'a Address,
    tx_id: &'a TxId,
}

#[derive(Debug, Serialize)]
struct ClaimSuccessfulPayload<'a> {
    address: &'a Address,
}

#[derive(Debug, Serialize)]
struct EmptyPayload {}

/// HTTP client for the companion backend. Independent of the wallet signer.
pub struct BackendClient {
    http: Client,
    base_url: String,
    config: BackendConfig,
    csrf: Arc<dyn CsrfTokenSource>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig, csrf: Arc<dyn CsrfTokenSource>) -> Result<Self, ClaimError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ClaimError::NetworkError(format!("failed to build backend client: {err}")))?;
        info!("[Backend] client configured url={}", redact_url(&config.base_url));
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string(), config: config.clone(), csrf })
    }

    pub async fn fetch_add_allocations_data(&self) -> Result<AddAllocationsData, ClaimError> {
        let body = self.post_json(&self.config.add_allocations_data_path, &EmptyPayload {}, self.csrf_or_empty()).await?;
        serde_json::from_value(body).map_err(|err| {
            error!("[Backend] Error fetching add allocations data: {}", err);
            ClaimError::from(err)
        })
    }

    pub async fn fetch_reclaim_allocations_data(&self) -> Result<ReclaimAllocationsData, ClaimError> {
        let body = self.post_json(&self.config.reclaim_allocations_data_path, &EmptyPayload {}, self.csrf_or_empty()).await?;
        serde_json::from_value(body).map_err(|err| {
            error!("[Backend] Error fetching reclaim allocations data: {}", err);
            ClaimError::from(err)
        })
    }

    pub async fn notify_allocations_successful(&self, addresses: &[Address], tx_ids: &[TxId]) -> Result<Value, ClaimError> {
        let payload = AllocationsSuccessfulPayload { addresses, tx_ids };
        self.post_json(&self.config.allocations_successful_path, &payload, self.csrf_or_empty()).await
    }

    /// Unlike the other calls, a missing CSRF token fails before any request is made,
    /// and a rejection carries the response body.
    pub async fn notify_reclaim_successful(&self, address: &Address, tx_id: &TxId) -> Result<Value, ClaimError> {
        let Some(token) = self.csrf.resolve() else {
            error!("[Backend] Error notifying reclaim success: {}", CSRF_TOKEN_MISSING_MSG);
            return Err(ClaimError::Csrf(CSRF_TOKEN_MISSING_MSG.to_string()));
        };
        let payload = ReclaimSuccessfulPayload { address, tx_id };
        let url = self.url(&self.config.reclaim_success_path);
        let response = self.send(&url, &payload, token).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ClaimError::ReclaimNotifyFailed { status: status.as_u16(), body };
            error!("[Backend] {}", err);
            return Err(err);
        }
        read_body(response).await
    }

    pub async fn notify_claim_successful(&self, address: &Address) -> Result<Value, ClaimError> {
        let payload = ClaimSuccessfulPayload { address };
        self.post_json(&self.config.claim_success_path, &payload, self.csrf_or_empty()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn csrf_or_empty(&self) -> String {
        self.csrf.resolve().unwrap_or_default()
    }

    async fn send<T: Serialize + ?Sized>(&self, url: &str, payload: &T, csrf_token: String) -> Result<reqwest::Response, ClaimError> {
        let started = Instant::now();
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER_NAME, csrf_token)
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                error!("[Backend] request failed url={} error={}", redact_url(url), err);
                ClaimError::from(err)
            })?;
        debug!("[Backend] POST url={} status={} elapsed_ms={}", redact_url(url), response.status(), started.elapsed().as_millis());
        Ok(response)
    }

    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, payload: &T, csrf_token: String) -> Result<Value, ClaimError> {
        let response = self.send(&self.url(path), payload, csrf_token).await?;
        let status = response.status();
        if !status.is_success() {
            let err = ClaimError::Http { status: status.as_u16() };
            error!("[Backend] {} path={}", err, path);
            return Err(err);
        }
        read_body(response).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<Value, ClaimError> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

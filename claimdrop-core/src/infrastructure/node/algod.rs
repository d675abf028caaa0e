use crate::domain::state::GlobalStateEntry;
use crate::domain::txn::{SignedTransactionBytes, SuggestedParams};
use crate::foundation::util::encoding::redact_url;
use crate::foundation::{AppId, ClaimError, Round, TxId, ALGOD_TOKEN_HEADER};
use crate::infrastructure::config::NodeConfig;
use crate::infrastructure::node::models::*;
use crate::infrastructure::node::{not_confirmed, ChainNode};
use async_trait::async_trait;
use log::{debug, info, trace, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// algod v2 REST client.
pub struct AlgodClient {
    http: Client,
    base_url: String,
    token: String,
    validity_window: u64,
}

impl AlgodClient {
    pub fn new(config: &NodeConfig) -> Result<Self, ClaimError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ClaimError::NodeRpcError(format!("failed to build algod client: {err}")))?;
        info!("algod client configured url={}", redact_url(&config.url));
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            validity_window: config.validity_window,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.header(ALGOD_TOKEN_HEADER, &self.token)
        }
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, ClaimError> {
        self.authorized(request).send().await.map_err(|err| {
            warn!("algod request failed path={} error={}", path, err);
            ClaimError::NodeRpcError(format!("{path}: {err}"))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClaimError> {
        let started = Instant::now();
        trace!("algod GET path={}", path);
        let response = self.send(self.http.get(self.url(path)), path).await?;
        let response = ensure_success(response, path).await?;
        let body = response.json::<T>().await.map_err(|err| ClaimError::NodeRpcError(format!("{path}: invalid response: {err}")))?;
        debug!("algod GET path={} elapsed_ms={}", path, started.elapsed().as_millis());
        Ok(body)
    }

    async fn current_round(&self) -> Result<Round, ClaimError> {
        Ok(self.get_json::<NodeStatusResponse>("/v2/status").await?.last_round)
    }

    async fn poll_confirmation(&self, tx_id: &TxId, max_rounds: u64) -> Result<Round, ClaimError> {
        let start_round = self.current_round().await?;
        let mut round = start_round;
        while round < start_round.saturating_add(max_rounds) {
            let pending: PendingTransactionResponse = self.get_json(&format!("/v2/transactions/pending/{tx_id}")).await?;
            if let Some(confirmed) = pending.confirmed_round.filter(|round| *round > 0) {
                info!("transaction confirmed tx_id={} round={}", tx_id, confirmed);
                return Ok(confirmed);
            }
            if !pending.pool_error.is_empty() {
                warn!("transaction rejected from pool tx_id={} error={}", tx_id, pending.pool_error);
                return Err(ClaimError::chain_submission(format!("Transaction Rejected pool error: {}", pending.pool_error)));
            }
            let _: NodeStatusResponse = self.get_json(&format!("/v2/status/wait-for-block-after/{round}")).await?;
            round += 1;
        }
        warn!("transaction not confirmed tx_id={} max_rounds={}", tx_id, max_rounds);
        Err(not_confirmed(tx_id, max_rounds))
    }
}

async fn ensure_success(response: Response, path: &str) -> Result<Response, ClaimError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let message = error_message(response).await;
    warn!("algod request rejected path={} status={} message={}", path, status, message);
    Err(ClaimError::NodeRpcError(format!("{path}: status {} {}", status.as_u16(), message)))
}

async fn error_message(response: Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorResponse>(&text).map(|body| body.message).unwrap_or(text)
}

/// Failures once a group has been handed to the node are submission failures.
fn submission_failure(err: ClaimError) -> ClaimError {
    match err {
        ClaimError::NodeRpcError(message) | ClaimError::NetworkError(message) => ClaimError::ChainSubmission(message),
        other => other,
    }
}

#[async_trait]
impl ChainNode for AlgodClient {
    async fn suggested_params(&self) -> Result<SuggestedParams, ClaimError> {
        let response: TransactionParamsResponse = self.get_json("/v2/transactions/params").await?;
        response.into_params(self.validity_window)
    }

    async fn application_global_state(&self, app_id: AppId) -> Result<Vec<GlobalStateEntry>, ClaimError> {
        let path = format!("/v2/applications/{app_id}");
        let started = Instant::now();
        let response = self.send(self.http.get(self.url(&path)), &path).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("algod application not found app_id={}", app_id);
            return Ok(Vec::new());
        }
        let response = ensure_success(response, &path).await?;
        let app: ApplicationResponse =
            response.json().await.map_err(|err| ClaimError::NodeRpcError(format!("{path}: invalid response: {err}")))?;
        let entries = app.params.global_state.into_iter().map(GlobalStateEntry::try_from).collect::<Result<Vec<_>, _>>()?;
        debug!("algod global state app_id={} entries={} elapsed_ms={}", app_id, entries.len(), started.elapsed().as_millis());
        Ok(entries)
    }

    async fn send_raw_group(&self, signed: &[SignedTransactionBytes]) -> Result<TxId, ClaimError> {
        let path = "/v2/transactions";
        let started = Instant::now();
        let body = signed.iter().flat_map(|txn| txn.as_bytes().iter().copied()).collect::<Vec<u8>>();
        info!("algod submit group size={} bytes={}", signed.len(), body.len());
        let request = self.http.post(self.url(path)).header(reqwest::header::CONTENT_TYPE, "application/x-binary").body(body);
        let response = self.send(request, path).await.map_err(submission_failure)?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response).await;
            warn!("algod rejected group status={} message={}", status, message);
            return Err(ClaimError::chain_submission(message));
        }
        let accepted: PostTransactionsResponse =
            response.json().await.map_err(|err| ClaimError::chain_submission(format!("{path}: invalid response: {err}")))?;
        debug!("algod submit group tx_id={} elapsed_ms={}", accepted.tx_id, started.elapsed().as_millis());
        Ok(TxId::new(accepted.tx_id))
    }

    async fn wait_for_confirmation(&self, tx_id: &TxId, max_rounds: u64) -> Result<Round, ClaimError> {
        self.poll_confirmation(tx_id, max_rounds).await.map_err(submission_failure)
    }
}

use crate::domain::state::GlobalState;
use crate::foundation::{AppId, AssetId, ClaimError, TOKEN_ID_KEY};
use crate::infrastructure::node::ChainNode;
use log::debug;
use std::sync::Arc;

/// Reads contract global state. Every call is a fresh node query.
#[derive(Clone)]
pub struct GlobalStateReader {
    node: Arc<dyn ChainNode>,
    token_key: Vec<u8>,
}

impl GlobalStateReader {
    pub fn new(node: Arc<dyn ChainNode>) -> Self {
        Self { node, token_key: TOKEN_ID_KEY.as_bytes().to_vec() }
    }

    pub fn with_token_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.token_key = key.into();
        self
    }

    pub async fn read_state(&self, app_id: AppId) -> Result<GlobalState, ClaimError> {
        let entries = self.node.application_global_state(app_id).await?;
        debug!("read global state app_id={} entries={}", app_id, entries.len());
        Ok(GlobalState::from_entries(entries))
    }

    pub async fn read_token_id(&self, app_id: AppId) -> Result<AssetId, ClaimError> {
        let state = self.read_state(app_id).await?;
        let token_id = state.asset_id_at(&self.token_key)?;
        debug!("resolved token id app_id={} token_id={}", app_id, token_id);
        Ok(token_id)
    }
}

use crate::foundation::{AppId, ClaimError, NetworkId};
use crate::infrastructure::config::NetworkConfig;
use std::collections::BTreeMap;

/// Immutable network -> application id table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkAppIds {
    entries: BTreeMap<NetworkId, AppId>,
}

impl NetworkAppIds {
    pub fn new(entries: impl IntoIterator<Item = (NetworkId, AppId)>) -> Self {
        Self { entries: entries.into_iter().collect() }
    }

    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::new(config.app_ids.iter().map(|(network, app_id)| (NetworkId::new(network.trim()), AppId::new(*app_id))))
    }

    pub fn get(&self, network: &NetworkId) -> Option<AppId> {
        self.entries.get(network).copied()
    }

    pub fn networks(&self) -> impl Iterator<Item = &NetworkId> {
        self.entries.keys()
    }
}

/// Maps the active network to the deployed contract. Fails closed.
#[derive(Clone, Debug, Default)]
pub struct NetworkConfigResolver {
    app_ids: NetworkAppIds,
}

impl NetworkConfigResolver {
    pub fn new(app_ids: NetworkAppIds) -> Self {
        Self { app_ids }
    }

    pub fn resolve_application_id(&self, network: &NetworkId) -> Result<AppId, ClaimError> {
        match self.app_ids.get(network) {
            Some(app_id) if app_id.get() > 0 => Ok(app_id),
            _ => Err(ClaimError::app_id_not_configured(network)),
        }
    }
}

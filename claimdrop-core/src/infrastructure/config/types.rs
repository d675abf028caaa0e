use crate::foundation::{DEFAULT_BACKEND_TIMEOUT_SECS, DEFAULT_NODE_TIMEOUT_SECS, DEFAULT_VALIDITY_WINDOW, DEFAULT_WAIT_ROUNDS, TOKEN_ID_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_ACTIVE_NETWORK: &str = "testnet";
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:4001";
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOG_FILTERS: &str = "info";

pub const DEFAULT_ADD_ALLOCATIONS_DATA_PATH: &str = "/api/add_allocations/";
pub const DEFAULT_RECLAIM_ALLOCATIONS_DATA_PATH: &str = "/api/reclaim_allocations/";
pub const DEFAULT_ALLOCATIONS_SUCCESSFUL_PATH: &str = "/api/allocations_successful/";
pub const DEFAULT_RECLAIM_SUCCESS_PATH: &str = "/api/reclaim_success/";
pub const DEFAULT_CLAIM_SUCCESS_PATH: &str = "/api/claim_success/";

pub const DEFAULT_ADD_ALLOCATIONS_METHOD: &str = "add_allocations(address[],uint64[])void";
pub const DEFAULT_RECLAIM_METHOD: &str = "reclaim_allocation(address)void";
pub const DEFAULT_CLAIM_METHOD: &str = "claim()void";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub node: NodeConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub contract: ContractConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which network is active and where the contract lives on each.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub active: String,
    /// Network id -> application id. A network missing here is unusable.
    pub app_ids: BTreeMap<String, u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { active: DEFAULT_ACTIVE_NETWORK.to_string(), app_ids: BTreeMap::new() }
    }
}

/// algod endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub url: String,
    /// Sent as `X-Algo-API-Token`; empty for public endpoints.
    pub token: String,
    /// Rounds to wait for confirmation before giving up.
    pub wait_rounds: u64,
    /// `last_valid - first_valid` for built transactions.
    pub validity_window: u64,
    pub timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_NODE_URL.to_string(),
            token: String::new(),
            wait_rounds: DEFAULT_WAIT_ROUNDS,
            validity_window: DEFAULT_VALIDITY_WINDOW,
            timeout_secs: DEFAULT_NODE_TIMEOUT_SECS,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub add_allocations_data_path: String,
    pub reclaim_allocations_data_path: String,
    pub allocations_successful_path: String,
    pub reclaim_success_path: String,
    pub claim_success_path: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            add_allocations_data_path: DEFAULT_ADD_ALLOCATIONS_DATA_PATH.to_string(),
            reclaim_allocations_data_path: DEFAULT_RECLAIM_ALLOCATIONS_DATA_PATH.to_string(),
            allocations_successful_path: DEFAULT_ALLOCATIONS_SUCCESSFUL_PATH.to_string(),
            reclaim_success_path: DEFAULT_RECLAIM_SUCCESS_PATH.to_string(),
            claim_success_path: DEFAULT_CLAIM_SUCCESS_PATH.to_string(),
            timeout_secs: DEFAULT_BACKEND_TIMEOUT_SECS,
        }
    }
}

/// How the deployed contract is called.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub add_allocations_method: String,
    pub reclaim_method: String,
    pub claim_method: String,
    /// Box-name prefix as `hex:<..>`, `b64:<..>` or bare hex. Empty means no prefix.
    pub box_prefix: String,
    /// Global-state key holding the reward asset id.
    pub token_id_key: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            add_allocations_method: DEFAULT_ADD_ALLOCATIONS_METHOD.to_string(),
            reclaim_method: DEFAULT_RECLAIM_METHOD.to_string(),
            claim_method: DEFAULT_CLAIM_METHOD.to_string(),
            box_prefix: String::new(),
            token_id_key: TOKEN_ID_KEY.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<String>,
    pub filters: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { dir: None, filters: DEFAULT_LOG_FILTERS.to_string() }
    }
}

//! System-wide constants for the allocation/claim client.

/// Raised by every contract-call operation when the wallet has no active account.
pub const NO_ACTIVE_ACCOUNT_MSG: &str = "No active account selected.";

/// Raised by the allocation validator.
pub const ALLOCATION_LENGTH_MISMATCH_MSG: &str = "Addresses and amounts arrays must have the same non-zero length.";

pub const GLOBAL_STATE_EMPTY_MSG: &str = "Contract global state is empty or not found";

pub const TOKEN_ID_MISSING_MSG: &str = "token_id not found in contract's global state";

pub const CSRF_TOKEN_MISSING_MSG: &str = "CSRF token not found";

/// Global-state key holding the reward asset id.
pub const TOKEN_ID_KEY: &str = "token_id";

/// Cookie carrying the backend anti-forgery token.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Header carrying the backend anti-forgery token.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Header carrying the algod API token.
pub const ALGOD_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Public key length in bytes (ed25519).
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Address checksum length in bytes.
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

/// Text form of an address (base32, no padding).
pub const ADDRESS_TEXT_LENGTH: usize = 58;

/// SHA-512/256 digest size.
pub const HASH_SIZE: usize = 32;

/// ed25519 signature size.
pub const SIGNATURE_SIZE: usize = 64;

/// ABI method selector length.
pub const METHOD_SELECTOR_SIZE: usize = 4;

/// Domain separator for transaction ids and signatures.
pub const TX_DOMAIN_PREFIX: &[u8] = b"TX";

/// Domain separator for group ids.
pub const TX_GROUP_DOMAIN_PREFIX: &[u8] = b"TG";

/// Maximum transactions in one atomic group.
pub const MAX_GROUP_SIZE: usize = 16;

/// Maximum application arguments (selector included).
pub const MAX_APP_ARGS: usize = 16;

/// Default confirmation wait, in rounds.
pub const DEFAULT_WAIT_ROUNDS: u64 = 4;

/// Default validity window, in rounds.
pub const DEFAULT_VALIDITY_WINDOW: u64 = 1000;

/// Default minimum fee in microalgos.
pub const DEFAULT_MIN_FEE: u64 = 1_000;

/// Maximum decimals an asset may declare.
pub const MAX_ASSET_DECIMALS: u32 = 19;

/// Default backend request timeout in seconds.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Default node request timeout in seconds.
pub const DEFAULT_NODE_TIMEOUT_SECS: u64 = 30;

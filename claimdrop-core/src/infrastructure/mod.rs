//! Infrastructure layer: config, logging, chain node, wallet and backend adapters.

pub mod backend;
pub mod config;
pub mod logging;
pub mod node;
pub mod wallet;

pub use backend::{BackendClient, CsrfTokenSource, StaticCsrfSource};
pub use config::AppConfig;
pub use node::{AlgodClient, ChainNode, InMemoryNode};
pub use wallet::{LocalKeySigner, StaticWallet, TransactionSigner, WalletProvider, WalletSession};

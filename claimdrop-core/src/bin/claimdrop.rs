#[path = "claimdrop/cli.rs"]
mod cli;

use crate::cli::{Cli, Command};
use claimdrop_core::application::{GlobalStateReader, NetworkAppIds, NetworkConfigResolver, TransactionOrchestrator};
use claimdrop_core::domain::boxes::BoxKeyDeriver;
use claimdrop_core::foundation::util::encoding::decode_prefixed_secret;
use claimdrop_core::foundation::{ClaimError, NetworkId};
use claimdrop_core::infrastructure::config::{
    env_value, load_config_from_file, resolve_config_path, resolve_data_dir, AppConfig, CSRF_COOKIE_ENV, CSRF_TOKEN_ENV, SIGNER_SEED_ENV,
};
use claimdrop_core::infrastructure::logging::init_logger;
use claimdrop_core::infrastructure::{AlgodClient, BackendClient, LocalKeySigner, StaticCsrfSource, StaticWallet};
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse_args();
    let config = load_config(&args)?;
    let filters = args.log_level.clone().unwrap_or_else(|| config.logging.filters.clone());
    init_logger(config.logging.dir.as_deref(), &filters)?;
    info!("claimdrop starting network={} command={:?}", config.network.active, args.command);

    match args.command {
        Command::BoxKey { address } => {
            let deriver = BoxKeyDeriver::new(decode_prefixed_secret(&config.contract.box_prefix)?);
            println!("{}", hex::encode(deriver.derive_str(&address)?.as_bytes()));
        }
        Command::TokenId => {
            let resolver = NetworkConfigResolver::new(NetworkAppIds::from_config(&config.network));
            let app_id = resolver.resolve_application_id(&NetworkId::new(config.network.active.clone()))?;
            let reader = GlobalStateReader::new(Arc::new(AlgodClient::new(&config.node)?))
                .with_token_key(config.contract.token_id_key.as_bytes().to_vec());
            println!("{}", reader.read_token_id(app_id).await?);
        }
        Command::AddAllocations { addresses, amounts, decimals, from_backend, notify } => {
            let orchestrator = build_orchestrator(&config, None)?;
            let (addresses, amounts) = if from_backend {
                let data = build_backend(&config)?.fetch_add_allocations_data().await?;
                (data.addresses, data.amounts)
            } else {
                (addresses, amounts)
            };
            let result = orchestrator.add_allocations(&addresses, &amounts, decimals).await?;
            println!("confirmed round {} tx_ids {:?}", result.confirmed_round, result.tx_ids);
            if notify {
                build_backend(&config)?.notify_allocations_successful(&addresses, &result.tx_ids).await?;
            }
        }
        Command::Reclaim { address, notify } => {
            let orchestrator = build_orchestrator(&config, None)?;
            let result = orchestrator.reclaim_allocation(&address).await?;
            println!("confirmed round {} tx_ids {:?}", result.confirmed_round, result.tx_ids);
            if notify {
                let tx_id = result.tx_ids.first().ok_or_else(|| ClaimError::Message("no transaction id returned".to_string()))?;
                build_backend(&config)?.notify_reclaim_successful(&address, tx_id).await?;
            }
        }
        Command::Claim { notify } => {
            let signer = load_signer()?;
            let address = signer.address();
            let orchestrator = build_orchestrator(&config, Some(signer))?;
            let result = orchestrator.claim_rewards().await?;
            println!("confirmed round {} tx_ids {:?}", result.confirmed_round, result.tx_ids);
            if notify {
                build_backend(&config)?.notify_claim_successful(&address).await?;
            }
        }
    }
    Ok(())
}

fn load_config(args: &Cli) -> Result<AppConfig, ClaimError> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => {
            let data_dir = match &args.data_dir {
                Some(dir) => dir.clone(),
                None => resolve_data_dir()?,
            };
            resolve_config_path(&data_dir)
        }
    };
    let mut config = load_config_from_file(&config_path)?;
    if let Some(url) = &args.node_url {
        config.node.url = url.clone();
    }
    if let Some(network) = &args.network {
        config.network.active = network.trim().to_string();
    }
    config.validate().map_err(|errors| ClaimError::ConfigError(format!("validation failed: {:?}", errors)))?;
    Ok(config)
}

fn load_signer() -> Result<LocalKeySigner, ClaimError> {
    let seed = env_value(SIGNER_SEED_ENV).ok_or_else(|| ClaimError::ConfigError(format!("{SIGNER_SEED_ENV} is required")))?;
    LocalKeySigner::from_secret_str(&seed)
}

fn build_orchestrator(config: &AppConfig, signer: Option<LocalKeySigner>) -> Result<TransactionOrchestrator, ClaimError> {
    let signer = match signer {
        Some(signer) => signer,
        None => load_signer()?,
    };
    let wallet = Arc::new(StaticWallet::local(signer, NetworkId::new(config.network.active.clone())));
    let node = Arc::new(AlgodClient::new(&config.node)?);
    TransactionOrchestrator::from_config(config, wallet, node)
}

fn build_backend(config: &AppConfig) -> Result<BackendClient, ClaimError> {
    let csrf = StaticCsrfSource::new(env_value(CSRF_COOKIE_ENV).unwrap_or_default(), env_value(CSRF_TOKEN_ENV));
    BackendClient::new(&config.backend, Arc::new(csrf))
}

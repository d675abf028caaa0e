use crate::domain::txn::{AbiMethod, AbiType};
use crate::foundation::util::encoding::decode_prefixed_secret;
use crate::infrastructure::config::types::AppConfig;
use reqwest::Url;

const MAX_WAIT_ROUNDS: u64 = 1_000;

impl AppConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.network.active.trim().is_empty() {
            errors.push("network.active must not be empty".to_string());
        }
        for (network, app_id) in &self.network.app_ids {
            if *app_id == 0 {
                errors.push(format!("network.app_ids.{network} must be > 0"));
            }
        }

        check_url(&mut errors, "node.url", &self.node.url);
        if self.node.wait_rounds == 0 {
            errors.push("node.wait_rounds must be > 0".to_string());
        }
        if self.node.wait_rounds > MAX_WAIT_ROUNDS {
            errors.push(format!("node.wait_rounds should not exceed {MAX_WAIT_ROUNDS}"));
        }
        if self.node.validity_window == 0 {
            errors.push("node.validity_window must be > 0".to_string());
        }

        check_url(&mut errors, "backend.base_url", &self.backend.base_url);
        for (field, path) in [
            ("backend.add_allocations_data_path", &self.backend.add_allocations_data_path),
            ("backend.reclaim_allocations_data_path", &self.backend.reclaim_allocations_data_path),
            ("backend.allocations_successful_path", &self.backend.allocations_successful_path),
            ("backend.reclaim_success_path", &self.backend.reclaim_success_path),
            ("backend.claim_success_path", &self.backend.claim_success_path),
        ] {
            if !path.starts_with('/') {
                errors.push(format!("{field} must start with '/': got '{path}'"));
            }
        }

        check_method(&mut errors, "contract.add_allocations_method", &self.contract.add_allocations_method, &[
            AbiType::AddressArray,
            AbiType::Uint64Array,
        ]);
        check_method(&mut errors, "contract.reclaim_method", &self.contract.reclaim_method, &[AbiType::Address]);
        check_method(&mut errors, "contract.claim_method", &self.contract.claim_method, &[]);

        if let Err(err) = decode_prefixed_secret(&self.contract.box_prefix) {
            errors.push(format!("contract.box_prefix is not decodable: {err}"));
        }
        if self.contract.token_id_key.is_empty() {
            errors.push("contract.token_id_key must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_url(errors: &mut Vec<String>, field: &str, value: &str) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(format!("{field} must use http or https: got scheme '{}'", url.scheme())),
        Err(err) => errors.push(format!("invalid {field} '{value}': {err}")),
    }
}

fn check_method(errors: &mut Vec<String>, field: &str, signature: &str, expected_args: &[AbiType]) {
    match signature.parse::<AbiMethod>() {
        Ok(method) if method.args == expected_args => {}
        Ok(method) => errors.push(format!(
            "{field} '{signature}' must take ({}) but takes ({})",
            expected_args.iter().map(AbiType::as_str).collect::<Vec<_>>().join(","),
            method.args.iter().map(AbiType::as_str).collect::<Vec<_>>().join(",")
        )),
        Err(err) => errors.push(format!("{field}: {err}")),
    }
}

mod algod_client;
mod orchestrator_flows;

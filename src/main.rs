use std::sync::Arc;

use reqres_stub::{config, data, logger, server};

/// Config file used when no path is given (resolved as `config.toml`)
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    // Worker threads follow the config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let dataset = data::Dataset::embedded()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    logger::log_config(&cfg);

    let state = Arc::new(config::AppState::new(cfg, dataset));
    server::start_server_loop(listener, state, server::shutdown_signal()).await?;
    Ok(())
}

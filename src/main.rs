use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path_from_args(std::env::args().skip(1));
    let cfg = config::Config::load(&config_path)?;
    logger::init(&cfg)?;

    // Worker threads default to the number of CPU cores
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
    let listener = server::create_listener(addr, cfg.performance.backlog)?;
    logger::log_server_start(&listener.local_addr()?, &cfg);

    let state = Arc::new(config::AppState::new(cfg));
    server::signal::start_signal_handler(Arc::clone(&state))?;
    server::run_server(listener, state).await?;
    Ok(())
}

/// `--config <path>` or `--config=<path>`, defaulting to `config`
fn config_path_from_args(mut args: impl Iterator<Item = String>) -> String {
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return path;
            }
        } else if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    config::DEFAULT_CONFIG_PATH.to_string()
}

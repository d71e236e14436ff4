use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chainst::cli::{self, Cli};
use chainst::config::ChainstConfig;

/// Level used until the config file has been read.
const BOOTSTRAP_LOG_LEVEL: &str = "warn";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env().ok();
    let level_from_env = env_filter.is_some();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter.unwrap_or_else(|| EnvFilter::new(BOOTSTRAP_LOG_LEVEL)))
        .with_writer(std::io::stderr)
        .with_filter_reloading();
    let filter_handle = builder.reload_handle();
    builder.init();

    let config = ChainstConfig::load_or_create(&args.config)?;
    if !level_from_env {
        filter_handle.reload(EnvFilter::new(&config.log.level))?;
    }

    debug!("chain '{}', prefix '{}'", config.chain.chain_id, config.chain.bech32_prefix);
    cli::run(args, &config)
}

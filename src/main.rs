//! QcRaid
//!
//! Creates a RAID volume on one or many FitServer R2280 hosts through their
//! Redfish interface. Outcome lines go to stdout, logs to stderr.

use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qc_raid::{app, Cli, RedfishConnector, StdoutReporter};

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    init_logging(&cli);

    debug!("QcRaid {}", qc_raid::VERSION);

    let connector = Arc::new(RedfishConnector::new(cli.redfish_config()));
    let reporter = Arc::new(StdoutReporter);

    match app::run(&cli, connector, reporter).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(cli: &Cli) {
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();

    let mut filter = EnvFilter::from_default_env();
    if let Some(level) = cli.log_level_directive(rust_log_set) {
        filter = filter.add_directive(level.into());
    }
    for directive in ["hyper=warn", "reqwest=warn", "rustls=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

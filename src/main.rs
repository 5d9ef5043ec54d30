// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Build and validate the scan target (lists, headers, thread count)
// 4. Run the scan until every candidate has been probed
// 5. Exit with proper code (0 = scan completed, 2 = configuration error)
// =============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::warn;

use dirb::cli::Cli;
use dirb::logging;
use dirb::scan::{self, HttpTransport, LogReporter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Error: {:#}", e);
        std::process::exit(2);
    }

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Builds the target and runs the scan
//
// Every error returned from here happens before the first request.
async fn run(cli: Cli) -> Result<i32> {
    let target = match cli.build_target().await {
        Ok(target) => Arc::new(target),
        Err(e) => {
            eprintln!("{}", Cli::command().render_help());
            return Err(e.into());
        }
    };

    if !target.verify_tls() {
        warn!("TLS certificate validation is disabled (use --verify-tls to enable)");
    }

    let transport = HttpTransport::new(&target).context("failed to create HTTP client")?;
    let reporter = LogReporter::new(cli.json);

    scan::run(target, Arc::new(transport), Arc::new(reporter)).await;

    Ok(0)
}

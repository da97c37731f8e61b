//! dev-gate
//!
//! Decides whether a debug-mode entry point may be served to a caller.
//!
//! # Architecture Overview
//!
//! ```text
//!   <config_dir>/parameters.yml
//!            │
//!            ▼
//!     ┌─────────────┐      ┌──────────────────┐
//!     │   config    │─────▶│    AccessGate    │◀──── RequestContext
//!     │   loader    │      │  (ordered guards)│      (env / CLI flags /
//!     └─────────────┘      └────────┬─────────┘       HTTP headers + peer)
//!                                   │
//!                         allow ────┴──── deny → 403 + fixed message
//! ```
//!
//! Subcommands:
//! - `check`    evaluate one request snapshot
//! - `settings` print the effective settings
//! - `serve`    run a debug server behind the gate

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use dev_gate::config::DEFAULT_CONFIG_DIR;
use dev_gate::observability::logging;
use dev_gate::{AccessGate, DebugServer, RequestContext, Verdict};

#[derive(Parser)]
#[command(name = "dev-gate")]
#[command(about = "Access gate for debug-mode entry points", long_about = None)]
struct Cli {
    /// Directory holding parameters.yml
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single request snapshot
    Check {
        /// Caller address
        #[arg(long)]
        remote_addr: Option<String>,

        /// Serving mode identifier
        #[arg(long, default_value = "cli")]
        sapi: String,

        /// Request carries a Client-IP header
        #[arg(long)]
        client_ip: bool,

        /// Request carries an X-Forwarded-For header
        #[arg(long)]
        forwarded_for: bool,

        /// Read the snapshot from CGI-style environment variables instead
        #[arg(long, conflicts_with_all = ["remote_addr", "client_ip", "forwarded_for"])]
        from_env: bool,
    },
    /// Print the effective gate settings as JSON
    Settings,
    /// Serve a debug entry point behind the gate
    Serve {
        #[arg(short, long, default_value = "127.0.0.1:8000")]
        bind: String,

        /// Serving mode reported to the gate
        #[arg(long, default_value = "cli-server")]
        sapi: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    logging::init();

    let cli = Cli::parse();
    let gate = AccessGate::from_config_dir(&cli.config_dir);

    match cli.command {
        Commands::Check {
            remote_addr,
            sapi,
            client_ip,
            forwarded_for,
            from_env,
        } => {
            let ctx = if from_env {
                RequestContext::from_env()
            } else {
                let ctx = RequestContext::new(sapi)
                    .with_client_ip_header(client_ip)
                    .with_x_forwarded_for_header(forwarded_for);
                match remote_addr {
                    Some(addr) => ctx.with_remote_addr(addr),
                    None => ctx,
                }
            };

            match gate.evaluate(&ctx) {
                Verdict::Allowed(reason) => {
                    println!("allowed ({:?})", reason);
                    Ok(ExitCode::SUCCESS)
                }
                Verdict::Denied(reason) => {
                    println!("denied ({})", reason);
                    eprintln!("{}", gate.forbidden_status_line());
                    eprintln!("{}", gate.forbidden_message());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Settings => {
            println!("{}", serde_json::to_string_pretty(gate.settings())?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve { bind, sapi } => {
            tracing::info!(
                config_dir = %cli.config_dir.display(),
                security_disabled = gate.settings().security_disabled,
                "Gate configured"
            );

            let listener = TcpListener::bind(&bind).await?;
            DebugServer::new(gate, sapi).run(listener).await?;

            tracing::info!("Shutdown complete");
            Ok(ExitCode::SUCCESS)
        }
    }
}

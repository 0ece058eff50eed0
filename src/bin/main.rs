use std::net::IpAddr;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use tiny_add_mcp::cli::{call_tool, render_manifest};
use tiny_add_mcp::{ManifestInfo, ManifestMode, ServerConfig, default_registry};

#[derive(Parser)]
#[command(name = "tiny-add-mcp")]
#[command(about = "Tiny MCP-style HTTP server exposing an add tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (HOST, PORT and MCP_MANIFEST_MODE are read from the environment)
    Serve {
        /// Interface to bind, overrides HOST (default 0.0.0.0)
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to listen on, overrides PORT (default 3000)
        #[arg(short, long)]
        port: Option<u16>,
        /// How `GET /mcp` delivers the manifest, overrides MCP_MANIFEST_MODE
        #[arg(long, value_enum)]
        manifest_mode: Option<ManifestMode>,
    },
    /// Print the tool manifest
    Manifest {
        /// Print as a single SSE frame instead of JSON
        #[arg(long, default_value_t = false)]
        sse: bool,
    },
    /// Invoke a tool locally and print the response
    Call {
        tool: String,
        /// Tool parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
        /// Correlation id, parsed as JSON when possible
        #[arg(long)]
        call_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("tiny_add_mcp=info".parse()?),
        )
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            manifest_mode,
        } => {
            let config = ServerConfig::from_env()?.with_overrides(host, port, manifest_mode);
            info!("Starting MCP HTTP server on {}", config.bind_addr());
            tiny_add_mcp::start_http(config).await?;
        }
        Commands::Manifest { sse } => {
            let text = render_manifest(&ManifestInfo::default(), &default_registry(), sse)?;
            if sse {
                print!("{}", text);
            } else {
                println!("{}", text);
            }
        }
        Commands::Call {
            tool,
            params,
            call_id,
        } => {
            let output = call_tool(&default_registry(), &tool, &params, call_id)?;
            if !output.success {
                eprintln!("{}", output.text);
                return Ok(ExitCode::FAILURE);
            }
            println!("{}", output.text);
        }
    }

    Ok(ExitCode::SUCCESS)
}

use anyhow::{Context, Result};
use awsops::CallRequest;
use awsops_client::cancel_pair;
use awsops_config::{LogFormat, RuntimeConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Call AWS Keyspaces and CloudWatch Observability Admin operations
#[derive(Parser)]
#[command(name = "awsops")]
#[command(version)]
#[command(about = "Call AWS Keyspaces and CloudWatch Observability Admin operations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// AWS region (overrides config file and environment)
    #[arg(long, value_name = "REGION", global = true)]
    region: Option<String>,

    /// Send every request to this endpoint instead of the regional one
    #[arg(long, value_name = "URL", global = true)]
    endpoint_url: Option<String>,

    /// Send requests without SigV4 signatures
    #[arg(long, global = true)]
    no_sign: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke an operation and print the selected output
    Call {
        /// `service:Operation`, or a bare operation name when unambiguous
        operation: String,

        /// Parameter as Name=Value; values starting with `[` or `{` are read as JSON
        #[arg(short = 'p', long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// `*` for the whole response, `^Param` to echo an input, or an output field
        #[arg(short, long, value_name = "SELECTOR")]
        select: Option<String>,

        /// Fetch only the first page of a list operation
        #[arg(long)]
        no_auto_iterate: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List registered operations
    #[command(alias = "ops")]
    Operations {
        /// Only list operations of this service
        #[arg(long, value_name = "SERVICE")]
        service: Option<String>,
    },
    /// Show an operation's parameters and outputs
    Describe {
        operation: String,

        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Config file and environment, then CLI flags on top
    let mut config = if let Some(config_path) = &cli.config {
        RuntimeConfig::load_from_path(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        RuntimeConfig::load().context("Failed to load configuration")?
    };
    apply_cli_overrides(&mut config, &cli)?;

    awsops::init_tracing(&config.log);

    match cli.command {
        Commands::Call {
            operation,
            params,
            select,
            no_auto_iterate,
            pretty,
        } => {
            let params = params
                .iter()
                .map(|raw| awsops::parse_param(raw))
                .collect::<Result<Vec<_>>>()?;
            let request = CallRequest {
                operation,
                params,
                select,
                auto_iterate: no_auto_iterate.then_some(false),
                pretty,
            };

            let (handle, signal) = cancel_pair();
            let watcher = tokio::spawn(awsops::cancel_on_ctrl_c(handle));
            let result = awsops::run_call(&config, &request, signal, std::io::stdout()).await;
            watcher.abort();
            result.map(|_| ())
        }
        Commands::Operations { service } => {
            let registry = awsops_services::registry()?;
            awsops::write_operations(registry, service.as_deref(), std::io::stdout())?;
            Ok(())
        }
        Commands::Describe { operation, json } => {
            let op = awsops_services::registry()?.lookup(&operation)?;
            if json {
                println!("{}", awsops::describe_json(op)?);
            } else {
                awsops::write_description(op, std::io::stdout())?;
            }
            Ok(())
        }
    }
}

fn apply_cli_overrides(config: &mut RuntimeConfig, cli: &Cli) -> Result<()> {
    if let Some(region) = &cli.region {
        config.aws.region = Some(region.clone());
    }
    if let Some(endpoint) = &cli.endpoint_url {
        config.aws.endpoint_url = Some(endpoint.clone());
    }
    if cli.no_sign {
        config.aws.sign_requests = false;
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log.format = format
            .parse::<LogFormat>()
            .context("Invalid --log-format value")?;
    }
    Ok(())
}

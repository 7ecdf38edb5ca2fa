use clap::Parser;
use dialect_exec::RunnerConfig;
use dialect_exec_server::{create_app, run_server};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, env = "MD_RUNNER_ADDR", default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// Machine Dialect toolchain executable
    #[arg(long, env = "MD_RUNNER_PROGRAM", default_value = "machine-dialect")]
    program: String,

    /// Extra arguments placed before the toolchain subcommand
    #[arg(long = "program-arg", env = "MD_RUNNER_PROGRAM_ARGS", value_delimiter = ' ')]
    program_args: Vec<String>,

    /// Run step timeout in seconds
    #[arg(long, env = "MD_RUNNER_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// Compile step timeout in seconds
    #[arg(long, env = "MD_RUNNER_COMPILE_TIMEOUT", default_value = "60")]
    compile_timeout: u64,

    /// Directory for staged sources and artifacts
    #[arg(long, env = "MD_RUNNER_WORK_DIR")]
    work_dir: Option<PathBuf>,

    /// Maximum number of concurrent executions
    #[arg(short, long, env = "MD_RUNNER_MAX_CONCURRENT", default_value = "10")]
    max_concurrent: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = RunnerConfig {
        program: args.program,
        program_args: args.program_args,
        execution_timeout: Duration::from_secs(args.timeout),
        compile_timeout: Duration::from_secs(args.compile_timeout),
        work_dir: args.work_dir,
        max_concurrent_executions: args.max_concurrent,
    };

    let app = create_app(config).await?;
    run_server(app, args.addr).await?;

    Ok(())
}

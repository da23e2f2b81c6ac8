use anyhow::Result;
use clap::Parser;
use latest_branches::areas::repository::Repository;
use latest_branches::artifacts::recency::{DEFAULT_RECENCY_HOURS, RecencyWindow};
use latest_branches::artifacts::resolve::{DEFAULT_MAX_CONCURRENCY, Strategy};
use latest_branches::commands::porcelain::latest::LatestOptions;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "latest-branches",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "List the branches of a repository that were committed to recently",
    long_about = "This command dates the head commit of every local branch and every \
    origin remote-tracking branch, reading loose objects straight from .git/objects \
    and shelling out to git only for commits that are packed. \
    Branches committed inside the recency window are listed newest first.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(index = 1, help = "The path to the repository work tree")]
    path: Option<String>,
    #[arg(
        long,
        default_value_t = DEFAULT_RECENCY_HOURS,
        help = "List branches committed to within this many hours"
    )]
    since_hours: i64,
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MAX_CONCURRENCY,
        help = "Maximum number of branches resolved at the same time"
    )]
    jobs: usize,
    #[arg(
        long,
        default_value_t = 2000,
        help = "Milliseconds a loose object read may take before falling back to git"
    )]
    native_timeout_ms: u64,
    #[arg(
        long,
        default_value_t = 30,
        help = "Seconds a git fallback may take before the branch is reported as failed"
    )]
    fallback_timeout_secs: u64,
    #[arg(long = "git", default_value = "git", help = "The git binary used for fallbacks")]
    git_binary: String,
    #[arg(
        long,
        value_enum,
        default_value_t = Strategy::Hybrid,
        help = "How branch heads are dated"
    )]
    strategy: Strategy,
    #[arg(long, help = "Also time the shell strategy and report both timings")]
    compare: bool,
}

fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run());

    // a loose read abandoned after its timeout may still hold a blocking
    // thread, do not wait for it on the way out
    runtime.shutdown_background();

    result
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let path = match cli.path {
        Some(path) => path,
        None => std::env::current_dir()?.to_string_lossy().to_string(),
    };
    let repository = Repository::new(&path, Box::new(std::io::stdout()))?;

    let opts = LatestOptions {
        strategy: cli.strategy,
        compare: cli.compare,
        window: RecencyWindow::new(cli.since_hours),
        max_concurrency: cli.jobs,
        native_timeout: Duration::from_millis(cli.native_timeout_ms),
        fallback_timeout: Duration::from_secs(cli.fallback_timeout_secs),
        git_binary: cli.git_binary,
    };

    repository.latest(&opts).await
}

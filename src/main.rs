use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gocmd::config::ResolverConfig;
use gocmd::module::{GoEnvModule, GoModDirectory, ModuleVersionSource};
use gocmd::toolchain::{Locator, Mode, Toolchain};
use gocmd::version::{find_candidates, major_version, stable_version, valid_version};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gocmd")]
#[command(version, about = "Find a local go executable matching a Go version")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the embedded release catalog instead of go.dev
    #[arg(long, global = true)]
    offline: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a version exists and report whether it is stable
    Check { version: String },
    /// Print the major prefix of a version
    Major { version: String },
    /// List releases sharing a major prefix, latest first
    Candidates { major: String },
    /// Find an executable reporting exactly the given version
    Lookup { version: String },
    /// Find the latest executable sharing the version's major prefix
    Latest { version: String },
    /// Select an executable under a matching mode
    Determine {
        version: String,
        #[arg(long, default_value_t = Mode::Exact)]
        mode: Mode,
    },
    /// Select an executable for the go version declared in go.mod
    Module {
        #[arg(long, default_value_t = Mode::Latest)]
        mode: Mode,
        /// Search for go.mod from this directory instead of asking `go env GOMOD`
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_toolchain(toolchain: &Toolchain) {
    println!("{}\t{}", toolchain.command.display(), toolchain.version);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ResolverConfig::load(cli.config.as_deref())?;
    config.offline |= cli.offline;
    let locator = Locator::from_config(&config);

    match cli.command {
        Command::Check { version } => {
            valid_version(locator.catalog(), &version).await?;
            let stable = stable_version(locator.catalog(), &version).await?;
            println!("{version}\t{}", if stable { "stable" } else { "unstable" });
        }
        Command::Major { version } => {
            println!("{}", major_version(&version));
        }
        Command::Candidates { major } => {
            let versions = locator.catalog().load().await?;
            for candidate in find_candidates(&versions, &major) {
                println!("{candidate}");
            }
        }
        Command::Lookup { version } => {
            println!("{}", locator.lookup(&version).await?.display());
        }
        Command::Latest { version } => {
            println!("{}", locator.lookup_latest(&version).await?.display());
        }
        Command::Determine { version, mode } => {
            print_toolchain(&locator.determine(&version, mode).await?);
        }
        Command::Module { mode, dir } => {
            let module: Box<dyn ModuleVersionSource> = match dir {
                Some(dir) => Box::new(GoModDirectory::new(dir)),
                None => Box::new(
                    GoEnvModule::new(locator.runner().clone())
                        .with_command(locator.default_command()),
                ),
            };
            print_toolchain(&locator.determine_from_module(&*module, mode).await?);
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use commands::context::Overrides;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "studio")]
#[command(version, about = "Build Hugo websites from a description or a site plan", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Generation backend base URL (overrides config)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Preview server base URL (overrides config)
    #[arg(long, global = true)]
    preview_base: Option<String>,

    /// Directory downloaded archives are saved to (overrides config)
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Describe a website and let the backend build it
    Chat {
        /// Send one description and exit instead of starting a session
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Create a site from a site plan, generate its content, optionally download it
    Form {
        /// Path to site.toml
        plan: PathBuf,
    },

    /// Write a starter site.toml
    Init {
        /// Directory to create site.toml in
        path: PathBuf,

        /// Site name to put in the template
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Download a site's Hugo archive
    Download {
        site_id: String,

        /// Site name used for the archive file name (defaults to the site id)
        #[arg(short, long)]
        name: Option<String>,

        /// Also unpack the archive into this directory
        #[arg(long)]
        extract: Option<PathBuf>,
    },

    /// Print the preview URL of a site
    Preview { site_id: String },

    /// Serve a downloaded site archive locally
    Serve {
        /// Path to a downloaded .zip archive
        archive: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "1313")]
        port: u16,
    },

    /// Inspect sites known to the backend
    Sites {
        #[command(subcommand)]
        command: SitesCommand,
    },

    /// Check that the backend is reachable
    Health,

    /// Set backend and download defaults
    Configure,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum SitesCommand {
    /// List site ids
    List,

    /// Show one site's config, content and status
    Show { site_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,studio_backend=debug,studio_orchestrator=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let overrides = Overrides {
        api_base: cli.api_base,
        preview_base: cli.preview_base,
        download_dir: cli.download_dir,
    };

    match cli.command {
        Command::Chat { message } => commands::chat::run(&overrides, message).await,
        Command::Form { plan } => commands::form::run(&overrides, plan).await,
        Command::Init { path, name } => commands::init::run(path, name),
        Command::Download {
            site_id,
            name,
            extract,
        } => commands::download::run(&overrides, site_id, name, extract).await,
        Command::Preview { site_id } => commands::preview::run(&overrides, site_id),
        Command::Serve { archive, port } => commands::serve::run(archive, port).await,
        Command::Sites { command } => match command {
            SitesCommand::List => commands::sites::list(&overrides).await,
            SitesCommand::Show { site_id } => commands::sites::show(&overrides, site_id).await,
        },
        Command::Health => commands::sites::health(&overrides).await,
        Command::Configure => commands::configure::run(),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "studio", &mut io::stdout());
            Ok(())
        }
    }
}

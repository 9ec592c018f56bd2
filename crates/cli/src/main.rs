mod commands;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use sitekit_core::config::ExportMode;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitekit")]
#[command(version, about = "Export website-builder projects as static HTML sites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site directory
    Init {
        /// Path to the site directory (created if missing)
        path: PathBuf,

        /// Site name used in the header, title and archive name
        #[arg(long)]
        name: Option<String>,

        /// Contact email (enables the contact form)
        #[arg(long)]
        email: Option<String>,
    },

    /// Validate site.json and export.toml
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Manage the image cache
    Image {
        #[command(subcommand)]
        command: ImageCommand,
    },

    /// Export the site into a directory
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,

        /// Override the export mode from export.toml
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Export the site as a ZIP archive
    Export {
        /// Path to site directory
        path: PathBuf,

        /// Archive path (default: <path>/<output_name>.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the export mode from export.toml
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Preview site locally with hot reload
    Preview {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Override the export mode from export.toml
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
enum ImageCommand {
    /// Convert images and add them to the cache
    Add {
        /// Path to site directory
        path: PathBuf,

        /// Image files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List cached images
    List {
        /// Path to site directory
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Every section on index.html
    Single,
    /// One page per section
    Multi,
}

impl From<ModeArg> for ExportMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => ExportMode::Single,
            ModeArg::Multi => ExportMode::Multi,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init { path, name, email } => commands::init::run(path, name, email).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Image { command } => match command {
            ImageCommand::Add { path, files } => commands::image::add(path, files).await,
            ImageCommand::List { path } => commands::image::list(path).await,
        },
        Command::Build { path, output, mode } => {
            commands::build::run(path, output, mode.map(Into::into)).await
        }
        Command::Export { path, output, mode } => {
            commands::export::run(path, output, mode.map(Into::into)).await
        }
        Command::Preview { path, port, mode } => {
            commands::preview::run(path, port, mode.map(Into::into)).await
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sitekit", &mut io::stdout());
            Ok(())
        }
    }
}

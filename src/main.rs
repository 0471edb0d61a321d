//! CLI entry point for course-cms

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_cms::{BuildError, CourseCms};

#[derive(Parser)]
#[command(name = "course-cms")]
#[command(version)]
#[command(about = "Builds validated, ordered JSON trees from Markdown course content", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Absolute origin used to resolve local asset references
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the JSON course tree
    #[command(alias = "b")]
    Build {
        /// Output directory (overrides output_dir in _config.yml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate course content without writing output
    #[command(alias = "v")]
    Validate,

    /// Remove the output directory
    Clean,

    /// List courses and sections in build order
    List,

    /// Display version information
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "course_cms=debug,info"
    } else {
        "course_cms=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let cms = || -> Result<CourseCms> {
        let cms = CourseCms::new(&base_dir)?;
        match cli.origin.as_deref() {
            Some(origin) => cms.with_origin(origin),
            None => Ok(cms),
        }
    };

    match cli.command {
        Commands::Build { output } => {
            let mut cms = cms()?;
            if let Some(output) = output {
                cms = cms.with_output_dir(output);
            }
            tracing::info!("[Course] Building...");
            cms.build().await?;
            tracing::info!("[Course] Done.");
            println!("Built successfully!");
        }

        Commands::Validate => {
            let cms = cms()?;
            tracing::info!("[Course] Validating...");
            cms.validate().await?;
            tracing::info!("[Course] Done.");
            println!("Validated successfully!");
        }

        Commands::Clean => {
            let cms = cms()?;
            tracing::info!("Cleaning output folder...");
            cms.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let cms = cms()?;
            course_cms::commands::list::run(&cms).await?;
        }

        Commands::Version => {
            println!("course-cms version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Print a failure: content errors with the offending path, anything else generically
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<BuildError>() {
        Some(build_err) => {
            eprintln!("{}", build_err);
            if let Some(path) = build_err.path() {
                eprintln!("Path: {}", path.display());
            }
        }
        None => {
            eprintln!("An unexpected error occurred.");
            eprintln!("{:?}", err);
        }
    }
}

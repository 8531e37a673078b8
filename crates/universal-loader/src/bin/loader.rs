//! universal-loader command line
//!
//! Run with: cargo run -p universal-loader -- <PATH>...
//!
//! Prints every record as one JSON object per line.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use universal_loader::{
    LoaderConfig, MimeType, MimeTypeGuesser, ParserRegistry, Record, UniversalLoader,
};

#[derive(Parser)]
#[command(
    name = "universal-loader",
    version,
    about = "Load documents through MIME-type dispatch and print them as JSON lines"
)]
struct Cli {
    /// Files to load
    #[arg(required_unless_present = "list_mimetypes")]
    paths: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat every path as this MIME type instead of guessing it
    #[arg(short, long)]
    mime: Option<String>,

    /// List the registered MIME types and their parsers, then exit
    #[arg(long)]
    list_mimetypes: bool,

    /// Pretty-print each record
    #[arg(long)]
    pretty: bool,

    /// Continue with the next path after a failure
    #[arg(short, long)]
    keep_going: bool,
}

/// Guesser that ignores the path and always answers with one type
struct FixedMimeType(MimeType);

impl MimeTypeGuesser for FixedMimeType {
    fn guess(&self, _path: &Path) -> Option<MimeType> {
        Some(self.0.clone())
    }
}

#[derive(Serialize)]
struct Output<'a> {
    path: &'a Path,
    #[serde(flatten)]
    record: &'a Record,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LoaderConfig> {
    match path {
        Some(path) => LoaderConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => {
            let mut config = LoaderConfig::default();
            config.apply_env();
            config.validate()?;
            Ok(config)
        }
    }
}

fn load_one(cli: &Cli, config: &LoaderConfig, path: &Path) -> anyhow::Result<()> {
    let mut loader = UniversalLoader::with_config(path, config)?;
    if let Some(mime) = &cli.mime {
        loader = loader.with_guesser(Arc::new(FixedMimeType(MimeType::new(mime.as_str()))));
    }

    for record in loader.load()? {
        let output = Output { path, record: &record };
        let line = if cli.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        println!("{}", line);
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays valid JSON lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "universal_loader=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if cli.list_mimetypes {
        let registry = ParserRegistry::with_defaults(&config);
        for mimetype in registry.mimetypes() {
            if let Some(parser) = registry.lookup(mimetype.as_str()) {
                println!("{}\t{}", mimetype, parser.name());
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut failures = 0usize;
    for path in &cli.paths {
        if let Err(e) = load_one(&cli, &config, path) {
            if !cli.keep_going {
                return Err(e.context(format!("failed to load {}", path.display())));
            }
            tracing::error!(path = %path.display(), error = %format!("{:#}", e), "Failed to load file");
            failures += 1;
        }
    }

    if failures > 0 {
        tracing::warn!(failures, total = cli.paths.len(), "Finished with failures");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Snapbind — bind images into a PDF, a ZIP archive, or a base64 string.
//
// Entry point. Parses flags, resolves settings, initialises logging, and
// dispatches to a command. Every failure is reported to the user as a
// readable notice on stderr.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use snapbind_core::error::{Result as CoreResult, SnapbindError};
use snapbind_core::human_errors::humanize_error;
use snapbind_core::{AppConfig, PaperSize};

#[derive(Debug, Parser)]
#[command(name = "snapbind", version, about = "Bind images into a PDF, a ZIP archive, or a base64 string")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Paper size: a4, a3, a5, letter, legal, or WIDTHxHEIGHT in mm.
    #[arg(long, global = true)]
    paper: Option<String>,

    /// Margin on every side of the page, in points.
    #[arg(long, global = true)]
    margin: Option<f32>,

    /// Title stored in the PDF metadata.
    #[arg(long, global = true)]
    title: Option<String>,

    /// Read settings from a JSON file (never written back).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compose the images into a PDF, one page per image.
    Pdf {
        #[command(flatten)]
        inputs: Inputs,
        /// Output file (defaults to the configured PDF name).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Bundle the original image files into a ZIP archive.
    Zip {
        #[command(flatten)]
        inputs: Inputs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the composed PDF as base64 text.
    Base64 {
        #[command(flatten)]
        inputs: Inputs,
        /// Write the text to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show where each image lands on its page.
    Preview {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Write the PDF, the archive, and the base64 text together.
    Export {
        #[command(flatten)]
        inputs: Inputs,
        /// Directory receiving all three files.
        #[arg(short = 'd', long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the effective settings as JSON.
    Settings,
}

/// Images to stage: files, directories, or `-` for stdin.
#[derive(Debug, Args)]
struct Inputs {
    #[arg(required = true, value_name = "INPUT")]
    paths: Vec<PathBuf>,
}

impl Cli {
    /// Defaults, then the optional config file, then command line flags.
    fn resolve_config(&self) -> CoreResult<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(paper) = &self.paper {
            config.paper_size = PaperSize::parse(paper)
                .ok_or_else(|| SnapbindError::Config(format!("unknown paper size '{paper}'")))?;
        }
        if let Some(margin) = self.margin {
            config.margin_pt = margin;
        }
        if let Some(title) = &self.title {
            config.document_title = title.clone();
        }
        config.logging.level = logging::level_for_verbosity(self.verbose, &config.logging.level);
        config.logging.json |= self.log_json;

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", humanize_error(&err));
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.logging);
    tracing::debug!(?config, "Settings resolved");

    let cancel = commands::cancel_on_interrupt();
    let outcome = match cli.command {
        Command::Pdf { inputs, output } => {
            commands::pdf(&config, &inputs.paths, output, &cancel).await
        }
        Command::Zip { inputs, output } => {
            commands::zip(&config, &inputs.paths, output, &cancel).await
        }
        Command::Base64 { inputs, output } => {
            commands::base64(&config, &inputs.paths, output, &cancel).await
        }
        Command::Preview { inputs } => commands::preview(&config, &inputs.paths, &cancel).await,
        Command::Export { inputs, out_dir } => {
            commands::export(&config, &inputs.paths, out_dir, &cancel).await
        }
        Command::Settings => commands::settings(&config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Log the technical error and show the user a readable notice.
fn report(err: &anyhow::Error) {
    tracing::error!("Command failed: {err:#}");
    match err.downcast_ref::<SnapbindError>() {
        Some(known) => eprintln!("{}", humanize_error(known)),
        None => eprintln!("Something went wrong.\n{err:#}"),
    }
}

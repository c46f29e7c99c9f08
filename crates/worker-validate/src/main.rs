/*
 * SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gcp_worker::WorkerManifest;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

use crate::output::{ManifestResult, OutputFormat};

mod output;

const EXIT_VIOLATIONS: u8 = 1;
const EXIT_LOAD_FAILURE: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "worker-validate",
    about = "Validate the provider configuration of GCP worker pools",
    version
)]
struct Cli {
    /// Worker manifests (YAML or JSON) to validate
    #[arg(value_name = "MANIFEST", required = true)]
    manifests: Vec<PathBuf>,

    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "WORKER_VALIDATE_OUTPUT"
    )]
    output: OutputFormat,

    /// Log filter directive, e.g. `gcp_worker=debug`
    #[arg(long, default_value = "WARN", env = "WORKER_VALIDATE_LOG_LEVEL")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_level) {
        eprintln!("Error: {err:#}");
        return ExitCode::from(EXIT_LOAD_FAILURE);
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_VIOLATIONS),
        Err(err) => {
            tracing::error!(error = %err, "Validation aborted");
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_LOAD_FAILURE)
        }
    }
}

fn init_logging(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .parse(log_level)
        .with_context(|| format!("Invalid log level: {log_level}"))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

/// Returns whether every worker of every manifest is valid
fn run(cli: &Cli) -> Result<bool> {
    let mut results = Vec::with_capacity(cli.manifests.len());

    for path in &cli.manifests {
        tracing::info!(manifest = %path.display(), "Validating worker manifest");

        let manifest = WorkerManifest::from_path(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;

        results.push(ManifestResult {
            file: path.display().to_string(),
            reports: manifest.validate(),
        });
    }

    let mut stdout = std::io::stdout().lock();
    output::render(cli.output, &results, &mut stdout).context("Failed to write results")?;

    let violations = results
        .iter()
        .flat_map(|result| &result.reports)
        .map(|report| report.errors.len())
        .sum::<usize>();
    tracing::debug!(violations, "Validation finished");

    Ok(violations == 0)
}

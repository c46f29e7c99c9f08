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

use std::io::Write;

use clap::ValueEnum;
use field::ErrorList;
use gcp_worker::WorkerReport;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validation results of all workers found in one manifest file
#[derive(Debug)]
pub struct ManifestResult {
    pub file: String,
    pub reports: Vec<WorkerReport>,
}

impl ManifestResult {
    pub fn is_valid(&self) -> bool {
        self.reports.iter().all(WorkerReport::is_valid)
    }
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    file: &'a str,
    worker: &'a str,
    errors: &'a ErrorList,
}

pub fn render(
    format: OutputFormat,
    results: &[ManifestResult],
    out: &mut impl Write,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => render_text(results, out),
        OutputFormat::Json => render_json(results, out),
    }
}

fn render_text(results: &[ManifestResult], out: &mut impl Write) -> std::io::Result<()> {
    for result in results {
        if result.is_valid() {
            writeln!(out, "{}: ok", result.file)?;
            continue;
        }

        for report in result.reports.iter().filter(|r| !r.is_valid()) {
            writeln!(out, "{}: worker \"{}\"", result.file, report.worker)?;
            for error in &report.errors {
                writeln!(out, "  {error}")?;
            }
        }
    }
    Ok(())
}

fn render_json(results: &[ManifestResult], out: &mut impl Write) -> std::io::Result<()> {
    let entries = results
        .iter()
        .flat_map(|result| {
            result.reports.iter().map(|report| JsonEntry {
                file: &result.file,
                worker: &report.worker,
                errors: &report.errors,
            })
        })
        .collect::<Vec<_>>();

    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)
}

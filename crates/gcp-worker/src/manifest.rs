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

use std::path::Path;

use field::ErrorList;
use serde::{Deserialize, Serialize};

use crate::apis::{DataVolume, WorkerConfig};
use crate::validation::validate_worker_config;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid worker manifest: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("manifest does not declare any worker")]
    Empty,
}

/// A worker pool as it appears in a cluster specification
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Worker {
    pub name: String,
    pub provider_config: Option<WorkerConfig>,
    pub data_volumes: Vec<DataVolume>,
}

impl Worker {
    pub fn validate(&self) -> ErrorList {
        validate_worker_config(self.provider_config.as_ref(), &self.data_volumes)
    }
}

/// The validation outcome for one worker of a manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerReport {
    pub worker: String,
    pub errors: ErrorList,
}

impl WorkerReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// One or more workers loaded from a YAML or JSON document
///
/// The document either describes a single worker, or holds a `workers` list.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerManifest {
    pub workers: Vec<Worker>,
}

#[derive(Deserialize)]
struct WorkerList {
    workers: Vec<Worker>,
}

impl WorkerManifest {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ManifestError> {
        if raw.trim().is_empty() {
            return Err(ManifestError::Empty);
        }

        let document: serde_yaml::Value = serde_yaml::from_str(raw)?;
        let is_list = document
            .as_mapping()
            .is_some_and(|mapping| mapping.contains_key("workers"));

        let workers = if is_list {
            serde_yaml::from_value::<WorkerList>(document)?.workers
        } else if document.is_null() {
            Vec::new()
        } else {
            vec![serde_yaml::from_value::<Worker>(document)?]
        };

        if workers.is_empty() {
            return Err(ManifestError::Empty);
        }
        tracing::debug!(workers = workers.len(), "Loaded worker manifest");

        Ok(Self { workers })
    }

    /// Validates every worker, in manifest order
    ///
    /// Workers without a name are reported as `workers[<index>]`.
    pub fn validate(&self) -> Vec<WorkerReport> {
        self.workers
            .iter()
            .enumerate()
            .map(|(i, worker)| WorkerReport {
                worker: if worker.name.is_empty() {
                    format!("workers[{i}]")
                } else {
                    worker.name.clone()
                },
                errors: worker.validate(),
            })
            .collect()
    }
}

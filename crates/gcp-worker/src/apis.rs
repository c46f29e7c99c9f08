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

use serde::{Deserialize, Serialize};

/// Data volume type backed by local ephemeral SSDs
pub const VOLUME_TYPE_SCRATCH: &str = "SCRATCH";

/// Provider specific configuration of a GCP worker pool
///
/// Every block is optional. Absent blocks are not validated.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<Gpu>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<ServiceAccount>,
}

/// GPU accelerators attached to every machine of the pool
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gpu {
    pub accelerator_type: String,
    pub count: i32,
}

/// Settings for the boot and local SSD volumes of the pool's machines
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    /// Interface used to attach SCRATCH volumes. Kept as the raw string so
    /// unknown values can be reported instead of failing to decode.
    #[serde(rename = "interface", skip_serializing_if = "Option::is_none")]
    pub local_ssd_interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<DiskEncryption>,
}

/// Disk encryption with a customer managed key (CMEK)
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiskEncryption {
    /// Full resource name of the Cloud KMS key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_name: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceAccount {
    pub email: String,
    pub scopes: Vec<String>,
}

/// A data volume declared on the worker pool itself
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataVolume {
    pub name: String,
    /// `None` means the type was not set at all
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,
    #[serde(rename = "size")]
    pub volume_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
}

impl DataVolume {
    pub fn is_scratch(&self) -> bool {
        self.volume_type.as_deref() == Some(VOLUME_TYPE_SCRATCH)
    }
}

/// The interfaces local SSDs can be attached with
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::VariantNames,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LocalSsdInterface {
    Nvme,
    Scsi,
}

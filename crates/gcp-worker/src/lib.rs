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

pub mod apis;
pub mod manifest;
pub mod validation;

pub use apis::{
    DataVolume, DiskEncryption, Gpu, LocalSsdInterface, ServiceAccount, VOLUME_TYPE_SCRATCH,
    Volume, WorkerConfig,
};
pub use manifest::{ManifestError, Worker, WorkerManifest, WorkerReport};
pub use validation::validate_worker_config;

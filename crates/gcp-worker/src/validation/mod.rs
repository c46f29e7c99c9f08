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

//! Validation of GCP worker pool configuration
//!
//! Validators never fail. Every violation is reported as a
//! [`field::FieldError`] and all violations of one run are returned together,
//! leaving it to the caller to decide what to do with a non-empty list.

mod worker;

pub use worker::{
    validate_data_volume, validate_disk_encryption, validate_gpu, validate_service_account,
    validate_worker_config,
};

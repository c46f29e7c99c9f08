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

//! Building blocks for reporting validation failures of API objects.
//!
//! Validators walk an object and describe every violation they find as a
//! [`FieldError`] that points at the offending element through a [`Path`].
//! The violations of one validation run are collected into an [`ErrorList`],
//! which callers can either inspect item by item or turn into a single
//! [`AggregateError`].
//!
//! ```rust
//! use field::{ErrorList, FieldError, Path};
//!
//! let scopes = Path::new("serviceAccount").child("scopes");
//! let mut errors = ErrorList::new();
//! errors.push(FieldError::duplicate(scopes.index(1), "a"));
//!
//! assert_eq!(
//!     errors[0].to_string(),
//!     "serviceAccount.scopes[1]: Duplicate value: \"a\""
//! );
//! ```

mod error;
mod path;

pub use error::{AggregateError, ErrorList, ErrorType, FieldError};
pub use path::Path;

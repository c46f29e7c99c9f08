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

use std::fmt::Display;
use std::ops::Deref;

use serde::Serialize;
use serde_json::Value;

use crate::Path;

/// The kind of violation a [`FieldError`] describes
///
/// `Display` yields the human readable rendering used in error messages,
/// while the serialized form is the stable machine identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
pub enum ErrorType {
    /// A required value was not provided
    #[serde(rename = "FieldValueRequired")]
    #[strum(to_string = "Required value")]
    Required,
    /// The value is valid on its own but not permitted in this context
    #[serde(rename = "FieldValueForbidden")]
    #[strum(to_string = "Forbidden")]
    Forbidden,
    /// The value is malformed or conflicts with other fields
    #[serde(rename = "FieldValueInvalid")]
    #[strum(to_string = "Invalid value")]
    Invalid,
    /// The value is not one of a fixed set of supported values
    #[serde(rename = "FieldValueNotSupported")]
    #[strum(to_string = "Unsupported value")]
    NotSupported,
    /// The value repeats an earlier entry of a list that must be unique
    #[serde(rename = "FieldValueDuplicate")]
    #[strum(to_string = "Duplicate value")]
    Duplicate,
}

/// A single validation failure, anchored at the field that caused it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: Path,
    #[serde(rename = "type")]
    pub kind: ErrorType,
    /// The offending value. Not recorded for `Required` and `Forbidden`.
    #[serde(rename = "value", skip_serializing_if = "Option::is_none")]
    pub bad_value: Option<Value>,
    pub detail: String,
}

impl FieldError {
    pub fn required(field: Path, detail: impl Into<String>) -> Self {
        Self {
            field,
            kind: ErrorType::Required,
            bad_value: None,
            detail: detail.into(),
        }
    }

    pub fn forbidden(field: Path, detail: impl Into<String>) -> Self {
        Self {
            field,
            kind: ErrorType::Forbidden,
            bad_value: None,
            detail: detail.into(),
        }
    }

    pub fn invalid(field: Path, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self {
            field,
            kind: ErrorType::Invalid,
            bad_value: Some(value.into()),
            detail: detail.into(),
        }
    }

    /// Reports `value` as not being one of `valid_values`
    ///
    /// The supported values are listed in the detail in the order they are
    /// passed in.
    pub fn not_supported<S: AsRef<str>>(
        field: Path,
        value: impl Into<Value>,
        valid_values: &[S],
    ) -> Self {
        let quoted = valid_values
            .iter()
            .map(|v| Value::from(v.as_ref()).to_string())
            .collect::<Vec<_>>();

        Self {
            field,
            kind: ErrorType::NotSupported,
            bad_value: Some(value.into()),
            detail: if quoted.is_empty() {
                String::new()
            } else {
                format!("supported values: {}", quoted.join(", "))
            },
        }
    }

    pub fn duplicate(field: Path, value: impl Into<Value>) -> Self {
        Self {
            field,
            kind: ErrorType::Duplicate,
            bad_value: Some(value.into()),
            detail: String::new(),
        }
    }

    /// The error message without the leading field path
    pub fn message(&self) -> String {
        let mut message = self.kind.to_string();
        if let Some(value) = &self.bad_value {
            // JSON rendering quotes strings and keeps objects on one line
            message.push_str(": ");
            message.push_str(&value.to_string());
        }
        if !self.detail.is_empty() {
            message.push_str(": ");
            message.push_str(&self.detail);
        }
        message
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message())
    }
}

/// The ordered outcome of a validation run. An empty list means "valid".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorList(Vec<FieldError>);

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Moves all errors of `other` to the end of this list, keeping their order
    pub fn append(&mut self, mut other: ErrorList) {
        self.0.append(&mut other.0);
    }

    /// Returns the errors of the given kinds, in their original order
    pub fn filter_by_kind(&self, kinds: &[ErrorType]) -> ErrorList {
        self.0
            .iter()
            .filter(|error| kinds.contains(&error.kind))
            .cloned()
            .collect()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }

    /// Converts the list into `Ok(())` if it is empty and into a single
    /// [`AggregateError`] otherwise
    pub fn into_result(self) -> Result<(), AggregateError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AggregateError(self))
        }
    }
}

impl Deref for ErrorList {
    type Target = [FieldError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<FieldError>> for ErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<FieldError> for ErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FieldError> for ErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A non-empty [`ErrorList`] wrapped up as a single error value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", render_aggregate(.0))]
pub struct AggregateError(ErrorList);

impl AggregateError {
    pub fn errors(&self) -> &ErrorList {
        &self.0
    }

    pub fn into_errors(self) -> ErrorList {
        self.0
    }
}

fn render_aggregate(errors: &ErrorList) -> String {
    match errors.len() {
        1 => errors[0].to_string(),
        _ => format!(
            "[{}]",
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

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

use std::fmt::{Display, Write};

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Locates a single (possibly nested) field inside an API object
///
/// A `Path` is never modified in place. [`Path::child`], [`Path::index`] and
/// [`Path::key`] all return a new path that extends the current one, so a
/// parent path can be shared between any number of derived locators.
///
/// Paths render the way API clients expect them: field names are joined with
/// `.`, list indices and map keys are appended in brackets, e.g.
/// `providerConfig.serviceAccount.scopes[1]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a path that consists of a single root field
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Field(root.into())],
        }
    }

    /// Returns a new path addressing the field `name` below this one
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.extended(Segment::Field(name.into()))
    }

    /// Returns a new path addressing the list entry at `index`
    pub fn index(&self, index: usize) -> Self {
        self.extended(Segment::Index(index))
    }

    /// Returns a new path addressing the map entry at `key`
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.extended(Segment::Key(key.into()))
    }

    fn extended(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (pos, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if pos > 0 {
                        f.write_char('.')?;
                    }
                    f.write_str(name)?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[{key}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

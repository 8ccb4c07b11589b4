// Dweve BSL Context - 1C:Enterprise Platform API Context
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for HBK ingestion.
//!
//! All variants are fatal for ingestion. Per-page parse failures are not
//! errors: they are collected as warnings in the ingest report.

use thiserror::Error;

/// A fatal HBK ingestion failure.
#[derive(Debug, Error)]
pub enum HbkError {
    /// Structural failure of the container: truncated header, broken page
    /// chain, missing declared region, undecodable stream.
    #[error("corrupt container: {0}")]
    CorruptContainer(String),

    /// The file is not an HBK container this reader understands.
    #[error("unsupported container format: {0}")]
    UnsupportedFormat(String),

    /// Bracket or token violation in the table of contents.
    #[error("malformed toc at offset {offset}: {message}")]
    MalformedToc { message: String, offset: usize },

    /// I/O failure reading the container file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl HbkError {
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::CorruptContainer(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat(message.into())
    }

    pub fn toc(message: impl Into<String>, offset: usize) -> Self {
        Self::MalformedToc {
            message: message.into(),
            offset,
        }
    }
}

/// Result type for HBK operations.
pub type HbkResult<T> = Result<T, HbkError>;

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

//! Error types for catalog queries.

use thiserror::Error;

/// An error produced while answering a lookup query.
///
/// Both variants are recoverable by the caller: `InvalidQuery` signals bad
/// input, `NotFound` signals semantic absence of the requested definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// Empty or whitespace-only query, or a non-positive result limit.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The requested definition does not exist in the catalog.
    #[error("not found: {0}")]
    NotFound(String),
}

impl QueryError {
    /// Invalid-query constructor.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// Not-found constructor.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

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

//! Core data model and search engine for the 1C:Enterprise platform API
//! reference.
//!
//! This crate holds everything that is independent of where the reference
//! came from: the definition records, the read-only catalog, the two name
//! indexes, and the strategy cascade answering fuzzy bilingual queries.
//! Ingestion front-ends (`bslctx-hbk`, `bslctx-json`) produce a
//! `Vec<Definition>`; [`Catalog::build`] plus [`SearchService::new`] turn
//! it into a queryable snapshot.

mod catalog;
mod error;
mod index;
mod model;
mod search;
pub mod strategy;
mod tokenize;

pub use catalog::{Catalog, DefId, TypeMembers};
pub use error::{QueryError, QueryResult};
pub use index::{HashIndex, SearchIndex, StartWithIndex, MIN_PREFIX_LEN};
pub use model::{
    ApiKind, ConstructorDef, DefBody, DefHeader, Definition, MethodDef, Parameter, PropertyDef,
    Signature, TypeDef,
};
pub use search::{SearchOptions, SearchService, DEFAULT_LIMIT};
pub use strategy::Language;
pub use tokenize::{fold_key, tokenize};

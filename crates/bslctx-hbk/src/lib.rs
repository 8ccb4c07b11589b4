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

//! HBK help container ingestion.
//!
//! Reads the proprietary help container shipped with the 1C:Enterprise
//! platform (the syntax helper), decodes its table of contents and HTML
//! pages, and produces the definition records consumed by `bslctx-core`.
//!
//! Both container dialects are accepted: the legacy single-block layout
//! and the modern (8.3.27+) multi-page layout with quoted TOC codes and
//! `V8SH_*` page markup.

mod container;
mod error;
mod html;
mod ingest;
mod pages;
mod toc;

pub use container::{decode_text, Container, FILE_STORAGE, MAGIC, NO_NEXT_PAGE, PACK_BLOCK};
pub use error::{HbkError, HbkResult};
pub use ingest::{ingest_bytes, ingest_container, ingest_path, IngestReport, PageWarning};
pub use pages::{
    parse_constructor_page, parse_method_page, parse_property_page, parse_type_page, PageError,
    TypePage,
};
pub use toc::{parse_toc, TocDialect, TocNode, TocNodeType, MAX_TOC_DEPTH};

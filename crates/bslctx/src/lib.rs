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

//! 1C:Enterprise platform API reference as a searchable context service.
//!
//! This facade ties the pieces together: pick an ingestion source
//! ([`SourceConfig`]), hand it to a [`HelpProvider`], and query the lazily
//! built [`HelpContext`] from any number of threads.
//!
//! ```no_run
//! use bslctx::{HelpProvider, SourceConfig};
//! use bslctx::core::SearchOptions;
//! use std::path::PathBuf;
//!
//! let provider = HelpProvider::new(SourceConfig::HbkFile(PathBuf::from(
//!     "/opt/1cv8/8.3.27.1508/shcntx_ru.hbk",
//! )));
//! let context = provider.context().expect("ingestion");
//! let results = context
//!     .service
//!     .search("ТаблицаЗначений.Добавить", &SearchOptions::default())
//!     .expect("valid query");
//! ```

mod discovery;
mod provider;

pub use discovery::{discover_versions, select_version, PlatformVersion};
pub use provider::{
    HelpContext, HelpProvider, IngestError, ResolvedSource, SourceConfig, CONTAINER_FILE,
    JSON_EXPORT_DIR,
};

/// Re-export of the core model and search types.
pub use bslctx_core as core;
/// Re-export of the HBK ingestion crate.
pub use bslctx_hbk as hbk;
/// Re-export of the JSON ingestion crate.
pub use bslctx_json as json;

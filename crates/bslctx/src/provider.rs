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

//! Lazily bootstrapped help context.
//!
//! The catalog and indexes are built on first use, not at startup.
//! Concurrent first callers block on a one-shot cell until the single
//! build finishes; afterwards every query reads the published immutable
//! snapshot without locking. A failed build is sticky: the stored error
//! surfaces to the first query and to every later one, and ingestion is
//! not retried.

use crate::discovery::{select_version, PlatformVersion};
use bslctx_core::{Catalog, SearchService};
use bslctx_hbk::{HbkError, PageWarning};
use bslctx_json::JsonLoadError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::{info, warn};

/// Conventional container file name inside a version directory.
pub const CONTAINER_FILE: &str = "shcntx_ru.hbk";

/// Conventional JSON export directory inside a version directory.
pub const JSON_EXPORT_DIR: &str = "json";

/// A fatal ingestion failure, stored once and surfaced to every query.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("hbk ingestion failed: {0}")]
    Hbk(#[from] HbkError),

    #[error("json ingestion failed: {0}")]
    Json(#[from] JsonLoadError),

    /// No usable source at the configured location.
    #[error("no ingestion source found at {}", .0.display())]
    SourceNotFound(PathBuf),
}

/// Where the catalog comes from.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// A concrete HBK container file.
    HbkFile(PathBuf),
    /// A directory of pre-exported JSON files.
    JsonDir(PathBuf),
    /// A platform root holding `N.N.N.N` version subdirectories; the
    /// version is discovered, then the directory is probed for a JSON
    /// export first and the help container second.
    PlatformRoot {
        root: PathBuf,
        version: Option<PlatformVersion>,
    },
}

/// The concrete source a configuration resolved to.
#[derive(Debug, Clone)]
pub enum ResolvedSource {
    Hbk(PathBuf),
    Json(PathBuf),
}

impl ResolvedSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Hbk(path) | Self::Json(path) => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hbk(_) => "hbk",
            Self::Json(_) => "json",
        }
    }
}

impl SourceConfig {
    /// Resolve the configuration to a concrete ingestion source.
    pub fn resolve(&self) -> Result<ResolvedSource, IngestError> {
        match self {
            Self::HbkFile(path) => {
                if path.is_file() {
                    Ok(ResolvedSource::Hbk(path.clone()))
                } else {
                    Err(IngestError::SourceNotFound(path.clone()))
                }
            }
            Self::JsonDir(path) => {
                if path.is_dir() {
                    Ok(ResolvedSource::Json(path.clone()))
                } else {
                    Err(IngestError::SourceNotFound(path.clone()))
                }
            }
            Self::PlatformRoot { root, version } => {
                let (selected, dir) = select_version(root, *version)
                    .ok_or_else(|| IngestError::SourceNotFound(root.clone()))?;
                info!(version = %selected, dir = %dir.display(), "platform version resolved");
                let json_dir = dir.join(JSON_EXPORT_DIR);
                if json_dir.is_dir() {
                    return Ok(ResolvedSource::Json(json_dir));
                }
                let container = dir.join(CONTAINER_FILE);
                if container.is_file() {
                    return Ok(ResolvedSource::Hbk(container));
                }
                Err(IngestError::SourceNotFound(dir))
            }
        }
    }
}

/// The published read-only snapshot: search service plus provenance.
#[derive(Debug)]
pub struct HelpContext {
    pub service: SearchService,
    pub source: ResolvedSource,
    pub warnings: Vec<PageWarning>,
}

/// One catalog per process, built on first query.
#[derive(Debug)]
pub struct HelpProvider {
    config: SourceConfig,
    cell: OnceLock<Result<Arc<HelpContext>, Arc<IngestError>>>,
}

impl HelpProvider {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            cell: OnceLock::new(),
        }
    }

    /// The published context, building it on first call.
    ///
    /// Blocking: the first caller runs ingestion (file I/O, decompression,
    /// HTML parsing); concurrent first callers wait for it. The stored
    /// result, success or failure, is what every subsequent caller sees.
    pub fn context(&self) -> Result<Arc<HelpContext>, Arc<IngestError>> {
        self.cell
            .get_or_init(|| match self.build() {
                Ok(context) => Ok(Arc::new(context)),
                Err(e) => {
                    warn!(error = %e, "ingestion failed; error is sticky");
                    Err(Arc::new(e))
                }
            })
            .clone()
    }

    /// Whether the context has been built (successfully or not).
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    fn build(&self) -> Result<HelpContext, IngestError> {
        let source = self.config.resolve()?;
        let (definitions, warnings) = match &source {
            ResolvedSource::Hbk(path) => {
                let report = bslctx_hbk::ingest_path(path)?;
                (report.definitions, report.warnings)
            }
            ResolvedSource::Json(dir) => (bslctx_json::load_dir(dir)?, Vec::new()),
        };
        let catalog = Catalog::build(definitions);
        info!(
            definitions = catalog.len(),
            warnings = warnings.len(),
            source = source.kind(),
            "help context ready"
        );
        Ok(HelpContext {
            service: SearchService::new(catalog),
            source,
            warnings,
        })
    }
}

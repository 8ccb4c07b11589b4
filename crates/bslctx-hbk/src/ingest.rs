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

//! HBK ingestion driver: container → TOC → pages → definitions.
//!
//! Container and TOC failures abort ingestion. A page that is missing from
//! the archive or fails to parse is recorded as a warning and skipped; its
//! definition is simply absent from the result.

use crate::container::Container;
use crate::error::HbkResult;
use crate::pages::{
    parse_constructor_page, parse_method_page, parse_property_page, parse_type_page,
    split_bilingual,
};
use crate::toc::{parse_toc, TocDialect, TocNode, TocNodeType};
use bslctx_core::Definition;
use std::path::Path;
use tracing::{info, warn};

/// A non-fatal ingestion incident tied to one page.
#[derive(Debug, Clone)]
pub struct PageWarning {
    pub page_path: String,
    pub message: String,
}

/// Everything one container ingestion produced.
#[derive(Debug)]
pub struct IngestReport {
    pub definitions: Vec<Definition>,
    pub warnings: Vec<PageWarning>,
    pub dialect: TocDialect,
}

/// Ingest a container file from disk.
pub fn ingest_path(path: &Path) -> HbkResult<IngestReport> {
    let container = Container::open(path)?;
    ingest_container(&container)
}

/// Ingest a container from raw bytes.
pub fn ingest_bytes(bytes: &[u8]) -> HbkResult<IngestReport> {
    let container = Container::from_bytes(bytes)?;
    ingest_container(&container)
}

/// Walk the TOC of an opened container and parse every referenced page.
pub fn ingest_container(container: &Container) -> HbkResult<IngestReport> {
    let (dialect, root) = parse_toc(container.toc_source())?;
    let mut report = IngestReport {
        definitions: Vec::new(),
        warnings: Vec::new(),
        dialect,
    };
    collect(container, &root, None, &mut report);
    info!(
        definitions = report.definitions.len(),
        warnings = report.warnings.len(),
        dialect = ?report.dialect,
        "hbk ingestion complete"
    );
    Ok(report)
}

fn collect(
    container: &Container,
    node: &TocNode,
    owner: Option<&str>,
    report: &mut IngestReport,
) {
    for child in &node.children {
        match child.node_type {
            TocNodeType::Root | TocNodeType::Section => {
                collect(container, child, owner, report);
            }
            TocNodeType::Type => {
                // The parsed Russian name is the canonical owner for member
                // pages; fall back to the TOC title when the page is lost.
                let mut type_name = split_bilingual(&child.title).0;
                if let Some(html) = load_page(container, child, report) {
                    match parse_type_page(&html) {
                        Ok(page) => {
                            type_name = page.type_def.name_ru().to_string();
                            report.definitions.push(page.type_def);
                            report.definitions.extend(page.value_properties);
                        }
                        Err(e) => skip(child, e.to_string(), report),
                    }
                }
                collect(container, child, Some(type_name.as_str()), report);
            }
            TocNodeType::Method => {
                if let Some(html) = load_page(container, child, report) {
                    match parse_method_page(&html, owner) {
                        Ok(def) => report.definitions.push(def),
                        Err(e) => skip(child, e.to_string(), report),
                    }
                }
            }
            TocNodeType::Property => {
                if let Some(html) = load_page(container, child, report) {
                    match parse_property_page(&html, owner) {
                        Ok(def) => report.definitions.push(def),
                        Err(e) => skip(child, e.to_string(), report),
                    }
                }
            }
            TocNodeType::Constructor => {
                let Some(owner) = owner else {
                    skip(child, "constructor outside a type".to_string(), report);
                    continue;
                };
                if let Some(html) = load_page(container, child, report) {
                    match parse_constructor_page(&html, owner) {
                        Ok(def) => report.definitions.push(def),
                        Err(e) => skip(child, e.to_string(), report),
                    }
                }
            }
        }
    }
}

fn load_page(container: &Container, node: &TocNode, report: &mut IngestReport) -> Option<String> {
    let path = node.page_path.as_deref()?;
    match container.page_text(path) {
        Some(text) => Some(text),
        None => {
            skip(node, "page missing from archive".to_string(), report);
            None
        }
    }
}

fn skip(node: &TocNode, message: String, report: &mut IngestReport) {
    let page_path = node.page_path.clone().unwrap_or_default();
    warn!(page = page_path.as_str(), title = node.title.as_str(), %message, "page skipped");
    report.warnings.push(PageWarning { page_path, message });
}

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

//! Shared test fixtures for the ingestion crates.
//!
//! The container builder emits HBK bytes with the exact layout the reader
//! accepts, so reader and writer semantics are exercised together. The
//! `pages` and `toc` modules generate syntax-helper HTML and bracket TOC
//! text in both container dialects, and `sample` assembles two complete
//! containers describing the same miniature catalog.
//!
//! This crate is test support: it panics on I/O failures instead of
//! returning errors.

pub mod container;
pub mod pages;
pub mod sample;
pub mod toc;

/// Encode text as BOM-prefixed UTF-16LE, the way page files are stored.
pub fn utf16le_bytes(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

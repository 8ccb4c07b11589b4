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

//! HBK container byte writer for tests.

use crate::utf16le_bytes;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Cursor, Write};
use zip::write::FileOptions;

const MAGIC: [u8; 4] = [0x1C, b'H', b'B', b'K'];
const NO_NEXT_PAGE: u32 = 0xFFFF_FFFF;

/// Builds an HBK container byte stream.
///
/// Blocks are laid out as: PackBlock pages, FileStorage pages, then the
/// root directory, with the file header pointing at the directory. A small
/// `page_size` forces multi-page chains, the modern on-disk shape; the
/// default single-page layout matches legacy containers.
pub struct ContainerBuilder {
    page_size: usize,
    toc: String,
    pages: Vec<(String, Vec<u8>)>,
    include_storage: bool,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            page_size: 4096,
            toc: String::new(),
            pages: Vec::new(),
            include_storage: true,
        }
    }

    /// Payload capacity per block page.
    pub fn page_size(mut self, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        self.page_size = page_size;
        self
    }

    /// Bracket-format TOC text.
    pub fn toc(mut self, toc: &str) -> Self {
        self.toc = toc.to_string();
        self
    }

    /// Add a page stored as UTF-8.
    pub fn page(mut self, path: &str, html: &str) -> Self {
        self.pages.push((path.to_string(), html.as_bytes().to_vec()));
        self
    }

    /// Add a page stored as BOM-prefixed UTF-16LE, the production encoding.
    pub fn page_utf16(mut self, path: &str, html: &str) -> Self {
        self.pages.push((path.to_string(), utf16le_bytes(html)));
        self
    }

    /// Omit the FileStorage region to produce a corrupt container.
    pub fn skip_storage(mut self) -> Self {
        self.include_storage = false;
        self
    }

    /// Assemble the container bytes.
    pub fn build(self) -> Vec<u8> {
        let mut buf = vec![0u8; 16];
        buf[0..4].copy_from_slice(&MAGIC);
        buf[4..8].copy_from_slice(&(self.page_size as u32).to_le_bytes());

        let pack_addr = write_stream(&mut buf, &deflate(self.toc.as_bytes()), self.page_size);

        let mut regions: Vec<(&str, u32)> = vec![("PackBlock", pack_addr)];
        if self.include_storage {
            let archive = zip_pages(&self.pages);
            let storage_addr = write_stream(&mut buf, &deflate(&archive), self.page_size);
            regions.push(("FileStorage", storage_addr));
        }

        let mut directory = Vec::new();
        directory.extend_from_slice(&(regions.len() as u32).to_le_bytes());
        for (name, addr) in &regions {
            directory.extend_from_slice(&addr.to_le_bytes());
            let units: Vec<u16> = name.encode_utf16().collect();
            directory.extend_from_slice(&(units.len() as u32).to_le_bytes());
            // Region names are stored without a BOM.
            for unit in units {
                directory.extend_from_slice(&unit.to_le_bytes());
            }
        }
        let root_addr = write_stream(&mut buf, &directory, self.page_size);
        buf[8..12].copy_from_slice(&root_addr.to_le_bytes());

        buf
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a logical stream as a chain of pages, returning its address.
fn write_stream(buf: &mut Vec<u8>, data: &[u8], page_size: usize) -> u32 {
    let start = buf.len() as u32;
    let total = data.len();
    let page_count = usize::max(1, (total + page_size - 1) / page_size);
    let mut offset = 0;
    for i in 0..page_count {
        let take = usize::min(page_size, total - offset);
        let data_size = if i == 0 { total } else { 0 };
        let next = if i + 1 == page_count {
            NO_NEXT_PAGE
        } else {
            (buf.len() + 12 + take) as u32
        };
        buf.extend_from_slice(&(data_size as u32).to_le_bytes());
        buf.extend_from_slice(&(page_size as u32).to_le_bytes());
        buf.extend_from_slice(&next.to_le_bytes());
        buf.extend_from_slice(&data[offset..offset + take]);
        offset += take;
    }
    start
}

fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("deflate write");
    encoder.finish().expect("deflate finish")
}

fn zip_pages(pages: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in pages {
        writer
            .start_file(path.as_str(), FileOptions::default())
            .expect("zip start_file");
        writer.write_all(content).expect("zip write");
    }
    writer.finish().expect("zip finish").into_inner()
}

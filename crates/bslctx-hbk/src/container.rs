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

//! HBK container reader.
//!
//! An HBK file is a 16-byte header followed by blocks. A block is a 12-byte
//! header plus a payload page; large streams are chained across pages via
//! `next_page_addr` (legacy containers write single-page streams, modern
//! ones chain). The root directory block names the two logical regions:
//!
//! - `PackBlock`: deflate stream holding the bracket-format TOC text;
//! - `FileStorage`: deflate stream holding a ZIP archive of HTML pages.
//!
//! Page HTML is UTF-16LE (BOM-prefixed) or UTF-8.

use crate::error::{HbkError, HbkResult};
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

/// Container magic: 0x1C, "HBK".
pub const MAGIC: [u8; 4] = [0x1C, b'H', b'B', b'K'];

/// Chain terminator in a block header.
pub const NO_NEXT_PAGE: u32 = 0xFFFF_FFFF;

/// Fixed file header size: magic, page size, root directory address, reserved.
pub const HEADER_LEN: usize = 16;

/// Block header size: data size, page capacity, next page address.
pub const BLOCK_HEADER_LEN: usize = 12;

/// Region name of the compressed TOC stream.
pub const PACK_BLOCK: &str = "PackBlock";

/// Region name of the compressed page archive.
pub const FILE_STORAGE: &str = "FileStorage";

/// An opened HBK container: decoded TOC text plus the page archive.
#[derive(Debug)]
pub struct Container {
    toc_source: String,
    pages: HashMap<String, Vec<u8>>,
}

impl Container {
    /// Read and decode a container file.
    pub fn open(path: &Path) -> HbkResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decode a container from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> HbkResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(HbkError::corrupt("truncated file header"));
        }
        if bytes[0..4] != MAGIC {
            return Err(HbkError::unsupported(format!(
                "unknown container magic {:02x?}",
                &bytes[0..4]
            )));
        }
        let root_addr = read_u32(bytes, 8);

        let root = read_stream(bytes, root_addr)?;
        let regions = parse_region_table(&root)?;
        let pack_addr = *regions
            .get(PACK_BLOCK)
            .ok_or_else(|| HbkError::corrupt("missing PackBlock region"))?;
        let storage_addr = *regions
            .get(FILE_STORAGE)
            .ok_or_else(|| HbkError::corrupt("missing FileStorage region"))?;

        let toc_bytes = inflate(&read_stream(bytes, pack_addr)?)?;
        let toc_source = decode_text(&toc_bytes);

        let storage_bytes = inflate(&read_stream(bytes, storage_addr)?)?;
        let pages = read_archive(&storage_bytes)?;
        debug!(pages = pages.len(), "container opened");

        Ok(Self { toc_source, pages })
    }

    /// The decompressed bracket-format TOC text.
    pub fn toc_source(&self) -> &str {
        &self.toc_source
    }

    /// Raw bytes of the page a TOC entry addresses.
    ///
    /// TOC paths carry a leading `/`; archive entries do not.
    pub fn page_bytes(&self, toc_path: &str) -> Option<&[u8]> {
        let key = toc_path.strip_prefix('/').unwrap_or(toc_path);
        self.pages.get(key).map(Vec::as_slice)
    }

    /// Decoded text of the page a TOC entry addresses.
    pub fn page_text(&self, toc_path: &str) -> Option<String> {
        self.page_bytes(toc_path).map(decode_text)
    }

    /// Number of archive entries.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

fn read_u32_checked(bytes: &[u8], offset: usize) -> HbkResult<u32> {
    if offset + 4 > bytes.len() {
        return Err(HbkError::corrupt(format!(
            "read past end of container at offset {}",
            offset
        )));
    }
    Ok(read_u32(bytes, offset))
}

/// Collect a logical stream by following a block chain.
///
/// The first page's `data_size` is the total; each page contributes at most
/// `page_capacity` bytes. A chain that terminates before the total is
/// collected, points outside the file, or loops, is corrupt.
fn read_stream(bytes: &[u8], addr: u32) -> HbkResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut addr = addr as usize;
    let mut total: Option<usize> = None;
    let mut visited = HashSet::new();

    loop {
        if !visited.insert(addr) {
            return Err(HbkError::corrupt(format!(
                "page chain loops back to offset {}",
                addr
            )));
        }
        if addr + BLOCK_HEADER_LEN > bytes.len() {
            return Err(HbkError::corrupt(format!(
                "block header at offset {} past end of container",
                addr
            )));
        }
        let data_size = read_u32(bytes, addr) as usize;
        let page_capacity = read_u32(bytes, addr + 4) as usize;
        let next = read_u32(bytes, addr + 8);

        let want = match total {
            Some(t) => t,
            None => {
                total = Some(data_size);
                data_size
            }
        };
        let take = page_capacity.min(want - out.len());
        let payload_start = addr + BLOCK_HEADER_LEN;
        if payload_start + take > bytes.len() {
            return Err(HbkError::corrupt(format!(
                "block payload at offset {} past end of container",
                payload_start
            )));
        }
        out.extend_from_slice(&bytes[payload_start..payload_start + take]);

        if out.len() == want {
            return Ok(out);
        }
        if next == NO_NEXT_PAGE {
            return Err(HbkError::corrupt(format!(
                "page chain ended with {} of {} bytes",
                out.len(),
                want
            )));
        }
        addr = next as usize;
    }
}

/// Decode the root directory: region name → block address.
fn parse_region_table(payload: &[u8]) -> HbkResult<HashMap<String, u32>> {
    let count = read_u32_checked(payload, 0)? as usize;
    let mut regions = HashMap::new();
    let mut offset = 4;
    for _ in 0..count {
        let addr = read_u32_checked(payload, offset)?;
        let name_len = read_u32_checked(payload, offset + 4)? as usize;
        offset += 8;
        let byte_len = name_len * 2;
        if offset + byte_len > payload.len() {
            return Err(HbkError::corrupt("region name past end of directory"));
        }
        let units: Vec<u16> = payload[offset..offset + byte_len]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let name = String::from_utf16(&units)
            .map_err(|_| HbkError::corrupt("region name is not valid UTF-16"))?;
        offset += byte_len;
        regions.insert(name, addr);
    }
    Ok(regions)
}

/// Inflate a raw-deflate region stream.
fn inflate(compressed: &[u8]) -> HbkResult<Vec<u8>> {
    let mut decoder = flate2::read::DeflateDecoder::new(compressed);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| HbkError::corrupt(format!("deflate stream: {}", e)))?;
    Ok(out)
}

/// Unpack the FileStorage ZIP archive into path-keyed page bytes.
fn read_archive(bytes: &[u8]) -> HbkResult<HashMap<String, Vec<u8>>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| HbkError::corrupt(format!("page archive: {}", e)))?;
    let mut pages = HashMap::new();
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| HbkError::corrupt(format!("page archive entry {}: {}", i, e)))?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| HbkError::corrupt(format!("page archive entry '{}': {}", name, e)))?;
        pages.insert(name, content);
    }
    Ok(pages)
}

/// Decode page bytes: UTF-16LE behind a BOM, UTF-8 otherwise.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _, _) = if bytes.starts_with(&[0xFF, 0xFE]) {
        encoding_rs::UTF_16LE.decode(bytes)
    } else {
        encoding_rs::UTF_8.decode(bytes)
    };
    text.into_owned()
}

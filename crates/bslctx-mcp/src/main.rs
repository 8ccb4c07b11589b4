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

//! BSL Context MCP Server binary.
//!
//! # Usage
//!
//! ```bash
//! # Serve a concrete help container
//! bslctx-mcp --hbk /opt/1cv8/8.3.27.1508/shcntx_ru.hbk
//!
//! # Serve a pre-exported JSON directory
//! bslctx-mcp --json-dir /data/platform-export
//!
//! # Discover the newest installed version under a platform root
//! bslctx-mcp --platform-root /opt/1cv8
//!
//! # Pin a version (the numerically closest installed one is used)
//! bslctx-mcp --platform-root /opt/1cv8 --platform-version 8.3.24.0
//!
//! # Debug logging goes to stderr; stdout carries only JSON-RPC
//! RUST_LOG=debug bslctx-mcp --platform-root /opt/1cv8
//! ```

use bslctx::{PlatformVersion, SourceConfig};
use bslctx_mcp::{McpServer, McpServerConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bslctx-mcp")]
#[command(author = "Dweve B.V.")]
#[command(version)]
#[command(about = "MCP server exposing the 1C:Enterprise platform API reference")]
struct Cli {
    /// Path to an HBK help container (shcntx_ru.hbk)
    #[arg(long, conflicts_with_all = ["json_dir", "platform_root"])]
    hbk: Option<PathBuf>,

    /// Directory with pre-exported JSON files
    #[arg(long, conflicts_with = "platform_root")]
    json_dir: Option<PathBuf>,

    /// Platform root containing N.N.N.N version subdirectories
    #[arg(long)]
    platform_root: Option<PathBuf>,

    /// Requested platform version, e.g. 8.3.27.1508
    #[arg(long, requires = "platform_root")]
    platform_version: Option<PlatformVersion>,

    /// Use the synchronous stdio loop instead of the async runtime
    #[arg(long)]
    sync: bool,
}

impl Cli {
    fn source(&self) -> SourceConfig {
        if let Some(hbk) = &self.hbk {
            SourceConfig::HbkFile(hbk.clone())
        } else if let Some(dir) = &self.json_dir {
            SourceConfig::JsonDir(dir.clone())
        } else if let Some(root) = &self.platform_root {
            SourceConfig::PlatformRoot {
                root: root.clone(),
                version: self.platform_version,
            }
        } else {
            // Default: discover under the conventional install location.
            SourceConfig::PlatformRoot {
                root: PathBuf::from("/opt/1cv8"),
                version: None,
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so stdout stays clean for JSON-RPC.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bslctx_mcp=info".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut server = McpServer::new(McpServerConfig::new(cli.source()));

    if cli.sync {
        server.run_stdio()?;
    } else {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async { server.run_stdio_async().await })?;
    }

    Ok(())
}

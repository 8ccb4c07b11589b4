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

//! MCP Server implementation.
//!
//! JSON-RPC 2.0 over stdio, one request per line. The catalog is not
//! loaded at startup: the first `tools/call` triggers ingestion through
//! the lazy provider, so a client can complete the handshake instantly
//! even against a cold multi-megabyte container.

use crate::error::McpResult;
use crate::protocol::*;
use crate::tools::{execute_tool, get_tools};
use crate::{SERVER_NAME, VERSION};
use bslctx::{HelpProvider, SourceConfig};
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info, warn};

/// MCP Server configuration.
#[derive(Debug, Clone)]
pub struct McpServerConfig {
    /// Where the API reference comes from.
    pub source: SourceConfig,

    /// Server name reported in the protocol handshake.
    pub name: String,

    /// Server version reported in the protocol handshake.
    pub version: String,
}

impl McpServerConfig {
    /// Configuration with the default server identity.
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            name: SERVER_NAME.to_string(),
            version: VERSION.to_string(),
        }
    }
}

/// BSL Context MCP Server.
///
/// Exposes the platform API reference through six tools. Request handling
/// is sequential over the stdio transport; the underlying search core is a
/// read-only snapshot, safe for any amount of parallelism a future
/// transport might introduce.
pub struct McpServer {
    config: McpServerConfig,

    /// Lazily built catalog + indexes; shared, immutable after publication.
    provider: Arc<HelpProvider>,

    /// Set after a successful `initialize` handshake, cleared on
    /// `shutdown`; tool calls are rejected outside the lifecycle.
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: McpServerConfig) -> Self {
        let provider = Arc::new(HelpProvider::new(config.source.clone()));
        Self {
            config,
            provider,
            initialized: false,
        }
    }

    /// The lazy provider backing this server.
    pub fn provider(&self) -> &Arc<HelpProvider> {
        &self.provider
    }

    /// Run the server on stdio (synchronous).
    ///
    /// Reads one JSON-RPC request per line from stdin and writes one
    /// response per line to stdout, until stdin closes.
    pub fn run_stdio(&mut self) -> McpResult<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let reader = BufReader::new(stdin.lock());

        info!("BSL Context MCP server starting on stdio");

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            debug!("Received: {}", line);

            let response = self.dispatch_line(&line);
            let Some(response) = response else {
                continue;
            };
            let response_str = serde_json::to_string(&response)?;
            debug!("Sending: {}", response_str);
            writeln!(stdout, "{}", response_str)?;
            stdout.flush()?;
        }

        Ok(())
    }

    /// Run the server on stdio (asynchronous).
    pub async fn run_stdio_async(&mut self) -> McpResult<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = AsyncBufReader::new(stdin);

        info!("BSL Context MCP server starting on stdio (async)");

        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    debug!("Received: {}", line);

                    let Some(response) = self.dispatch_line(line) else {
                        continue;
                    };
                    let response_str = serde_json::to_string(&response)?;
                    debug!("Sending: {}", response_str);
                    stdout.write_all(response_str.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
                Err(e) => {
                    error!("Read error: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Parse and handle one transport line. `None` means no response is
    /// due (notifications).
    fn dispatch_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request),
            Err(e) => Some(JsonRpcResponse::error(
                None,
                -32700,
                format!("Parse error: {}", e),
                None,
            )),
        }
    }

    /// Handle a single JSON-RPC request.
    ///
    /// Returns `None` for notifications, which must not be answered.
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(id, request.params)),
            "initialized" | "notifications/initialized" => {
                debug!("Client confirmed initialization");
                None
            }
            "shutdown" => {
                info!("Shutdown requested");
                self.initialized = false;
                Some(JsonRpcResponse::success(id, Value::Null))
            }
            "tools/list" => Some(self.handle_tools_list(id)),
            "tools/call" => Some(self.handle_tools_call(id, request.params)),
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            method => {
                warn!("Unknown method: {}", method);
                Some(JsonRpcResponse::error(
                    id,
                    -32601,
                    format!("Method not found: {}", method),
                    None,
                ))
            }
        }
    }

    /// Handle the `initialize` handshake.
    fn handle_initialize(&mut self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        -32602,
                        format!("Invalid params: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(id, -32602, "Missing params".to_string(), None);
            }
        };

        self.initialized = true;
        info!(
            client = params.client_info.name.as_str(),
            "Server initialized"
        );

        let result = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e), None),
        }
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ListToolsResult { tools: get_tools() };
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e), None),
        }
    }

    fn handle_tools_call(&mut self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        if !self.initialized {
            return JsonRpcResponse::error(
                id,
                -32600,
                "Server not initialized".to_string(),
                None,
            );
        }
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        -32602,
                        format!("Invalid params: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(id, -32602, "Missing params".to_string(), None);
            }
        };

        match execute_tool(&params.name, params.arguments, &self.provider) {
            Ok(result) => match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => {
                    JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e), None)
                }
            },
            Err(e) => JsonRpcResponse::error(id, e.code(), e.to_string(), None),
        }
    }
}

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

//! MCP server for the 1C:Enterprise platform API reference.
//!
//! Implements the Model Context Protocol over stdio so AI assistants can
//! look up platform types, methods, properties and constructors in either
//! Russian or English.

mod error;
mod protocol;
mod server;
mod tools;

pub use error::{McpError, McpResult};
pub use protocol::{
    CallToolParams, CallToolResult, Content, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    Tool,
};
pub use server::{McpServer, McpServerConfig};
pub use tools::{execute_tool, get_tools};

/// Server name reported in the protocol handshake.
pub const SERVER_NAME: &str = "bslctx-mcp";

/// Server version reported in the protocol handshake.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

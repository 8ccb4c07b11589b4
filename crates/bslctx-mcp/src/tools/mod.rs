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

//! Platform reference tools for the MCP server.
//!
//! Available tools:
//! - `bsl_search`: Fuzzy bilingual search over the API reference
//! - `bsl_info`: Exact lookup of one definition by name and kind
//! - `bsl_get_member`: One method or property of a type
//! - `bsl_get_members`: All methods and properties of a type
//! - `bsl_get_constructors`: Constructor signatures of a type
//! - `bsl_catalog_stats`: Catalog size and ingestion provenance

mod lookup;

pub use lookup::{
    execute_catalog_stats, execute_get_constructors, execute_get_member, execute_get_members,
    execute_info, execute_search,
};

use crate::error::{McpError, McpResult};
use crate::protocol::{CallToolResult, Tool};
use bslctx::HelpProvider;
use serde_json::{json, Value as JsonValue};

/// Get all available platform reference tools.
pub fn get_tools() -> Vec<Tool> {
    let kind_arg = json!({
        "type": "string",
        "enum": ["method", "property", "type", "constructor"],
        "description": "Definition kind"
    });

    vec![
        Tool {
            name: "bsl_search".to_string(),
            description: "Search the 1C:Enterprise platform API reference. Accepts Russian or English names, 'Type.Member' patterns, two-word compound type names and word-order fragments.".to_string(),
            input_schema: json!({
                "type": "object",
                "required": ["query"],
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search text, e.g. 'ТаблицаЗначений.Добавить' or 'ValueTable'"
                    },
                    "kind": kind_arg.clone(),
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results (default 50)"
                    },
                    "language": {
                        "type": "string",
                        "enum": ["auto", "ru", "en"],
                        "description": "Name namespace to match against (default auto)"
                    },
                    "mode": {
                        "type": "string",
                        "enum": ["keyword", "hybrid", "semantic"],
                        "description": "Search mode; non-keyword modes fall back to keyword"
                    }
                }
            }),
        },
        Tool {
            name: "bsl_info".to_string(),
            description: "Get one definition by exact name (Russian or English, case-insensitive) and kind.".to_string(),
            input_schema: json!({
                "type": "object",
                "required": ["name", "kind"],
                "properties": {
                    "name": {"type": "string", "description": "Definition name"},
                    "kind": kind_arg
                }
            }),
        },
        Tool {
            name: "bsl_get_member".to_string(),
            description: "Get one method or property of a platform type by name.".to_string(),
            input_schema: json!({
                "type": "object",
                "required": ["type_name", "member_name"],
                "properties": {
                    "type_name": {"type": "string", "description": "Owning type, e.g. 'ТаблицаЗначений' or 'ValueTable'"},
                    "member_name": {"type": "string", "description": "Member name in either language"}
                }
            }),
        },
        Tool {
            name: "bsl_get_members".to_string(),
            description: "List all methods and properties of a platform type.".to_string(),
            input_schema: json!({
                "type": "object",
                "required": ["type_name"],
                "properties": {
                    "type_name": {"type": "string", "description": "Type name in either language"}
                }
            }),
        },
        Tool {
            name: "bsl_get_constructors".to_string(),
            description: "List constructor signatures of a platform type.".to_string(),
            input_schema: json!({
                "type": "object",
                "required": ["type_name"],
                "properties": {
                    "type_name": {"type": "string", "description": "Type name in either language"}
                }
            }),
        },
        Tool {
            name: "bsl_catalog_stats".to_string(),
            description: "Catalog statistics: definition counts by kind and the resolved ingestion source.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Execute a tool by name.
pub fn execute_tool(
    name: &str,
    arguments: Option<JsonValue>,
    provider: &HelpProvider,
) -> McpResult<CallToolResult> {
    let args = arguments.unwrap_or_else(|| json!({}));
    match name {
        "bsl_search" => execute_search(&args, provider),
        "bsl_info" => execute_info(&args, provider),
        "bsl_get_member" => execute_get_member(&args, provider),
        "bsl_get_members" => execute_get_members(&args, provider),
        "bsl_get_constructors" => execute_get_constructors(&args, provider),
        "bsl_catalog_stats" => execute_catalog_stats(&args, provider),
        _ => Err(McpError::ToolNotFound(name.to_string())),
    }
}

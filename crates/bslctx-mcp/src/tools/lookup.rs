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

//! Tool executors over the lazily built help context.
//!
//! Lookup outcomes are encoded in the tool result: successful lookups
//! return the serialized records, `InvalidQuery`/`NotFound`/ingestion
//! failures return an `is_error` result with a structured payload. Only
//! malformed arguments surface as protocol errors.

use crate::error::{McpError, McpResult};
use crate::protocol::{CallToolResult, Content};
use bslctx::{HelpContext, HelpProvider};
use bslctx_core::{ApiKind, Definition, Language, QueryError, SearchOptions, DEFAULT_LIMIT};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// `bsl_search`: the strategy-cascade lookup.
pub fn execute_search(args: &Value, provider: &HelpProvider) -> McpResult<CallToolResult> {
    let query = required_str(args, "query")?;
    let kind = optional_kind(args)?;
    let limit = match args.get("limit") {
        None => DEFAULT_LIMIT,
        Some(v) => v
            .as_u64()
            .ok_or_else(|| McpError::InvalidArguments("limit must be an integer".into()))?
            as usize,
    };
    let language = match args.get("language").and_then(Value::as_str) {
        None | Some("auto") => Language::Auto,
        Some("ru") => Language::Ru,
        Some("en") => Language::En,
        Some(other) => {
            return Err(McpError::InvalidArguments(format!(
                "unknown language '{}'",
                other
            )));
        }
    };
    if let Some(mode) = args.get("mode").and_then(Value::as_str) {
        if mode != "keyword" {
            // The embedding pipeline lives outside this server.
            warn!(mode, "non-keyword search mode requested; using keyword");
        }
    }

    let context = match context(provider) {
        Ok(context) => context,
        Err(result) => return Ok(result),
    };
    let options = SearchOptions {
        kind,
        limit,
        language,
    };
    match context.service.search(query, &options) {
        Ok(results) => Ok(ok_result(json!({
            "query": query,
            "total": results.len(),
            "results": results.iter().map(|d| definition_json(d)).collect::<Vec<_>>(),
        }))),
        Err(e) => Ok(query_error_result(e)),
    }
}

/// `bsl_info`: exact name + kind lookup.
pub fn execute_info(args: &Value, provider: &HelpProvider) -> McpResult<CallToolResult> {
    let name = required_str(args, "name")?;
    let kind = required_kind(args)?;
    let context = match context(provider) {
        Ok(context) => context,
        Err(result) => return Ok(result),
    };
    match context.service.info(name, kind) {
        Ok(def) => Ok(ok_result(definition_json(def))),
        Err(e) => Ok(query_error_result(e)),
    }
}

/// `bsl_get_member`: one member of a type.
pub fn execute_get_member(args: &Value, provider: &HelpProvider) -> McpResult<CallToolResult> {
    let type_name = required_str(args, "type_name")?;
    let member_name = required_str(args, "member_name")?;
    let context = match context(provider) {
        Ok(context) => context,
        Err(result) => return Ok(result),
    };
    match context.service.get_member(type_name, member_name) {
        Ok(def) => Ok(ok_result(definition_json(def))),
        Err(e) => Ok(query_error_result(e)),
    }
}

/// `bsl_get_members`: every method and property of a type.
pub fn execute_get_members(args: &Value, provider: &HelpProvider) -> McpResult<CallToolResult> {
    let type_name = required_str(args, "type_name")?;
    let context = match context(provider) {
        Ok(context) => context,
        Err(result) => return Ok(result),
    };
    match context.service.get_members(type_name) {
        Ok(members) => Ok(ok_result(json!({
            "type_name": type_name,
            "total": members.len(),
            "members": members.iter().map(|d| definition_json(d)).collect::<Vec<_>>(),
        }))),
        Err(e) => Ok(query_error_result(e)),
    }
}

/// `bsl_get_constructors`: constructor signatures of a type.
pub fn execute_get_constructors(
    args: &Value,
    provider: &HelpProvider,
) -> McpResult<CallToolResult> {
    let type_name = required_str(args, "type_name")?;
    let context = match context(provider) {
        Ok(context) => context,
        Err(result) => return Ok(result),
    };
    match context.service.get_constructors(type_name) {
        Ok(ctors) => Ok(ok_result(json!({
            "type_name": type_name,
            "total": ctors.len(),
            "constructors": ctors.iter().map(|d| definition_json(d)).collect::<Vec<_>>(),
        }))),
        Err(e) => Ok(query_error_result(e)),
    }
}

/// `bsl_catalog_stats`: counts by kind plus ingestion provenance.
pub fn execute_catalog_stats(_args: &Value, provider: &HelpProvider) -> McpResult<CallToolResult> {
    let context = match context(provider) {
        Ok(context) => context,
        Err(result) => return Ok(result),
    };
    let counts = context.service.catalog().counts();
    let by_kind: Value = counts
        .iter()
        .map(|(kind, count)| (kind.as_str().to_string(), json!(count)))
        .collect::<serde_json::Map<String, Value>>()
        .into();
    Ok(ok_result(json!({
        "definitions": context.service.catalog().len(),
        "by_kind": by_kind,
        "source": {
            "kind": context.source.kind(),
            "path": context.source.path().display().to_string(),
        },
        "page_warnings": context.warnings.len(),
    })))
}

// --- Helpers ---

/// Resolve the lazily built context; a failed ingestion becomes an
/// `is_error` tool result (and stays failed for every later call).
fn context(provider: &HelpProvider) -> Result<Arc<HelpContext>, CallToolResult> {
    provider.context().map_err(|e| {
        err_result(
            "ingestion_failed",
            format!("the API reference could not be loaded: {}", e),
        )
    })
}

fn required_str<'a>(args: &'a Value, key: &str) -> McpResult<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| McpError::InvalidArguments(format!("missing required argument '{}'", key)))
}

fn required_kind(args: &Value) -> McpResult<ApiKind> {
    required_str(args, "kind")?
        .parse()
        .map_err(McpError::InvalidArguments)
}

fn optional_kind(args: &Value) -> McpResult<Option<ApiKind>> {
    match args.get("kind").and_then(Value::as_str) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(McpError::InvalidArguments),
    }
}

fn definition_json(def: &Definition) -> Value {
    serde_json::to_value(def).unwrap_or_else(|_| json!({"name_ru": def.name_ru()}))
}

fn ok_result(value: Value) -> CallToolResult {
    CallToolResult {
        content: vec![Content::Text {
            text: serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
        }],
        is_error: None,
    }
}

fn err_result(code: &str, message: String) -> CallToolResult {
    let payload = json!({"error": code, "message": message});
    CallToolResult {
        content: vec![Content::Text {
            text: payload.to_string(),
        }],
        is_error: Some(true),
    }
}

fn query_error_result(error: QueryError) -> CallToolResult {
    let code = match &error {
        QueryError::InvalidQuery(_) => "invalid_query",
        QueryError::NotFound(_) => "not_found",
    };
    err_result(code, error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bslctx::{SourceConfig, CONTAINER_FILE};
    use bslctx_test::sample;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn provider() -> (TempDir, HelpProvider) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONTAINER_FILE);
        std::fs::write(&path, sample::modern_container()).unwrap();
        (dir, HelpProvider::new(SourceConfig::HbkFile(path)))
    }

    fn text_of(result: &CallToolResult) -> &str {
        let Content::Text { text } = &result.content[0];
        text
    }

    #[test]
    fn test_search_tool() {
        let (_dir, provider) = provider();
        let result =
            execute_search(&json!({"query": "ТаблицаЗначений.Добавить"}), &provider).unwrap();
        assert!(result.is_error.is_none());
        let payload: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(payload["results"][0]["name_en"], "Add");
        assert_eq!(payload["results"][0]["kind"], "method");
    }

    #[test]
    fn test_search_empty_query_is_tool_error() {
        let (_dir, provider) = provider();
        let result = execute_search(&json!({"query": "   "}), &provider).unwrap();
        assert_eq!(result.is_error, Some(true));
        let payload: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(payload["error"], "invalid_query");
    }

    #[test]
    fn test_search_missing_query_is_protocol_error() {
        let (_dir, provider) = provider();
        let err = execute_search(&json!({}), &provider).unwrap_err();
        assert!(matches!(err, McpError::InvalidArguments(_)));
    }

    #[test]
    fn test_search_bad_kind_is_protocol_error() {
        let (_dir, provider) = provider();
        let err = execute_search(&json!({"query": "x", "kind": "module"}), &provider).unwrap_err();
        assert!(matches!(err, McpError::InvalidArguments(_)));
    }

    #[test]
    fn test_info_not_found() {
        let (_dir, provider) = provider();
        let result = execute_info(
            &json!({"name": "НетТакого", "kind": "type"}),
            &provider,
        )
        .unwrap();
        assert_eq!(result.is_error, Some(true));
        let payload: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(payload["error"], "not_found");
    }

    #[test]
    fn test_get_members_tool() {
        let (_dir, provider) = provider();
        let result = execute_get_members(&json!({"type_name": "ValueTable"}), &provider).unwrap();
        let payload: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(payload["total"], 2);
    }

    #[test]
    fn test_catalog_stats_tool() {
        let (_dir, provider) = provider();
        let result = execute_catalog_stats(&json!({}), &provider).unwrap();
        let payload: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(payload["source"]["kind"], "hbk");
        assert!(payload["definitions"].as_u64().unwrap() > 0);
        assert_eq!(payload["page_warnings"], 1);
    }

    #[test]
    fn test_ingestion_failure_is_sticky_tool_error() {
        let provider = HelpProvider::new(SourceConfig::HbkFile(PathBuf::from(
            "/nonexistent/shcntx_ru.hbk",
        )));
        for _ in 0..2 {
            let result = execute_search(&json!({"query": "Массив"}), &provider).unwrap();
            assert_eq!(result.is_error, Some(true));
            let payload: Value = serde_json::from_str(text_of(&result)).unwrap();
            assert_eq!(payload["error"], "ingestion_failed");
        }
    }
}

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

//! HTML-to-text flattening.
//!
//! Block elements contribute line breaks, list items contribute `- `
//! bullets, inline elements contribute spaces. Whitespace runs collapse
//! and the result is trimmed.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

/// Flatten the text content of an element.
pub fn flatten_text(el: ElementRef) -> String {
    let mut raw = String::new();
    walk(*el, &mut raw);
    normalize(&raw)
}

fn walk(node: NodeRef<Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            // Source-level newlines are plain whitespace; only block
            // boundaries introduce line breaks.
            Node::Text(text) => out.push_str(&text.replace(['\n', '\r'], " ")),
            Node::Element(element) => {
                let name = element.name();
                if name == "li" {
                    out.push_str("\n- ");
                    walk(child, out);
                    out.push('\n');
                } else if is_block(name) {
                    out.push('\n');
                    walk(child, out);
                    out.push('\n');
                } else {
                    out.push(' ');
                    walk(child, out);
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "table"
            | "tbody"
            | "tr"
            | "ul"
            | "ol"
            | "br"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
    )
}

/// Collapse horizontal whitespace per line, drop blank lines, trim.
fn normalize(raw: &str) -> String {
    let lines: Vec<String> = raw
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

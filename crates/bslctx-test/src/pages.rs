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

//! Syntax-helper HTML page generators.
//!
//! Modern pages mark structure with `V8SH_*` CSS classes; legacy pages use
//! bare `h1`/`h2`/`h3` headings. Titles carry the bilingual name as
//! `Русское (English)`.

/// Which selector dialect a generated page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    Modern,
    Legacy,
}

impl PageStyle {
    fn title(&self, text: &str) -> String {
        match self {
            Self::Modern => format!("<p class=\"V8SH_pagetitle\">{}</p>", text),
            Self::Legacy => format!("<h1>{}</h1>", text),
        }
    }

    fn chapter(&self, text: &str) -> String {
        match self {
            Self::Modern => format!("<p class=\"V8SH_chapter\">{}</p>", text),
            Self::Legacy => format!("<h2>{}</h2>", text),
        }
    }

    fn heading(&self, text: &str) -> String {
        match self {
            Self::Modern => format!("<p class=\"V8SH_heading\">{}</p>", text),
            Self::Legacy => format!("<h3>{}</h3>", text),
        }
    }
}

/// One row of a signature's parameter table.
pub struct ParamRow {
    pub name: String,
    pub type_name: String,
    pub description: String,
}

impl ParamRow {
    pub fn new(name: &str, type_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            description: description.to_string(),
        }
    }
}

/// One syntax variant: heading plus parameter rows.
pub struct SignatureBlock {
    pub heading: String,
    pub params: Vec<ParamRow>,
}

impl SignatureBlock {
    pub fn new(heading: &str, params: Vec<ParamRow>) -> Self {
        Self {
            heading: heading.to_string(),
            params,
        }
    }
}

fn document(body: String) -> String {
    format!("<html><head></head><body>\n{}\n</body></html>", body)
}

fn param_table(params: &[ParamRow]) -> String {
    let mut rows = String::new();
    for p in params {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            p.name, p.type_name, p.description
        ));
    }
    format!("<table>\n{}</table>", rows)
}

/// A platform type page.
pub fn type_page(
    style: PageStyle,
    title: &str,
    description: &str,
    collection_element: Option<&str>,
) -> String {
    let mut body = style.title(title);
    body.push('\n');
    body.push_str(&style.chapter("Описание"));
    body.push_str(&format!("\n<p>{}</p>\n", description));
    if let Some(element) = collection_element {
        body.push_str(&style.chapter("Элементы коллекции"));
        body.push_str(&format!("\n<p>{}</p>\n", element));
    }
    document(body)
}

/// An enumeration page; values become read-only properties at ingest.
pub fn enum_page(style: PageStyle, title: &str, values: &[&str], description: &str) -> String {
    let items: String = values
        .iter()
        .map(|v| format!("<li>{}</li>\n", v))
        .collect();
    let body = format!(
        "{}\n{}\n<p>{}</p>\n{}\n<ul>\n{}</ul>",
        style.title(title),
        style.chapter("Описание"),
        description,
        style.chapter("Значения"),
        items
    );
    document(body)
}

/// A property page.
pub fn property_page(
    style: PageStyle,
    title: &str,
    value_type: &str,
    description: &str,
    readonly: bool,
) -> String {
    let access = if readonly { "<p>Только чтение.</p>\n" } else { "" };
    let body = format!(
        "{}\n{}\n<p>{}</p>\n{}\n<p>{}</p>\n{}",
        style.title(title),
        style.chapter("Тип значения"),
        value_type,
        style.chapter("Описание"),
        description,
        access
    );
    document(body)
}

/// A method page with one or more syntax variants.
pub fn method_page(
    style: PageStyle,
    title: &str,
    variants: &[SignatureBlock],
    return_type: Option<&str>,
    description: &str,
) -> String {
    let mut body = style.title(title);
    body.push('\n');
    body.push_str(&style.chapter("Синтаксис"));
    body.push('\n');
    for variant in variants {
        body.push_str(&style.heading(&variant.heading));
        body.push('\n');
        if !variant.params.is_empty() {
            body.push_str(&param_table(&variant.params));
            body.push('\n');
        }
    }
    if let Some(returns) = return_type {
        body.push_str(&style.chapter("Возвращаемое значение"));
        body.push_str(&format!("\n<p>{}</p>\n", returns));
    }
    body.push_str(&style.chapter("Описание"));
    body.push_str(&format!("\n<p>{}</p>", description));
    document(body)
}

/// A constructor page: a single syntax variant.
pub fn constructor_page(
    style: PageStyle,
    title: &str,
    variant: SignatureBlock,
    description: &str,
) -> String {
    method_page(style, title, &[variant], None, description)
}

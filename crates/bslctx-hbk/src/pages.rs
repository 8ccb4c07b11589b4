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

//! Syntax-helper page parsers.
//!
//! Every page carries the entity name in both languages in its title,
//! `Русское (English)`, and a sequence of labeled chapters. Modern pages
//! (8.3.27+) mark structure with `V8SH_*` CSS classes, legacy pages with
//! `h1`/`h2`/`h3`; the selector set is chosen per page by first-match
//! detection.
//!
//! A page that cannot be parsed is skipped by the ingestion driver; the
//! errors here are warning-grade, never fatal.

use crate::html::flatten_text;
use bslctx_core::{
    ConstructorDef, DefHeader, Definition, MethodDef, Parameter, PropertyDef, Signature, TypeDef,
};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Why a single page could not be turned into a definition.
#[derive(Debug, Error)]
pub enum PageError {
    /// No title element found, or the title text is empty.
    #[error("page has no title")]
    MissingTitle,
}

/// Result of parsing a type (or enumeration) page.
#[derive(Debug)]
pub struct TypePage {
    pub type_def: Definition,
    /// Enumeration values, normalized to read-only properties owned by the
    /// enum type. Empty for ordinary types.
    pub value_properties: Vec<Definition>,
}

/// Split a page title into its Russian and English halves.
///
/// Titles read `Русское (English)`; a missing half is mirrored by
/// [`DefHeader::new`].
pub fn split_bilingual(title: &str) -> (String, String) {
    let trimmed = title.trim();
    if let Some(without_paren) = trimmed.strip_suffix(')') {
        if let Some((ru, en)) = without_paren.rsplit_once('(') {
            return (ru.trim().to_string(), en.trim().to_string());
        }
    }
    (trimmed.to_string(), String::new())
}

/// Parse a type page; a page with a values chapter is an enumeration.
pub fn parse_type_page(html: &str) -> Result<TypePage, PageError> {
    let scan = scan_page(html)?;
    let (ru, en) = split_bilingual(&scan.title);
    let header = DefHeader::new(ru, en).with_description(scan.description.join("\n"));
    let type_name = header.name_ru.clone();

    let value_properties = scan
        .values
        .iter()
        .map(|value_title| {
            let (value_ru, value_en) = split_bilingual(value_title);
            Definition::property(
                DefHeader::new(value_ru, value_en).with_owner(type_name.clone()),
                PropertyDef {
                    type_name: type_name.clone(),
                    readonly: true,
                },
            )
        })
        .collect();

    let type_def = Definition::platform_type(
        header,
        TypeDef {
            collection_element_type: scan.collection_element,
        },
    );
    Ok(TypePage {
        type_def,
        value_properties,
    })
}

/// Parse a method page into a definition with its syntax variants.
pub fn parse_method_page(html: &str, owner: Option<&str>) -> Result<Definition, PageError> {
    let scan = scan_page(html)?;
    let (ru, en) = split_bilingual(&scan.title);
    let mut header = DefHeader::new(ru, en).with_description(scan.description.join("\n"));
    if let Some(owner) = owner {
        header = header.with_owner(owner);
    }
    let name_ru = header.name_ru.clone();
    let signatures = scan
        .syntax
        .into_iter()
        .map(|variant| Signature {
            name: if variant.heading.is_empty() {
                name_ru.clone()
            } else {
                variant.heading
            },
            description: String::new(),
            parameters: variant.parameters,
        })
        .collect();
    Ok(Definition::method(
        header,
        MethodDef {
            signatures,
            return_type: scan.return_type,
        },
    ))
}

/// Parse a property page.
pub fn parse_property_page(html: &str, owner: Option<&str>) -> Result<Definition, PageError> {
    let scan = scan_page(html)?;
    let (ru, en) = split_bilingual(&scan.title);
    let mut header = DefHeader::new(ru, en).with_description(scan.description.join("\n"));
    if let Some(owner) = owner {
        header = header.with_owner(owner);
    }
    Ok(Definition::property(
        header,
        PropertyDef {
            type_name: scan.value_type.unwrap_or_default(),
            readonly: scan.readonly,
        },
    ))
}

/// Parse a constructor page; the single syntax variant constructs `owner`.
pub fn parse_constructor_page(html: &str, owner: &str) -> Result<Definition, PageError> {
    let scan = scan_page(html)?;
    let (ru, en) = split_bilingual(&scan.title);
    let header = DefHeader::new(ru, en)
        .with_description(scan.description.join("\n"))
        .with_owner(owner);
    let signature = scan
        .syntax
        .into_iter()
        .next()
        .map(|variant| Signature {
            name: if variant.heading.is_empty() {
                owner.to_string()
            } else {
                variant.heading
            },
            description: String::new(),
            parameters: variant.parameters,
        })
        .unwrap_or_else(|| Signature::new(owner));
    Ok(Definition::constructor(header, ConstructorDef { signature }))
}

// --- Page scanning ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageDialect {
    Modern,
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chapter {
    Description,
    Syntax,
    ReturnValue,
    ValueType,
    Values,
    CollectionElements,
    Other,
}

#[derive(Debug, Default)]
struct SyntaxVariant {
    heading: String,
    parameters: Vec<Parameter>,
}

#[derive(Debug, Default)]
struct PageScan {
    title: String,
    description: Vec<String>,
    syntax: Vec<SyntaxVariant>,
    return_type: Option<String>,
    value_type: Option<String>,
    collection_element: Option<String>,
    values: Vec<String>,
    readonly: bool,
}

fn scan_page(html: &str) -> Result<PageScan, PageError> {
    let doc = Html::parse_document(html);
    let body_selector = Selector::parse("body").expect("valid selector");
    let marker_selector =
        Selector::parse(".V8SH_pagetitle, .V8SH_chapter, .V8SH_heading").expect("valid selector");
    let li_selector = Selector::parse("li").expect("valid selector");
    let row_selector = Selector::parse("tr").expect("valid selector");
    let cell_selector = Selector::parse("td").expect("valid selector");

    let dialect = if doc.select(&marker_selector).next().is_some() {
        PageDialect::Modern
    } else {
        PageDialect::Legacy
    };

    let Some(body) = doc.select(&body_selector).next() else {
        return Err(PageError::MissingTitle);
    };

    let mut scan = PageScan::default();
    let mut current = Chapter::Other;
    for el in body.children().filter_map(ElementRef::wrap) {
        if is_title(el, dialect) {
            scan.title = flatten_text(el);
            continue;
        }
        if is_chapter(el, dialect) {
            current = chapter_kind(&flatten_text(el));
            continue;
        }
        if is_heading(el, dialect) && current == Chapter::Syntax {
            scan.syntax.push(SyntaxVariant {
                heading: strip_variant_prefix(&flatten_text(el)),
                parameters: Vec::new(),
            });
            continue;
        }
        match current {
            Chapter::Description => {
                let text = flatten_text(el);
                if !text.is_empty() {
                    scan.description.push(text);
                }
            }
            Chapter::Syntax if el.value().name() == "table" => {
                let parameters: Vec<Parameter> = el
                    .select(&row_selector)
                    .filter_map(|row| {
                        let cells: Vec<String> = row
                            .select(&cell_selector)
                            .map(|cell| flatten_text(cell))
                            .collect();
                        parse_param_row(&cells)
                    })
                    .collect();
                match scan.syntax.last_mut() {
                    Some(variant) => variant.parameters.extend(parameters),
                    // Parameter table before any heading: an unnamed variant.
                    None => scan.syntax.push(SyntaxVariant {
                        heading: String::new(),
                        parameters,
                    }),
                }
            }
            Chapter::ReturnValue => {
                set_if_empty(&mut scan.return_type, flatten_text(el));
            }
            Chapter::ValueType => {
                set_if_empty(&mut scan.value_type, flatten_text(el));
            }
            Chapter::CollectionElements => {
                set_if_empty(&mut scan.collection_element, flatten_text(el));
            }
            Chapter::Values => {
                for item in el.select(&li_selector) {
                    let text = flatten_text(item);
                    if !text.is_empty() {
                        scan.values.push(text);
                    }
                }
            }
            _ => {}
        }
    }

    scan.readonly = {
        let body_text = flatten_text(body).to_lowercase();
        body_text.contains("только чтение") || body_text.contains("read only")
    };

    if scan.title.is_empty() {
        return Err(PageError::MissingTitle);
    }
    Ok(scan)
}

fn is_title(el: ElementRef, dialect: PageDialect) -> bool {
    match dialect {
        PageDialect::Modern => has_class(el, "V8SH_pagetitle"),
        PageDialect::Legacy => el.value().name() == "h1",
    }
}

fn is_chapter(el: ElementRef, dialect: PageDialect) -> bool {
    match dialect {
        PageDialect::Modern => has_class(el, "V8SH_chapter"),
        PageDialect::Legacy => el.value().name() == "h2",
    }
}

fn is_heading(el: ElementRef, dialect: PageDialect) -> bool {
    match dialect {
        PageDialect::Modern => has_class(el, "V8SH_heading"),
        PageDialect::Legacy => el.value().name() == "h3",
    }
}

fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn chapter_kind(text: &str) -> Chapter {
    let folded = text.trim().to_lowercase();
    if folded.starts_with("описание") || folded.starts_with("description") {
        Chapter::Description
    } else if folded.starts_with("синтаксис") || folded.starts_with("syntax") {
        Chapter::Syntax
    } else if folded.starts_with("возвращаемое")
        || folded.starts_with("returned value")
        || folded.starts_with("return value")
    {
        Chapter::ReturnValue
    } else if folded.starts_with("тип значения") || folded.starts_with("value type") {
        Chapter::ValueType
    } else if folded.starts_with("элементы коллекции") || folded.starts_with("collection") {
        Chapter::CollectionElements
    } else if folded.starts_with("значения") || folded.starts_with("values") {
        Chapter::Values
    } else {
        Chapter::Other
    }
}

fn strip_variant_prefix(heading: &str) -> String {
    let heading = heading.trim();
    for prefix in ["Вариант синтаксиса:", "Syntax variant:"] {
        if let Some(rest) = heading.strip_prefix(prefix) {
            return rest.trim().to_string();
        }
    }
    heading.to_string()
}

/// Parse one parameter table row: `{name, type, description}` where the
/// name cell may carry the optionality marker and the description cell a
/// default value.
fn parse_param_row(cells: &[String]) -> Option<Parameter> {
    let raw_name = cells.first()?.trim();
    if raw_name.is_empty() {
        return None;
    }
    let mut optional = false;
    let mut name = raw_name.to_string();
    for marker in ["(необязательный)", "(optional)"] {
        if name.contains(marker) {
            optional = true;
            name = name.replace(marker, "").trim().to_string();
        }
    }

    let type_name = cells.get(1).map(|c| c.trim().to_string()).unwrap_or_default();

    let raw_description = cells.get(2).map(|c| c.trim().to_string()).unwrap_or_default();
    let mut default_value = None;
    let mut description = raw_description.clone();
    for marker in ["Значение по умолчанию:", "Default value:"] {
        if let Some((before, after)) = raw_description.split_once(marker) {
            description = before.trim().to_string();
            default_value = Some(after.trim().to_string()).filter(|v| !v.is_empty());
            break;
        }
    }

    Some(Parameter {
        name,
        type_name,
        description,
        optional,
        default_value,
    })
}

fn set_if_empty(slot: &mut Option<String>, text: String) {
    if slot.is_none() && !text.trim().is_empty() {
        *slot = Some(text.trim().to_string());
    }
}

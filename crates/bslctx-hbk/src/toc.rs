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

//! Table-of-contents decoder.
//!
//! The TOC is a stream of nested `{}`-groups. A group is a comma-separated
//! field list; fields are string or numeric literals, or nested groups.
//! Field positions are fixed: `{tag, title, lang, page_path, child*}`.
//!
//! Two dialects share the grammar but not the literal vocabulary:
//!
//! - *Legacy*: bare numeric tags (`0` root, `1` type, `2` method, `3`
//!   property, `4` constructor, `5` section), language codes `1`/`2`,
//!   exactly one root group.
//! - *Modern* (8.3.27+): quoted tags (`"type"`, `"method"`, `"property"`,
//!   `"ctor"`, `"#"` for sections), language codes `"ru"`/`"en"`, several
//!   root-level section groups.
//!
//! The dialect is detected from the first token inside the first group.

use crate::error::{HbkError, HbkResult};

/// Nesting bound; real containers stay in single digits.
pub const MAX_TOC_DEPTH: usize = 32;

/// Which bracket vocabulary the TOC uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocDialect {
    Legacy,
    Modern,
}

/// Structural role of a TOC node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TocNodeType {
    Type,
    Method,
    Property,
    Constructor,
    Section,
    Root,
}

/// One node of the decoded TOC tree.
#[derive(Debug, Clone)]
pub struct TocNode {
    pub node_type: TocNodeType,
    pub title: String,
    pub language_code: Option<String>,
    pub page_path: Option<String>,
    pub children: Vec<TocNode>,
}

/// Parse a TOC source into its dialect and tree.
///
/// Top-level groups are gathered under a synthetic ROOT node unless the
/// stream is a single explicit legacy root.
pub fn parse_toc(source: &str) -> HbkResult<(TocDialect, TocNode)> {
    let tokens = lex(source)?;
    let dialect = detect_dialect(&tokens)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        dialect,
    };

    let mut top = Vec::new();
    while parser.pos < parser.tokens.len() {
        top.push(parser.parse_group(0)?);
    }
    if top.is_empty() {
        return Err(HbkError::toc("empty toc", 0));
    }

    let root = if top.len() == 1 && top[0].node_type == TocNodeType::Root {
        top.remove(0)
    } else {
        TocNode {
            node_type: TocNodeType::Root,
            title: String::new(),
            language_code: None,
            page_path: None,
            children: top,
        }
    };
    Ok((dialect, root))
}

// --- Tokenizer ---

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Comma,
    /// Quoted string literal, unescaped.
    Str(String),
    /// Bare literal (numbers in practice).
    Bare(String),
}

/// Tokenize the bracket stream. Whitespace outside quotes is insignificant.
fn lex(source: &str) -> HbkResult<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' => tokens.push((offset, Token::Open)),
            '}' => tokens.push((offset, Token::Close)),
            ',' => tokens.push((offset, Token::Comma)),
            '"' => {
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some((_, escaped)) => value.push(escaped),
                            None => break,
                        },
                        '"' => {
                            closed = true;
                            break;
                        }
                        other => value.push(other),
                    }
                }
                if !closed {
                    return Err(HbkError::toc("unterminated string literal", offset));
                }
                tokens.push((offset, Token::Str(value)));
            }
            c if c.is_whitespace() => {}
            _ => {
                let mut value = String::new();
                value.push(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '{' | '}' | ',' | '"') {
                        break;
                    }
                    value.push(next);
                    chars.next();
                }
                tokens.push((offset, Token::Bare(value)));
            }
        }
    }
    Ok(tokens)
}

/// The first field of the first group names the dialect.
fn detect_dialect(tokens: &[(usize, Token)]) -> HbkResult<TocDialect> {
    match tokens.first() {
        Some((_, Token::Open)) => {}
        Some((offset, _)) => return Err(HbkError::toc("toc must start with '{'", *offset)),
        None => return Err(HbkError::toc("empty toc", 0)),
    }
    match tokens.get(1) {
        Some((_, Token::Str(_))) => Ok(TocDialect::Modern),
        Some((_, Token::Bare(tag))) if tag.chars().all(|c| c.is_ascii_digit()) => {
            Ok(TocDialect::Legacy)
        }
        Some((offset, _)) => Err(HbkError::toc("unrecognized toc tag", *offset)),
        None => Err(HbkError::toc("truncated toc", 0)),
    }
}

// --- Parser ---

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    dialect: TocDialect,
}

impl Parser {
    fn parse_group(&mut self, depth: usize) -> HbkResult<TocNode> {
        let open_offset = self.expect_open()?;
        if depth >= MAX_TOC_DEPTH {
            return Err(HbkError::toc("bracket nesting too deep", open_offset));
        }

        let mut literals: Vec<String> = Vec::new();
        let mut children: Vec<TocNode> = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Close) => {
                    self.pos += 1;
                    break;
                }
                Some(Token::Open) => children.push(self.parse_group(depth + 1)?),
                Some(Token::Str(_) | Token::Bare(_)) => {
                    if let Some((_, Token::Str(s) | Token::Bare(s))) = self.next() {
                        literals.push(s);
                    }
                }
                Some(Token::Comma) => {
                    self.pos += 1;
                }
                None => {
                    return Err(HbkError::toc("unbalanced brackets", open_offset));
                }
            }
        }

        self.build_node(literals, children, open_offset)
    }

    fn build_node(
        &self,
        literals: Vec<String>,
        children: Vec<TocNode>,
        offset: usize,
    ) -> HbkResult<TocNode> {
        let tag = literals
            .first()
            .ok_or_else(|| HbkError::toc("group without a type tag", offset))?;
        let node_type = self.node_type(tag, offset)?;

        let title = literals.get(1).cloned().unwrap_or_default();
        let language_code = literals.get(2).and_then(|code| match self.dialect {
            TocDialect::Legacy => match code.as_str() {
                "1" => Some("ru".to_string()),
                "2" => Some("en".to_string()),
                _ => None,
            },
            TocDialect::Modern => match code.as_str() {
                "ru" | "en" => Some(code.clone()),
                _ => None,
            },
        });
        let page_path = literals.get(3).filter(|p| !p.is_empty()).cloned();

        if page_path.is_none()
            && !matches!(node_type, TocNodeType::Section | TocNodeType::Root)
        {
            return Err(HbkError::toc(
                format!("{:?} node '{}' has no page path", node_type, title),
                offset,
            ));
        }

        Ok(TocNode {
            node_type,
            title,
            language_code,
            page_path,
            children,
        })
    }

    fn node_type(&self, tag: &str, offset: usize) -> HbkResult<TocNodeType> {
        let mapped = match self.dialect {
            TocDialect::Legacy => match tag {
                "0" => Some(TocNodeType::Root),
                "1" => Some(TocNodeType::Type),
                "2" => Some(TocNodeType::Method),
                "3" => Some(TocNodeType::Property),
                "4" => Some(TocNodeType::Constructor),
                "5" => Some(TocNodeType::Section),
                _ => None,
            },
            TocDialect::Modern => match tag {
                "type" => Some(TocNodeType::Type),
                "method" => Some(TocNodeType::Method),
                "property" => Some(TocNodeType::Property),
                "ctor" => Some(TocNodeType::Constructor),
                "#" => Some(TocNodeType::Section),
                _ => None,
            },
        };
        mapped.ok_or_else(|| HbkError::toc(format!("unknown group tag '{}'", tag), offset))
    }

    fn expect_open(&mut self) -> HbkResult<usize> {
        match self.next() {
            Some((offset, Token::Open)) => Ok(offset),
            Some((offset, _)) => Err(HbkError::toc("expected '{'", offset)),
            None => Err(HbkError::toc("unexpected end of toc", 0)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bslctx_test::toc::{legacy_toc, modern_toc};

    fn find<'a>(node: &'a TocNode, title: &str) -> Option<&'a TocNode> {
        if node.title == title {
            return Some(node);
        }
        node.children.iter().find_map(|c| find(c, title))
    }

    #[test]
    fn test_legacy_dialect_detected() {
        let (dialect, root) = parse_toc(&legacy_toc()).unwrap();
        assert_eq!(dialect, TocDialect::Legacy);
        assert_eq!(root.node_type, TocNodeType::Root);
        assert_eq!(root.title, "Справка");
    }

    #[test]
    fn test_modern_dialect_detected() {
        let (dialect, root) = parse_toc(&modern_toc()).unwrap();
        assert_eq!(dialect, TocDialect::Modern);
        assert_eq!(root.node_type, TocNodeType::Root);
        // Synthetic root over the section groups.
        assert_eq!(root.children.len(), 2);
        assert!(root
            .children
            .iter()
            .all(|c| c.node_type == TocNodeType::Section));
    }

    #[test]
    fn test_legacy_node_shape() {
        let (_, root) = parse_toc(&legacy_toc()).unwrap();
        let table = find(&root, "ТаблицаЗначений").unwrap();
        assert_eq!(table.node_type, TocNodeType::Type);
        assert_eq!(table.language_code.as_deref(), Some("ru"));
        assert_eq!(table.page_path.as_deref(), Some("/objects/valuetable.html"));
        assert_eq!(table.children.len(), 2);
        assert_eq!(table.children[0].node_type, TocNodeType::Method);
        assert_eq!(table.children[1].node_type, TocNodeType::Property);
    }

    #[test]
    fn test_modern_constructor_node() {
        let (_, root) = parse_toc(&modern_toc()).unwrap();
        let ctor = find(&root, "По количеству элементов").unwrap();
        assert_eq!(ctor.node_type, TocNodeType::Constructor);
        assert_eq!(ctor.page_path.as_deref(), Some("/objects/array/ctor.html"));
    }

    #[test]
    fn test_escaped_quote_in_title() {
        let source = r#"{0,"Кавычка \" внутри",1,""}"#;
        let (_, root) = parse_toc(source).unwrap();
        assert_eq!(root.title, "Кавычка \" внутри");
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse_toc(r#"{0,"оборванная"#).unwrap_err();
        assert!(matches!(err, HbkError::MalformedToc { .. }));
    }

    #[test]
    fn test_unbalanced_brackets() {
        let err = parse_toc(r#"{0,"x",1,"","#).unwrap_err();
        assert!(matches!(err, HbkError::MalformedToc { .. }));
    }

    #[test]
    fn test_page_node_requires_path() {
        let err = parse_toc(r#"{0,"r",1,"",{1,"БезСтраницы",1,""}}"#).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("БезСтраницы"), "{}", message);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = parse_toc(r#"{7,"x",1,""}"#).unwrap_err();
        assert!(matches!(err, HbkError::MalformedToc { .. }));
    }

    #[test]
    fn test_depth_bound() {
        let mut source = String::from(r#"{0,"r",1,"","#);
        for _ in 0..MAX_TOC_DEPTH {
            source.push_str(r#"{5,"s",1,"","#);
        }
        source.push_str(&"}".repeat(MAX_TOC_DEPTH + 1));
        let err = parse_toc(&source).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("nesting"), "{}", message);
    }

    #[test]
    fn test_whitespace_insignificant() {
        let compact = r#"{0,"r",1,""}"#;
        let spaced = "{ 0 , \"r\" , 1 , \"\" }";
        let (_, a) = parse_toc(compact).unwrap();
        let (_, b) = parse_toc(spaced).unwrap();
        assert_eq!(a.title, b.title);
        assert_eq!(a.node_type, b.node_type);
    }
}

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

//! Search strategies.
//!
//! Four strategies run in fixed priority order; each contributes candidate
//! ids and the service concatenates their outputs. Strategies share no
//! state: each is a plain function over the query, the indexes and the
//! catalog.

use crate::catalog::{Catalog, DefId};
use crate::index::SearchIndex;
use crate::model::ApiKind;
use crate::tokenize::{fold_key, tokenize};

/// Which name namespace a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Match against both the Russian and the English name.
    #[default]
    Auto,
    Ru,
    En,
}

impl Language {
    /// Names of `def` visible under this language setting.
    fn names<'a>(&self, catalog: &'a Catalog, id: DefId) -> Vec<&'a str> {
        let def = catalog.get(id);
        match self {
            Self::Auto => vec![def.name_ru(), def.name_en()],
            Self::Ru => vec![def.name_ru()],
            Self::En => vec![def.name_en()],
        }
    }

    fn retain_exact(&self, catalog: &Catalog, ids: &[DefId], key: &str) -> Vec<DefId> {
        ids.iter()
            .copied()
            .filter(|&id| self.names(catalog, id).iter().any(|n| fold_key(n) == key))
            .collect()
    }

    fn retain_prefix(&self, catalog: &Catalog, ids: Vec<DefId>, prefix: &str) -> Vec<DefId> {
        ids.into_iter()
            .filter(|&id| {
                self.names(catalog, id)
                    .iter()
                    .any(|n| fold_key(n).starts_with(prefix))
            })
            .collect()
    }
}

/// A strategy maps a query to candidate definition ids.
pub type StrategyFn = fn(&str, &SearchIndex, &Catalog, Language) -> Vec<DefId>;

/// The strategy cascade, in priority order.
pub const STRATEGIES: &[(&str, StrategyFn)] = &[
    ("compound_type", compound_type),
    ("type_member", type_member),
    ("regular", regular),
    ("word_order", word_order),
];

/// Strategy 1: Russian compound type names written as two words.
///
/// `"Справочник Объект"` is looked up as the joined form
/// `СправочникОбъект`. Pure case-folded concatenation; no morphology.
pub fn compound_type(
    query: &str,
    index: &SearchIndex,
    _catalog: &Catalog,
    _language: Language,
) -> Vec<DefId> {
    let words: Vec<&str> = query.split_whitespace().collect();
    if words.len() != 2 {
        return Vec::new();
    }
    if !words
        .iter()
        .all(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
    {
        return Vec::new();
    }
    let joined = format!("{}{}", words[0], words[1]);
    index.hash.lookup(&joined).to_vec()
}

/// Strategy 2: `"<Type> <Member>"` / `"<Type>.<Member>"` patterns.
///
/// The type half resolves through the hash index restricted to types; the
/// member half matches members of those types exactly first, then by
/// prefix (shorter member names first).
pub fn type_member(
    query: &str,
    index: &SearchIndex,
    catalog: &Catalog,
    _language: Language,
) -> Vec<DefId> {
    let Some((type_part, member_part)) = split_type_member(query) else {
        return Vec::new();
    };
    let member_key = fold_key(member_part);

    let mut exact = Vec::new();
    let mut prefix = Vec::new();
    for &candidate in index.hash.lookup(type_part) {
        if catalog.get(candidate).kind() != ApiKind::Type {
            continue;
        }
        let Some(members) = catalog.members_of_id(candidate) else {
            continue;
        };
        for &member in members.methods.iter().chain(members.properties.iter()) {
            let def = catalog.get(member);
            let ru = fold_key(def.name_ru());
            let en = fold_key(def.name_en());
            if ru == member_key || en == member_key {
                exact.push(member);
            } else if ru.starts_with(&member_key) || en.starts_with(&member_key) {
                prefix.push(member);
            }
        }
    }
    sort_prefix_hits(catalog, &mut prefix);
    exact.extend(prefix);
    exact
}

/// Strategy 3: exact hash lookup on the whole query, falling back to the
/// prefix index when the exact set is empty.
pub fn regular(
    query: &str,
    index: &SearchIndex,
    catalog: &Catalog,
    language: Language,
) -> Vec<DefId> {
    let key = fold_key(query);
    let exact = language.retain_exact(catalog, index.hash.lookup(&key), &key);
    if !exact.is_empty() {
        return exact;
    }
    language.retain_prefix(catalog, index.prefix.lookup(&key), &key)
}

/// Strategy 4: token subsequence match.
///
/// A definition matches when every query token appears, case-folded and in
/// relative order, among the tokens of one of its names. Ordered by name
/// token count ascending, then lexicographically by the matched name.
pub fn word_order(
    query: &str,
    _index: &SearchIndex,
    catalog: &Catalog,
    language: Language,
) -> Vec<DefId> {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() {
        return Vec::new();
    }
    let mut scored: Vec<(usize, String, DefId)> = Vec::new();
    for (id, _) in catalog.all() {
        let best = language
            .names(catalog, id)
            .into_iter()
            .filter_map(|name| {
                let name_tokens = tokenize(name);
                is_subsequence(&query_tokens, &name_tokens)
                    .then(|| (name_tokens.len(), fold_key(name)))
            })
            .min();
        if let Some((token_count, name)) = best {
            scored.push((token_count, name, id));
        }
    }
    scored.sort();
    scored.into_iter().map(|(_, _, id)| id).collect()
}

/// Split once on `.` or the first whitespace; both halves must be non-empty.
fn split_type_member(query: &str) -> Option<(&str, &str)> {
    let split = query
        .split_once('.')
        .or_else(|| query.split_once(char::is_whitespace))?;
    let (type_part, member_part) = (split.0.trim(), split.1.trim());
    if type_part.is_empty() || member_part.is_empty() {
        return None;
    }
    Some((type_part, member_part))
}

/// Order prefix hits shorter-name first, ties lexicographic.
fn sort_prefix_hits(catalog: &Catalog, ids: &mut [DefId]) {
    ids.sort_by_key(|&id| {
        let name = fold_key(catalog.get(id).name_ru());
        (name.chars().count(), name, id)
    });
}

/// `needle` appears in `haystack` as an in-order subsequence.
fn is_subsequence(needle: &[String], haystack: &[String]) -> bool {
    let mut it = haystack.iter();
    needle.iter().all(|n| it.any(|h| h == n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DefHeader, Definition, MethodDef, PropertyDef, Signature, TypeDef};

    fn fixture() -> (Catalog, SearchIndex) {
        let catalog = Catalog::build(vec![
            Definition::platform_type(
                DefHeader::new("СправочникОбъект", "CatalogObject"),
                TypeDef::default(),
            ),
            Definition::platform_type(
                DefHeader::new("ТаблицаЗначений", "ValueTable"),
                TypeDef::default(),
            ),
            Definition::method(
                DefHeader::new("Добавить", "Add").with_owner("ТаблицаЗначений"),
                MethodDef {
                    signatures: vec![Signature::new("Добавить")],
                    return_type: Some("СтрокаТаблицыЗначений".into()),
                },
            ),
            Definition::property(
                DefHeader::new("Колонки", "Columns").with_owner("ТаблицаЗначений"),
                PropertyDef {
                    type_name: "КоллекцияКолонокТаблицыЗначений".into(),
                    readonly: true,
                },
            ),
            Definition::method(
                DefHeader::new("НайтиПоЗначению", "FindByValue").with_owner("ТаблицаЗначений"),
                MethodDef {
                    signatures: vec![Signature::new("НайтиПоЗначению")],
                    return_type: None,
                },
            ),
        ]);
        let index = SearchIndex::build(&catalog);
        (catalog, index)
    }

    #[test]
    fn test_compound_type_joins_two_words() {
        let (catalog, index) = fixture();
        let hits = compound_type("Справочник Объект", &index, &catalog, Language::Auto);
        assert_eq!(hits.len(), 1);
        assert_eq!(catalog.get(hits[0]).name_en(), "CatalogObject");
    }

    #[test]
    fn test_compound_type_rejects_non_letter_words() {
        let (catalog, index) = fixture();
        assert!(compound_type("Справочник 1", &index, &catalog, Language::Auto).is_empty());
        assert!(compound_type("один два три", &index, &catalog, Language::Auto).is_empty());
    }

    #[test]
    fn test_type_member_dot_pattern() {
        let (catalog, index) = fixture();
        let hits = type_member("ТаблицаЗначений.Добавить", &index, &catalog, Language::Auto);
        assert_eq!(hits.len(), 1);
        assert_eq!(catalog.get(hits[0]).name_en(), "Add");
        assert_eq!(
            catalog.get(hits[0]).owner_type_name(),
            Some("ТаблицаЗначений")
        );
    }

    #[test]
    fn test_type_member_space_pattern_and_prefix() {
        let (catalog, index) = fixture();
        let hits = type_member("ValueTable Найти", &index, &catalog, Language::Auto);
        assert_eq!(hits.len(), 1);
        assert_eq!(catalog.get(hits[0]).name_en(), "FindByValue");
    }

    #[test]
    fn test_type_member_exact_precedes_prefix() {
        let catalog = Catalog::build(vec![
            Definition::platform_type(DefHeader::new("Массив", "Array"), TypeDef::default()),
            Definition::method(
                DefHeader::new("Найти", "Find").with_owner("Массив"),
                MethodDef {
                    signatures: vec![Signature::new("Найти")],
                    return_type: None,
                },
            ),
            Definition::method(
                DefHeader::new("НайтиПоЗначению", "FindByValue").with_owner("Массив"),
                MethodDef {
                    signatures: vec![Signature::new("НайтиПоЗначению")],
                    return_type: None,
                },
            ),
        ]);
        let index = SearchIndex::build(&catalog);
        let hits = type_member("Массив.Найти", &index, &catalog, Language::Auto);
        assert_eq!(hits.len(), 2);
        assert_eq!(catalog.get(hits[0]).name_en(), "Find");
        assert_eq!(catalog.get(hits[1]).name_en(), "FindByValue");
    }

    #[test]
    fn test_regular_exact_beats_prefix() {
        let (catalog, index) = fixture();
        let hits = regular("valuetable", &index, &catalog, Language::Auto);
        assert_eq!(hits.len(), 1);
        assert_eq!(catalog.get(hits[0]).name_en(), "ValueTable");
    }

    #[test]
    fn test_regular_prefix_fallback() {
        let (catalog, index) = fixture();
        let hits = regular("Valu", &index, &catalog, Language::Auto);
        assert_eq!(hits.len(), 1);
        assert_eq!(catalog.get(hits[0]).name_en(), "ValueTable");
    }

    #[test]
    fn test_regular_language_restriction() {
        let (catalog, index) = fixture();
        assert!(!regular("ValueTable", &index, &catalog, Language::En).is_empty());
        assert!(regular("ValueTable", &index, &catalog, Language::Ru).is_empty());
    }

    #[test]
    fn test_word_order_subsequence() {
        let (catalog, index) = fixture();
        let hits = word_order("find value", &index, &catalog, Language::Auto);
        assert_eq!(hits.len(), 1);
        assert_eq!(catalog.get(hits[0]).name_en(), "FindByValue");
    }

    #[test]
    fn test_word_order_requires_relative_order() {
        let (catalog, index) = fixture();
        assert!(word_order("value find", &index, &catalog, Language::Auto).is_empty());
    }

    #[test]
    fn test_word_order_shorter_names_first() {
        let catalog = Catalog::build(vec![
            Definition::platform_type(
                DefHeader::new("ЧтениеXML", "XMLReader"),
                TypeDef::default(),
            ),
            Definition::platform_type(
                DefHeader::new("БыстроеЧтениеДанныхXML", "XMLDataFastReader"),
                TypeDef::default(),
            ),
        ]);
        let index = SearchIndex::build(&catalog);
        let hits = word_order("xml reader", &index, &catalog, Language::Auto);
        assert_eq!(hits.len(), 2);
        assert_eq!(catalog.get(hits[0]).name_en(), "XMLReader");
    }

    #[test]
    fn test_subsequence_helper() {
        let q: Vec<String> = vec!["a".into(), "c".into()];
        let n: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        assert!(is_subsequence(&q, &n));
        let bad: Vec<String> = vec!["c".into(), "a".into()];
        assert!(!is_subsequence(&bad, &n));
    }
}

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

//! Name indexes over the catalog.
//!
//! Two complementary structures are built over every definition, once per
//! catalog, for each of its Russian and English names:
//!
//! - [`HashIndex`]: case-folded whole name → ids, for exact lookup.
//! - [`StartWithIndex`]: sorted (name, id) pairs answered by range scan,
//!   for prefix lookup. Keys are whole names, not materialized prefixes,
//!   which bounds memory to one entry per name.
//!
//! Indexes hold ids into the catalog, never cloned records.

use crate::catalog::{Catalog, DefId};
use crate::tokenize::fold_key;
use std::collections::HashMap;

/// Minimum prefix length answered by [`StartWithIndex::lookup`].
pub const MIN_PREFIX_LEN: usize = 2;

/// Case-folded whole-name index.
#[derive(Debug, Default)]
pub struct HashIndex {
    map: HashMap<String, Vec<DefId>>,
}

impl HashIndex {
    /// Ids of definitions whose folded name equals the folded `name`.
    pub fn lookup(&self, name: &str) -> &[DefId] {
        self.map
            .get(&fold_key(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn insert(&mut self, key: String, id: DefId) {
        let ids = self.map.entry(key).or_default();
        if ids.last() != Some(&id) {
            ids.push(id);
        }
    }
}

/// Prefix index: sorted folded names answered by binary-search range scan.
#[derive(Debug, Default)]
pub struct StartWithIndex {
    /// Sorted by name, then id.
    entries: Vec<(String, DefId)>,
}

impl StartWithIndex {
    /// Ids of definitions one of whose folded names starts with the folded
    /// `prefix`. Prefixes shorter than [`MIN_PREFIX_LEN`] characters return
    /// nothing. Results are ordered shorter name first, ties broken
    /// lexicographically, and contain each id once.
    pub fn lookup(&self, prefix: &str) -> Vec<DefId> {
        let prefix = fold_key(prefix);
        if prefix.chars().count() < MIN_PREFIX_LEN {
            return Vec::new();
        }
        let start = self
            .entries
            .partition_point(|(name, _)| name.as_str() < prefix.as_str());
        let mut matches: Vec<&(String, DefId)> = self.entries[start..]
            .iter()
            .take_while(|(name, _)| name.starts_with(&prefix))
            .collect();
        matches.sort_by(|(a, ia), (b, ib)| {
            a.chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b))
                .then_with(|| ia.cmp(ib))
        });
        let mut seen = std::collections::HashSet::new();
        matches
            .into_iter()
            .filter(|(_, id)| seen.insert(*id))
            .map(|(_, id)| *id)
            .collect()
    }

    fn finish(&mut self) {
        self.entries.sort();
        self.entries.dedup();
    }
}

/// Both indexes, built together from one catalog snapshot.
#[derive(Debug, Default)]
pub struct SearchIndex {
    pub hash: HashIndex,
    pub prefix: StartWithIndex,
}

impl SearchIndex {
    /// Index every definition under its folded Russian and English names.
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = Self::default();
        for (id, def) in catalog.all() {
            let ru = fold_key(def.name_ru());
            let en = fold_key(def.name_en());
            index.prefix.entries.push((ru.clone(), id));
            index.hash.insert(ru.clone(), id);
            if en != ru {
                index.prefix.entries.push((en.clone(), id));
                index.hash.insert(en, id);
            }
        }
        index.prefix.finish();
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DefHeader, Definition, PropertyDef, TypeDef};

    fn catalog() -> Catalog {
        Catalog::build(vec![
            Definition::platform_type(DefHeader::new("Массив", "Array"), TypeDef::default()),
            Definition::platform_type(
                DefHeader::new("ТаблицаЗначений", "ValueTable"),
                TypeDef::default(),
            ),
            Definition::platform_type(
                DefHeader::new("СписокЗначений", "ValueList"),
                TypeDef::default(),
            ),
            Definition::property(
                DefHeader::new("Значение", "Value").with_owner("СписокЗначений"),
                PropertyDef {
                    type_name: "Произвольный".into(),
                    readonly: false,
                },
            ),
        ])
    }

    #[test]
    fn test_hash_lookup_exact_both_languages() {
        let catalog = catalog();
        let index = SearchIndex::build(&catalog);
        assert_eq!(index.hash.lookup("массив").len(), 1);
        assert_eq!(index.hash.lookup("ARRAY").len(), 1);
        assert_eq!(index.hash.lookup("массив"), index.hash.lookup("Array"));
        assert!(index.hash.lookup("словарь").is_empty());
    }

    #[test]
    fn test_prefix_lookup_orders_shorter_names_first() {
        let catalog = catalog();
        let index = SearchIndex::build(&catalog);
        let hits = index.prefix.lookup("value");
        assert_eq!(hits.len(), 3);
        // "value" (5) before "valuelist" (9) before "valuetable" (10).
        assert_eq!(catalog.get(hits[0]).name_en(), "Value");
        assert_eq!(catalog.get(hits[1]).name_en(), "ValueList");
        assert_eq!(catalog.get(hits[2]).name_en(), "ValueTable");
    }

    #[test]
    fn test_prefix_lookup_cyrillic() {
        let catalog = catalog();
        let index = SearchIndex::build(&catalog);
        let hits = index.prefix.lookup("Табл");
        assert_eq!(hits.len(), 1);
        assert_eq!(catalog.get(hits[0]).name_ru(), "ТаблицаЗначений");
    }

    #[test]
    fn test_prefix_lookup_rejects_short_prefix() {
        let catalog = catalog();
        let index = SearchIndex::build(&catalog);
        assert!(index.prefix.lookup("v").is_empty());
        assert!(index.prefix.lookup("").is_empty());
    }

    #[test]
    fn test_prefix_lookup_no_duplicates() {
        // A mirrored bilingual name folds to one key and must not produce
        // the same id twice.
        let catalog = Catalog::build(vec![Definition::platform_type(
            DefHeader::new("Структура", ""),
            TypeDef::default(),
        )]);
        let index = SearchIndex::build(&catalog);
        let hits = index.prefix.lookup("ст");
        assert_eq!(hits.len(), 1);
    }
}

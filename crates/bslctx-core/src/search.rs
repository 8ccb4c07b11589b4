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

//! Search service: validation, strategy cascade, deduplication.
//!
//! Result ordering is by strategy priority, then by each strategy's own
//! tie-break; there is no cross-strategy relevance score. Repeated calls
//! with the same query over the same catalog return identical sequences.

use crate::catalog::{Catalog, DefId};
use crate::error::{QueryError, QueryResult};
use crate::index::SearchIndex;
use crate::model::{ApiKind, Definition};
use crate::strategy::{Language, STRATEGIES};
use crate::tokenize::fold_key;
use std::collections::HashSet;
use tracing::debug;

/// Default result limit when the caller does not pass one.
pub const DEFAULT_LIMIT: usize = 50;

/// Options accepted by [`SearchService::search`].
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Restrict results to one definition kind.
    pub kind: Option<ApiKind>,
    /// Maximum number of results; must be positive.
    pub limit: usize,
    /// Name namespace to match against.
    pub language: Language,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            kind: None,
            limit: DEFAULT_LIMIT,
            language: Language::Auto,
        }
    }
}

/// Read-only lookup facade over one catalog snapshot.
///
/// Construction builds both indexes; afterwards every operation is a pure
/// read, safe to call from any number of threads in parallel.
#[derive(Debug)]
pub struct SearchService {
    catalog: Catalog,
    index: SearchIndex,
}

impl SearchService {
    /// Build the indexes over `catalog` and wrap it.
    pub fn new(catalog: Catalog) -> Self {
        let index = SearchIndex::build(&catalog);
        Self { catalog, index }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fuzzy bilingual lookup.
    ///
    /// Applies the strategy cascade in priority order, concatenates the
    /// outputs, filters by kind, deduplicates by
    /// `(kind, case-folded name, owner)` with the first occurrence winning,
    /// and truncates to `options.limit`.
    pub fn search(&self, query: &str, options: &SearchOptions) -> QueryResult<Vec<&Definition>> {
        if query.trim().is_empty() {
            return Err(QueryError::invalid("query must not be empty"));
        }
        if options.limit == 0 {
            return Err(QueryError::invalid("limit must be positive"));
        }

        let mut candidates: Vec<DefId> = Vec::new();
        for (name, strategy) in STRATEGIES {
            let hits = strategy(query, &self.index, &self.catalog, options.language);
            if !hits.is_empty() {
                debug!(strategy = name, hits = hits.len(), "strategy matched");
            }
            candidates.extend(hits);
        }

        let mut seen: HashSet<(ApiKind, String, Option<String>)> = HashSet::new();
        let mut results = Vec::new();
        for id in candidates {
            let def = self.catalog.get(id);
            if let Some(kind) = options.kind {
                if def.kind() != kind {
                    continue;
                }
            }
            let dedup_key = (
                def.kind(),
                fold_key(def.name_ru()),
                def.owner_type_name().map(fold_key),
            );
            if !seen.insert(dedup_key) {
                continue;
            }
            results.push(def);
            if results.len() == options.limit {
                break;
            }
        }
        Ok(results)
    }

    /// Exact lookup of one definition by name and kind.
    pub fn info(&self, name: &str, kind: ApiKind) -> QueryResult<&Definition> {
        self.index
            .hash
            .lookup(name)
            .iter()
            .map(|&id| self.catalog.get(id))
            .find(|def| def.kind() == kind)
            .ok_or_else(|| QueryError::not_found(format!("{} '{}'", kind, name)))
    }

    /// One member (method or property) of a type, by name in either language.
    pub fn get_member(&self, type_name: &str, member_name: &str) -> QueryResult<&Definition> {
        let members = self.resolve_members(type_name)?;
        let key = fold_key(member_name);
        members
            .into_iter()
            .find(|def| fold_key(def.name_ru()) == key || fold_key(def.name_en()) == key)
            .ok_or_else(|| {
                QueryError::not_found(format!("member '{}' of '{}'", member_name, type_name))
            })
    }

    /// All methods and properties of a type, in source order.
    pub fn get_members(&self, type_name: &str) -> QueryResult<Vec<&Definition>> {
        self.resolve_members(type_name)
    }

    /// Constructor definitions of a type, in source order.
    pub fn get_constructors(&self, type_name: &str) -> QueryResult<Vec<&Definition>> {
        self.resolve_type(type_name)?;
        Ok(self
            .catalog
            .constructors_of(type_name)
            .into_iter()
            .map(|id| self.catalog.get(id))
            .collect())
    }

    fn resolve_type(&self, type_name: &str) -> QueryResult<DefId> {
        self.catalog
            .type_id_by_key(type_name)
            .ok_or_else(|| QueryError::not_found(format!("type '{}'", type_name)))
    }

    fn resolve_members(&self, type_name: &str) -> QueryResult<Vec<&Definition>> {
        self.resolve_type(type_name)?;
        Ok(self
            .catalog
            .members_of(type_name)
            .into_iter()
            .map(|id| self.catalog.get(id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ConstructorDef, DefHeader, MethodDef, PropertyDef, Signature, TypeDef,
    };

    fn service() -> SearchService {
        SearchService::new(Catalog::build(vec![
            Definition::platform_type(
                DefHeader::new("СправочникОбъект", "CatalogObject"),
                TypeDef::default(),
            ),
            Definition::platform_type(
                DefHeader::new("ТаблицаЗначений", "ValueTable"),
                TypeDef::default(),
            ),
            Definition::platform_type(DefHeader::new("Массив", "Array"), TypeDef::default()),
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
            Definition::constructor(
                DefHeader::new("По умолчанию", "Default").with_owner("Массив"),
                ConstructorDef {
                    signature: Signature::new("Массив"),
                },
            ),
            Definition::platform_type(
                DefHeader::new("СписокЗначений", "ValueList"),
                TypeDef::default(),
            ),
            Definition::platform_type(
                DefHeader::new("ХранилищеЗначения", "ValueStorage"),
                TypeDef::default(),
            ),
        ]))
    }

    #[test]
    fn test_search_rejects_empty_query() {
        let service = service();
        let err = service.search("   ", &SearchOptions::default()).unwrap_err();
        assert!(matches!(err, QueryError::InvalidQuery(_)));
    }

    #[test]
    fn test_search_rejects_zero_limit() {
        let service = service();
        let options = SearchOptions {
            limit: 0,
            ..Default::default()
        };
        let err = service.search("Массив", &options).unwrap_err();
        assert!(matches!(err, QueryError::InvalidQuery(_)));
    }

    #[test]
    fn test_compound_query_first_result() {
        let service = service();
        let results = service
            .search("Справочник Объект", &SearchOptions::default())
            .unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].name_ru(), "СправочникОбъект");
        assert_eq!(results[0].name_en(), "CatalogObject");
    }

    #[test]
    fn test_type_member_query_first_result() {
        let service = service();
        let results = service
            .search("ТаблицаЗначений.Добавить", &SearchOptions::default())
            .unwrap();
        assert_eq!(results[0].name_en(), "Add");
        assert_eq!(results[0].owner_type_name(), Some("ТаблицаЗначений"));
    }

    #[test]
    fn test_prefix_query_limit_and_distinct() {
        let service = service();
        let options = SearchOptions {
            limit: 5,
            ..Default::default()
        };
        let results = service.search("Value", &options).unwrap();
        assert!(!results.is_empty());
        assert!(results.len() <= 5);
        for def in &results {
            assert!(fold_key(def.name_en()).starts_with("value"));
        }
        let mut keys: Vec<_> = results
            .iter()
            .map(|d| (d.kind(), fold_key(d.name_ru())))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), results.len());
    }

    #[test]
    fn test_search_case_insensitive() {
        let service = service();
        let a = service
            .search("ТаблицаЗначений", &SearchOptions::default())
            .unwrap();
        let b = service
            .search("таблицазначений", &SearchOptions::default())
            .unwrap();
        let c = service
            .search("ТАБЛИЦАЗНАЧЕНИЙ", &SearchOptions::default())
            .unwrap();
        let names = |defs: &[&Definition]| -> Vec<String> {
            defs.iter().map(|d| d.name_ru().to_string()).collect()
        };
        assert_eq!(names(&a), names(&b));
        assert_eq!(names(&a), names(&c));
    }

    #[test]
    fn test_search_idempotent() {
        let service = service();
        let a = service.search("Список", &SearchOptions::default()).unwrap();
        let b = service.search("Список", &SearchOptions::default()).unwrap();
        let names = |defs: &[&Definition]| -> Vec<String> {
            defs.iter().map(|d| d.name_ru().to_string()).collect()
        };
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn test_kind_filter() {
        let service = service();
        let options = SearchOptions {
            kind: Some(ApiKind::Method),
            ..Default::default()
        };
        let results = service.search("Добавить", &options).unwrap();
        assert!(results.iter().all(|d| d.kind() == ApiKind::Method));
    }

    #[test]
    fn test_info() {
        let service = service();
        let def = service.info("массив", ApiKind::Type).unwrap();
        assert_eq!(def.name_en(), "Array");
        assert!(matches!(
            service.info("массив", ApiKind::Method),
            Err(QueryError::NotFound(_))
        ));
    }

    #[test]
    fn test_get_member_both_languages() {
        let service = service();
        let by_ru = service.get_member("ТаблицаЗначений", "Добавить").unwrap();
        let by_en = service.get_member("ValueTable", "Add").unwrap();
        assert_eq!(by_ru, by_en);
    }

    #[test]
    fn test_get_members_identity_across_languages() {
        let service = service();
        let ru = service.get_members("ТаблицаЗначений").unwrap();
        let en = service.get_members("ValueTable").unwrap();
        assert_eq!(ru, en);
        let names: Vec<_> = ru.iter().map(|d| d.name_en()).collect();
        assert!(names.contains(&"Add"));
        assert!(names.contains(&"Columns"));
    }

    #[test]
    fn test_get_constructors() {
        let service = service();
        let ctors = service.get_constructors("Массив").unwrap();
        assert_eq!(ctors.len(), 1);
        assert!(matches!(
            service.get_constructors("НеТип"),
            Err(QueryError::NotFound(_))
        ));
    }

    #[test]
    fn test_member_reachable_globally_and_through_type() {
        let service = service();
        let global = service
            .search("Добавить", &SearchOptions::default())
            .unwrap();
        assert!(global.iter().any(|d| d.name_en() == "Add"));
        let member = service.get_member("ТаблицаЗначений", "Добавить").unwrap();
        assert_eq!(member.name_en(), "Add");
    }
}

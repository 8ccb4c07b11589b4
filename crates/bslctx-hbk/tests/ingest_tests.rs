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

//! End-to-end ingestion over complete sample containers in both dialects.

use bslctx_core::{ApiKind, Catalog, DefBody, SearchOptions, SearchService};
use bslctx_hbk::{ingest_bytes, TocDialect};
use bslctx_test::sample;

#[test]
fn test_modern_container_ingests() {
    let report = ingest_bytes(&sample::modern_container()).unwrap();
    assert_eq!(report.dialect, TocDialect::Modern);

    let catalog = Catalog::build(report.definitions);
    assert!(catalog.type_id_by_key("ТаблицаЗначений").is_some());
    assert!(catalog.type_id_by_key("Массив").is_some());
    assert!(catalog.type_id_by_key("ВидСравнения").is_some());
}

#[test]
fn test_legacy_container_ingests() {
    let report = ingest_bytes(&sample::legacy_container()).unwrap();
    assert_eq!(report.dialect, TocDialect::Legacy);

    let catalog = Catalog::build(report.definitions);
    assert!(catalog.type_id_by_key("valuetable").is_some());
    assert!(catalog.type_id_by_key("array").is_some());
}

#[test]
fn test_missing_page_is_warning_not_error() {
    let report = ingest_bytes(&sample::modern_container()).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].page_path, "/objects/missing.html");

    // The lost method is omitted; everything else survives.
    let catalog = Catalog::build(report.definitions);
    assert!(catalog.by_key("Потерянный").is_empty());
    assert!(!catalog.by_key("Добавить").is_empty());
}

#[test]
fn test_dialects_agree_on_catalog_content() {
    let modern = ingest_bytes(&sample::modern_container()).unwrap();
    let legacy = ingest_bytes(&sample::legacy_container()).unwrap();

    let modern_catalog = Catalog::build(modern.definitions);
    let legacy_catalog = Catalog::build(legacy.definitions);

    for catalog in [&modern_catalog, &legacy_catalog] {
        let ids = catalog.by_key("массив");
        assert_eq!(ids.len(), 1);
        let array = catalog.get(ids[0]);
        assert_eq!(array.kind(), ApiKind::Type);
        assert_eq!(array.name_en(), "Array");
    }
    assert_eq!(modern_catalog.len(), legacy_catalog.len());
}

#[test]
fn test_member_pages_attach_to_owner() {
    let report = ingest_bytes(&sample::modern_container()).unwrap();
    let catalog = Catalog::build(report.definitions);

    let members = catalog.members_of("ТаблицаЗначений");
    let names: Vec<_> = members
        .iter()
        .map(|&id| catalog.get(id).name_en().to_string())
        .collect();
    assert!(names.contains(&"Add".to_string()));
    assert!(names.contains(&"Columns".to_string()));

    let ctors = catalog.constructors_of("Массив");
    assert_eq!(ctors.len(), 1);
    match &catalog.get(ctors[0]).body {
        DefBody::Constructor(c) => {
            assert_eq!(c.signature.parameters.len(), 1);
            assert!(c.signature.parameters[0].optional);
        }
        other => panic!("expected constructor body, got {:?}", other),
    }
}

#[test]
fn test_enum_values_are_members_of_enum_type() {
    let report = ingest_bytes(&sample::legacy_container()).unwrap();
    let catalog = Catalog::build(report.definitions);

    let members = catalog.members_of("ВидСравнения");
    assert_eq!(members.len(), 2);
    for &id in &members {
        let def = catalog.get(id);
        assert_eq!(def.kind(), ApiKind::Property);
        assert_eq!(def.owner_type_name(), Some("ВидСравнения"));
    }
}

#[test]
fn test_ingested_catalog_answers_searches() {
    let report = ingest_bytes(&sample::modern_container()).unwrap();
    let service = SearchService::new(Catalog::build(report.definitions));

    let results = service
        .search("ТаблицаЗначений.Добавить", &SearchOptions::default())
        .unwrap();
    assert_eq!(results[0].name_en(), "Add");
    assert_eq!(results[0].owner_type_name(), Some("ТаблицаЗначений"));

    let members = service.get_members("ValueTable").unwrap();
    assert_eq!(members, service.get_members("ТаблицаЗначений").unwrap());

    let ctors = service.get_constructors("Массив").unwrap();
    assert!(!ctors.is_empty());
}

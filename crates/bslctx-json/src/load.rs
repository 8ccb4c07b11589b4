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

//! Export file records and the directory loader.

use bslctx_core::{
    ConstructorDef, DefHeader, Definition, MethodDef, Parameter, PropertyDef, Signature, TypeDef,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const TYPES_FILE: &str = "types.json";
pub const METHODS_FILE: &str = "methods.json";
pub const PROPERTIES_FILE: &str = "properties.json";
pub const CONSTRUCTORS_FILE: &str = "constructors.json";

/// A fatal JSON ingestion failure.
#[derive(Debug, Error)]
pub enum JsonLoadError {
    #[error("io error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// None of the export files exist in the directory.
    #[error("no export files found in {}", .0.display())]
    MissingExport(PathBuf),
}

/// Result type for JSON ingestion.
pub type JsonResult<T> = Result<T, JsonLoadError>;

// Export records mirror the domain entities field-for-field; they stay
// private so serde shapes can evolve independently of the core model.

#[derive(Debug, Deserialize)]
struct TypeRecord {
    #[serde(default)]
    name_ru: String,
    #[serde(default)]
    name_en: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    collection_element_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ParameterRecord {
    name: String,
    #[serde(default)]
    type_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SignatureRecord {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    parameters: Vec<ParameterRecord>,
}

#[derive(Debug, Deserialize)]
struct MethodRecord {
    #[serde(default)]
    name_ru: String,
    #[serde(default)]
    name_en: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    owner_type_name: Option<String>,
    #[serde(default)]
    return_type: Option<String>,
    #[serde(default)]
    signatures: Vec<SignatureRecord>,
}

#[derive(Debug, Deserialize)]
struct PropertyRecord {
    #[serde(default)]
    name_ru: String,
    #[serde(default)]
    name_en: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    owner_type_name: Option<String>,
    #[serde(default)]
    type_name: String,
    #[serde(default)]
    readonly: bool,
}

#[derive(Debug, Deserialize)]
struct ConstructorRecord {
    #[serde(default)]
    name_ru: String,
    #[serde(default)]
    name_en: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    owner_type_name: Option<String>,
    #[serde(default)]
    signature: Option<SignatureRecord>,
}

/// Load all export files from `dir` into definition records.
///
/// Types come first so member back-references resolve regardless of file
/// ordering concerns downstream.
pub fn load_dir(dir: &Path) -> JsonResult<Vec<Definition>> {
    let mut defs = Vec::new();
    let mut found = false;

    if let Some(records) = read_file::<TypeRecord>(dir, TYPES_FILE)? {
        found = true;
        for record in records {
            defs.push(Definition::platform_type(
                header(record.name_ru, record.name_en, record.description, None),
                TypeDef {
                    collection_element_type: record.collection_element_type,
                },
            ));
        }
    }

    if let Some(records) = read_file::<MethodRecord>(dir, METHODS_FILE)? {
        found = true;
        for record in records {
            defs.push(Definition::method(
                header(
                    record.name_ru,
                    record.name_en,
                    record.description,
                    record.owner_type_name,
                ),
                MethodDef {
                    signatures: record.signatures.into_iter().map(signature).collect(),
                    return_type: record.return_type,
                },
            ));
        }
    }

    if let Some(records) = read_file::<PropertyRecord>(dir, PROPERTIES_FILE)? {
        found = true;
        for record in records {
            defs.push(Definition::property(
                header(
                    record.name_ru,
                    record.name_en,
                    record.description,
                    record.owner_type_name,
                ),
                PropertyDef {
                    type_name: record.type_name,
                    readonly: record.readonly,
                },
            ));
        }
    }

    if let Some(records) = read_file::<ConstructorRecord>(dir, CONSTRUCTORS_FILE)? {
        found = true;
        for record in records {
            let Some(owner) = record.owner_type_name else {
                warn!(name = record.name_ru.as_str(), "constructor without owner skipped");
                continue;
            };
            let head = header(
                record.name_ru,
                record.name_en,
                record.description,
                Some(owner.clone()),
            );
            let sig = record
                .signature
                .map(signature)
                .unwrap_or_else(|| Signature::new(owner));
            defs.push(Definition::constructor(head, ConstructorDef {
                signature: sig,
            }));
        }
    }

    if !found {
        return Err(JsonLoadError::MissingExport(dir.to_path_buf()));
    }
    info!(definitions = defs.len(), "json ingestion complete");
    Ok(defs)
}

fn header(
    name_ru: String,
    name_en: String,
    description: String,
    owner: Option<String>,
) -> DefHeader {
    let mut header = DefHeader::new(name_ru, name_en).with_description(description);
    if let Some(owner) = owner {
        header = header.with_owner(owner);
    }
    header
}

fn signature(record: SignatureRecord) -> Signature {
    Signature {
        name: record.name,
        description: record.description,
        parameters: record
            .parameters
            .into_iter()
            .map(|p| Parameter {
                name: p.name,
                type_name: p.type_name,
                description: p.description,
                optional: p.optional,
                default_value: p.default_value,
            })
            .collect(),
    }
}

/// Read one export file; `Ok(None)` when the file does not exist.
fn read_file<T: serde::de::DeserializeOwned>(
    dir: &Path,
    file: &str,
) -> JsonResult<Option<Vec<T>>> {
    let path = dir.join(file);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|source| JsonLoadError::Io {
        path: path.clone(),
        source,
    })?;
    let records = serde_json::from_str(&content)
        .map_err(|source| JsonLoadError::Parse { path, source })?;
    Ok(Some(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bslctx_core::{ApiKind, Catalog, DefBody};
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, content: &str) {
        std::fs::write(dir.path().join(file), content).unwrap();
    }

    fn sample_export(dir: &TempDir) {
        write(
            dir,
            TYPES_FILE,
            r#"[
                {"name_ru": "ТаблицаЗначений", "name_en": "ValueTable",
                 "description": "Коллекция строк.",
                 "collection_element_type": "СтрокаТаблицыЗначений"},
                {"name_ru": "Массив", "name_en": "Array"}
            ]"#,
        );
        write(
            dir,
            METHODS_FILE,
            r#"[
                {"name_ru": "Добавить", "name_en": "Add",
                 "owner_type_name": "ТаблицаЗначений",
                 "return_type": "СтрокаТаблицыЗначений",
                 "signatures": [{"name": "Добавить", "parameters": [
                     {"name": "Значение", "type_name": "Произвольный", "optional": true}
                 ]}]}
            ]"#,
        );
        write(
            dir,
            PROPERTIES_FILE,
            r#"[
                {"name_ru": "Колонки", "name_en": "Columns",
                 "owner_type_name": "ТаблицаЗначений",
                 "type_name": "КоллекцияКолонок", "readonly": true}
            ]"#,
        );
        write(
            dir,
            CONSTRUCTORS_FILE,
            r#"[
                {"name_ru": "По умолчанию", "name_en": "Default",
                 "owner_type_name": "Массив",
                 "signature": {"name": "Массив", "parameters": []}}
            ]"#,
        );
    }

    #[test]
    fn test_load_full_export() {
        let dir = TempDir::new().unwrap();
        sample_export(&dir);
        let defs = load_dir(dir.path()).unwrap();
        assert_eq!(defs.len(), 5);

        let catalog = Catalog::build(defs);
        let members = catalog.members_of("ТаблицаЗначений");
        assert_eq!(members.len(), 2);
        assert_eq!(catalog.constructors_of("Массив").len(), 1);
    }

    #[test]
    fn test_missing_file_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        write(&dir, TYPES_FILE, r#"[{"name_ru": "Массив", "name_en": "Array"}]"#);
        let defs = load_dir(dir.path()).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].kind(), ApiKind::Type);
    }

    #[test]
    fn test_empty_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, JsonLoadError::MissingExport(_)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, TYPES_FILE, "не json");
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, JsonLoadError::Parse { .. }));
    }

    #[test]
    fn test_bilingual_mirror_on_partial_record() {
        let dir = TempDir::new().unwrap();
        write(&dir, TYPES_FILE, r#"[{"name_ru": "Соответствие"}]"#);
        let defs = load_dir(dir.path()).unwrap();
        assert_eq!(defs[0].name_ru(), "Соответствие");
        assert_eq!(defs[0].name_en(), "Соответствие");
    }

    #[test]
    fn test_method_signature_shape() {
        let dir = TempDir::new().unwrap();
        sample_export(&dir);
        let defs = load_dir(dir.path()).unwrap();
        let add = defs.iter().find(|d| d.name_en() == "Add").unwrap();
        match &add.body {
            DefBody::Method(m) => {
                assert_eq!(m.signatures.len(), 1);
                let param = &m.signatures[0].parameters[0];
                assert_eq!(param.name, "Значение");
                assert!(param.optional);
            }
            other => panic!("expected method body, got {:?}", other),
        }
    }
}

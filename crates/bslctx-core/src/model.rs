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

//! Domain records for the platform API reference.
//!
//! Every cataloged element is a [`Definition`]: a shared bilingual header
//! plus a kind-specific body. Records are immutable after construction;
//! the catalog and indexes reference them by id and never mutate them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind tag of a cataloged API element.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
    Method,
    Property,
    Type,
    Constructor,
}

impl ApiKind {
    /// Stable lowercase identifier, used in tool arguments and results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Property => "property",
            Self::Type => "type",
            Self::Constructor => "constructor",
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApiKind {
    type Err = String;

    /// Case-insensitive; accepts the Russian surface forms used by the
    /// syntax helper alongside the English identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "method" | "метод" => Ok(Self::Method),
            "property" | "свойство" => Ok(Self::Property),
            "type" | "тип" => Ok(Self::Type),
            "constructor" | "конструктор" => Ok(Self::Constructor),
            other => Err(format!("unknown api kind: '{}'", other)),
        }
    }
}

/// Shared header carried by every definition.
///
/// Both display names are guaranteed non-empty: a missing language is
/// populated by mirroring the other at construction time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DefHeader {
    /// Russian display name.
    pub name_ru: String,
    /// English display name.
    pub name_en: String,
    /// Free-text description, possibly empty.
    #[serde(default)]
    pub description: String,
    /// Name of the owning type; absent for top-level types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_type_name: Option<String>,
}

impl DefHeader {
    /// Create a header, mirroring a missing language name.
    pub fn new(name_ru: impl Into<String>, name_en: impl Into<String>) -> Self {
        let ru = name_ru.into().trim().to_string();
        let en = name_en.into().trim().to_string();
        let (name_ru, name_en) = match (ru.is_empty(), en.is_empty()) {
            (true, false) => (en.clone(), en),
            (false, true) => (ru.clone(), ru),
            _ => (ru, en),
        };
        Self {
            name_ru,
            name_en,
            description: String::new(),
            owner_type_name: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach the owning type name.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner_type_name = Some(owner.into());
        self
    }
}

/// One formal parameter of a signature.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// One syntax variant of a method or constructor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Signature {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: Vec::new(),
        }
    }
}

/// Body of a method definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MethodDef {
    /// Ordered, non-empty sequence of syntax variants.
    pub signatures: Vec<Signature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// Body of a property definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PropertyDef {
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub readonly: bool,
}

/// Body of a top-level platform type definition.
///
/// Member aggregation lives in the catalog (members are definitions of
/// their own); the record only carries data owned by the type page itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TypeDef {
    /// Element type for iterable collection types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_element_type: Option<String>,
}

/// Body of a constructor definition, owned by a platform type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConstructorDef {
    pub signature: Signature,
}

/// Kind-specific payload of a [`Definition`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DefBody {
    Method(MethodDef),
    Property(PropertyDef),
    Type(TypeDef),
    Constructor(ConstructorDef),
}

/// A single cataloged API element.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Definition {
    #[serde(flatten)]
    pub header: DefHeader,
    #[serde(flatten)]
    pub body: DefBody,
}

impl Definition {
    /// Construct a method definition. Callers supply at least one signature;
    /// an empty list is normalized to a single bare variant named after the
    /// method so the non-empty invariant holds.
    pub fn method(header: DefHeader, mut method: MethodDef) -> Self {
        if method.signatures.is_empty() {
            method.signatures.push(Signature::new(header.name_ru.clone()));
        }
        Self {
            header,
            body: DefBody::Method(method),
        }
    }

    pub fn property(header: DefHeader, property: PropertyDef) -> Self {
        Self {
            header,
            body: DefBody::Property(property),
        }
    }

    pub fn platform_type(header: DefHeader, type_def: TypeDef) -> Self {
        Self {
            header,
            body: DefBody::Type(type_def),
        }
    }

    pub fn constructor(header: DefHeader, ctor: ConstructorDef) -> Self {
        Self {
            header,
            body: DefBody::Constructor(ctor),
        }
    }

    /// The kind tag of this definition.
    pub fn kind(&self) -> ApiKind {
        match &self.body {
            DefBody::Method(_) => ApiKind::Method,
            DefBody::Property(_) => ApiKind::Property,
            DefBody::Type(_) => ApiKind::Type,
            DefBody::Constructor(_) => ApiKind::Constructor,
        }
    }

    pub fn name_ru(&self) -> &str {
        &self.header.name_ru
    }

    pub fn name_en(&self) -> &str {
        &self.header.name_en
    }

    pub fn description(&self) -> &str {
        &self.header.description
    }

    pub fn owner_type_name(&self) -> Option<&str> {
        self.header.owner_type_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            ApiKind::Method,
            ApiKind::Property,
            ApiKind::Type,
            ApiKind::Constructor,
        ] {
            let parsed: ApiKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_kind_from_russian() {
        assert_eq!("Метод".parse::<ApiKind>().unwrap(), ApiKind::Method);
        assert_eq!("свойство".parse::<ApiKind>().unwrap(), ApiKind::Property);
        assert_eq!("ТИП".parse::<ApiKind>().unwrap(), ApiKind::Type);
        assert_eq!(
            "конструктор".parse::<ApiKind>().unwrap(),
            ApiKind::Constructor
        );
    }

    #[test]
    fn test_kind_unknown() {
        assert!("module".parse::<ApiKind>().is_err());
    }

    #[test]
    fn test_header_mirrors_missing_english() {
        let header = DefHeader::new("Массив", "");
        assert_eq!(header.name_ru, "Массив");
        assert_eq!(header.name_en, "Массив");
    }

    #[test]
    fn test_header_mirrors_missing_russian() {
        let header = DefHeader::new("  ", "Array");
        assert_eq!(header.name_ru, "Array");
        assert_eq!(header.name_en, "Array");
    }

    #[test]
    fn test_header_trims_names() {
        let header = DefHeader::new(" Массив ", " Array ");
        assert_eq!(header.name_ru, "Массив");
        assert_eq!(header.name_en, "Array");
    }

    #[test]
    fn test_method_normalizes_empty_signatures() {
        let def = Definition::method(
            DefHeader::new("Добавить", "Add"),
            MethodDef {
                signatures: Vec::new(),
                return_type: None,
            },
        );
        match &def.body {
            DefBody::Method(m) => {
                assert_eq!(m.signatures.len(), 1);
                assert_eq!(m.signatures[0].name, "Добавить");
            }
            _ => panic!("expected method body"),
        }
    }

    #[test]
    fn test_definition_kind_tags() {
        let t = Definition::platform_type(DefHeader::new("Массив", "Array"), TypeDef::default());
        assert_eq!(t.kind(), ApiKind::Type);

        let p = Definition::property(
            DefHeader::new("Количество", "Count").with_owner("Массив"),
            PropertyDef {
                type_name: "Число".into(),
                readonly: true,
            },
        );
        assert_eq!(p.kind(), ApiKind::Property);
        assert_eq!(p.owner_type_name(), Some("Массив"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let def = Definition::method(
            DefHeader::new("Добавить", "Add").with_owner("ТаблицаЗначений"),
            MethodDef {
                signatures: vec![Signature {
                    name: "Добавить".into(),
                    description: String::new(),
                    parameters: vec![Parameter {
                        name: "Значение".into(),
                        type_name: "Произвольный".into(),
                        description: String::new(),
                        optional: true,
                        default_value: None,
                    }],
                }],
                return_type: Some("СтрокаТаблицыЗначений".into()),
            },
        );
        let json = serde_json::to_string(&def).unwrap();
        let back: Definition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
        assert!(json.contains("\"kind\":\"method\""));
    }
}

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

//! In-memory catalog of API definitions.
//!
//! Construction is two-pass: materialize every definition, then resolve
//! `owner_type_name` back-references and attach members to their owning
//! type. The catalog is read-only after [`Catalog::build`] returns.

use crate::model::{ApiKind, Definition};
use crate::tokenize::fold_key;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Stable handle of a definition inside one catalog.
pub type DefId = u32;

/// Member ids attached to one platform type, in source order.
#[derive(Debug, Clone, Default)]
pub struct TypeMembers {
    pub methods: Vec<DefId>,
    pub properties: Vec<DefId>,
    pub constructors: Vec<DefId>,
}

/// Read-only store of all definitions, keyed by canonical name and by
/// owning type.
#[derive(Debug, Default)]
pub struct Catalog {
    defs: Vec<Definition>,
    /// Case-folded name (either language) → definition ids.
    by_key: HashMap<String, Vec<DefId>>,
    /// Owning type id → attached members. Keyed by id, not by name, so the
    /// Russian and English lookups of one type observe the same sequence.
    members: HashMap<DefId, TypeMembers>,
}

impl Catalog {
    /// Build a catalog from materialized definitions.
    ///
    /// Members whose `owner_type_name` resolves to no type stay globally
    /// searchable; the dangling reference is a warning, not an error.
    /// Within one type, member names are unique case-folded per namespace
    /// (methods and properties may overlap); the first occurrence wins.
    pub fn build(defs: Vec<Definition>) -> Self {
        let mut catalog = Self {
            defs,
            by_key: HashMap::new(),
            members: HashMap::new(),
        };

        // Pass 1: name keys.
        for (id, def) in catalog.defs.iter().enumerate() {
            let id = id as DefId;
            let ru = fold_key(def.name_ru());
            let en = fold_key(def.name_en());
            catalog.by_key.entry(ru.clone()).or_default().push(id);
            if en != ru {
                catalog.by_key.entry(en).or_default().push(id);
            }
        }

        // Pass 2: attach members to their owning type.
        let mut seen: HashMap<DefId, (HashSet<String>, HashSet<String>)> = HashMap::new();
        for id in 0..catalog.defs.len() as DefId {
            let def = &catalog.defs[id as usize];
            let Some(owner) = def.owner_type_name() else {
                continue;
            };
            let Some(type_id) = catalog.type_id_by_key(owner) else {
                warn!(owner, member = def.name_ru(), "owner type not in catalog");
                continue;
            };
            let key = fold_key(def.name_ru());
            let (method_names, property_names) = seen.entry(type_id).or_default();
            let slot = catalog.members.entry(type_id).or_default();
            match def.kind() {
                ApiKind::Method => {
                    if method_names.insert(key) {
                        slot.methods.push(id);
                    } else {
                        warn!(owner, method = def.name_ru(), "duplicate method name");
                    }
                }
                ApiKind::Property => {
                    if property_names.insert(key) {
                        slot.properties.push(id);
                    } else {
                        warn!(owner, property = def.name_ru(), "duplicate property name");
                    }
                }
                ApiKind::Constructor => slot.constructors.push(id),
                ApiKind::Type => {
                    // Nested type references are structural only.
                }
            }
        }

        catalog
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Definition by id. Ids handed out by this catalog are always valid.
    pub fn get(&self, id: DefId) -> &Definition {
        &self.defs[id as usize]
    }

    /// Case-folded exact lookup: 0..N definitions share a name.
    pub fn by_key(&self, key: &str) -> &[DefId] {
        self.by_key
            .get(&fold_key(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First definition of kind TYPE reachable under `key`.
    pub fn type_id_by_key(&self, key: &str) -> Option<DefId> {
        self.by_key(key)
            .iter()
            .copied()
            .find(|&id| self.get(id).kind() == ApiKind::Type)
    }

    /// Attached member ids of a type id.
    pub fn members_of_id(&self, type_id: DefId) -> Option<&TypeMembers> {
        self.members.get(&type_id)
    }

    /// Methods and properties of the type named `type_key`, in source order.
    pub fn members_of(&self, type_key: &str) -> Vec<DefId> {
        let Some(type_id) = self.type_id_by_key(type_key) else {
            return Vec::new();
        };
        match self.members.get(&type_id) {
            Some(m) => m
                .methods
                .iter()
                .chain(m.properties.iter())
                .copied()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Constructor definitions of the type named `type_key`.
    pub fn constructors_of(&self, type_key: &str) -> Vec<DefId> {
        let Some(type_id) = self.type_id_by_key(type_key) else {
            return Vec::new();
        };
        match self.members.get(&type_id) {
            Some(m) => m.constructors.clone(),
            None => Vec::new(),
        }
    }

    /// All definitions with their ids; used by the indexer.
    pub fn all(&self) -> impl Iterator<Item = (DefId, &Definition)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(id, def)| (id as DefId, def))
    }

    /// Definition counts per kind, for diagnostics.
    pub fn counts(&self) -> HashMap<ApiKind, usize> {
        let mut counts = HashMap::new();
        for def in &self.defs {
            *counts.entry(def.kind()).or_insert(0) += 1;
        }
        counts
    }
}

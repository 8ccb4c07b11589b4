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

//! Pre-exported JSON ingestion.
//!
//! The alternative to HBK ingestion for environments without the help
//! container: a directory of `types.json`, `methods.json`,
//! `properties.json` and `constructors.json`, each an array of records
//! mirroring the domain entities field-for-field. A missing file is an
//! empty collection; a directory with none of the four is an error.

mod load;

pub use load::{
    load_dir, JsonLoadError, JsonResult, CONSTRUCTORS_FILE, METHODS_FILE, PROPERTIES_FILE,
    TYPES_FILE,
};

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

//! Bracket-format TOC text for both container dialects.
//!
//! The two samples describe the same miniature reference:
//!
//! - Объекты: ТаблицаЗначений (method Добавить, property Колонки) and
//!   Массив (method Добавить, constructor, plus a method whose page is
//!   deliberately absent from the archive);
//! - Перечисления: ВидСравнения.

/// Modern dialect: quoted tags, `"ru"`/`"en"` codes, several roots.
pub fn modern_toc() -> String {
    r##"
{"#","Объекты","ru","",
  {"type","ТаблицаЗначений","ru","/objects/valuetable.html",
    {"method","Добавить","ru","/objects/valuetable/add.html"},
    {"property","Колонки","ru","/objects/valuetable/columns.html"}},
  {"type","Массив","ru","/objects/array.html",
    {"method","Добавить","ru","/objects/array/add.html"},
    {"ctor","По количеству элементов","ru","/objects/array/ctor.html"},
    {"method","Потерянный","ru","/objects/missing.html"}}}
{"#","Перечисления","ru","",
  {"type","ВидСравнения","ru","/enums/comparisontype.html"}}
"##
    .trim()
    .to_string()
}

/// Legacy dialect: bare numeric tags, language codes `1`/`2`, one root.
pub fn legacy_toc() -> String {
    r#"
{0,"Справка",1,"",
  {5,"Объекты",1,"",
    {1,"ТаблицаЗначений",1,"/objects/valuetable.html",
      {2,"Добавить",1,"/objects/valuetable/add.html"},
      {3,"Колонки",1,"/objects/valuetable/columns.html"}},
    {1,"Массив",1,"/objects/array.html",
      {2,"Добавить",1,"/objects/array/add.html"},
      {4,"По количеству элементов",1,"/objects/array/ctor.html"},
      {2,"Потерянный",1,"/objects/missing.html"}}},
  {5,"Перечисления",1,"",
    {1,"ВидСравнения",1,"/enums/comparisontype.html"}}}
"#
    .trim()
    .to_string()
}

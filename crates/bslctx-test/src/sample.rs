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

//! Complete sample containers, one per dialect, over the same catalog.

use crate::container::ContainerBuilder;
use crate::pages::{self, PageStyle, ParamRow, SignatureBlock};
use crate::toc;

/// A modern-dialect container: multi-page chains, quoted TOC, `V8SH_*` pages.
pub fn modern_container() -> Vec<u8> {
    let mut builder = ContainerBuilder::new()
        .page_size(256)
        .toc(&toc::modern_toc());
    for (path, html) in catalog_pages(PageStyle::Modern) {
        builder = builder.page_utf16(&path, &html);
    }
    builder.build()
}

/// A legacy-dialect container: single-page streams, bare TOC, `h1` pages.
pub fn legacy_container() -> Vec<u8> {
    let mut builder = ContainerBuilder::new().toc(&toc::legacy_toc());
    for (path, html) in catalog_pages(PageStyle::Legacy) {
        builder = builder.page_utf16(&path, &html);
    }
    builder.build()
}

/// The shared page set. `/objects/missing.html` from the TOC is deliberately
/// not present, so ingestion reports exactly one skipped page.
fn catalog_pages(style: PageStyle) -> Vec<(String, String)> {
    vec![
        (
            "objects/valuetable.html".to_string(),
            pages::type_page(
                style,
                "ТаблицаЗначений (ValueTable)",
                "Коллекция строк с произвольным набором типизированных колонок.",
                Some("СтрокаТаблицыЗначений"),
            ),
        ),
        (
            "objects/valuetable/add.html".to_string(),
            pages::method_page(
                style,
                "Добавить (Add)",
                &[SignatureBlock::new("Добавить", Vec::new())],
                Some("СтрокаТаблицыЗначений"),
                "Добавляет строку в таблицу значений.",
            ),
        ),
        (
            "objects/valuetable/columns.html".to_string(),
            pages::property_page(
                style,
                "Колонки (Columns)",
                "КоллекцияКолонокТаблицыЗначений",
                "Коллекция колонок таблицы значений.",
                true,
            ),
        ),
        (
            "objects/array.html".to_string(),
            pages::type_page(
                style,
                "Массив (Array)",
                "Упорядоченная коллекция произвольных значений.",
                Some("Произвольный"),
            ),
        ),
        (
            "objects/array/add.html".to_string(),
            pages::method_page(
                style,
                "Добавить (Add)",
                &[SignatureBlock::new(
                    "Добавить",
                    vec![ParamRow::new(
                        "Значение (необязательный)",
                        "Произвольный",
                        "Добавляемое значение. Значение по умолчанию: Неопределено",
                    )],
                )],
                None,
                "Добавляет значение в конец массива.",
            ),
        ),
        (
            "objects/array/ctor.html".to_string(),
            pages::constructor_page(
                style,
                "По количеству элементов (By element count)",
                SignatureBlock::new(
                    "Массив",
                    vec![ParamRow::new(
                        "КоличествоЭлементов (необязательный)",
                        "Число",
                        "Начальное количество элементов.",
                    )],
                ),
                "Создает массив указанной длины.",
            ),
        ),
        (
            "enums/comparisontype.html".to_string(),
            pages::enum_page(
                style,
                "ВидСравнения (ComparisonType)",
                &["Равно (Equal)", "Больше (Greater)"],
                "Виды сравнения для отборов.",
            ),
        ),
    ]
}

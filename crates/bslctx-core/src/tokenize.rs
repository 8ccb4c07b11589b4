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

//! Identifier tokenization for the search indexes.
//!
//! Splits identifier-shaped strings (Russian or English letters, digits)
//! into lowercase word tokens. Pure and deterministic.

/// Case-fold a name into its canonical lookup key.
///
/// # Examples
///
/// ```
/// use bslctx_core::fold_key;
///
/// assert_eq!(fold_key("ValueTable"), "valuetable");
/// assert_eq!(fold_key("ТаблицаЗначений"), "таблицазначений");
/// ```
#[inline]
pub fn fold_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Split an identifier into ordered lowercase word tokens.
///
/// Rules:
///
/// 1. Non-alphanumeric characters and whitespace are separators.
/// 2. A Latin lower→upper transition starts a new token.
/// 3. A run of Latin uppercase followed by a lowercase letter splits one
///    character before the lowercase: `HTTPServer` → `http`, `server`.
/// 4. Empty tokens are discarded.
///
/// Case transitions are only honored for ASCII letters. Platform identifiers
/// written in Cyrillic expose no reliable word boundary, so a continuous
/// Cyrillic run stays a single token.
///
/// # Examples
///
/// ```
/// use bslctx_core::tokenize;
///
/// assert_eq!(tokenize("HTTPServerURL"), vec!["http", "server", "url"]);
/// assert_eq!(tokenize("ТаблицаЗначений"), vec!["таблицазначений"]);
/// assert_eq!(tokenize("get_member"), vec!["get", "member"]);
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for i in 0..chars.len() {
        let c = chars[i];
        if !c.is_alphanumeric() {
            flush(&mut tokens, &mut current);
            continue;
        }
        if !current.is_empty() && is_boundary(&chars, i) {
            flush(&mut tokens, &mut current);
        }
        for lower in c.to_lowercase() {
            current.push(lower);
        }
    }
    flush(&mut tokens, &mut current);
    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

/// A token boundary sits before `chars[i]`.
fn is_boundary(chars: &[char], i: usize) -> bool {
    let prev = chars[i - 1];
    let c = chars[i];
    if prev.is_ascii_lowercase() && c.is_ascii_uppercase() {
        return true;
    }
    // HTTPServer: split between the uppercase run and the capitalized word.
    prev.is_ascii_uppercase()
        && c.is_ascii_uppercase()
        && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase())
}

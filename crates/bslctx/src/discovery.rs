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

//! Platform version discovery.
//!
//! A platform root holds one subdirectory per installed version, named
//! `N.N.N.N`. Discovery selects the newest version, or the one numerically
//! closest to a requested version (ties resolve toward the newer one).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;
use walkdir::WalkDir;

/// A four-component platform version such as `8.3.27.1508`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformVersion(pub [u16; 4]);

impl PlatformVersion {
    /// Scalar form used for distance comparisons.
    fn scalar(&self) -> u64 {
        let [a, b, c, d] = self.0;
        ((a as u64) << 48) | ((b as u64) << 32) | ((c as u64) << 16) | (d as u64)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for PlatformVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(format!("'{}' is not an N.N.N.N version", s));
        }
        let mut components = [0u16; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| format!("'{}' is not an N.N.N.N version", s))?;
        }
        Ok(Self(components))
    }
}

/// Enumerate version subdirectories of `root`, newest first.
pub fn discover_versions(root: &Path) -> Vec<(PlatformVersion, PathBuf)> {
    let mut versions: Vec<(PlatformVersion, PathBuf)> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?;
            let version: PlatformVersion = name.parse().ok()?;
            Some((version, entry.into_path()))
        })
        .collect();
    versions.sort_by(|a, b| b.0.cmp(&a.0));
    debug!(root = %root.display(), found = versions.len(), "version discovery");
    versions
}

/// Select the installed version to load: the newest, or the one closest to
/// `requested`.
pub fn select_version(
    root: &Path,
    requested: Option<PlatformVersion>,
) -> Option<(PlatformVersion, PathBuf)> {
    let versions = discover_versions(root);
    match requested {
        None => versions.into_iter().next(),
        Some(wanted) => versions.into_iter().min_by_key(|(version, _)| {
            let distance = version.scalar().abs_diff(wanted.scalar());
            // Prefer the newer candidate on equal distance.
            (distance, u64::MAX - version.scalar())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root_with(versions: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for v in versions {
            std::fs::create_dir(dir.path().join(v)).unwrap();
        }
        std::fs::create_dir(dir.path().join("not-a-version")).unwrap();
        dir
    }

    #[test]
    fn test_version_parse_and_display() {
        let v: PlatformVersion = "8.3.27.1508".parse().unwrap();
        assert_eq!(v.to_string(), "8.3.27.1508");
        assert!("8.3.27".parse::<PlatformVersion>().is_err());
        assert!("8.3.x.1".parse::<PlatformVersion>().is_err());
    }

    #[test]
    fn test_version_ordering() {
        let old: PlatformVersion = "8.3.20.100".parse().unwrap();
        let new: PlatformVersion = "8.3.27.1508".parse().unwrap();
        assert!(new > old);
    }

    #[test]
    fn test_discover_ignores_non_versions() {
        let root = root_with(&["8.3.20.100", "8.3.27.1508"]);
        let versions = discover_versions(root.path());
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].0.to_string(), "8.3.27.1508");
    }

    #[test]
    fn test_select_latest_by_default() {
        let root = root_with(&["8.3.20.100", "8.3.27.1508", "8.3.24.500"]);
        let (version, _) = select_version(root.path(), None).unwrap();
        assert_eq!(version.to_string(), "8.3.27.1508");
    }

    #[test]
    fn test_select_closest_to_requested() {
        let root = root_with(&["8.3.20.100", "8.3.27.1508"]);
        let wanted = "8.3.21.0".parse().unwrap();
        let (version, _) = select_version(root.path(), Some(wanted)).unwrap();
        assert_eq!(version.to_string(), "8.3.20.100");
    }

    #[test]
    fn test_select_exact_match() {
        let root = root_with(&["8.3.20.100", "8.3.27.1508"]);
        let wanted = "8.3.27.1508".parse().unwrap();
        let (version, _) = select_version(root.path(), Some(wanted)).unwrap();
        assert_eq!(version.to_string(), "8.3.27.1508");
    }

    #[test]
    fn test_empty_root() {
        let dir = TempDir::new().unwrap();
        assert!(select_version(dir.path(), None).is_none());
    }
}

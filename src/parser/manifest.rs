//! Installed package manifest parser
//!
//! An image ships a plain listing of its RPMs, one per line:
//! ```text
//! rhev-hypervisor7-7.2-20160613.0.el7ev.noarch    (none)
//! vdsm-4.17.31-0.el7ev.x86_64                      (none)
//! ```
//! The installed version of a package is the first token with the
//! `<name>-` prefix and the architecture suffix removed.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use tracing::{info, warn};

/// Architecture suffixes stripped from manifest entries
const ARCH_SUFFIXES: &[&str] = &[
    ".x86_64", ".noarch", ".i686", ".aarch64", ".ppc64le", ".s390x",
];

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Installed versions keyed by package name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledPackages {
    versions: HashMap<String, String>,
}

impl InstalledPackages {
    pub fn load(path: &Path, packages: &[&str]) -> Result<Self, ManifestError> {
        info!("Reading installed packages from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self::parse(&content, packages))
    }

    /// Finds the installed version of each of `packages` in manifest text
    ///
    /// A line belongs to package `p` when its first token is `p-` followed by
    /// something other than a letter, so `rhev-hypervisor` does not claim
    /// `rhev-hypervisor7-...`. The first matching line wins.
    pub fn parse(content: &str, packages: &[&str]) -> Self {
        let patterns: Vec<(&str, Regex)> = packages
            .iter()
            .map(|name| {
                let re = Regex::new(&format!("^{}-[^a-zA-Z]", regex::escape(name))).unwrap();
                (*name, re)
            })
            .collect();

        let mut versions: HashMap<String, String> = HashMap::new();

        for token in content.lines().filter_map(|line| line.split_whitespace().next()) {
            for (name, re) in &patterns {
                if !re.is_match(token) {
                    continue;
                }

                let version = strip_arch(&token[name.len() + 1..]);
                match versions.get(*name) {
                    Some(existing) if existing != version => warn!(
                        "Ignoring {} {}: already found version {}",
                        name, version, existing
                    ),
                    Some(_) => {}
                    None => {
                        info!("Installed {} version {}", name, version);
                        versions.insert(name.to_string(), version.to_string());
                    }
                }
            }
        }

        for name in packages {
            if !versions.contains_key(*name) {
                warn!("Package {} not found in manifest", name);
            }
        }

        Self { versions }
    }

    pub fn version(&self, package: &str) -> Option<&str> {
        self.versions.get(package).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

fn strip_arch(version: &str) -> &str {
    ARCH_SUFFIXES
        .iter()
        .find_map(|suffix| version.strip_suffix(suffix))
        .unwrap_or(version)
}

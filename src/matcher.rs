// src/matcher.rs

//! Expand service identifiers (shell-style globs) into concrete names.

use std::collections::BTreeSet;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::directory::ServiceDirectory;
use crate::errors::{Result, WinsvcError};
use crate::types::ServiceName;

/// Resolves identifiers against a live enumeration of the service directory.
///
/// Nothing is cached: two calls moments apart may return different sets.
#[derive(Debug)]
pub struct ServiceMatcher<'a, D> {
    directory: &'a D,
    case_insensitive: bool,
}

impl<'a, D: ServiceDirectory> ServiceMatcher<'a, D> {
    pub fn new(directory: &'a D, case_insensitive: bool) -> Self {
        Self {
            directory,
            case_insensitive,
        }
    }

    /// All services whose name matches `identifier`. Empty is not an error.
    pub async fn match_services(&self, identifier: &str) -> Result<BTreeSet<ServiceName>> {
        self.match_any(&[identifier]).await
    }

    /// Union of the matches of every pattern.
    pub async fn match_any<S: AsRef<str>>(&self, patterns: &[S]) -> Result<BTreeSet<ServiceName>> {
        // Compile first so a bad pattern fails without touching the OS.
        let set = compile_patterns(patterns, self.case_insensitive)?;
        let names = self.directory.list_services().await?;
        let matched: BTreeSet<ServiceName> =
            names.into_iter().filter(|n| set.is_match(n)).collect();
        debug!(
            patterns = ?patterns.iter().map(|p| p.as_ref()).collect::<Vec<_>>(),
            matched = ?matched,
            "resolved service patterns"
        );
        Ok(matched)
    }
}

/// Pure matching of `patterns` against a fixed set of names.
pub fn filter_names<'n, S, I>(
    patterns: &[S],
    names: I,
    case_insensitive: bool,
) -> Result<BTreeSet<ServiceName>>
where
    S: AsRef<str>,
    I: IntoIterator<Item = &'n ServiceName>,
{
    let set = compile_patterns(patterns, case_insensitive)?;
    Ok(names
        .into_iter()
        .filter(|n| set.is_match(n.as_str()))
        .cloned()
        .collect())
}

fn compile_patterns<S: AsRef<str>>(patterns: &[S], case_insensitive: bool) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let pat = pat.as_ref();
        let glob = GlobBuilder::new(pat)
            .case_insensitive(case_insensitive)
            .literal_separator(false)
            .build()
            .map_err(|e| WinsvcError::InvalidPattern {
                pattern: pat.to_string(),
                reason: e.kind().to_string(),
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| WinsvcError::InvalidPattern {
        pattern: patterns
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
        reason: e.to_string(),
    })
}

// SPDX-License-Identifier: Apache-2.0

//! Acceptance predicate for harvested repositories.

use crate::record::RepoRecord;

/// Filter deciding which repositories are written to the store.
///
/// A repository is kept when it is public, reports the configured primary
/// language, and is not a fork (unless forks are explicitly included).
#[derive(Debug, Clone)]
pub struct RepoFilter {
    /// Primary language a repository must report.
    pub language: String,
    /// Keep forks as well as source repositories.
    pub include_forks: bool,
}

impl RepoFilter {
    /// Creates a filter for the given language, excluding forks.
    #[must_use]
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            include_forks: false,
        }
    }

    /// Returns true if the record passes the filter.
    ///
    /// A repository with an absent `private`, `language`, or `fork` field
    /// fails the corresponding leg: only records the remote positively
    /// reports as public non-fork matches are kept.
    #[must_use]
    pub fn matches(&self, record: &RepoRecord) -> bool {
        let public = record.private == Some(false);
        let language_matches = record
            .language
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case(&self.language));
        let fork = record.fork.unwrap_or(true);

        public && language_matches && (self.include_forks || !fork)
    }
}

//! Core domain types for the user catalog.
//!
//! - `User` and its `RatedTitles` set
//! - `Catalog`, the ordered in-memory collection every recommendation reads from
//! - `CatalogLimits` and `LoadReport` for bounded loading

use serde::Serialize;
use std::collections::HashSet;

// =============================================================================
// Type Aliases and Constants
// =============================================================================

/// Numeric user identifier. Absent or non-numeric ids load as `0`, so it is
/// not unique and never used for lookups.
pub type UserId = i64;

/// Username given to records whose `username` is missing or not a string
pub const DEFAULT_USERNAME: &str = "Inconnu";

// =============================================================================
// User-related Types
// =============================================================================

/// Ordered set of movie titles a user has rated.
///
/// Iteration follows first-insertion order. Membership is exact string
/// equality: no trimming, no case folding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<String>")]
pub struct RatedTitles {
    ordered: Vec<String>,
    lookup: HashSet<String>,
}

impl RatedTitles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a title; a title already present keeps its first position
    pub fn insert(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.lookup.contains(&title) {
            return;
        }
        self.lookup.insert(title.clone());
        self.ordered.push(title);
    }

    pub fn contains(&self, title: &str) -> bool {
        self.lookup.contains(title)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Titles in the order they were first rated
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    /// Set view used for similarity computations
    pub fn as_set(&self) -> &HashSet<String> {
        &self.lookup
    }
}

impl<S: Into<String>> FromIterator<S> for RatedTitles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut titles = RatedTitles::new();
        for title in iter {
            titles.insert(title);
        }
        titles
    }
}

impl From<RatedTitles> for Vec<String> {
    fn from(titles: RatedTitles) -> Self {
        titles.ordered
    }
}

/// A user of the catalog and the titles they have rated.
///
/// Rating values are deliberately absent: only the presence of a rating matters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub rated_titles: RatedTitles,
}

impl User {
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            rated_titles: RatedTitles::new(),
        }
    }

    /// Builder used mostly by tests and fixtures
    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for title in titles {
            self.rated_titles.insert(title);
        }
        self
    }
}

// =============================================================================
// Loading Limits
// =============================================================================

/// Optional caps applied while loading a catalog.
///
/// `None` means unbounded, which is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogLimits {
    pub max_users: Option<usize>,
    pub max_titles_per_user: Option<usize>,
}

impl CatalogLimits {
    /// No caps at all
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// The 50 users / 50 titles caps of the legacy recommendation tool
    pub fn legacy() -> Self {
        Self {
            max_users: Some(50),
            max_titles_per_user: Some(50),
        }
    }

    pub fn with_max_users(mut self, max: usize) -> Self {
        self.max_users = Some(max);
        self
    }

    pub fn with_max_titles_per_user(mut self, max: usize) -> Self {
        self.max_titles_per_user = Some(max);
        self
    }
}

/// What a load kept and what it dropped because of `CatalogLimits`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of records present in the source collection
    pub records_seen: usize,
    /// Records beyond `max_users`
    pub users_dropped: usize,
    /// Distinct titles beyond `max_titles_per_user`, summed over kept users
    pub titles_dropped: usize,
}

impl LoadReport {
    pub fn is_truncated(&self) -> bool {
        self.users_dropped > 0 || self.titles_dropped > 0
    }
}

// =============================================================================
// Catalog - The In-Memory User Collection
// =============================================================================

/// Ordered, read-only collection of users.
///
/// Order matters for two policies: username lookups return the first match,
/// and candidates are visited in catalog order, which decides similarity ties.
/// Users are addressed by their position since usernames and ids may repeat.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) users: Vec<User>,
    pub(crate) report: LoadReport,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a user by catalog position
    pub fn get_user(&self, position: usize) -> Option<&User> {
        self.users.get(position)
    }

    /// Find the first user whose username is exactly `name`.
    ///
    /// Returns the user's position along with the user.
    pub fn find_by_username(&self, name: &str) -> Option<(usize, &User)> {
        self.users
            .iter()
            .enumerate()
            .find(|(_, user)| user.username == name)
    }

    /// Every user except the one at `exclude`, in catalog order
    pub fn candidates(&self, exclude: usize) -> impl Iterator<Item = (usize, &User)> {
        self.users
            .iter()
            .enumerate()
            .filter(move |(position, _)| *position != exclude)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(|user| user.username.as_str())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Truncation details from the load that built this catalog
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Append a user at the end of the catalog
    pub fn insert_user(&mut self, user: User) {
        self.users.push(user);
    }

    /// Get (user count, total rated titles) for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        let titles = self.users.iter().map(|u| u.rated_titles.len()).sum();
        (self.users.len(), titles)
    }
}

impl FromIterator<User> for Catalog {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().collect(),
            report: LoadReport::default(),
        }
    }
}

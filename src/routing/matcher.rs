//! Path pattern matching.
//!
//! # Responsibilities
//! - Classify registered patterns as exact paths or rooted prefixes
//! - Test request paths against patterns
//! - Rank matches so the most specific registration wins
//!
//! # Design Decisions
//! - A pattern ending in `/` matches the whole subtree below it; any
//!   other pattern matches exactly one path
//! - Matching is case-sensitive, no trailing-slash normalization
//! - No regex: prefix comparison only, O(pattern length)

/// A registered path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches one path exactly.
    Exact(String),

    /// Matches every path under the prefix (pattern ended in `/`).
    Prefix(String),
}

impl RoutePattern {
    /// Parse a pattern string. Trailing `/` means subtree, otherwise exact.
    ///
    /// `/` itself is a prefix pattern and matches every path.
    pub fn parse(pattern: &str) -> Self {
        if pattern.ends_with('/') {
            RoutePattern::Prefix(pattern.to_string())
        } else {
            RoutePattern::Exact(pattern.to_string())
        }
    }

    /// Returns true if the request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(p) => path == p,
            RoutePattern::Prefix(p) => path.starts_with(p.as_str()),
        }
    }

    /// Rank for picking among multiple matches: exact beats prefix,
    /// longer prefix beats shorter.
    pub fn specificity(&self) -> (u8, usize) {
        match self {
            RoutePattern::Exact(p) => (1, p.len()),
            RoutePattern::Prefix(p) => (0, p.len()),
        }
    }

    /// The pattern as registered, used as the span resource label.
    pub fn as_str(&self) -> &str {
        match self {
            RoutePattern::Exact(p) | RoutePattern::Prefix(p) => p,
        }
    }
}

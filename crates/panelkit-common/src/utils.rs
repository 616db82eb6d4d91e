//! Utility functions for Panelkit
//!
//! Identifier validation and generation helpers used across the codebase.

use std::sync::LazyLock;

/// Resource names: lowercase words joined by single hyphens
static KEBAB_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new("^[a-z0-9]+(-[a-z0-9]+)*$").expect("Invalid regex pattern")
});

/// Generic identifiers (block ids, column ids, resource ids)
static ID_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("^[a-zA-Z0-9_.:-]+$").expect("Invalid regex pattern"));

/// Check that a resource name is kebab-case
///
/// # Examples
///
/// ```
/// use panelkit_common::is_kebab_case;
///
/// assert!(is_kebab_case("blog-posts"));
/// assert!(!is_kebab_case("BlogPosts"));
/// assert!(!is_kebab_case("blog--posts"));
/// ```
pub fn is_kebab_case(name: &str) -> bool {
    KEBAB_PATTERN.is_match(name)
}

/// Check that an identifier is non-empty and contains only
/// alphanumerics, underscore, dot, colon and hyphen
pub fn is_valid_id(id: &str) -> bool {
    ID_PATTERN.is_match(id)
}

/// Generate a short prefixed identifier, e.g. `col_3f2a9c1e`
///
/// The random part is the first 8 hex digits of a v4 UUID.
pub fn generate_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &uuid[..8])
}

/// Generate an id that does not collide with any of `existing`
pub fn generate_unique_id<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    loop {
        let candidate = generate_id(prefix);
        if !existing.clone().into_iter().any(|id| id == candidate) {
            return candidate;
        }
    }
}

//! The fixed table of recognized types and their categories.
//!
//! URL-shape validation consults this table; extending the taxonomy is a
//! code change, never a runtime operation.

/// Recognized `type -> categories` pairs, in document order.
pub const RECOGNIZED: &[(&str, &[&str])] = &[
    (
        "heroes",
        &["intelligence", "agility", "strength", "universal"],
    ),
    ("items", &["physical", "magical", "utility"]),
];

/// Categories recognized for `kind`, or `None` when the type itself is
/// unrecognized.
#[must_use]
pub fn categories_for(kind: &str) -> Option<&'static [&'static str]> {
    RECOGNIZED
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, cats)| *cats)
}

/// Whether `kind` is a recognized type.
#[must_use]
pub fn is_recognized_type(kind: &str) -> bool {
    categories_for(kind).is_some()
}

/// Whether `category` is a recognized category of `kind`.
#[must_use]
pub fn is_recognized_category(kind: &str, category: &str) -> bool {
    categories_for(kind).is_some_and(|cats| cats.contains(&category))
}

/// Iterate over every recognized `(type, category)` scope.
pub fn scopes() -> impl Iterator<Item = (&'static str, &'static str)> {
    RECOGNIZED
        .iter()
        .flat_map(|(kind, cats)| cats.iter().map(move |cat| (*kind, *cat)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_types() {
        assert!(is_recognized_type("heroes"));
        assert!(is_recognized_type("items"));
        assert!(!is_recognized_type("spells"));
        assert!(!is_recognized_type(""));
    }

    #[test]
    fn test_categories_belong_to_their_type() {
        assert!(is_recognized_category("heroes", "strength"));
        assert!(is_recognized_category("items", "magical"));
        // valid category under the wrong type
        assert!(!is_recognized_category("items", "strength"));
        assert!(!is_recognized_category("heroes", "physical"));
        assert!(!is_recognized_category("spells", "strength"));
    }

    #[test]
    fn test_scope_count() {
        assert_eq!(scopes().count(), 7);
    }
}

//! Name normalization used for every record comparison.

/// Reduce a display name to its comparison key: lowercase with all
/// whitespace removed. Lookup, conflict detection, update, and delete all
/// compare names through this function, which is what makes record identity
/// case- and space-insensitive.
///
/// # Examples
///
/// ```
/// use armory::utils::text::normalize_name;
///
/// assert_eq!(normalize_name("Axe Knight"), "axeknight");
/// assert_eq!(normalize_name("  AXE\tKNIGHT "), "axeknight");
/// assert_eq!(normalize_name(""), "");
/// ```
#[must_use]
pub fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_space_insensitive() {
        assert_eq!(normalize_name("Axe Knight"), normalize_name("axeknight"));
        assert_eq!(normalize_name("AXE KNIGHT"), normalize_name("Axe\u{a0}Knight"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   \t\n"), "");
    }

    #[test]
    fn test_interior_whitespace_stripped() {
        assert_eq!(normalize_name("a b\tc\nd"), "abcd");
    }

    #[test]
    fn test_already_normalized_is_identity() {
        assert_eq!(normalize_name("axeknight"), "axeknight");
    }
}

/// Check a structure name: alphanumerics, `-` and `_` only.
///
/// With `with_prefix`, the first `:` is dropped before checking, so a single
/// `namespace:` prefix is accepted. Empty names are rejected.
pub fn is_valid_structure_name(name: &str, with_prefix: bool) -> bool {
    let name = if with_prefix {
        name.replacen(':', "", 1)
    } else {
        name.to_owned()
    };
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names() {
        assert!(is_valid_structure_name("my_structure-1", false));
        assert!(is_valid_structure_name("my_structure-1", true));
        assert!(!is_valid_structure_name("bad name", false));
        assert!(!is_valid_structure_name("bad name", true));
        assert!(!is_valid_structure_name("", false));
    }

    #[test]
    fn test_prefix_handling() {
        assert!(!is_valid_structure_name("my:structure", false));
        assert!(is_valid_structure_name("my:structure", true));
        assert!(!is_valid_structure_name("a:b:c", true));
        assert!(!is_valid_structure_name(":", true));
    }
}

use anyhow::{Context, Result};

/// Parses a hexadecimal string into its integer value.
/// Only suitable for short strings; full digests exceed u64.
pub fn hex_to_int(hexadecimal: &str) -> Result<u64> {
    u64::from_str_radix(hexadecimal, 16)
        .with_context(|| format!("not a hexadecimal string: {}", hexadecimal))
}

pub fn to_upper_case(text: &str) -> String {
    text.to_ascii_uppercase()
}

pub fn to_lower_case(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// True when the string could be a hex-encoded digest: non-empty,
/// even length, hex digits only.
pub fn is_hex_digest(text: &str) -> bool {
    !text.is_empty() && text.len() % 2 == 0 && text.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_int_converts() {
        assert_eq!(hex_to_int("beaf").unwrap(), 48815);
    }

    #[test]
    fn hex_to_int_rejects_garbage() {
        assert!(hex_to_int("not hex").is_err());
    }

    #[test]
    fn case_converters() {
        assert_eq!(to_upper_case("oke dokie"), "OKE DOKIE");
        assert_eq!(to_lower_case("OKE DOKIE"), "oke dokie");
    }

    #[test]
    fn hex_digest_shape() {
        assert!(is_hex_digest("10ecce765580b4431a8585d59af127d2"));
        assert!(!is_hex_digest(""));
        assert!(!is_hex_digest("abc"));
        assert!(!is_hex_digest("zz00"));
    }
}

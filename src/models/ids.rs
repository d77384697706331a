use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Ids accepted from callers: a leading `c` and at least eight more
/// characters that are neither whitespace nor hyphens.
static ID_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^c[^\s-]{8,}$").expect("id pattern is valid")
});

/// Generate a new record id: `c` followed by 24 lowercase hex characters.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 12] = rng.random();
    format!("c{}", hex::encode(bytes))
}

pub fn is_valid_id(id: &str) -> bool {
    ID_FORMAT.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_pass_validation() {
        for _ in 0..32 {
            let id = generate_id();
            assert_eq!(id.len(), 25);
            assert!(is_valid_id(&id), "{id} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("u1"));
        assert!(!is_valid_id("xabcdefghij"));
        assert!(!is_valid_id("cabc-defghij"));
        assert!(!is_valid_id("cabc defghij"));
        assert!(!is_valid_id("c1234567"));
    }

    #[test]
    fn accepts_cuid_shaped_ids() {
        assert!(is_valid_id("cl9ebqhxk00008eqf1a2b3c4d"));
        assert!(is_valid_id("C12345678"));
    }
}

//! Canonical identifier handling for feed and CMS entity references.
//!
//! The feed prefixes ids with a single type-tag letter (`t94` for a team,
//! `g1234` for a match, `p7` for a player) while CMS documents usually store
//! the bare number. Every cross-source lookup goes through [`normalize_ref`]
//! so the two spellings always join.

/// Strip a single leading ASCII type-tag letter when the rest of the id is
/// all digits. Anything else passes through trimmed but otherwise unchanged,
/// so the function is total and idempotent.
pub fn normalize_ref(id: &str) -> String {
    let trimmed = id.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            let rest = chars.as_str();
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                rest.to_string()
            } else {
                trimmed.to_string()
            }
        }
        _ => trimmed.to_string(),
    }
}

/// Equality after normalization.
pub fn refs_match(a: &str, b: &str) -> bool {
    normalize_ref(a) == normalize_ref(b)
}

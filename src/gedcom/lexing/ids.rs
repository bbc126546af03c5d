//! Cross-reference ids.
//!
//! Ids look like `@I12@`: an `@`, a one character prefix naming the record type, a
//! number and a closing `@`. `@SUBM@` is the one fixed, unnumbered id.

use crate::gedcom::error::LineError;

/// The unnumbered submitter id, passed through untouched.
pub const SUBMITTER_ID: &str = "@SUBM@";

/// Build an id from a prefix and a number: `create_id('I', 7)` is `@I7@`.
pub fn create_id(prefix: impl std::fmt::Display, id: i32) -> String {
    format!("@{prefix}{id}@")
}

/// The number inside an id, or -1 when the body between the prefix and the last
/// character is not an integer. Never fails.
pub fn get_id(id: &str) -> i32 {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() < 3 {
        return -1;
    }
    let body: String = chars[2..chars.len() - 1].iter().collect();
    body.parse().unwrap_or(-1)
}

/// Normalize an id through its prefix and number, so `@I007@` becomes `@I7@`.
///
/// `@SUBM@` (any case) is returned as given. Tokens too short to carry a prefix are
/// rejected.
pub fn clean_id(id: &str) -> Result<String, LineError> {
    if id.eq_ignore_ascii_case(SUBMITTER_ID) {
        return Ok(id.to_string());
    }
    let prefix = id
        .chars()
        .nth(1)
        .ok_or_else(|| LineError::InvalidId(id.to_string()))?;
    Ok(create_id(prefix, get_id(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn submitter_id_passes_through() {
        assert_eq!(clean_id("@SUBM@").as_deref(), Ok("@SUBM@"));
        assert_eq!(clean_id("@subm@").as_deref(), Ok("@subm@"));
    }

    #[test]
    fn leading_zeros_are_dropped() {
        assert_eq!(get_id("@I007@"), 7);
        assert_eq!(clean_id("@I007@").as_deref(), Ok("@I7@"));
        assert_eq!(create_id("I", get_id("@I007@")), "@I7@");
    }

    #[rstest]
    #[case("@I12@", 12)]
    #[case("@F1@", 1)]
    #[case("@SUBM@", -1)]
    #[case("@N@", -1)]
    #[case("@Iabc@", -1)]
    #[case("", -1)]
    #[case("@", -1)]
    #[case("@I", -1)]
    fn extracts_numbers(#[case] id: &str, #[case] expected: i32) {
        assert_eq!(get_id(id), expected);
    }

    #[test]
    fn unnumbered_ids_normalize_to_minus_one() {
        assert_eq!(clean_id("@SUBMITTER@").as_deref(), Ok("@S-1@"));
    }

    #[test]
    fn a_lone_marker_is_rejected() {
        assert_eq!(clean_id("@"), Err(LineError::InvalidId("@".into())));
    }

    proptest! {
        #[test]
        fn id_helpers_never_panic(id in "\\PC{0,12}") {
            let _ = get_id(&id);
            let _ = clean_id(&id);
        }

        #[test]
        fn numbered_ids_round_trip(prefix in "[A-Z]", n in 0..100_000i32) {
            let id = create_id(&prefix, n);
            prop_assert_eq!(get_id(&id), n);
            prop_assert_eq!(clean_id(&id), Ok(id.clone()));
        }
    }
}

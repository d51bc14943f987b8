//! Sanitization of position values submitted through the edit form.
//!
//! A malformed value must never break anything: it is simply dropped and the
//! stored position stays as it was.

use crate::pin::Position;

/// Parse a submitted position value.
///
/// Returns `None` for absent, empty, or non-integer input. Integers are
/// coerced to their absolute value, so `"-3"` stores `3`. Integers too large
/// for a [`Position`] saturate to `u64::MAX`.
///
/// ```rust
/// use postpos_types::{parse_position, Position};
///
/// assert_eq!(parse_position(Some(" 4 ")), Some(Position::new(4)));
/// assert_eq!(parse_position(Some("-2")), Some(Position::new(2)));
/// assert_eq!(parse_position(Some("abc")), None);
/// assert_eq!(parse_position(None), None);
/// ```
pub fn parse_position(raw: Option<&str>) -> Option<Position> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(Position::new(value.unsigned_abs()));
    }
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return Some(Position::new(u64::MAX));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_and_blank_are_ignored() {
        assert_eq!(parse_position(Some("")), None);
        assert_eq!(parse_position(Some("   ")), None);
    }

    #[test]
    fn zero_is_stored_as_unset() {
        assert_eq!(parse_position(Some("0")), Some(Position::UNSET));
    }

    #[test]
    fn decimals_are_not_integers() {
        assert_eq!(parse_position(Some("2.5")), None);
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert_eq!(parse_position(Some("3rd")), None);
    }

    #[test]
    fn explicit_plus_sign_is_accepted() {
        assert_eq!(parse_position(Some("+6")), Some(Position::new(6)));
    }

    #[test]
    fn i64_min_does_not_overflow() {
        let raw = i64::MIN.to_string();
        assert_eq!(
            parse_position(Some(&raw)),
            Some(Position::new(i64::MIN.unsigned_abs()))
        );
    }

    #[test]
    fn oversized_integers_saturate() {
        assert_eq!(
            parse_position(Some("99999999999999999999")),
            Some(Position::new(u64::MAX))
        );
        assert_eq!(
            parse_position(Some("-99999999999999999999")),
            Some(Position::new(u64::MAX))
        );
        assert_eq!(parse_position(Some("99999999999999999999x")), None);
        assert_eq!(parse_position(Some("+")), None);
    }

    proptest! {
        #[test]
        fn any_integer_round_trips_to_its_magnitude(v in any::<i64>()) {
            let raw = v.to_string();
            prop_assert_eq!(parse_position(Some(&raw)), Some(Position::new(v.unsigned_abs())));
        }
    }
}

/// Extracts a participant's self-reported rating from free-text README
/// content by matching the fixed `**Overall rating:** N/5` pattern.
///
/// Absence of the pattern is "no rating", never an error. Only a single
/// digit is captured, matching the course template.
pub fn parse_self_rating(content: &str) -> Option<u8> {
    const NEEDLE: &str = "**Overall rating:** ";

    let mut rest = content;
    while let Some(idx) = rest.find(NEEDLE) {
        let after = &rest[idx + NEEDLE.len()..];
        let mut chars = after.chars();

        if let Some(digit) = chars.next().and_then(|c| c.to_digit(10))
            && after[1..].starts_with("/5")
        {
            return Some(digit as u8);
        }

        rest = &rest[idx + NEEDLE.len()..];
    }

    None
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parses_rating() {
        let content = "# Day 2\n\nSome notes.\n\n**Overall rating:** 4/5\n";
        assert_eq!(parse_self_rating(content), Some(4));
    }

    #[test]
    fn test_no_pattern_yields_none() {
        assert_eq!(parse_self_rating("# Day 2\n\nno rating here"), None);
        assert_eq!(parse_self_rating(""), None);
    }

    #[test]
    fn test_wrong_denominator_yields_none() {
        assert_eq!(parse_self_rating("**Overall rating:** 4/10"), None);
    }

    #[test]
    fn test_non_digit_yields_none() {
        assert_eq!(parse_self_rating("**Overall rating:** x/5"), None);
    }

    #[test]
    fn test_second_occurrence_found_when_first_malformed() {
        let content = "**Overall rating:** soon\n\n**Overall rating:** 3/5";
        assert_eq!(parse_self_rating(content), Some(3));
    }

    #[test]
    fn test_multi_digit_not_captured() {
        // template captures one digit; "12/5" parses the leading "1" but the
        // denominator check then fails against "2/5"... it should not match
        assert_eq!(parse_self_rating("**Overall rating:** 12/5"), None);
    }
}

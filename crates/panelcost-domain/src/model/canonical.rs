//! Canonical forms for lookup keys, part names and numeric cells
//!
//! Stored data and request input go through the same functions, otherwise
//! lookups silently miss.

/// Canonical form of a textual key or part name: trimmed and uppercased.
pub fn canonicalize(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Canonical form of a year key.
///
/// Spreadsheet exports often render whole-number years as "2019.0"; those are
/// collapsed to "2019" so both spellings share one key.
pub fn canonicalize_year(s: &str) -> String {
    let canonical = canonicalize(s);
    match canonical.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty()
                && whole.chars().all(|c| c.is_ascii_digit())
                && !fraction.is_empty()
                && fraction.chars().all(|c| c == '0') =>
        {
            whole.to_string()
        }
        _ => canonical,
    }
}

/// Parse a numeric cell, tolerating thousands separators.
///
/// Commas are accepted only as 3-digit grouping of the integer part
/// ("1,234.5"); anything else with a comma ("1,5") is unparseable. Blank,
/// unparseable and non-finite values yield `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = if trimmed.contains(',') {
        strip_grouping(trimmed)?
    } else {
        trimmed.to_string()
    };
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn strip_grouping(s: &str) -> Option<String> {
    let (sign, unsigned) = match s.strip_prefix(['-', '+']) {
        Some(rest) => (&s[..1], rest),
        None => ("", s),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |g: &str| g.chars().all(|c| c.is_ascii_digit());
    let mut groups = integer.split(',');
    let head = groups.next()?;
    if !(1..=3).contains(&head.len()) || !all_digits(head) {
        return None;
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        digits.push_str(group);
    }

    Some(match fraction {
        Some(fraction) => format!("{}{}.{}", sign, digits, fraction),
        None => format!("{}{}", sign, digits),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_variants_share_key() {
        assert_eq!(canonicalize("  civic "), "CIVIC");
        assert_eq!(canonicalize("CIVIC"), "CIVIC");
        assert_eq!(canonicalize("Civic "), "CIVIC");
    }

    #[test]
    fn test_canonicalize_idempotent() {
        for s in ["  front bumper ", "R&R", "", "Méga  Door"] {
            let once = canonicalize(s);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn test_canonicalize_year() {
        assert_eq!(canonicalize_year("2019"), "2019");
        assert_eq!(canonicalize_year(" 2019.0 "), "2019");
        assert_eq!(canonicalize_year("2019.00"), "2019");
        assert_eq!(canonicalize_year("2019.5"), "2019.5");
        assert_eq!(canonicalize_year(".0"), ".0");
        assert_eq!(canonicalize_year("2019-20"), "2019-20");
        assert_eq!(canonicalize_year(&canonicalize_year("2019.0")), "2019");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1000"), Some(1000.0));
        assert_eq!(parse_number(" 1,234.5 "), Some(1234.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_parse_number_grouping() {
        assert_eq!(parse_number("1,000"), Some(1000.0));
        assert_eq!(parse_number("12,345,678"), Some(12345678.0));
        assert_eq!(parse_number("-1,500.25"), Some(-1500.25));
        assert_eq!(parse_number("1,5"), None);
        assert_eq!(parse_number("1000,000"), None);
        assert_eq!(parse_number(",100"), None);
        assert_eq!(parse_number("1,000,00"), None);
        assert_eq!(parse_number("1.5,0"), None);
    }
}

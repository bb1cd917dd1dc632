//! Lenient text-to-value conversions for tag defaults and layered lookups.
//!
//! Malformed text never errors here: every conversion degrades to the zero
//! value of its kind. Tag defaults are author-supplied literals, and a typo
//! in one is not worth failing the whole binding over.

use std::time::Duration;

/// `"true"` or `"t"`, case-insensitive. Everything else is false.
pub(crate) fn to_bool(s: &str) -> bool {
    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("t")
}

pub(crate) fn to_i64(s: &str) -> i64 {
    s.trim().parse().unwrap_or(0)
}

pub(crate) fn to_f64(s: &str) -> f64 {
    s.trim().parse().unwrap_or(0.0)
}

/// Parse a duration string: an integer with an `ms`, `s`, `m`, or `h`
/// suffix. A bare integer is seconds. Malformed input is `Duration::ZERO`.
pub(crate) fn to_duration(s: &str) -> Duration {
    let s = s.trim();
    let (number, scale) = if let Some(n) = s.strip_suffix("ms") {
        (n, Duration::from_millis as fn(u64) -> Duration)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, Duration::from_secs as fn(u64) -> Duration)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, (|m| Duration::from_secs(m * 60)) as fn(u64) -> Duration)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, (|h| Duration::from_secs(h * 3600)) as fn(u64) -> Duration)
    } else {
        (s, Duration::from_secs as fn(u64) -> Duration)
    };
    number
        .trim()
        .parse::<u64>()
        .map(scale)
        .unwrap_or(Duration::ZERO)
}

/// Split a default-value list on `,`, trimming each element.
/// Empty input is an empty list, not a single empty element.
pub(crate) fn split_list(s: &str) -> Vec<String> {
    let s = s.trim();
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',').map(|item| item.trim().to_string()).collect()
}

pub(crate) fn to_i64_list(s: &str) -> Vec<i64> {
    split_list(s).iter().map(|item| to_i64(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_true_and_t() {
        assert!(to_bool("true"));
        assert!(to_bool("T"));
        assert!(to_bool("TRUE"));
        assert!(!to_bool("false"));
        assert!(!to_bool("yes"));
        assert!(!to_bool(""));
    }

    #[test]
    fn ints_degrade_to_zero() {
        assert_eq!(to_i64("42"), 42);
        assert_eq!(to_i64(" -7 "), -7);
        assert_eq!(to_i64("abc"), 0);
        assert_eq!(to_i64(""), 0);
    }

    #[test]
    fn floats_degrade_to_zero() {
        assert_eq!(to_f64("1.5"), 1.5);
        assert_eq!(to_f64("nope"), 0.0);
    }

    #[test]
    fn duration_suffixes() {
        assert_eq!(to_duration("500ms"), Duration::from_millis(500));
        assert_eq!(to_duration("1s"), Duration::from_secs(1));
        assert_eq!(to_duration("2m"), Duration::from_secs(120));
        assert_eq!(to_duration("1h"), Duration::from_secs(3600));
    }

    #[test]
    fn bare_duration_is_seconds() {
        assert_eq!(to_duration("30"), Duration::from_secs(30));
    }

    #[test]
    fn malformed_duration_is_zero() {
        assert_eq!(to_duration("soon"), Duration::ZERO);
        assert_eq!(to_duration(""), Duration::ZERO);
    }

    #[test]
    fn list_splitting_trims_and_handles_empty() {
        assert_eq!(split_list("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_list(""), Vec::<String>::new());
        assert_eq!(to_i64_list("1, 2,3"), vec![1, 2, 3]);
        assert_eq!(to_i64_list("1,x,3"), vec![1, 0, 3]);
    }
}

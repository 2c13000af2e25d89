//! Typed read-only access to flag tokens.
//!
//! The dispatcher never interprets flag *values*; it only checks flag names.
//! Commands read values through [`ParsedFlags`], which understands the three
//! spellings a user can type:
//!
//! - `--oneline` (bare, boolean presence)
//! - `--since=2024-01-01` (equals form)
//! - `--since 2024-01-01` (space form, value in the following token)
//!
//! Lookups never fail. A missing or malformed value yields the caller's
//! default, because a bad value is the command's concern, not a usage error.

use chrono::NaiveDate;

/// Length of a `YYYY-MM-DD` date.
const DATE_LEN: usize = 10;

/// Flag tokens for a single invocation.
///
/// Order is preserved and duplicates are allowed; every lookup returns the
/// first match.
///
/// # Example
///
/// ```rust
/// use gitrack_dispatch::ParsedFlags;
///
/// let flags = ParsedFlags::new(["--oneline", "--limit=5", "--author", "ada"]);
///
/// assert!(flags.has("--oneline"));
/// assert_eq!(flags.int("--limit", 10), 5);
/// assert_eq!(flags.string("--author", ""), "ada");
/// assert_eq!(flags.string("--branch", "main"), "main");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    raw: Vec<String>,
}

impl ParsedFlags {
    /// Wraps raw flag tokens.
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            raw: raw.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if a bare token exactly equal to `name` exists.
    ///
    /// `--name=value` does not count as presence of `--name`.
    pub fn has(&self, name: &str) -> bool {
        self.raw.iter().any(|token| token == name)
    }

    /// Returns the value of `name`, or `default` when absent.
    ///
    /// The equals form wins over the space form no matter where each appears.
    /// The space form only counts when the following token does not itself
    /// start with `-`.
    pub fn string(&self, name: &str, default: &str) -> String {
        self.equals_value(name)
            .or_else(|| self.spaced_value(name))
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    }

    /// Returns the base-10 integer value of `name`, or `default` when the
    /// value is absent or does not parse.
    pub fn int(&self, name: &str, default: i64) -> i64 {
        let value = self.string(name, "");
        if value.is_empty() {
            return default;
        }
        value.parse().unwrap_or(default)
    }

    /// Returns the `YYYY-MM-DD` date value of `name`.
    ///
    /// Anything that is not exactly a calendar date (including a trailing
    /// time component) is treated as absent.
    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        let value = self.string(name, "");
        if !is_date_shaped(&value) {
            return None;
        }
        NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok()
    }

    /// The untouched backing tokens.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Returns true if no flag tokens were supplied.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    fn equals_value(&self, name: &str) -> Option<&str> {
        self.raw.iter().find_map(|token| {
            token
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
    }

    fn spaced_value(&self, name: &str) -> Option<&str> {
        self.raw
            .windows(2)
            .find(|pair| pair[0] == name && !pair[1].starts_with('-'))
            .map(|pair| pair[1].as_str())
    }
}

/// Exactly `DDDD-DD-DD` in ASCII digits. Chrono alone tolerates signs and
/// padding whitespace.
fn is_date_shaped(value: &str) -> bool {
    value.len() == DATE_LEN
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Strips a trailing `=value` from a flag token, leaving the bare name.
pub(crate) fn bare_name(token: &str) -> &str {
    token.split_once('=').map_or(token, |(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_bare_flag() {
        let flags = ParsedFlags::new(["--oneline"]);
        assert!(flags.has("--oneline"));
        assert!(!flags.has("--graph"));
    }

    #[test]
    fn test_has_ignores_equals_form() {
        let flags = ParsedFlags::new(["--oneline=true"]);
        assert!(!flags.has("--oneline"));
    }

    #[test]
    fn test_string_equals_form() {
        let flags = ParsedFlags::new(["--author=ada"]);
        assert_eq!(flags.string("--author", "x"), "ada");
    }

    #[test]
    fn test_string_space_form() {
        let flags = ParsedFlags::new(["--author", "ada"]);
        assert_eq!(flags.string("--author", "x"), "ada");
    }

    #[test]
    fn test_string_equals_beats_space_regardless_of_order() {
        let flags = ParsedFlags::new(["--author", "grace", "--author=ada"]);
        assert_eq!(flags.string("--author", ""), "ada");
    }

    #[test]
    fn test_string_first_occurrence_wins() {
        let flags = ParsedFlags::new(["--author=ada", "--author=grace"]);
        assert_eq!(flags.string("--author", ""), "ada");

        let flags = ParsedFlags::new(["--author", "ada", "--author", "grace"]);
        assert_eq!(flags.string("--author", ""), "ada");
    }

    #[test]
    fn test_string_space_form_skips_flag_like_value() {
        let flags = ParsedFlags::new(["--author", "--oneline"]);
        assert_eq!(flags.string("--author", "nobody"), "nobody");
    }

    #[test]
    fn test_string_does_not_match_longer_name() {
        let flags = ParsedFlags::new(["--authors=ada"]);
        assert_eq!(flags.string("--author", "none"), "none");
    }

    #[test]
    fn test_string_empty_equals_value() {
        let flags = ParsedFlags::new(["--author="]);
        assert_eq!(flags.string("--author", "none"), "");
    }

    #[test]
    fn test_string_trailing_flag_without_value() {
        let flags = ParsedFlags::new(["--author"]);
        assert_eq!(flags.string("--author", "none"), "none");
    }

    #[test]
    fn test_int() {
        assert_eq!(ParsedFlags::new(["--limit=5"]).int("--limit", 10), 5);
        assert_eq!(ParsedFlags::new(["--limit", "-3"]).int("--limit", 10), 10);
        assert_eq!(ParsedFlags::new(["--limit=-3"]).int("--limit", 10), -3);
        assert_eq!(ParsedFlags::new(["--limit=5.5"]).int("--limit", 10), 10);
        assert_eq!(ParsedFlags::new(["--limit=abc"]).int("--limit", 10), 10);
        assert_eq!(ParsedFlags::new(["--limit="]).int("--limit", 10), 10);
        assert_eq!(ParsedFlags::default().int("--limit", 10), 10);
    }

    #[test]
    fn test_date() {
        let flags = ParsedFlags::new(["--since=2024-02-29"]);
        assert_eq!(
            flags.date("--since"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }

    #[test]
    fn test_date_rejects_invalid() {
        for value in [
            "2023-02-29",
            "2024-13-01",
            "2024-1-5",
            "+202-01-01",
            "-001-01-01",
            "2024-01- 5",
            " 2024-1-05",
            "2024- 1-05",
            "2024-1-05 ",
            "２０２４-01-01",
            "2024-01-01T10:00:00",
            "2024-01-01 10:00",
            "yesterday",
            "",
        ] {
            let flags = ParsedFlags::new([format!("--since={value}")]);
            assert_eq!(flags.date("--since"), None, "accepted {value:?}");
        }
        assert_eq!(ParsedFlags::default().date("--since"), None);
    }

    #[test]
    fn test_raw_is_untouched() {
        let flags = ParsedFlags::new(["--b", "--a=1", "--b"]);
        assert_eq!(flags.raw(), ["--b", "--a=1", "--b"]);
    }

    #[test]
    fn test_bare_name() {
        assert_eq!(bare_name("--since=2024-01-01"), "--since");
        assert_eq!(bare_name("--oneline"), "--oneline");
        assert_eq!(bare_name("--x=a=b"), "--x");
    }
}

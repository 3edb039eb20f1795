//! Pattern compilation and matching.

use std::fmt;

use thiserror::Error;

/// The Base58 alphabet used by Solana addresses (Bitcoin alphabet: no `0`,
/// `O`, `I`, or `l`).
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A Base58 address is at most 44 characters long.
const MAX_ADDRESS_LEN: usize = 44;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("no pattern: provide a prefix, a suffix, or both")]
    Empty,

    #[error("'{0}' is not a base58 character (the alphabet excludes 0, O, I and l)")]
    InvalidChar(char),

    #[error("combined prefix + suffix is {0} characters; an address has at most {MAX_ADDRESS_LEN}")]
    TooLong(usize),
}

/// A compiled search pattern.
///
/// Normalization (case folding when matching is case insensitive) happens
/// once at construction, not per attempt.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Normalized prefix, if any
    prefix: Option<String>,
    /// Normalized suffix, if any
    suffix: Option<String>,
    /// Whether matching is case sensitive
    case_sensitive: bool,
}

impl Pattern {
    /// Compiles a pattern from an optional prefix and suffix.
    ///
    /// Empty strings count as absent. Fails if neither part is present, if a
    /// character cannot occur in a Base58 address (under case folding when
    /// insensitive), or if the combined length exceeds an address's length.
    pub fn new(
        prefix: Option<&str>,
        suffix: Option<&str>,
        case_sensitive: bool,
    ) -> Result<Self, PatternError> {
        let prefix = prefix.filter(|s| !s.is_empty());
        let suffix = suffix.filter(|s| !s.is_empty());

        if prefix.is_none() && suffix.is_none() {
            return Err(PatternError::Empty);
        }

        let total_len = prefix.map_or(0, str::len) + suffix.map_or(0, str::len);
        if total_len > MAX_ADDRESS_LEN {
            return Err(PatternError::TooLong(total_len));
        }

        for part in prefix.iter().chain(suffix.iter()) {
            for c in part.chars() {
                if !is_searchable_char(c, case_sensitive) {
                    return Err(PatternError::InvalidChar(c));
                }
            }
        }

        let normalize = |s: &str| {
            if case_sensitive {
                s.to_string()
            } else {
                s.to_lowercase()
            }
        };

        Ok(Self {
            prefix: prefix.map(normalize),
            suffix: suffix.map(normalize),
            case_sensitive,
        })
    }

    /// Matches an address's Base58 text against this pattern.
    #[inline]
    pub fn matches(&self, address: &str) -> bool {
        if self.case_sensitive {
            self.matches_normalized(address)
        } else {
            self.matches_normalized(&address.to_lowercase())
        }
    }

    #[inline]
    fn matches_normalized(&self, address: &str) -> bool {
        if let Some(prefix) = &self.prefix {
            if !address.starts_with(prefix.as_str()) {
                return false;
            }
        }
        if let Some(suffix) = &self.suffix {
            if !address.ends_with(suffix.as_str()) {
                return false;
            }
        }
        true
    }

    /// Returns whether matching is case sensitive.
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns the estimated number of attempts to find a match.
    ///
    /// Each Base58 character has 58 possible values, so the expected attempt
    /// count is 58^n for a pattern of n characters. Case-insensitive patterns
    /// are somewhat easier in practice; this estimate ignores that.
    pub fn estimated_difficulty(&self) -> u64 {
        let total_len =
            self.prefix.as_ref().map_or(0, |s| s.len()) + self.suffix.as_ref().map_or(0, |s| s.len());
        58u64.saturating_pow(total_len as u32)
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        match self.estimated_difficulty() {
            0..=10_000 => "Very Easy (< 1 second)".into(),
            10_001..=1_000_000 => "Easy (seconds)".into(),
            1_000_001..=200_000_000 => "Medium (minutes)".into(),
            200_000_001..=20_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.prefix, &self.suffix) {
            (Some(p), Some(s)) => write!(f, "{p}*{s}")?,
            (Some(p), None) => write!(f, "{p}*")?,
            (None, Some(s)) => write!(f, "*{s}")?,
            (None, None) => write!(f, "*")?,
        }
        if !self.case_sensitive {
            write!(f, " (case insensitive)")?;
        }
        Ok(())
    }
}

/// Returns whether `c` can occur in a Base58 address.
///
/// Under case-insensitive matching a character is searchable if any of its
/// casings is in the alphabet: `l` is excluded from Base58 but `L` is not,
/// so an insensitive pattern may still ask for it.
fn is_searchable_char(c: char, case_sensitive: bool) -> bool {
    if BASE58_ALPHABET.contains(c) {
        return true;
    }
    if case_sensitive || !c.is_ascii_alphabetic() {
        return false;
    }
    BASE58_ALPHABET.contains(c.to_ascii_uppercase()) || BASE58_ALPHABET.contains(c.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_match() {
        let pattern = Pattern::new(Some("So"), None, true).unwrap();
        assert!(pattern.matches("So11111111111111111111111111111111111111112"));
        assert!(!pattern.matches("Ab11111111111111111111111111111111111111112"));
    }

    #[test]
    fn case_sensitive_prefix_rejects_other_casing() {
        let pattern = Pattern::new(Some("So"), None, true).unwrap();
        assert!(!pattern.matches("so11111111111111111111111111111111111111112"));
    }

    #[test]
    fn case_insensitive_prefix_accepts_any_casing() {
        let pattern = Pattern::new(Some("so"), None, false).unwrap();
        assert!(pattern.matches("SoMeAddressText"));
        assert!(pattern.matches("sOmeAddressText"));
        assert!(pattern.matches("SOMEADDRESSTEXT"));
    }

    #[test]
    fn suffix_match() {
        let pattern = Pattern::new(None, Some("xyz"), true).unwrap();
        assert!(pattern.matches("Abcxyz"));
        assert!(!pattern.matches("Abcxy"));
    }

    #[test]
    fn prefix_and_suffix_both_required() {
        let pattern = Pattern::new(Some("Ab"), Some("yz"), true).unwrap();
        assert!(pattern.matches("Abcdyz"));
        assert!(!pattern.matches("Abcdxx"));
        assert!(!pattern.matches("Xbcdyz"));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        assert!(matches!(Pattern::new(None, None, true), Err(PatternError::Empty)));
        assert!(matches!(
            Pattern::new(Some(""), Some(""), true),
            Err(PatternError::Empty)
        ));
    }

    #[test]
    fn non_base58_chars_are_rejected() {
        assert!(matches!(
            Pattern::new(Some("O0"), None, true),
            Err(PatternError::InvalidChar('O'))
        ));
        assert!(matches!(
            Pattern::new(Some("a!b"), None, false),
            Err(PatternError::InvalidChar('!'))
        ));
    }

    #[test]
    fn lowercase_l_allowed_only_when_insensitive() {
        // 'l' is not in the alphabet, but 'L' is.
        assert!(matches!(
            Pattern::new(Some("l"), None, true),
            Err(PatternError::InvalidChar('l'))
        ));
        assert!(Pattern::new(Some("l"), None, false).is_ok());
    }

    #[test]
    fn overlong_pattern_is_rejected() {
        let long = "1".repeat(45);
        assert!(matches!(
            Pattern::new(Some(&long), None, true),
            Err(PatternError::TooLong(45))
        ));
    }

    #[test]
    fn difficulty_grows_with_length() {
        let one = Pattern::new(Some("a"), None, false).unwrap();
        let three = Pattern::new(Some("abc"), None, false).unwrap();
        assert_eq!(one.estimated_difficulty(), 58);
        assert_eq!(three.estimated_difficulty(), 58 * 58 * 58);
    }

    #[test]
    fn difficulty_counts_both_parts() {
        let pattern = Pattern::new(Some("ab"), Some("cd"), true).unwrap();
        assert_eq!(pattern.estimated_difficulty(), 58u64.pow(4));
    }
}

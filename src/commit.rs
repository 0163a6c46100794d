//! Commit hash handle.

use std::fmt;

/// An immutable git commit hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Commit {
    hash: String,
}

impl Commit {
    /// Wraps a commit hash.
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Returns the full commit hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Returns the first `n` characters of the hash.
    ///
    /// `n` is clamped to the hash length: a negative `n` gives the empty
    /// string and an `n` past the end gives the whole hash.
    #[must_use]
    pub fn prefix(&self, n: isize) -> &str {
        let Ok(n) = usize::try_from(n) else {
            return "";
        };
        match self.hash.char_indices().nth(n) {
            Some((end, _)) => &self.hash[..end],
            None => &self.hash,
        }
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "abc123def4567890abc123def4567890abc123de";

    #[test]
    fn prefix_truncates() {
        let commit = Commit::new(HASH);
        assert_eq!(commit.prefix(0), "");
        assert_eq!(commit.prefix(1), "a");
        assert_eq!(commit.prefix(10), "abc123def4");
    }

    #[test]
    fn prefix_is_clamped() {
        let commit = Commit::new(HASH);
        let len = isize::try_from(HASH.len()).unwrap();
        assert_eq!(commit.prefix(-1), "");
        assert_eq!(commit.prefix(isize::MIN), "");
        assert_eq!(commit.prefix(len), HASH);
        assert_eq!(commit.prefix(len + 50), HASH);
        assert_eq!(commit.prefix(isize::MAX), HASH);
    }

    #[test]
    fn prefix_matches_clamped_truncation_for_every_n() {
        let commit = Commit::new("abc123def");
        for n in -5..20_isize {
            let clamped = usize::try_from(n.clamp(0, 9)).unwrap();
            assert_eq!(commit.prefix(n), &"abc123def"[..clamped], "n = {n}");
        }
    }

    #[test]
    fn displays_full_hash() {
        let commit = Commit::new(HASH);
        assert_eq!(commit.to_string(), HASH);
        assert_eq!(commit.as_str(), HASH);
    }
}

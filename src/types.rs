//! Shared types used across pycdas.
//! Includes `VersionPair` (with its "x.y" parser), the `RenderOptions` flag set,
//! and the `display_name` helper used for output banners.
use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A `major.minor` interpreter version identifying a bytecode dialect.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct VersionPair {
    pub major: u32,
    pub minor: u32,
}

impl VersionPair {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Orders this version against `major.minor`, the way dialect gates are written
    /// (`version.compare(3, 11).is_ge()`).
    pub fn compare(&self, major: u32, minor: u32) -> Ordering {
        (self.major, self.minor).cmp(&(major, minor))
    }

    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        self.compare(major, minor) != Ordering::Less
    }

    pub fn below(&self, major: u32, minor: u32) -> bool {
        self.compare(major, minor) == Ordering::Less
    }
}

impl fmt::Display for VersionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for VersionPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidVersionFormat {
            input: s.to_string(),
        };

        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        if minor.is_empty() {
            return Err(invalid());
        }

        // `u32::from_str` accepts a leading '+'; reject it so "3.+1" is not "3.1".
        let parse = |part: &str| -> Option<u32> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse().ok()
        };

        match (parse(major), parse(minor)) {
            (Some(major), Some(minor)) => Ok(VersionPair { major, minor }),
            _ => Err(invalid()),
        }
    }
}

/// Independent rendering switches. The empty set is the terse default.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderOptions(u32);

impl RenderOptions {
    /// Dump the extra code-object fields (first line, line table, local kinds).
    pub const PYCODE_VERBOSE: RenderOptions = RenderOptions(0x1);
    /// Keep CACHE pseudo-instructions in 3.11+ disassembly.
    pub const SHOW_CACHES: RenderOptions = RenderOptions(0x2);

    pub const fn empty() -> Self {
        RenderOptions(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: RenderOptions) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for RenderOptions {
    type Output = RenderOptions;

    fn bitor(self, rhs: RenderOptions) -> RenderOptions {
        RenderOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for RenderOptions {
    fn bitor_assign(&mut self, rhs: RenderOptions) {
        self.0 |= rhs.0;
    }
}

#[cfg(windows)]
const PATH_SEPARATOR: char = '\\';
#[cfg(not(windows))]
const PATH_SEPARATOR: char = '/';

/// Final path segment of `identifier`, used only for display.
pub fn display_name(identifier: &str) -> &str {
    match identifier.rfind(PATH_SEPARATOR) {
        Some(idx) => &identifier[idx + 1..],
        None => identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_versions() {
        let cases = [("3.11", 3, 11), ("2.7", 2, 7), ("0.0", 0, 0), ("10.04", 10, 4)];
        for (input, major, minor) in cases {
            let v: VersionPair = input.parse().unwrap();
            assert_eq!(v, VersionPair::new(major, minor), "input {input}");
        }
    }

    #[test]
    fn rejects_malformed_versions() {
        let cases = [
            "", "3", "3.", ".5", "3.x", "x.1", "3.11.2", "-1.0", "3.-1", "3.+1", " 3.1", "3 .1",
        ];
        for input in cases {
            match input.parse::<VersionPair>() {
                Err(Error::InvalidVersionFormat { input: got }) => assert_eq!(got, input),
                other => panic!("expected InvalidVersionFormat for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn version_ordering_matches_dialect_gates() {
        let v = VersionPair::new(3, 11);
        assert!(v.at_least(3, 11));
        assert!(v.at_least(2, 7));
        assert!(v.below(3, 12));
        assert!(!v.below(3, 8));
        assert_eq!(v.to_string(), "3.11");
    }

    #[test]
    fn render_options_combine() {
        let mut opts = RenderOptions::empty();
        assert!(opts.is_empty());
        opts |= RenderOptions::SHOW_CACHES;
        assert!(opts.contains(RenderOptions::SHOW_CACHES));
        assert!(!opts.contains(RenderOptions::PYCODE_VERBOSE));
        let both = opts | RenderOptions::PYCODE_VERBOSE;
        assert_eq!(both.bits(), 0x3);
    }

    #[test]
    fn display_name_takes_last_segment() {
        assert_eq!(display_name("bad.pyc"), "bad.pyc");
        #[cfg(not(windows))]
        {
            assert_eq!(display_name("/tmp/cache/mod.cpython-311.pyc"), "mod.cpython-311.pyc");
            assert_eq!(display_name("dir/"), "");
        }
    }
}

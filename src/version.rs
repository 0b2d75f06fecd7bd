use std::fmt;
use std::str::FromStr;

use crate::error::BCryptError;

/// The `$2?$` tag at the front of a hash string.
///
/// Both variants hash identically here; passwords are capped at 72 bytes
/// before hashing, so the length-wrap bug that separates `2a` from `2b` in
/// older implementations cannot occur. Only the label differs.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Version {
    TwoA,
    #[default]
    TwoB,
}

impl Version {
    pub const fn prefix(self) -> &'static str {
        match self {
            Version::TwoA => "2a",
            Version::TwoB => "2b",
        }
    }

    pub fn from_prefix(prefix: &str) -> Result<Self, BCryptError> {
        match prefix {
            "2a" => Ok(Version::TwoA),
            "2b" => Ok(Version::TwoB),
            other => Err(BCryptError::UnsupportedVersion(other.to_string())),
        }
    }
}

impl FromStr for Version {
    type Err = BCryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::from_prefix(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

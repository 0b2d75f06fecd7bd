//! The 60-character `$<version>$<cost>$<salt><digest>` hash string.

use std::fmt;
use std::str::FromStr;

use crate::base64::{self, ENCODED_DIGEST_LEN, ENCODED_SALT_LEN};
use crate::bcrypt;
use crate::cost::CostFactor;
use crate::error::{BCryptError, Result};
use crate::password::Password;
use crate::salt::Salt;
use crate::version::Version;

pub const HASH_LEN: usize = 60;

/// Length of the encoded salt followed by the encoded digest.
pub const TAIL_LEN: usize = ENCODED_SALT_LEN + ENCODED_DIGEST_LEN;

/// A parsed or freshly computed bcrypt hash.
///
/// The stored text is kept verbatim, so parsing and displaying a hash always
/// gives back the same string.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Hash {
    value: String,
    version: Version,
    cost: CostFactor,
    salt: Salt,
}

impl Hash {
    pub fn parse(hash: &str) -> Result<Self> {
        if !hash.is_ascii() {
            return Err(BCryptError::InvalidHash(
                "contains non-ASCII characters".to_string(),
            ));
        }
        if hash.len() != HASH_LEN {
            return Err(BCryptError::InvalidHash(format!(
                "expected {HASH_LEN} characters, but was {}",
                hash.len()
            )));
        }

        let bytes = hash.as_bytes();
        if bytes[0] != b'$' || bytes[3] != b'$' || bytes[6] != b'$' {
            return Err(BCryptError::InvalidHash(
                "expected $<version>$<cost>$<salt><digest>".to_string(),
            ));
        }

        let version = Version::from_prefix(&hash[1..3])?;
        let cost = parse_cost(&hash[4..6])?;
        Hash::from_parts(version, cost, &hash[7..])
    }

    /// Builds a hash from its components, `tail` being the 22-character
    /// encoded salt followed by the 31-character encoded digest.
    pub fn from_parts(version: Version, cost: CostFactor, tail: &str) -> Result<Self> {
        if tail.len() != TAIL_LEN {
            return Err(BCryptError::InvalidHash(format!(
                "salt and digest must be exactly {TAIL_LEN} characters, but was {}",
                tail.len()
            )));
        }
        base64::validate(tail)?;

        let salt = Salt::from_bcrypt_str(&tail[..ENCODED_SALT_LEN])?;
        Ok(Hash {
            value: format!("${}${}${}", version.prefix(), cost, tail),
            version,
            cost,
            salt,
        })
    }

    pub(crate) fn assemble(version: Version, cost: CostFactor, salt: &Salt, digest: &str) -> Self {
        debug_assert_eq!(digest.len(), ENCODED_DIGEST_LEN);
        Hash {
            value: format!("${}${}${}{}", version.prefix(), cost, salt.to_bcrypt_string(), digest),
            version,
            cost,
            salt: *salt,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn cost(&self) -> CostFactor {
        self.cost
    }

    pub fn salt(&self) -> Salt {
        self.salt
    }

    pub fn encoded_salt(&self) -> &str {
        &self.value[7..7 + ENCODED_SALT_LEN]
    }

    pub fn encoded_digest(&self) -> &str {
        &self.value[7 + ENCODED_SALT_LEN..]
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Same salt and digest under another version label.
    pub fn with_version(&self, version: Version) -> Hash {
        Hash {
            value: format!("${}{}", version.prefix(), &self.value[3..]),
            version,
            cost: self.cost,
            salt: self.salt,
        }
    }

    /// Checks `password` against this hash.
    pub fn verify(&self, password: &Password) -> bool {
        bcrypt::verify(password, self)
    }
}

fn parse_cost(field: &str) -> Result<CostFactor> {
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BCryptError::InvalidHash(format!(
            "cost must be two digits, but was {field:?}"
        )));
    }
    // two ASCII digits always fit
    let cost = field.bytes().fold(0u32, |acc, b| acc * 10 + (b - b'0') as u32);
    CostFactor::new(cost)
}

impl FromStr for Hash {
    type Err = BCryptError;

    fn from_str(s: &str) -> Result<Self> {
        Hash::parse(s)
    }
}

impl TryFrom<&str> for Hash {
    type Error = BCryptError;

    fn try_from(s: &str) -> Result<Self> {
        Hash::parse(s)
    }
}

impl AsRef<str> for Hash {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.value)
    }
}

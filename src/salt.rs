use std::fmt;

use log::trace;
use rand::RngCore;

use crate::base64;
use crate::error::{BCryptError, Result};

pub const SALT_LEN: usize = 16;

/// 16 random bytes mixed into the expensive key schedule.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SALT_LEN] = bytes
            .try_into()
            .map_err(|_| BCryptError::InvalidSaltLength(bytes.len()))?;
        Ok(Salt(bytes))
    }

    pub const fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Salt(bytes)
    }

    /// Draws a fresh salt from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        trace!("generated {SALT_LEN}-byte salt");
        Salt(salt)
    }

    /// Parses the 22-character encoded form found in hash strings.
    pub fn from_bcrypt_str(encoded: &str) -> Result<Self> {
        Salt::new(&base64::decode(encoded)?)
    }

    pub fn to_bcrypt_string(&self) -> String {
        base64::encode(&self.0)
    }

    pub fn to_bytes(&self) -> [u8; SALT_LEN] {
        self.0
    }

    pub(crate) fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Salt")
            .field("encoded", &self.to_bcrypt_string())
            .finish()
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_bcrypt_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_generation() {
        let salt1 = Salt::generate();
        let salt2 = Salt::generate();

        // Ensure salts are different
        assert_ne!(salt1, salt2);

        // Ensure correct length
        assert_eq!(salt1.to_bytes().len(), SALT_LEN);
        assert_eq!(salt1.to_bcrypt_string().len(), 22);
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert_eq!(Salt::new(&[0; 15]), Err(BCryptError::InvalidSaltLength(15)));
        assert_eq!(Salt::new(&[0; 17]), Err(BCryptError::InvalidSaltLength(17)));
        assert_eq!(Salt::new(&[]), Err(BCryptError::InvalidSaltLength(0)));
        assert!(Salt::new(&[7; 16]).is_ok());
    }

    #[test]
    fn encoded_form_round_trips() -> Result<()> {
        let salt = Salt::from_bcrypt_str("R9h/cIPz0gi.URNNX3kh2O")?;
        assert_eq!(salt.to_bcrypt_string(), "R9h/cIPz0gi.URNNX3kh2O");
        assert_eq!(Salt::from_bytes(salt.to_bytes()), salt);
        Ok(())
    }

    #[test]
    fn encoded_form_must_decode_to_16_bytes() {
        assert_eq!(
            Salt::from_bcrypt_str("R9h/cIPz0gi.URNNX3kh2"),
            Err(BCryptError::InvalidSaltLength(15))
        );
        assert_eq!(
            Salt::from_bcrypt_str("R9h/cIPz0gi.URNNX3kh2!"),
            Err(BCryptError::InvalidEncoding('!'))
        );
    }

    #[test]
    fn copies_do_not_alias() {
        let salt = Salt::from_bytes([1; SALT_LEN]);
        let mut bytes = salt.to_bytes();
        bytes[0] = 9;
        assert_eq!(salt.to_bytes()[0], 1);
    }

    #[test]
    fn debug_shows_encoded_form() {
        let salt = Salt::from_bytes([0; SALT_LEN]);
        assert_eq!(format!("{salt:?}"), "Salt { encoded: \"......................\" }");
    }
}

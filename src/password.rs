use std::fmt;

use subtle::ConstantTimeEq;
use unicode_normalization::is_nfc;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{BCryptError, Result};

/// Bcrypt only ever reads this many bytes of a password.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// A plaintext password, wiped from memory when dropped or cleared.
pub struct Password {
    value: Zeroizing<String>,
}

impl Password {
    /// Takes ownership of `password`. Passwords over 72 bytes are accepted;
    /// the excess is ignored when hashing.
    pub fn new(password: impl Into<String>) -> Result<Self> {
        let value = Zeroizing::new(password.into());
        if value.is_empty() {
            return Err(BCryptError::InvalidPassword("Password cannot be empty"));
        }
        Ok(Password { value })
    }

    /// The UTF-8 bytes bcrypt hashes: at most the first 72.
    ///
    /// Truncation is byte-wise and may split a multi-byte character; the
    /// partial sequence is kept as is.
    pub fn truncated_bytes(&self) -> Zeroizing<Vec<u8>> {
        let bytes = self.value.as_bytes();
        let len = bytes.len().min(MAX_PASSWORD_BYTES);
        Zeroizing::new(bytes[..len].to_vec())
    }

    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn byte_len(&self) -> usize {
        self.value.len()
    }

    /// Whether the password is in Unicode NFC. Hashing never normalises, so
    /// visually identical passwords in different forms hash differently.
    pub fn is_nfc(&self) -> bool {
        is_nfc(&self.value)
    }

    /// Zeroes the password in place. A cleared password hashes as empty.
    pub fn clear(&mut self) {
        self.value.zeroize();
    }

    pub fn is_cleared(&self) -> bool {
        self.value.is_empty()
    }
}

impl TryFrom<&str> for Password {
    type Error = BCryptError;

    fn try_from(password: &str) -> Result<Self> {
        Password::new(password)
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.value.as_bytes().ct_eq(other.value.as_bytes()).into()
    }
}

impl Eq for Password {}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Password")
            .field("length", &self.char_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_passwords() {
        // Empty password
        assert_eq!(
            Password::new("").err(),
            Some(BCryptError::InvalidPassword("Password cannot be empty"))
        );

        // Null bytes and long passwords are fine
        assert!(Password::new("pass\0word").is_ok());
        assert!(Password::new("a".repeat(73)).is_ok());
    }

    #[test]
    fn truncates_to_72_bytes() -> Result<()> {
        let long = Password::new("a".repeat(100))?;
        assert_eq!(long.truncated_bytes().len(), MAX_PASSWORD_BYTES);
        assert_eq!(long.byte_len(), 100);

        let short = Password::new("abc123xyz")?;
        assert_eq!(short.truncated_bytes().as_slice(), b"abc123xyz");
        Ok(())
    }

    #[test]
    fn truncation_may_split_a_character() -> Result<()> {
        // 71 ASCII bytes followed by a two-byte character
        let password = Password::new(format!("{}ä", "a".repeat(71)))?;
        let bytes = password.truncated_bytes();
        assert_eq!(bytes.len(), 72);
        assert_eq!(bytes[71], 0xc3);
        assert_eq!(password.char_len(), 72);
        Ok(())
    }

    #[test]
    fn clear_zeroes_the_buffer() -> Result<()> {
        let mut password = Password::new("secret")?;
        password.clear();
        assert!(password.is_cleared());
        assert!(password.truncated_bytes().is_empty());
        Ok(())
    }

    #[test]
    fn test_password_normalization_is_reported_not_applied() -> Result<()> {
        let composed = Password::new("café")?;
        let decomposed = Password::new("cafe\u{0301}")?;

        assert!(composed.is_nfc());
        assert!(!decomposed.is_nfc());
        assert_ne!(composed, decomposed);
        assert_ne!(composed.truncated_bytes(), decomposed.truncated_bytes());
        Ok(())
    }

    #[test]
    fn debug_hides_the_secret() -> Result<()> {
        let password = Password::new("hunter2")?;
        let debug = format!("{password:?}");
        assert_eq!(debug, "Password { length: 7 }");
        Ok(())
    }
}

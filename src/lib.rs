//! bcrypt implementation in rust from scratch
//!
//! bcrypt is a key derivation function: a deliberately slow, one-way function
//! of a password and a salt. The work factor is an exponent, so every step up
//! in cost doubles the time needed to compute (and to brute force) a hash.
//!
//! ```no_run
//! use bcrypt_rust::{BCrypt, CostFactor, Hash, Password, Version};
//!
//! # fn main() -> Result<(), bcrypt_rust::BCryptError> {
//! let password = Password::new("correct horse battery staple")?;
//! let hash = BCrypt::new(Version::TwoB, CostFactor::new(12)?).hash(&password);
//!
//! let stored: Hash = hash.to_string().parse()?;
//! assert!(stored.verify(&password));
//! # Ok(())
//! # }
//! ```
//!
//! Each call builds its own cipher state on the stack and wipes it
//! afterwards, so hashing and verification can run on any number of threads
//! at once. Nothing inside checks for cancellation: a call at cost 31 runs
//! until it is done.

pub mod base64;
pub mod bcrypt;
mod blowfish;
mod constants;
pub mod cost;
pub mod error;
pub mod hash;
pub mod password;
pub mod salt;
pub mod version;

pub use crate::bcrypt::{hash, hash_with, hash_with_salt, verify, verify_str, BCrypt};
pub use crate::cost::CostFactor;
pub use crate::error::{BCryptError, Result};
pub use crate::hash::Hash;
pub use crate::password::Password;
pub use crate::salt::Salt;
pub use crate::version::Version;

// bcrypt is a password hashing function designed by Niels Provos and David Mazières,
// based on the Blowfish cipher, and presented in 1999 at the Usenix Security Symposium.

use log::debug;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::base64;
use crate::blowfish::Blowfish;
use crate::cost::CostFactor;
use crate::hash::Hash;
use crate::password::{Password, MAX_PASSWORD_BYTES};
use crate::salt::{Salt, SALT_LEN};
use crate::version::Version;

/// Raw digest length; only the first [`DIGEST_LEN`] bytes are encoded.
pub const RAW_DIGEST_LEN: usize = 24;
pub const DIGEST_LEN: usize = 23;

// "OrpheanBeholderScryDoubt" as big-endian words
const CTEXT: [u32; 6] = [
    0x4f727068, 0x65616e42, 0x65686f6c, 0x64657253, 0x63727944, 0x6f756274,
];

/// Hashing settings. Holds no secrets and no cipher state, so one value can
/// be shared freely between threads.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BCrypt {
    version: Version,
    cost: CostFactor,
}

impl BCrypt {
    pub fn new(version: Version, cost: CostFactor) -> Self {
        BCrypt { version, cost }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn cost(&self) -> CostFactor {
        self.cost
    }

    /// Hashes `password` under a freshly generated salt.
    pub fn hash(&self, password: &Password) -> Hash {
        self.hash_with_salt(password, &Salt::generate())
    }

    pub fn hash_with_salt(&self, password: &Password, salt: &Salt) -> Hash {
        debug!("hashing with version {} and cost {}", self.version, self.cost);

        let mut raw = digest(&password.truncated_bytes(), salt.as_bytes(), self.cost);
        let encoded = base64::encode(&raw[..DIGEST_LEN]);
        raw.zeroize();

        Hash::assemble(self.version, self.cost, salt, &encoded)
    }

    /// Version is taken from `hash`, not from `self`.
    pub fn verify(&self, password: &Password, hash: &Hash) -> bool {
        verify(password, hash)
    }
}

/// Hashes with version 2b and the default cost.
pub fn hash(password: &Password) -> Hash {
    BCrypt::default().hash(password)
}

pub fn hash_with(password: &Password, version: Version, cost: CostFactor) -> Hash {
    BCrypt::new(version, cost).hash(password)
}

pub fn hash_with_salt(password: &Password, version: Version, cost: CostFactor, salt: &Salt) -> Hash {
    BCrypt::new(version, cost).hash_with_salt(password, salt)
}

/// Recomputes the digest of `password` under the salt and cost stored in
/// `hash` and compares it in constant time.
pub fn verify(password: &Password, hash: &Hash) -> bool {
    debug!("verifying against version {} and cost {}", hash.version(), hash.cost());

    let mut raw = digest(&password.truncated_bytes(), hash.salt().as_bytes(), hash.cost());
    let generated = Zeroizing::new(base64::encode(&raw[..DIGEST_LEN]));
    raw.zeroize();

    constant_time_compare(generated.as_bytes(), hash.encoded_digest().as_bytes())
}

/// Like [`verify`], for a hash string that has not been parsed yet. A string
/// that is not a valid hash never matches.
pub fn verify_str(password: &Password, hash: &str) -> bool {
    match Hash::parse(hash) {
        Ok(hash) => verify(password, &hash),
        Err(err) if err.is_malformed_hash() => {
            debug!("rejecting malformed hash: {err}");
            false
        }
        Err(err) => {
            debug!("rejecting hash with out-of-range parameters: {err}");
            false
        }
    }
}

/// The bcrypt digest of an already truncated password.
///
/// Runs the expensive key schedule and then encrypts "OrpheanBeholderScryDoubt"
/// 64 times. No validation happens here: callers pass at most 72 password
/// bytes and a cost already known to be in range.
pub(crate) fn digest(password: &[u8], salt: &[u8; SALT_LEN], cost: CostFactor) -> [u8; RAW_DIGEST_LEN] {
    debug_assert!(password.len() <= MAX_PASSWORD_BYTES);

    // NUL-terminated, as the C implementations see it
    let mut key = Zeroizing::new(Vec::with_capacity(password.len() + 1));
    key.extend_from_slice(password);
    key.push(0);

    let state = eks_blowfish_setup(&key, salt, cost);

    let mut ctext = CTEXT;
    for _ in 0..64 {
        for i in (0..ctext.len()).step_by(2) {
            let (l, r) = state.encrypt_block(ctext[i], ctext[i + 1]);
            ctext[i] = l;
            ctext[i + 1] = r;
        }
    }

    let mut output = [0u8; RAW_DIGEST_LEN];
    for (chunk, word) in output.chunks_exact_mut(4).zip(ctext.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    ctext.zeroize();
    output
}

fn eks_blowfish_setup(key: &[u8], salt: &[u8; SALT_LEN], cost: CostFactor) -> Blowfish {
    let mut state = Blowfish::init_state();

    // Initial key schedule
    state.expand_key_with_salt(key, salt);

    // 2^cost rounds, each continuing from the previous state
    for _ in 0..cost.rounds() {
        state.expand_key(key);
        state.expand_key(salt);
    }

    state
}

// Constant-time comparison function
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

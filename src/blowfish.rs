//! Blowfish block cipher with the cheap and salted key expansions used by
//! the expensive key schedule.
//!
//! A `Blowfish` value is scratch state for a single hashing call. It is
//! rebuilt from the pi constants every time and zeroed when dropped.

use zeroize::Zeroize;

use crate::constants::{INITIAL_P, INITIAL_S};

const ROUNDS: usize = 16;
const P_LEN: usize = ROUNDS + 2;

pub(crate) struct Blowfish {
    p: [u32; P_LEN],
    s: [[u32; 256]; 4],
}

impl Blowfish {
    pub(crate) fn init_state() -> Self {
        Blowfish {
            p: INITIAL_P,
            s: INITIAL_S,
        }
    }

    /// Encrypts one 64-bit block given as its big-endian halves.
    pub(crate) fn encrypt_block(&self, mut left: u32, mut right: u32) -> (u32, u32) {
        for i in (0..ROUNDS).step_by(2) {
            left ^= self.p[i];
            right ^= self.f(left);
            right ^= self.p[i + 1];
            left ^= self.f(right);
        }

        left ^= self.p[ROUNDS];
        right ^= self.p[ROUNDS + 1];

        (right, left)
    }

    /// Plain expansion: mix `key` into P, then rebuild P and S by chaining
    /// encryptions of an all-zero block.
    pub(crate) fn expand_key(&mut self, key: &[u8]) {
        self.xor_key(key);

        let mut block = (0u32, 0u32);
        for i in (0..P_LEN).step_by(2) {
            block = self.encrypt_block(block.0, block.1);
            self.p[i] = block.0;
            self.p[i + 1] = block.1;
        }

        for i in 0..4 {
            for j in (0..256).step_by(2) {
                block = self.encrypt_block(block.0, block.1);
                self.s[i][j] = block.0;
                self.s[i][j + 1] = block.1;
            }
        }
    }

    /// Salted expansion: like [`Blowfish::expand_key`], but the running block
    /// absorbs the next two salt words before every encryption.
    pub(crate) fn expand_key_with_salt(&mut self, key: &[u8], salt: &[u8]) {
        self.xor_key(key);

        let mut j = 0;
        let mut block = (0u32, 0u32);
        for i in (0..P_LEN).step_by(2) {
            block.0 ^= next_word(salt, &mut j);
            block.1 ^= next_word(salt, &mut j);
            block = self.encrypt_block(block.0, block.1);
            self.p[i] = block.0;
            self.p[i + 1] = block.1;
        }

        for i in 0..4 {
            for k in (0..256).step_by(2) {
                block.0 ^= next_word(salt, &mut j);
                block.1 ^= next_word(salt, &mut j);
                block = self.encrypt_block(block.0, block.1);
                self.s[i][k] = block.0;
                self.s[i][k + 1] = block.1;
            }
        }
    }

    fn xor_key(&mut self, key: &[u8]) {
        let mut j = 0;
        for i in 0..P_LEN {
            self.p[i] ^= next_word(key, &mut j);
        }
    }

    fn f(&self, x: u32) -> u32 {
        let [a, b, c, d] = x.to_be_bytes();
        let h = self.s[0][a as usize].wrapping_add(self.s[1][b as usize]);
        (h ^ self.s[2][c as usize]).wrapping_add(self.s[3][d as usize])
    }
}

impl Drop for Blowfish {
    fn drop(&mut self) {
        self.p.zeroize();
        self.s.zeroize();
    }
}

/// Reads the next big-endian word from `data`, wrapping around at the end.
fn next_word(data: &[u8], j: &mut usize) -> u32 {
    debug_assert!(!data.is_empty());
    let mut word = 0u32;
    for _ in 0..4 {
        word = (word << 8) | data[*j % data.len()] as u32;
        *j = (*j + 1) % data.len();
    }
    word
}

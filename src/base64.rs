//! The bcrypt flavour of base64.
//!
//! Same 6-bit grouping as RFC 4648 but a different alphabet, and no `=`
//! padding: a trailing group of one or two bytes yields two or three symbols.

use crate::error::{BCryptError, Result};
use crate::salt::SALT_LEN;

// BCrypt's custom base64 alphabet
const BCRYPT_BASE64: &[u8; 64] =
    b"./ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Encoded length of a 16-byte salt.
pub const ENCODED_SALT_LEN: usize = 22;

/// Encoded length of the 23 digest bytes that make it into a hash string.
pub const ENCODED_DIGEST_LEN: usize = 31;

const DIGEST_BYTES: usize = 23;
const INVALID: u8 = 0xff;

const DECODE_TABLE: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < BCRYPT_BASE64.len() {
        table[BCRYPT_BASE64[i] as usize] = i as u8;
        i += 1;
    }
    table
};

pub fn encode(input: &[u8]) -> String {
    let mut output = String::with_capacity((input.len() * 4 + 2) / 3);

    for chunk in input.chunks(3) {
        let b1 = chunk[0] as u32;
        let b2 = chunk.get(1).map(|&b| b as u32).unwrap_or(0);
        let b3 = chunk.get(2).map(|&b| b as u32).unwrap_or(0);

        let triple = (b1 << 16) | (b2 << 8) | b3;

        output.push(symbol(triple >> 18));
        output.push(symbol(triple >> 12));
        if chunk.len() > 1 {
            output.push(symbol(triple >> 6));
        }
        if chunk.len() > 2 {
            output.push(symbol(triple));
        }
    }

    if input.len() == SALT_LEN {
        while output.len() < ENCODED_SALT_LEN {
            output.push(BCRYPT_BASE64[0] as char);
        }
    }

    output
}

/// Decodes `input`, failing on the first character outside the alphabet.
///
/// The output length follows from the input length: 22 symbols give a
/// 16-byte salt, 31 give the 23 digest bytes, anything else `len * 3 / 4`.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let values = input
        .chars()
        .map(decode_char)
        .collect::<Result<Vec<u8>>>()?;

    let output_len = match values.len() {
        ENCODED_SALT_LEN => SALT_LEN,
        ENCODED_DIGEST_LEN => DIGEST_BYTES,
        n => n * 3 / 4,
    };

    let mut output = Vec::with_capacity(output_len);
    let mut buf = 0u32;
    let mut num_bits = 0;

    for &val in &values {
        buf = (buf << 6) | val as u32;
        num_bits += 6;

        if num_bits >= 8 {
            num_bits -= 8;
            output.push((buf >> num_bits) as u8);
            buf &= (1 << num_bits) - 1;
            if output.len() == output_len {
                break;
            }
        }
    }

    Ok(output)
}

/// Fails on the first character of `input` outside the bcrypt alphabet.
pub(crate) fn validate(input: &str) -> Result<()> {
    input.chars().try_for_each(|c| decode_char(c).map(|_| ()))
}

fn symbol(sextet: u32) -> char {
    BCRYPT_BASE64[(sextet & 0x3f) as usize] as char
}

fn decode_char(c: char) -> Result<u8> {
    let val = DECODE_TABLE
        .get(c as usize)
        .copied()
        .unwrap_or(INVALID);
    if val == INVALID {
        return Err(BCryptError::InvalidEncoding(c));
    }
    Ok(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_order() {
        assert_eq!(encode(&[0x00, 0x00, 0x00]), "....");
        assert_eq!(encode(&[0xff, 0xff, 0xff]), "9999");
        assert_eq!(encode(&[0x00, 0x10, 0x83]), "./AB");
    }

    #[test]
    fn partial_groups_emit_short_tails() {
        assert_eq!(encode(&[0xff]).len(), 2);
        assert_eq!(encode(&[0xff, 0xff]).len(), 3);
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn salt_encodes_to_22_symbols() {
        let salt: Vec<u8> = (0..16).collect();
        let encoded = encode(&salt);
        assert_eq!(encoded, "..CA.uOD/eaGAOmJB.yMBu");
        assert_eq!(decode(&encoded).unwrap(), salt);
    }

    #[test]
    fn known_salt_decodes() {
        let decoded = decode("CCCCCCCCCCCCCCCCCCCCC.").unwrap();
        assert_eq!(decoded.len(), 16);
        assert_eq!(encode(&decoded), "CCCCCCCCCCCCCCCCCCCCC.");
    }

    #[test]
    fn digest_lengths() {
        let digest = [0xa5u8; 23];
        let encoded = encode(&digest);
        assert_eq!(encoded.len(), ENCODED_DIGEST_LEN);
        assert_eq!(decode(&encoded).unwrap(), digest);
    }

    #[test]
    fn general_lengths_round_trip() {
        for len in [1usize, 2, 3, 4, 5, 6, 9, 12, 30] {
            let bytes: Vec<u8> = (0..len as u8).map(|b| b.wrapping_mul(37)).collect();
            assert_eq!(decode(&encode(&bytes)).unwrap(), bytes, "length {len}");
        }
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert_eq!(decode("ab+d"), Err(BCryptError::InvalidEncoding('+')));
        assert_eq!(decode("ab=d"), Err(BCryptError::InvalidEncoding('=')));
        assert_eq!(decode("abé."), Err(BCryptError::InvalidEncoding('é')));
        assert_eq!(validate("abc$"), Err(BCryptError::InvalidEncoding('$')));
        assert_eq!(validate("./Az09"), Ok(()));
    }
}

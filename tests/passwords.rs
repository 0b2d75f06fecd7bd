use bcrypt_rust::{hash_with, hash_with_salt, BCrypt, CostFactor, Password, Result, Salt, Version};

fn fast() -> BCrypt {
    BCrypt::new(Version::TwoB, CostFactor::MIN)
}

#[test]
fn hashing_is_deterministic_for_a_fixed_salt() -> Result<()> {
    let password = Password::new("correct horse")?;
    let salt = Salt::generate();
    let a = fast().hash_with_salt(&password, &salt);
    let b = fast().hash_with_salt(&password, &salt);
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn fresh_salts_give_fresh_hashes() -> Result<()> {
    let password = Password::new("correct horse")?;
    let a = fast().hash(&password);
    let b = fast().hash(&password);
    assert_ne!(a, b);
    assert_ne!(a.salt(), b.salt());
    assert!(a.verify(&password) && b.verify(&password));
    Ok(())
}

#[test]
fn defaults_are_2b_and_cost_10() {
    let bcrypt = BCrypt::default();
    assert_eq!(bcrypt.version(), Version::TwoB);
    assert_eq!(bcrypt.cost().value(), 10);
}

#[test]
fn bytes_past_72_are_ignored() -> Result<()> {
    let base = "x".repeat(72);
    let hash = fast().hash(&Password::new(base.as_str())?);

    for suffix in ["a", "suffix", "€", "🦀🦀"] {
        let longer = Password::new(format!("{base}{suffix}"))?;
        assert!(hash.verify(&longer), "suffix {suffix}");
    }
    assert!(!hash.verify(&Password::new(&base[..71])?));
    Ok(())
}

#[test]
fn truncation_inside_multibyte_characters() -> Result<()> {
    let salt = Salt::from_bytes([42; 16]);
    let cost = CostFactor::MIN;

    // 70 ASCII bytes, then a character whose encoding straddles byte 72
    for tail in ["aä", "€", "🦀"] {
        let password = Password::new(format!("{}{tail}", "a".repeat(70)))?;
        assert_eq!(password.truncated_bytes().len(), 72);

        let hash = hash_with_salt(&password, Version::TwoB, cost, &salt);
        assert!(hash.verify(&password));
    }

    // Both split the same three-byte character after its second byte
    let a = Password::new(format!("{}€", "a".repeat(70)))?;
    let b = Password::new(format!("{}€€€", "a".repeat(70)))?;
    assert_eq!(
        hash_with_salt(&a, Version::TwoB, cost, &salt),
        hash_with_salt(&b, Version::TwoB, cost, &salt)
    );
    Ok(())
}

#[test]
fn exact_72_byte_multibyte_passwords() -> Result<()> {
    for password in ["€".repeat(24), "🦀".repeat(18), "ä".repeat(36)] {
        assert_eq!(password.len(), 72);
        let password = Password::new(password)?;
        let hash = fast().hash(&password);
        assert!(hash.verify(&password));
    }
    Ok(())
}

#[test]
fn null_bytes_are_part_of_the_password() -> Result<()> {
    let password = Password::new("abc\0def")?;
    let hash = fast().hash(&password);
    assert!(hash.verify(&password));
    assert!(!hash.verify(&Password::new("abc")?));
    assert!(!hash.verify(&Password::new("abcdef")?));
    Ok(())
}

#[test]
fn unicode_forms_are_not_normalised() -> Result<()> {
    let composed = Password::new("caf\u{00e9}")?;
    let decomposed = Password::new("cafe\u{0301}")?;
    let hash = fast().hash(&composed);
    assert!(hash.verify(&composed));
    assert!(!hash.verify(&decomposed));
    Ok(())
}

#[test]
fn invisible_and_whitespace_characters_count() -> Result<()> {
    for (with, without) in [("pass\u{200b}word", "password"), ("pass word", "password"), (" ", "  ")] {
        let hash = fast().hash(&Password::new(with)?);
        assert!(hash.verify(&Password::new(with)?));
        assert!(!hash.verify(&Password::new(without)?));
    }
    Ok(())
}

#[test]
fn single_character_passwords() -> Result<()> {
    let hash = hash_with(&Password::new("x")?, Version::TwoA, CostFactor::MIN);
    assert!(hash.as_str().starts_with("$2a$04$"));
    assert!(hash.verify(&Password::new("x")?));
    assert!(!hash.verify(&Password::new("y")?));
    Ok(())
}

#[test]
fn both_versions_verify() -> Result<()> {
    let password = Password::new("versioned")?;
    let salt = Salt::generate();
    let a = hash_with_salt(&password, Version::TwoA, CostFactor::MIN, &salt);
    let b = hash_with_salt(&password, Version::TwoB, CostFactor::MIN, &salt);
    assert_eq!(&a.as_str()[3..], &b.as_str()[3..]);
    assert!(a.verify(&password) && b.verify(&password));
    Ok(())
}

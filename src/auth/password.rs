use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

fn keyed_argon2(secret: &[u8]) -> anyhow::Result<Argon2<'_>> {
    Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, Params::default())
        .map_err(|e| {
            error!(error = %e, "argon2 keyed init error");
            anyhow::anyhow!(e.to_string())
        })
}

/// Hashes a password with Argon2id, salted per call and keyed with the
/// server-wide hash secret, so a leaked hash table is useless without the key.
pub fn hash_password(plain: &str, secret: &str) -> anyhow::Result<String> {
    let argon2 = keyed_argon2(secret.as_bytes())?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Verifies a password against a stored hash. A mismatch is an expected
/// outcome, not a fault: any failure, including a corrupted hash string,
/// comes back as `false`. The distinction only goes to the logs.
pub fn verify_password(plain: &str, hash: &str, secret: &str) -> bool {
    let argon2 = match keyed_argon2(secret.as_bytes()) {
        Ok(a) => a,
        Err(_) => return false,
    };
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "malformed password hash");
            return false;
        }
    };
    argon2.verify_password(plain.as_bytes(), &parsed).is_ok()
}

//! API token generation and hashing.
//!
//! Shared between the HTTP auth layer and the admin CLI so both sides agree
//! on the stored representation.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Character set for generated tokens: A-Z, a-z, 0-9.
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated tokens (~286 bits of entropy).
const TOKEN_LEN: usize = 48;

/// Generates a cryptographically random API token.
pub fn generate_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hashes a raw token with HMAC-SHA256 keyed by the server signing secret.
///
/// Returns a 64-character lowercase hex-encoded MAC. An attacker with
/// read-only access to the database cannot verify or forge tokens without
/// the server-side secret.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

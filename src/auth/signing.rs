//! HMAC-SHA256 signing primitive for opaque tokens.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

fn mac(secret: &str) -> HmacSha256 {
    // HMAC-SHA256 accepts keys of any length; this cannot fail.
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}

/// Sign a value with the given secret. Deterministic; returns the
/// signature as lowercase hex.
pub fn sign(secret: &str, value: &str) -> String {
    let mut m = mac(secret);
    m.update(value.as_bytes());
    hex::encode(m.finalize().into_bytes())
}

/// Verify a hex signature over `value`. The underlying MAC comparison
/// runs in constant time regardless of where the bytes first differ.
pub fn verify(secret: &str, value: &str, signature: &str) -> bool {
    let Ok(sig_bytes) = hex::decode(signature) else {
        return false;
    };
    let mut m = mac(secret);
    m.update(value.as_bytes());
    m.verify_slice(&sig_bytes).is_ok()
}

/// Constant-time string equality for token comparison (CSRF double-submit).
/// Differing lengths short-circuit, which leaks only the length.
pub fn tokens_equal(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn sign_is_deterministic() {
        assert_eq!(sign(SECRET, "value"), sign(SECRET, "value"));
    }

    #[test]
    fn sign_depends_on_value_and_secret() {
        assert_ne!(sign(SECRET, "a"), sign(SECRET, "b"));
        assert_ne!(sign(SECRET, "a"), sign("other-secret", "a"));
    }

    #[test]
    fn valid_signature_verifies() {
        let sig = sign(SECRET, "hello");
        assert!(verify(SECRET, "hello", &sig));
    }

    #[test]
    fn flipped_byte_fails_verification() {
        let mut sig = sign(SECRET, "hello").into_bytes();
        // Flip one hex digit anywhere in the signature
        sig[10] = if sig[10] == b'0' { b'1' } else { b'0' };
        let tampered = String::from_utf8(sig).unwrap();
        assert!(!verify(SECRET, "hello", &tampered));
    }

    #[test]
    fn non_hex_signature_fails() {
        assert!(!verify(SECRET, "hello", "not-hex!"));
        assert!(!verify(SECRET, "hello", ""));
    }

    #[test]
    fn wrong_value_fails() {
        let sig = sign(SECRET, "hello");
        assert!(!verify(SECRET, "goodbye", &sig));
    }

    #[test]
    fn tokens_equal_matches() {
        assert!(tokens_equal("same-token", "same-token"));
        assert!(!tokens_equal("same-token", "same-tokeN"));
        assert!(!tokens_equal("short", "longer-token"));
        assert!(tokens_equal("", ""));
    }
}

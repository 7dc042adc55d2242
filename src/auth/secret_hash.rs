use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the Cognito `SECRET_HASH` for a username: HMAC-SHA256 over
/// `username || client_id` keyed with the app client secret, base64-encoded.
/// The derivation is fixed by the provider and must match byte-for-byte.
pub fn compute_secret_hash(username: &str, client_id: &str, client_secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(client_secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(username.as_bytes());
    mac.update(client_id.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_hash_deterministic() {
        let a = compute_secret_hash("user@example.com", "client", "secret");
        let b = compute_secret_hash("user@example.com", "client", "secret");
        assert_eq!(a, b);
    }

    #[test]
    fn test_secret_hash_known_values() {
        // Vectors cross-checked against the provider's reference derivation.
        assert_eq!(
            compute_secret_hash("user@example.com", "testclientid", "testsecret"),
            "HzyBTf0W3R6nhDS5mYQgavYCz4RZtk5AkFwcDlN3yNE="
        );
        assert_eq!(
            compute_secret_hash("alice@example.com", "client-123", "super-secret"),
            "zfDke6vAvloBl4d6M0mEQigHXDrEUlPMIvHxw4MtR1Y="
        );
    }

    #[test]
    fn test_secret_hash_inputs_matter() {
        let base = compute_secret_hash("user@example.com", "client", "secret");
        assert_ne!(base, compute_secret_hash("other@example.com", "client", "secret"));
        assert_ne!(base, compute_secret_hash("user@example.com", "client2", "secret"));
        assert_ne!(base, compute_secret_hash("user@example.com", "client", "secret2"));
    }
}

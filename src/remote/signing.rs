use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt::Write;

type HmacSha256 = Hmac<Sha256>;

/// First half of the key used to sign high-score submissions, embedded at
/// build time
const KEY_HEAD: &str = match option_env!("SNAKOLEK_SIGNING_KEY_HEAD") {
    Some(s) => s,
    None => "",
};

/// Second half of the signing key, embedded at build time
const KEY_TAIL: &str = match option_env!("SNAKOLEK_SIGNING_KEY_TAIL") {
    Some(s) => s,
    None => "",
};

/// The shared secret used to sign high-score submissions.  The key is the
/// concatenation of its two halves.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SigningKey {
    head: &'static str,
    tail: &'static str,
}

impl SigningKey {
    pub(crate) const fn new(head: &'static str, tail: &'static str) -> SigningKey {
        SigningKey { head, tail }
    }

    /// The key compiled into the program
    pub(crate) const fn embedded() -> SigningKey {
        SigningKey::new(KEY_HEAD, KEY_TAIL)
    }

    /// Compute the hex-encoded HMAC-SHA256 of `payload`
    pub(crate) fn sign(&self, payload: &[u8]) -> String {
        let mut key = Vec::with_capacity(self.head.len() + self.tail.len());
        key.extend_from_slice(self.head.as_bytes());
        key.extend_from_slice(self.tail.as_bytes());
        // HMAC accepts keys of any length, including empty ones.
        let mut mac =
            HmacSha256::new_from_slice(&key).expect("HMAC should accept keys of any length");
        mac.update(payload);
        let digest = mac.finalize().into_bytes();
        let mut hex = String::with_capacity(digest.len() * 2);
        for b in digest {
            let _ = write!(hex, "{b:02x}");
        }
        hex
    }
}

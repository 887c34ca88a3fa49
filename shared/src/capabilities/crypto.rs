use md5::{Digest, Md5};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::ApiCredentials;

/// Time-stamped request signature the catalog API expects on every call:
/// `hash = hex(md5(ts + private_key + public_key))`.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestSignature {
    ts: String,
    hash: String,
}

impl RequestSignature {
    #[must_use]
    pub fn new(ts: impl Into<String>, credentials: &ApiCredentials) -> Self {
        let ts = ts.into();
        let mut hasher = Md5::new();
        hasher.update(ts.as_bytes());
        hasher.update(credentials.private_key().as_bytes());
        hasher.update(credentials.public_key().as_bytes());
        let hash = hex::encode(hasher.finalize());
        Self { ts, hash }
    }

    /// Signs with the current unix time in seconds.
    #[must_use]
    pub fn now(credentials: &ApiCredentials) -> Self {
        Self::new(unix_now_secs().to_string(), credentials)
    }

    pub fn ts(&self) -> &str {
        &self.ts
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Debug for RequestSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSignature")
            .field("ts", &self.ts)
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

#[must_use]
pub fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

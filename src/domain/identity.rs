//! Local identity tokens for cards the server did not number

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::warn;
use uuid::Builder;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a collision-resistant id for a card
///
/// Uses a random UUID v4 from the OS source. If that source is
/// unavailable, falls back to `<unix-millis>-<pseudo-random>`.
pub fn generate_local_id() -> String {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => Builder::from_random_bytes(bytes).into_uuid().to_string(),
        Err(e) => {
            warn!("Secure random source unavailable, using timestamp id: {e}");
            fallback_id()
        }
    }
}

fn fallback_id() -> String {
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed));
    format!("{}-{}", Utc::now().timestamp_millis(), hasher.finish())
}

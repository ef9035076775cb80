//! Clock and entropy helpers shared across host contracts and adapters.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Human-readable local date/time for display (the terminal's `date`).
pub fn now_label() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        String::from(js_sys::Date::new_0().to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        format!("{} ms since epoch", unix_time_ms_now())
    }
}

/// Returns a uniformly distributed value in `[0, 1)`.
///
/// Used for scenario mix rolls and topic picks; not suitable for anything security-sensitive.
pub fn random_unit() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::collections::hash_map::RandomState;
        use std::hash::{BuildHasher, Hasher};

        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(unix_time_ms_now());
        (hasher.finish() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Source of "now" for components that timestamp records.
pub trait Clock {
    /// Current unix time in milliseconds.
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
/// Wall clock backed by [`unix_time_ms_now`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        unix_time_ms_now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Clock pinned to one instant.
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

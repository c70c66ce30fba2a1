// src/geocode/mod.rs

pub mod cache;
pub mod client;

pub use cache::{GeoStore, JsonFileStore, MemoryStore};
pub use client::{GeoError, GeoLookup, GeoPoint, HttpGeocoder, LookupOutcome};

use rand::Rng;
use std::time::Duration;

const MAX_ATTEMPTS: u32 = 3;

/// Cache-through geocoding with the pipeline's retry and rate-limit
/// policy. One instance lives for the duration of a build; the store is
/// loaded before it and saved after it.
pub struct Geocoder {
    store: Box<dyn GeoStore>,
    lookup: Box<dyn GeoLookup>,
    /// Fixed pause before every external call, to stay inside the
    /// provider's rate limit.
    call_delay: Duration,
    external_calls: u64,
}

impl Geocoder {
    pub fn new(store: Box<dyn GeoStore>, lookup: Box<dyn GeoLookup>) -> Self {
        Self::with_call_delay(store, lookup, Duration::from_secs(1))
    }

    pub fn with_call_delay(
        store: Box<dyn GeoStore>,
        lookup: Box<dyn GeoLookup>,
        call_delay: Duration,
    ) -> Self {
        Self {
            store,
            lookup,
            call_delay,
            external_calls: 0,
        }
    }

    /// Coordinates for an address, from cache when possible. Lookup
    /// failures are absorbed here: the listing just goes without a map
    /// marker, and a definitive miss is cached so the next build does
    /// not re-ask.
    pub fn resolve(&mut self, address: &str) -> Option<GeoPoint> {
        let normalized = normalize_address(address);
        if normalized.is_empty() {
            return None;
        }

        if let Some(cached) = self.store.get(&normalized) {
            return cached;
        }

        let resolved = self.lookup_with_retries(&normalized);
        self.store.put(normalized, resolved);
        resolved
    }

    fn lookup_with_retries(&mut self, address: &str) -> Option<GeoPoint> {
        for attempt in 1..=MAX_ATTEMPTS {
            std::thread::sleep(self.call_delay);
            self.external_calls += 1;

            match self.lookup.lookup(address) {
                Ok(LookupOutcome::Found(point)) => return Some(point),
                Ok(LookupOutcome::NotFound) => {
                    eprintln!("🗺️ No geocode result for {address}");
                    return None;
                }
                Err(e) if e.is_transient() && attempt < MAX_ATTEMPTS => {
                    eprintln!("⚠️ Geocode attempt {attempt} for {address} failed: {e}");
                    let jitter = rand::thread_rng().gen_range(0..=1000);
                    std::thread::sleep(
                        Duration::from_secs(attempt as u64) + Duration::from_millis(jitter),
                    );
                }
                Err(e) => {
                    eprintln!("❌ Geocode gave up on {address}: {e}");
                    return None;
                }
            }
        }
        None
    }

    /// External calls issued this build. A warm-cache rebuild reports 0.
    pub fn external_calls(&self) -> u64 {
        self.external_calls
    }

    pub fn save(&self) -> Result<(), crate::errors::BuildError> {
        self.store.save()
    }
}

/// Cache key normalization: trim, collapse whitespace (including
/// full-width spaces), and fold the 臺/台 spelling variance so the same
/// street never gets looked up twice.
pub fn normalize_address(address: &str) -> String {
    let folded = address.replace("臺中市", "台中市").replace('臺', "台");
    let mut out = String::with_capacity(folded.len());
    let mut pending_space = false;
    for ch in folded.chars() {
        // char::is_whitespace covers the full-width space U+3000 too.
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Scripted lookup that counts calls.
    struct ScriptedLookup {
        outcome: Result<LookupOutcome, fn() -> GeoError>,
        calls: Rc<Cell<u64>>,
    }

    impl GeoLookup for ScriptedLookup {
        fn lookup(&self, _address: &str) -> Result<LookupOutcome, GeoError> {
            self.calls.set(self.calls.get() + 1);
            match &self.outcome {
                Ok(outcome) => Ok(*outcome),
                Err(make) => Err(make()),
            }
        }
    }

    fn geocoder(
        store: MemoryStore,
        outcome: Result<LookupOutcome, fn() -> GeoError>,
    ) -> (Geocoder, Rc<Cell<u64>>) {
        let calls = Rc::new(Cell::new(0));
        let lookup = ScriptedLookup {
            outcome,
            calls: calls.clone(),
        };
        (
            Geocoder::with_call_delay(Box::new(store), Box::new(lookup), Duration::ZERO),
            calls,
        )
    }

    const POINT: GeoPoint = GeoPoint { lat: 24.14, lng: 120.66 };

    #[test]
    fn empty_address_short_circuits() {
        let (mut geo, calls) = geocoder(MemoryStore::new(), Ok(LookupOutcome::Found(POINT)));
        assert_eq!(geo.resolve("   "), None);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn cache_hit_skips_external_lookup() {
        let mut preloaded = MemoryStore::new();
        preloaded.put("台中市西區五權三街".into(), Some(POINT));
        let (mut geo, calls) = geocoder(preloaded, Ok(LookupOutcome::NotFound));

        assert_eq!(geo.resolve("臺中市西區  五權三街"), Some(POINT));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn cached_no_result_skips_external_lookup() {
        let mut preloaded = MemoryStore::new();
        preloaded.put("查無此地".into(), None);
        let (mut geo, calls) = geocoder(preloaded, Ok(LookupOutcome::Found(POINT)));

        assert_eq!(geo.resolve("查無此地"), None);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn not_found_is_cached_and_not_retried() {
        let (mut geo, calls) = geocoder(MemoryStore::new(), Ok(LookupOutcome::NotFound));
        assert_eq!(geo.resolve("某地址"), None);
        assert_eq!(calls.get(), 1, "not-found is definitive, no retries");

        // Second resolve in the same build hits the store.
        assert_eq!(geo.resolve("某地址"), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn transient_errors_retry_then_cache_failure() {
        let (mut geo, calls) = geocoder(
            MemoryStore::new(),
            Err(|| GeoError::RateLimited("HTTP 429".into())),
        );
        assert_eq!(geo.resolve("某地址"), None);
        assert_eq!(calls.get(), u64::from(MAX_ATTEMPTS));

        assert_eq!(geo.resolve("某地址"), None);
        assert_eq!(calls.get(), u64::from(MAX_ATTEMPTS), "failure was cached");
    }

    #[test]
    fn bad_response_does_not_retry() {
        let (mut geo, calls) = geocoder(
            MemoryStore::new(),
            Err(|| GeoError::BadResponse("garbage".into())),
        );
        assert_eq!(geo.resolve("某地址"), None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn normalize_folds_spelling_and_whitespace() {
        assert_eq!(
            normalize_address("  臺中市西區　五權三街  1號 "),
            "台中市西區 五權三街 1號"
        );
        assert_eq!(normalize_address(""), "");
    }
}

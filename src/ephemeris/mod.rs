//! # Ephemeris access layer
//!
//! This module is the seam between the line-generation engine and the external
//! astronomical position provider:
//!
//! 1. [`CelestialBodyPosition`] — the immutable per-instant coordinates the engine consumes.
//! 2. [`PositionProvider`] — the trait the external provider implements; the engine treats
//!    it as a black box.
//! 3. [`PositionResolver`] — a thin caching adapter in front of the provider. The cache is
//!    keyed by `(body, instant, flags)`, supports concurrent in-flight requests, and is
//!    write-once per key: a miss race recomputes idempotently and never corrupts state.
//!
//! The only suspend point of a whole request lives behind [`PositionProvider::position`];
//! everything downstream of the resolver is pure trigonometry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use hifitime::Epoch;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::astrocarta_errors::AstrocartaError;
use crate::bodies::Body;
use crate::constants::{Degree, MJD};

/// Computation flags passed through, untouched, to the position provider.
///
/// The engine only uses the flags as part of the cache key; their meaning belongs
/// to the provider. A few well-known bits are named here for convenience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResolveFlags(pub u32);

impl ResolveFlags {
    pub const NONE: ResolveFlags = ResolveFlags(0);
    /// Request time-derivatives (speeds) along with the position.
    pub const SPEED: ResolveFlags = ResolveFlags(1);
    /// Request the true (osculating) lunar node rather than the mean one.
    pub const TRUE_NODE: ResolveFlags = ResolveFlags(2);

    pub fn contains(&self, other: ResolveFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ResolveFlags {
    type Output = ResolveFlags;

    fn bitor(self, rhs: ResolveFlags) -> ResolveFlags {
        ResolveFlags(self.0 | rhs.0)
    }
}

/// Equatorial and ecliptic coordinates of one body at one instant.
///
/// Immutable once computed; owned by the resolver cache and shared by reference
/// with the generators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CelestialBodyPosition {
    /// Right ascension, degrees in `[0, 360)`.
    pub ra: Degree,
    /// Declination, degrees in `[-90, 90]`.
    pub dec: Degree,
    /// Ecliptic longitude, degrees in `[0, 360)`.
    pub ecl_lon: Degree,
    /// Ecliptic latitude, degrees.
    pub ecl_lat: Degree,
    /// Geocentric distance, astronomical units.
    pub distance_au: f64,
    /// Ecliptic longitude speed, degrees per day. Negative while retrograde.
    pub lon_speed: f64,
}

impl CelestialBodyPosition {
    /// Whether the body is in apparent retrograde motion at this instant.
    pub fn is_retrograde(&self) -> bool {
        self.lon_speed < 0.0
    }
}

/// The external astronomical position provider.
///
/// Implementations must be callable from multiple threads; the engine isolates
/// per-body failures, so an error for one body never aborts the whole request.
pub trait PositionProvider: Send + Sync {
    /// Resolve the coordinates of `body` at `epoch` with the given provider flags.
    ///
    /// Return
    /// ------
    /// * The position, or [`AstrocartaError::PositionUnavailable`] when the provider
    ///   cannot produce one (missing ephemeris segment, unsupported body, ...).
    fn position(
        &self,
        body: Body,
        epoch: Epoch,
        flags: ResolveFlags,
    ) -> Result<CelestialBodyPosition, AstrocartaError>;

    /// Inclusive `(min, max)` MJD range this provider can serve.
    ///
    /// The default spans roughly 13000 BCE to 17000 CE, wide enough for any
    /// mainstream ephemeris file; providers with narrower files should override it.
    fn ephemeris_range(&self) -> (MJD, MJD) {
        (-5_400_000.0, 5_700_000.0)
    }
}

/// Cache key: the instant is keyed by its TAI nanosecond count, an exact
/// integer identity for an `Epoch`.
type PositionKey = (Body, i128, ResolveFlags);

fn position_key(body: Body, epoch: Epoch, flags: ResolveFlags) -> PositionKey {
    (body, epoch.to_tai_duration().total_nanoseconds(), flags)
}

/// Caching adapter in front of a [`PositionProvider`].
///
/// Entries are write-once per key. Concurrent misses on the same key may both call
/// the provider; the second insert is dropped, which is harmless because identical
/// inputs produce identical positions.
pub struct PositionResolver {
    provider: Arc<dyn PositionProvider>,
    cache: RwLock<HashMap<PositionKey, Arc<CelestialBodyPosition>>>,
    caching: bool,
}

impl PositionResolver {
    /// Wrap a provider with an enabled cache.
    pub fn new(provider: Arc<dyn PositionProvider>) -> Self {
        Self::with_caching(provider, true)
    }

    /// Wrap a provider, optionally disabling the cache (every resolve hits the provider).
    pub fn with_caching(provider: Arc<dyn PositionProvider>, caching: bool) -> Self {
        PositionResolver {
            provider,
            cache: RwLock::new(HashMap::new()),
            caching,
        }
    }

    /// The `(min, max)` MJD range of the underlying provider.
    pub fn ephemeris_range(&self) -> (MJD, MJD) {
        self.provider.ephemeris_range()
    }

    /// Resolve one body, going through the cache.
    ///
    /// Arguments
    /// ---------
    /// * `body`: the body to resolve.
    /// * `epoch`: the instant, UTC scale.
    /// * `flags`: provider flags, part of the cache key.
    ///
    /// Return
    /// ------
    /// * A shared handle on the cached position, or the provider's error untouched.
    pub fn resolve(
        &self,
        body: Body,
        epoch: Epoch,
        flags: ResolveFlags,
    ) -> Result<Arc<CelestialBodyPosition>, AstrocartaError> {
        if !self.caching {
            return Ok(Arc::new(self.provider.position(body, epoch, flags)?));
        }

        let key = position_key(body, epoch, flags);

        if let Some(hit) = self
            .cache
            .read()
            .expect("position cache poisoned")
            .get(&key)
        {
            trace!(%body, "position cache hit");
            return Ok(Arc::clone(hit));
        }

        // Miss: compute outside the lock, then insert write-once.
        let position = Arc::new(self.provider.position(body, epoch, flags)?);
        debug!(%body, ra = position.ra, dec = position.dec, "position resolved");

        let mut cache = self.cache.write().expect("position cache poisoned");
        let entry = cache.entry(key).or_insert_with(|| Arc::clone(&position));
        Ok(Arc::clone(entry))
    }

    /// Number of cached positions, used by eviction policies and tests.
    pub fn cached_len(&self) -> usize {
        self.cache.read().expect("position cache poisoned").len()
    }

    /// Drop every cached position.
    pub fn clear_cache(&self) {
        self.cache.write().expect("position cache poisoned").clear();
    }
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl PositionProvider for CountingProvider {
        fn position(
            &self,
            body: Body,
            _epoch: Epoch,
            _flags: ResolveFlags,
        ) -> Result<CelestialBodyPosition, AstrocartaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if body == Body::Selena {
                return Err(AstrocartaError::PositionUnavailable {
                    body: body.to_string(),
                    reason: "no ephemeris segment".to_string(),
                });
            }
            Ok(CelestialBodyPosition {
                ra: 280.15,
                dec: -23.0,
                ecl_lon: 280.6,
                ecl_lat: 0.0,
                distance_au: 0.983,
                lon_speed: 1.019,
            })
        }
    }

    fn epoch() -> Epoch {
        Epoch::from_str("2000-01-01T12:00:00").unwrap()
    }

    #[test]
    fn test_cache_hits_provider_once_per_key() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let resolver = PositionResolver::new(provider.clone());

        let a = resolver
            .resolve(Body::Sun, epoch(), ResolveFlags::NONE)
            .unwrap();
        let b = resolver
            .resolve(Body::Sun, epoch(), ResolveFlags::NONE)
            .unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*a, *b);
        assert_eq!(resolver.cached_len(), 1);
    }

    #[test]
    fn test_distinct_flags_are_distinct_keys() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let resolver = PositionResolver::new(provider.clone());

        resolver
            .resolve(Body::Moon, epoch(), ResolveFlags::NONE)
            .unwrap();
        resolver
            .resolve(Body::Moon, epoch(), ResolveFlags::SPEED)
            .unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.cached_len(), 2);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let resolver = PositionResolver::new(provider.clone());

        let err = resolver
            .resolve(Body::Selena, epoch(), ResolveFlags::NONE)
            .unwrap_err();
        assert!(matches!(err, AstrocartaError::PositionUnavailable { .. }));
        assert_eq!(resolver.cached_len(), 0);

        // A retry reaches the provider again.
        let _ = resolver.resolve(Body::Selena, epoch(), ResolveFlags::NONE);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_caching_disabled() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let resolver = PositionResolver::with_caching(provider.clone(), false);

        resolver
            .resolve(Body::Sun, epoch(), ResolveFlags::NONE)
            .unwrap();
        resolver
            .resolve(Body::Sun, epoch(), ResolveFlags::NONE)
            .unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.cached_len(), 0);
    }

    #[test]
    fn test_flag_operations() {
        let flags = ResolveFlags::SPEED | ResolveFlags::TRUE_NODE;
        assert!(flags.contains(ResolveFlags::SPEED));
        assert!(flags.contains(ResolveFlags::TRUE_NODE));
        assert!(!ResolveFlags::NONE.contains(ResolveFlags::SPEED));
    }

    #[test]
    fn test_retrograde_flag() {
        let mut pos = CelestialBodyPosition {
            ra: 10.0,
            dec: 5.0,
            ecl_lon: 12.0,
            ecl_lat: 0.1,
            distance_au: 1.2,
            lon_speed: -0.05,
        };
        assert!(pos.is_retrograde());
        pos.lon_speed = 0.3;
        assert!(!pos.is_retrograde());
    }
}

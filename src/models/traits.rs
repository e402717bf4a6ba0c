use crate::models::LatLong;
use rand::Rng;

/// Reference point all advertised locations are scattered around (Breda)
pub const REFERENCE_POINT: LatLong = LatLong {
    latitude: 51.58494229691791,
    longitude: 4.797559120743779,
};

/// Maximum offset in degrees applied to each axis of the reference point
pub const LOCATION_JITTER: f64 = 0.1;

/// Anything that can be placed on a map.
/// Locations are only used for display, so an approximate point is good enough.
pub trait Locatable {
    /// Locate using the given random source; pass a seeded rng for reproducible output
    fn location_with<R: Rng + ?Sized>(&self, rng: &mut R) -> LatLong;

    fn location(&self) -> LatLong {
        self.location_with(&mut rand::thread_rng())
    }
}

pub(crate) fn jittered_reference<R: Rng + ?Sized>(rng: &mut R) -> LatLong {
    LatLong {
        latitude: REFERENCE_POINT.latitude + rng.gen_range(-LOCATION_JITTER..LOCATION_JITTER),
        longitude: REFERENCE_POINT.longitude + rng.gen_range(-LOCATION_JITTER..LOCATION_JITTER),
    }
}

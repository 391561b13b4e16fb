//! Closest-entity search.
//!
//! A linear scan by squared Euclidean distance.  Ties keep the entity that
//! comes first in the collection, so results are reproducible for a given
//! input ordering.

use wh_core::{ParcelId, TruckId, Vector};

use crate::{Parcel, Truck};

/// Closest parcel to `from` among those accepted by `eligible`.
pub fn find_closest_parcel<F>(parcels: &[Parcel], from: Vector, eligible: F) -> Option<ParcelId>
where
    F: Fn(&Parcel) -> bool,
{
    closest(parcels, from, Parcel::position, eligible).map(|i| ParcelId(i as u32))
}

/// Closest truck to `from` among those accepted by `eligible`.
pub fn find_closest_truck<F>(trucks: &[Truck], from: Vector, eligible: F) -> Option<TruckId>
where
    F: Fn(&Truck) -> bool,
{
    closest(trucks, from, Truck::position, eligible).map(|i| TruckId(i as u32))
}

fn closest<T>(
    items:    &[T],
    from:     Vector,
    position: impl Fn(&T) -> Vector,
    eligible: impl Fn(&T) -> bool,
) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (i, item) in items.iter().enumerate() {
        if !eligible(item) {
            continue;
        }
        let d = from.squared_distance(position(item));
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

use wh_core::{ParcelId, TruckId, Vector};

use crate::{Parcel, ParcelStatus, Truck};

/// What a forklift is heading towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Parcel(ParcelId),
    Truck(TruckId),
}

impl Target {
    /// Current cell of the target, or `None` for a dangling id.
    pub fn position(self, parcels: &[Parcel], trucks: &[Truck]) -> Option<Vector> {
        match self {
            Target::Parcel(id) => parcels.get(id.index()).map(Parcel::position),
            Target::Truck(id)  => trucks.get(id.index()).map(Truck::position),
        }
    }

    /// Whether the target is still worth heading for.
    ///
    /// A parcel target stays valid while it is reserved (`Targeted`); a
    /// truck target while the truck is loading at the dock.
    pub fn is_available(self, parcels: &[Parcel], trucks: &[Truck]) -> bool {
        match self {
            Target::Parcel(id) => parcels
                .get(id.index())
                .is_some_and(|p| p.status() == ParcelStatus::Targeted),
            Target::Truck(id) => trucks.get(id.index()).is_some_and(Truck::is_available),
        }
    }
}

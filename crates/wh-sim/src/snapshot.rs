//! The validated initial world handed over by the input layer.

use wh_actor::WeightClass;
use wh_core::Vector;

use crate::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParcelSpec {
    pub name:     String,
    pub position: Vector,
    pub class:    WeightClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForkliftSpec {
    pub name:     String,
    pub position: Vector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruckSpec {
    pub name:          String,
    pub position:      Vector,
    pub capacity:      u32,
    /// Rounds spent away on each delivery trip.
    pub away_duration: u32,
}

/// Warehouse dimensions, round budget and every entity, in declaration
/// order.  Declaration order becomes the per-round processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub width:      u32,
    pub height:     u32,
    pub max_rounds: u64,
    pub parcels:    Vec<ParcelSpec>,
    pub forklifts:  Vec<ForkliftSpec>,
    pub trucks:     Vec<TruckSpec>,
}

impl WorldSnapshot {
    pub fn new(width: u32, height: u32, max_rounds: u64) -> Self {
        Self { width, height, max_rounds, ..Self::default() }
    }

    pub fn with_parcel(mut self, name: impl Into<String>, x: i32, y: i32, class: WeightClass) -> Self {
        self.parcels.push(ParcelSpec { name: name.into(), position: Vector::new(x, y), class });
        self
    }

    pub fn with_forklift(mut self, name: impl Into<String>, x: i32, y: i32) -> Self {
        self.forklifts.push(ForkliftSpec { name: name.into(), position: Vector::new(x, y) });
        self
    }

    pub fn with_truck(
        mut self,
        name:          impl Into<String>,
        x:             i32,
        y:             i32,
        capacity:      u32,
        away_duration: u32,
    ) -> Self {
        self.trucks.push(TruckSpec {
            name: name.into(),
            position: Vector::new(x, y),
            capacity,
            away_duration,
        });
        self
    }

    /// Every entity as `(kind, name, position)`: parcels, then forklifts,
    /// then trucks.
    pub fn entities(&self) -> impl Iterator<Item = (EntityKind, &str, Vector)> + '_ {
        let parcels = self.parcels.iter().map(|p| (EntityKind::Parcel, p.name.as_str(), p.position));
        let forklifts = self.forklifts.iter().map(|f| (EntityKind::Forklift, f.name.as_str(), f.position));
        let trucks = self.trucks.iter().map(|t| (EntityKind::Truck, t.name.as_str(), t.position));
        parcels.chain(forklifts).chain(trucks)
    }
}

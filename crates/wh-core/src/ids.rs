//! Strongly typed, zero-cost identifier wrappers.
//!
//! Actors reference each other by id, never by pointer: an id is the index of
//! the entity in the orchestrator-owned `Vec` for its kind.  All IDs are
//! `Copy + Ord + Hash`; callers should prefer the `.index()` helper over
//! touching the inner integer.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a parcel in the simulation's parcel collection.
    pub struct ParcelId(u32);
}

typed_id! {
    /// Index of a forklift in the simulation's forklift collection.
    pub struct ForkliftId(u32);
}

typed_id! {
    /// Index of a truck in the simulation's truck collection.
    pub struct TruckId(u32);
}

//! Unit tests for wh-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ForkliftId, ParcelId, TruckId};

    #[test]
    fn index_roundtrip() {
        let id = ParcelId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ParcelId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(ForkliftId(0) < ForkliftId(1));
        assert!(TruckId(100) > TruckId(99));
    }

    #[test]
    fn display() {
        assert_eq!(TruckId(7).to_string(), "TruckId(7)");
    }
}

#[cfg(test)]
mod vector {
    use crate::Vector;

    #[test]
    fn add_components() {
        assert_eq!(Vector::new(2, 3) + Vector::LEFT, Vector::new(1, 3));
        assert_eq!(Vector::new(0, 0) + Vector::UP, Vector::new(0, -1));
    }

    #[test]
    fn squared_distance_is_symmetric() {
        let a = Vector::new(1, 0);
        let b = Vector::new(4, 3);
        assert_eq!(a.squared_distance(b), 18);
        assert_eq!(b.squared_distance(a), 18);
        assert_eq!(a.squared_distance(a), 0);
    }

    #[test]
    fn euclidean_distance() {
        let d = Vector::new(0, 0).distance(Vector::new(3, 4));
        assert!((d - 5.0).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn adjacency_is_four_connected() {
        let c = Vector::new(2, 2);
        assert!(c.is_adjacent(Vector::new(2, 1)));
        assert!(c.is_adjacent(Vector::new(3, 2)));
        assert!(!c.is_adjacent(Vector::new(3, 3)));
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn display_matches_report_format() {
        assert_eq!(Vector::new(3, 7).to_string(), "[3,7]");
    }
}

#[cfg(test)]
mod time {
    use crate::{Round, SimConfig};

    #[test]
    fn next_and_add() {
        assert_eq!(Round::ZERO.next(), Round(1));
        assert_eq!(Round(4) + 3, Round(7));
    }

    #[test]
    fn interval_boundaries() {
        assert!(Round(10).is_multiple_of(5));
        assert!(!Round(11).is_multiple_of(5));
        assert!(!Round(10).is_multiple_of(0));
    }

    #[test]
    fn config_end_round() {
        let cfg = SimConfig::with_budget(3);
        assert_eq!(cfg.end_round(), Round(3));
        assert_eq!(cfg.output_interval_rounds, 1);
    }
}

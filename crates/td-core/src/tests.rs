//! Unit tests for td-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{GeoPoint, METRES_PER_DEGREE};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(35.1595, 126.8526);
        assert!(p.distance_m(p) < 1e-6);
        assert_eq!(p.flat_distance_m(p, METRES_PER_DEGREE), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(35.0, 126.0);
        let b = GeoPoint::new(36.0, 126.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
        assert!((a.flat_distance_m(b, METRES_PER_DEGREE) - 111_000.0).abs() < 1e-6);
    }

    #[test]
    fn flat_distance_is_planar() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.03, 0.04);
        let d = a.flat_distance_m(b, 100_000.0);
        assert!((d - 5_000.0).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn bounds_from_points() {
        use crate::GeoBounds;

        assert!(GeoBounds::from_points(std::iter::empty()).is_none());

        let b = GeoBounds::from_points([
            GeoPoint::new(35.10, 126.80),
            GeoPoint::new(35.20, 126.90),
            GeoPoint::new(35.15, 126.70),
        ])
        .unwrap();
        assert_eq!(b.min_lat, 35.10);
        assert_eq!(b.max_lat, 35.20);
        assert_eq!(b.min_lon, 126.70);
        assert_eq!(b.max_lon, 126.90);
        assert!(b.contains(GeoPoint::new(35.15, 126.85)));
        assert!(!b.contains(GeoPoint::new(35.25, 126.85)));
    }
}

#[cfg(test)]
mod time {
    use crate::SearchClock;

    #[test]
    fn advance_accumulates() {
        let mut clock = SearchClock::new(100.0);
        clock.advance(20.0);
        clock.advance(5.5);
        assert_eq!(clock.now(), 125.5);
        assert_eq!(clock.elapsed_secs(), 25.5);
    }

    #[test]
    fn never_runs_backwards() {
        let mut clock = SearchClock::new(0.0);
        clock.advance(-10.0);
        clock.advance(f64::INFINITY);
        clock.advance(f64::NAN);
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn hms_breakdown() {
        let mut clock = SearchClock::new(0.0);
        clock.advance(3_725.0);
        let (h, m, s) = clock.elapsed_hms();
        assert_eq!(h, 1);
        assert_eq!(m, 2);
        assert!((s - 5.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(90.0..150.0);
            assert!((90.0..150.0).contains(&v));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

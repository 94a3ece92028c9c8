//! Unit tests for td-signal.

#[cfg(test)]
mod helpers {
    use crate::{Signal, SignalPhase};

    /// 120 s cycle, 60 s green, anchored green at t = 0.
    pub fn green_first() -> Signal {
        Signal::new(120.0, 60.0, 0.0, SignalPhase::Green).unwrap()
    }

    /// 120 s cycle, 60 s green, anchored red at t = 0.
    pub fn red_first() -> Signal {
        Signal::new(120.0, 60.0, 0.0, SignalPhase::Red).unwrap()
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use crate::{Signal, SignalError, SignalPhase};

    #[test]
    fn rejects_bad_cycle() {
        for cycle in [0.0, -120.0, f64::NAN, f64::INFINITY] {
            let r = Signal::new(cycle, 0.0, 0.0, SignalPhase::Green);
            assert!(matches!(r, Err(SignalError::InvalidCycle(_))), "cycle {cycle}");
        }
    }

    #[test]
    fn rejects_bad_green() {
        assert!(matches!(
            Signal::new(120.0, 121.0, 0.0, SignalPhase::Green),
            Err(SignalError::InvalidGreen { .. })
        ));
        assert!(matches!(
            Signal::new(120.0, -1.0, 0.0, SignalPhase::Green),
            Err(SignalError::InvalidGreen { .. })
        ));
    }

    #[test]
    fn rejects_bad_anchor() {
        assert!(matches!(
            Signal::new(120.0, 60.0, f64::NAN, SignalPhase::Red),
            Err(SignalError::InvalidAnchor(_))
        ));
    }

    #[test]
    fn ratio_constructor() {
        let s = Signal::with_ratio(100.0, 0.4, 0.0, SignalPhase::Green).unwrap();
        assert!((s.green_secs() - 40.0).abs() < 1e-9);
        assert!((s.red_secs() - 60.0).abs() < 1e-9);
        assert!(matches!(
            Signal::with_ratio(100.0, 1.5, 0.0, SignalPhase::Green),
            Err(SignalError::InvalidRatio(_))
        ));
    }

    #[test]
    fn boundary_greens_are_legal() {
        assert!(Signal::new(90.0, 0.0, 0.0, SignalPhase::Green).is_ok());
        assert!(Signal::new(90.0, 90.0, 0.0, SignalPhase::Red).is_ok());
    }
}

// ── Wait time ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod wait {
    use crate::{DEFAULT_CLEARANCE_SECS as CLEAR, Signal, SignalPhase};

    #[test]
    fn solid_green_is_free() {
        let s = super::helpers::green_first();
        for t in [0.0, 1.0, 30.0, 54.0, 54.999] {
            assert_eq!(s.wait_time(t, CLEAR), 0.0, "t = {t}");
        }
    }

    #[test]
    fn clearance_boundary_charges_full_red() {
        let s = super::helpers::green_first();
        // Exactly g − 5 s into the cycle: 5 s of green left, blocked.
        assert_eq!(s.wait_time(55.0, CLEAR), 60.0);
        assert_eq!(s.wait_time(59.5, CLEAR), 60.0);
    }

    #[test]
    fn red_after_green_waits_for_cycle_end() {
        let s = super::helpers::green_first();
        assert_eq!(s.wait_time(60.0, CLEAR), 60.0);
        assert_eq!(s.wait_time(100.0, CLEAR), 20.0);
        assert_eq!(s.wait_time(119.0, CLEAR), 1.0);
    }

    #[test]
    fn red_anchored_waits_out_red() {
        let s = super::helpers::red_first();
        assert_eq!(s.wait_time(0.0, CLEAR), 60.0);
        assert_eq!(s.wait_time(45.0, CLEAR), 15.0);
        assert_eq!(s.wait_time(60.0, CLEAR), 0.0);
        assert_eq!(s.wait_time(119.0, CLEAR), 0.0);
    }

    #[test]
    fn times_before_anchor_use_true_modulo() {
        let s = Signal::new(120.0, 60.0, 100.0, SignalPhase::Green).unwrap();
        // 0 − 100 ≡ 20 (mod 120): solid green.
        assert_eq!(s.phase_elapsed(0.0), 20.0);
        assert_eq!(s.wait_time(0.0, CLEAR), 0.0);
        // −30 − 100 ≡ 110: red, 10 s left.
        assert_eq!(s.wait_time(-30.0, CLEAR), 10.0);
    }

    #[test]
    fn periodic_in_cycle_length() {
        let signals = [
            super::helpers::green_first(),
            super::helpers::red_first(),
            Signal::new(97.0, 41.0, 13.0, SignalPhase::Green).unwrap(),
        ];
        for s in signals {
            for t in (-200..=200).step_by(7) {
                let t = t as f64;
                let base = s.wait_time(t, CLEAR);
                for k in -3..=3 {
                    let shifted = s.wait_time(t + k as f64 * s.cycle_secs(), CLEAR);
                    assert_eq!(base, shifted, "t = {t}, k = {k}");
                }
            }
        }
    }

    #[test]
    fn never_negative() {
        let s = Signal::new(97.0, 41.0, 13.0, SignalPhase::Green).unwrap();
        for t in 0..400 {
            assert!(s.wait_time(t as f64 * 0.5, CLEAR) >= 0.0);
        }
    }

    #[test]
    fn zero_clearance_disables_blocking() {
        let s = super::helpers::green_first();
        assert_eq!(s.wait_time(59.0, 0.0), 0.0);
    }

    #[test]
    fn all_red_and_all_green() {
        let red = Signal::new(90.0, 0.0, 0.0, SignalPhase::Green).unwrap();
        assert_eq!(red.wait_time(0.0, CLEAR), 90.0);
        let green = Signal::new(90.0, 90.0, 0.0, SignalPhase::Red).unwrap();
        assert_eq!(green.wait_time(10.0, CLEAR), 0.0);
    }
}

// ── Phase prediction ──────────────────────────────────────────────────────────

#[cfg(test)]
mod predict {
    use crate::{PhaseLabel, PhaseReport};

    #[test]
    fn green_anchored() {
        let s = super::helpers::green_first();
        assert_eq!(s.predict(10.0), PhaseReport { label: PhaseLabel::Green, remaining_secs: 50.0 });
        assert_eq!(s.predict(70.0), PhaseReport { label: PhaseLabel::Red, remaining_secs: 50.0 });
    }

    #[test]
    fn red_anchored() {
        let s = super::helpers::red_first();
        assert_eq!(s.predict(10.0), PhaseReport { label: PhaseLabel::Red, remaining_secs: 50.0 });
        assert_eq!(s.predict(70.0), PhaseReport { label: PhaseLabel::Green, remaining_secs: 50.0 });
    }

    #[test]
    fn red_anchored_uneven_split_agrees_with_wait() {
        use crate::{Signal, SignalPhase};

        // 70 s red from the anchor, then 30 s green.
        let s = Signal::new(100.0, 30.0, 0.0, SignalPhase::Red).unwrap();
        assert_eq!(s.predict(10.0), PhaseReport { label: PhaseLabel::Red, remaining_secs: 60.0 });
        assert_eq!(s.wait_time(10.0, 5.0), 60.0);
        assert_eq!(s.predict(80.0), PhaseReport { label: PhaseLabel::Green, remaining_secs: 20.0 });
        assert_eq!(s.wait_time(80.0, 5.0), 0.0);
    }

    #[test]
    fn ignores_clearance_rule() {
        let s = super::helpers::green_first();
        let r = s.predict(57.0);
        assert_eq!(r.label, PhaseLabel::Green);
        assert_eq!(r.remaining_secs, 3.0);
    }

    #[test]
    fn labels_display() {
        assert_eq!(PhaseLabel::None.to_string(), "none");
        assert_eq!(PhaseLabel::Green.to_string(), "green");
        assert_eq!(crate::SignalPhase::Red.to_string(), "red");
        assert_eq!(PhaseLabel::default(), PhaseLabel::None);
    }
}

// ── Signal table / oracle ─────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use td_core::{NodeId, SimRng};
    use crate::{NoSignals, PhaseReport, SignalError, SignalOracle, SignalTable};

    #[test]
    fn missing_signal_is_free() {
        let table = SignalTable::new();
        assert_eq!(table.wait_time(NodeId(0), NodeId(1), 42.0), 0.0);
        assert_eq!(table.predict_phase(NodeId(0), NodeId(1), 42.0), PhaseReport::UNSIGNALLED);
        assert_eq!(NoSignals.wait_time(NodeId(0), NodeId(1), 0.0), 0.0);
    }

    #[test]
    fn directions_are_independent() {
        let mut table = SignalTable::new();
        table.insert(NodeId(0), NodeId(1), super::helpers::red_first());
        assert_eq!(table.wait_time(NodeId(0), NodeId(1), 0.0), 60.0);
        assert_eq!(table.wait_time(NodeId(1), NodeId(0), 0.0), 0.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_replaces() {
        let mut table = SignalTable::new();
        assert!(table.insert(NodeId(0), NodeId(1), super::helpers::red_first()).is_none());
        let old = table.insert(NodeId(0), NodeId(1), super::helpers::green_first());
        assert_eq!(old, Some(super::helpers::red_first()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.wait_time(NodeId(0), NodeId(1), 0.0), 0.0);
    }

    #[test]
    fn custom_clearance() {
        let mut table = SignalTable::with_clearance(10.0).unwrap();
        table.insert(NodeId(0), NodeId(1), super::helpers::green_first());
        assert_eq!(table.wait_time(NodeId(0), NodeId(1), 50.0), 60.0);
        assert_eq!(table.wait_time(NodeId(0), NodeId(1), 49.0), 0.0);
        assert!(matches!(SignalTable::with_clearance(-1.0), Err(SignalError::InvalidClearance(_))));
    }

    #[test]
    fn add_random_validates_and_draws_within_cycle() {
        let mut table = SignalTable::new();
        let mut rng = SimRng::new(7);
        assert!(table.add_random(NodeId(0), NodeId(1), 0.0, 0.5, &mut rng).is_err());
        assert!(table.add_random(NodeId(0), NodeId(1), 120.0, 1.2, &mut rng).is_err());
        assert!(table.is_empty());

        table.add_random(NodeId(0), NodeId(1), 120.0, 0.5, &mut rng).unwrap();
        let s = table.get(NodeId(0), NodeId(1)).unwrap();
        assert!((0.0..120.0).contains(&s.anchor_secs()));
        assert_eq!(s.green_secs(), 60.0);
    }
}

// ── Placement ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod placement {
    use td_core::{GeoPoint, SimRng};
    use td_network::{GridSpec, RoadGraph, RoadNetworkBuilder, build_grid};
    use crate::{PlacementParams, SignalError, SignalTable, place_signals};

    #[test]
    fn every_junction_edge_gets_a_signal() {
        let spec = GridSpec { rows: 3, cols: 3, ..GridSpec::default() };
        let net = build_grid(&spec).unwrap();
        let table = place_signals(&net, &PlacementParams::default(), &mut SimRng::new(1)).unwrap();
        // Every grid node has out-degree ≥ 2.
        assert_eq!(table.len(), net.edge_count());
        for node in net.node_ids() {
            for n in net.neighbors(node) {
                assert!(table.contains(node, n));
            }
        }
    }

    #[test]
    fn dead_ends_stay_unsignalled() {
        // a — b — c : only b is a junction.
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let m = b.add_node(GeoPoint::new(0.0, 0.01));
        let c = b.add_node(GeoPoint::new(0.0, 0.02));
        b.add_road(a, m, 100.0);
        b.add_road(m, c, 100.0);
        let net = b.build().unwrap();

        let table = place_signals(&net, &PlacementParams::default(), &mut SimRng::new(3)).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.contains(m, a));
        assert!(table.contains(m, c));
        assert!(!table.contains(a, m));
    }

    #[test]
    fn parameters_within_ranges() {
        let net = build_grid(&GridSpec::default()).unwrap();
        let params = PlacementParams::default();
        let table = place_signals(&net, &params, &mut SimRng::new(11)).unwrap();
        for (_, _, s) in table.iter() {
            assert!((90.0..150.0).contains(&s.cycle_secs()), "cycle {}", s.cycle_secs());
            let ratio = s.green_secs() / s.cycle_secs();
            assert!((0.4 - 1e-9..0.6 + 1e-9).contains(&ratio), "ratio {ratio}");
            assert!((0.0..s.cycle_secs()).contains(&s.anchor_secs()));
        }
    }

    #[test]
    fn same_seed_same_signals() {
        let net = build_grid(&GridSpec::default()).unwrap();
        let params = PlacementParams::default();
        let t1 = place_signals(&net, &params, &mut SimRng::new(99)).unwrap();
        let t2 = place_signals(&net, &params, &mut SimRng::new(99)).unwrap();
        assert_eq!(t1.len(), t2.len());
        for (from, to, s) in t1.iter() {
            assert_eq!(t2.get(from, to), Some(s));
        }
    }

    #[test]
    fn existing_signals_are_kept() {
        let spec = GridSpec { rows: 2, cols: 2, ..GridSpec::default() };
        let net = build_grid(&spec).unwrap();
        let (a, b) = (spec.node(0, 0), spec.node(0, 1));

        let mut table = SignalTable::new();
        table.insert(a, b, super::helpers::red_first());
        let added = table
            .auto_place(&net, &PlacementParams::default(), &mut SimRng::new(5))
            .unwrap();
        assert_eq!(added, net.edge_count() - 1);
        assert_eq!(table.get(a, b), Some(&super::helpers::red_first()));
    }

    #[test]
    fn higher_junction_threshold() {
        let spec = GridSpec { rows: 3, cols: 3, ..GridSpec::default() };
        let net = build_grid(&spec).unwrap();
        let params = PlacementParams { min_out_degree: 4, ..PlacementParams::default() };
        let table = place_signals(&net, &params, &mut SimRng::new(2)).unwrap();
        // Only the centre node has four neighbours.
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn invalid_params_rejected() {
        let net = build_grid(&GridSpec::default()).unwrap();
        let bad_cycle = PlacementParams { cycle_min_secs: 0.0, ..PlacementParams::default() };
        assert!(matches!(
            place_signals(&net, &bad_cycle, &mut SimRng::new(0)),
            Err(SignalError::InvalidCycle(_))
        ));
        let inverted = PlacementParams { cycle_max_secs: 10.0, ..PlacementParams::default() };
        assert!(matches!(
            place_signals(&net, &inverted, &mut SimRng::new(0)),
            Err(SignalError::Placement(_))
        ));
    }

    #[test]
    fn fixed_parameters_allowed() {
        let net = build_grid(&GridSpec { rows: 2, cols: 2, ..GridSpec::default() }).unwrap();
        let params = PlacementParams {
            cycle_min_secs:  120.0,
            cycle_max_secs:  120.0,
            green_ratio_min: 0.5,
            green_ratio_max: 0.5,
            ..PlacementParams::default()
        };
        let table = place_signals(&net, &params, &mut SimRng::new(4)).unwrap();
        for (_, _, s) in table.iter() {
            assert_eq!(s.cycle_secs(), 120.0);
            assert_eq!(s.green_secs(), 60.0);
        }
    }
}

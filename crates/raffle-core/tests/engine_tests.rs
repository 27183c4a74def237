// Host-side integration tests for the spin engine, driven by a synthetic clock.

use raffle_core::samples::SampleRoster;
use raffle_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Default)]
struct Recorder {
    completed: Vec<Participant>,
    errors: Vec<SpinError>,
    states: Vec<WheelState>,
    frames: usize,
}

fn numbered(first: usize, last: usize, width: usize) -> Vec<Participant> {
    (first..=last)
        .map(|i| Participant::new(format!("First{i}"), format!("Last{i}"), format!("{i:0width$}")))
        .collect()
}

fn engine_with(participants: Vec<Participant>, duration_secs: f64) -> (SpinEngine, Rc<RefCell<Recorder>>) {
    let rec = Rc::new(RefCell::new(Recorder::default()));
    let mut engine = SpinEngine::new(
        SpinnerSettings {
            min_spin_duration_secs: duration_secs,
            ..SpinnerSettings::default()
        },
        ThemeConfig::default(),
    );
    engine.set_participants(participants);
    let r = rec.clone();
    engine.set_on_spin_complete(move |p| r.borrow_mut().completed.push(p.clone()));
    let r = rec.clone();
    engine.set_on_error(move |e| r.borrow_mut().errors.push(e.clone()));
    let r = rec.clone();
    engine.set_on_state_change(move |s| r.borrow_mut().states.push(s));
    let r = rec.clone();
    engine.set_on_frame(move |_, _| {
        r.borrow_mut().frames += 1;
        Ok(())
    });
    (engine, rec)
}

/// Tick at 60 fps from `start_ms` until the engine stops running. Returns the
/// timestamp of the last tick.
fn run_to_end(engine: &mut SpinEngine, generation: u64, start_ms: f64) -> f64 {
    let mut now = start_ms;
    for _ in 0..100_000 {
        match engine.tick(generation, now) {
            TickOutcome::Running { .. } => now += FRAME_MS,
            _ => return now,
        }
    }
    panic!("spin never finished");
}

#[test]
fn scenario_a_padded_tickets_resolve_unpadded_input() {
    let (mut engine, rec) = engine_with(numbered(1, 10, 3), 1.0);
    let gen = engine.spin("5").unwrap();
    assert_eq!(engine.state(), WheelState::Spinning);
    run_to_end(&mut engine, gen, 0.0);

    let rec = rec.borrow();
    assert_eq!(rec.completed.len(), 1);
    assert_eq!(rec.completed[0].ticket_number, "005");
    assert!(rec.errors.is_empty());
    assert_eq!(engine.state(), WheelState::Landed);
    assert_eq!(engine.winner().map(|p| p.ticket_number.as_str()), Some("005"));
}

#[test]
fn scenario_b_large_roster_lands_on_last_participant_in_time() {
    let mut rng = StdRng::seed_from_u64(42);
    let roster = SampleRoster::K100.generate(&mut rng);
    let expected = roster.last().cloned().unwrap();
    let (mut engine, rec) = engine_with(roster, 2.0);

    let gen = engine.spin("300000").unwrap();
    let start = 1_000.0;
    let end = run_to_end(&mut engine, gen, start);

    let rec = rec.borrow();
    assert_eq!(rec.completed, vec![expected]);
    // Lands on the first frame at or after the minimum duration
    assert!(end - start >= 2_000.0);
    assert!(end - start < 2_000.0 + 2.0 * FRAME_MS);
}

#[test]
fn scenario_c_missing_ticket_errors_synchronously() {
    let (mut engine, rec) = engine_with(numbered(1, 20, 2), 1.0);
    let result = engine.spin("999999");
    assert!(matches!(result, Err(SpinError::NotFound { .. })));

    {
        let rec = rec.borrow();
        assert_eq!(rec.errors.len(), 1);
        assert!(rec.errors[0].to_string().contains("999999"));
        assert_eq!(rec.states, vec![WheelState::Error, WheelState::Idle]);
        assert_eq!(rec.frames, 0);
    }
    assert_eq!(engine.state(), WheelState::Idle);
    assert_eq!(engine.tick(engine.generation(), 0.0), TickOutcome::Idle);
    assert!(rec.borrow().completed.is_empty());
}

#[test]
fn blank_ticket_and_empty_roster_are_reported() {
    let (mut engine, rec) = engine_with(numbered(1, 5, 1), 1.0);
    assert_eq!(engine.spin("  "), Err(SpinError::EmptyTicket));

    engine.set_participants(Vec::new());
    assert_eq!(engine.spin("1"), Err(SpinError::EmptyRoster));

    let rec = rec.borrow();
    assert_eq!(rec.errors, vec![SpinError::EmptyTicket, SpinError::EmptyRoster]);
    assert_eq!(engine.state(), WheelState::Idle);
}

#[test]
fn unclampable_settings_are_reported_before_any_frame() {
    let (mut engine, rec) = engine_with(numbered(1, 5, 1), 1.0);
    engine.set_settings(SpinnerSettings {
        min_spin_duration_secs: f64::INFINITY,
        ..SpinnerSettings::default()
    });
    let gen_before = engine.generation();
    assert!(matches!(engine.spin("3"), Err(SpinError::InvalidSettings(_))));
    assert_eq!(engine.generation(), gen_before);
    assert_eq!(rec.borrow().frames, 0);
    assert_eq!(engine.state(), WheelState::Idle);
}

#[test]
fn out_of_domain_curve_is_clamped_and_spin_proceeds() {
    let (mut engine, rec) = engine_with(numbered(1, 5, 1), 1.0);
    engine.set_settings(SpinnerSettings {
        min_spin_duration_secs: 1.0,
        spin_rotations: 3,
        bezier_curve: BezierCurve::new(-1.0, 0.5, 7.0, 1.0),
    });
    let gen = engine.spin("4").unwrap();
    run_to_end(&mut engine, gen, 0.0);
    let rec = rec.borrow();
    assert!(rec.errors.is_empty());
    assert_eq!(rec.completed[0].ticket_number, "4");
}

#[test]
fn second_spin_while_spinning_is_a_silent_no_op() {
    let (mut engine, rec) = engine_with(numbered(1, 10, 3), 1.0);
    let gen = engine.spin("2").unwrap();
    engine.tick(gen, 0.0);
    assert_eq!(engine.spin("7"), Err(SpinError::AlreadySpinning));
    assert_eq!(engine.generation(), gen);
    run_to_end(&mut engine, gen, FRAME_MS);

    let rec = rec.borrow();
    assert_eq!(rec.completed.len(), 1);
    assert_eq!(rec.completed[0].ticket_number, "002");
    assert!(rec.errors.is_empty());
}

#[test]
fn landed_engine_needs_reset_before_next_spin() {
    let (mut engine, rec) = engine_with(numbered(1, 10, 3), 0.5);
    let gen = engine.spin("1").unwrap();
    run_to_end(&mut engine, gen, 0.0);
    assert_eq!(engine.spin("2"), Err(SpinError::AlreadySpinning));

    engine.reset();
    assert_eq!(engine.state(), WheelState::Idle);
    assert!(engine.winner().is_none());
    let gen2 = engine.spin("2").unwrap();
    assert!(gen2 > gen);
    run_to_end(&mut engine, gen2, 10_000.0);

    let tickets: Vec<_> = rec
        .borrow()
        .completed
        .iter()
        .map(|p| p.ticket_number.clone())
        .collect();
    assert_eq!(tickets, vec!["001", "002"]);
}

#[test]
fn completion_fires_once_even_if_ticked_after_landing() {
    let (mut engine, rec) = engine_with(numbered(1, 4, 1), 0.5);
    let gen = engine.spin("3").unwrap();
    engine.tick(gen, 0.0);
    assert_eq!(engine.tick(gen, 600.0), TickOutcome::Landed);
    assert_eq!(engine.tick(gen, 700.0), TickOutcome::Idle);
    assert_eq!(engine.tick(gen, 800.0), TickOutcome::Idle);
    assert_eq!(rec.borrow().completed.len(), 1);
}

#[test]
fn cancelled_spin_never_completes() {
    let (mut engine, rec) = engine_with(numbered(1, 10, 3), 1.0);
    let old = engine.spin("3").unwrap();
    engine.tick(old, 0.0);
    engine.tick(old, 300.0);
    assert!(engine.cancel());
    assert_eq!(engine.state(), WheelState::Idle);

    let new = engine.spin("8").unwrap();
    assert_ne!(old, new);
    // A frame the host scheduled before cancelling arrives late
    assert_eq!(engine.tick(old, 5_000.0), TickOutcome::Stale);
    run_to_end(&mut engine, new, 400.0);
    assert_eq!(engine.tick(old, 99_000.0), TickOutcome::Stale);

    let rec = rec.borrow();
    assert_eq!(rec.completed.len(), 1);
    assert_eq!(rec.completed[0].ticket_number, "008");
}

#[test]
fn cancel_without_spin_reports_nothing_to_cancel() {
    let (mut engine, rec) = engine_with(numbered(1, 3, 1), 1.0);
    let before = engine.generation();
    assert!(!engine.cancel());
    assert!(engine.generation() > before);
    assert!(rec.borrow().states.is_empty());
}

#[test]
fn paint_faults_are_isolated_and_reported_once() {
    let (mut engine, rec) = engine_with(numbered(1, 10, 3), 1.0);
    let painted = Rc::new(RefCell::new(0usize));
    let p = painted.clone();
    engine.set_on_frame(move |frame, _| {
        *p.borrow_mut() += 1;
        if frame.landed {
            Ok(())
        } else {
            Err(anyhow::anyhow!("canvas lost"))
        }
    });
    let gen = engine.spin("6").unwrap();
    run_to_end(&mut engine, gen, 0.0);

    let rec = rec.borrow();
    assert!(*painted.borrow() > 2);
    assert_eq!(rec.errors.len(), 1);
    assert!(matches!(rec.errors[0], SpinError::RenderCallbackFault(ref m) if m.contains("canvas lost")));
    assert_eq!(rec.completed.len(), 1);
    assert_eq!(rec.completed[0].ticket_number, "006");
    assert_eq!(engine.state(), WheelState::Landed);
}

#[test]
fn state_changes_follow_the_lifecycle() {
    let (mut engine, rec) = engine_with(numbered(1, 3, 1), 0.5);
    let gen = engine.spin("1").unwrap();
    run_to_end(&mut engine, gen, 0.0);
    engine.reset();
    let gen = engine.spin("2").unwrap();
    engine.tick(gen, 0.0);
    engine.cancel();
    assert_eq!(
        rec.borrow().states,
        vec![
            WheelState::Spinning,
            WheelState::Landed,
            WheelState::Idle,
            WheelState::Spinning,
            WheelState::Idle,
        ]
    );
}

#[test]
fn winner_is_the_same_participant_instance_as_in_the_roster() {
    let roster: Rc<[Participant]> = Rc::from(numbered(1, 30, 2));
    let mut engine = SpinEngine::default();
    let hit = Rc::new(RefCell::new(None::<*const Participant>));
    let h = hit.clone();
    engine.set_on_spin_complete(move |p| *h.borrow_mut() = Some(p as *const Participant));
    let gen = engine
        .spin_request(SpinRequest {
            target_ticket_number: "21".into(),
            participants: roster.clone(),
        })
        .unwrap();
    run_to_end(&mut engine, gen, 0.0);
    assert_eq!(*hit.borrow(), Some(&roster[20] as *const Participant));
}

#[test]
fn duplicate_tickets_land_on_first_occurrence() {
    let mut roster = numbered(1, 6, 1);
    roster.push(Participant::new("Dup", "Licate", "0003"));
    let (mut engine, rec) = engine_with(roster, 0.5);
    let gen = engine.spin("3").unwrap();
    run_to_end(&mut engine, gen, 0.0);
    assert_eq!(rec.borrow().completed[0].first_name, "First3");
}

#[test]
fn roster_swap_mid_spin_does_not_disturb_the_spin() {
    let (mut engine, rec) = engine_with(numbered(1, 10, 2), 1.0);
    let gen = engine.spin("07").unwrap();
    engine.tick(gen, 0.0);
    engine.set_participants(numbered(100, 105, 3));
    run_to_end(&mut engine, gen, FRAME_MS);
    assert_eq!(rec.borrow().completed[0].ticket_number, "07");
    assert_eq!(engine.participants().len(), 6);
}

#[test]
fn single_participant_roster_spins_and_lands() {
    let (mut engine, rec) = engine_with(numbered(1, 1, 1), 0.5);
    let seen = Rc::new(RefCell::new(true));
    let s = seen.clone();
    engine.set_on_frame(move |frame, _| {
        if frame.rows.iter().any(|p| p.ticket_number != "1") {
            *s.borrow_mut() = false;
        }
        Ok(())
    });
    let gen = engine.spin("1").unwrap();
    run_to_end(&mut engine, gen, 0.0);
    assert!(*seen.borrow());
    assert_eq!(rec.borrow().completed.len(), 1);
}

#[test]
fn window_shape_depends_only_on_required_length() {
    const LEN: usize = 60;
    let small = ReelWindow::build(100, 99, LEN).unwrap();
    let large = ReelWindow::build(100_000, 99_999, LEN).unwrap();
    assert_eq!(small.len(), LEN);
    assert_eq!(large.len(), LEN);

    // Same distances behind the winner at every position, whatever N is
    let offsets = |w: &ReelWindow| {
        let n = w.population();
        let t = w.target_index();
        w.indices().map(|i| (t + n - i) % n).collect::<Vec<_>>()
    };
    let expected: Vec<usize> = (0..LEN).rev().collect();
    assert_eq!(offsets(&small), expected);
    assert_eq!(offsets(&large), expected);
}

#[test]
fn spin_work_is_the_same_for_small_and_large_rosters() {
    let mut rng = StdRng::seed_from_u64(3);
    let large = SampleRoster::K100.generate(&mut rng);
    let large_ticket = large[77_777].ticket_number.clone();
    let small = numbered(1, 100, 3);

    let mut shapes = Vec::new();
    for (roster, ticket) in [(small, "50".to_string()), (large, large_ticket)] {
        let (mut engine, rec) = engine_with(roster, 1.0);
        let rows = Rc::new(RefCell::new(Vec::new()));
        let sink = rows.clone();
        let r = rec.clone();
        engine.set_on_frame(move |frame, _| {
            r.borrow_mut().frames += 1;
            sink.borrow_mut().push(frame.rows.len());
            Ok(())
        });
        let gen = engine.spin(&ticket).unwrap();
        run_to_end(&mut engine, gen, 0.0);
        assert_eq!(rec.borrow().completed.len(), 1);
        let rows = rows.borrow().clone();
        shapes.push((rec.borrow().frames, rows));
    }
    assert_eq!(shapes[0], shapes[1]);
}

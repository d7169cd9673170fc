//! Tests for the tap dance classifier and engine.
//!
//! The classifier is a pure function, so it gets the full table treatment;
//! the engine tests walk press/release/tick sequences and check which
//! outcomes fall out, and when.

use duet_keyboard::config::TAPPING_TERM;
use duet_keyboard::tapdance::{DanceOutcome, Gesture, TapDance};

#[test]
fn classifier_table() {
    // One press: held and uninterrupted is a hold, anything else a tap.
    assert_eq!(Gesture::classify(1, false, true), Gesture::SingleHold);
    assert_eq!(Gesture::classify(1, true, false), Gesture::SingleTap);
    assert_eq!(Gesture::classify(1, true, true), Gesture::SingleTap);
    assert_eq!(Gesture::classify(1, false, false), Gesture::SingleTap);

    // Two presses: interruption wins over everything else.
    assert_eq!(Gesture::classify(2, true, true), Gesture::DoubleSingleTap);
    assert_eq!(Gesture::classify(2, true, false), Gesture::DoubleSingleTap);
    assert_eq!(Gesture::classify(2, false, true), Gesture::DoubleHold);
    assert_eq!(Gesture::classify(2, false, false), Gesture::DoubleTap);

    // Three presses mirror one press.
    assert_eq!(Gesture::classify(3, false, true), Gesture::TripleHold);
    assert_eq!(Gesture::classify(3, true, true), Gesture::TripleTap);
    assert_eq!(Gesture::classify(3, false, false), Gesture::TripleTap);

    // Anything else is not distinguished.
    assert_eq!(Gesture::classify(0, false, false), Gesture::Unknown);
    for count in 4..8 {
        for interrupted in [false, true] {
            for held in [false, true] {
                assert_eq!(Gesture::classify(count, interrupted, held), Gesture::Unknown);
            }
        }
    }
}

/// Run `ms` ticks, collecting every outcome.
fn run_ticks(td: &mut TapDance, ms: u16) -> Vec<DanceOutcome> {
    let mut fired = Vec::new();
    for _ in 0..ms {
        fired.extend(td.tick());
    }
    fired
}

#[test]
fn double_tap_settles_after_term() {
    let mut td = TapDance::default();
    assert!(td.press().is_empty());
    assert!(td.release().is_empty());
    assert!(run_ticks(&mut td, 50).is_empty());
    assert!(td.press().is_empty());
    assert!(td.release().is_empty());

    assert_eq!(
        run_ticks(&mut td, TAPPING_TERM + 1),
        vec![
            DanceOutcome::Finished(Gesture::DoubleTap),
            DanceOutcome::Reset(Gesture::DoubleTap),
        ]
    );
}

#[test]
fn double_hold_waits_for_release() {
    let mut td = TapDance::default();
    td.press();
    td.release();
    td.press();
    assert_eq!(
        run_ticks(&mut td, TAPPING_TERM + 1),
        vec![DanceOutcome::Finished(Gesture::DoubleHold)]
    );
    assert!(run_ticks(&mut td, 500).is_empty());
    assert_eq!(
        td.release().as_slice(),
        &[DanceOutcome::Reset(Gesture::DoubleHold)]
    );
    assert!(!td.is_active());
}

#[test]
fn interruption_settles_immediately() {
    // Key down, another key arrives: no waiting out the term.
    let mut td = TapDance::default();
    td.press();
    assert_eq!(
        td.interrupt().as_slice(),
        &[DanceOutcome::Finished(Gesture::SingleTap)]
    );
    assert_eq!(
        td.release().as_slice(),
        &[DanceOutcome::Reset(Gesture::SingleTap)]
    );

    // Two taps then an interruption while the key is up: both outcomes at
    // once, classified as two ordinary taps.
    td.press();
    td.release();
    td.press();
    td.release();
    assert_eq!(
        td.interrupt().as_slice(),
        &[
            DanceOutcome::Finished(Gesture::DoubleSingleTap),
            DanceOutcome::Reset(Gesture::DoubleSingleTap),
        ]
    );
}

#[test]
fn triple_and_beyond() {
    let mut td = TapDance::default();
    for _ in 0..3 {
        td.press();
        td.release();
    }
    assert_eq!(
        run_ticks(&mut td, TAPPING_TERM),
        vec![
            DanceOutcome::Finished(Gesture::TripleTap),
            DanceOutcome::Reset(Gesture::TripleTap),
        ]
    );

    for _ in 0..4 {
        td.press();
        td.release();
    }
    assert_eq!(
        run_ticks(&mut td, TAPPING_TERM),
        vec![
            DanceOutcome::Finished(Gesture::Unknown),
            DanceOutcome::Reset(Gesture::Unknown),
        ]
    );
}

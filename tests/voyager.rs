//! Tests for the split board's manager.
//!
//! Each test walks a scripted sequence of key events and ticks through the
//! manager and checks the actions that come out the other side, in order.
//! The scenarios are the ones that matter when actually typing on the thing:
//! rolls staying rolls, deliberate chords becoming modifiers, layers landing
//! before the keys typed under them.

use std::collections::VecDeque;

use duet_keyboard::keys::voyager::*;
use duet_keyboard::layout::voyager::VoyagerManager;
use duet_keyboard::leds::RgbEffect;
use duet_keyboard::{KeyAction, KeyEvent, LayoutActions, Mods};
use usb_device::prelude::UsbDeviceState;
use usbd_human_interface_device::page::{Consumer, Keyboard};

#[derive(PartialEq, Debug)]
enum Recorded {
    Key(KeyAction),
    DragScroll(bool),
    Rgb(RgbEffect),
    Layers(u8),
}

#[derive(Default)]
struct Actor {
    queue: VecDeque<Recorded>,
}

impl LayoutActions for Actor {
    fn send_key(&mut self, key: KeyAction) {
        self.queue.push_back(Recorded::Key(key));
    }

    fn set_drag_scroll(&mut self, active: bool) {
        self.queue.push_back(Recorded::DragScroll(active));
    }

    fn set_rgb(&mut self, effect: RgbEffect) {
        self.queue.push_back(Recorded::Rgb(effect));
    }

    fn active_layers(&mut self, mask: u8) {
        self.queue.push_back(Recorded::Layers(mask));
    }
}

enum Step {
    Tick(u16),
    Event(KeyEvent),
    Usb(UsbDeviceState),
    Expect(Recorded),
}

fn press(code: u8) -> Step {
    Step::Event(KeyEvent::Press(code))
}

fn release(code: u8) -> Step {
    Step::Event(KeyEvent::Release(code))
}

fn key(action: KeyAction) -> Step {
    Step::Expect(Recorded::Key(action))
}

fn run(steps: Vec<Step>) {
    let mut manager = VoyagerManager::default();
    let mut actor = Actor::default();
    for (index, step) in steps.into_iter().enumerate() {
        match step {
            Step::Tick(ms) => {
                for _ in 0..ms {
                    manager.tick(&mut actor);
                }
            }
            Step::Event(event) => manager.handle_event(event, &mut actor),
            Step::Usb(state) => manager.usb_state(state, &mut actor),
            Step::Expect(expected) => match actor.queue.pop_front() {
                Some(actual) => assert_eq!(actual, expected, "at step {}", index),
                None => panic!("expected {:?} at step {}, got nothing", expected, index),
            },
        }
    }
    assert!(
        actor.queue.is_empty(),
        "unconsumed actions: {:?}",
        actor.queue
    );
}

#[test]
fn plain_typing_with_rollover() {
    run(vec![
        press(KEY_Q),
        key(KeyAction::KeyPress(Keyboard::Q, Mods::empty())),
        press(KEY_J),
        key(KeyAction::KeyPress(Keyboard::J, Mods::empty())),
        release(KEY_Q),
        key(KeyAction::KeyRelease),
        release(KEY_J),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn home_row_hold_by_term() {
    run(vec![
        // Shift engages eagerly on hold-intent.
        press(KEY_T),
        key(KeyAction::ModOnly(Mods::SHIFT)),
        // The shift home-row key uses the short term.
        Step::Tick(130),
        press(KEY_J),
        key(KeyAction::KeyPress(Keyboard::J, Mods::SHIFT)),
        release(KEY_J),
        key(KeyAction::KeyRelease),
        release(KEY_T),
        key(KeyAction::ModOnly(Mods::empty())),
    ]);
}

#[test]
fn same_hand_roll_stays_letters() {
    run(vec![
        press(KEY_T),
        key(KeyAction::ModOnly(Mods::SHIFT)),
        Step::Tick(10),
        // G is on the same hand and not a thumb: the chord is refused, the
        // eager shift is retracted, and both letters come out in order.
        press(KEY_G),
        key(KeyAction::ModOnly(Mods::empty())),
        key(KeyAction::KeyPress(Keyboard::T, Mods::empty())),
        key(KeyAction::KeyPress(Keyboard::G, Mods::empty())),
        release(KEY_T),
        key(KeyAction::KeyRelease),
        release(KEY_G),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn cross_hand_chord_settles_on_interrupter_release() {
    run(vec![
        press(KEY_T),
        key(KeyAction::ModOnly(Mods::SHIFT)),
        Step::Tick(100),
        // J is on the other hand; its press alone decides nothing.
        press(KEY_J),
        Step::Tick(10),
        // Its release inside the hold commits the chord, and the deferred
        // J replays under shift.
        release(KEY_J),
        key(KeyAction::KeyPress(Keyboard::J, Mods::SHIFT)),
        key(KeyAction::KeyRelease),
        release(KEY_T),
        key(KeyAction::ModOnly(Mods::empty())),
    ]);
}

#[test]
fn rolled_dual_role_pair_stays_letters() {
    run(vec![
        // "tn" typed quickly: both keys are mod-taps, on opposite hands.
        press(KEY_T),
        key(KeyAction::ModOnly(Mods::SHIFT)),
        Step::Tick(10),
        press(KEY_N),
        Step::Tick(10),
        // T released first: it was a tap, and the deferred N lands inside
        // the typing streak, so it is a tap too.
        release(KEY_T),
        key(KeyAction::ModOnly(Mods::empty())),
        key(KeyAction::KeyPress(Keyboard::T, Mods::empty())),
        key(KeyAction::KeyRelease),
        key(KeyAction::KeyPress(Keyboard::N, Mods::empty())),
        release(KEY_N),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn streak_forces_tap() {
    run(vec![
        press(KEY_Q),
        key(KeyAction::KeyPress(Keyboard::Q, Mods::empty())),
        release(KEY_Q),
        key(KeyAction::KeyRelease),
        // 50ms later is inside shift's 80ms streak window: no eager mod,
        // no pending, just the letter.
        Step::Tick(50),
        press(KEY_T),
        key(KeyAction::KeyPress(Keyboard::T, Mods::empty())),
        release(KEY_T),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn layer_tap_hold_reaches_nav() {
    run(vec![
        press(KEY_SPACE),
        Step::Tick(180),
        Step::Expect(Recorded::Layers(0b0000_1001)),
        // The N position is Left on the nav layer.
        press(KEY_N),
        key(KeyAction::KeyPress(Keyboard::LeftArrow, Mods::empty())),
        release(KEY_N),
        key(KeyAction::KeyRelease),
        release(KEY_SPACE),
        Step::Expect(Recorded::Layers(0b0000_0001)),
    ]);
}

#[test]
fn layer_tap_quick_release_is_tap() {
    run(vec![
        press(KEY_H),
        Step::Tick(50),
        release(KEY_H),
        key(KeyAction::KeyPress(Keyboard::H, Mods::empty())),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn combo_fires_inside_window() {
    run(vec![
        press(KEY_W),
        Step::Tick(10),
        press(KEY_F),
        key(KeyAction::KeyPress(Keyboard::Escape, Mods::empty())),
        release(KEY_W),
        key(KeyAction::KeyRelease),
        release(KEY_F),
    ]);
}

#[test]
fn combo_times_out_to_plain_key() {
    run(vec![
        press(KEY_W),
        Step::Tick(60),
        key(KeyAction::KeyPress(Keyboard::W, Mods::empty())),
        release(KEY_W),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn combo_wrong_partner_replays_in_order() {
    run(vec![
        press(KEY_W),
        press(KEY_Q),
        key(KeyAction::KeyPress(Keyboard::W, Mods::empty())),
        key(KeyAction::KeyPress(Keyboard::Q, Mods::empty())),
        release(KEY_W),
        key(KeyAction::KeyRelease),
        release(KEY_Q),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn num_and_sym_layers() {
    const NUM_7: u8 = 8;
    const SYM_COLON: u8 = 13;
    run(vec![
        // Enter held reaches the number pad on the left hand.
        press(KEY_ENTER),
        Step::Tick(180),
        Step::Expect(Recorded::Layers(0b0000_0011)),
        press(NUM_7),
        key(KeyAction::KeyPress(Keyboard::Keyboard7, Mods::empty())),
        release(NUM_7),
        key(KeyAction::KeyRelease),
        release(KEY_ENTER),
        Step::Expect(Recorded::Layers(0b0000_0001)),
        // H held reaches the symbol layer; the A position is a colon.
        press(KEY_H),
        Step::Tick(180),
        Step::Expect(Recorded::Layers(0b0000_0101)),
        press(SYM_COLON),
        key(KeyAction::KeyPress(Keyboard::Semicolon, Mods::SHIFT)),
        release(SYM_COLON),
        key(KeyAction::KeyRelease),
        release(KEY_H),
        Step::Expect(Recorded::Layers(0b0000_0001)),
    ]);
}

#[test]
fn hyper_escape_holds_all_four_mods() {
    const ESC_KEY: u8 = 12;
    run(vec![
        // Hyper is not in the eager set, so nothing engages until the term.
        press(ESC_KEY),
        Step::Tick(180),
        key(KeyAction::ModOnly(Mods::HYPER)),
        release(ESC_KEY),
        key(KeyAction::ModOnly(Mods::empty())),
    ]);
}

#[test]
fn caps_word_shifts_letters_until_word_ends() {
    const CAPS_KEY: u8 = 47;
    const COMMA: u8 = 50;
    run(vec![
        // Reach the nav layer and toggle caps word.
        press(KEY_SPACE),
        Step::Tick(180),
        Step::Expect(Recorded::Layers(0b0000_1001)),
        press(CAPS_KEY),
        release(CAPS_KEY),
        release(KEY_SPACE),
        Step::Expect(Recorded::Layers(0b0000_0001)),
        // Letters come out shifted.
        press(KEY_J),
        key(KeyAction::KeyPress(Keyboard::J, Mods::SHIFT)),
        release(KEY_J),
        key(KeyAction::KeyRelease),
        // A word-ending key goes out untouched and ends the word.
        press(COMMA),
        key(KeyAction::KeyPress(Keyboard::Comma, Mods::empty())),
        release(COMMA),
        key(KeyAction::KeyRelease),
        press(KEY_J),
        key(KeyAction::KeyPress(Keyboard::J, Mods::empty())),
        release(KEY_J),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn caps_word_expires_when_idle() {
    const CAPS_KEY: u8 = 47;
    run(vec![
        press(KEY_SPACE),
        Step::Tick(180),
        Step::Expect(Recorded::Layers(0b0000_1001)),
        press(CAPS_KEY),
        release(CAPS_KEY),
        release(KEY_SPACE),
        Step::Expect(Recorded::Layers(0b0000_0001)),
        // Five seconds of nothing: the word is over.
        Step::Tick(5001),
        press(KEY_J),
        key(KeyAction::KeyPress(Keyboard::J, Mods::empty())),
        release(KEY_J),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn macro_plays_with_delays() {
    // The copy-url macro sits on the media layer under the G column.
    const MACRO_KEY: u8 = 17;
    run(vec![
        press(KEY_MINUS),
        Step::Tick(180),
        Step::Expect(Recorded::Layers(0b0001_0001)),
        press(MACRO_KEY),
        Step::Tick(1),
        key(KeyAction::KeyPress(Keyboard::L, Mods::GUI)),
        key(KeyAction::KeyRelease),
        // The second chord waits out the inter-step delay.
        Step::Tick(120),
        key(KeyAction::KeyPress(Keyboard::C, Mods::GUI)),
        key(KeyAction::KeyRelease),
        release(MACRO_KEY),
        release(KEY_MINUS),
        Step::Expect(Recorded::Layers(0b0000_0001)),
    ]);
}

#[test]
fn media_layer_consumer_and_rgb() {
    const VOL_DOWN: u8 = 44;
    const RGB_KEY: u8 = 53;
    run(vec![
        press(KEY_MINUS),
        Step::Tick(180),
        Step::Expect(Recorded::Layers(0b0001_0001)),
        press(VOL_DOWN),
        key(KeyAction::ConsumerTap(Consumer::VolumeDecrement)),
        release(VOL_DOWN),
        press(RGB_KEY),
        Step::Expect(Recorded::Rgb(RgbEffect::Solid)),
        release(RGB_KEY),
        release(KEY_MINUS),
        Step::Expect(Recorded::Layers(0b0000_0001)),
    ]);
}

#[test]
fn lock_screen_is_a_consumer_tap() {
    run(vec![
        press(0),
        key(KeyAction::ConsumerTap(Consumer::ALTerminalLockScreensaver)),
        release(0),
        press(1),
        key(KeyAction::KeyPress(Keyboard::Keyboard1, Mods::HYPER)),
        release(1),
        key(KeyAction::KeyRelease),
    ]);
}

#[test]
fn suspend_clears_transient_state() {
    run(vec![
        press(KEY_SPACE),
        Step::Tick(180),
        Step::Expect(Recorded::Layers(0b0000_1001)),
        Step::Usb(UsbDeviceState::Suspend),
        Step::Expect(Recorded::Layers(0b0000_0001)),
        // The old hold is gone; releasing its key does nothing.
        release(KEY_SPACE),
    ]);
}

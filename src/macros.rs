//! Canned key sequences.
//!
//! Three small programs the keymaps can trigger: one browser chord pair and
//! two modal-editor window splits.  A program is a static list of steps;
//! playback is tick-driven so the delays between steps hold without blocking
//! the scan loop.

use arraydeque::ArrayDeque;
use usbd_human_interface_device::page::Keyboard;

use crate::config::MACRO_STEP_DELAY;
use crate::log::warn;
use crate::typer::type_str;
use crate::{KeyAction, LayoutActions, Mods};

/// The macro programs the keymaps refer to.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum MacroId {
    /// Focus the browser address bar and copy it: GUI-L, then GUI-C.
    CopyUrl,
    /// Escape to normal mode and split the window vertically.
    VimVsplit,
    /// Escape to normal mode and split the window horizontally.
    VimSplit,
}

/// One step of a program.
enum Step {
    Tap(Keyboard),
    Chord(Mods, Keyboard),
    Text(&'static str),
    Delay(u16),
}

static COPY_URL: [Step; 3] = [
    Step::Chord(Mods::GUI, Keyboard::L),
    Step::Delay(MACRO_STEP_DELAY),
    Step::Chord(Mods::GUI, Keyboard::C),
];

static VIM_VSPLIT: [Step; 3] = [
    Step::Tap(Keyboard::Escape),
    Step::Delay(MACRO_STEP_DELAY),
    Step::Text(":vs\n"),
];

static VIM_SPLIT: [Step; 3] = [
    Step::Tap(Keyboard::Escape),
    Step::Delay(MACRO_STEP_DELAY),
    Step::Text(":sp\n"),
];

impl MacroId {
    fn program(&self) -> &'static [Step] {
        match self {
            MacroId::CopyUrl => &COPY_URL,
            MacroId::VimVsplit => &VIM_VSPLIT,
            MacroId::VimSplit => &VIM_SPLIT,
        }
    }
}

/// A key action with the time to wait before sending it.
struct TimedAction {
    delay_before: u16,
    action: KeyAction,
}

/// Plays one program at a time.  Programs are short; if a new one starts
/// while another is still draining, the rest of the old one is dropped.
#[derive(Default)]
pub struct MacroPlayer {
    queue: ArrayDeque<TimedAction, 32>,
    elapsed: u16,
}

impl MacroPlayer {
    pub fn is_busy(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Queue up a program for playback.
    pub fn start(&mut self, id: MacroId) {
        self.queue.clear();
        self.elapsed = 0;
        let mut pending_delay = 0;
        for step in id.program() {
            match step {
                Step::Tap(key) => {
                    self.enqueue(pending_delay, KeyAction::KeyPress(*key, Mods::empty()));
                    self.enqueue(0, KeyAction::KeyRelease);
                    pending_delay = 0;
                }
                Step::Chord(mods, key) => {
                    self.enqueue(pending_delay, KeyAction::KeyPress(*key, *mods));
                    self.enqueue(0, KeyAction::KeyRelease);
                    pending_delay = 0;
                }
                Step::Text(text) => {
                    let mut delay = pending_delay;
                    type_str(text, |action| {
                        self.enqueue(delay, action);
                        delay = 0;
                    });
                    pending_delay = 0;
                }
                Step::Delay(ms) => pending_delay += ms,
            }
        }
    }

    fn enqueue(&mut self, delay_before: u16, action: KeyAction) {
        if self
            .queue
            .push_back(TimedAction {
                delay_before,
                action,
            })
            .is_err()
        {
            warn!("macro program overflowed playback queue");
        }
    }

    /// Advance one millisecond, emitting whatever is due.
    pub fn tick(&mut self, actions: &mut dyn LayoutActions) {
        while let Some(front) = self.queue.front() {
            if self.elapsed < front.delay_before {
                self.elapsed += 1;
                return;
            }
            let action = self.queue.pop_front().map(|t| t.action);
            if let Some(action) = action {
                actions.send_key(action);
            }
            self.elapsed = 0;
        }
    }

    /// Abandon playback (bus suspend).
    pub fn clear(&mut self) {
        self.queue.clear();
        self.elapsed = 0;
    }
}

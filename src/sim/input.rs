//! Discrete input events and the cross-thread handoff
//!
//! The host translates raw keys into [`InputEvent`]s. When input arrives on
//! another thread it goes through an [`InputSender`]/[`InputQueue`] pair and
//! is drained into a [`TickInput`] right before each tick.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

/// A single input from the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    JumpRequested,
    RestartRequested,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key pressed since the last tick
    pub jump: bool,
    /// Restart key pressed since the last tick
    pub restart: bool,
    /// Demo mode - the core decides when to jump
    pub autopilot: bool,
}

impl TickInput {
    /// Fold a batch of events into one tick's input
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        let mut input = Self::default();
        for event in events {
            match event {
                InputEvent::JumpRequested => input.jump = true,
                InputEvent::RestartRequested => input.restart = true,
            }
        }
        input
    }
}

/// Producer half, owned by the input thread
#[derive(Debug)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event. Returns false once the consumer is gone.
    pub fn send(&self, event: InputEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Consumer half, owned by whoever calls `tick`
#[derive(Debug)]
pub struct InputQueue {
    rx: Receiver<InputEvent>,
}

impl InputQueue {
    /// Create a connected sender/queue pair
    pub fn channel() -> (InputSender, InputQueue) {
        let (tx, rx) = mpsc::channel();
        (InputSender { tx }, InputQueue { rx })
    }

    /// Take every pending event without blocking
    pub fn drain(&self) -> TickInput {
        TickInput::from_events(self.rx.try_iter())
    }
}

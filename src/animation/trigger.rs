use std::sync::mpsc::{self, Receiver, Sender};

/// What the animator should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Start the next transition.
    Advance,
    /// The source is exhausted; finish the run.
    Stop,
}

/// Source of "go to the next layout" events.
pub trait TriggerSource {
    /// Block until the next trigger.
    fn wait(&mut self) -> Trigger;

    /// Non-blocking check made once per frame while a transition runs. `None` means nothing
    /// happened.
    fn poll(&mut self) -> Option<Trigger> {
        None
    }
}

/// Continuous mode: every wait is answered immediately, optionally a bounded number of times.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoTrigger {
    remaining: Option<u64>,
}

impl AutoTrigger {
    pub fn unbounded() -> Self {
        Self { remaining: None }
    }

    pub fn limited(transitions: u64) -> Self {
        Self {
            remaining: Some(transitions),
        }
    }
}

impl TriggerSource for AutoTrigger {
    fn wait(&mut self) -> Trigger {
        match &mut self.remaining {
            None => Trigger::Advance,
            Some(0) => Trigger::Stop,
            Some(n) => {
                *n -= 1;
                Trigger::Advance
            }
        }
    }
}

/// Triggers sent from another thread. A disconnected sender stops the run.
#[derive(Debug)]
pub struct ChannelTrigger {
    rx: Receiver<Trigger>,
}

/// Producer handle plus the animator side of a trigger channel.
pub fn channel() -> (Sender<Trigger>, ChannelTrigger) {
    let (tx, rx) = mpsc::channel();
    (tx, ChannelTrigger { rx })
}

impl TriggerSource for ChannelTrigger {
    fn wait(&mut self) -> Trigger {
        self.rx.recv().unwrap_or(Trigger::Stop)
    }

    fn poll(&mut self) -> Option<Trigger> {
        // A disconnect surfaces on the next `wait`, after the running transition ends.
        self.rx.try_recv().ok()
    }
}

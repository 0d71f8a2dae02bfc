//! Out-of-band control of a running flip.
//!
//! A run polls its [`CommandQueue`] between two steps; the matching
//! [`ControlHandle`] can live on any thread. Nothing is ever applied in the
//! middle of a step.

use std::sync::mpsc::{Receiver, Sender, TryIter, channel};

use crate::simulation::Snapshot;

#[derive(Debug, Clone)]
pub enum SimCommand {
    /// Finish once the step in flight is recorded.
    Stop,
    /// Log the standard probe readings.
    Report,
    /// Reply with how far the run has come.
    Progress(Sender<Progress>),
}

/// Answer to [`SimCommand::Progress`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub steps_taken: usize,
    pub total_steps: usize,
    /// Most recently recorded snapshot, `None` before the first step.
    pub latest: Option<Snapshot>,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total_steps == 0 {
            return 1.0;
        }
        self.steps_taken as f64 / self.total_steps as f64
    }
}

pub struct CommandQueue {
    receiver: Receiver<SimCommand>,
}

#[derive(Debug, Clone)]
pub struct ControlHandle {
    sender: Sender<SimCommand>,
}

impl CommandQueue {
    pub fn new() -> (Self, ControlHandle) {
        let (sender, receiver) = channel();
        (Self { receiver }, ControlHandle { sender })
    }

    /// Commands queued so far, without blocking.
    pub fn pending(&self) -> TryIter<'_, SimCommand> {
        self.receiver.try_iter()
    }
}

impl ControlHandle {
    /// A finished run drops its queue; commands sent afterwards are discarded.
    pub fn send(&self, cmd: SimCommand) {
        let _ = self.sender.send(cmd);
    }

    pub fn stop(&self) {
        self.send(SimCommand::Stop);
    }

    pub fn report(&self) {
        self.send(SimCommand::Report);
    }

    /// The reply arrives the next time the run checks its queue; the receiver
    /// disconnects without a reply if the run has already finished.
    pub fn progress(&self) -> Receiver<Progress> {
        let (reply, answer) = channel();
        self.send(SimCommand::Progress(reply));
        answer
    }
}

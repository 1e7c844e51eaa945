use crate::error::{Fault, LoadError};
use crate::model::{load_image, State};

pub const DEFAULT_MAX_TICKS: u64 = 1000;

/// One observation of the machine.
///
/// While `done` is false, `state` is the machine right before the
/// instruction at `state.pc` runs. The last step carries `done = true` and
/// the final state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: State,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    /// Nothing handed out for the instruction at `pc` yet
    Fetch,
    /// Snapshot handed out, instruction at `pc` still to run
    Pending,
    Done,
    Faulted(Fault),
}

/// Resumable fetch-decode-execute loop. Every call to [`Stepper::step`]
/// advances the machine by exactly one cycle.
#[derive(Debug, Clone)]
pub struct Stepper {
    state: State,
    input: Vec<u8>,
    max_ticks: u64,
    status: Status,
}

impl Stepper {
    pub fn new(image: &[u8], input: &[u8], max_ticks: u64) -> Result<Self, LoadError> {
        let memory = load_image(image)?;
        Ok(Stepper {
            state: State::new(memory),
            input: input.to_vec(),
            max_ticks,
            status: Status::Fetch,
        })
    }

    /// The machine as it is now. After a fault this is where it stopped.
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    pub fn is_done(&self) -> bool {
        matches!(self.status, Status::Done | Status::Faulted(_))
    }

    pub fn step(&mut self) -> Result<Step, Fault> {
        match &self.status {
            Status::Done => return Ok(self.finish()),
            Status::Faulted(fault) => return Err(fault.clone()),
            Status::Pending => match self.state.exec(&self.input) {
                Ok(true) => self.status = Status::Fetch,
                Ok(false) => return Ok(self.finish()),
                Err(fault) => return Err(self.fault(fault)),
            },
            Status::Fetch => {}
        }

        if !self.state.is_running() {
            return Ok(self.finish());
        }

        self.state.tick += 1;
        if self.state.tick > self.max_ticks {
            return Err(self.fault(Fault::ResourcesExhausted {
                max_ticks: self.max_ticks,
            }));
        }

        self.status = Status::Pending;
        Ok(Step {
            state: self.state.clone(),
            done: false,
        })
    }

    fn finish(&mut self) -> Step {
        self.status = Status::Done;
        Step {
            state: self.state.clone(),
            done: true,
        }
    }

    fn fault(&mut self, fault: Fault) -> Fault {
        self.status = Status::Faulted(fault.clone());
        fault
    }
}

/// Snapshots up to and including the final one, or the fault that ended
/// the run.
impl Iterator for Stepper {
    type Item = Result<Step, Fault>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        Some(self.step())
    }
}

pub mod error;
pub mod hooks;
pub mod model;
pub mod stepper;

pub use error::{Error, Fault, LoadError};
pub use model::{State, RECURSION_LIMIT};
pub use stepper::{Step, Stepper, DEFAULT_MAX_TICKS};

/// Loads `image` and hands back the machine, ready for its first cycle.
pub fn step(image: &[u8], input: &[u8], max_ticks: u64) -> Result<Stepper, LoadError> {
    Stepper::new(image, input, max_ticks)
}

/// Runs `image` to completion and returns the final state.
pub fn run(image: &[u8], input: &[u8], max_ticks: u64) -> Result<State, Error> {
    let mut stepper = step(image, input, max_ticks)?;
    loop {
        let step = stepper.step()?;
        if step.done {
            return Ok(step.state);
        }
    }
}

pub mod dump;
pub mod serial;
pub mod trace;

use crate::model::State;

/// Observer of the snapshot sequence. `exec` sees the machine right before
/// the instruction `code` at `addr` runs.
pub trait Hook {
    fn init(&mut self, _state: &State) {}
    fn exec(&mut self, time: u64, addr: u16, code: u16, state: &State);
    fn finish(&mut self, _state: &State) {}
}

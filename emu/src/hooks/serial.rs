use color_print::cprintln;

use super::Hook;
use crate::model::State;

/// Echoes bytes as the program writes them.
pub struct Serial {
    style: bool,
    written: usize,
}

impl Serial {
    pub fn new(style: bool) -> Self {
        Serial { style, written: 0 }
    }

    /// Output produced since the last call.
    pub fn pending<'a>(&mut self, state: &'a State) -> &'a [u8] {
        let new = state.output.get(self.written..).unwrap_or_default();
        self.written = state.output.len();
        new
    }

    fn flush(&mut self, state: &State) {
        for &byte in self.pending(state) {
            match self.style {
                true => cprintln!(" > <r,s>{:0>2X}</> {:?}", byte, byte as char),
                false => print!("{}", byte as char),
            }
        }
    }
}

impl Hook for Serial {
    fn exec(&mut self, _time: u64, _addr: u16, _code: u16, state: &State) {
        self.flush(state);
    }

    fn finish(&mut self, state: &State) {
        self.flush(state);
        if !self.style && !state.output.is_empty() {
            println!();
        }
    }
}

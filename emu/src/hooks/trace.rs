use color_print::{cformat, cprintln};

use s8arch::inst::Inst;
use s8asm::DebugMap;

use super::Hook;
use crate::model::State;

/// One line per cycle: tick, address, word, disassembly and, when a debug
/// map is at hand, the source line it came from.
pub struct Trace {
    debug: Option<DebugMap>,
}

impl Trace {
    pub fn new(debug: Option<DebugMap>) -> Self {
        Trace { debug }
    }

    pub fn line(&self, time: u64, addr: u16, code: u16) -> String {
        let inst = match Inst::from_bin(code) {
            Some(inst) => inst.cformat(),
            None => cformat!("<r,s>????</>"),
        };
        let source = self
            .debug
            .as_ref()
            .and_then(|debug| debug.get(&(addr as usize)))
            .map(|desc| cformat!(" <dim>; {:>4}: {}</>", desc.line + 1, desc.raw))
            .unwrap_or_default();
        format!("[{:0>4}] {:0>3X}: {:0>4X}  {}{}", time, addr, code, inst, source)
    }
}

impl Hook for Trace {
    fn exec(&mut self, time: u64, addr: u16, code: u16, _state: &State) {
        println!("{}", self.line(time, addr, code));
    }

    fn finish(&mut self, state: &State) {
        cprintln!("<g,s>done</> after {} ticks, pc = 0x{:0>3X}", state.tick, state.pc);
    }
}

use serde::Serialize;

use s8arch::alu::alu;
use s8arch::cmp::cmp;
use s8arch::image::{MAGIC, MEMORY_SIZE};
use s8arch::inst::Inst;
use s8arch::op::Word;
use s8arch::reg::Reg;

use crate::error::{Fault, LoadError};

/// Deepest call nesting before TUR faults.
pub const RECURSION_LIMIT: usize = 1000;

/// Checks the magic tag and copies the payload into zeroed memory.
pub fn load_image(image: &[u8]) -> Result<Vec<u8>, LoadError> {
    if image.len() > MEMORY_SIZE {
        return Err(LoadError::TooLarge {
            size: image.len(),
            max: MEMORY_SIZE,
        });
    }
    let payload = match image.strip_prefix(&MAGIC[..]) {
        Some(payload) => payload,
        None => return Err(LoadError::UnsupportedExecutable),
    };
    let mut memory = vec![0; MEMORY_SIZE];
    memory[..payload.len()].copy_from_slice(payload);
    Ok(memory)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct State {
    pub pc: u16,
    pub flag: bool,
    pub regs: [u8; 16],
    pub memory: Vec<u8>,
    pub output: Vec<u8>,
    pub input_ptr: usize,
    /// Return addresses, innermost last
    pub backtrace: Vec<u16>,
    pub tick: u64,
}

// Register & memory access
impl State {
    pub fn get(&self, reg: Reg) -> u8 {
        self.regs[reg.idx()]
    }

    pub fn set(&mut self, reg: Reg, val: u8) {
        self.regs[reg.idx()] = val;
    }

    /// Cell pointed to by the `r1:r0` pair, wrapped to 12 bits.
    fn ptr(&self) -> usize {
        (((self.get(Reg::PTR_HI) as usize) << 8) | self.get(Reg::PTR_LO) as usize) & 0xFFF
    }

    /// Little-endian word at `pc`. Bytes past the end of memory read as zero.
    pub fn fetch(&self) -> u16 {
        let pc = self.pc as usize;
        let lo = self.memory.get(pc).copied().unwrap_or(0);
        let hi = self.memory.get(pc + 1).copied().unwrap_or(0);
        u16::from_le_bytes([lo, hi])
    }

    pub fn is_running(&self) -> bool {
        (self.pc as usize) < self.memory.len()
    }
}

impl State {
    /// `memory` is zero-padded or cut to [`MEMORY_SIZE`].
    pub fn new(mut memory: Vec<u8>) -> Self {
        memory.resize(MEMORY_SIZE, 0);
        State {
            pc: 0,
            flag: false,
            regs: [0; 16],
            memory,
            output: vec![],
            input_ptr: 0,
            backtrace: vec![],
            tick: 0,
        }
    }

    /// Runs the instruction at `pc`. `Ok(false)` once the machine halts.
    pub fn exec(&mut self, input: &[u8]) -> Result<bool, Fault> {
        let at = self.pc;
        let word = Word::decode(self.fetch());
        self.pc = self.pc.wrapping_add(2);

        let inst = Inst::from_word(word).ok_or(Fault::UnsupportedOperation {
            pc: at,
            class: word.class,
            op: word.op,
        })?;

        match inst {
            Inst::Halt => return Ok(false),
            Inst::SetImm(rd, val) => self.set(rd, val),
            Inst::SetReg(rd, rs) => self.set(rd, self.get(rs)),
            Inst::Locate(addr) => {
                self.set(Reg::PTR_HI, ((addr & 0x0F00) >> 8) as u8);
                self.set(Reg::PTR_LO, (addr & 0xFF) as u8);
            }
            Inst::Load(rd) => self.set(rd, self.memory[self.ptr()]),
            Inst::Store(rs) => {
                let addr = self.ptr();
                self.memory[addr] = self.get(rs);
            }
            Inst::Alu(op, r1, r2) => self.set(r1, alu(op, self.get(r1), self.get(r2))),
            Inst::Read(rd) => match input.get(self.input_ptr) {
                Some(&byte) => {
                    self.set(rd, byte);
                    self.input_ptr += 1;
                }
                None => return Err(Fault::ReadAfterEndOfInput { pc: at }),
            },
            Inst::Write(rs) => self.output.push(self.get(rs)),
            Inst::Cmp(op, r1, r2) => self.flag = cmp(op, self.get(r1), self.get(r2)),
            Inst::Jump(addr) => self.pc = addr,
            Inst::JumpIf(addr) => {
                if self.flag {
                    self.pc = addr;
                }
            }
            Inst::Call(addr) => {
                if self.backtrace.len() >= RECURSION_LIMIT {
                    return Err(Fault::RecursionLimit {
                        limit: RECURSION_LIMIT,
                    });
                }
                self.backtrace.push(self.pc);
                self.pc = addr;
            }
            Inst::Ret => match self.backtrace.pop() {
                Some(ret) => self.pc = ret,
                None => return Err(Fault::NoReturnAddress { pc: at }),
            },
            Inst::Nop => {}
        }
        Ok(true)
    }
}

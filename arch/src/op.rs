use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Low nibble of an instruction word.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TryFromPrimitive, IntoPrimitive, Display,
)]
#[repr(u8)]
pub enum OpClass {
    Halt = 0x0,
    SetImm = 0x1,
    SetReg = 0x2,
    Locate = 0x3,
    LoadStore = 0x4,
    Alu = 0x5,
    Io = 0x6,
    Cmp = 0x7,
    Jump = 0x8,
    JumpIf = 0x9,
    Call = 0xA,
    Ret = 0xB,
    Nop = 0xC,
}

/// Sub-op of [`OpClass::LoadStore`].
pub struct Mem;

impl Mem {
    pub const LOAD: u8 = 0;
    pub const STORE: u8 = 1;
}

/// Sub-op of [`OpClass::Io`].
pub struct Io;

impl Io {
    pub const READ: u8 = 0;
    pub const WRITE: u8 = 1;
}

// ----------------------------------------------------------------------------
// Word

/// Every field interpretation of one 16-bit instruction word.
/// Which ones matter depends on `class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    pub class: u8,
    pub op: u8,
    pub value: u8,
    pub address: u16,
    pub arg1: u8,
    pub arg2: u8,
}

impl Word {
    pub fn decode(bin: u16) -> Self {
        Word {
            class: (bin & 0xF) as u8,
            op: ((bin >> 4) & 0xF) as u8,
            value: (bin >> 8) as u8,
            address: bin >> 4,
            arg1: ((bin >> 8) & 0xF) as u8,
            arg2: ((bin >> 12) & 0xF) as u8,
        }
    }

    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self::decode(u16::from_le_bytes(bytes))
    }
}

pub fn enc_nibs(nib1: u8, nib2: u8, nib3: u8, nib4: u8) -> u16 {
    (nib1 as u16 & 0xF)
        | ((nib2 as u16 & 0xF) << 4)
        | ((nib3 as u16 & 0xF) << 8)
        | ((nib4 as u16 & 0xF) << 12)
}

pub fn enc_nibs_byte(nib1: u8, nib2: u8, byte: u8) -> u16 {
    (nib1 as u16 & 0xF) | ((nib2 as u16 & 0xF) << 4) | ((byte as u16) << 8)
}

pub fn enc_nib_addr(nib: u8, addr: u16) -> u16 {
    (nib as u16 & 0xF) | ((addr & 0x0FFF) << 4)
}

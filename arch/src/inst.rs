use crate::{
    alu::Alu,
    cmp::Cmp,
    op::{enc_nib_addr, enc_nibs, enc_nibs_byte, Io, Mem, OpClass, Word},
    reg::Reg,
};

use color_print::cformat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inst {
    Halt,
    SetImm(Reg, u8),
    SetReg(Reg, Reg),
    Locate(u16),
    Load(Reg),
    Store(Reg),
    Alu(Alu, Reg, Reg),
    Read(Reg),
    Write(Reg),
    Cmp(Cmp, Reg, Reg),
    Jump(u16),
    JumpIf(u16),
    Call(u16),
    Ret,
    Nop,
}

impl Inst {
    pub fn class(&self) -> OpClass {
        match self {
            Inst::Halt => OpClass::Halt,
            Inst::SetImm(..) => OpClass::SetImm,
            Inst::SetReg(..) => OpClass::SetReg,
            Inst::Locate(_) => OpClass::Locate,
            Inst::Load(_) | Inst::Store(_) => OpClass::LoadStore,
            Inst::Alu(..) => OpClass::Alu,
            Inst::Read(_) | Inst::Write(_) => OpClass::Io,
            Inst::Cmp(..) => OpClass::Cmp,
            Inst::Jump(_) => OpClass::Jump,
            Inst::JumpIf(_) => OpClass::JumpIf,
            Inst::Call(_) => OpClass::Call,
            Inst::Ret => OpClass::Ret,
            Inst::Nop => OpClass::Nop,
        }
    }

    pub fn to_bin(&self) -> u16 {
        let class: u8 = self.class().into();
        match *self {
            Inst::Halt | Inst::Ret | Inst::Nop => class as u16,
            Inst::SetImm(rd, val) => enc_nibs_byte(class, rd.into(), val),
            Inst::SetReg(rd, rs) => enc_nibs_byte(class, rd.into(), rs.into()),
            Inst::Locate(addr) | Inst::Jump(addr) | Inst::JumpIf(addr) | Inst::Call(addr) => {
                enc_nib_addr(class, addr)
            }
            Inst::Load(rd) => enc_nibs(class, Mem::LOAD, rd.into(), 0),
            Inst::Store(rs) => enc_nibs(class, Mem::STORE, rs.into(), 0),
            Inst::Alu(op, r1, r2) => enc_nibs(class, op.into(), r1.into(), r2.into()),
            Inst::Read(rd) => enc_nibs(class, Io::READ, rd.into(), 0),
            Inst::Write(rs) => enc_nibs(class, Io::WRITE, rs.into(), 0),
            Inst::Cmp(op, r1, r2) => enc_nibs(class, op.into(), r1.into(), r2.into()),
        }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        self.to_bin().to_le_bytes()
    }

    /// `None` when the class or sub-op has no meaning.
    pub fn from_word(word: Word) -> Option<Inst> {
        let r1 = Reg::from_nibble(word.arg1);
        let r2 = Reg::from_nibble(word.arg2);
        let inst = match OpClass::try_from(word.class).ok()? {
            OpClass::Halt => Inst::Halt,
            OpClass::SetImm => Inst::SetImm(Reg::from_nibble(word.op), word.value),
            OpClass::SetReg => Inst::SetReg(Reg::from_nibble(word.op), r1),
            OpClass::Locate => Inst::Locate(word.address),
            OpClass::LoadStore => match word.op {
                Mem::LOAD => Inst::Load(r1),
                Mem::STORE => Inst::Store(r1),
                _ => return None,
            },
            OpClass::Alu => Inst::Alu(Alu::try_from(word.op).ok()?, r1, r2),
            OpClass::Io => match word.op {
                Io::READ => Inst::Read(r1),
                Io::WRITE => Inst::Write(r1),
                _ => return None,
            },
            OpClass::Cmp => Inst::Cmp(Cmp::try_from(word.op).ok()?, r1, r2),
            OpClass::Jump => Inst::Jump(word.address),
            OpClass::JumpIf => Inst::JumpIf(word.address),
            OpClass::Call => Inst::Call(word.address),
            OpClass::Ret => Inst::Ret,
            OpClass::Nop => Inst::Nop,
        };
        Some(inst)
    }

    pub fn from_bin(bin: u16) -> Option<Inst> {
        Self::from_word(Word::decode(bin))
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Inst::Halt => "STOPP",
            Inst::SetImm(..) | Inst::SetReg(..) => "SETT",
            Inst::Locate(_) => "FINN",
            Inst::Load(_) => "LAST",
            Inst::Store(_) => "LAGR",
            Inst::Alu(op, ..) => op.mnemonic(),
            Inst::Read(_) => "LES",
            Inst::Write(_) => "SKRIV",
            Inst::Cmp(op, ..) => op.mnemonic(),
            Inst::Jump(_) => "HOPP",
            Inst::JumpIf(_) => "BHOPP",
            Inst::Call(_) => "TUR",
            Inst::Ret => "RETUR",
            Inst::Nop => "NOPE",
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! rr {
            ($name:expr, $r1:expr, $r2:expr) => {
                cformat!("<r>{:<7}</><b>{:<4} {:<4}</>", $name, $r1, $r2)
            };
        }

        macro_rules! ri {
            ($name:expr, $r1:expr, $imm:expr) => {
                cformat!("<r>{:<7}</><b>{:<4}</> <y>0x{:0>2X}</>", $name, $r1, $imm)
            };
        }

        macro_rules! addr {
            ($name:expr, $addr:expr) => {
                cformat!("<r>{:<7}</><y>0x{:0>3X}</>", $name, $addr)
            };
        }

        let name = self.mnemonic();
        match self {
            Inst::Halt | Inst::Ret | Inst::Nop => rr!(name, "", ""),
            Inst::SetImm(rd, val) => ri!(name, rd, val),
            Inst::SetReg(rd, rs) => rr!(name, rd, rs),
            Inst::Locate(addr) | Inst::Jump(addr) | Inst::JumpIf(addr) | Inst::Call(addr) => {
                addr!(name, addr)
            }
            Inst::Load(r) | Inst::Store(r) | Inst::Read(r) | Inst::Write(r) => rr!(name, r, ""),
            Inst::Alu(_, r1, r2) | Inst::Cmp(_, r1, r2) => rr!(name, r1, r2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_inst {
        ($($name:ident: $inst:expr => $bin:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let inst = $inst;
                    assert_eq!(inst.to_bin(), $bin);
                    assert_eq!(Inst::from_bin($bin), Some(inst));
                }
            )*
        }
    }

    test_inst! {
        test_halt: Inst::Halt => 0x0000,
        test_set_imm: Inst::SetImm(Reg::R3, 9) => 0x0931,
        test_set_reg: Inst::SetReg(Reg::R2, Reg::R7) => 0x0722,
        test_locate: Inst::Locate(0x123) => 0x1233,
        test_load: Inst::Load(Reg::R5) => 0x0504,
        test_store: Inst::Store(Reg::R5) => 0x0514,
        test_sub: Inst::Alu(Alu::Sub, Reg::R1, Reg::R2) => 0x2165,
        test_read: Inst::Read(Reg::R4) => 0x0406,
        test_write: Inst::Write(Reg::R4) => 0x0416,
        test_ge: Inst::Cmp(Cmp::Ge, Reg::R15, Reg::R0) => 0x0F57,
        test_jump: Inst::Jump(0xFFF) => 0xFFF8,
        test_jump_if: Inst::JumpIf(0x010) => 0x0109,
        test_call: Inst::Call(0x0A0) => 0x0A0A,
        test_ret: Inst::Ret => 0x000B,
        test_nop: Inst::Nop => 0x000C,
    }

    #[test]
    fn set_imm_fields() {
        let word = Word::decode(Inst::SetImm(Reg::R3, 9).to_bin());
        assert_eq!(word.class, 1);
        assert_eq!(word.op, 3);
        assert_eq!(word.value, 9);
    }

    #[test]
    fn undecodable() {
        assert_eq!(Inst::from_bin(0x0024), None);
        assert_eq!(Inst::from_bin(0x0075), None);
        assert_eq!(Inst::from_bin(0x0026), None);
        assert_eq!(Inst::from_bin(0x0067), None);
        assert_eq!(Inst::from_bin(0x000D), None);
        assert_eq!(Inst::from_bin(0xFFFF), None);
    }
}

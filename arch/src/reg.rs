use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumIter,
    Display,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Reg {
    #[default]
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

impl Reg {
    /// Pointer pair used by LAST/LAGR: `r1` holds the high nibble, `r0` the low byte.
    pub const PTR_LO: Reg = Reg::R0;
    pub const PTR_HI: Reg = Reg::R1;

    /// `r` followed by a decimal index in `0..=15`.
    pub fn parse(s: &str) -> Option<Self> {
        let num = s.strip_prefix('r')?;
        if num.is_empty() || !num.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match num.parse::<u8>() {
            Ok(idx) if idx < 16 => Some(Reg::from(idx)),
            _ => None,
        }
    }

    /// Register selected by the low four bits of `nib`.
    pub fn from_nibble(nib: u8) -> Self {
        Reg::from(nib & 0xF)
    }

    pub fn idx(self) -> usize {
        u8::from(self) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parse_all_registers() {
        for (idx, reg) in Reg::iter().enumerate() {
            assert_eq!(Reg::parse(&format!("r{idx}")), Some(reg));
            assert_eq!(reg.idx(), idx);
            assert_eq!(reg.to_string(), format!("r{idx}"));
        }
    }

    #[test]
    fn parse_rejects() {
        for s in ["r16", "r", "R1", "x1", "1", "r-1", "r1x", "", "r256"] {
            assert_eq!(Reg::parse(s), None, "{s}");
        }
    }

    #[test]
    fn nibble() {
        assert_eq!(Reg::from_nibble(0x3), Reg::R3);
        assert_eq!(Reg::from_nibble(0xFA), Reg::R10);
    }
}

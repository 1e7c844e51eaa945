use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
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
    TryFromPrimitive,
    IntoPrimitive,
    EnumIter,
    Display,
)]
#[repr(u8)]
pub enum Alu {
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Add,
    Sub,
}

static ALU_STR: Lazy<BiMap<Alu, &'static str>> = Lazy::new(|| {
    let mut map = BiMap::new();
    map.insert(Alu::And, "OG");
    map.insert(Alu::Or, "ELLER");
    map.insert(Alu::Xor, "XELLER");
    map.insert(Alu::Shl, "VSKIFT");
    map.insert(Alu::Shr, "HSKIFT");
    map.insert(Alu::Add, "PLUSS");
    map.insert(Alu::Sub, "MINUS");
    map
});

impl Alu {
    pub fn parse(mnemonic: &str) -> Option<Self> {
        ALU_STR.get_by_right(mnemonic).copied()
    }

    pub fn mnemonic(&self) -> &'static str {
        ALU_STR.get_by_left(self).copied().unwrap_or("?")
    }
}

/// 8-bit ALU. Arithmetic wraps; shifts of 8 or more clear the register.
pub fn alu(op: Alu, a: u8, b: u8) -> u8 {
    use Alu::*;
    match op {
        And => a & b,
        Or => a | b,
        Xor => a ^ b,
        Shl => a.checked_shl(b as u32).unwrap_or(0),
        Shr => a.checked_shr(b as u32).unwrap_or(0),
        Add => a.wrapping_add(b),
        Sub => a.wrapping_sub(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn mnemonics() {
        for op in Alu::iter() {
            assert_eq!(Alu::parse(op.mnemonic()), Some(op));
        }
        assert_eq!(Alu::parse("og"), None);
        assert_eq!(Alu::try_from(6u8).ok(), Some(Alu::Sub));
        assert!(Alu::try_from(7u8).is_err());
    }

    macro_rules! test_alu {
        ($($name:ident: $op:expr, $a:expr, $b:expr => $expect:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(alu($op, $a, $b), $expect);
                }
            )*
        }
    }

    test_alu! {
        and: Alu::And, 0b1100, 0b1010 => 0b1000,
        or: Alu::Or, 0b1100, 0b1010 => 0b1110,
        xor: Alu::Xor, 0b1100, 0b1010 => 0b0110,
        shl: Alu::Shl, 0x81, 1 => 0x02,
        shl_wide: Alu::Shl, 0xFF, 8 => 0,
        shr: Alu::Shr, 0x81, 7 => 0x01,
        shr_wide: Alu::Shr, 0xFF, 200 => 0,
        add_wrap: Alu::Add, 200, 100 => 44,
        sub_wrap: Alu::Sub, 1, 2 => 255,
    }
}

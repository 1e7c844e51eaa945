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
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

static CMP_STR: Lazy<BiMap<Cmp, &'static str>> = Lazy::new(|| {
    let mut map = BiMap::new();
    map.insert(Cmp::Eq, "LIK");
    map.insert(Cmp::Ne, "ULIK");
    map.insert(Cmp::Lt, "ME");
    map.insert(Cmp::Le, "MEL");
    map.insert(Cmp::Gt, "SE");
    map.insert(Cmp::Ge, "SEL");
    map
});

impl Cmp {
    pub fn parse(mnemonic: &str) -> Option<Self> {
        CMP_STR.get_by_right(mnemonic).copied()
    }

    pub fn mnemonic(&self) -> &'static str {
        CMP_STR.get_by_left(self).copied().unwrap_or("?")
    }
}

pub fn cmp(op: Cmp, a: u8, b: u8) -> bool {
    use Cmp::*;
    match op {
        Eq => a == b,
        Ne => a != b,
        Lt => a < b,
        Le => a <= b,
        Gt => a > b,
        Ge => a >= b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn mnemonics() {
        for op in Cmp::iter() {
            assert_eq!(Cmp::parse(op.mnemonic()), Some(op));
        }
        assert_eq!(Cmp::try_from(5u8).ok(), Some(Cmp::Ge));
        assert!(Cmp::try_from(6u8).is_err());
    }

    #[test]
    fn compare() {
        assert!(cmp(Cmp::Eq, 3, 3));
        assert!(cmp(Cmp::Ne, 3, 4));
        assert!(cmp(Cmp::Lt, 3, 4));
        assert!(!cmp(Cmp::Lt, 4, 4));
        assert!(cmp(Cmp::Le, 4, 4));
        assert!(cmp(Cmp::Gt, 255, 0));
        assert!(cmp(Cmp::Ge, 0, 0));
        assert!(!cmp(Cmp::Ge, 0, 1));
    }
}

use s8arch::{alu::Alu, cmp::Cmp, image::ADDR_MAX, inst::Inst, reg::Reg};

use crate::error::Error;
use crate::label::Labels;
use crate::line::{Tokens, DATA};

// ----------------------------------------------------------------------------
// Operands

/// `Ok(None)` when `token` is not written as a number at all.
pub fn literal(token: &str, max: u16) -> Result<Option<u16>, Error> {
    let (digits, radix) = match token.strip_prefix("0x") {
        Some(hex) => (hex, 16),
        None => (token, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Ok(None);
    }
    match u32::from_str_radix(digits, radix) {
        Ok(val) if val <= max as u32 => Ok(Some(val as u16)),
        _ => Err(Error::ValueOutOfRange {
            token: token.to_string(),
            max,
        }),
    }
}

pub fn reg(token: &str) -> Result<Reg, Error> {
    Reg::parse(token).ok_or_else(|| Error::InvalidRegister(token.to_string()))
}

pub fn byte(token: &str) -> Result<u8, Error> {
    match literal(token, u8::MAX as u16)? {
        Some(val) => Ok(val as u8),
        None => Err(Error::UnexpectedToken(token.to_string())),
    }
}

/// Literal address or label.
pub fn addr(token: &str, labels: &Labels) -> Result<u16, Error> {
    if let Some(val) = literal(token, ADDR_MAX)? {
        return Ok(val);
    }
    match labels.get(token) {
        Some(val) if val <= ADDR_MAX as usize => Ok(val as u16),
        Some(_) => Err(Error::ValueOutOfRange {
            token: token.to_string(),
            max: ADDR_MAX,
        }),
        None => Err(Error::UnexpectedToken(token.to_string())),
    }
}

// ----------------------------------------------------------------------------
// Encoder

pub fn encode(tokens: &Tokens, labels: &Labels) -> Result<Vec<u8>, Error> {
    let Tokens { op, args } = tokens;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    if *op == DATA {
        return args.iter().map(|arg| byte(arg)).collect();
    }

    // Check argument count and hand back the arguments as an array
    // Example: args!(2) -> [&str; 2]
    macro_rules! args {
        ($n:literal) => {{
            let arr: [&str; $n] = args.as_slice().try_into().map_err(|_| Error::ArgumentCount {
                op: op.to_string(),
                expected: $n,
                args: args.iter().map(|arg| arg.to_string()).collect(),
            })?;
            arr
        }};
    }

    let inst = match *op {
        "STOPP" => {
            args!(0);
            Inst::Halt
        }
        "SETT" => {
            let [rd, src] = args!(2);
            let rd = reg(rd)?;
            match literal(src, u8::MAX as u16)? {
                Some(val) => Inst::SetImm(rd, val as u8),
                None => Inst::SetReg(rd, reg(src)?),
            }
        }
        "FINN" => {
            let [a] = args!(1);
            Inst::Locate(addr(a, labels)?)
        }
        "LAST" => {
            let [r] = args!(1);
            Inst::Load(reg(r)?)
        }
        "LAGR" => {
            let [r] = args!(1);
            Inst::Store(reg(r)?)
        }
        "LES" => {
            let [r] = args!(1);
            Inst::Read(reg(r)?)
        }
        "SKRIV" => {
            let [r] = args!(1);
            Inst::Write(reg(r)?)
        }
        "HOPP" => {
            let [a] = args!(1);
            Inst::Jump(addr(a, labels)?)
        }
        "BHOPP" => {
            let [a] = args!(1);
            Inst::JumpIf(addr(a, labels)?)
        }
        "TUR" => {
            let [a] = args!(1);
            Inst::Call(addr(a, labels)?)
        }
        "RETUR" => {
            args!(0);
            Inst::Ret
        }
        "NOPE" => {
            args!(0);
            Inst::Nop
        }
        _ => {
            if let Some(alu) = Alu::parse(op) {
                let [r1, r2] = args!(2);
                Inst::Alu(alu, reg(r1)?, reg(r2)?)
            } else if let Some(cmp) = Cmp::parse(op) {
                let [r1, r2] = args!(2);
                Inst::Cmp(cmp, reg(r1)?, reg(r2)?)
            } else {
                return Err(Error::UnexpectedToken(op.to_string()));
            }
        }
    };

    Ok(inst.to_bytes().to_vec())
}

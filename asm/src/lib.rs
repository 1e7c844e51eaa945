pub mod encode;
pub mod error;
pub mod label;
pub mod line;
pub mod listing;

use std::collections::BTreeMap;

use s8arch::image::MAGIC;

use error::LineError;
use label::{Descriptor, Labels};

/// Address -> originating source line, one entry per data/instruction line.
pub type DebugMap = BTreeMap<usize, Descriptor>;

#[derive(Debug, Clone)]
pub struct Program {
    /// Magic tag followed by the encoded bytes
    pub image: Vec<u8>,
    pub debug: DebugMap,
    pub labels: Labels,
}

/// Turns source text into an executable image. All or nothing: the first
/// bad line aborts assembly.
pub fn assemble(source: &str) -> Result<Program, LineError> {
    let (labels, descs) = label::preprocess(source)?;

    let encoded = descs
        .iter()
        .map(|desc| {
            encode::encode(&line::tokenize(&desc.raw), &labels).map_err(|err| desc.error(err))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let image = MAGIC.iter().copied().chain(encoded.into_iter().flatten()).collect();
    let debug = descs.into_iter().map(|desc| (desc.address, desc)).collect();

    Ok(Program {
        image,
        debug,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn nops() {
        for n in [0, 1, 5, 100] {
            let source = "NOPE\n".repeat(n);
            let program = assemble(&source).unwrap();
            assert_eq!(program.image.len(), 7 + 2 * n);
            assert_eq!(program.debug.len(), n);
        }
    }

    #[test]
    fn image() {
        let program = assemble("SETT r0, 5\nSKRIV r0\nSTOPP").unwrap();
        assert_eq!(
            program.image,
            vec![0x2E, 0x53, 0x4C, 0x45, 0x44, 0x45, 0x38, 0x01, 0x05, 0x16, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn forward_reference() {
        let fwd = assemble("HOPP end\nNOPE\nend:\nSTOPP").unwrap();
        let bwd = assemble("NOPE\nNOPE\nend:\nSTOPP\nHOPP end").unwrap();
        assert_eq!(&fwd.image[7..9], &bwd.image[13..15]);
        assert_eq!(fwd.labels.get("end"), Some(4));
    }

    #[test]
    fn debug_map() {
        let program = assemble("; hi\nstart:\n  NOPE\n  .DATA 1, 2\n  STOPP ; done").unwrap();
        let placed: Vec<_> = program
            .debug
            .iter()
            .map(|(addr, desc)| (*addr, desc.line, desc.raw.as_str()))
            .collect();
        assert_eq!(
            placed,
            vec![(0, 2, "NOPE"), (2, 3, ".DATA 1, 2"), (4, 4, "STOPP ; done")]
        );
    }

    #[test]
    fn undefined_label() {
        let err = assemble("NOPE\nHOPP missing").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.raw, "HOPP missing");
        assert_eq!(err.error, Error::UnexpectedToken("missing".to_string()));
        assert_eq!(err.to_string(), "line 2: Unexpected token: `missing`");
    }
}

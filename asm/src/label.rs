use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, LineError};
use crate::line::{self, Kind};

/// One data or instruction line, placed in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// 0-based line index
    pub line: usize,
    pub address: usize,
    pub raw: String,
}

impl Descriptor {
    pub fn error(&self, error: Error) -> LineError {
        LineError {
            line: self.line,
            raw: self.raw.clone(),
            error,
        }
    }
}

// name -> address, in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels(IndexMap<String, usize>);

impl Labels {
    pub fn new() -> Self {
        Labels(IndexMap::new())
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Address assignment pass.
///
/// Every label is bound before anything is encoded, so forward references
/// resolve like backward ones.
pub fn preprocess(source: &str) -> Result<(Labels, Vec<Descriptor>), LineError> {
    let mut labels = IndexMap::new();
    let mut descs = vec![];
    let mut address: usize = 0;

    for (idx, raw) in source.lines().enumerate() {
        let code = raw.trim();
        match line::classify(code) {
            Kind::Whitespace | Kind::Comment => {}
            Kind::Label => {
                let name = line::label_name(line::strip_comment(code).trim()).unwrap_or(code);
                if labels.insert(name.to_string(), address).is_some() {
                    return Err(LineError {
                        line: idx,
                        raw: code.to_string(),
                        error: Error::RedefinedLabel(name.to_string()),
                    });
                }
            }
            Kind::Data => {
                descs.push(Descriptor {
                    line: idx,
                    address,
                    raw: code.to_string(),
                });
                address += line::tokenize(code).args.len();
            }
            Kind::Instruction => {
                descs.push(Descriptor {
                    line: idx,
                    address,
                    raw: code.to_string(),
                });
                address += 2;
            }
        }
    }

    Ok((Labels(labels), descs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses() {
        let source = "\
; header
start:
    SETT r0, 1
    .DATA 1, 2, 3

data:
    .DATA 0x10
end:
    STOPP
";
        let (labels, descs) = preprocess(source).unwrap();
        assert_eq!(labels.get("start"), Some(0));
        assert_eq!(labels.get("data"), Some(5));
        assert_eq!(labels.get("end"), Some(6));
        assert_eq!(labels.get("nope"), None);

        let placed: Vec<_> = descs.iter().map(|d| (d.line, d.address)).collect();
        assert_eq!(placed, vec![(2, 0), (3, 2), (6, 5), (8, 6)]);
        assert_eq!(descs[0].raw, "SETT r0, 1");
    }

    #[test]
    fn label_order() {
        let (labels, _) = preprocess("b:\nNOPE\na:\nNOPE").unwrap();
        let names: Vec<_> = labels.iter().collect();
        assert_eq!(names, vec![("b", 0), ("a", 2)]);
    }

    #[test]
    fn redefined_label() {
        let err = preprocess("x:\nNOPE\nx:\nNOPE").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.error, Error::RedefinedLabel("x".to_string()));
    }
}

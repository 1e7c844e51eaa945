use color_print::cformat;
use s8arch::{image::MAGIC, inst::Inst};

use crate::line::{self, Kind};
use crate::Program;

/// Address, encoded bytes and source for every line of `source`.
pub fn cformat(path: &str, source: &str, program: &Program) -> Vec<String> {
    let payload = &program.image[MAGIC.len().min(program.image.len())..];

    let mut out = vec![format!(
        "{}+------[{}]{}",
        "-".repeat(19),
        path,
        "-".repeat(45_usize.saturating_sub(path.len()))
    )];

    let mut placed = program.debug.iter().peekable();
    for (idx, raw) in source.lines().enumerate() {
        let line_num = idx + 1;
        let kind = line::classify(raw);

        let desc = match placed.peek() {
            Some((_, desc)) if desc.line == idx => placed.next(),
            _ => None,
        };

        let body = match desc {
            Some((&addr, _)) => {
                let end = placed
                    .peek()
                    .map(|&(&next, _)| next)
                    .unwrap_or(payload.len())
                    .min(payload.len());
                let bytes = payload.get(addr..end).unwrap_or_default();
                let hex: Vec<String> = bytes.iter().take(4).map(|b| format!("{:02X}", b)).collect();
                let more = if bytes.len() > 4 { "+" } else { " " };
                let code = match (kind, bytes) {
                    (Kind::Instruction, &[lo, hi]) => match Inst::from_bin(u16::from_le_bytes([lo, hi])) {
                        Some(inst) => inst.cformat(),
                        None => cformat!("<r,s>??</>"),
                    },
                    _ => String::new(),
                };
                format!(
                    "[{}] {:<11}{}| {:>4}: {} {}",
                    cformat!("<g>{:03X}</>", addr),
                    hex.join(" "),
                    more,
                    line_num,
                    raw.trim(),
                    code
                )
            }
            None => {
                let text = match kind {
                    Kind::Label => cformat!("<g>{}</>", raw.trim()),
                    _ => raw.trim().to_string(),
                };
                format!("{:19}| {:>4}: {}", "", line_num, text)
            }
        };
        out.push(body);
    }
    out.push("-------------------+-----------------------------------------------------".to_string());
    out
}

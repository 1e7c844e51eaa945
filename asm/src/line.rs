// ----------------------------------------------------------------------------
// Classification

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Whitespace,
    Comment,
    Label,
    Data,
    Instruction,
}

pub const DATA: &str = ".DATA";

/// Everything before the first `;`.
pub fn strip_comment(raw: &str) -> &str {
    match raw.split_once(';') {
        Some((code, _)) => code,
        None => raw,
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, 'æ' | 'ø' | 'å' | 'Æ' | 'Ø' | 'Å' | '-' | '_')
}

/// `main:` -> `Some("main")`
pub fn label_name(code: &str) -> Option<&str> {
    let name = code.strip_suffix(':')?;
    if !name.is_empty() && name.chars().all(is_ident_char) {
        Some(name)
    } else {
        None
    }
}

fn is_data(code: &str) -> bool {
    match code.strip_prefix(DATA) {
        Some("") => true,
        Some(rest) if rest.starts_with(char::is_whitespace) => rest
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == 'x' || c == ',' || c.is_whitespace()),
        _ => false,
    }
}

pub fn classify(raw: &str) -> Kind {
    let line = raw.trim();
    if line.is_empty() {
        return Kind::Whitespace;
    }
    if line.starts_with(';') {
        return Kind::Comment;
    }
    let code = strip_comment(line).trim();
    if label_name(code).is_some() {
        Kind::Label
    } else if is_data(code) {
        Kind::Data
    } else {
        Kind::Instruction
    }
}

// ----------------------------------------------------------------------------
// Tokenizer

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    pub op: &'a str,
    pub args: Vec<String>,
}

/// `SETT r0, 5 ; hi` -> `SETT` + [`r0`, `5`]
///
/// Whitespace after the mnemonic is dropped before splitting on commas, so
/// `1 0` reads as `10`.
pub fn tokenize(raw: &str) -> Tokens<'_> {
    let code = strip_comment(raw).trim();
    let mut words = code.split_whitespace();
    let op = words.next().unwrap_or("");
    let joined: String = words.collect();
    let args = joined
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect();
    Tokens { op, args }
}

use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("`{op}` expects {expected} argument(s), got [{}]", .args.join(", "))]
    ArgumentCount {
        op: String,
        expected: usize,
        args: Vec<String>,
    },

    #[error("Unexpected token: `{0}`")]
    UnexpectedToken(String),

    #[error("Invalid register: `{0}`")]
    InvalidRegister(String),

    #[error("Value out of range: `{token}` (max 0x{max:X})")]
    ValueOutOfRange { token: String, max: u16 },

    #[error("Re-defined label: `{0}`")]
    RedefinedLabel(String),
}

/// An [`Error`] pinned to the source line that raised it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {}: {error}", .line + 1)]
pub struct LineError {
    /// 0-based line index
    pub line: usize,
    pub raw: String,
    #[source]
    pub error: Error,
}

impl LineError {
    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str) {
        cprintln!("<red,bold>error</>: {}", self.error);

        let line_num = self.line + 1;
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_num, self.raw);
        cprintln!("      <blue>|</>");
    }
}

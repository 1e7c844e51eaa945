use thiserror::Error;

/// Raised before the first instruction runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Program does not fit in memory: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported executable")]
    UnsupportedExecutable,
}

/// Raised mid-run. The run is over once one of these comes back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("Segmentation fault: unsupported operation {class:X}/{op:X} at 0x{pc:03X}")]
    UnsupportedOperation { pc: u16, class: u8, op: u8 },

    #[error("Segmentation fault: no return address at 0x{pc:03X}")]
    NoReturnAddress { pc: u16 },

    #[error("Recursion limit exceeded: more than {limit} nested calls")]
    RecursionLimit { limit: usize },

    #[error("Read after end of input at 0x{pc:03X}")]
    ReadAfterEndOfInput { pc: u16 },

    #[error("Resources exhausted: killed after {max_ticks} ticks")]
    ResourcesExhausted { max_ticks: u64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Fault(#[from] Fault),
}

/// Hook configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open file: {0}")]
    Open(String, #[source] std::io::Error),

    #[error("Failed to parse file: {0}")]
    Parse(String, #[source] serde_yaml::Error),
}

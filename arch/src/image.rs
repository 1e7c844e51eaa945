/// Every executable starts with this tag (`.SLEDE8`).
pub const MAGIC: [u8; 7] = [0x2E, 0x53, 0x4C, 0x45, 0x44, 0x45, 0x38];

/// Total addressable memory, shared by program and data.
pub const MEMORY_SIZE: usize = 4096;

/// Largest value an address field can carry.
pub const ADDR_MAX: u16 = 0x0FFF;

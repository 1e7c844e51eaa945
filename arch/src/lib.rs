pub mod alu;
pub mod cmp;
pub mod image;
pub mod inst;
pub mod op;
pub mod reg;

pub mod alu;
pub mod asm;
pub mod dest;
pub mod inst;
pub mod jump;
pub mod reg;

pub mod assembler;
pub mod error;
pub mod parser;
pub mod symbols;
pub mod util;

pub use assembler::{assemble, encode, Assembler};
pub use error::Error;
pub use symbols::{SymbolKind, SymbolTable};

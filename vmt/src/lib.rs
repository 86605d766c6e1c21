pub mod command;
pub mod error;
pub mod translator;
pub mod util;

pub use command::{Arith, Command, Segment};
pub use error::Error;
pub use translator::{translate, Translator};

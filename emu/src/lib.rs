pub mod error;
pub mod hooks;
pub mod model;
pub mod util;

pub use error::Error;
pub use model::State;

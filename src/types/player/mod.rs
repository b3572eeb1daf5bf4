mod command;
pub use command::*;

mod error;
pub use error::*;

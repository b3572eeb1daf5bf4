mod message;
pub use message::*;

mod room;
pub use room::*;

pub mod backend;
pub mod chat;
pub mod course;
pub mod player;
pub mod profile;
pub mod team;

mod empty_string_as_none;
pub use empty_string_as_none::*;

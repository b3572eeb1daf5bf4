pub mod common;
pub mod ctx;

pub mod chat_room;
pub mod course_catalog;
pub mod course_details;
pub mod player;
pub mod team;

mod profile;
pub use profile::*;

mod user;
pub use user::*;

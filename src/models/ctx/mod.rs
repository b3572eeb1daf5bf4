mod update_profile;
use update_profile::*;

mod update_progress;
use update_progress::*;

mod error;
pub use error::*;

mod ctx;
pub use ctx::*;

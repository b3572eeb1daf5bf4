mod course;
pub use course::*;

mod progress_bucket;
pub use progress_bucket::*;

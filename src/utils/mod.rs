pub mod error;
pub mod names;
pub mod path;

pub use error::{Result, TutorError};
pub use names::{generate_record_id, now_millis, sanitize, validate_session_name};
pub use path::debug_log;

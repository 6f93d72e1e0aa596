use crate::utils::{Result, TutorError};
use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;

const ID_SUFFIX_LEN: usize = 6;
const ID_SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Lowercase `s` and replace every character outside `[a-z0-9]` with `_`.
///
/// Used for all derived file and directory names inside a package. Distinct
/// inputs can sanitize identically; callers accept that collision risk.
pub fn sanitize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Opaque record id: millisecond epoch timestamp plus a short random suffix.
///
/// Unique within its generation scope; carries no ordering semantics.
pub fn generate_record_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_SUFFIX_CHARS[rng.gen_range(0..ID_SUFFIX_CHARS.len())] as char)
        .collect();
    format!("{}_{}", Utc::now().timestamp_millis(), suffix)
}

pub fn generate_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%Y%m%d-%H%M%S").to_string()
}

/// Current time as millisecond epoch, the unit every record timestamp uses.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn validate_session_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TutorError::invalid_session_name(
            name,
            "Session name cannot be empty",
        ));
    }

    if name.len() > 100 {
        return Err(TutorError::invalid_session_name(
            name,
            "Session name cannot be longer than 100 characters",
        ));
    }

    let valid_regex = Regex::new(r"^[^/\x00-\x1f]+$")
        .map_err(|e| TutorError::config_error(format!("Invalid regex: {}", e)))?;

    if !valid_regex.is_match(name) {
        return Err(TutorError::invalid_session_name(
            name,
            "Session name cannot contain slashes or control characters",
        ));
    }

    if name.trim() != name {
        return Err(TutorError::invalid_session_name(
            name,
            "Session name cannot start or end with whitespace",
        ));
    }

    Ok(())
}

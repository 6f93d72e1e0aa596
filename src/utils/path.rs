/// Debug logging helper
pub fn debug_log(message: &str) {
    if std::env::var("TUTOR_DEBUG").is_ok() {
        eprintln!("[TUTOR_DEBUG] {}", message);
    }
}

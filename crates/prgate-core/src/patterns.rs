//! Pattern compilation for configured conventions.
//!
//! Title, commit and branch conventions are plain regular expressions
//! supplied by the user. They are compiled exactly once, at configuration
//! time, so a bad pattern aborts the run up front instead of surfacing
//! mid-validation. An empty pattern means the convention is not configured
//! and the matching rule stays inactive.

use regex::Regex;

/// Compiles a user-supplied pattern.
///
/// Returns `Ok(None)` for the empty string, `Ok(Some(_))` for a valid
/// pattern and the compile error otherwise. Inline flags such as `(?i)`
/// are honoured as part of the pattern itself.
pub fn compile_pattern(raw: &str) -> Result<Option<Regex>, regex::Error> {
    if raw.is_empty() {
        return Ok(None);
    }
    Regex::new(raw).map(Some)
}

use regex::Regex;

/// Compile a built-in pattern. A broken literal is logged and disables the matcher that uses it
/// instead of aborting rendering.
pub(crate) fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| tracing::error!(pattern, error = %e, "built-in pattern failed to compile"))
        .ok()
}

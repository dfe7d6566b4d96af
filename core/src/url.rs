//! Joining a base URL with a relative endpoint path.

/// Join `base` and `path` with exactly one `/` at the seam.
///
/// Any number of trailing slashes on `base` and leading slashes on `path` are
/// collapsed, so `resolve("http://h/api/", "/tasks")` and
/// `resolve("http://h/api", "tasks")` both yield `http://h/api/tasks`.
pub fn resolve(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

use anyhow::Context as _;

/// Context line for a failed remote call
pub fn remote_context(operation: &str) -> String {
    format!("Remote call failed: {}", operation)
}

/// Wrap result with remote-call context
///
/// Only used at the application edge; the paging and polling core hands
/// remote errors back untouched.
pub fn with_remote_context<T, E>(result: Result<T, E>, operation: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(remote_context(operation))
}

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Whether an optional token has fired
pub fn is_cancelled(token: Option<&CancellationToken>) -> bool {
    token.is_some_and(CancellationToken::is_cancelled)
}

/// Drive `future` unless the token fires first.
///
/// Returns `None` when cancelled; the future is dropped, abandoning the
/// in-flight call.
pub async fn run_until_cancelled<F>(token: Option<&CancellationToken>, future: F) -> Option<F::Output>
where
    F: Future,
{
    match token {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => None,
            output = future => Some(output),
        },
        None => Some(future.await),
    }
}

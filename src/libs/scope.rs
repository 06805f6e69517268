//! Fetches bound to the lifetime of the view that issued them.
//!
//! Each view owns a [`ViewScope`]. Running a request through the scope races it
//! against the scope's cancellation token; once the view is torn down (scope
//! dropped or cancelled) a late response is discarded instead of applied.

use std::future::Future;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that is also cancelled when `parent` is.
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs `fut` unless the scope is cancelled first; `None` means the result was dropped.
    pub async fn run<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        if self.token.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!("view cancelled, dropping pending response");
                None
            }
            output = fut => {
                // the response may have raced with teardown
                if self.token.is_cancelled() { None } else { Some(output) }
            }
        }
    }
}

/// Dropping the owning view cancels everything it started.
pub struct ScopeGuard(ViewScope);

impl ScopeGuard {
    pub fn new(scope: ViewScope) -> Self {
        Self(scope)
    }

    pub fn scope(&self) -> &ViewScope {
        &self.0
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

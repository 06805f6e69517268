//! Route guard for views that require a session.
//!
//! The guard never caches its verdict: every [`RouteGuard::check`] asks the
//! session store again, since a 401 from any request can sign the user out
//! between two navigations.

use super::navigation::Route;
use super::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Unchecked,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The requested view may render.
    Allow(Route),
    /// Login is required; `from` is the view to resume afterwards.
    RedirectToLogin { from: Route },
}

#[derive(Debug, Default)]
pub struct RouteGuard {
    state: GuardState,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Evaluates `requested` against the current session and navigates accordingly.
    ///
    /// Unprotected views are always allowed. On a missing or invalid session the
    /// leftover auth data is cleared, the navigator switches to login and the
    /// requested view is preserved for
    /// [`Navigator::resume`](super::navigation::Navigator::resume).
    pub fn check(&mut self, session: &SessionStore, requested: Route) -> GuardDecision {
        let navigator = session.navigator();
        if !requested.is_protected() {
            navigator.navigate(requested);
            return GuardDecision::Allow(requested);
        }

        if session.is_authenticated() {
            self.state = GuardState::Authenticated;
            navigator.navigate(requested);
            return GuardDecision::Allow(requested);
        }

        self.state = GuardState::Unauthenticated;
        session.logout();
        navigator.redirect_to_login(Some(requested));
        tracing::debug!(requested = %requested, "route requires login");
        GuardDecision::RedirectToLogin { from: requested }
    }
}

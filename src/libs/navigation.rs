//! Views of the application and the navigator that moves between them.

use parking_lot::Mutex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Tasks,
    TaskNew,
    TaskEdit(i64),
    Weekly,
    Matrix,
    Roles,
    Profile,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Tasks => "/tasks".to_string(),
            Route::TaskNew => "/tasks/new".to_string(),
            Route::TaskEdit(id) => format!("/tasks/{}/edit", id),
            Route::Weekly => "/weekly".to_string(),
            Route::Matrix => "/matrix".to_string(),
            Route::Roles => "/roles".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    /// Every view except landing, login and register requires a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Landing | Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug)]
struct NavState {
    current: Route,
    return_to: Option<Route>,
}

/// Current view plus the view to resume after a forced login.
#[derive(Debug)]
pub struct Navigator {
    state: Mutex<NavState>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            state: Mutex::new(NavState {
                current: initial,
                return_to: None,
            }),
        }
    }

    pub fn current(&self) -> Route {
        self.state.lock().current
    }

    pub fn navigate(&self, route: Route) {
        let mut state = self.state.lock();
        tracing::debug!(from = %state.current, to = %route, "navigate");
        state.current = route;
    }

    /// Switches to the login view, remembering `from` when it is a protected view.
    ///
    /// An already preserved route is kept if `from` is `None`, so a 401 arriving
    /// while the guard has redirected does not lose the original request.
    pub fn redirect_to_login(&self, from: Option<Route>) {
        let mut state = self.state.lock();
        if let Some(from) = from.filter(Route::is_protected) {
            state.return_to = Some(from);
        }
        tracing::debug!(from = %state.current, return_to = ?state.return_to, "redirect to login");
        state.current = Route::Login;
    }

    pub fn return_to(&self) -> Option<Route> {
        self.state.lock().return_to
    }

    /// Consumes the preserved route and navigates there, defaulting to the dashboard.
    pub fn resume(&self) -> Route {
        let mut state = self.state.lock();
        let target = state.return_to.take().unwrap_or(Route::Dashboard);
        state.current = target;
        target
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Landing)
    }
}

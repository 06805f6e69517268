mod common;

#[cfg(test)]
mod tests {
    use super::common::Client;
    use lifescope::libs::guard::{GuardDecision, GuardState, RouteGuard};
    use lifescope::libs::navigation::{Navigator, Route};
    use lifescope::libs::storage::Storage;
    use test_context::{test_context, TestContext};

    struct GuardTestContext {
        client: Client,
        guard: RouteGuard,
    }

    impl TestContext for GuardTestContext {
        fn setup() -> Self {
            GuardTestContext {
                client: Client::new("http://127.0.0.1:9/api"),
                guard: RouteGuard::new(),
            }
        }
    }

    #[test_context(GuardTestContext)]
    #[test]
    fn test_public_routes_always_allowed(ctx: &mut GuardTestContext) {
        for route in [Route::Landing, Route::Login, Route::Register] {
            assert_eq!(ctx.guard.check(&ctx.client.session, route), GuardDecision::Allow(route));
        }
        assert_eq!(ctx.guard.state(), GuardState::Unchecked);
    }

    #[test_context(GuardTestContext)]
    #[test]
    fn test_redirects_and_preserves_requested_route(ctx: &mut GuardTestContext) {
        let decision = ctx.guard.check(&ctx.client.session, Route::TaskEdit(7));

        assert_eq!(decision, GuardDecision::RedirectToLogin { from: Route::TaskEdit(7) });
        assert_eq!(ctx.guard.state(), GuardState::Unauthenticated);
        assert_eq!(ctx.client.navigator.current(), Route::Login);
        assert_eq!(ctx.client.navigator.resume(), Route::TaskEdit(7));
        assert_eq!(ctx.client.navigator.current(), Route::TaskEdit(7));
    }

    #[test_context(GuardTestContext)]
    #[test]
    fn test_allows_with_session(ctx: &mut GuardTestContext) {
        ctx.client.sign_in("abc");

        let decision = ctx.guard.check(&ctx.client.session, Route::Matrix);

        assert_eq!(decision, GuardDecision::Allow(Route::Matrix));
        assert_eq!(ctx.guard.state(), GuardState::Authenticated);
        assert_eq!(ctx.client.navigator.current(), Route::Matrix);
    }

    #[test_context(GuardTestContext)]
    #[test]
    fn test_rechecks_on_every_navigation(ctx: &mut GuardTestContext) {
        ctx.client.sign_in("abc");
        assert!(matches!(ctx.guard.check(&ctx.client.session, Route::Tasks), GuardDecision::Allow(_)));

        // session lost between two navigations
        ctx.client.storage.remove("token").unwrap();

        assert!(matches!(
            ctx.guard.check(&ctx.client.session, Route::Weekly),
            GuardDecision::RedirectToLogin { from: Route::Weekly }
        ));
        assert!(ctx.client.storage.keys().is_empty());
    }

    #[test_context(GuardTestContext)]
    #[test]
    fn test_invalid_user_counts_as_signed_out(ctx: &mut GuardTestContext) {
        ctx.client.storage.set("token", "abc").unwrap();
        ctx.client.storage.set("user", r#"{"username": 5}"#).unwrap();

        let decision = ctx.guard.check(&ctx.client.session, Route::Profile);

        assert_eq!(decision, GuardDecision::RedirectToLogin { from: Route::Profile });
        assert!(ctx.client.storage.keys().is_empty());
    }

    #[test]
    fn test_resume_defaults_to_dashboard() {
        let navigator = Navigator::default();
        navigator.redirect_to_login(Some(Route::Login));
        assert_eq!(navigator.return_to(), None);
        assert_eq!(navigator.resume(), Route::Dashboard);
    }

    #[test]
    fn test_redirect_keeps_earlier_return_route() {
        let navigator = Navigator::default();
        navigator.redirect_to_login(Some(Route::Weekly));
        navigator.redirect_to_login(None);
        assert_eq!(navigator.return_to(), Some(Route::Weekly));
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::TaskEdit(3).path(), "/tasks/3/edit");
        assert_eq!(Route::Weekly.to_string(), "/weekly");
        assert!(!Route::Register.is_protected());
        assert!(Route::Roles.is_protected());
    }
}

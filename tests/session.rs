mod common;

#[cfg(test)]
mod tests {
    use super::common::{auth_json, Client, MockServer};
    use lifescope::libs::error::ApiError;
    use lifescope::libs::navigation::Route;
    use lifescope::libs::session::{validate_user, LoginCredentials, RegisterData, UserValidation};
    use lifescope::libs::storage::Storage;
    use serde_json::json;
    use test_context::{test_context, AsyncTestContext};

    struct SessionTestContext {
        server: MockServer,
        client: Client,
    }

    impl AsyncTestContext for SessionTestContext {
        async fn setup() -> Self {
            let server = MockServer::start().await;
            let client = Client::new(&server.base_url);
            SessionTestContext { server, client }
        }
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_login_persists_session(ctx: &mut SessionTestContext) {
        ctx.server.respond("POST", "/api/accounts/token/", 200, auth_json("abc"));

        let credentials = LoginCredentials::new("alice@example.com", "pw");
        let session = ctx.client.session.login(&ctx.client.api, &credentials).await.unwrap();

        assert_eq!(session.token, "abc");
        assert!(ctx.client.session.is_authenticated());
        assert_eq!(ctx.client.session.current_user(), Some(session.user));
        assert_eq!(ctx.client.storage.get("token").unwrap().as_deref(), Some("abc"));

        let sent = ctx.server.requests_to("POST", "/api/accounts/token/");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].authorization, None);
        assert_eq!(sent[0].body, Some(json!({ "email": "alice@example.com", "password": "pw" })));
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_auth_endpoints_ignore_stored_token(ctx: &mut SessionTestContext) {
        ctx.client.sign_in("stale-token");
        ctx.server.respond("POST", "/api/accounts/token/", 200, auth_json("abc"));
        ctx.server.respond("POST", "/api/accounts/register/", 201, auth_json("fresh"));

        let credentials = LoginCredentials::new("alice@example.com", "pw");
        ctx.client.session.login(&ctx.client.api, &credentials).await.unwrap();
        ctx.client.sign_in("stale-token");
        let data = RegisterData {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            password2: "secret".to_string(),
        };
        ctx.client.session.register(&ctx.client.api, &data).await.unwrap();

        let login = ctx.server.requests_to("POST", "/api/accounts/token/");
        assert_eq!(login.len(), 1);
        assert_eq!(login[0].authorization, None);
        let register = ctx.server.requests_to("POST", "/api/accounts/register/");
        assert_eq!(register.len(), 1);
        assert_eq!(register[0].authorization, None);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_failed_login_clears_previous_session(ctx: &mut SessionTestContext) {
        ctx.client.sign_in("old-token");
        ctx.server.respond(
            "POST",
            "/api/accounts/token/",
            401,
            json!({ "detail": "No active account found with the given credentials" }),
        );

        let credentials = LoginCredentials::new("alice@example.com", "wrong");
        let err = ctx.client.session.login(&ctx.client.api, &credentials).await.unwrap_err();

        assert!(err.is_auth());
        assert_eq!(err.to_string(), "No active account found with the given credentials");
        assert!(!ctx.client.session.is_authenticated());
        assert!(ctx.client.storage.keys().is_empty());
        // the login view stays where it is
        assert_eq!(ctx.client.navigator.current(), Route::Landing);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_login_without_access_token_fails(ctx: &mut SessionTestContext) {
        ctx.server.respond(
            "POST",
            "/api/accounts/token/",
            200,
            json!({ "user": { "id": 1, "username": "alice" } }),
        );

        let credentials = LoginCredentials::new("alice@example.com", "pw");
        let err = ctx.client.session.login(&ctx.client.api, &credentials).await.unwrap_err();

        assert!(err.is_auth());
        assert!(ctx.client.storage.keys().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_register_password_mismatch_sends_nothing(ctx: &mut SessionTestContext) {
        let data = RegisterData {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "one".to_string(),
            password2: "two".to_string(),
        };

        let err = ctx.client.session.register(&ctx.client.api, &data).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(ref message) if message == "Passwords do not match"));
        assert!(ctx.server.requests().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_register_establishes_session(ctx: &mut SessionTestContext) {
        ctx.server.respond("POST", "/api/accounts/register/", 201, auth_json("fresh"));
        let data = RegisterData {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            password2: "secret".to_string(),
        };

        let session = ctx.client.session.register(&ctx.client.api, &data).await.unwrap();

        assert_eq!(session.user.username, "alice");
        assert_eq!(ctx.client.session.token().as_deref(), Some("fresh"));
        let sent = ctx.server.requests_to("POST", "/api/accounts/register/");
        assert_eq!(sent[0].authorization, None);
        assert_eq!(sent[0].body.as_ref().unwrap()["password2"], "secret");
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_register_field_errors_are_flattened(ctx: &mut SessionTestContext) {
        ctx.server.respond(
            "POST",
            "/api/accounts/register/",
            400,
            json!({ "email": ["user with this email already exists."] }),
        );
        let data = RegisterData {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            password2: "secret".to_string(),
        };

        let err = ctx.client.session.register(&ctx.client.api, &data).await.unwrap_err();

        assert_eq!(err.to_string(), "email: user with this email already exists.");
        assert!(err.payload().is_some());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_logout_is_idempotent(ctx: &mut SessionTestContext) {
        ctx.client.sign_in("abc");

        ctx.client.session.logout();
        ctx.client.session.logout();

        assert!(!ctx.client.session.is_authenticated());
        assert!(ctx.client.storage.keys().is_empty());
        assert_eq!(ctx.client.navigator.current(), Route::Login);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_corrupted_user_clears_session(ctx: &mut SessionTestContext) {
        ctx.client.storage.set("token", "abc").unwrap();
        ctx.client.storage.set("user", "{not json").unwrap();

        assert_eq!(ctx.client.session.current_user(), None);
        assert_eq!(ctx.client.session.token(), None);
        assert!(ctx.client.storage.keys().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_half_session_is_cleared(ctx: &mut SessionTestContext) {
        ctx.client.storage.set("token", "abc").unwrap();

        assert!(!ctx.client.session.is_authenticated());
        assert!(ctx.client.storage.keys().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_update_user_requires_session(ctx: &mut SessionTestContext) {
        let user = lifescope::libs::session::User {
            id: 1,
            username: "renamed".to_string(),
            email: "alice@example.com".to_string(),
        };

        ctx.client.session.update_user(&user).unwrap();
        assert!(ctx.client.storage.keys().is_empty());

        ctx.client.sign_in("abc");
        ctx.client.session.update_user(&user).unwrap();
        assert_eq!(ctx.client.session.current_user(), Some(user));
    }

    #[test]
    fn test_validate_user_shapes() {
        assert!(matches!(
            validate_user(r#"{"id": 7, "username": "bob"}"#),
            UserValidation::Valid(user) if user.id == 7 && user.email.is_empty()
        ));
        assert!(matches!(validate_user(r#"{"id": "7", "username": "bob"}"#), UserValidation::Invalid(_)));
        assert!(matches!(validate_user(r#"{"id": 7}"#), UserValidation::Invalid(_)));
        assert!(matches!(validate_user(r#"[1, 2]"#), UserValidation::Invalid(_)));
        assert!(matches!(
            validate_user(r#"{"id": 7, "username": "bob", "email": 3}"#),
            UserValidation::Invalid(_)
        ));
    }
}

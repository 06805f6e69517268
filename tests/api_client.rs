mod common;

#[cfg(test)]
mod tests {
    use super::common::{analytics_json, task_json, Client, MockServer};
    use chrono::NaiveDate;
    use lifescope::libs::error::ApiError;
    use lifescope::libs::navigation::Route;
    use lifescope::libs::task::{Priority, Quadrant, RoleDraft, Status, TaskDraft, TaskQuery, TaskUpdate};
    use serde_json::json;
    use test_context::{test_context, AsyncTestContext};

    struct ApiTestContext {
        server: MockServer,
        client: Client,
    }

    impl AsyncTestContext for ApiTestContext {
        async fn setup() -> Self {
            let server = MockServer::start().await;
            let client = Client::new(&server.base_url);
            client.sign_in("abc");
            ApiTestContext { server, client }
        }
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_bearer_token_attached(ctx: &mut ApiTestContext) {
        ctx.server.respond("GET", "/api/tasks/roles/", 200, json!([{ "id": 1, "name": "Work" }]));

        let roles = ctx.client.api.roles().await.unwrap();

        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "Work");
        let sent = ctx.server.requests_to("GET", "/api/tasks/roles/");
        assert_eq!(sent[0].authorization.as_deref(), Some("Bearer abc"));
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_token_read_per_request(ctx: &mut ApiTestContext) {
        ctx.server.respond("GET", "/api/tasks/roles/", 200, json!([]));

        ctx.client.api.roles().await.unwrap();
        ctx.client.sign_in("rotated");
        ctx.client.api.roles().await.unwrap();

        let sent = ctx.server.requests_to("GET", "/api/tasks/roles/");
        assert_eq!(sent[0].authorization.as_deref(), Some("Bearer abc"));
        assert_eq!(sent[1].authorization.as_deref(), Some("Bearer rotated"));
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_no_header_when_signed_out(ctx: &mut ApiTestContext) {
        ctx.client.session.logout();
        ctx.server.respond("GET", "/api/tasks/roles/", 200, json!([]));

        ctx.client.api.roles().await.unwrap();

        assert_eq!(ctx.server.requests_to("GET", "/api/tasks/roles/")[0].authorization, None);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_unauthorized_expires_session(ctx: &mut ApiTestContext) {
        ctx.client.navigator.navigate(Route::Weekly);
        ctx.server.respond(
            "GET",
            "/api/tasks/tasks/",
            401,
            json!({ "detail": "Given token not valid for any token type" }),
        );

        let err = ctx.client.api.tasks(&TaskQuery::default()).await.unwrap_err();

        assert!(err.is_auth());
        assert!(!ctx.client.session.is_authenticated());
        assert!(ctx.client.storage.keys().is_empty());
        assert_eq!(ctx.client.navigator.current(), Route::Login);
        assert_eq!(ctx.client.navigator.return_to(), Some(Route::Weekly));
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_error_payload_surfaces(ctx: &mut ApiTestContext) {
        ctx.server.respond("POST", "/api/tasks/roles/", 400, json!({ "name": ["This field may not be blank."] }));

        let err = ctx.client.api.create_role(&RoleDraft::default()).await.unwrap_err();

        match err {
            ApiError::Api { status, message, payload } => {
                assert_eq!(status, 400);
                assert_eq!(message, "name: This field may not be blank.");
                assert!(payload.is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // validation failures leave the session alone
        assert!(ctx.client.session.is_authenticated());
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_missing_task_is_not_found(ctx: &mut ApiTestContext) {
        let err = ctx.client.api.task(99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_list_envelopes(ctx: &mut ApiTestContext) {
        let task = task_json(1, "Plan", "Work", None, None);
        ctx.server.respond("GET", "/api/tasks/tasks/", 200, json!({ "count": 1, "results": [task] }));
        ctx.server.respond("GET", "/api/tasks/categories/", 200, json!({ "data": [] }));

        let tasks = ctx.client.api.tasks(&TaskQuery::default()).await.unwrap();
        let categories = ctx.client.api.categories().await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Plan");
        assert!(categories.is_empty());
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_task_query_parameters(ctx: &mut ApiTestContext) {
        ctx.server.respond("GET", "/api/tasks/tasks/", 200, json!([]));
        let query = TaskQuery {
            priority: Some(Priority::High),
            quadrant: Some(Quadrant::Q2),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 3),
            ..TaskQuery::default()
        };

        ctx.client.api.tasks(&query).await.unwrap();

        let sent = ctx.server.requests_to("GET", "/api/tasks/tasks/");
        let query = sent[0].query.clone().unwrap();
        assert!(query.contains("priority=1"));
        assert!(query.contains("quadrant=q2"));
        assert!(query.contains("start_date=2024-06-03"));
        assert!(query.contains("ordering=due_date"));
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_toggle_completes_open_task(ctx: &mut ApiTestContext) {
        let open = task_json(5, "Write", "Work", None, Some("q1"));
        let mut done = open.clone();
        done["status"] = json!("completed");
        done["is_completed"] = json!(true);
        ctx.server.respond("GET", "/api/tasks/tasks/5/", 200, open);
        ctx.server.respond("PATCH", "/api/tasks/tasks/5/", 200, done);
        ctx.server.respond("GET", "/api/tasks/tasks/analytics/", 200, analytics_json());

        let outcome = ctx.client.api.toggle_task_complete(5).await.unwrap();

        assert!(outcome.task.is_completed);
        assert_eq!(outcome.analytics.completion_rate, 33.3);
        let patch = ctx.server.requests_to("PATCH", "/api/tasks/tasks/5/")[0].body.clone().unwrap();
        assert_eq!(patch["status"], "completed");
        assert_eq!(patch["is_completed"], true);
        assert!(patch["completed_at"].as_str().unwrap().ends_with('Z'));
        assert_eq!(ctx.server.requests_to("GET", "/api/tasks/tasks/analytics/").len(), 1);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_toggle_reopens_completed_task(ctx: &mut ApiTestContext) {
        let mut done = task_json(5, "Write", "Work", None, Some("q1"));
        done["status"] = json!("completed");
        done["is_completed"] = json!(true);
        done["completed_at"] = json!("2024-06-03T10:00:00Z");
        let open = task_json(5, "Write", "Work", None, Some("q1"));
        ctx.server.respond("GET", "/api/tasks/tasks/5/", 200, done);
        ctx.server.respond("PATCH", "/api/tasks/tasks/5/", 200, open);
        ctx.server.respond("GET", "/api/tasks/tasks/analytics/", 200, analytics_json());

        let outcome = ctx.client.api.toggle_task_complete(5).await.unwrap();

        assert!(!outcome.task.is_completed);
        let patch = ctx.server.requests_to("PATCH", "/api/tasks/tasks/5/")[0].body.clone().unwrap();
        assert_eq!(patch["status"], "not_started");
        assert_eq!(patch["is_completed"], false);
        assert!(patch["completed_at"].is_null());
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_status_update_carries_completion_flag(ctx: &mut ApiTestContext) {
        ctx.server.respond("PATCH", "/api/tasks/tasks/3/", 200, task_json(3, "Ship", "Work", None, None));
        let update = TaskUpdate {
            status: Some(Status::Completed),
            ..TaskUpdate::default()
        };

        ctx.client.api.update_task(3, &update).await.unwrap();

        let patch = ctx.server.requests_to("PATCH", "/api/tasks/tasks/3/")[0].body.clone().unwrap();
        assert_eq!(patch, json!({ "status": "completed", "is_completed": true }));
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_move_keeps_time_of_day(ctx: &mut ApiTestContext) {
        let task = task_json(8, "Gym", "Health", Some("2024-06-03T18:30:00"), None);
        ctx.server.respond("GET", "/api/tasks/tasks/8/", 200, task.clone());
        ctx.server.respond("PATCH", "/api/tasks/tasks/8/", 200, task);

        let day = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
        ctx.client.api.move_task(8, day).await.unwrap();

        let patch = ctx.server.requests_to("PATCH", "/api/tasks/tasks/8/")[0].body.clone().unwrap();
        assert_eq!(patch["due_date"], "2024-06-05T18:30:00");
        assert_eq!(patch["scheduled_date"], "2024-06-05");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_blank_title_rejected_locally(ctx: &mut ApiTestContext) {
        let err = ctx.client.api.create_task(&TaskDraft::new("  ", 1)).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(ctx.server.requests().is_empty());
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_delete_role(ctx: &mut ApiTestContext) {
        ctx.server.respond("DELETE", "/api/tasks/roles/4/", 204, serde_json::Value::Null);

        ctx.client.api.delete_role(4).await.unwrap();

        assert_eq!(ctx.server.requests_to("DELETE", "/api/tasks/roles/4/").len(), 1);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_network_failure(_ctx: &mut ApiTestContext) {
        let client = Client::new("http://127.0.0.1:1/api");
        client.sign_in("abc");

        let err = client.api.roles().await.unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
        assert!(client.session.is_authenticated());
    }
}

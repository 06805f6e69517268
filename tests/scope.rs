#[cfg(test)]
mod tests {
    use lifescope::libs::scope::{ScopeGuard, ViewScope};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_completes_when_live() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 42 }).await, Some(42));
    }

    #[tokio::test]
    async fn test_cancelled_scope_drops_result() {
        let scope = ViewScope::new();
        scope.cancel();
        assert_eq!(scope.run(async { 42 }).await, None);
    }

    #[tokio::test]
    async fn test_teardown_mid_flight() {
        let scope = ViewScope::new();
        let handle = scope.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.cancel();
        });

        let result = scope
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            })
            .await;

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_parent_cancellation_propagates() {
        let parent = CancellationToken::new();
        let scope = ViewScope::child_of(&parent);
        parent.cancel();
        assert!(scope.is_cancelled());
        assert_eq!(scope.run(async { 1 }).await, None);
    }

    #[test]
    fn test_guard_cancels_on_drop() {
        let scope = ViewScope::new();
        let guard = ScopeGuard::new(scope.clone());
        assert!(!guard.scope().is_cancelled());
        drop(guard);
        assert!(scope.is_cancelled());
    }
}

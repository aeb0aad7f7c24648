#[cfg(test)]
mod tests {
    use crate::auth::{RefreshOutcome, TokenManager, TOKEN_LIFETIME_MS};
    use crate::logic::{TokenResponse, ZoomApi, ZoomError};
    use crate::testing::{CountingZoomApi, MockZoom};
    use chrono::Utc;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;
    use tutorly_db::mock::InMemoryCredentialRepository;
    use tutorly_db::Credential;

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn valid_credential() -> Credential {
        Credential {
            access_token: "live-access".to_string(),
            refresh_token: "live-refresh".to_string(),
            expires_at: now_ms() + 1_000_000,
        }
    }

    fn expired_credential() -> Credential {
        Credential {
            access_token: "stale-access".to_string(),
            refresh_token: "stale-refresh".to_string(),
            expires_at: now_ms() - 1,
        }
    }

    fn manager(
        repo: Arc<InMemoryCredentialRepository>,
        api: Arc<dyn ZoomApi>,
    ) -> TokenManager {
        TokenManager::new(repo, api)
    }

    #[tokio::test]
    async fn unexpired_token_is_returned_without_provider_io() {
        let repo = Arc::new(InMemoryCredentialRepository::with_credential(
            valid_credential(),
        ));
        // no expectations: any provider call panics the test
        let api = Arc::new(MockZoom::new());
        let manager = manager(repo, api);

        let token = manager.get_valid_access_token().await.unwrap();
        assert_eq!(token, "live-access");
    }

    #[tokio::test]
    async fn missing_credential_is_not_authorized() {
        let repo = Arc::new(InMemoryCredentialRepository::new());
        let api = Arc::new(MockZoom::new());
        let manager = manager(repo, api);

        let result = manager.get_valid_access_token().await;
        assert!(matches!(result, Err(ZoomError::NotAuthorized)));
    }

    #[tokio::test]
    async fn concurrent_callers_share_a_single_refresh() {
        let repo = Arc::new(InMemoryCredentialRepository::with_credential(
            expired_credential(),
        ));
        let api = Arc::new(CountingZoomApi::with_refresh_delay(Duration::from_millis(
            50,
        )));
        let manager = Arc::new(manager(repo.clone(), api.clone()));

        let callers = (0..8).map(|_| {
            let manager = manager.clone();
            async move { manager.get_valid_access_token().await }
        });
        let tokens: Vec<String> = futures_join_all(callers)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(api.refresh_calls.load(Ordering::SeqCst), 1);
        assert!(tokens.iter().all(|t| t == "access-1"));

        let stored = repo.get().expect("credential");
        assert!(stored.expires_at > now_ms());
    }

    // join_all without pulling in the futures crate
    async fn futures_join_all<F, T>(futures: impl IntoIterator<Item = F>) -> Vec<T>
    where
        F: std::future::Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.expect("task panicked"));
        }
        results
    }

    #[tokio::test]
    async fn a_fresh_token_is_not_refreshed_again() {
        let repo = Arc::new(InMemoryCredentialRepository::with_credential(
            expired_credential(),
        ));
        let api = Arc::new(CountingZoomApi::default());
        let manager = manager(repo, api.clone());

        let first = manager.get_valid_access_token().await.unwrap();
        assert_eq!(first, "access-1");
        assert_eq!(api.refresh_calls.load(Ordering::SeqCst), 1);

        // well before the 3500s window ends, so no further outbound call
        let second = manager.get_valid_access_token().await.unwrap();
        assert_eq!(second, "access-1");
        assert_eq!(api.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refresh_clears_the_consumed_credential() {
        let repo = Arc::new(InMemoryCredentialRepository::with_credential(
            expired_credential(),
        ));
        let mut api = MockZoom::new();
        api.expect_refresh()
            .times(1)
            .returning(|_| Err(ZoomError::Exchange("provider rejected token".to_string())));
        let manager = manager(repo.clone(), Arc::new(api));

        let result = manager.get_valid_access_token().await;
        assert!(matches!(result, Err(ZoomError::Exchange(_))));
        assert!(repo.get().is_none());

        // terminal until a new authorization code is exchanged
        let next = manager.get_valid_access_token().await;
        assert!(matches!(next, Err(ZoomError::NotAuthorized)));
    }

    #[tokio::test]
    async fn refresh_response_without_refresh_token_clears_the_credential() {
        let repo = Arc::new(InMemoryCredentialRepository::with_credential(
            expired_credential(),
        ));
        let mut api = MockZoom::new();
        api.expect_refresh().times(1).returning(|_| {
            Ok(TokenResponse {
                access_token: Some("new-access".to_string()),
                refresh_token: None,
            })
        });
        let manager = manager(repo.clone(), Arc::new(api));

        let result = manager.get_valid_access_token().await;
        assert!(matches!(result, Err(ZoomError::Exchange(_))));
        assert!(repo.get().is_none());
    }

    #[tokio::test]
    async fn exchange_stores_a_credential_with_the_fixed_lifetime() {
        let repo = Arc::new(InMemoryCredentialRepository::new());
        let mut api = MockZoom::new();
        api.expect_exchange_code()
            .times(1)
            .withf(|code| code == "auth-code-1")
            .returning(|_| {
                Ok(TokenResponse {
                    access_token: Some("first-access".to_string()),
                    refresh_token: Some("first-refresh".to_string()),
                })
            });
        let manager = manager(repo.clone(), Arc::new(api));

        let before = now_ms();
        let credential = manager
            .exchange_authorization_code("auth-code-1")
            .await
            .unwrap();
        let after = now_ms();

        assert_eq!(credential.access_token, "first-access");
        assert!(credential.expires_at >= before + TOKEN_LIFETIME_MS);
        assert!(credential.expires_at <= after + TOKEN_LIFETIME_MS);
        assert_eq!(repo.get(), Some(credential));
    }

    #[tokio::test]
    async fn exchange_without_both_tokens_stores_nothing() {
        let repo = Arc::new(InMemoryCredentialRepository::new());
        let mut api = MockZoom::new();
        api.expect_exchange_code().times(1).returning(|_| {
            Ok(TokenResponse {
                access_token: Some("only-access".to_string()),
                refresh_token: None,
            })
        });
        let manager = manager(repo.clone(), Arc::new(api));

        let result = manager.exchange_authorization_code("auth-code-2").await;
        assert!(matches!(result, Err(ZoomError::Exchange(_))));
        assert!(repo.get().is_none());
    }

    #[tokio::test]
    async fn refresh_if_due_reports_not_expired() {
        let repo = Arc::new(InMemoryCredentialRepository::with_credential(
            valid_credential(),
        ));
        let api = Arc::new(MockZoom::new());
        let manager = manager(repo, api);

        let outcome = manager.refresh_if_due().await.unwrap();
        assert_eq!(outcome, RefreshOutcome::NotExpired);
    }

    #[tokio::test]
    async fn refresh_if_due_rotates_an_expired_token() {
        let repo = Arc::new(InMemoryCredentialRepository::with_credential(
            expired_credential(),
        ));
        let api = Arc::new(CountingZoomApi::default());
        let manager = manager(repo.clone(), api.clone());

        match manager.refresh_if_due().await.unwrap() {
            RefreshOutcome::Refreshed(credential) => {
                assert_eq!(credential.access_token, "access-1");
                assert_eq!(credential.refresh_token, "refresh-1");
                assert_eq!(repo.get(), Some(credential));
            }
            RefreshOutcome::NotExpired => panic!("expected a refresh"),
        }
        assert_eq!(api.refresh_calls.load(Ordering::SeqCst), 1);
    }
}

//! End-to-end tests for callback handling.
//!
//! Drives `CallbackHandler` from raw callback URLs through a real
//! `SessionStore`, recording what the user would see.

use std::sync::Arc;

use auth_callback::testing::{NavigationEvent, NoticeEvent, RecordingNavigator, RecordingNotifier};
use auth_callback::{
    CallbackConfig, CallbackHandler, CallbackQuery, OutcomeKind, SessionStore, StaticToken,
    StaticTokenVerifier,
};

/// One mounted callback page.
struct Page {
    store: Arc<SessionStore<StaticTokenVerifier>>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
    handler: CallbackHandler<
        Arc<SessionStore<StaticTokenVerifier>>,
        Arc<RecordingNotifier>,
        Arc<RecordingNavigator>,
    >,
}

impl Page {
    fn mount() -> Self {
        let mut config = CallbackConfig::default();
        config.tokens.push(StaticToken {
            token: "good token".into(),
            user_id: Some("alice".into()),
            roles: vec!["admin".into()],
            active: true,
        });

        let store = Arc::new(SessionStore::new(StaticTokenVerifier::from_config(&config)));
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let handler = CallbackHandler::new(config, store.clone(), notifier.clone(), navigator.clone());

        Self {
            store,
            notifier,
            navigator,
            handler,
        }
    }

    async fn visit(&self, url: &str) -> OutcomeKind {
        let query = CallbackQuery::from_url(url).expect("Valid callback URL");
        self.handler.handle(&query).await.expect("First handling").kind
    }
}

#[tokio::test]
async fn test_token_login_stores_session() {
    let page = Page::mount();
    assert!(page.handler.is_verifying());

    let kind = page.visit("https://app.example.com/auth/callback?token=good%20token").await;

    assert_eq!(kind, OutcomeKind::LoggedIn);
    assert!(!page.handler.is_verifying());
    assert_eq!(page.store.current().and_then(|s| s.user_id), Some("alice".into()));
    assert_eq!(
        page.notifier.events(),
        vec![NoticeEvent::Success("Login successful".into())]
    );
    assert_eq!(
        page.navigator.events(),
        vec![NavigationEvent::Route("/admin/setup".into())]
    );
}

#[tokio::test]
async fn test_unknown_token_goes_home() {
    let page = Page::mount();

    let kind = page.visit("/auth/callback?token=stolen").await;

    assert_eq!(kind, OutcomeKind::LoginFailed);
    assert!(!page.store.is_authenticated());
    assert_eq!(page.navigator.events(), vec![NavigationEvent::Route("/".into())]);
}

#[tokio::test]
async fn test_code_and_state_hand_off() {
    let page = Page::mount();

    let kind = page.visit("/auth/callback?code=abc+1&state=xyz").await;

    assert_eq!(kind, OutcomeKind::CodeExchange);
    assert!(page.notifier.is_empty());
    assert!(!page.store.is_authenticated());
    assert_eq!(
        page.navigator.events(),
        vec![NavigationEvent::Redirect(
            "/api/auth/callback?code=abc%201&state=xyz".into()
        )]
    );
}

#[tokio::test]
async fn test_every_path_navigates_exactly_once() {
    let cases = [
        ("/cb?auth_error=not_admin&token=good%20token", OutcomeKind::ProviderError),
        ("/cb?auth_error=expired", OutcomeKind::ProviderError),
        ("/cb?token=good%20token&code=c&state=s", OutcomeKind::LoggedIn),
        ("/cb?token=bad", OutcomeKind::LoginFailed),
        ("/cb?code=c&state=s", OutcomeKind::CodeExchange),
        ("/cb?code=c", OutcomeKind::MissingToken),
        ("/cb", OutcomeKind::MissingToken),
    ];

    for (url, expected) in cases {
        let page = Page::mount();

        assert_eq!(page.visit(url).await, expected, "kind for {}", url);
        assert_eq!(page.navigator.events().len(), 1, "navigations for {}", url);
        assert!(!page.handler.is_verifying(), "flag for {}", url);
    }
}

#[tokio::test]
async fn test_provider_error_shown_verbatim() {
    let page = Page::mount();

    page.visit("/cb?auth_error=Session%20expired%2C%20try%20again").await;

    assert_eq!(page.notifier.errors(), vec!["Session expired, try again"]);
}

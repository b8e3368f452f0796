use std::rc::Rc;
use std::sync::Arc;

use alphatest_core::model::{AttemptRecord, Credential, Session, UserIdentity};
use alphatest_core::time::fixed_now;
use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::history::{MemoryHistory, provide_history_context};
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AttemptService, AttemptsApi, AuthApi, Clock, GatewayError, LoginGrant, SessionStore,
};
use storage::repository::InMemoryRepository;

use crate::app::App;
use crate::context::{AuthState, UiApp, build_app_context};
use crate::routes::Route;
use crate::views::{
    AdminView, DashboardView, LandingView, LoginView, NoticeTray, ResultsView, TakeTestView,
    TestsView, VerifyView, use_notices_provider,
};

pub struct FakeBackend {
    attempts: Result<Vec<AttemptRecord>, GatewayError>,
}

#[async_trait]
impl AttemptsApi for FakeBackend {
    async fn list_attempts(&self) -> Result<Vec<AttemptRecord>, GatewayError> {
        self.attempts.clone()
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginGrant, GatewayError> {
        Err(GatewayError::Network("not scripted".into()))
    }

    async fn register(&self, _email: &str, _password: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Network("not scripted".into()))
    }

    async fn current_user(&self) -> Result<UserIdentity, GatewayError> {
        Err(GatewayError::Network("not scripted".into()))
    }
}

#[derive(Clone)]
struct TestApp {
    session: Arc<SessionStore>,
    backend: Arc<FakeBackend>,
    attempts: Arc<AttemptService>,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionStore> {
        Arc::clone(&self.session)
    }

    fn auth_api(&self) -> Arc<dyn AuthApi> {
        self.backend.clone()
    }

    fn attempts(&self) -> Arc<AttemptService> {
        Arc::clone(&self.attempts)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Login,
    Verify,
    Dashboard,
    Tests,
    TakeTest(String),
    Results(String),
    Admin,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: Session,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let session = use_signal(|| props.session.clone());
    let ready = use_signal(|| true);
    use_context_provider(|| AuthState { session, ready });
    use_notices_provider();
    use_context_provider(|| props.view.clone());
    rsx! {
        Router::<TestRoute> {}
        NoticeTray {}
    }
}

#[derive(Props, Clone)]
struct RoutedHarnessProps {
    app: Arc<TestApp>,
    path: String,
    session: Session,
}

impl PartialEq for RoutedHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// The application router with its guarded layout, starting at `path`.
#[component]
fn RoutedHarness(props: RoutedHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_hook(|| provide_history_context(Rc::new(MemoryHistory::with_initial_path(&props.path))));
    let session = use_signal(|| props.session.clone());
    let ready = use_signal(|| true);
    use_context_provider(|| AuthState { session, ready });
    use_notices_provider();
    rsx! {
        Router::<Route> {}
    }
}

#[derive(Props, Clone)]
struct AppHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for AppHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn AppHarness(props: AppHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! {
        App {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Verify => rsx! { VerifyView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Tests => rsx! { TestsView {} },
        ViewKind::TakeTest(test_id) => rsx! { TakeTestView { test_id } },
        ViewKind::Results(test_id) => rsx! { ResultsView { test_id } },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub session: Arc<SessionStore>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let spawned resources finish and re-render.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn signed_in(is_admin: bool) -> Session {
    Session::authenticated(
        UserIdentity::new("cadet@example.es", is_admin),
        Credential::new("tok"),
    )
}

async fn test_app(
    session: &Session,
    attempts: Result<Vec<AttemptRecord>, GatewayError>,
) -> Arc<TestApp> {
    let store = Arc::new(SessionStore::new(
        Clock::fixed(fixed_now()),
        Arc::new(InMemoryRepository::new()),
    ));
    if let (Some(identity), Some(credential)) = (session.identity(), session.credential()) {
        store
            .set(identity.clone(), credential.clone())
            .await
            .expect("seed session");
    }

    let backend = Arc::new(FakeBackend { attempts });
    let attempts_api: Arc<dyn AttemptsApi> = backend.clone();
    let attempt_service = Arc::new(AttemptService::new(attempts_api, Arc::clone(&store)));

    Arc::new(TestApp {
        session: store,
        backend,
        attempts: attempt_service,
    })
}

pub async fn setup_view_harness(
    view: ViewKind,
    session: Session,
    attempts: Result<Vec<AttemptRecord>, GatewayError>,
) -> ViewHarness {
    let app = test_app(&session, attempts).await;
    let store = Arc::clone(&app.session);
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps { app, view, session },
    );

    ViewHarness {
        dom,
        session: store,
    }
}

/// Mounts `Router::<Route>` behind the route guard, starting at `path`.
pub async fn setup_routed_harness(
    path: &str,
    session: Session,
    attempts: Result<Vec<AttemptRecord>, GatewayError>,
) -> ViewHarness {
    let app = test_app(&session, attempts).await;
    let store = Arc::clone(&app.session);
    let dom = VirtualDom::new_with_props(
        RoutedHarness,
        RoutedHarnessProps {
            app,
            path: path.to_string(),
            session,
        },
    );

    ViewHarness {
        dom,
        session: store,
    }
}

/// Mounts the full `App`, including the startup session restore.
pub async fn setup_app_harness(session: Session) -> ViewHarness {
    let app = test_app(&session, Ok(vec![])).await;
    let store = Arc::clone(&app.session);
    let dom = VirtualDom::new_with_props(AppHarness, AppHarnessProps { app });

    ViewHarness {
        dom,
        session: store,
    }
}

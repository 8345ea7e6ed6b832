use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use api::{Backend, InMemoryBackend};
use assess_core::model::{AuthUser, UserId, UserRole};
use assess_core::time::fixed_clock;
use services::{AppServices, AttemptConfig};

use crate::context::{UiApp, build_app_context};
use crate::views::attempt::AttemptTestHandles;
use crate::views::{
    AttemptScreen, CandidateDashboard, CompleteProfileView, HomeView, LoginView, RankingView,
    RecruiterDashboard, SignupView,
};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Login(String),
    Signup,
    Candidate,
    Profile,
    Recruiter,
    Ranking(u64),
    Attempt(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    user: Option<AuthUser>,
    attempt_handles: Option<AttemptTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let user = props.user.clone();
    let user_signal = use_signal(move || user);
    use_context_provider(|| crate::context::AuthSession::new(user_signal));
    use_context_provider(|| props.view.clone());
    if let Some(handles) = props.attempt_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
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
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Login(role) => rsx! { LoginView { role } },
        ViewKind::Signup => rsx! { SignupView {} },
        ViewKind::Candidate => rsx! { CandidateDashboard {} },
        ViewKind::Profile => rsx! { CompleteProfileView {} },
        ViewKind::Recruiter => rsx! { RecruiterDashboard {} },
        ViewKind::Ranking(job_id) => rsx! { RankingView { job_id } },
        ViewKind::Attempt(attempt_id) => rsx! { AttemptScreen { attempt_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: InMemoryBackend,
    pub attempt_handles: Option<AttemptTestHandles>,
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

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Demo world: user 2 is the candidate with a complete profile.
pub fn demo_candidate() -> AuthUser {
    AuthUser {
        user_id: UserId::new(2),
        email: "candidate@example.com".to_string(),
        role: UserRole::Candidate,
    }
}

/// Demo world: user 1 is the recruiter.
pub fn demo_recruiter() -> AuthUser {
    AuthUser {
        user_id: UserId::new(1),
        email: "recruiter@example.com".to_string(),
        role: UserRole::Recruiter,
    }
}

pub fn setup_view_harness(view: ViewKind, user: Option<AuthUser>) -> ViewHarness {
    setup_view_harness_with_backend(view, user, InMemoryBackend::with_demo_data())
}

/// Builds the harness over a caller-staged backend. The post-submit
/// pause is zeroed so question advancement happens within one
/// `drive_async` window.
pub fn setup_view_harness_with_backend(
    view: ViewKind,
    user: Option<AuthUser>,
    backend: InMemoryBackend,
) -> ViewHarness {
    let services = AppServices::new(
        Backend::from_memory(backend.clone()),
        fixed_clock(),
        AttemptConfig {
            advance_delay: Duration::ZERO,
        },
    );
    let attempt_handles = matches!(view, ViewKind::Attempt(_)).then(AttemptTestHandles::default);
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            user,
            attempt_handles: attempt_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        backend,
        attempt_handles,
    }
}

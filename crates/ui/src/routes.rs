use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use assess_core::model::UserRole;

use crate::context::{AppContext, AuthSession};
use crate::views::{
    AttemptScreen, CandidateDashboard, CompleteProfileView, HomeView, LoginView, RankingView,
    RecruiterDashboard, SignupView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/login/:role", LoginView)] Login { role: String },
        #[route("/signup", SignupView)] Signup {},
        #[route("/candidate", CandidateDashboard)] Candidate {},
        #[route("/candidate/profile", CompleteProfileView)] CompleteProfile {},
        #[route("/recruiter", RecruiterDashboard)] Recruiter {},
        #[route("/recruiter/ranking/:job_id", RankingView)] Ranking { job_id: u64 },
        #[route("/attempt/:attempt_id", AttemptScreen)] Attempt { attempt_id: u64 },
}

impl Route {
    /// The dashboard matching a signed-in role.
    #[must_use]
    pub fn dashboard_for(role: UserRole) -> Self {
        match role {
            UserRole::Candidate => Route::Candidate {},
            UserRole::Recruiter => Route::Recruiter {},
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<AuthSession>();
    let navigator = use_navigator();
    let signed_in = session.current();
    let services = ctx.services();

    rsx! {
        header { class: "topbar",
            h1 { Link { to: Route::Home {}, "SkillProof" } }
            nav { class: "topbar__nav",
                if let Some(user) = signed_in {
                    span { class: "topbar__user", "{user.email}" }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| {
                            let auth = services.auth();
                            spawn(async move {
                                // best effort: the local session clears either way
                                let _ = auth.logout().await;
                            });
                            session.sign_out();
                            let _ = navigator.push(Route::Home {});
                        },
                        "Log out"
                    }
                } else {
                    Link { to: Route::Login { role: UserRole::Candidate.as_str().to_string() }, "Candidate login" }
                    Link { to: Route::Login { role: UserRole::Recruiter.as_str().to_string() }, "Recruiter login" }
                }
            }
        }
    }
}

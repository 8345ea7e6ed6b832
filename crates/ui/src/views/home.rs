use dioxus::prelude::*;
use dioxus_router::Link;

use assess_core::model::UserRole;

use crate::context::AuthSession;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let session = use_context::<AuthSession>();
    let signed_in = session.current();

    rsx! {
        div { class: "page",
            h2 { "Hiring assessments, scored per skill" }
            p { "Recruiters publish timed screens; candidates take them and get a skill-by-skill report." }
            if let Some(user) = signed_in {
                p {
                    Link {
                        to: Route::dashboard_for(user.role),
                        "Go to your dashboard"
                    }
                }
            } else {
                div { class: "card",
                    h3 { "Candidates" }
                    p { "Complete your profile, pick an open assessment and take it against the clock." }
                    Link { to: Route::Login { role: UserRole::Candidate.as_str().to_string() }, "Candidate login" }
                    " · "
                    Link { to: Route::Signup {}, "Create an account" }
                }
                div { class: "card",
                    h3 { "Recruiters" }
                    p { "Publish assessments with weighted skills and see candidates ranked by fit." }
                    Link { to: Route::Login { role: UserRole::Recruiter.as_str().to_string() }, "Recruiter login" }
                }
            }
        }
    }
}

mod attempt;
mod candidate_dashboard;
mod complete_profile;
mod home;
mod login;
mod ranking;
mod recruiter_dashboard;
mod signup;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use attempt::AttemptScreen;
pub use candidate_dashboard::CandidateDashboard;
pub use complete_profile::CompleteProfileView;
pub use home::HomeView;
pub use login::LoginView;
pub use ranking::RankingView;
pub use recruiter_dashboard::RecruiterDashboard;
pub use signup::SignupView;
pub use state::{ViewError, ViewState, view_state_from_resource};

mod controller;
mod view;

pub use controller::{AttemptConfig, AttemptController};
pub use view::AttemptView;

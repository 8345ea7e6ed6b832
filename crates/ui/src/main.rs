#![allow(non_snake_case)]

use std::sync::Arc;

use api::Backend;
use services::{AppServices, AttemptConfig, Clock};
use ui::{App, UiApp, build_app_context};

struct DemoApp {
    services: AppServices,
}

impl UiApp for DemoApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }
}

/// Standalone launch against the in-memory demo backend; the real
/// server wiring lives in the `app` binary.
fn main() {
    let services = AppServices::new(
        Backend::in_memory(),
        Clock::default(),
        AttemptConfig::default(),
    );
    let app: Arc<dyn UiApp> = Arc::new(DemoApp { services });
    let context = build_app_context(&app);

    dioxus::LaunchBuilder::desktop()
        .with_context(context)
        .launch(App);
}

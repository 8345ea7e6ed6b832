use std::sync::Arc;

use dioxus::prelude::*;

use assess_core::model::{AuthUser, UserRole};
use services::AppServices;

/// What the composition root (the binary) hands to the UI.
pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;
}

/// Service access for views, provided once at launch.
#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
        }
    }

    #[must_use]
    pub fn services(&self) -> AppServices {
        self.services.clone()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The signed-in user, passed explicitly through context rather than
/// living in an ambient global. Views read it to gate navigation and
/// write it on login/logout.
#[derive(Clone, Copy)]
pub struct AuthSession {
    user: Signal<Option<AuthUser>>,
}

impl AuthSession {
    #[must_use]
    pub fn new(user: Signal<Option<AuthUser>>) -> Self {
        Self { user }
    }

    #[must_use]
    pub fn current(&self) -> Option<AuthUser> {
        self.user.read().clone()
    }

    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.user.read().as_ref().map(|user| user.role)
    }

    pub fn sign_in(&mut self, user: AuthUser) {
        self.user.set(Some(user));
    }

    pub fn sign_out(&mut self) {
        self.user.set(None);
    }
}

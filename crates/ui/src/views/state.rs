use dioxus::prelude::*;

/// View-facing failure: either a message worth showing verbatim (the
/// backend's `{error}` payloads read fine as-is) or a generic fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotSignedIn,
    Message(String),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotSignedIn => "Please sign in first.",
            Self::Message(text) => text,
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Wraps a service error, keeping its display text.
    #[must_use]
    pub fn from_service(err: &impl std::fmt::Display) -> Self {
        Self::Message(err.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_variants_render_their_text() {
        let err = ViewError::Message("Invalid credentials".to_string());
        assert_eq!(err.message(), "Invalid credentials");
        assert_eq!(
            ViewError::Unknown.message(),
            "Something went wrong. Please try again."
        );
    }
}

//! Top-level flow controller: owns the single form / content / error triple.
//!
//! The state is one enum and is replaced wholesale on every transition, so the
//! triple is never half-updated. `submit` borrows the flow mutably for the whole
//! request, which keeps at most one generation in flight.
//!
//! Dropping a `submit` future before it completes (a timeout, a cancelled task)
//! leaves the flow on an empty form: `Loading` never outlives the request.

use tracing::{info, warn};

use crate::contract::{GeneratedContent, GenerationProvider, TrackingFormData};
use crate::credential::CredentialSource;
use crate::dispatch::NotificationPreview;
use crate::generate::NotificationGenerator;

/// Prefix put in front of every generation error shown to the user.
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Waiting for a submission, possibly showing the last failure.
    Editing { error: Option<String> },
    /// A request is outstanding.
    Loading,
    /// Content is ready for dispatch.
    Ready {
        form: TrackingFormData,
        content: GeneratedContent,
    },
}

pub struct NotificationFlow<P, C> {
    generator: NotificationGenerator<P, C>,
    state: FlowState,
}

impl<P, C> NotificationFlow<P, C>
where
    P: GenerationProvider,
    C: CredentialSource,
{
    pub fn new(generator: NotificationGenerator<P, C>) -> Self {
        Self {
            generator,
            state: FlowState::Editing { error: None },
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FlowState::Loading)
    }

    /// Runs one generation for `form` and returns the resulting state.
    pub async fn submit(&mut self, form: TrackingFormData) -> &FlowState {
        let loading = LoadingGuard::start(&mut self.state);

        let next = match self.generator.generate(&form).await {
            Ok(content) => {
                info!("Flow moved to ready");
                FlowState::Ready { form, content }
            }
            Err(e) => FlowState::Editing {
                error: Some(format!("{ERROR_PREFIX}{e}")),
            },
        };
        loading.finish(next);
        &self.state
    }

    /// Drops any content, form and error and returns to an empty form.
    pub fn reset(&mut self) {
        self.state = FlowState::Editing { error: None };
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FlowState::Editing { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn content(&self) -> Option<&GeneratedContent> {
        match &self.state {
            FlowState::Ready { content, .. } => Some(content),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<NotificationPreview> {
        match &self.state {
            FlowState::Ready { form, content } => Some(NotificationPreview::new(form, content)),
            _ => None,
        }
    }
}

/// Holds the flow in `Loading` for one request and falls back to an empty form
/// if the request is abandoned.
struct LoadingGuard<'a> {
    state: &'a mut FlowState,
}

impl<'a> LoadingGuard<'a> {
    fn start(state: &'a mut FlowState) -> Self {
        *state = FlowState::Loading;
        Self { state }
    }

    fn finish(self, next: FlowState) {
        *self.state = next;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if matches!(self.state, FlowState::Loading) {
            warn!("Generation abandoned before completing; returning to the form");
            *self.state = FlowState::Editing { error: None };
        }
    }
}

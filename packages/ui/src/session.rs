//! # Session controller for the template page
//!
//! [`SessionState`] is the single owner of transient UI state between the
//! catalog and the modals: the currently selected template, the form being
//! filled, which modal view is showing, and the submission guard. The page
//! component keeps one in a `Signal` and every modal mutates it through the
//! methods below, so the transitions are testable without rendering.
//!
//! ```text
//! Closed ──select──► Options ──open_form──► Form ──submit ok──► (navigate away)
//!                       │  ▲
//!            begin_preview │ back_to_options
//!                       ▼  │
//!                PreviewLoading ──preview_failed──► PreviewError
//!                       │
//!                 preview_ready
//!                       ▼
//!           Preview { loaded: false } ──preview_loaded──► Preview { loaded: true }
//! ```
//!
//! While a preview is `loaded: false` the options modal keeps its spinner and
//! the frame loads out of sight; the views swap only on the frame's `load`.

use api::{ApiError, SubmitOutcome, Template};

use crate::form::{DocumentForm, ValidationFailure};

pub const PREVIEW_ERROR_PREFIX: &str = "Preview Error: ";

/// Which modal content is showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ModalView {
    #[default]
    Closed,
    Options,
    PreviewLoading,
    PreviewError(String),
    Preview {
        url: String,
        loaded: bool,
    },
    Form,
}

impl ModalView {
    /// Whether the options modal is on screen.
    pub fn shows_options(&self) -> bool {
        matches!(
            self,
            Self::Options
                | Self::PreviewLoading
                | Self::PreviewError(_)
                | Self::Preview { loaded: false, .. }
        )
    }

    /// Object URL held by this view, if any.
    pub fn preview_url(&self) -> Option<&str> {
        match self {
            Self::Preview { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Why a submission did not start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitBlocked {
    InFlight,
    MissingTemplate,
    Invalid(ValidationFailure),
}

impl SubmitBlocked {
    /// Field to focus so the user can fix the problem.
    pub fn focus_target(&self) -> Option<&str> {
        match self {
            Self::Invalid(failure) => failure.first_invalid(),
            _ => None,
        }
    }
}

impl From<SubmitBlocked> for ApiError {
    fn from(blocked: SubmitBlocked) -> Self {
        match blocked {
            SubmitBlocked::InFlight => ApiError::failure("A submission is already in progress."),
            SubmitBlocked::MissingTemplate => ApiError::failure("Current template data is missing."),
            SubmitBlocked::Invalid(failure) => failure.into(),
        }
    }
}

/// A validated form, ready for the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub template_id: u64,
    pub fields: Vec<(String, String)>,
    pub format: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    current_template: Option<Template>,
    form: Option<DocumentForm>,
    view: ModalView,
    submitting: bool,
    form_error: Option<String>,
    invalid_fields: Vec<String>,
}

impl SessionState {
    pub fn current_template(&self) -> Option<&Template> {
        self.current_template.as_ref()
    }

    pub fn form(&self) -> Option<&DocumentForm> {
        self.form.as_ref()
    }

    pub fn view(&self) -> &ModalView {
        &self.view
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        self.invalid_fields.iter().any(|f| f == field)
    }

    /// Make `template` current and show its options. Returns an object URL
    /// the caller must revoke, if a preview was open.
    ///
    /// A submission in flight stays locked until its response arrives.
    pub fn select(&mut self, template: Template) -> Option<String> {
        let stale = self.take_preview_url();
        self.current_template = Some(template);
        self.form = None;
        self.form_error = None;
        self.invalid_fields.clear();
        self.view = ModalView::Options;
        stale
    }

    /// Build a fresh form for the current template and show it.
    pub fn open_form(&mut self, default_format: &str) -> Result<(), ApiError> {
        let template = self
            .current_template
            .as_ref()
            .ok_or(SubmitBlocked::MissingTemplate)?;
        self.form = Some(DocumentForm::from_template(template, default_format));
        self.form_error = None;
        self.invalid_fields.clear();
        self.view = ModalView::Form;
        Ok(())
    }

    pub fn set_field(&mut self, name: &str, value: String) {
        if let Some(form) = self.form.as_mut() {
            form.set_value(name, value);
        }
    }

    pub fn set_format(&mut self, format: String) {
        if let Some(form) = self.form.as_mut() {
            form.set_format(format);
        }
    }

    /// Show the loading state and return the template to preview.
    pub fn begin_preview(&mut self) -> Option<u64> {
        let id = self.current_template.as_ref()?.id;
        self.view = ModalView::PreviewLoading;
        Some(id)
    }

    /// The preview bytes are available at `url`; the frame starts loading.
    ///
    /// Returns a URL to revoke: `url` itself when the user left the loading
    /// view before the response arrived.
    pub fn preview_ready(&mut self, url: String) -> Option<String> {
        if self.view != ModalView::PreviewLoading {
            return Some(url);
        }
        self.view = ModalView::Preview { url, loaded: false };
        None
    }

    /// The frame finished loading: swap the options view for the preview.
    pub fn preview_loaded(&mut self) {
        if let ModalView::Preview { loaded, .. } = &mut self.view {
            *loaded = true;
        }
    }

    pub fn preview_failed(&mut self, message: &str) {
        if self.view == ModalView::PreviewLoading {
            self.view = ModalView::PreviewError(format!("{PREVIEW_ERROR_PREFIX}{message}"));
        }
    }

    /// Returns an object URL to revoke, if leaving a preview.
    pub fn back_to_options(&mut self) -> Option<String> {
        let stale = self.take_preview_url();
        self.view = ModalView::Options;
        stale
    }

    /// Close whatever modal is open. Returns an object URL to revoke.
    pub fn close(&mut self) -> Option<String> {
        let stale = self.take_preview_url();
        if !self.submitting {
            self.form_error = None;
        }
        self.view = ModalView::Closed;
        stale
    }

    /// Validate and lock the form for submission.
    ///
    /// On failure the form error is set and nothing is sent; the user can fix
    /// the form and try again.
    pub fn prepare_submission(&mut self) -> Result<Submission, SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }
        self.form_error = None;
        self.invalid_fields.clear();

        let result = match (&self.current_template, &self.form) {
            (Some(_), Some(form)) => form
                .validate()
                .map(|()| Submission {
                    template_id: form.template_id,
                    fields: form.multipart_fields(),
                    format: form.format.clone(),
                })
                .map_err(SubmitBlocked::Invalid),
            _ => Err(SubmitBlocked::MissingTemplate),
        };

        match &result {
            Ok(_) => self.submitting = true,
            Err(blocked) => {
                if let SubmitBlocked::Invalid(failure) = blocked {
                    self.invalid_fields = failure.invalid.clone();
                }
                self.form_error = Some(ApiError::from(blocked.clone()).to_string());
            }
        }
        result
    }

    /// Record the outcome of a submission. Returns where to navigate on
    /// success; on failure the button is unlocked and, unless the gateway is
    /// already redirecting to login, the error is shown.
    pub fn finish_submission(&mut self, result: &Result<SubmitOutcome, ApiError>) -> Option<String> {
        match result {
            Ok(outcome) => Some(outcome.redirect_url.clone()),
            Err(e) => {
                self.submitting = false;
                if !e.is_auth() {
                    self.form_error = Some(format!("Submission Failed: {e}"));
                }
                None
            }
        }
    }

    fn take_preview_url(&mut self) -> Option<String> {
        match std::mem::take(&mut self.view) {
            ModalView::Preview { url, .. } => Some(url),
            other => {
                self.view = other;
                None
            }
        }
    }
}

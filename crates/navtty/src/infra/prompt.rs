//! Host-UI prompt boundary.

use std::future::Future;
use std::pin::Pin;

/// Boxed async result used by [`Prompt`] trait methods.
pub type PromptFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Outcome of a yes/no confirmation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Confirmation {
    No,
    Yes,
}

/// The UI surface the navigator talks to: selection lists, text input,
/// and an error channel.
///
/// `None` from any method always means the user dismissed the prompt; the
/// caller must treat it as "abort this operation and return to a
/// listing". Exactly one prompt is outstanding at any time.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    /// Shows a selection list and returns the chosen label.
    fn pick_one(&self, options: Vec<String>, placeholder: String) -> PromptFuture<Option<String>>;

    /// Shows a yes/no confirmation with the safe No choice preselected.
    fn pick_yes_no(&self, placeholder: String) -> PromptFuture<Option<Confirmation>>;

    /// Shows a one-line free-text input.
    fn prompt_text(&self, placeholder: String) -> PromptFuture<Option<String>>;

    /// Shows `message` until the user dismisses it.
    fn show_error(&self, message: String) -> PromptFuture<()>;
}

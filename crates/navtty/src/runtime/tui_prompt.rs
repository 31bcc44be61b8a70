//! Ratatui-backed implementation of the [`Prompt`] boundary.
//!
//! Each prompt call runs its own draw/read loop over the shared terminal
//! and event channel until the user answers or dismisses. The navigator
//! never has more than one prompt outstanding, so the two mutexes are
//! uncontended and only serialize access across the boxed futures.

use std::sync::Arc;

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use tokio::sync::{Mutex, mpsc};

use crate::infra::prompt::{Confirmation, Prompt, PromptFuture};
use crate::runtime::TuiTerminal;
use crate::runtime::confirm::{ConfirmDecision, handle_confirm_key};
use crate::runtime::input::{InputDecision, LineInput, handle_input_key};
use crate::runtime::picker::{PickerDecision, PickerState};
use crate::ui::Component;
use crate::ui::components::confirm::ConfirmOverlay;
use crate::ui::components::input_box::InputBox;
use crate::ui::components::message::MessageOverlay;
use crate::ui::components::picker::Picker;

/// What a prompt loop should do after one received event.
enum Signal {
    Key(KeyEvent),
    Redraw,
}

/// Terminal prompt service sharing one terminal and one event stream.
pub(crate) struct TuiPrompt {
    events: Arc<Mutex<mpsc::UnboundedReceiver<Event>>>,
    terminal: Arc<Mutex<TuiTerminal>>,
}

impl TuiPrompt {
    /// Creates a prompt service over the prepared terminal and the event
    /// reader channel.
    pub(crate) fn new(terminal: TuiTerminal, events: mpsc::UnboundedReceiver<Event>) -> Self {
        Self {
            events: Arc::new(Mutex::new(events)),
            terminal: Arc::new(Mutex::new(terminal)),
        }
    }
}

impl Prompt for TuiPrompt {
    fn pick_one(&self, options: Vec<String>, placeholder: String) -> PromptFuture<Option<String>> {
        let terminal = Arc::clone(&self.terminal);
        let events = Arc::clone(&self.events);

        Box::pin(async move {
            let mut state = PickerState::new(options);

            loop {
                let rows = state.filtered();
                let picker = Picker::new(&placeholder, state.query(), &rows, state.selected_index());
                if draw(&terminal, &picker).await.is_err() {
                    return None;
                }
                drop(rows);

                match next_signal(&events).await? {
                    Signal::Redraw => {}
                    Signal::Key(key) => match state.handle_key(key) {
                        PickerDecision::Cancel => return None,
                        PickerDecision::Continue => {}
                        PickerDecision::Pick(choice) => return Some(choice),
                    },
                }
            }
        })
    }

    fn pick_yes_no(&self, placeholder: String) -> PromptFuture<Option<Confirmation>> {
        let terminal = Arc::clone(&self.terminal);
        let events = Arc::clone(&self.events);

        Box::pin(async move {
            let mut selected_yes = false;

            loop {
                let overlay = ConfirmOverlay::new(&placeholder, selected_yes);
                if draw(&terminal, &overlay).await.is_err() {
                    return None;
                }

                match next_signal(&events).await? {
                    Signal::Redraw => {}
                    Signal::Key(key) => match handle_confirm_key(&mut selected_yes, key) {
                        ConfirmDecision::Continue => {}
                        ConfirmDecision::Dismiss => return None,
                        ConfirmDecision::No => return Some(Confirmation::No),
                        ConfirmDecision::Yes => return Some(Confirmation::Yes),
                    },
                }
            }
        })
    }

    fn prompt_text(&self, placeholder: String) -> PromptFuture<Option<String>> {
        let terminal = Arc::clone(&self.terminal);
        let events = Arc::clone(&self.events);

        Box::pin(async move {
            let mut input = LineInput::new();

            loop {
                let input_box = InputBox::new(&placeholder, input.text(), input.cursor());
                if draw(&terminal, &input_box).await.is_err() {
                    return None;
                }

                match next_signal(&events).await? {
                    Signal::Redraw => {}
                    Signal::Key(key) => match handle_input_key(&mut input, key) {
                        InputDecision::Cancel => return None,
                        InputDecision::Continue => {}
                        InputDecision::Submit(text) => return Some(text),
                    },
                }
            }
        })
    }

    fn show_error(&self, message: String) -> PromptFuture<()> {
        let terminal = Arc::clone(&self.terminal);
        let events = Arc::clone(&self.events);

        Box::pin(async move {
            loop {
                let overlay = MessageOverlay::new(&message);
                if draw(&terminal, &overlay).await.is_err() {
                    return;
                }

                match next_signal(&events).await {
                    None | Some(Signal::Key(_)) => return,
                    Some(Signal::Redraw) => {}
                }
            }
        })
    }
}

/// Draws one component over the full frame.
async fn draw(
    terminal: &Arc<Mutex<TuiTerminal>>,
    component: &dyn Component,
) -> std::io::Result<()> {
    let mut guard = terminal.lock().await;
    let result = guard.draw(|frame| {
        let area = frame.area();
        component.render(frame, area);
    });
    if let Err(error) = &result {
        tracing::error!("failed to draw prompt: {error}");
    }

    result.map(|_| ())
}

/// Waits for the next event worth acting on: a key press, or a resize
/// that needs a redraw. `None` means the event reader is gone.
async fn next_signal(events: &Arc<Mutex<mpsc::UnboundedReceiver<Event>>>) -> Option<Signal> {
    let mut receiver = events.lock().await;

    loop {
        match receiver.recv().await? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                return Some(Signal::Key(key));
            }
            Event::Resize(_, _) => return Some(Signal::Redraw),
            _ => {}
        }
    }
}

use std::time::Duration;

use crossterm::event::Event;
use tokio::sync::mpsc;

/// Spawns a dedicated thread that reads crossterm events into `event_tx`.
///
/// Crossterm reads block, so keeping them off the async runtime lets the
/// prompt loops stay responsive. The thread stops once the receiving side
/// is dropped.
pub(crate) fn spawn_event_reader(event_tx: mpsc::UnboundedSender<Event>) {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::poll(Duration::from_millis(250)) {
                Ok(true) => {
                    let Ok(event) = crossterm::event::read() else {
                        break;
                    };
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}

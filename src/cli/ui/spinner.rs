//! Terminal spinner shown while a backend call is in flight
//!
//! RAII: starts on creation, clears its line when dropped, so a handler
//! that bails early through `?` never leaves a stuck frame behind.

use std::io::{self, Write};
use std::time::Duration;

use tokio::sync::oneshot;

const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

pub struct Spinner {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(Self::run(message, stop_rx));

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    async fn run(message: String, mut stop_rx: oneshot::Receiver<()>) {
        let mut frame = 0;
        loop {
            print!("\r{} {}", FRAMES[frame % FRAMES.len()], message);
            let _ = io::stdout().flush();
            frame += 1;

            tokio::select! {
                _ = tokio::time::sleep(FRAME_INTERVAL) => {}
                _ = &mut stop_rx => break,
            }
        }
        clear_line();
    }

    fn stop_internal(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            // Drop cannot await; aborting is fine, the line gets cleared below.
            handle.abort();
        }
        clear_line();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop_internal();
    }
}

fn clear_line() {
    print!("\r\x1b[K");
    let _ = io::stdout().flush();
}

/// Run a future with a spinner on the line.
pub async fn with_spinner<F, T>(message: impl Into<String>, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let _spinner = Spinner::start(message);
    future.await
}

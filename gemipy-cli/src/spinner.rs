//! Progress spinner shown while waiting on the model

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Spinner animated on its own thread until stopped
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        Self::with_interval(message, TICK_INTERVAL)
    }

    pub fn with_interval(message: impl Into<String>, interval: Duration) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let message = message.into();

        let handle = thread::spawn(move || {
            let bar = ProgressBar::new_spinner();
            let style = ProgressStyle::with_template("{msg:.yellow.bold} {spinner:.yellow}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars(TICK_CHARS);
            bar.set_style(style);
            bar.set_message(message);

            while flag.load(Ordering::Acquire) {
                bar.tick();
                thread::sleep(interval);
            }
            bar.finish_and_clear();
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stop the animation and wait until the line is cleared
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.halt();
    }
}

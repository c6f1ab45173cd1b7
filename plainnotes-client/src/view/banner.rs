use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::AbortHandle;

/// A transient error message that clears itself after a delay.
///
/// Showing a new message restarts the countdown; a dismissal scheduled
/// for an older message never clears a newer one.
pub struct ErrorBanner {
    state: Arc<Mutex<BannerState>>,
    dismissal: Option<AbortHandle>,
    delay: Duration,
}

#[derive(Default)]
struct BannerState {
    message: Option<String>,
    generation: u64,
}

impl ErrorBanner {
    pub fn new(delay: Duration) -> Self {
        ErrorBanner {
            state: Arc::new(Mutex::new(BannerState::default())),
            dismissal: None,
            delay,
        }
    }

    /// Must be called from within a tokio runtime
    pub fn show(&mut self, message: impl Into<String>) {
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.message = Some(message.into());
            state.generation
        };
        self.cancel_dismissal();

        let state = self.state.clone();
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            if state.generation == generation {
                state.message = None;
            }
        });
        self.dismissal = Some(task.abort_handle());
    }

    pub fn message(&self) -> Option<String> {
        lock(&self.state).message.clone()
    }

    pub fn clear(&mut self) {
        self.cancel_dismissal();
        lock(&self.state).message = None;
    }

    fn cancel_dismissal(&mut self) {
        if let Some(dismissal) = self.dismissal.take() {
            dismissal.abort();
        }
    }
}

impl Drop for ErrorBanner {
    fn drop(&mut self) {
        self.cancel_dismissal();
    }
}

fn lock(state: &Mutex<BannerState>) -> MutexGuard<'_, BannerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

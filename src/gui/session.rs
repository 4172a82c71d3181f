use crate::core::tasks::TaskHandle;

/// Whether the backend has a test session in progress, shared by the nav bar
/// and the test pages. Kept fresh by a background poll owned by this struct.
#[derive(Default)]
pub struct SessionState {
    active: bool,
    poll: Option<TaskHandle>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a running poll task, cancelling any previous one.
    pub fn mount(&mut self, poll: TaskHandle) {
        self.teardown();
        self.poll = Some(poll);
    }

    pub fn teardown(&mut self) {
        if let Some(poll) = self.poll.take() {
            poll.cancel();
            tracing::debug!("session poll cancelled");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll.as_ref().is_some_and(|poll| !poll.is_cancelled())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            tracing::info!(active, "test session status changed");
        }
        self.active = active;
    }

    /// Applies a poll or explicit status reply. Failures keep the last known value.
    pub fn update(&mut self, result: &Result<bool, String>) {
        match result {
            Ok(active) => self.set_active(*active),
            Err(e) => tracing::warn!("Failed to refresh test session status: {e}"),
        }
    }
}

impl Drop for SessionState {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        thread,
        time::Duration,
    };

    use super::*;

    fn idle_task() -> (TaskHandle, Arc<AtomicBool>) {
        let token = Arc::new(AtomicBool::new(false));
        let task_token = token.clone();
        let join = thread::spawn(move || {
            while !task_token.load(Ordering::Relaxed) {
                thread::sleep(Duration::from_millis(5));
            }
        });
        (TaskHandle::new(token.clone(), join), token)
    }

    #[test]
    fn teardown_cancels_poll() {
        let (handle, token) = idle_task();
        let mut session = SessionState::new();

        session.mount(handle);
        assert!(session.is_polling());

        session.teardown();
        assert!(!session.is_polling());
        assert!(token.load(Ordering::Relaxed));
    }

    #[test]
    fn remount_cancels_previous_poll() {
        let (first, first_token) = idle_task();
        let (second, second_token) = idle_task();
        let mut session = SessionState::new();

        session.mount(first);
        session.mount(second);

        assert!(first_token.load(Ordering::Relaxed));
        assert!(!second_token.load(Ordering::Relaxed));
        drop(session);
        assert!(second_token.load(Ordering::Relaxed));
    }

    #[test]
    fn failed_refresh_keeps_last_value() {
        let mut session = SessionState::new();
        session.update(&Ok(true));
        session.update(&Err("connection refused".into()));
        assert!(session.is_active());
        session.update(&Ok(false));
        assert!(!session.is_active());
    }
}

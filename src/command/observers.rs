use std::sync::Arc;

use parking_lot::RwLock;

use super::Command;
use crate::error::Error;

pub type CommandObserver = Arc<dyn Fn(&Command) + Send + Sync>;
pub type FailureObserver = Arc<dyn Fn(&Error, &Command) + Send + Sync>;

/// Callbacks run around command execution
///
/// Pre-execute observers run once the connection is open, post-execute
/// observers after a successful run, failure observers before an error is
/// returned to the caller. Observers can inspect but not alter the outcome.
#[derive(Default)]
pub struct Observers {
    pre_execute:  RwLock<Vec<CommandObserver>>,
    post_execute: RwLock<Vec<CommandObserver>>,
    unhandled:    RwLock<Vec<FailureObserver>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pre_execute(&self, observer: impl Fn(&Command) + Send + Sync + 'static) {
        self.pre_execute.write().push(Arc::new(observer));
    }

    pub fn on_post_execute(&self, observer: impl Fn(&Command) + Send + Sync + 'static) {
        self.post_execute.write().push(Arc::new(observer));
    }

    pub fn on_unhandled_error(&self, observer: impl Fn(&Error, &Command) + Send + Sync + 'static) {
        self.unhandled.write().push(Arc::new(observer));
    }

    pub fn clear(&self) {
        self.pre_execute.write().clear();
        self.post_execute.write().clear();
        self.unhandled.write().clear();
    }

    // Observers are cloned out of the lock so they may register further observers.

    pub(crate) fn notify_pre_execute(&self, command: &Command) {
        let observers = self.pre_execute.read().clone();
        observers.iter().for_each(|observer| observer(command));
    }

    pub(crate) fn notify_post_execute(&self, command: &Command) {
        let observers = self.post_execute.read().clone();
        observers.iter().for_each(|observer| observer(command));
    }

    pub(crate) fn notify_unhandled(&self, error: &Error, command: &Command) {
        let observers = self.unhandled.read().clone();
        observers.iter().for_each(|observer| observer(error, command));
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("pre_execute", &self.pre_execute.read().len())
            .field("post_execute", &self.post_execute.read().len())
            .field("unhandled", &self.unhandled.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;

    #[test]
    fn test_observers_are_invoked_in_registration_order() {
        let observers = Observers::new();
        let seen = Arc::new(RwLock::new(Vec::new()));

        for label in ["first", "second"] {
            let seen = seen.clone();
            observers.on_pre_execute(move |command| {
                seen.write().push(format!("{label}:{}", command.text().unwrap_or_default()))
            });
        }

        let mut command = Command::new();
        command.set_text("SELECT 1");
        observers.notify_pre_execute(&command);

        assert_eq!(*seen.read(), vec!["first:SELECT 1".to_string(), "second:SELECT 1".to_string()]);
    }

    #[test]
    fn test_failure_observers_receive_the_error() {
        let observers = Observers::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        observers.on_unhandled_error(move |error, _| {
            assert!(matches!(error, Error::CommandReleased));
            counter.fetch_add(1, Ordering::SeqCst);
        });

        observers.notify_unhandled(&Error::CommandReleased, &Command::new());
        observers.notify_post_execute(&Command::new());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        observers.clear();
        observers.notify_unhandled(&Error::CommandReleased, &Command::new());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

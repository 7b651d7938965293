//! Mount handle that lets a screen follow theme changes.

use alloc::rc::Rc;
use core::cell::Cell;

use super::store::{Subscription, ThemeError, ThemeStore};
use super::ThemeMode;

/// State shared between a consumer and its store callback.
#[derive(Debug)]
struct Observed {
    mode: Cell<ThemeMode>,
    notifications: Cell<u32>,
    changed: Cell<bool>,
}

/// A mounted theme observer.
///
/// Each screen holds one of these for as long as it is mounted. Every toggle
/// of the store records the new mode and raises a change flag that the
/// screen's `update` consumes to schedule a redraw. Unmounting (explicitly or
/// by dropping) removes the observer from the store.
#[derive(Debug)]
pub struct ThemeConsumer<'a> {
    subscription: Option<Subscription<'a>>,
    observed: Rc<Observed>,
}

impl<'a> ThemeConsumer<'a> {
    /// Subscribe to `store`, starting from the mode active right now.
    pub fn mount(store: &'a ThemeStore) -> Result<Self, ThemeError> {
        let observed = Rc::new(Observed {
            mode: Cell::new(store.mode()),
            notifications: Cell::new(0),
            changed: Cell::new(false),
        });

        let sink = Rc::clone(&observed);
        let subscription = store.subscribe(move |mode| {
            sink.mode.set(mode);
            sink.notifications.set(sink.notifications.get().wrapping_add(1));
            sink.changed.set(true);
        })?;

        Ok(Self {
            subscription: Some(subscription),
            observed,
        })
    }

    /// Last mode delivered to this consumer, or the mode at mount time.
    pub fn observed(&self) -> ThemeMode {
        self.observed.mode.get()
    }

    /// Total number of notifications received while mounted.
    pub fn notifications(&self) -> u32 {
        self.observed.notifications.get()
    }

    /// Returns `true` once per batch of notifications.
    pub fn take_changed(&self) -> bool {
        self.observed.changed.replace(false)
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop receiving notifications. Counters keep their last values.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_starts_from_current_mode() {
        let store = ThemeStore::new();
        let consumer = ThemeConsumer::mount(&store).unwrap();
        assert_eq!(consumer.observed(), ThemeMode::Dark);
        assert_eq!(consumer.notifications(), 0);
        assert!(!consumer.take_changed());

        store.toggle();
        let late = ThemeConsumer::mount(&store).unwrap();
        assert_eq!(late.observed(), ThemeMode::Light);
    }

    #[test]
    fn test_two_consumers_see_the_same_value() {
        let store = ThemeStore::new();
        let first = ThemeConsumer::mount(&store).unwrap();
        let second = ThemeConsumer::mount(&store).unwrap();

        store.toggle();

        assert_eq!(first.observed(), ThemeMode::Light);
        assert_eq!(second.observed(), ThemeMode::Light);
        assert_eq!(first.notifications(), 1);
        assert_eq!(second.notifications(), 1);
    }

    #[test]
    fn test_unmounted_consumer_receives_nothing() {
        let store = ThemeStore::new();
        let mut consumer = ThemeConsumer::mount(&store).unwrap();
        consumer.unmount();
        assert!(!consumer.is_mounted());

        store.toggle();
        store.toggle();

        assert_eq!(consumer.notifications(), 0);
        assert_eq!(consumer.observed(), ThemeMode::Dark);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_unmounts() {
        let store = ThemeStore::new();
        {
            let _consumer = ThemeConsumer::mount(&store).unwrap();
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_change_flag_coalesces_until_taken() {
        let store = ThemeStore::new();
        let consumer = ThemeConsumer::mount(&store).unwrap();

        store.toggle();
        store.toggle();
        assert_eq!(consumer.notifications(), 2);
        assert!(consumer.take_changed());
        assert!(!consumer.take_changed());
    }
}

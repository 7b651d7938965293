//! Single-instance theme store with an explicit observer list.

use alloc::boxed::Box;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use heapless::{Deque, Vec};
use log::{debug, warn};
use thiserror_no_std::Error;

use super::ThemeMode;

/// Maximum number of observers that can be registered at once.
///
/// Three screens plus the navigation chrome need four; the rest is headroom.
pub const MAX_THEME_SUBSCRIBERS: usize = 8;

/// Distinct groups of toggles that can wait behind an active round.
const MAX_QUEUED_ROUNDS: usize = 8;

type Callback = Box<dyn FnMut(ThemeMode)>;

/// Error types for theme store operations
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Observer list is full
    #[error("Theme subscriber capacity exceeded (max: {max})")]
    SubscriberCapacityExceeded {
        /// Maximum allowed subscriber count
        max: usize,
    },
}

struct Slot {
    id: u32,
    /// `None` only while the callback itself is running.
    callback: Option<Callback>,
}

/// Consecutive toggles that reach the same observers.
///
/// Only observers with an id below `watermark` were registered when these
/// toggles were issued, so only they are notified.
struct PendingRounds {
    watermark: u32,
    count: u32,
}

struct StoreState {
    mode: ThemeMode,
    next_id: u32,
    slots: Vec<Slot, MAX_THEME_SUBSCRIBERS>,
    notifying: bool,
    /// Toggles whose notification round has not been delivered yet.
    pending: Deque<PendingRounds, MAX_QUEUED_ROUNDS>,
}

impl StoreState {
    fn slot_mut(&mut self, id: u32) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }

    fn queue_round(&mut self) {
        let watermark = self.next_id;
        if let Some(back) = self.pending.back_mut() {
            if back.watermark == watermark {
                back.count += 1;
                return;
            }
        }

        if let Err(rejected) = self.pending.push_back(PendingRounds {
            watermark,
            count: 1,
        }) {
            warn!("Theme round queue full, merging toggle into the last round");
            if let Some(back) = self.pending.back_mut() {
                back.watermark = rejected.watermark;
                back.count += 1;
            }
        }
    }
}

/// Holds the active [`ThemeMode`] and notifies observers when it flips.
///
/// The store is created once at startup and passed by reference to whatever
/// needs it. All access happens on the UI thread, so the state sits behind a
/// [`NoopRawMutex`]. No borrow is held while an observer runs, which lets
/// observers read the mode, subscribe, unsubscribe or even toggle from inside
/// their callback.
///
/// # Examples
///
/// ```
/// use fydp_core::theme::{ThemeMode, ThemeStore};
///
/// let store = ThemeStore::new();
/// assert_eq!(store.mode(), ThemeMode::Dark);
///
/// let subscription = store.subscribe(|mode| log::info!("now {mode}")).unwrap();
/// store.toggle();
/// assert_eq!(store.mode(), ThemeMode::Light);
/// subscription.unsubscribe();
/// ```
pub struct ThemeStore {
    state: Mutex<NoopRawMutex, RefCell<StoreState>>,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("mode", &self.mode())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Create a store in the boot mode ([`ThemeMode::Dark`]).
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(StoreState {
                mode: ThemeMode::Dark,
                next_id: 0,
                slots: Vec::new(),
                notifying: false,
                pending: Deque::new(),
            })),
        }
    }

    fn with_state<U>(&self, f: impl FnOnce(&mut StoreState) -> U) -> U {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Current mode.
    pub fn mode(&self) -> ThemeMode {
        self.with_state(|state| state.mode)
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.with_state(|state| state.slots.len())
    }

    /// Register an observer that is called with the new mode after every
    /// toggle, until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Result<Subscription<'_>, ThemeError>
    where
        F: FnMut(ThemeMode) + 'static,
    {
        let callback: Callback = Box::new(callback);

        let result = self.with_state(|state| {
            let id = state.next_id;
            match state.slots.push(Slot {
                id,
                callback: Some(callback),
            }) {
                Ok(()) => {
                    state.next_id = state.next_id.wrapping_add(1);
                    Ok(id)
                }
                Err(rejected) => Err(rejected),
            }
        });

        match result {
            Ok(id) => {
                debug!("Theme subscriber {} registered", id);
                Ok(Subscription { store: self, id })
            }
            Err(rejected) => {
                // Dropped outside the borrow; the callback may own store handles.
                drop(rejected);
                Err(ThemeError::SubscriberCapacityExceeded {
                    max: MAX_THEME_SUBSCRIBERS,
                })
            }
        }
    }

    /// Flip between light and dark and notify every observer.
    ///
    /// Observers registered when the toggle starts are called once each, in
    /// subscription order, before this returns. A toggle issued from inside an
    /// observer is delivered as a separate round once the current one ends,
    /// and only to observers that were registered when it was issued.
    pub fn toggle(&self) {
        let first_round = self.with_state(|state| {
            state.mode = state.mode.toggled();
            state.queue_round();
            if state.notifying {
                None
            } else {
                state.notifying = true;
                Some(state.mode)
            }
        });

        let Some(mut round_mode) = first_round else {
            debug!("Theme toggle queued behind the active notification round");
            return;
        };

        loop {
            let next = self.with_state(|state| match state.pending.front() {
                Some(round) => Some(round.watermark),
                None => {
                    state.notifying = false;
                    None
                }
            });
            let Some(watermark) = next else {
                break;
            };

            debug!("Theme toggled to {}", round_mode);
            self.notify_round(round_mode, watermark);

            self.with_state(|state| {
                if let Some(round) = state.pending.front_mut() {
                    round.count -= 1;
                    if round.count == 0 {
                        state.pending.pop_front();
                    }
                }
            });
            round_mode = round_mode.toggled();
        }
    }

    fn notify_round(&self, mode: ThemeMode, watermark: u32) {
        let ids: Vec<u32, MAX_THEME_SUBSCRIBERS> = self.with_state(|state| {
            state
                .slots
                .iter()
                .map(|slot| slot.id)
                .filter(|&id| id < watermark)
                .collect()
        });

        for id in ids {
            let Some(mut callback) =
                self.with_state(|state| state.slot_mut(id).and_then(|slot| slot.callback.take()))
            else {
                // Unsubscribed earlier in this round
                continue;
            };

            callback(mode);

            let orphaned = self.with_state(|state| match state.slot_mut(id) {
                Some(slot) => {
                    slot.callback = Some(callback);
                    None
                }
                None => Some(callback),
            });
            drop(orphaned);
        }
    }

    fn remove(&self, id: u32) {
        let removed = self.with_state(|state| {
            state
                .slots
                .iter()
                .position(|slot| slot.id == id)
                .map(|index| state.slots.remove(index))
        });

        if removed.is_some() {
            debug!("Theme subscriber {} removed", id);
        }
        drop(removed);
    }
}

/// Unsubscribe handle returned by [`ThemeStore::subscribe`].
///
/// The observer stays registered for as long as this value lives.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<'a> {
    store: &'a ThemeStore,
    id: u32,
}

impl Subscription<'_> {
    /// Identifier assigned by the store, unique for the store's lifetime.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Remove the observer. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self)
    }
}

impl core::fmt::Debug for Subscription<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription<'_> {
    fn drop(&mut self) {
        self.store.remove(self.id);
    }
}

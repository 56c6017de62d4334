//! Change notification with nested hold/release batching
//!
//! Both the scene [`Group`](crate::group::Group) and the view camera own an
//! [`UpdateNotifier`]. Every mutating operation brackets its work in a
//! hold/release pair; listeners only hear about the change when the outermost
//! release brings the hold depth back to zero, so a compound edit produces
//! exactly one notification however many primitive setters it runs.

use std::fmt;

/// Granularity of a group change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupUpdate {
    /// Geometry (and possibly attributes) changed
    All,
    /// Only display attributes changed
    Attributes,
}

/// Callback invoked once per flushed change
pub type Listener<U> = Box<dyn FnMut(U)>;

/// Listener list plus a transaction depth counter
pub struct UpdateNotifier<U> {
    listeners: Vec<Listener<U>>,
    holds: usize,
}

impl<U: Copy> UpdateNotifier<U> {
    /// Create a notifier with no listeners
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            holds: 0,
        }
    }

    /// Register a listener
    pub fn add_listener(&mut self, listener: impl FnMut(U) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Current hold depth
    pub fn depth(&self) -> usize {
        self.holds
    }

    /// Whether notifications are currently suppressed
    pub fn is_holding(&self) -> bool {
        self.holds > 0
    }

    /// Open one level of suppression
    pub fn hold(&mut self) {
        self.holds += 1;
    }

    /// Close one level of suppression, flushing `update` when the depth reaches zero.
    ///
    /// A release without a matching hold clamps the depth at zero and still
    /// flushes.
    pub fn release(&mut self, update: U) {
        if self.holds == 0 {
            tracing::warn!("update release without a matching hold; depth clamped to zero");
        } else {
            self.holds -= 1;
        }

        if self.holds == 0 {
            self.notify(update);
        }
    }

    /// `hold()` for `true`, `release(update)` for `false`
    pub fn hold_updates(&mut self, do_hold: bool, update: U) {
        if do_hold {
            self.hold();
        } else {
            self.release(update);
        }
    }

    /// Deliver `update` to every listener unless a hold is open
    pub fn notify(&mut self, update: U) {
        if self.is_holding() {
            return;
        }
        for listener in self.listeners.iter_mut() {
            listener(update);
        }
    }
}

impl<U: Copy> Default for UpdateNotifier<U> {
    fn default() -> Self {
        Self::new()
    }
}

/// Listeners belong to one instance; a copy starts with none
impl<U: Copy> Clone for UpdateNotifier<U> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for UpdateNotifier<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateNotifier")
            .field("listeners", &self.listeners.len())
            .field("holds", &self.holds)
            .finish()
    }
}

//! # Fullscreen Platform Surface
//!
//! The platform owns a single global fullscreen state. Components see it
//! through the [`FullscreenControl`] trait and learn about changes they did not
//! initiate (the user pressing Esc, another component taking over) through
//! the [`FullscreenRegistry`].
//!
//! ```text
//!   platform change ──► FullscreenRegistry ──► subscriber ids ──► sync_fullscreen_exit()
//!                        (one per process)     (fan-out)
//! ```
//!
//! Instances subscribe when mounted and hold a [`Subscription`] guard.
//! Dropping the guard deregisters the instance, so release on unmount does
//! not depend on anyone remembering to call an unsubscribe method.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

use log::debug;

/// Process-unique identity of a component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Direct handle to a component's root renderable surface.
///
/// Handed to the instance at construction so the fullscreen request never
/// has to resolve the surface from a component reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(InstanceId);

impl SurfaceHandle {
    pub fn for_instance(id: InstanceId) -> Self {
        Self(id)
    }

    pub fn instance(&self) -> InstanceId {
        self.0
    }
}

/// The platform's fullscreen control surface.
pub trait FullscreenControl {
    /// Whether the host allows fullscreen at all.
    fn is_enabled(&self) -> bool;

    /// Ask the platform to show `surface` fullscreen. May be denied silently.
    fn request(&mut self, surface: SurfaceHandle);

    /// Leave fullscreen. May be denied silently.
    fn exit(&mut self);

    /// Current global fullscreen status.
    fn is_fullscreen(&self) -> bool;

    /// Returns `true` once per batch of fullscreen changes since the last call.
    fn take_change_notification(&mut self) -> bool;
}

type Subscribers = Rc<RefCell<BTreeSet<InstanceId>>>;

/// Single process-wide subscription to the platform's change notification.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct FullscreenRegistry {
    subscribers: Subscribers,
}

impl FullscreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` for change notifications until the returned guard drops.
    pub fn subscribe(&self, id: InstanceId) -> Subscription {
        let inserted = self.subscribers.borrow_mut().insert(id);
        if !inserted {
            debug!("Instance {} subscribed twice; keeping one registration", id);
        }
        debug!("Fullscreen listener added for {}", id);
        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    pub fn is_subscribed(&self, id: InstanceId) -> bool {
        self.subscribers.borrow().contains(&id)
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    /// Drain the platform's pending notification and return the instances
    /// that must be told about it, in ascending id order.
    ///
    /// Returns an empty list when nothing changed.
    pub fn dispatch(&self, platform: &mut dyn FullscreenControl) -> Vec<InstanceId> {
        if !platform.take_change_notification() {
            return Vec::new();
        }
        let ids: Vec<InstanceId> = self.subscribers.borrow().iter().copied().collect();
        debug!(
            "Fullscreen change (active={}), notifying {} listener(s)",
            platform.is_fullscreen(),
            ids.len()
        );
        ids
    }
}

/// Registration guard returned by [`FullscreenRegistry::subscribe`].
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: InstanceId,
    subscribers: Weak<RefCell<BTreeSet<InstanceId>>>,
}

impl Subscription {
    pub fn id(&self) -> InstanceId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().remove(&self.id);
            debug!("Fullscreen listener removed for {}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedFullscreen;

    #[test]
    fn subscribe_registers_until_guard_drops() {
        let registry = FullscreenRegistry::new();
        let sub = registry.subscribe(InstanceId(1));
        assert!(registry.is_subscribed(InstanceId(1)));
        assert_eq!(registry.len(), 1);

        drop(sub);
        assert!(!registry.is_subscribed(InstanceId(1)));
        assert!(registry.is_empty());
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let registry = FullscreenRegistry::new();
        let sub = registry.subscribe(InstanceId(7));
        drop(registry);
        assert_eq!(sub.id(), InstanceId(7));
        drop(sub);
    }

    #[test]
    fn dispatch_without_change_notifies_nobody() {
        let registry = FullscreenRegistry::new();
        let _a = registry.subscribe(InstanceId(1));
        let mut platform = ScriptedFullscreen::new();

        assert!(registry.dispatch(&mut platform).is_empty());
    }

    #[test]
    fn dispatch_fans_out_to_every_subscriber_once() {
        let registry = FullscreenRegistry::new();
        let _b = registry.subscribe(InstanceId(2));
        let _a = registry.subscribe(InstanceId(1));
        let mut platform = ScriptedFullscreen::new();
        platform.fire_change();

        assert_eq!(
            registry.dispatch(&mut platform),
            vec![InstanceId(1), InstanceId(2)]
        );
        // Notification is consumed
        assert!(registry.dispatch(&mut platform).is_empty());
    }

    #[test]
    fn clones_share_subscribers() {
        let registry = FullscreenRegistry::new();
        let handle = registry.clone();
        let _sub = handle.subscribe(InstanceId(3));
        assert!(registry.is_subscribed(InstanceId(3)));
    }

    #[test]
    fn surface_handle_keeps_instance() {
        let handle = SurfaceHandle::for_instance(InstanceId(42));
        assert_eq!(handle.instance(), InstanceId(42));
        assert_eq!(InstanceId(42).to_string(), "#42");
    }
}

//! Per-attribute serialization of read-modify-write sequences.
//!
//! Properties packed into one attribute share a lock, so two concurrent
//! writers of different sub-fields cannot interleave their read and write
//! and lose one of the updates.

use crate::zcl::ClusterId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

#[derive(Default)]
pub struct AttributeLocks {
    locks: Mutex<HashMap<(ClusterId, u16), Arc<AsyncMutex<()>>>>,
}

impl AttributeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding `attribute_id` in `cluster`, created on first use.
    pub fn get(&self, cluster: ClusterId, attribute_id: u16) -> Arc<AsyncMutex<()>> {
        self.locks
            .lock()
            .entry((cluster, attribute_id))
            .or_default()
            .clone()
    }

    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready};

    #[test]
    fn test_same_attribute_shares_lock() {
        let locks = AttributeLocks::new();
        let a = locks.get(ClusterId::PresenceConfig, 0x0016);
        let b = locks.get(ClusterId::PresenceConfig, 0x0016);
        let c = locks.get(ClusterId::OnOff, 0x0016);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(locks.len(), 2);
    }

    #[test]
    fn test_lock_excludes() {
        let locks = AttributeLocks::new();
        let lock = locks.get(ClusterId::PresenceConfig, 0x0016);
        let held = lock.try_lock().unwrap();

        let other = locks.get(ClusterId::PresenceConfig, 0x0016);
        let mut waiter = tokio_test::task::spawn(other.lock());
        assert_pending!(waiter.poll());

        drop(held);
        assert!(waiter.is_woken());
        assert_ready!(waiter.poll());
    }
}

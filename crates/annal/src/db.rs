//! Unified Annal database interface
//!
//! Provides a single entry point wiring the event store, audit trail,
//! producers, and auth service together.

use annal_audit::AuditTrail;
use annal_auth::{AuthService, UserRecord};
use annal_core::EventStore;
use annal_orders::OrderLedger;
use annal_polls::EngagementTracker;
use std::sync::Arc;

/// Unified Annal database
///
/// Bundles one event store with the layers that write to and read from
/// it. Every layer shares the same store, so an unfiltered query on
/// [`store`](AnnalDb::store) sees logins, orders, and poll engagements
/// interleaved in one sequence.
pub struct AnnalDb {
    store: Arc<EventStore>,
    audit: AuditTrail,
    orders: OrderLedger,
    polls: EngagementTracker,
    auth: AuthService,
}

impl AnnalDb {
    /// Create an empty database with the built-in user list.
    pub fn new() -> Self {
        Self::with_users(annal_auth::default_users())
    }

    /// Create an empty database with a custom user list.
    pub fn with_users(users: Vec<UserRecord>) -> Self {
        let store = Arc::new(EventStore::new());
        let audit = AuditTrail::new(store.clone());
        let orders = OrderLedger::new(store.clone());
        let polls = EngagementTracker::new(store.clone());
        let auth = AuthService::with_users(audit.clone(), users);

        Self {
            store,
            audit,
            orders,
            polls,
            auth,
        }
    }

    /// The shared event store.
    pub fn store(&self) -> &Arc<EventStore> {
        &self.store
    }

    /// The audit trail over the shared store.
    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    /// The order lifecycle ledger.
    pub fn orders(&self) -> &OrderLedger {
        &self.orders
    }

    /// The poll engagement tracker.
    pub fn polls(&self) -> &EngagementTracker {
        &self.polls
    }

    /// The audited auth service.
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }
}

impl Default for AnnalDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_share_one_store() {
        let db = AnnalDb::new();

        db.orders().create_order("ORD-1", 10.0).unwrap();
        db.auth().login("admin", "admin123").unwrap();

        // One order event plus login attempt and success.
        assert_eq!(db.store().count(None).unwrap(), 3);
        assert_eq!(db.audit().count(None).unwrap(), 2);
    }

    #[test]
    fn test_default_is_empty() {
        let db = AnnalDb::default();
        assert_eq!(db.store().count(None).unwrap(), 0);
        assert_eq!(db.store().stats().generation, 1);
    }
}

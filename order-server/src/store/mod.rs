//! redb-based order store with secondary indexes
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `id` | `Order` (JSON) | Primary record (point lookup) |
//! | `order_numbers` | `order_number` | `id` | Public tracking lookup |
//! | `orders_by_date` | `pickup_date` | `id` (multimap) | Date partition |
//! | `orders_by_status` | `status` | `id` (multimap) | Status partition |
//! | `recency` | `(created_at, id)` | `()` | Global recency ranking |
//! | `counters` | name | `u64` | Monotonic id counter |
//! | `index_retention` | partition key | expires-at millis | Index-tier TTL |
//!
//! # Two-tier retention
//!
//! The primary record and the order-number mapping are durable until
//! explicit deletion. The date and status partitions are an expiring index
//! tier: every write that puts a member into a partition (create, status
//! move) refreshes that partition's 30-day retention stamp, and a partition
//! whose stamp has lapsed reads as empty. The next write into a lapsed
//! partition purges its old members before re-stamping, so expiry is never
//! undone retroactively. Aggregate stats served from the index tier
//! therefore under-count old data; the all-time `total` comes from the
//! recency ranking, which never expires.
//!
//! # Atomicity
//!
//! Every mutation runs inside a single write transaction, so an order is
//! never observable in a partial state: either all five locations see it or
//! none do. The original service only had pipeline-level batching here;
//! the transactional engine also lets `create` reject duplicate order
//! numbers and lets `update_status` serialize against concurrent writers.

use redb::{
    Database, MultimapTableDefinition, ReadTransaction, ReadableDatabase, ReadableMultimapTable,
    ReadableTable, ReadableTableMetadata, TableDefinition,
};
use shared::order::{ListFilter, Order, OrderDraft, OrderStats, OrderStatus};
use shared::util::{now_millis, today};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

mod error;

pub use error::{StoreError, StoreResult};

/// Primary records: key = order id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Order-number mapping: key = order_number, value = order id
const ORDER_NUMBERS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("order_numbers");

/// Date partition: key = pickup_date (YYYY-MM-DD), values = order ids
const DATE_INDEX: MultimapTableDefinition<&str, &str> =
    MultimapTableDefinition::new("orders_by_date");

/// Status partition: key = status wire string, values = order ids
const STATUS_INDEX: MultimapTableDefinition<&str, &str> =
    MultimapTableDefinition::new("orders_by_status");

/// Global recency ranking: key = (created_at millis, order id)
const RECENCY_TABLE: TableDefinition<(i64, &str), ()> = TableDefinition::new("recency");

/// Named counters: key = counter name, value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

/// Index-tier retention stamps: key = partition key, value = expires-at millis
const RETENTION_TABLE: TableDefinition<&str, i64> = TableDefinition::new("index_retention");

const ORDER_SEQ_KEY: &str = "order_seq";

/// Index-tier retention window: 30 days in milliseconds.
const INDEX_RETENTION_MS: i64 = 30 * 24 * 60 * 60 * 1000;

fn date_retention_key(date: &str) -> String {
    format!("date:{date}")
}

fn status_retention_key(status: OrderStatus) -> String {
    format!("status:{}", status.as_str())
}

/// Order store backed by redb
#[derive(Clone)]
pub struct OrderStore {
    db: Arc<Database>,
}

impl OrderStore {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate`: once a create or status
    /// update returns, the order survives a power loss, and the database
    /// file is always in a consistent state (copy-on-write pointer swap).
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        // Create all tables up front so read transactions never race table
        // creation.
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(ORDER_NUMBERS_TABLE)?;
            let _ = write_txn.open_multimap_table(DATE_INDEX)?;
            let _ = write_txn.open_multimap_table(STATUS_INDEX)?;
            let _ = write_txn.open_table(RECENCY_TABLE)?;
            let _ = write_txn.open_table(RETENTION_TABLE)?;

            let mut counters = write_txn.open_table(COUNTERS_TABLE)?;
            if counters.get(ORDER_SEQ_KEY)?.is_none() {
                counters.insert(ORDER_SEQ_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    // ========== Create ==========

    /// Create a new order from intake-supplied fields.
    ///
    /// Allocates the next id from the monotonic counter (never reused, even
    /// after deletion), stamps `created_at = updated_at = now`, then in one
    /// atomic transaction writes the record, the number mapping, both
    /// partition memberships and the recency entry, and refreshes the
    /// 30-day retention stamps on the two partitions touched.
    ///
    /// A duplicate `order_number` aborts the whole transaction with
    /// [`StoreError::DuplicateOrderNumber`]; the counter increment rolls
    /// back with it.
    pub fn create(&self, draft: OrderDraft) -> StoreResult<Order> {
        let now = now_millis();
        let txn = self.db.begin_write()?;
        let order = {
            let mut counters = txn.open_table(COUNTERS_TABLE)?;
            let seq = counters.get(ORDER_SEQ_KEY)?.map(|g| g.value()).unwrap_or(0) + 1;
            counters.insert(ORDER_SEQ_KEY, seq)?;
            drop(counters);

            let id = format!("order_{:08}", seq);
            let order = Order {
                id: id.clone(),
                order_number: draft.order_number,
                customer_name: draft.customer_name,
                customer_phone: draft.customer_phone,
                customer_email: draft.customer_email,
                customer_address: draft.customer_address,
                instructions: draft.instructions,
                services: draft.services,
                pickup_date: draft.pickup_date,
                pickup_time: draft.pickup_time,
                subtotal: draft.subtotal,
                delivery_fee: draft.delivery_fee,
                total: draft.total,
                status: draft.status,
                created_at: now,
                updated_at: now,
            };

            {
                let mut numbers = txn.open_table(ORDER_NUMBERS_TABLE)?;
                if numbers.get(order.order_number.as_str())?.is_some() {
                    return Err(StoreError::DuplicateOrderNumber(order.order_number));
                }
                numbers.insert(order.order_number.as_str(), id.as_str())?;
            }

            {
                let mut orders = txn.open_table(ORDERS_TABLE)?;
                let value = serde_json::to_vec(&order)?;
                orders.insert(id.as_str(), value.as_slice())?;
            }

            // Stamp before inserting memberships: a lapsed partition is
            // purged here, and the new member must survive the purge.
            stamp_partition(
                &txn,
                DATE_INDEX,
                order.pickup_date.as_str(),
                &date_retention_key(&order.pickup_date),
                now,
            )?;
            stamp_partition(
                &txn,
                STATUS_INDEX,
                order.status.as_str(),
                &status_retention_key(order.status),
                now,
            )?;

            {
                let mut by_date = txn.open_multimap_table(DATE_INDEX)?;
                by_date.insert(order.pickup_date.as_str(), id.as_str())?;

                let mut by_status = txn.open_multimap_table(STATUS_INDEX)?;
                by_status.insert(order.status.as_str(), id.as_str())?;
            }

            {
                let mut recency = txn.open_table(RECENCY_TABLE)?;
                recency.insert((now, id.as_str()), ())?;
            }

            order
        };
        txn.commit()?;

        tracing::info!(order_id = %order.id, order_number = %order.order_number, "Order created");
        Ok(order)
    }

    // ========== Point Lookups ==========

    /// Get an order by id. `None` is a valid, non-error outcome.
    pub fn get(&self, id: &str) -> StoreResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        match table.get(id)? {
            Some(value) => Ok(decode_order(id, value.value())),
            None => Ok(None),
        }
    }

    /// Get an order by its human-facing order number.
    ///
    /// Two-step resolution: number -> id, then id -> record. A mapping whose
    /// record is missing (index corruption) reads as not-found.
    pub fn get_by_number(&self, order_number: &str) -> StoreResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let numbers = read_txn.open_table(ORDER_NUMBERS_TABLE)?;

        let id = match numbers.get(order_number)? {
            Some(guard) => guard.value().to_string(),
            None => return Ok(None),
        };
        drop(numbers);

        let orders = read_txn.open_table(ORDERS_TABLE)?;
        match orders.get(id.as_str())? {
            Some(value) => Ok(decode_order(&id, value.value())),
            None => {
                tracing::warn!(order_number = %order_number, order_id = %id,
                    "Dangling order-number mapping, treating as not found");
                Ok(None)
            }
        }
    }

    // ========== Status Update ==========

    /// Update an order's status, atomically moving it between status
    /// partitions and refreshing the destination partition's retention
    /// stamp. Returns the updated order, or `None` if it does not exist.
    /// No-op-safe when the status is unchanged.
    ///
    /// The read-modify-write runs inside one write transaction, so two
    /// concurrent updates on the same order serialize; the order can never
    /// be left in zero or two status partitions.
    pub fn update_status(&self, id: &str, new_status: OrderStatus) -> StoreResult<Option<Order>> {
        let now = now_millis();
        let txn = self.db.begin_write()?;
        let updated = {
            let mut orders = txn.open_table(ORDERS_TABLE)?;

            // Read and decode first to avoid holding the guard across the
            // overwrite.
            let existing = match orders.get(id)? {
                Some(value) => decode_order(id, value.value()),
                None => None,
            };
            let Some(mut order) = existing else {
                return Ok(None);
            };

            let old_status = order.status;
            order.status = new_status;
            order.updated_at = now;

            let value = serde_json::to_vec(&order)?;
            orders.insert(id, value.as_slice())?;
            drop(orders);

            // Moving into a partition keeps it live for another retention
            // window, the same way a create does. Stamp before the insert
            // so a lapsed partition's purge cannot swallow this member.
            stamp_partition(
                &txn,
                STATUS_INDEX,
                new_status.as_str(),
                &status_retention_key(new_status),
                now,
            )?;

            // Harmless round trip when old == new
            let mut by_status = txn.open_multimap_table(STATUS_INDEX)?;
            by_status.remove(old_status.as_str(), id)?;
            by_status.insert(new_status.as_str(), id)?;

            tracing::info!(order_id = %id, from = %old_status, to = %new_status,
                "Order status updated");
            order
        };
        txn.commit()?;
        Ok(Some(updated))
    }

    // ========== Listing ==========

    /// List orders.
    ///
    /// Both `date` and `status`: the set intersection of the two partitions.
    /// One of them: that partition. Neither: a `(offset, offset+limit-1)`
    /// page of the global recency ranking. Whatever path produced the id
    /// set, the hydrated result is re-sorted by `created_at` descending --
    /// the one ordering guarantee exposed to callers.
    ///
    /// Hydration tolerates missing or corrupt individual records by
    /// skipping them (logged, not fatal).
    pub fn list(&self, filter: &ListFilter) -> StoreResult<Vec<Order>> {
        let now = now_millis();
        let read_txn = self.db.begin_read()?;

        let ids: Vec<String> = match (filter.date.as_deref(), filter.status) {
            (Some(date), Some(status)) => {
                let date_ids =
                    self.partition_members(&read_txn, DATE_INDEX, date, &date_retention_key(date), now)?;
                let status_ids = self.partition_members(
                    &read_txn,
                    STATUS_INDEX,
                    status.as_str(),
                    &status_retention_key(status),
                    now,
                )?;
                let status_set: HashSet<String> = status_ids.into_iter().collect();
                date_ids
                    .into_iter()
                    .filter(|id| status_set.contains(id))
                    .collect()
            }
            (Some(date), None) => {
                self.partition_members(&read_txn, DATE_INDEX, date, &date_retention_key(date), now)?
            }
            (None, Some(status)) => self.partition_members(
                &read_txn,
                STATUS_INDEX,
                status.as_str(),
                &status_retention_key(status),
                now,
            )?,
            (None, None) => {
                let recency = read_txn.open_table(RECENCY_TABLE)?;
                // Caller-supplied limit, so no pre-allocation; `take` bounds
                // the growth to what actually exists.
                let mut ids = Vec::new();
                for entry in recency.iter()?.rev().skip(filter.offset).take(filter.limit) {
                    let (key, _) = entry?;
                    ids.push(key.value().1.to_string());
                }
                ids
            }
        };

        let orders_table = read_txn.open_table(ORDERS_TABLE)?;
        let mut orders = Vec::with_capacity(ids.len());
        for id in &ids {
            match orders_table.get(id.as_str()) {
                Ok(Some(value)) => {
                    if let Some(order) = decode_order(id, value.value()) {
                        orders.push(order);
                    }
                }
                Ok(None) => {
                    tracing::warn!(order_id = %id, "Indexed order missing from primary table, skipping");
                }
                Err(e) => {
                    tracing::warn!(order_id = %id, error = %e, "Failed to read indexed order, skipping");
                }
            }
        }

        // Newest first, regardless of which index produced the id set
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Read the live members of one partition.
    ///
    /// A partition whose retention stamp has lapsed reads as empty; a
    /// partition with no stamp (never written through this store) persists.
    fn partition_members(
        &self,
        read_txn: &ReadTransaction,
        index: MultimapTableDefinition<&'static str, &'static str>,
        member_key: &str,
        retention_key: &str,
        now: i64,
    ) -> StoreResult<Vec<String>> {
        let retention = read_txn.open_table(RETENTION_TABLE)?;
        if let Some(expires) = retention.get(retention_key)? {
            if expires.value() <= now {
                return Ok(Vec::new());
            }
        }
        drop(retention);

        let table = read_txn.open_multimap_table(index)?;
        let mut ids = Vec::new();
        for entry in table.get(member_key)? {
            ids.push(entry?.value().to_string());
        }
        Ok(ids)
    }

    // ========== Delete ==========

    /// Delete an order, removing it from the primary table, the number
    /// mapping, both partitions and the recency ranking in one transaction.
    /// Returns `false` if the order did not exist. No tombstone is kept.
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let txn = self.db.begin_write()?;
        let existed = {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let existing = match orders.get(id)? {
                Some(value) => decode_order(id, value.value()),
                None => None,
            };
            let Some(order) = existing else {
                return Ok(false);
            };

            orders.remove(id)?;
            drop(orders);

            {
                let mut numbers = txn.open_table(ORDER_NUMBERS_TABLE)?;
                numbers.remove(order.order_number.as_str())?;
            }

            {
                let mut by_date = txn.open_multimap_table(DATE_INDEX)?;
                by_date.remove(order.pickup_date.as_str(), id)?;

                let mut by_status = txn.open_multimap_table(STATUS_INDEX)?;
                by_status.remove(order.status.as_str(), id)?;
            }

            {
                let mut recency = txn.open_table(RECENCY_TABLE)?;
                recency.remove((order.created_at, id))?;
            }

            true
        };
        txn.commit()?;

        tracing::info!(order_id = %id, "Order deleted");
        Ok(existed)
    }

    // ========== Statistics ==========

    /// Aggregate statistics for the admin dashboard.
    ///
    /// `total` is all-time (the recency ranking never expires); `by_status`
    /// and the today figures read the expiring index tier. `today_revenue`
    /// hydrates today's full date partition on every call rather than being
    /// maintained incrementally.
    pub fn stats(&self) -> StoreResult<OrderStats> {
        let now = now_millis();
        let today = today();

        let (total, by_status, today_total) = {
            let read_txn = self.db.begin_read()?;
            let total = read_txn.open_table(RECENCY_TABLE)?.len()?;

            let mut by_status = BTreeMap::new();
            for status in OrderStatus::ALL {
                let members = self.partition_members(
                    &read_txn,
                    STATUS_INDEX,
                    status.as_str(),
                    &status_retention_key(status),
                    now,
                )?;
                by_status.insert(status, members.len() as u64);
            }

            let today_members =
                self.partition_members(&read_txn, DATE_INDEX, &today, &date_retention_key(&today), now)?;
            (total, by_status, today_members.len() as u64)
        };

        let today_orders = self.list(&ListFilter {
            date: Some(today),
            ..Default::default()
        })?;
        let today_revenue = today_orders.iter().map(|o| o.total).sum();

        Ok(OrderStats {
            total,
            by_status,
            today_total,
            today_revenue,
        })
    }

    // ========== Health ==========

    /// Liveness probe: can we open a read transaction against the store?
    pub fn health_check(&self) -> bool {
        match self.db.begin_read() {
            Ok(read_txn) => read_txn.open_table(ORDERS_TABLE).is_ok(),
            Err(e) => {
                tracing::error!(error = %e, "Store health check failed");
                false
            }
        }
    }

    // ========== Test Support ==========

    /// Force a partition's retention stamp into the past.
    #[cfg(test)]
    fn expire_partition(&self, retention_key: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut retention = txn.open_table(RETENTION_TABLE)?;
            retention.insert(retention_key, now_millis() - 1)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Remove the primary record while leaving every index entry in place,
    /// simulating index corruption.
    #[cfg(test)]
    fn remove_record_only(&self, id: &str) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            orders.remove(id)?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// Refresh a partition's retention stamp inside a write transaction.
///
/// If the previous stamp has already lapsed, the partition's members are
/// purged first: the expiry deleted them logically, and a fresh stamp must
/// not resurrect them. Callers stamp before inserting their own member.
fn stamp_partition(
    txn: &redb::WriteTransaction,
    index: MultimapTableDefinition<&'static str, &'static str>,
    member_key: &str,
    retention_key: &str,
    now: i64,
) -> StoreResult<()> {
    let mut retention = txn.open_table(RETENTION_TABLE)?;
    let lapsed = match retention.get(retention_key)? {
        Some(expires) => expires.value() <= now,
        None => false,
    };
    if lapsed {
        let mut table = txn.open_multimap_table(index)?;
        table.remove_all(member_key)?;
    }
    retention.insert(retention_key, now + INDEX_RETENTION_MS)?;
    Ok(())
}

/// Decode a stored order, tolerating corrupt payloads.
///
/// Read paths treat an undecodable record as absent (logged); write paths
/// still surface their own failures.
fn decode_order(id: &str, bytes: &[u8]) -> Option<Order> {
    match serde_json::from_slice(bytes) {
        Ok(order) => Some(order),
        Err(e) => {
            tracing::warn!(order_id = %id, error = %e, "Failed to decode stored order");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::ServiceLine;

    fn draft(order_number: &str, pickup_date: &str) -> OrderDraft {
        OrderDraft {
            order_number: order_number.to_string(),
            customer_name: "Ama Mensah".to_string(),
            customer_phone: "+233201234567".to_string(),
            customer_email: Some("ama@example.com".to_string()),
            customer_address: "12 Ring Road, Accra".to_string(),
            instructions: None,
            services: vec![ServiceLine {
                service: "Wash & Fold".to_string(),
                quantity: 1,
                price: 45.0,
            }],
            pickup_date: pickup_date.to_string(),
            pickup_time: Some("morning".to_string()),
            subtotal: 45.0,
            delivery_fee: 5.0,
            total: 50.0,
            status: OrderStatus::Confirmed,
        }
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn create_then_get_round_trips() {
        let store = OrderStore::open_in_memory().unwrap();

        let created = store.create(draft("WA100001", "2024-06-01")).unwrap();
        assert_eq!(created.id, "order_00000001");
        assert_eq!(created.status, OrderStatus::Confirmed);
        assert_eq!(created.created_at, created.updated_at);

        let fetched = store.get(&created.id).unwrap().unwrap();
        assert_eq!(fetched, created);

        // Ids are monotonic
        let second = store.create(draft("WA100002", "2024-06-01")).unwrap();
        assert_eq!(second.id, "order_00000002");
    }

    #[test]
    fn get_unknown_is_none_not_error() {
        let store = OrderStore::open_in_memory().unwrap();
        assert!(store.get("order_99999999").unwrap().is_none());
        assert!(store.get_by_number("WA999999").unwrap().is_none());
    }

    #[test]
    fn number_lookup_resolves_same_record() {
        let store = OrderStore::open_in_memory().unwrap();
        let created = store.create(draft("WA100001", "2024-06-01")).unwrap();

        let by_number = store.get_by_number("WA100001").unwrap().unwrap();
        let by_id = store.get(&created.id).unwrap().unwrap();
        assert_eq!(by_number, by_id);
    }

    #[test]
    fn duplicate_order_number_is_rejected() {
        let store = OrderStore::open_in_memory().unwrap();
        let first = store.create(draft("WA100001", "2024-06-01")).unwrap();

        let err = store.create(draft("WA100001", "2024-06-02")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateOrderNumber(n) if n == "WA100001"));

        // First order untouched, nothing leaked into the indexes
        assert_eq!(store.get_by_number("WA100001").unwrap().unwrap().id, first.id);
        assert!(store
            .list(&ListFilter {
                date: Some("2024-06-02".to_string()),
                ..Default::default()
            })
            .unwrap()
            .is_empty());
        assert_eq!(store.stats().unwrap().total, 1);
    }

    #[test]
    fn update_status_moves_between_partitions() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = store.create(draft("WA100001", "2024-06-01")).unwrap();

        let updated = store
            .update_status(&order.id, OrderStatus::Ready)
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Ready);
        assert!(updated.updated_at >= order.created_at);
        assert_eq!(updated.created_at, order.created_at);

        let ready = store
            .list(&ListFilter {
                status: Some(OrderStatus::Ready),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&ready), vec![order.id.as_str()]);

        let confirmed = store
            .list(&ListFilter {
                status: Some(OrderStatus::Confirmed),
                ..Default::default()
            })
            .unwrap();
        assert!(confirmed.is_empty());
    }

    #[test]
    fn update_status_same_value_is_noop_safe() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = store.create(draft("WA100001", "2024-06-01")).unwrap();

        let updated = store
            .update_status(&order.id, OrderStatus::Confirmed)
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Confirmed);

        // Still a member of exactly one partition
        let confirmed = store
            .list(&ListFilter {
                status: Some(OrderStatus::Confirmed),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(confirmed.len(), 1);
    }

    #[test]
    fn update_status_unknown_order_is_none() {
        let store = OrderStore::open_in_memory().unwrap();
        assert!(store
            .update_status("order_99999999", OrderStatus::Ready)
            .unwrap()
            .is_none());
    }

    #[test]
    fn delete_removes_every_membership() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = store.create(draft("WA100001", "2024-06-01")).unwrap();
        store.update_status(&order.id, OrderStatus::Ready).unwrap();

        assert!(store.delete(&order.id).unwrap());

        assert!(store.get(&order.id).unwrap().is_none());
        assert!(store.get_by_number("WA100001").unwrap().is_none());
        assert!(store
            .list(&ListFilter {
                date: Some("2024-06-01".to_string()),
                ..Default::default()
            })
            .unwrap()
            .is_empty());
        assert!(store
            .list(&ListFilter {
                status: Some(OrderStatus::Ready),
                ..Default::default()
            })
            .unwrap()
            .is_empty());
        assert!(store.list(&ListFilter::default()).unwrap().is_empty());
        assert_eq!(store.stats().unwrap().total, 0);

        // Ids are never reused after deletion
        let next = store.create(draft("WA100002", "2024-06-01")).unwrap();
        assert_eq!(next.id, "order_00000002");
    }

    #[test]
    fn delete_unknown_returns_false() {
        let store = OrderStore::open_in_memory().unwrap();
        assert!(!store.delete("order_99999999").unwrap());
    }

    #[test]
    fn combined_filter_is_partition_intersection() {
        let store = OrderStore::open_in_memory().unwrap();
        let a = store.create(draft("WA000001", "2024-06-01")).unwrap();
        let b = store.create(draft("WA000002", "2024-06-01")).unwrap();
        let c = store.create(draft("WA000003", "2024-06-02")).unwrap();
        store.update_status(&b.id, OrderStatus::Ready).unwrap();
        store.update_status(&c.id, OrderStatus::Ready).unwrap();

        let both = store
            .list(&ListFilter {
                date: Some("2024-06-01".to_string()),
                status: Some(OrderStatus::Ready),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&both), vec![b.id.as_str()]);

        let by_date = store
            .list(&ListFilter {
                date: Some("2024-06-01".to_string()),
                ..Default::default()
            })
            .unwrap();
        let by_status = store
            .list(&ListFilter {
                status: Some(OrderStatus::Ready),
                ..Default::default()
            })
            .unwrap();

        // Intersection of the two single-filter listings, modulo ordering
        let date_set: HashSet<&str> = by_date.iter().map(|o| o.id.as_str()).collect();
        let status_set: HashSet<&str> = by_status.iter().map(|o| o.id.as_str()).collect();
        let expected: HashSet<&str> = date_set.intersection(&status_set).copied().collect();
        let actual: HashSet<&str> = both.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(actual, expected);
        let _ = a;
    }

    #[test]
    fn global_listing_pages_newest_first() {
        let store = OrderStore::open_in_memory().unwrap();
        for i in 1..=5 {
            store
                .create(draft(&format!("WA00000{i}"), "2024-06-01"))
                .unwrap();
        }

        let page = store
            .list(&ListFilter {
                limit: 2,
                offset: 1,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&page), vec!["order_00000004", "order_00000003"]);

        let all = store.list(&ListFilter::default()).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].id, "order_00000005");
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn laundry_order_scenario() {
        let store = OrderStore::open_in_memory().unwrap();

        let mut d = draft("WA000001", "2024-06-01");
        d.services = vec![
            ServiceLine {
                service: "Wash & Fold".to_string(),
                quantity: 1,
                price: 45.0,
            },
            ServiceLine {
                service: "Iron Service".to_string(),
                quantity: 3,
                price: 5.0,
            },
        ];
        d.subtotal = 60.0;
        d.delivery_fee = 5.0;
        d.total = 65.0;
        let order = store.create(d).unwrap();

        let tracked = store.get_by_number("WA000001").unwrap().unwrap();
        assert_eq!(tracked.total, 65.0);
        assert_eq!(tracked.services.len(), 2);
        assert_eq!(tracked.services[0].service, "Wash & Fold");

        let listed = store
            .list(&ListFilter {
                date: Some("2024-06-01".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&listed), vec![order.id.as_str()]);
        assert_eq!(listed[0].status, OrderStatus::Confirmed);

        // Status moves to READY: gone from CONFIRMED, present in READY
        store.update_status(&order.id, OrderStatus::Ready).unwrap();
        assert!(store
            .list(&ListFilter {
                status: Some(OrderStatus::Confirmed),
                ..Default::default()
            })
            .unwrap()
            .is_empty());
        assert_eq!(
            ids(&store
                .list(&ListFilter {
                    status: Some(OrderStatus::Ready),
                    ..Default::default()
                })
                .unwrap()),
            vec![order.id.as_str()]
        );
    }

    #[test]
    fn stats_counts_today_and_by_status() {
        let store = OrderStore::open_in_memory().unwrap();
        let today = today();

        let mut totals = 0.0;
        for (i, total) in [50.0, 65.0, 30.0].iter().enumerate() {
            let mut d = draft(&format!("WA20000{i}"), &today);
            d.total = *total;
            totals += *total;
            store.create(d).unwrap();
        }
        let cancelled = store.get_by_number("WA200002").unwrap().unwrap();
        store
            .update_status(&cancelled.id, OrderStatus::Cancelled)
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status[&OrderStatus::Cancelled], 1);
        assert_eq!(stats.by_status[&OrderStatus::Confirmed], 2);
        // Cancellation does not remove an order from the date partition
        assert_eq!(stats.today_total, 3);
        assert_eq!(stats.today_revenue, totals);
    }

    #[test]
    fn expired_partitions_read_as_empty() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = store.create(draft("WA100001", "2024-06-01")).unwrap();

        store
            .expire_partition(&date_retention_key("2024-06-01"))
            .unwrap();
        store
            .expire_partition(&status_retention_key(OrderStatus::Confirmed))
            .unwrap();

        // Index tier is gone...
        assert!(store
            .list(&ListFilter {
                date: Some("2024-06-01".to_string()),
                ..Default::default()
            })
            .unwrap()
            .is_empty());
        let stats = store.stats().unwrap();
        assert_eq!(stats.by_status[&OrderStatus::Confirmed], 0);

        // ...but the durable tier is not
        assert_eq!(stats.total, 1);
        assert!(store.get(&order.id).unwrap().is_some());
        assert!(store.get_by_number("WA100001").unwrap().is_some());
        assert_eq!(store.list(&ListFilter::default()).unwrap().len(), 1);

        // A new create on the lapsed partition purges the expired members
        // and re-stamps it: only the new order is visible.
        let fresh = store.create(draft("WA100002", "2024-06-01")).unwrap();
        assert_eq!(
            ids(&store
                .list(&ListFilter {
                    date: Some("2024-06-01".to_string()),
                    ..Default::default()
                })
                .unwrap()),
            vec![fresh.id.as_str()]
        );
    }

    #[test]
    fn update_into_lapsed_partition_stays_visible() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = store.create(draft("WA100001", "2024-06-01")).unwrap();
        store.update_status(&order.id, OrderStatus::Ready).unwrap();

        // The CONFIRMED partition goes idle long enough to lapse...
        store
            .expire_partition(&status_retention_key(OrderStatus::Confirmed))
            .unwrap();

        // ...then the order moves back into it. The move re-stamps the
        // partition, so the order is listable and counted immediately.
        store
            .update_status(&order.id, OrderStatus::Confirmed)
            .unwrap();

        let confirmed = store
            .list(&ListFilter {
                status: Some(OrderStatus::Confirmed),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&confirmed), vec![order.id.as_str()]);
        assert_eq!(store.stats().unwrap().by_status[&OrderStatus::Confirmed], 1);
    }

    #[test]
    fn listing_tolerates_absurd_limit() {
        let store = OrderStore::open_in_memory().unwrap();
        let order = store.create(draft("WA100001", "2024-06-01")).unwrap();

        // The limit is caller-supplied over HTTP; a huge value must page,
        // not abort.
        let all = store
            .list(&ListFilter {
                limit: usize::MAX,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&all), vec![order.id.as_str()]);
    }

    #[test]
    fn hydration_skips_dangling_index_entries() {
        let store = OrderStore::open_in_memory().unwrap();
        let kept = store.create(draft("WA100001", "2024-06-01")).unwrap();
        let broken = store.create(draft("WA100002", "2024-06-01")).unwrap();

        store.remove_record_only(&broken.id).unwrap();

        // Listing skips the dangling entry instead of failing the page
        let listed = store
            .list(&ListFilter {
                date: Some("2024-06-01".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&listed), vec![kept.id.as_str()]);

        // A dangling number mapping reads as not-found
        assert!(store.get_by_number("WA100002").unwrap().is_none());
    }

    #[test]
    fn health_check_reports_live_store() {
        let store = OrderStore::open_in_memory().unwrap();
        assert!(store.health_check());
    }
}

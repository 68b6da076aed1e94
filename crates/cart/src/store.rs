//! The cart store: authoritative in-memory state plus durable persistence.
//!
//! # Persistence model
//!
//! Mutations apply synchronously against the latest in-memory snapshot and
//! enqueue the *newly computed* snapshot while still holding the state lock,
//! so the queue order always matches the state order. A dedicated writer
//! task drains the queue sequentially, coalescing to the newest pending
//! snapshot before each durable write. Back-to-back mutations may therefore
//! produce a single durable write; the guaranteed contract is that once all
//! in-flight writes settle, the persisted value equals the serialization of
//! the latest in-memory snapshot.
//!
//! A failed write is retried once and then dropped with an error log. The
//! in-memory snapshot remains authoritative regardless of write outcomes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

use gomarket_core::{Product, ProductId};

use crate::accessor::CartAccessor;
use crate::snapshot::CartSnapshot;
use crate::storage::DurableStore;

/// Durable-store key under which the serialized cart snapshot lives.
pub const CART_STORAGE_KEY: &str = "@GoMarket:cart";

/// Commands handled by the persistence writer task.
enum PersistCmd {
    /// Persist this snapshot (or a newer one, if more writes are queued).
    Write(CartSnapshot),
    /// Acknowledge once every write enqueued before this point has settled.
    Flush(oneshot::Sender<()>),
}

/// Owns the authoritative in-memory cart and synchronizes it to a durable
/// store.
///
/// Create one with [`CartStore::load`], hand out [`CartAccessor`] handles to
/// consumers, and drop the store to dispose of it - the writer task exits
/// once the queue closes and outstanding accessors start failing with
/// [`ContextUnavailable`](crate::ContextUnavailable).
///
/// Only one store should be active per durable-store key; concurrent
/// instances would race on the key with no coordination.
pub struct CartStore {
    snapshot: Mutex<CartSnapshot>,
    queue: mpsc::UnboundedSender<PersistCmd>,
}

impl CartStore {
    /// Create a store whose initial snapshot is loaded from `storage`.
    ///
    /// Reads [`CART_STORAGE_KEY`] exactly once. An absent value yields an
    /// empty cart. An unreadable or malformed value is logged at `warn` and
    /// degrades to an empty cart; the persisted copy is best-effort cache,
    /// so load never fails.
    pub async fn load(storage: Arc<dyn DurableStore>) -> Arc<Self> {
        let initial = match storage.get(CART_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(%err, "persisted cart is malformed, starting empty");
                    CartSnapshot::new()
                }
            },
            Ok(None) => CartSnapshot::new(),
            Err(err) => {
                warn!(%err, "failed to read persisted cart, starting empty");
                CartSnapshot::new()
            }
        };

        debug!(items = initial.len(), "cart store loaded");

        let (queue, commands) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(storage, commands));

        Arc::new(Self {
            snapshot: Mutex::new(initial),
            queue,
        })
    }

    /// The current snapshot.
    ///
    /// Reads are synchronous and always observe the result of every mutation
    /// issued before this call.
    #[must_use]
    pub fn products(&self) -> CartSnapshot {
        self.lock().clone()
    }

    /// Hand out a weak consumption handle scoped to this store's lifetime.
    #[must_use]
    pub fn accessor(self: &Arc<Self>) -> CartAccessor {
        CartAccessor::new(Arc::downgrade(self))
    }

    /// Add one unit of `product` to the cart, merging with an existing line
    /// item for the same product ID.
    pub fn add_to_cart(&self, product: Product) {
        self.apply(|snapshot| snapshot.add(product));
    }

    /// Increase the quantity of the line item matching `id` by one.
    ///
    /// An absent `id` is a no-op.
    pub fn increment(&self, id: &ProductId) {
        self.apply(|snapshot| snapshot.increment(id));
    }

    /// Decrease the quantity of the line item matching `id` by one, evicting
    /// it at quantity zero.
    ///
    /// An absent `id` is a no-op.
    pub fn decrement(&self, id: &ProductId) {
        self.apply(|snapshot| snapshot.decrement(id));
    }

    /// Wait until every persistence write issued so far has settled.
    ///
    /// After `flush` returns, the durable store holds the serialization of
    /// the snapshot current at the time of the last mutation (assuming the
    /// backend accepted the write). Returns immediately if the writer task
    /// has already exited.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.queue.send(PersistCmd::Flush(ack)).is_ok() {
            // The writer dropping mid-flush just means there is nothing left
            // to wait for.
            let _ = done.await;
        }
    }

    /// Compute the next snapshot, install it, and enqueue it for persistence
    /// in one atomic step.
    fn apply(&self, mutate: impl FnOnce(&CartSnapshot) -> CartSnapshot) {
        let mut guard = self.lock();
        let next = mutate(&guard);
        *guard = next.clone();

        // Enqueue under the lock: unbounded sends never block, and this
        // keeps the persistence order identical to the state order.
        if self.queue.send(PersistCmd::Write(next)).is_err() {
            warn!("persistence writer stopped, dropping cart write");
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartSnapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Single-writer drain loop: one durable write in flight at a time.
async fn run_writer(
    storage: Arc<dyn DurableStore>,
    mut commands: mpsc::UnboundedReceiver<PersistCmd>,
) {
    while let Some(first) = commands.recv().await {
        let mut pending = None;
        let mut acks = Vec::new();

        let mut absorb = |cmd: PersistCmd| match cmd {
            PersistCmd::Write(snapshot) => pending = Some(snapshot),
            PersistCmd::Flush(ack) => acks.push(ack),
        };

        // Coalesce everything already queued: only the newest snapshot needs
        // to reach the durable store.
        absorb(first);
        while let Ok(cmd) = commands.try_recv() {
            absorb(cmd);
        }
        drop(absorb);

        if let Some(snapshot) = pending {
            persist(storage.as_ref(), &snapshot).await;
        }

        for ack in acks {
            let _ = ack.send(());
        }
    }

    debug!("cart store dropped, persistence writer exiting");
}

/// Write one snapshot to the durable store, retrying once on failure.
async fn persist(storage: &dyn DurableStore, snapshot: &CartSnapshot) {
    let encoded = match serde_json::to_string(snapshot) {
        Ok(encoded) => encoded,
        Err(err) => {
            error!(%err, "failed to serialize cart snapshot");
            return;
        }
    };

    if let Err(err) = storage.set(CART_STORAGE_KEY, &encoded).await {
        warn!(%err, "cart write failed, retrying once");
        if let Err(err) = storage.set(CART_STORAGE_KEY, &encoded).await {
            error!(%err, "cart write dropped after retry, in-memory state remains authoritative");
        }
    }
}

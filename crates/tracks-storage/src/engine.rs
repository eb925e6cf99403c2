//! EventStore: owns the ConnectionPool, implements IEventStorage, and tracks
//! whether storage has been found corrupt.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracks_core::config::defaults::{DEFAULT_BATCH_SIZE, DEFAULT_BUSY_TIMEOUT_MS};
use tracks_core::config::StorageConfig;
use tracks_core::constants::VERSION;
use tracks_core::errors::{TracksError, TracksResult};
use tracks_core::event::{Event, EventId, EventRecord};
use tracks_core::traits::{DrainOutcome, IEventStorage};
use tracks_core::{append_span, recovery_span, remove_span};

use crate::migrations;
use crate::pool::{pragmas, ConnectionPool, ReadPool};
use crate::queries::{event_crud, maintenance};
use crate::recovery;

/// Durable, concurrency-safe holding area for events awaiting transmission.
///
/// Share across producer threads and the dispatch client with `Arc`.
pub struct EventStore {
    pool: ConnectionPool,
    /// Set once any operation hits corrupt storage. While set, every
    /// operation fails fast until `reinitialize` succeeds.
    poisoned: AtomicBool,
    /// Events per `drain_next_batch` cycle.
    batch_size: usize,
}

impl EventStore {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> TracksResult<Self> {
        Self::open_with(
            path,
            ReadPool::default_size(),
            Duration::from_millis(u64::from(DEFAULT_BUSY_TIMEOUT_MS)),
            DEFAULT_BATCH_SIZE,
        )
    }

    /// Open the store described by `config.db_path`.
    pub fn open_with_config(config: &StorageConfig) -> TracksResult<Self> {
        Self::open_with(
            Path::new(&config.db_path),
            config.read_pool_size,
            Duration::from_millis(u64::from(config.busy_timeout_ms)),
            config.default_batch_size,
        )
    }

    fn open_with(
        path: &Path,
        read_pool_size: usize,
        busy_timeout: Duration,
        batch_size: usize,
    ) -> TracksResult<Self> {
        let pool = ConnectionPool::open(
            path,
            read_pool_size,
            busy_timeout,
            migrations::run_migrations,
        )?;
        tracing::debug!(path = %path.display(), version = VERSION, "event store opened");
        Ok(Self {
            pool,
            poisoned: AtomicBool::new(false),
            batch_size: batch_size.max(1),
        })
    }

    /// Open an in-memory store (for testing). Reads go through the writer.
    pub fn open_in_memory() -> TracksResult<Self> {
        let pool = ConnectionPool::open_in_memory(migrations::run_migrations)?;
        Ok(Self {
            pool,
            poisoned: AtomicBool::new(false),
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Delete the database at `path` (including WAL files) and open a fresh,
    /// empty store there. The recovery path when the file itself is unreadable
    /// and `reinitialize` cannot repair it in place. Pending events are lost.
    pub fn recreate(path: &Path) -> TracksResult<Self> {
        let _span = recovery_span!("recreate").entered();
        let removed = recovery::remove_database_files(path)?;
        tracing::warn!(path = %path.display(), files = removed, "event store recreated");
        Self::open(path)
    }

    /// Database file path, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.pool.db_path.as_deref()
    }

    /// Number of read-only connections. Zero for in-memory stores, whose
    /// reads go through the writer.
    pub fn read_connections(&self) -> usize {
        self.pool.readers.as_ref().map_or(0, ReadPool::size)
    }

    /// Whether the write connection runs in WAL mode.
    pub fn is_wal_mode(&self) -> TracksResult<bool> {
        self.ensure_usable()?;
        let result = self.pool.writer.with_conn(pragmas::verify_wal_mode);
        self.observe(result)
    }

    /// Whether the store has seen corrupt storage and refuses operations.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned.load(Ordering::SeqCst)
    }

    /// Run `PRAGMA integrity_check`. A failed check poisons the store.
    pub fn check_integrity(&self) -> TracksResult<()> {
        self.ensure_usable()?;
        let result = self.pool.writer.with_conn(|conn| {
            match maintenance::integrity_check(conn)? {
                None => Ok(()),
                Some(problem) => Err(TracksError::corruption(format!(
                    "integrity check failed: {problem}"
                ))),
            }
        });
        self.observe(result)
    }

    /// Discard every pending event, rebuild the schema, and clear the poison
    /// flag. Fails (and stays poisoned) if the database cannot be repaired in
    /// place; use [`EventStore::recreate`] then.
    pub fn reinitialize(&self) -> TracksResult<()> {
        let _span = recovery_span!("reinitialize").entered();
        self.pool.writer.with_conn(|conn| {
            maintenance::reset_schema(conn)?;
            maintenance::wal_checkpoint(conn)?;
            match maintenance::integrity_check(conn)? {
                None => Ok(()),
                Some(problem) => Err(TracksError::corruption(format!(
                    "integrity check failed after reset: {problem}"
                ))),
            }
        })?;
        self.poisoned.store(false, Ordering::SeqCst);
        tracing::info!("event store reinitialized");
        Ok(())
    }

    /// Events handed to `send` per [`EventStore::drain_next_batch`] cycle:
    /// `default_batch_size` from config, or the compiled default.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// One dispatch cycle at the configured batch size.
    pub fn drain_next_batch<F, E>(&self, send: F) -> TracksResult<DrainOutcome<E>>
    where
        F: FnOnce(&[Event]) -> Result<(), E>,
    {
        self.drain_batch(self.batch_size, send)
    }

    /// Force a WAL checkpoint.
    pub fn checkpoint(&self) -> TracksResult<()> {
        self.ensure_usable()?;
        let result = self.pool.writer.with_conn(maintenance::wal_checkpoint);
        self.observe(result)
    }

    /// Current schema version.
    pub fn schema_version(&self) -> TracksResult<u32> {
        self.with_reader(migrations::current_version)
    }

    fn ensure_usable(&self) -> TracksResult<()> {
        if self.is_poisoned() {
            return Err(TracksError::corruption(
                "event store is unusable until reinitialized",
            ));
        }
        Ok(())
    }

    /// Poison the store if `result` is a fatal error.
    fn observe<T>(&self, result: TracksResult<T>) -> TracksResult<T> {
        if let Err(e) = &result {
            if e.is_fatal() && !self.poisoned.swap(true, Ordering::SeqCst) {
                tracing::error!(error = %e, "storage corruption detected; event store poisoned");
            }
        }
        result
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer.
    fn with_reader<F, T>(&self, f: F) -> TracksResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> TracksResult<T>,
    {
        self.ensure_usable()?;
        let result = match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        };
        self.observe(result)
    }
}

impl IEventStorage for EventStore {
    fn append(&self, event: &Event) -> TracksResult<()> {
        self.ensure_usable()?;
        let _span = append_span!(event.id(), event.name()).entered();

        let result = EventRecord::from_event(event).and_then(|record| {
            self.pool
                .writer
                .with_immediate_transaction(|tx| event_crud::insert_event(tx, &record))
        });
        match &result {
            Ok(()) => tracing::debug!("event appended"),
            Err(e) => tracing::warn!(error = %e, "append failed; event dropped"),
        }
        self.observe(result)
    }

    fn all_events(&self) -> TracksResult<Vec<Event>> {
        self.with_reader(|conn| event_crud::list_events(conn, None))
    }

    fn count(&self) -> TracksResult<usize> {
        self.with_reader(event_crud::count_events)
    }

    fn pending_batch(&self, limit: usize) -> TracksResult<Vec<Event>> {
        if limit == 0 {
            self.ensure_usable()?;
            return Ok(Vec::new());
        }
        self.with_reader(|conn| event_crud::list_events(conn, Some(limit)))
    }

    fn remove_ids(&self, ids: &[EventId]) -> TracksResult<usize> {
        self.ensure_usable()?;
        let _span = remove_span!(ids.len()).entered();

        let result = self
            .pool
            .writer
            .with_immediate_transaction(|tx| event_crud::delete_events(tx, ids));
        match &result {
            Ok(removed) => tracing::debug!(removed = *removed, "events removed"),
            Err(e) => tracing::warn!(error = %e, "remove failed"),
        }
        self.observe(result)
    }

    fn clear(&self) -> TracksResult<usize> {
        self.ensure_usable()?;
        let result = self
            .pool
            .writer
            .with_immediate_transaction(|tx| event_crud::delete_all(tx));
        if let Ok(removed) = &result {
            tracing::info!(removed = *removed, "pending events cleared");
        }
        self.observe(result)
    }
}

impl std::fmt::Debug for EventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStore")
            .field("path", &self.path())
            .field("poisoned", &self.is_poisoned())
            .finish()
    }
}

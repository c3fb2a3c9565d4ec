//! Postgres change-notification listener
//!
//! Writes to the watched tables fire `pg_notify('swyft_changes', <table>)`
//! via triggers (see migrations). This listener receives those
//! notifications and fans them out on a broadcast channel. Notifications
//! for the same table that arrive within the coalesce window collapse into
//! a single event, so a burst of row changes produces one re-fetch hint
//! instead of one per row.

use sqlx::postgres::PgListener;
use std::collections::HashSet;
use std::time::Duration;
use swyft_core::{Error, Result};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Notification channel the table triggers publish to
pub const CHANGE_CHANNEL: &str = "swyft_changes";

/// Tables the admin pages watch for changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTable {
    /// The drivers table
    Drivers,
    /// The customers table
    Customers,
    /// The orders table
    Orders,
}

impl ChangeTable {
    /// Parse a notification payload into a watched table
    #[must_use]
    pub fn from_payload(payload: &str) -> Option<Self> {
        match payload {
            "drivers" => Some(Self::Drivers),
            "customers" => Some(Self::Customers),
            "orders" => Some(Self::Orders),
            _ => None,
        }
    }

    /// Table name as it appears on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drivers => "drivers",
            Self::Customers => "customers",
            Self::Orders => "orders",
        }
    }
}

/// A coalesced change event
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChangeEvent {
    /// Table that changed
    pub table: ChangeTable,
}

/// Listens on the Postgres notification channel and broadcasts coalesced
/// change events
#[derive(Debug)]
pub struct ChangeListener {
    database_url: String,
    coalesce: Duration,
    tx: broadcast::Sender<ChangeEvent>,
}

impl ChangeListener {
    /// Broadcast channel capacity; lagging subscribers drop old events and
    /// simply re-fetch on the next one
    const CHANNEL_CAPACITY: usize = 64;

    /// Create a new listener for the given database
    #[must_use]
    pub fn new(database_url: impl Into<String>, coalesce_ms: u64) -> Self {
        let (tx, _) = broadcast::channel(Self::CHANNEL_CAPACITY);
        Self {
            database_url: database_url.into(),
            coalesce: Duration::from_millis(coalesce_ms),
            tx,
        }
    }

    /// Subscribe to coalesced change events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// Sender half, for wiring into shared application state
    #[must_use]
    pub fn sender(&self) -> broadcast::Sender<ChangeEvent> {
        self.tx.clone()
    }

    /// Run the listen loop until the connection fails
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot connect or the connection
    /// is lost.
    pub async fn run(&self) -> Result<()> {
        let mut listener = PgListener::connect(&self.database_url)
            .await
            .map_err(|e| Error::Database(format!("Change listener connect failed: {e}")))?;

        listener
            .listen(CHANGE_CHANNEL)
            .await
            .map_err(|e| Error::Database(format!("LISTEN {CHANGE_CHANNEL} failed: {e}")))?;

        debug!("Change listener attached to {}", CHANGE_CHANNEL);

        let mut pending: HashSet<ChangeTable> = HashSet::new();
        loop {
            if pending.is_empty() {
                // Nothing buffered; block until the next notification.
                let notification = listener
                    .recv()
                    .await
                    .map_err(|e| Error::Database(format!("Change listener lost: {e}")))?;
                collect_payload(&mut pending, notification.payload());
            } else {
                // Buffered events exist; keep absorbing notifications until
                // the coalesce window closes, then flush once per table.
                match tokio::time::timeout(self.coalesce, listener.recv()).await {
                    Ok(Ok(notification)) => {
                        collect_payload(&mut pending, notification.payload());
                    }
                    Ok(Err(e)) => {
                        return Err(Error::Database(format!("Change listener lost: {e}")));
                    }
                    Err(_elapsed) => {
                        for table in pending.drain() {
                            // Send fails only when nobody is subscribed.
                            let _ = self.tx.send(ChangeEvent { table });
                        }
                    }
                }
            }
        }
    }
}

fn collect_payload(pending: &mut HashSet<ChangeTable>, payload: &str) {
    match ChangeTable::from_payload(payload) {
        Some(table) => {
            pending.insert(table);
        }
        None => warn!("Unknown change payload: {}", payload),
    }
}

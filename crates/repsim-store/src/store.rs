//! The business record store.

use std::collections::HashMap;

use repsim_core::{BusinessKey, BusinessMetrics, BusinessRecord};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{StoreError, TransportError};
use crate::persistence::SnapshotStore;
use crate::transport::Transport;

/// Read-only view of the store for presentation code.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub records: Vec<BusinessRecord>,
    pub active_id: Option<Uuid>,
    pub pending_name: String,
    pub pending_location: String,
    pub generating: bool,
    pub regenerating_headline: bool,
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    records: Vec<BusinessRecord>,
    /// Composite-key index into `records`, maintained alongside it. A key
    /// maps to the record most recently assigned to it.
    index: HashMap<BusinessKey, Uuid>,
    active_id: Option<Uuid>,
    pending_name: String,
    pending_location: String,
    generating: bool,
    regenerating_headline: bool,
    last_error: Option<String>,
}

impl State {
    /// Create-or-update keyed on the trimmed, case-insensitive
    /// (name, location) pair. An existing record keeps its id and stored
    /// name/location; only the generated fields are overwritten.
    fn upsert(&mut self, name: &str, location: &str, metrics: BusinessMetrics) -> BusinessRecord {
        let key = BusinessKey::new(name, location);
        if let Some(&id) = self.index.get(&key) {
            if let Some(record) = self.records.iter_mut().find(|r| r.id == id) {
                record.metrics = metrics;
                return record.clone();
            }
        }

        let record = BusinessRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: location.to_string(),
            metrics,
        };
        self.index.insert(key, record.id);
        self.records.push(record.clone());
        record
    }
}

/// Session-scoped store over a [`Transport`] and a [`SnapshotStore`].
///
/// Constructed once per session and passed by reference; there is no
/// ambient global. Interior state sits behind a mutex that is never held
/// across a transport call, so overlapping operations stay legal and
/// responses are applied in the order they resolve. Two concurrent
/// generations for the same key pair therefore race last-resolved-wins;
/// concurrent calls for different pairs are independent.
pub struct Store<T, S> {
    state: Mutex<State>,
    transport: T,
    snapshots: S,
}

impl<T: Transport, S: SnapshotStore> Store<T, S> {
    /// Builds a store, loading any previously persisted collection. The
    /// active selection, pending inputs, busy flags, and error slot always
    /// start empty: they are session state, not persisted state.
    pub fn new(transport: T, snapshots: S) -> Self {
        let records = snapshots.load();
        let index = records.iter().map(|r| (r.key(), r.id)).collect();
        Self {
            state: Mutex::new(State {
                records,
                index,
                ..State::default()
            }),
            transport,
            snapshots,
        }
    }

    /// Generate metrics for the pair and reconcile them into the collection.
    ///
    /// On success the created or updated record becomes the active one and
    /// the pending inputs are cleared. On failure the collection is left
    /// untouched and the error slot carries the endpoint's message. The
    /// `generating` flag is cleared on every exit path.
    ///
    /// # Errors
    ///
    /// [`StoreError::Validation`] if either input is empty or whitespace-only
    /// (checked before any transport call or state change);
    /// [`StoreError::Transport`] if the exchange fails.
    pub async fn generate_or_update(
        &self,
        name: &str,
        location: &str,
    ) -> Result<BusinessRecord, StoreError> {
        if name.trim().is_empty() || location.trim().is_empty() {
            return Err(StoreError::Validation);
        }

        {
            let mut state = self.state.lock().await;
            state.generating = true;
            state.last_error = None;
        }

        let result = self.transport.generate(name, location).await;

        let mut state = self.state.lock().await;
        state.generating = false;
        match result {
            Ok(metrics) => {
                let record = state.upsert(name, location, metrics);
                state.active_id = Some(record.id);
                state.pending_name.clear();
                state.pending_location.clear();
                self.persist(&state);
                Ok(record)
            }
            Err(e) => {
                state.last_error = Some(error_message(&e, "failed to fetch business data"));
                Err(StoreError::Transport(e))
            }
        }
    }

    /// Regenerate the headline of the active record, leaving every other
    /// field untouched. The `regeneratingHeadline` flag is cleared on every
    /// exit path.
    ///
    /// # Errors
    ///
    /// [`StoreError::NoActiveSelection`] if nothing is selected;
    /// [`StoreError::Transport`] if the exchange fails.
    pub async fn regenerate_headline(&self) -> Result<String, StoreError> {
        let (id, name, location) = {
            let mut state = self.state.lock().await;
            let Some(id) = state.active_id else {
                return Err(StoreError::NoActiveSelection);
            };
            let Some(record) = state.records.iter().find(|r| r.id == id) else {
                return Err(StoreError::NoActiveSelection);
            };
            let pair = (id, record.name.clone(), record.location.clone());
            state.regenerating_headline = true;
            state.last_error = None;
            pair
        };

        let result = self.transport.regenerate_headline(&name, &location).await;

        let mut state = self.state.lock().await;
        state.regenerating_headline = false;
        match result {
            Ok(headline) => {
                let mut changed = false;
                if let Some(record) = state.records.iter_mut().find(|r| r.id == id) {
                    record.metrics.headline = headline.clone();
                    changed = true;
                }
                if changed {
                    self.persist(&state);
                }
                Ok(headline)
            }
            Err(e) => {
                state.last_error = Some(error_message(&e, "failed to regenerate headline"));
                Err(StoreError::Transport(e))
            }
        }
    }

    /// Make `id` the active record and echo its name/location into the
    /// pending inputs. Unknown ids are a no-op. Returns whether a selection
    /// was made.
    pub async fn select(&self, id: Uuid) -> bool {
        let mut state = self.state.lock().await;
        let Some(record) = state.records.iter().find(|r| r.id == id) else {
            return false;
        };
        let (name, location) = (record.name.clone(), record.location.clone());
        state.active_id = Some(id);
        state.pending_name = name;
        state.pending_location = location;
        state.last_error = None;
        true
    }

    /// Clear the active selection, the pending inputs, and the error slot.
    pub async fn clear_active(&self) {
        let mut state = self.state.lock().await;
        state.active_id = None;
        state.pending_name.clear();
        state.pending_location.clear();
        state.last_error = None;
    }

    /// Remove a record. Clears the active selection if it pointed at the
    /// removed id. Returns whether anything was removed.
    pub async fn delete(&self, id: Uuid) -> bool {
        let mut state = self.state.lock().await;
        let Some(pos) = state.records.iter().position(|r| r.id == id) else {
            return false;
        };
        let record = state.records.remove(pos);
        if state.index.get(&record.key()) == Some(&record.id) {
            state.index.remove(&record.key());
        }
        if state.active_id == Some(id) {
            state.active_id = None;
        }
        self.persist(&state);
        true
    }

    /// Explicitly rename a record's identity fields without touching its
    /// metrics, re-indexing it under the new key.
    ///
    /// # Errors
    ///
    /// [`StoreError::Validation`] on empty inputs,
    /// [`StoreError::UnknownId`] if the record does not exist.
    pub async fn rename(
        &self,
        id: Uuid,
        name: &str,
        location: &str,
    ) -> Result<BusinessRecord, StoreError> {
        if name.trim().is_empty() || location.trim().is_empty() {
            return Err(StoreError::Validation);
        }

        let mut state = self.state.lock().await;
        let Some(pos) = state.records.iter().position(|r| r.id == id) else {
            return Err(StoreError::UnknownId(id));
        };

        let old_key = state.records[pos].key();
        if state.index.get(&old_key) == Some(&id) {
            state.index.remove(&old_key);
        }
        state.records[pos].name = name.to_string();
        state.records[pos].location = location.to_string();
        let new_key = state.records[pos].key();
        state.index.insert(new_key, id);

        let record = state.records[pos].clone();
        self.persist(&state);
        Ok(record)
    }

    /// Overwrite the pending input echo fields.
    pub async fn set_pending_inputs(&self, name: &str, location: &str) {
        let mut state = self.state.lock().await;
        state.pending_name = name.to_string();
        state.pending_location = location.to_string();
    }

    /// Read-only view of the current state.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock().await;
        StoreSnapshot {
            records: state.records.clone(),
            active_id: state.active_id,
            pending_name: state.pending_name.clone(),
            pending_location: state.pending_location.clone(),
            generating: state.generating,
            regenerating_headline: state.regenerating_headline,
            last_error: state.last_error.clone(),
        }
    }

    /// Write the collection through to durable storage. Failures are logged
    /// and swallowed: a broken disk must not take the session down.
    fn persist(&self, state: &State) {
        if let Err(e) = self.snapshots.save(&state.records) {
            tracing::warn!(error = %e, "failed to persist business snapshot");
        }
    }
}

/// The message surfaced in the error slot: the endpoint's own message when
/// it sent one, otherwise the operation's generic failure string.
fn error_message(err: &TransportError, fallback: &str) -> String {
    match err {
        TransportError::Endpoint(message) => message.clone(),
        TransportError::Http(_) => fallback.to_string(),
    }
}

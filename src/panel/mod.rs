// panel/mod.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::PanelError;
use crate::models::StatusColor;

/// Current contents of a status field.
#[derive(Debug, Clone, Default)]
pub struct StatusField {
    pub text: String,
    pub color: StatusColor,
    pub updated_at: Option<DateTime<Local>>,
}

/// Proof that a write was started. Results of an older request than the
/// newest one started on the same field are dropped at apply time.
pub struct WriteTicket {
    generation: u64,
}

/// A named status field. Handles are created once at setup and passed into
/// the feature handlers; each carries the request-generation counter for
/// its feature.
pub struct FieldHandle {
    name: String,
    slot: RwLock<StatusField>,
    generation: AtomicU64,
}

impl FieldHandle {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slot: RwLock::new(StatusField::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marks the start of a request whose result will be written here.
    pub fn begin(&self) -> WriteTicket {
        WriteTicket {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Writes text and color, unless a newer request has been started since
    /// the ticket was issued. Returns whether the write landed.
    pub async fn apply(
        &self,
        ticket: &WriteTicket,
        text: impl Into<String>,
        color: StatusColor,
    ) -> bool {
        let mut slot = self.slot.write().await;
        if ticket.generation != self.generation.load(Ordering::SeqCst) {
            debug!(field = %self.name, "dropping stale result");
            return false;
        }
        slot.text = text.into();
        slot.color = color;
        slot.updated_at = Some(Local::now());
        true
    }

    pub async fn read(&self) -> StatusField {
        self.slot.read().await.clone()
    }
}

/// Registry of status fields, keyed by name.
#[derive(Default)]
pub struct Panel {
    fields: DashMap<String, Arc<FieldHandle>>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: &str) -> Arc<FieldHandle> {
        let entry = self
            .fields
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(FieldHandle::new(name)));
        Arc::clone(entry.value())
    }

    pub fn field(&self, name: &str) -> Result<Arc<FieldHandle>, PanelError> {
        self.fields
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| PanelError::UnknownField(name.to_string()))
    }

    pub async fn snapshot(&self) -> Vec<(String, StatusField)> {
        // Collect the handles first so no registry guard is held across an
        // await point.
        let handles: Vec<(String, Arc<FieldHandle>)> = self
            .fields
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        let mut entries = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            entries.push((name, handle.read().await));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

/// The LED selector control: a fixed set of identifiers and the current
/// choice, read live at call time.
pub struct Selector {
    choices: Vec<String>,
    current: RwLock<String>,
}

impl Selector {
    pub fn new(choices: Vec<String>, initial: &str) -> Result<Self, PanelError> {
        if !choices.iter().any(|c| c == initial) {
            return Err(PanelError::UnknownLed(initial.to_string()));
        }
        Ok(Self {
            choices,
            current: RwLock::new(initial.to_string()),
        })
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub async fn select(&self, id: &str) -> Result<(), PanelError> {
        if !self.choices.iter().any(|c| c == id) {
            return Err(PanelError::UnknownLed(id.to_string()));
        }
        *self.current.write().await = id.to_string();
        Ok(())
    }

    pub async fn value(&self) -> String {
        self.current.read().await.clone()
    }
}

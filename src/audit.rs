//! Audit logging: every derivation emits a structured event.
//!
//! The core [`derive`](crate::derive) never logs. Callers that need a record
//! wrap it in a [`Diversifier`] with the sink of their choice.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DiversifyError;

// ---------------------------------------------------------------------------
// Audit events
// ---------------------------------------------------------------------------

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    KeyDiversified { key: String },
    DiversificationFailed { reason: String },
}

/// A structured audit event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    /// When it happened.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub action: AuditAction,
    /// Who or what triggered this.
    pub actor: String,
    /// Success or failure.
    pub success: bool,
    /// Additional context.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
}

impl AuditEvent {
    pub fn diversified(key: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::KeyDiversified { key: key.into() },
            actor: "system".into(),
            success: true,
            detail: None,
        }
    }

    pub fn failed(error: &DiversifyError) -> Self {
        Self {
            timestamp: Utc::now(),
            action: AuditAction::DiversificationFailed {
                reason: error.to_string(),
            },
            actor: "system".into(),
            success: false,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Audit sink trait
// ---------------------------------------------------------------------------

/// Where audit events go.
///
/// Recording is infallible from the caller's side: a sink that cannot
/// persist an event reports it through `tracing` and drops it.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

// ---------------------------------------------------------------------------
// Built-in sinks
// ---------------------------------------------------------------------------

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _event: AuditEvent) {}
}

/// Logs events via the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        match &event.action {
            AuditAction::KeyDiversified { key } => tracing::info!(
                timestamp = %event.timestamp,
                actor = %event.actor,
                detail = ?event.detail,
                "diversified key: {}",
                key
            ),
            AuditAction::DiversificationFailed { reason } => tracing::error!(
                timestamp = %event.timestamp,
                actor = %event.actor,
                detail = ?event.detail,
                "diversification failed: {}",
                reason
            ),
        }
    }
}

/// Collects events in memory (for testing).
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// Writes JSON events to a file (append-only, one event per line).
#[derive(Debug, Clone)]
pub struct FileAuditSink {
    path: PathBuf,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn append(&self, event: &AuditEvent) -> std::io::Result<()> {
        let json = serde_json::to_string(event)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: AuditEvent) {
        if let Err(e) = self.append(&event) {
            tracing::warn!(path = %self.path.display(), error = %e, "audit log write failed");
        }
    }
}

/// Forwards every event to each inner sink in order.
pub struct FanoutAuditSink {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl FanoutAuditSink {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }
}

impl AuditSink for FanoutAuditSink {
    fn record(&self, event: AuditEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.record(event.clone());
            }
            last.record(event);
        }
    }
}

// ---------------------------------------------------------------------------
// Audited engine
// ---------------------------------------------------------------------------

/// Runs derivations and records each outcome to a sink.
///
/// The result returned to the caller is exactly what the core produced; the
/// sink cannot alter or block it.
#[derive(Clone)]
pub struct Diversifier {
    sink: Arc<dyn AuditSink>,
    actor: String,
}

impl Diversifier {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self {
            sink,
            actor: "system".into(),
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Audited [`crate::derive`].
    pub fn derive(
        &self,
        master_key_hex: &str,
        diversification_input_hex: &str,
    ) -> Result<String, DiversifyError> {
        let result = crate::derive(master_key_hex, diversification_input_hex);
        self.report(&result, None);
        result
    }

    /// Audited [`crate::derive_components`]. The UID is attached to the
    /// event as detail.
    pub fn derive_components(
        &self,
        master_key_hex: &str,
        uid_hex: &str,
        app_id_hex: &str,
        fixed_hex: &str,
    ) -> Result<String, DiversifyError> {
        let result = crate::derive_components(master_key_hex, uid_hex, app_id_hex, fixed_hex);
        self.report(&result, Some(format!("uid={}", uid_hex)));
        result
    }

    fn report(&self, result: &Result<String, DiversifyError>, detail: Option<String>) {
        let mut event = match result {
            Ok(key) => AuditEvent::diversified(key.as_str()),
            Err(e) => AuditEvent::failed(e),
        }
        .with_actor(self.actor.as_str());
        if let Some(detail) = detail {
            event = event.with_detail(detail);
        }
        self.sink.record(event);
    }
}

impl std::fmt::Debug for Diversifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diversifier")
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}

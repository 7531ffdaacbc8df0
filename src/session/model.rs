//! Drawing-session aggregate and its observable projections.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geo::Coordinate;
use crate::persist::ReferencePlot;
use crate::validation::ValidationVerdict;

/// Which workflow the active session serves.
///
/// The two active modes are mutually exclusive by construction — a session
/// is completing a task or editing a plot, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionMode {
    /// No session is active.
    Idle,
    /// Drawing the boundary that completes an assigned field task.
    CompletingTask { task_id: String, plot_id: String },
    /// Redrawing the boundary of an existing plot record.
    EditingPlot { plot: ReferencePlot },
}

impl SessionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionMode::Idle)
    }

    /// The reference plot id validation runs against, for either active mode.
    pub fn plot_id(&self) -> Option<&str> {
        match self {
            SessionMode::Idle => None,
            SessionMode::CompletingTask { plot_id, .. } => Some(plot_id),
            SessionMode::EditingPlot { plot } => Some(&plot.plot_id),
        }
    }
}

/// The single mutable aggregate of the capture subsystem.
///
/// Owned by the session controller; nothing else reads or writes these
/// fields. The UI sees [`SessionSnapshot`] copies.
#[derive(Debug)]
pub(crate) struct DrawingSession {
    pub(crate) id: String,
    pub(crate) mode: SessionMode,
    /// Tap-ordered vertices, held open (no duplicated closing vertex).
    pub(crate) polygon: Vec<Coordinate>,
    /// Spherical area of the working polygon, square meters. 0 below 3 points.
    pub(crate) area_m2: f64,
    /// Latest verdict. Cleared by every polygon mutation and by a failed
    /// validation call.
    pub(crate) verdict: Option<ValidationVerdict>,
    pub(crate) is_validating: bool,
    /// Field notes attached on task completion.
    pub(crate) notes: Option<String>,
    pub(crate) started_at: DateTime<Utc>,
    /// Mutation counter. Every begin/add/remove/cancel bumps it; a validation
    /// response is applied only while its captured epoch still matches.
    pub(crate) epoch: u64,
}

impl DrawingSession {
    pub(crate) fn idle() -> Self {
        Self {
            id: String::new(),
            mode: SessionMode::Idle,
            polygon: Vec::new(),
            area_m2: 0.0,
            verdict: None,
            is_validating: false,
            notes: None,
            started_at: Utc::now(),
            epoch: 0,
        }
    }

    /// Clear every per-session field. The epoch survives (and bumps) so
    /// stale async responses stay detectable across session boundaries.
    pub(crate) fn reset_to_idle(&mut self) {
        self.id.clear();
        self.mode = SessionMode::Idle;
        self.polygon.clear();
        self.area_m2 = 0.0;
        self.verdict = None;
        self.is_validating = false;
        self.notes = None;
        self.epoch += 1;
    }
}

/// Immutable copy of the observable session state, for the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub mode: SessionMode,
    pub points: Vec<Coordinate>,
    pub area_m2: f64,
    pub verdict: Option<ValidationVerdict>,
    pub is_validating: bool,
    pub started_at: DateTime<Utc>,
}

/// Notifications for a host UI, broadcast by the controller.
///
/// Purely advisory — a dropped or lagging receiver can always re-sync from
/// a snapshot.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Started { session_id: String },
    PolygonChanged { points: usize, area_m2: f64 },
    VerdictReceived { is_valid: bool },
    VerdictCleared,
    Cancelled { session_id: String },
    Persisted { session_id: String },
}

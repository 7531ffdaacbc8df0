// SPDX-License-Identifier: MIT
//! Drawing-session state machine.
//!
//! States: `Idle → Drawing(mode, <3 points) → Drawing(≥3, validating) →
//! Drawing(≥3, verdict) → Persisting → Idle`, with `cancel()` reachable from
//! every Drawing state.
//!
//! Every polygon mutation bumps a monotonic epoch and, at 3+ points, spawns
//! a validation call carrying that epoch. A response is applied only while
//! the epoch still matches, so a reply to a superseded request — or to a
//! session that was cancelled while the call was in flight — is discarded on
//! arrival instead of resurfacing.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::model::{DrawingSession, SessionEvent, SessionMode, SessionSnapshot};
use super::FinishError;
use crate::geo::{self, Coordinate};
use crate::persist::{PersistenceGateway, PlotBoundaryUpdate, ReferencePlot};
use crate::validation::ValidationAuthority;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A validation round due after a mutation, captured under the lock and
/// dispatched after it is released.
struct PendingValidation {
    epoch: u64,
    plot_id: String,
    polygon: Vec<Coordinate>,
}

/// Serialized boundary plus routing for the gateway call of `finish()`.
enum PersistPayload {
    Task {
        task_id: String,
        polygon_geojson: String,
        notes: Option<String>,
    },
    Plot {
        plot_id: String,
        update: PlotBoundaryUpdate,
    },
}

/// Owns the one active [`DrawingSession`] and gates persistence behind the
/// latest validation verdict.
pub struct SessionController {
    session: Arc<Mutex<DrawingSession>>,
    authority: Arc<dyn ValidationAuthority>,
    gateway: Arc<dyn PersistenceGateway>,
    tolerance_percent: f64,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionController {
    pub fn new(
        authority: Arc<dyn ValidationAuthority>,
        gateway: Arc<dyn PersistenceGateway>,
        tolerance_percent: f64,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: Arc::new(Mutex::new(DrawingSession::idle())),
            authority,
            gateway,
            tolerance_percent,
            events,
        }
    }

    /// Subscribe to session events. Receivers may be dropped freely; the UI
    /// can always re-sync from [`SessionController::snapshot`].
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Begin a task-completion session. An active session of either kind is
    /// silently cancelled first — the two workflows are mutually exclusive.
    pub async fn begin_task(&self, task_id: impl Into<String>, plot_id: impl Into<String>) {
        self.begin(SessionMode::CompletingTask {
            task_id: task_id.into(),
            plot_id: plot_id.into(),
        })
        .await;
    }

    /// Begin a boundary-edit session for an existing plot record.
    pub async fn begin_plot_edit(&self, plot: ReferencePlot) {
        self.begin(SessionMode::EditingPlot { plot }).await;
    }

    async fn begin(&self, mode: SessionMode) {
        let session_id = Uuid::new_v4().to_string();
        {
            let mut s = self.session.lock().await;
            if !s.mode.is_idle() {
                debug!(session_id = %s.id, "active session abandoned by new begin");
            }
            s.reset_to_idle();
            s.id = session_id.clone();
            s.mode = mode;
            s.started_at = Utc::now();
        }
        info!(session_id = %session_id, "drawing session started");
        self.emit(SessionEvent::Started { session_id });
    }

    /// Append a tapped vertex. At 3+ points the area is recomputed and a
    /// validation round is triggered; below 3 any stale verdict is cleared —
    /// there is nothing valid to show for an incomplete shape.
    pub async fn add_point(&self, point: Coordinate) {
        let outcome = {
            let mut s = self.session.lock().await;
            if s.mode.is_idle() {
                warn!("add_point ignored — no active session");
                return;
            }
            s.polygon.push(point);
            self.after_mutation(&mut s)
        };
        self.publish_mutation(outcome);
    }

    /// Undo the most recent tap. No-op on an empty polygon; the
    /// re-validation rule applies at the new length.
    pub async fn remove_last_point(&self) {
        let outcome = {
            let mut s = self.session.lock().await;
            if s.mode.is_idle() || s.polygon.is_empty() {
                return;
            }
            s.polygon.pop();
            self.after_mutation(&mut s)
        };
        self.publish_mutation(outcome);
    }

    /// Attach field notes to a task-completion session; sent along with
    /// `complete_task` on finish. Ignored outside task mode.
    pub async fn set_notes(&self, notes: Option<String>) {
        let mut s = self.session.lock().await;
        if matches!(s.mode, SessionMode::CompletingTask { .. }) {
            s.notes = notes;
        }
    }

    /// Abandon the session from any drawing state, however many points were
    /// drawn and whether or not calls are in flight. The epoch bump
    /// guarantees a late validation response never resurfaces.
    pub async fn cancel(&self) {
        let session_id = {
            let mut s = self.session.lock().await;
            if s.mode.is_idle() {
                return;
            }
            let id = s.id.clone();
            s.reset_to_idle();
            id
        };
        info!(session_id = %session_id, "drawing session cancelled");
        self.emit(SessionEvent::Cancelled { session_id });
    }

    /// The gated terminal transition.
    ///
    /// Preconditions, checked in order: an active session; 3+ points; a
    /// settled verdict; a passing verdict. The persistence gateway is never
    /// invoked while the verdict is absent or invalid. A gateway failure is
    /// returned verbatim with the session intact, so `finish()` can be
    /// retried without redrawing.
    pub async fn finish(&self) -> Result<(), FinishError> {
        let (payload, epoch, session_id) = {
            let s = self.session.lock().await;
            if s.mode.is_idle() {
                return Err(FinishError::NotDrawing);
            }
            if s.polygon.len() < 3 {
                return Err(FinishError::TooFewPoints {
                    count: s.polygon.len(),
                });
            }
            if s.is_validating {
                return Err(FinishError::ValidationPending);
            }
            let Some(verdict) = s.verdict.as_ref() else {
                return Err(FinishError::ValidationPending);
            };
            if !verdict.is_valid {
                return Err(FinishError::ValidationFailed {
                    verdict: verdict.clone(),
                });
            }
            let payload = match &s.mode {
                SessionMode::Idle => return Err(FinishError::NotDrawing),
                SessionMode::CompletingTask { task_id, .. } => PersistPayload::Task {
                    task_id: task_id.clone(),
                    polygon_geojson: geo::to_geojson_string(&s.polygon),
                    notes: s.notes.clone(),
                },
                SessionMode::EditingPlot { plot } => PersistPayload::Plot {
                    plot_id: plot.plot_id.clone(),
                    update: PlotBoundaryUpdate {
                        farmer_id: plot.farmer_id.clone(),
                        boundary: geo::to_wkt(&s.polygon),
                        area: verdict.drawn_area_ha,
                        so_thua: plot.so_thua,
                        so_to: plot.so_to,
                        status: plot.status,
                    },
                },
            };
            (payload, s.epoch, s.id.clone())
        };

        match &payload {
            PersistPayload::Task {
                task_id,
                polygon_geojson,
                notes,
            } => {
                self.gateway
                    .complete_task(task_id, polygon_geojson, notes.as_deref())
                    .await?
            }
            PersistPayload::Plot { plot_id, update } => {
                self.gateway.update_plot_boundary(plot_id, update).await?
            }
        }

        {
            let mut s = self.session.lock().await;
            // Leave the session alone if it was restarted or cancelled while
            // the gateway call was in flight.
            if s.epoch == epoch {
                s.reset_to_idle();
            }
        }
        info!(session_id = %session_id, "boundary persisted");
        self.emit(SessionEvent::Persisted { session_id });
        Ok(())
    }

    /// Observable session state for the UI layer.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let s = self.session.lock().await;
        SessionSnapshot {
            session_id: s.id.clone(),
            mode: s.mode.clone(),
            points: s.polygon.clone(),
            area_m2: s.area_m2,
            verdict: s.verdict.clone(),
            is_validating: s.is_validating,
            started_at: s.started_at,
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────────

    /// Re-establish derived fields after a polygon mutation and decide
    /// whether a validation round is due. Always bumps the epoch so any
    /// in-flight response becomes stale.
    fn after_mutation(
        &self,
        s: &mut DrawingSession,
    ) -> (usize, f64, Option<PendingValidation>) {
        s.epoch += 1;
        s.verdict = None;
        if s.polygon.len() >= 3 {
            s.area_m2 = geo::compute_area(&s.polygon);
            s.is_validating = true;
            let pending = s.mode.plot_id().map(|plot_id| PendingValidation {
                epoch: s.epoch,
                plot_id: plot_id.to_string(),
                polygon: s.polygon.clone(),
            });
            (s.polygon.len(), s.area_m2, pending)
        } else {
            s.area_m2 = 0.0;
            s.is_validating = false;
            (s.polygon.len(), 0.0, None)
        }
    }

    fn publish_mutation(&self, outcome: (usize, f64, Option<PendingValidation>)) {
        let (points, area_m2, pending) = outcome;
        self.emit(SessionEvent::PolygonChanged { points, area_m2 });
        if let Some(pending) = pending {
            self.spawn_validation(pending);
        }
    }

    fn spawn_validation(&self, pending: PendingValidation) {
        let authority = Arc::clone(&self.authority);
        let session = Arc::clone(&self.session);
        let events = self.events.clone();
        let tolerance = self.tolerance_percent;
        tokio::spawn(async move {
            let result = authority
                .validate(&pending.plot_id, &pending.polygon, tolerance)
                .await;
            let mut s = session.lock().await;
            if s.epoch != pending.epoch {
                debug!(
                    epoch = pending.epoch,
                    current = s.epoch,
                    "stale validation response discarded"
                );
                return;
            }
            s.is_validating = false;
            match result {
                Ok(verdict) => {
                    debug!(
                        is_valid = verdict.is_valid,
                        difference_percent = verdict.difference_percent,
                        "verdict received"
                    );
                    let _ = events.send(SessionEvent::VerdictReceived {
                        is_valid: verdict.is_valid,
                    });
                    s.verdict = Some(verdict);
                }
                Err(e) => {
                    warn!("boundary validation failed: {e} — verdict cleared");
                    s.verdict = None;
                    let _ = events.send(SessionEvent::VerdictCleared);
                }
            }
        });
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

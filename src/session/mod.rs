//! The stateful core: one drawing session, one controller.
//!
//! Everything mutable in the capture subsystem lives in the single
//! [`model::DrawingSession`] owned by [`SessionController`]. Other modules
//! are pure functions ([`crate::geo`]) or stateless-per-call network clients
//! ([`crate::validation`], [`crate::persist`]).

pub mod controller;
pub mod model;

pub use controller::SessionController;
pub use model::{SessionEvent, SessionMode, SessionSnapshot};

use thiserror::Error;

use crate::persist::GatewayError;
use crate::validation::ValidationVerdict;

/// Rejections of the terminal `finish()` transition, checked in this order.
#[derive(Debug, Error)]
pub enum FinishError {
    #[error("no drawing session is active")]
    NotDrawing,
    #[error("polygon has {count} point(s) — a boundary needs at least 3")]
    TooFewPoints { count: usize },
    #[error("boundary validation has not completed")]
    ValidationPending,
    /// Hard block, not a warning: the drawn area deviates beyond tolerance.
    /// Carries the full verdict so the UI can show the numeric comparison.
    #[error(
        "boundary rejected ({:.1}% difference exceeds {:.1}% tolerance): {}",
        .verdict.difference_percent,
        .verdict.tolerance_percent,
        .verdict.message
    )]
    ValidationFailed { verdict: ValidationVerdict },
    /// Persistence failed after the gate passed. Session state is preserved
    /// so `finish()` can be retried without redrawing.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

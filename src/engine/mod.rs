//! Parameter propagation engine.
//!
//! A session owns one [`ParameterState`]. Every edit is a [`FieldEvent`]
//! passed through [`apply`], which either returns the next consistent
//! snapshot or rejects the edit and leaves the snapshot untouched.

mod event;
mod propagation;
mod session;
mod state;

pub use event::{DeriveDirection, FieldEvent};
pub use propagation::apply;
pub use session::{PropagationEngine, StateObserver};
pub use state::{Axis, ParameterState, Photometrics, ProjectionGeometry, Resolution, SurfaceSpec};

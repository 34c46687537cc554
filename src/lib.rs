//! Projection Surface Resolution Calculator
//!
//! Keeps the parameters of a projection setup mutually consistent:
//! - Surface dimensions in mixed units (ft, in, mm, feet-inches)
//! - Pixel resolution with per-axis locks
//! - Throw ratio and throw distance
//! - Brightness (lumens, screen gain, foot-lamberts)
//! - Pixel pitch, PPI and viewing distance
//!
//! Every edit goes through [`engine::apply`], which turns one snapshot plus one
//! [`engine::FieldEvent`] into the next consistent snapshot.

pub mod calc;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod export;
pub mod preview;

// Re-export commonly used types
pub use calc::{AspectRatioDescriptor, Length, PixelPitch};
pub use config::{EngineCapabilities, EngineConfig};
pub use engine::{apply, Axis, DeriveDirection, FieldEvent, ParameterState, PropagationEngine};
pub use error::{EngineError, ParseError};

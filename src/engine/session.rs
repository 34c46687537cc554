//! Calculator session: owns the snapshot and notifies subscribers.

use super::event::FieldEvent;
use super::propagation::apply;
use super::state::ParameterState;
use crate::calc::{AspectRatioDescriptor, PixelPitch};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Read-only consumer of snapshots (previews, diagrams, exporters).
pub trait StateObserver {
    /// Called after every accepted edit with the new snapshot.
    fn state_changed(&mut self, state: &ParameterState);
}

impl<F: FnMut(&ParameterState)> StateObserver for F {
    fn state_changed(&mut self, state: &ParameterState) {
        self(state)
    }
}

/// Owns the current [`ParameterState`] and replaces it on each accepted edit.
pub struct PropagationEngine {
    config: EngineConfig,
    state: ParameterState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl PropagationEngine {
    /// Session with the stock configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            state: ParameterState::default(),
            observers: Vec::new(),
        }
    }

    /// Session starting from `config.defaults`.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        let state = ParameterState::from_defaults(&config.defaults, &config.capabilities)?;
        Ok(Self {
            config,
            state,
            observers: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current snapshot.
    pub fn state(&self) -> &ParameterState {
        &self.state
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Apply one edit. On error the snapshot is unchanged and no one is notified.
    pub fn apply_field_edit(&mut self, event: FieldEvent) -> Result<ParameterState, EngineError> {
        match apply(&self.state, &event, &self.config) {
            Ok(next) => {
                log::debug!(
                    "Applied {} edit: {}x{} px, throw {:.2} @ {:.2} ft, {:.2} fL",
                    event.name(),
                    next.resolution.pixel_width,
                    next.resolution.pixel_height,
                    next.geometry.throw_ratio,
                    next.geometry.throw_distance_ft,
                    next.photometrics.foot_lamberts
                );
                self.state = next;
                for observer in &mut self.observers {
                    observer.state_changed(&self.state);
                }
                Ok(self.state.clone())
            }
            Err(e) => {
                log::warn!("Rejected {} edit {:?}: {}", event.name(), event, e);
                Err(e)
            }
        }
    }

    pub fn reduce_aspect_ratio(&self) -> Option<AspectRatioDescriptor> {
        self.state.aspect_ratio()
    }

    pub fn compute_pixel_pitch(&self) -> Result<PixelPitch, EngineError> {
        self.state.pixel_pitch()
    }

    pub fn compute_viewing_distance(&self) -> Result<f64, EngineError> {
        self.state.viewing_distance_ft()
    }

    pub fn lumens_for_target_foot_lamberts(&self, target_fl: f64) -> Result<f64, EngineError> {
        self.state.lumens_for_target_foot_lamberts(target_fl)
    }

    /// Set lumens so the surface reaches `target_fl` at unity gain.
    pub fn apply_brightness_preset(&mut self, target_fl: f64) -> Result<ParameterState, EngineError> {
        let lumens = self.lumens_for_target_foot_lamberts(target_fl)?;
        self.apply_field_edit(FieldEvent::LumensEdited(lumens))
    }
}

impl Default for PropagationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PropagationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagationEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::FOOT_LAMBERT_PRESETS;
    use crate::engine::{Axis, DeriveDirection};
    use crate::error::ParseError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_rejection_keeps_state() {
        let mut engine = PropagationEngine::new();
        let before = engine.state().clone();

        let result = engine.apply_field_edit(FieldEvent::WidthEdited("garbage".into()));
        assert_eq!(
            result,
            Err(EngineError::Parse(ParseError::Malformed("garbage".into())))
        );
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_observers_see_accepted_edits_only() {
        let seen: Rc<RefCell<Vec<ParameterState>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut engine = PropagationEngine::new();
        engine.subscribe(Box::new(move |state: &ParameterState| {
            sink.borrow_mut().push(state.clone());
        }));
        assert_eq!(engine.observer_count(), 1);

        engine.apply_field_edit(FieldEvent::LumensEdited(3072.0)).unwrap();
        let _ = engine.apply_field_edit(FieldEvent::HeightEdited("nine".into()));
        engine.apply_field_edit(FieldEvent::WidthEdited("20ft".into())).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].photometrics.foot_lamberts, 21.33);
        assert_eq!(&seen[1], engine.state());
    }

    #[test]
    fn test_derived_views() {
        let mut engine = PropagationEngine::new();
        assert_eq!(engine.reduce_aspect_ratio().unwrap().standard_label.as_deref(), Some("16:9"));
        assert_eq!(engine.compute_pixel_pitch().unwrap().ppi, 10.0);
        assert_eq!(engine.compute_viewing_distance().unwrap(), 8.33);

        engine
            .apply_field_edit(FieldEvent::aspect_preset("4:3", DeriveDirection::DeriveHeightFromWidth))
            .unwrap();
        assert_eq!(engine.reduce_aspect_ratio().unwrap().to_string(), "4:3 (1.33:1)");
    }

    #[test]
    fn test_brightness_presets() {
        let mut engine = PropagationEngine::new();
        for target in FOOT_LAMBERT_PRESETS {
            let state = engine.apply_brightness_preset(target).unwrap();
            assert_eq!(state.photometrics.lumens, target * 144.0);
            assert_eq!(state.photometrics.foot_lamberts, target);
        }
    }

    #[test]
    fn test_with_config() {
        let mut config = EngineConfig::default();
        config.defaults.width = "10ft".to_string();
        config.defaults.height = "10ft".to_string();
        config.defaults.lock_width = true;
        let mut engine = PropagationEngine::with_config(config).unwrap();

        assert_eq!(engine.state().geometry.throw_distance_ft, 15.0);
        assert_eq!(engine.reduce_aspect_ratio().unwrap().to_string(), "1:1 (1.00:1)");

        // Both axes locked now: surface edits leave the grid alone
        let state = engine.apply_field_edit(FieldEvent::WidthEdited("30ft".into())).unwrap();
        assert!(state.resolution.is_locked(Axis::Width));
        assert_eq!((state.resolution.pixel_width, state.resolution.pixel_height), (1920, 1080));
    }

    #[test]
    fn test_with_config_validates_defaults() {
        let mut config = EngineConfig::default();
        config.defaults.throw_ratio = f64::NAN;
        assert!(matches!(
            PropagationEngine::with_config(config),
            Err(EngineError::OutOfRange { field: "throw ratio", .. })
        ));

        let mut config = EngineConfig::default();
        config.defaults.lumens = -100.0;
        assert!(PropagationEngine::with_config(config).is_err());

        let mut config = EngineConfig::default();
        config.defaults.lumens = 1440.0;
        config.defaults.screen_gain = 1.3;
        config.capabilities.has_screen_gain = false;
        let engine = PropagationEngine::with_config(config).unwrap();
        assert_eq!(engine.state().photometrics.screen_gain, 1.0);
        assert_eq!(engine.state().photometrics.foot_lamberts, 10.0);
    }
}

//! Control binding: routes panel edits into the store and out to observers.
//!
//! Observers live in an explicit table keyed by parameter name. An edit is
//! clamped and stored first, then every observer of that name runs
//! synchronously with the stored value.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::error::ParamError;
use crate::params::{LightSettings, WaveRanges, WaveSettings};
use crate::store::{ParamGroup, ParamRange, ParamValue, Parameter, ParameterStore};
use crate::uniforms::{UniformSet, WriteOutcome};

/// Change handler invoked with the parameter name and its stored value
pub type ChangeHandler<T> = Box<dyn FnMut(&str, ParamValue, &mut T)>;

/// One edit produced by a control surface
#[derive(Debug, Clone, PartialEq)]
pub struct ParamEdit {
    pub name: String,
    pub value: ParamValue,
}

impl ParamEdit {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Widget a surface should show for one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlWidget {
    Slider {
        min: f32,
        max: f32,
        step: f32,
        value: f32,
    },
    ColorPicker(Rgb),
    Checkbox(bool),
}

/// Presentation of a parameter to a control surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEntry<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub widget: ControlWidget,
}

impl<'a> ControlEntry<'a> {
    pub fn from_param(param: &'a Parameter) -> Self {
        let range = param.range();
        let widget = match param.value() {
            ParamValue::Scalar(value) => ControlWidget::Slider {
                min: range.min,
                max: range.max,
                step: range.step,
                value,
            },
            ParamValue::Color(c) => ControlWidget::ColorPicker(c),
            ParamValue::Boolean(b) => ControlWidget::Checkbox(b),
        };
        Self {
            name: param.name(),
            label: param.label(),
            widget,
        }
    }
}

/// External widget protocol
pub trait ControlSurface {
    /// Edits made since the last call, oldest first
    fn take_edits(&mut self) -> Vec<ParamEdit>;
}

/// Observer table for parameter edits
pub struct ControlBinding<T> {
    observers: HashMap<String, Vec<ChangeHandler<T>>>,
}

impl<T> Default for ControlBinding<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ControlBinding<T> {
    pub fn new() -> Self {
        Self {
            observers: HashMap::new(),
        }
    }

    /// Create a parameter in the store and attach its first observer
    #[allow(clippy::too_many_arguments)]
    pub fn register<F>(
        &mut self,
        store: &mut ParameterStore,
        group: ParamGroup,
        name: &str,
        label: &str,
        initial: ParamValue,
        range: ParamRange,
        on_change: F,
    ) -> Result<(), ParamError>
    where
        F: FnMut(&str, ParamValue, &mut T) + 'static,
    {
        store.register(group, name, label, initial, range)?;
        self.observe(name, on_change);
        Ok(())
    }

    /// Attach another observer to `name`
    pub fn observe<F>(&mut self, name: &str, handler: F)
    where
        F: FnMut(&str, ParamValue, &mut T) + 'static,
    {
        self.observers
            .entry(name.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    pub fn observer_count(&self, name: &str) -> usize {
        self.observers.get(name).map_or(0, Vec::len)
    }

    /// Clamp and store `value`, then notify every observer of `name`
    pub fn edit(
        &mut self,
        store: &mut ParameterStore,
        target: &mut T,
        name: &str,
        value: ParamValue,
    ) -> Result<ParamValue, ParamError> {
        let stored = store.set(name, value)?;
        log::debug!("Edit {} = {:?}", name, stored);
        if let Some(handlers) = self.observers.get_mut(name) {
            for handler in handlers.iter_mut() {
                handler(name, stored, target);
            }
        }
        Ok(stored)
    }

    /// Apply every pending edit of a surface. Rejected edits are logged and skipped.
    pub fn apply_edits(
        &mut self,
        store: &mut ParameterStore,
        target: &mut T,
        surface: &mut dyn ControlSurface,
    ) -> usize {
        let mut applied = 0;
        for edit in surface.take_edits() {
            match self.edit(store, target, &edit.name, edit.value) {
                Ok(_) => applied += 1,
                Err(e) => log::warn!("Ignoring edit: {}", e),
            }
        }
        applied
    }
}

/// Standard observer: immediate single-uniform update
pub fn write_uniform(name: &str, value: ParamValue, uniforms: &mut UniformSet) {
    if uniforms.write_param(name, value) == WriteOutcome::Deferred {
        log::trace!("{} deferred until hover ends", name);
    }
}

/// Register the wave and light controls and install the hover override
pub fn bind_surface_controls(
    binding: &mut ControlBinding<UniformSet>,
    store: &mut ParameterStore,
    live: &WaveSettings,
    hover: &WaveSettings,
    ranges: &WaveRanges,
    light: &LightSettings,
) -> Result<(), ParamError> {
    for entry in live.entries(ranges) {
        binding.register(
            store,
            ParamGroup::Live,
            entry.name,
            entry.label,
            entry.value,
            entry.range,
            write_uniform,
        )?;
    }
    for entry in light.entries() {
        binding.register(
            store,
            ParamGroup::Scene,
            entry.name,
            entry.label,
            entry.value,
            entry.range,
            write_uniform,
        )?;
    }
    store.install_override(hover.to_parameter_set(ranges)?)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::params::wave_names;
    use crate::uniforms::UniformSource;

    struct Scripted(Vec<ParamEdit>);

    impl ControlSurface for Scripted {
        fn take_edits(&mut self) -> Vec<ParamEdit> {
            std::mem::take(&mut self.0)
        }
    }

    fn bound() -> (ControlBinding<UniformSet>, ParameterStore, UniformSet) {
        let mut binding = ControlBinding::new();
        let mut store = ParameterStore::new();
        bind_surface_controls(
            &mut binding,
            &mut store,
            &WaveSettings::default(),
            &WaveSettings::hover_override(),
            &WaveRanges::default(),
            &LightSettings::default(),
        )
        .unwrap();
        let mut uniforms = UniformSet::new();
        uniforms.apply(store.live(), UniformSource::Live, 0.0);
        (binding, store, uniforms)
    }

    #[test]
    fn test_setup_registers_every_control() {
        let (binding, store, _) = bound();
        assert_eq!(store.live().len(), 7);
        assert_eq!(store.scene().len(), 3);
        assert_eq!(store.hover_override().len(), 7);
        assert_eq!(binding.observer_count(wave_names::WAVE_ELEVATION), 1);
    }

    #[test]
    fn test_edit_clamps_then_notifies() {
        let (mut binding, mut store, mut uniforms) = bound();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        binding.observe(wave_names::WAVE_ELEVATION, move |_, value, _| {
            log.borrow_mut().push(value);
        });

        let stored = binding
            .edit(
                &mut store,
                &mut uniforms,
                wave_names::WAVE_ELEVATION,
                ParamValue::Scalar(4.0),
            )
            .unwrap();

        assert_eq!(stored, ParamValue::Scalar(1.0));
        assert_eq!(*seen.borrow(), vec![ParamValue::Scalar(1.0)]);
        assert_eq!(uniforms.wave_elevation(), 1.0);
    }

    #[test]
    fn test_rejected_edit_notifies_nobody() {
        let (mut binding, mut store, mut uniforms) = bound();
        let result = binding.edit(
            &mut store,
            &mut uniforms,
            wave_names::WAVE_DIRECTION,
            ParamValue::Scalar(f32::NAN),
        );
        assert!(result.is_err());
        assert_eq!(uniforms.wave_direction(), 4.0);
        assert_eq!(store.live().scalar(wave_names::WAVE_DIRECTION), Some(4.0));
    }

    #[test]
    fn test_apply_edits_skips_bad_entries() {
        let (mut binding, mut store, mut uniforms) = bound();
        let mut surface = Scripted(vec![
            ParamEdit::new(wave_names::WAVE_FREQUENCY_X, 6.5_f32),
            ParamEdit::new("missing", 1.0_f32),
            ParamEdit::new(wave_names::WIREFRAME, true),
        ]);
        let applied = binding.apply_edits(&mut store, &mut uniforms, &mut surface);
        assert_eq!(applied, 2);
        assert_eq!(uniforms.wave_frequency().x, 6.5);
        assert!(uniforms.wireframe());
        assert!(surface.take_edits().is_empty());
    }

    #[test]
    fn test_control_entry_widgets() {
        let (_, store, _) = bound();
        let elevation = store.get(wave_names::WAVE_ELEVATION).unwrap();
        assert_eq!(
            ControlEntry::from_param(elevation).widget,
            ControlWidget::Slider {
                min: 0.0,
                max: 1.0,
                step: 0.001,
                value: 0.3
            }
        );
        let depth = store.get(wave_names::DEPTH_COLOR).unwrap();
        assert!(matches!(
            ControlEntry::from_param(depth).widget,
            ControlWidget::ColorPicker(_)
        ));
        assert_eq!(ControlEntry::from_param(depth).label, "Depth Color");
    }
}

//! Parameter store: named, range-constrained tunable values.
//!
//! The store owns three [`ParameterSet`]s:
//! - `live`: wave parameters edited from the control panel
//! - `hover_override`: fixed wave constants shown while the pointer hovers the surface
//! - `scene`: lighting parameters that are tunable but never overridden
//!
//! Every write is clamped into the parameter's range before it is stored.

use crate::color::Rgb;
use crate::error::ParamError;

/// Kind of value a parameter holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Scalar,
    Color,
    Boolean,
}

/// Parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Scalar(f32),
    Color(Rgb),
    Boolean(bool),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Scalar(_) => ParamKind::Scalar,
            ParamValue::Color(_) => ParamKind::Color,
            ParamValue::Boolean(_) => ParamKind::Boolean,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match *self {
            ParamValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match *self {
            ParamValue::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Scalar(v)
    }
}

impl From<Rgb> for ParamValue {
    fn from(c: Rgb) -> Self {
        ParamValue::Color(c)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Boolean(b)
    }
}

/// Inclusive value range plus the UI step hint.
///
/// Only scalars use `min`/`max`; color channels always clamp to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    /// Range used by colors and booleans
    pub const UNIT: ParamRange = ParamRange {
        min: 0.0,
        max: 1.0,
        step: 0.0,
    };

    /// Create a range; swapped bounds are put back in order
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
            step,
        }
    }

    /// Clamp into `[min, max]`
    pub fn clamp(&self, v: f32) -> f32 {
        v.max(self.min).min(self.max)
    }
}

impl Default for ParamRange {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A single named tunable value
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    label: String,
    value: ParamValue,
    range: ParamRange,
}

impl Parameter {
    /// Create a parameter, clamping the initial value into range
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        initial: ParamValue,
        range: ParamRange,
    ) -> Result<Self, ParamError> {
        let mut param = Self {
            name: name.into(),
            label: label.into(),
            value: initial,
            range,
        };
        param.value = param.constrain(initial)?;
        Ok(param)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ParamKind {
        self.value.kind()
    }

    pub fn value(&self) -> ParamValue {
        self.value
    }

    pub fn range(&self) -> ParamRange {
        self.range
    }

    /// Check the kind and clamp into range without storing
    pub fn constrain(&self, value: ParamValue) -> Result<ParamValue, ParamError> {
        if value.kind() != self.kind() {
            return Err(ParamError::KindMismatch {
                name: self.name.clone(),
                expected: self.kind(),
                got: value.kind(),
            });
        }
        match value {
            ParamValue::Scalar(v) if v.is_nan() => Err(ParamError::NonFinite(self.name.clone())),
            ParamValue::Scalar(v) => Ok(ParamValue::Scalar(self.range.clamp(v))),
            ParamValue::Color(c) => Ok(ParamValue::Color(c.clamped())),
            ParamValue::Boolean(b) => Ok(ParamValue::Boolean(b)),
        }
    }

    fn store(&mut self, value: ParamValue) -> Result<ParamValue, ParamError> {
        self.value = self.constrain(value)?;
        Ok(self.value)
    }
}

/// Ordered mapping of parameters by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    params: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter; names must be unique within the set
    pub fn insert(&mut self, param: Parameter) -> Result<(), ParamError> {
        if self.contains(param.name()) {
            return Err(ParamError::Duplicate(param.name().to_string()));
        }
        self.params.push(param);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name() == name)
    }

    pub fn value(&self, name: &str) -> Option<ParamValue> {
        self.get(name).map(Parameter::value)
    }

    pub fn scalar(&self, name: &str) -> Option<f32> {
        self.value(name).and_then(|v| v.as_scalar())
    }

    pub fn color(&self, name: &str) -> Option<Rgb> {
        self.value(name).and_then(|v| v.as_color())
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(|v| v.as_bool())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub(crate) fn set(&mut self, name: &str, value: ParamValue) -> Result<ParamValue, ParamError> {
        self.params
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| ParamError::Unknown(name.to_string()))?
            .store(value)
    }
}

/// Which set a registered parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamGroup {
    /// Wave parameters (subject to hover override)
    Live,
    /// Lighting parameters
    Scene,
}

/// Owner of the live, hover-override and scene parameter sets
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    live: ParameterSet,
    hover_override: ParameterSet,
    scene: ParameterSet,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parameter in `group`. Names are unique across the whole store.
    pub fn register(
        &mut self,
        group: ParamGroup,
        name: &str,
        label: &str,
        initial: ParamValue,
        range: ParamRange,
    ) -> Result<&Parameter, ParamError> {
        if self.get(name).is_some() {
            return Err(ParamError::Duplicate(name.to_string()));
        }
        let param = Parameter::new(name, label, initial, range)?;
        let set = match group {
            ParamGroup::Live => &mut self.live,
            ParamGroup::Scene => &mut self.scene,
        };
        set.insert(param)?;
        set.get(name)
            .ok_or_else(|| ParamError::Unknown(name.to_string()))
    }

    /// Clamp and store an edit, returning the value actually stored
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<ParamValue, ParamError> {
        if self.live.contains(name) {
            self.live.set(name, value)
        } else {
            self.scene.set(name, value)
        }
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.live.get(name).or_else(|| self.scene.get(name))
    }

    /// Install the fixed hover set. It must name exactly the live entries, with matching kinds.
    pub fn install_override(&mut self, set: ParameterSet) -> Result<(), ParamError> {
        if set.len() != self.live.len() {
            return Err(ParamError::SchemaMismatch(format!(
                "{} override entries for {} live entries",
                set.len(),
                self.live.len()
            )));
        }
        for live in self.live.iter() {
            let Some(over) = set.get(live.name()) else {
                return Err(ParamError::SchemaMismatch(format!(
                    "missing '{}'",
                    live.name()
                )));
            };
            if over.kind() != live.kind() {
                return Err(ParamError::KindMismatch {
                    name: live.name().to_string(),
                    expected: live.kind(),
                    got: over.kind(),
                });
            }
        }

        // Override constants obey the live ranges too
        let mut clamped = ParameterSet::new();
        for over in set.iter() {
            let range = self
                .live
                .get(over.name())
                .map(Parameter::range)
                .unwrap_or_default();
            clamped.insert(Parameter::new(
                over.name(),
                over.label(),
                over.value(),
                range,
            )?)?;
        }
        self.hover_override = clamped;
        Ok(())
    }

    pub fn live(&self) -> &ParameterSet {
        &self.live
    }

    pub fn hover_override(&self) -> &ParameterSet {
        &self.hover_override
    }

    pub fn scene(&self) -> &ParameterSet {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_elevation() -> ParameterStore {
        let mut store = ParameterStore::new();
        store
            .register(
                ParamGroup::Live,
                "wave_elevation",
                "Wave Elevation",
                ParamValue::Scalar(0.3),
                ParamRange::new(0.0, 1.0, 0.001),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_write_above_max_stores_max() {
        let mut store = store_with_elevation();
        let stored = store.set("wave_elevation", ParamValue::Scalar(5.0)).unwrap();
        assert_eq!(stored, ParamValue::Scalar(1.0));
        assert_eq!(store.live().scalar("wave_elevation"), Some(1.0));
    }

    #[test]
    fn test_write_below_min_stores_min() {
        let mut store = store_with_elevation();
        store.set("wave_elevation", ParamValue::Scalar(-3.0)).unwrap();
        assert_eq!(store.live().scalar("wave_elevation"), Some(0.0));

        store.set("wave_elevation", f32::NEG_INFINITY.into()).unwrap();
        assert_eq!(store.live().scalar("wave_elevation"), Some(0.0));
    }

    #[test]
    fn test_nan_is_rejected_and_value_kept() {
        let mut store = store_with_elevation();
        let err = store.set("wave_elevation", f32::NAN.into()).unwrap_err();
        assert_eq!(err, ParamError::NonFinite("wave_elevation".to_string()));
        assert_eq!(store.live().scalar("wave_elevation"), Some(0.3));
    }

    #[test]
    fn test_initial_value_is_clamped() {
        let mut store = ParameterStore::new();
        let param = store
            .register(
                ParamGroup::Scene,
                "light_x",
                "Light X",
                ParamValue::Scalar(42.0),
                ParamRange::new(-10.0, 10.0, 0.001),
            )
            .unwrap();
        assert_eq!(param.value(), ParamValue::Scalar(10.0));
    }

    #[test]
    fn test_kind_mismatch_and_unknown() {
        let mut store = store_with_elevation();
        assert!(matches!(
            store.set("wave_elevation", true.into()),
            Err(ParamError::KindMismatch { .. })
        ));
        assert_eq!(
            store.set("nope", ParamValue::Scalar(1.0)),
            Err(ParamError::Unknown("nope".to_string()))
        );
    }

    #[test]
    fn test_duplicate_names_across_groups() {
        let mut store = store_with_elevation();
        let result = store.register(
            ParamGroup::Scene,
            "wave_elevation",
            "Dup",
            ParamValue::Scalar(0.0),
            ParamRange::UNIT,
        );
        assert_eq!(
            result.unwrap_err(),
            ParamError::Duplicate("wave_elevation".to_string())
        );
    }

    #[test]
    fn test_colors_clamp_per_channel() {
        let mut store = ParameterStore::new();
        store
            .register(
                ParamGroup::Live,
                "depth_color",
                "Depth Color",
                Rgb::from_u32(0x00a3d7).into(),
                ParamRange::UNIT,
            )
            .unwrap();
        store
            .set("depth_color", Rgb::new(1.5, -0.5, 0.25).into())
            .unwrap();
        assert_eq!(
            store.live().color("depth_color"),
            Some(Rgb::new(1.0, 0.0, 0.25))
        );
    }

    #[test]
    fn test_install_override_checks_schema() {
        let mut store = store_with_elevation();

        let empty = ParameterSet::new();
        assert!(matches!(
            store.install_override(empty),
            Err(ParamError::SchemaMismatch(_))
        ));

        let mut wrong_kind = ParameterSet::new();
        wrong_kind
            .insert(Parameter::new("wave_elevation", "", true.into(), ParamRange::UNIT).unwrap())
            .unwrap();
        assert!(matches!(
            store.install_override(wrong_kind),
            Err(ParamError::KindMismatch { .. })
        ));

        let mut ok = ParameterSet::new();
        ok.insert(
            Parameter::new("wave_elevation", "", ParamValue::Scalar(7.0), ParamRange::new(0.0, 100.0, 1.0))
                .unwrap(),
        )
        .unwrap();
        store.install_override(ok).unwrap();
        // Clamped against the live range, not the range it was built with
        assert_eq!(store.hover_override().scalar("wave_elevation"), Some(1.0));
    }
}

//! Model options: the raw configuration map, the enumerated value domains
//! per key, and [`Options::validate`].
//!
//! Validation runs in three passes: every key must be known, every value
//! must lie in its key's domain, and the resulting combination must satisfy
//! the cross-option constraints in [`CONSTRAINTS`]. Keys absent from the
//! configuration take their default.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::OptionError;

// ── Raw configuration ──────────────────────────────────────────────

/// A single value in a configuration map, before validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// `true` / `false`.
    Bool(bool),
    /// An integer, e.g. a dimensionality.
    Int(i64),
    /// A tag such as `"x-full"`.
    Str(String),
    /// A list of tags, e.g. side reactions.
    List(Vec<String>),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

/// Ordered option-name → raw value mapping supplied by the host.
pub type ConfigMap = IndexMap<String, OptionValue>;

// ── Keys ───────────────────────────────────────────────────────────

/// Option keys, as they appear in configuration maps.
pub mod keys {
    /// Whether current, voltage, or power is prescribed.
    pub const OPERATING_MODE: &str = "operating mode";
    /// Spatial dimension of the current collector.
    pub const DIMENSIONALITY: &str = "dimensionality";
    /// Treatment of the double-layer surface potential.
    pub const SURFACE_FORM: &str = "surface form";
    /// Whether electrolyte convection is modelled.
    pub const CONVECTION: &str = "convection";
    /// Side reactions in addition to intercalation.
    pub const SIDE_REACTIONS: &str = "side reactions";
    /// Whether the interfacial surface area changes with state.
    pub const INTERFACIAL_SURFACE_AREA: &str = "interfacial surface area";
    /// Current collector submodel.
    pub const CURRENT_COLLECTOR: &str = "current collector";
    /// Particle diffusion submodel.
    pub const PARTICLE: &str = "particle";
    /// Thermal submodel.
    pub const THERMAL: &str = "thermal";
    /// Whether the current collectors carry their own thermal balance.
    pub const THERMAL_CURRENT_COLLECTOR: &str = "thermal current collector";

    /// Every recognised key.
    pub const ALL: [&str; 10] = [
        OPERATING_MODE,
        DIMENSIONALITY,
        SURFACE_FORM,
        CONVECTION,
        SIDE_REACTIONS,
        INTERFACIAL_SURFACE_AREA,
        CURRENT_COLLECTOR,
        PARTICLE,
        THERMAL,
        THERMAL_CURRENT_COLLECTOR,
    ];
}

// ── Enumerated domains ─────────────────────────────────────────────

/// A string-tagged option whose value is one of a fixed set.
trait Choice: Copy + Sized + 'static {
    /// Semantic role used in error messages.
    const ROLE: &'static str;

    fn from_text(text: &str) -> Option<Self>;

    fn parse(value: &OptionValue) -> Result<Self, OptionError> {
        match value {
            OptionValue::Str(s) => Self::from_text(s),
            _ => None,
        }
        .ok_or_else(|| OptionError::InvalidValue {
            role: Self::ROLE,
            value: value.to_string(),
        })
    }
}

macro_rules! choice {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (role = $role:expr, default = $default:ident) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every accepted value.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Canonical option text.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Choice for $name {
            const ROLE: &'static str = $role;

            fn from_text(text: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == text)
            }
        }
    };
}

choice! {
    /// Which external quantity drives the cell.
    pub enum OperatingMode (role = "operating mode", default = Current) {
        /// Applied current is prescribed.
        Current => "current",
        /// Terminal voltage is prescribed.
        Voltage => "voltage",
        /// Power is prescribed.
        Power => "power",
    }
}

choice! {
    /// Current collector submodel.
    pub enum CurrentCollectorModel (role = "current collector model", default = Uniform) {
        /// Uniform current collector potential; the only choice in 0D.
        Uniform => "uniform",
        /// Solve for both current collector potentials.
        PotentialPair => "potential pair",
        /// Potential pair, asymptotically reduced for well-conducting collectors.
        PotentialPairQuiteConductive => "potential pair quite conductive",
        /// Potential pair coupled to a single particle per collector point.
        SingleParticlePotentialPair => "single particle potential pair",
        /// Collector potential supplied by an external solver.
        SetExternalPotential => "set external potential",
    }
}

choice! {
    /// Particle diffusion submodel.
    pub enum ParticleModel (role = "particle model", default = FickianDiffusion) {
        /// Fickian diffusion in the radial direction.
        FickianDiffusion => "Fickian diffusion",
        /// Instantaneous diffusion; uniform concentration profile.
        FastDiffusion => "fast diffusion",
    }
}

choice! {
    /// Thermal submodel.
    pub enum ThermalModel (role = "thermal model", default = Isothermal) {
        /// Constant, ambient temperature.
        Isothermal => "isothermal",
        /// Full through-cell temperature profile.
        XFull => "x-full",
        /// Temperature averaged through the cell, varying over the collector.
        XLumped => "x-lumped",
        /// Temperature averaged over the whole cell volume.
        XyzLumped => "xyz-lumped",
        /// Single lumped cell temperature.
        Lumped => "lumped",
    }
}

choice! {
    /// Whether the electrode surface area responds to state.
    pub enum InterfacialSurfaceArea (role = "interfacial surface area", default = Constant) {
        /// Fixed surface area.
        Constant => "constant",
        /// Surface area varies with porosity.
        Varying => "varying",
    }
}

choice! {
    /// A side reaction modelled alongside intercalation.
    pub enum SideReaction (role = "side reaction", default = Oxygen) {
        /// Oxygen evolution/reduction.
        Oxygen => "oxygen",
    }
}

/// Treatment of the double-layer surface potential difference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurfaceForm {
    /// No surface form; potentials are eliminated (`false` in configs).
    #[default]
    Off,
    /// Surface potential difference evolves with a capacitance term.
    Differential,
    /// Surface potential difference solved as an algebraic unknown.
    Algebraic,
}

impl SurfaceForm {
    /// Canonical option value.
    pub fn to_value(self) -> OptionValue {
        match self {
            Self::Off => OptionValue::Bool(false),
            Self::Differential => OptionValue::from("differential"),
            Self::Algebraic => OptionValue::from("algebraic"),
        }
    }

    fn parse(value: &OptionValue) -> Result<Self, OptionError> {
        match value {
            OptionValue::Bool(false) => Ok(Self::Off),
            OptionValue::Str(s) if s == "differential" => Ok(Self::Differential),
            OptionValue::Str(s) if s == "algebraic" => Ok(Self::Algebraic),
            other => Err(OptionError::InvalidValue {
                role: "surface form",
                value: other.to_string(),
            }),
        }
    }
}

/// Spatial dimension of the current collector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimensionality {
    /// A single point.
    #[default]
    Zero,
    /// A line along `z`.
    One,
    /// A plane in `y` and `z`.
    Two,
}

impl Dimensionality {
    /// Every dimensionality, in ascending order.
    pub const ALL: [Dimensionality; 3] = [Self::Zero, Self::One, Self::Two];

    /// Number of spatial dimensions; doubles as a lookup-table index.
    pub fn as_usize(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }

    fn parse(value: &OptionValue) -> Result<Self, OptionError> {
        match value {
            OptionValue::Int(0) => Ok(Self::Zero),
            OptionValue::Int(1) => Ok(Self::One),
            OptionValue::Int(2) => Ok(Self::Two),
            other => Err(OptionError::InvalidDimensionality {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_usize())
    }
}

fn parse_flag(role: &'static str, value: &OptionValue) -> Result<bool, OptionError> {
    match value {
        OptionValue::Bool(b) => Ok(*b),
        other => Err(OptionError::InvalidValue {
            role,
            value: other.to_string(),
        }),
    }
}

fn parse_side_reactions(value: &OptionValue) -> Result<Vec<SideReaction>, OptionError> {
    let OptionValue::List(items) = value else {
        return Err(OptionError::InvalidValue {
            role: SideReaction::ROLE,
            value: value.to_string(),
        });
    };
    let mut reactions = Vec::with_capacity(items.len());
    for item in items {
        let reaction = SideReaction::from_text(item).ok_or_else(|| OptionError::InvalidValue {
            role: SideReaction::ROLE,
            value: item.clone(),
        })?;
        if !reactions.contains(&reaction) {
            reactions.push(reaction);
        }
    }
    Ok(reactions)
}

// ── Cross-option constraints ───────────────────────────────────────

/// A pair of options that cannot take a particular combination of values.
pub struct Constraint {
    /// Key reported first in the error.
    pub first: &'static str,
    /// Key reported second in the error.
    pub second: &'static str,
    /// Returns `true` when the combination is invalid.
    pub violated: fn(&Options) -> bool,
}

/// The full compatibility matrix, checked in order after per-key validation.
pub const CONSTRAINTS: &[Constraint] = &[
    // A point collector has no potential to solve for.
    Constraint {
        first: keys::CURRENT_COLLECTOR,
        second: keys::DIMENSIONALITY,
        violated: |o| {
            o.dimensionality == Dimensionality::Zero
                && o.current_collector != CurrentCollectorModel::Uniform
        },
    },
    Constraint {
        first: keys::THERMAL,
        second: keys::DIMENSIONALITY,
        violated: |o| o.thermal == ThermalModel::XFull && o.dimensionality != Dimensionality::Zero,
    },
    Constraint {
        first: keys::THERMAL_CURRENT_COLLECTOR,
        second: keys::THERMAL,
        violated: |o| o.thermal_current_collector && o.thermal == ThermalModel::Isothermal,
    },
    Constraint {
        first: keys::SURFACE_FORM,
        second: keys::CONVECTION,
        violated: |o| o.surface_form == SurfaceForm::Algebraic && o.convection,
    },
];

// ── Options ────────────────────────────────────────────────────────

/// A validated, immutable option set.
///
/// Only obtainable through [`Options::validate`] or [`Options::default`],
/// so every instance satisfies the per-key domains and [`CONSTRAINTS`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    operating_mode: OperatingMode,
    dimensionality: Dimensionality,
    surface_form: SurfaceForm,
    convection: bool,
    side_reactions: Vec<SideReaction>,
    interfacial_surface_area: InterfacialSurfaceArea,
    current_collector: CurrentCollectorModel,
    particle: ParticleModel,
    thermal: ThermalModel,
    thermal_current_collector: bool,
}

impl Options {
    /// Validate a configuration map and fill in defaults.
    ///
    /// Unknown keys are reported before any value is inspected, so a map
    /// with both an unknown key and a bad value fails on the key.
    pub fn validate(config: &ConfigMap) -> Result<Self, OptionError> {
        if let Some(key) = config.keys().find(|k| !keys::ALL.contains(&k.as_str())) {
            return Err(OptionError::UnknownOption { key: key.clone() });
        }

        let mut options = Self::default();
        for (key, value) in config {
            match key.as_str() {
                keys::OPERATING_MODE => options.operating_mode = OperatingMode::parse(value)?,
                keys::DIMENSIONALITY => options.dimensionality = Dimensionality::parse(value)?,
                keys::SURFACE_FORM => options.surface_form = SurfaceForm::parse(value)?,
                keys::CONVECTION => options.convection = parse_flag("convection", value)?,
                keys::SIDE_REACTIONS => options.side_reactions = parse_side_reactions(value)?,
                keys::INTERFACIAL_SURFACE_AREA => {
                    options.interfacial_surface_area = InterfacialSurfaceArea::parse(value)?
                }
                keys::CURRENT_COLLECTOR => {
                    options.current_collector = CurrentCollectorModel::parse(value)?
                }
                keys::PARTICLE => options.particle = ParticleModel::parse(value)?,
                keys::THERMAL => options.thermal = ThermalModel::parse(value)?,
                keys::THERMAL_CURRENT_COLLECTOR => {
                    options.thermal_current_collector =
                        parse_flag("thermal current collector", value)?
                }
                other => {
                    return Err(OptionError::UnknownOption {
                        key: other.to_string(),
                    })
                }
            }
        }

        for c in CONSTRAINTS {
            if (c.violated)(&options) {
                return Err(OptionError::Incompatible {
                    first_key: c.first,
                    first_value: options.value_text(c.first),
                    second_key: c.second,
                    second_value: options.value_text(c.second),
                });
            }
        }

        tracing::debug!(
            dimensionality = %options.dimensionality,
            current_collector = %options.current_collector,
            particle = %options.particle,
            thermal = %options.thermal,
            "options validated"
        );
        Ok(options)
    }

    /// Look up the validated value for a key.
    pub fn get(&self, key: &str) -> Option<OptionValue> {
        let value: OptionValue = match key {
            keys::OPERATING_MODE => self.operating_mode.as_str().into(),
            keys::DIMENSIONALITY => OptionValue::Int(self.dimensionality.as_usize() as i64),
            keys::SURFACE_FORM => self.surface_form.to_value(),
            keys::CONVECTION => self.convection.into(),
            keys::SIDE_REACTIONS => OptionValue::List(
                self.side_reactions
                    .iter()
                    .map(|r| r.as_str().to_string())
                    .collect(),
            ),
            keys::INTERFACIAL_SURFACE_AREA => self.interfacial_surface_area.as_str().into(),
            keys::CURRENT_COLLECTOR => self.current_collector.as_str().into(),
            keys::PARTICLE => self.particle.as_str().into(),
            keys::THERMAL => self.thermal.as_str().into(),
            keys::THERMAL_CURRENT_COLLECTOR => self.thermal_current_collector.into(),
            _ => return None,
        };
        Some(value)
    }

    /// Every option with its validated value, in [`keys::ALL`] order.
    ///
    /// Feeding the result back to [`Options::validate`] reproduces `self`.
    pub fn to_config_map(&self) -> ConfigMap {
        keys::ALL
            .iter()
            .filter_map(|k| self.get(k).map(|v| (k.to_string(), v)))
            .collect()
    }

    fn value_text(&self, key: &str) -> String {
        self.get(key).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Operating mode.
    pub fn operating_mode(&self) -> OperatingMode {
        self.operating_mode
    }

    /// Current collector dimensionality.
    pub fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    /// Surface form treatment.
    pub fn surface_form(&self) -> SurfaceForm {
        self.surface_form
    }

    /// Whether electrolyte convection is on.
    pub fn convection(&self) -> bool {
        self.convection
    }

    /// Enabled side reactions, deduplicated, in configuration order.
    pub fn side_reactions(&self) -> &[SideReaction] {
        &self.side_reactions
    }

    /// Interfacial surface area treatment.
    pub fn interfacial_surface_area(&self) -> InterfacialSurfaceArea {
        self.interfacial_surface_area
    }

    /// Current collector submodel.
    pub fn current_collector(&self) -> CurrentCollectorModel {
        self.current_collector
    }

    /// Particle submodel.
    pub fn particle(&self) -> ParticleModel {
        self.particle
    }

    /// Thermal submodel.
    pub fn thermal(&self) -> ThermalModel {
        self.thermal
    }

    /// Whether current collector thermal effects are included.
    pub fn thermal_current_collector(&self) -> bool {
        self.thermal_current_collector
    }
}

impl TryFrom<&ConfigMap> for Options {
    type Error = OptionError;

    fn try_from(config: &ConfigMap) -> Result<Self, Self::Error> {
        Self::validate(config)
    }
}

//! Canonical variable names shared between the reference submodels.
//!
//! Submodels find each other's output only through these names, so a
//! custom submodel that defines the same name can stand in for a reference
//! one.

use galvan_core::Domain;

/// Current density drawn from the cell.
pub const TOTAL_CURRENT_DENSITY: &str = "Total current density";
/// Through-cell current density at each current-collector point.
pub const CURRENT_COLLECTOR_CURRENT_DENSITY: &str = "Current collector current density";
/// Potential of the negative current collector.
pub const NEGATIVE_CURRENT_COLLECTOR_POTENTIAL: &str = "Negative current collector potential";
/// Voltage across the cell terminals.
pub const TERMINAL_VOLTAGE: &str = "Terminal voltage";
/// Temperature throughout the cell.
pub const CELL_TEMPERATURE: &str = "Cell temperature";
/// Temperature averaged through the cell thickness.
pub const X_AVERAGED_CELL_TEMPERATURE: &str = "X-averaged cell temperature";
/// Lithium-ion concentration in the electrolyte.
pub const ELECTROLYTE_CONCENTRATION: &str = "Electrolyte concentration";

/// One of the two porous electrodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Electrode {
    /// The anode during discharge.
    Negative,
    /// The cathode during discharge.
    Positive,
}

impl Electrode {
    /// Both electrodes, negative first.
    pub const ALL: [Electrode; 2] = [Self::Negative, Self::Positive];

    /// `"negative"` or `"positive"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Positive => "positive",
        }
    }

    /// `"Negative"` or `"Positive"`, for parameter names.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Negative => "Negative",
            Self::Positive => "Positive",
        }
    }

    /// The electrode's own domain.
    pub fn domain(&self) -> Domain {
        match self {
            Self::Negative => Domain::NegativeElectrode,
            Self::Positive => Domain::PositiveElectrode,
        }
    }

    /// Domain of the electrode's active-material particles.
    pub fn particle_domain(&self) -> Domain {
        match self {
            Self::Negative => Domain::NegativeParticle,
            Self::Positive => Domain::PositiveParticle,
        }
    }

    /// Dimensionless electrode thickness parameter (`l_n` or `l_p`).
    pub fn thickness(&self) -> &'static str {
        match self {
            Self::Negative => "l_n",
            Self::Positive => "l_p",
        }
    }

    /// Sign of the interfacial current: positive in the negative electrode
    /// during discharge.
    pub fn current_sign(&self) -> f64 {
        match self {
            Self::Negative => 1.0,
            Self::Positive => -1.0,
        }
    }

    /// `"X-averaged {electrode} particle concentration"`.
    pub fn particle_concentration(&self) -> String {
        format!("X-averaged {} particle concentration", self.as_str())
    }

    /// `"X-averaged {electrode} particle surface concentration"`.
    pub fn particle_surface_concentration(&self) -> String {
        format!("X-averaged {} particle surface concentration", self.as_str())
    }

    /// `"X-averaged {electrode} electrode interfacial current density"`.
    pub fn interfacial_current(&self) -> String {
        format!(
            "X-averaged {} electrode interfacial current density",
            self.as_str()
        )
    }

    /// `"X-averaged {electrode} electrode surface potential difference"`.
    pub fn surface_potential_difference(&self) -> String {
        format!(
            "X-averaged {} electrode surface potential difference",
            self.as_str()
        )
    }

    /// `"{Electrode} {what}"`, the naming scheme of electrode parameters.
    pub fn parameter(&self, what: &str) -> String {
        format!("{} {what}", self.title())
    }
}

//! Physical domain tags, spatial variables, and auxiliary domain sets.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A named region of the battery geometry.
///
/// Variables, meshes, and submodels are all keyed by domain. The string
/// form (`"negative particle"`, `"current collector"`, ...) is the one
/// used in configuration files and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    /// Porous negative electrode (through-cell coordinate `x_n`).
    #[serde(rename = "negative electrode")]
    NegativeElectrode,
    /// Separator between the electrodes (`x_s`).
    #[serde(rename = "separator")]
    Separator,
    /// Porous positive electrode (`x_p`).
    #[serde(rename = "positive electrode")]
    PositiveElectrode,
    /// Representative negative electrode particle (radial coordinate `r_n`).
    #[serde(rename = "negative particle")]
    NegativeParticle,
    /// Representative positive electrode particle (`r_p`).
    #[serde(rename = "positive particle")]
    PositiveParticle,
    /// Current collector plane (`y`, `z`, or a single point).
    #[serde(rename = "current collector")]
    CurrentCollector,
}

impl Domain {
    /// Every domain, in canonical order.
    pub const ALL: [Domain; 6] = [
        Domain::NegativeElectrode,
        Domain::Separator,
        Domain::PositiveElectrode,
        Domain::NegativeParticle,
        Domain::PositiveParticle,
        Domain::CurrentCollector,
    ];

    /// The through-cell ("macroscale") domains, negative to positive.
    pub const WHOLE_CELL: [Domain; 3] = [
        Domain::NegativeElectrode,
        Domain::Separator,
        Domain::PositiveElectrode,
    ];

    /// Canonical string tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NegativeElectrode => "negative electrode",
            Self::Separator => "separator",
            Self::PositiveElectrode => "positive electrode",
            Self::NegativeParticle => "negative particle",
            Self::PositiveParticle => "positive particle",
            Self::CurrentCollector => "current collector",
        }
    }

    /// Parse a canonical string tag.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }

    /// The spatial variable a one-dimensional mesh of this domain runs along.
    ///
    /// The current collector's variable depends on dimensionality; `Z` is
    /// the 1D case.
    pub fn spatial_variable(&self) -> SpatialVariable {
        match self {
            Self::NegativeElectrode => SpatialVariable::XN,
            Self::Separator => SpatialVariable::XS,
            Self::PositiveElectrode => SpatialVariable::XP,
            Self::NegativeParticle => SpatialVariable::RN,
            Self::PositiveParticle => SpatialVariable::RP,
            Self::CurrentCollector => SpatialVariable::Z,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of domains a variable lives on.
///
/// Inline capacity of 3 covers the whole-cell case
/// (negative electrode, separator, positive electrode) without spilling.
pub type DomainSet = SmallVec<[Domain; 3]>;

/// Format a domain list the way error messages show it: `[a, b]`.
pub(crate) fn display_domains(domains: &[Domain]) -> String {
    let names: Vec<&str> = domains.iter().map(Domain::as_str).collect();
    format!("[{}]", names.join(", "))
}

/// Broadcast domains attached to a variable beyond its primary domain.
///
/// A particle concentration averaged through the electrode still varies
/// over the current collector: primary domain `negative particle`,
/// secondary domain `current collector`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuxiliaryDomains {
    /// Domain one level out from the primary domain.
    #[serde(default)]
    pub secondary: DomainSet,
    /// Domain two levels out.
    #[serde(default)]
    pub tertiary: DomainSet,
}

impl AuxiliaryDomains {
    /// No auxiliary domains.
    pub fn none() -> Self {
        Self::default()
    }

    /// Only a secondary domain.
    pub fn secondary(domain: Domain) -> Self {
        Self {
            secondary: smallvec::smallvec![domain],
            tertiary: DomainSet::new(),
        }
    }

    /// Whether both levels are empty.
    pub fn is_empty(&self) -> bool {
        self.secondary.is_empty() && self.tertiary.is_empty()
    }
}

impl fmt::Display for AuxiliaryDomains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{secondary: {}, tertiary: {}}}",
            display_domains(&self.secondary),
            display_domains(&self.tertiary)
        )
    }
}

/// Independent spatial coordinates of the battery geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpatialVariable {
    /// Through the negative electrode.
    #[serde(rename = "x_n")]
    XN,
    /// Through the separator.
    #[serde(rename = "x_s")]
    XS,
    /// Through the positive electrode.
    #[serde(rename = "x_p")]
    XP,
    /// Radius of a negative particle.
    #[serde(rename = "r_n")]
    RN,
    /// Radius of a positive particle.
    #[serde(rename = "r_p")]
    RP,
    /// Current collector width.
    #[serde(rename = "y")]
    Y,
    /// Current collector height.
    #[serde(rename = "z")]
    Z,
}

impl SpatialVariable {
    /// Every spatial variable, in canonical order.
    pub const ALL: [SpatialVariable; 7] = [
        Self::XN,
        Self::XS,
        Self::XP,
        Self::RN,
        Self::RP,
        Self::Y,
        Self::Z,
    ];

    /// Short name (`"x_n"`, `"z"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XN => "x_n",
            Self::XS => "x_s",
            Self::XP => "x_p",
            Self::RN => "r_n",
            Self::RP => "r_p",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for SpatialVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_name() {
        for d in Domain::ALL {
            assert_eq!(Domain::from_name(d.as_str()), Some(d));
        }
        assert_eq!(Domain::from_name("anode"), None);
    }

    #[test]
    fn serde_uses_canonical_tags() {
        let json = serde_json::to_string(&Domain::NegativeParticle).unwrap();
        assert_eq!(json, "\"negative particle\"");
        let back: Domain = serde_json::from_str("\"current collector\"").unwrap();
        assert_eq!(back, Domain::CurrentCollector);
    }

    #[test]
    fn auxiliary_display_lists_both_levels() {
        let aux = AuxiliaryDomains::secondary(Domain::CurrentCollector);
        assert_eq!(
            aux.to_string(),
            "{secondary: [current collector], tertiary: []}"
        );
        assert!(!aux.is_empty());
        assert!(AuxiliaryDomains::none().is_empty());
    }

    #[test]
    fn particle_domains_run_along_radius() {
        assert_eq!(Domain::NegativeParticle.spatial_variable(), SpatialVariable::RN);
        assert_eq!(Domain::PositiveParticle.spatial_variable(), SpatialVariable::RP);
    }
}

//! The default lithium-ion parameter table.
//!
//! Values are dimensionless except the cell geometry, which is given in
//! metres and scaled into the dimensionless lengths `l_n`, `l_s`, `l_p`
//! (fractions of the cell thickness) and `l_y`, `l_z` (relative to the
//! electrode height).

use galvan_expr::{ExprArena, ParameterValues};

/// Dimensional cell geometry, in metres.
const GEOMETRY: [(&str, f64); 5] = [
    ("Negative electrode thickness [m]", 1e-4),
    ("Separator thickness [m]", 2.5e-5),
    ("Positive electrode thickness [m]", 1e-4),
    ("Electrode width [m]", 0.137),
    ("Electrode height [m]", 0.137),
];

/// Dimensionless values read by the reference submodels.
const DIMENSIONLESS: [(&str, f64); 24] = [
    ("Current function", 1.0),
    ("Voltage function", 0.4),
    ("Power function", 0.4),
    ("Applied current collector potential", 0.0),
    ("Negative current collector conductivity", 1e3),
    ("Negative particle radius", 1.0),
    ("Positive particle radius", 1.0),
    ("Negative particle diffusivity", 1.0),
    ("Positive particle diffusivity", 1.0),
    ("Initial concentration in negative electrode", 0.8),
    ("Initial concentration in positive electrode", 0.6),
    ("Negative electrode open-circuit potential", 0.1),
    ("Positive electrode open-circuit potential", 4.0),
    ("Negative electrode exchange-current density", 1.0),
    ("Positive electrode exchange-current density", 1.0),
    ("Negative electrode double-layer capacity", 1e-2),
    ("Positive electrode double-layer capacity", 1e-2),
    ("Initial electrolyte concentration", 1.0),
    ("Ambient temperature", 0.0),
    ("Effective cell resistance", 0.1),
    ("Cell cooling coefficient", 1.0),
    ("Current collector cooling coefficient", 0.5),
    ("Cell heat capacity", 1.0),
    ("Cell thermal conductivity", 1.0),
];

/// The default table. Dimensionless lengths are expression entries
/// pushed into `arena`, so the table is only valid with that arena.
pub fn lithium_ion(arena: &mut ExprArena) -> ParameterValues {
    let mut values: ParameterValues = GEOMETRY.into_iter().chain(DIMENSIONLESS).collect();

    let l_n = arena.parameter("Negative electrode thickness [m]");
    let l_s = arena.parameter("Separator thickness [m]");
    let l_p = arena.parameter("Positive electrode thickness [m]");
    let ns = arena.add(l_n, l_s);
    let total = arena.add(ns, l_p);
    for (name, length) in [("l_n", l_n), ("l_s", l_s), ("l_p", l_p)] {
        values.insert(name, arena.divide(length, total));
    }

    let width = arena.parameter("Electrode width [m]");
    let height = arena.parameter("Electrode height [m]");
    values.insert("l_y", arena.divide(width, height));
    values.insert("l_z", arena.divide(height, height));
    values
}

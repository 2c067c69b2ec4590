//! Lithium-ion model presets.
//!
//! [`spm`] picks one reference submodel per physical role from the
//! validated options and builds the model. Options that the single
//! particle model does not resolve (side reactions, varying interfacial
//! surface area, convection) are accepted and ignored.

use galvan_core::{
    CurrentCollectorModel, ModelError, OperatingMode, Options, ParticleModel, SurfaceForm,
    ThermalModel,
};
use galvan_submodel::Submodel;
use galvan_submodels::current_collector::{PotentialPair, SetPotential, Uniform};
use galvan_submodels::electrolyte::ConstantConcentration;
use galvan_submodels::external_circuit::{CurrentControl, FunctionControl};
use galvan_submodels::interface::{LeadingOrderReaction, SurfaceFormReaction};
use galvan_submodels::particle::{FastSingleParticle, FickianSingleParticle};
use galvan_submodels::thermal::{Isothermal, Lumped, XFull};
use galvan_submodels::voltage::TerminalVoltage;
use galvan_submodels::Electrode;

use crate::config::{ConfigError, ModelConfig};
use crate::model::BatteryModel;

/// A lithium-ion model with no submodels registered.
pub fn base_model(config: ModelConfig) -> Result<BatteryModel, ConfigError> {
    Ok(BatteryModel::from_config(config)?.with_name("Base lithium-ion model"))
}

/// The single particle model, built.
///
/// # Examples
///
/// ```
/// use galvan_model::{lithium_ion, ModelConfig};
///
/// let model = lithium_ion::spm(ModelConfig::new()).unwrap();
/// assert!(model.is_built());
/// assert_eq!(model.equations().rhs.len(), 2);
/// ```
pub fn spm(config: ModelConfig) -> Result<BatteryModel, ConfigError> {
    let mut model = base_model(config)?.with_name("Single Particle Model");
    register_spm_submodels(&mut model)?;
    model.build_model()?;
    Ok(model)
}

/// Register the single-particle submodel set selected by `model`'s
/// options, in coupling order.
pub fn register_spm_submodels(model: &mut BatteryModel) -> Result<(), ModelError> {
    let options = model.options().clone();
    for (key, submodel) in spm_submodels(&options) {
        model.register(key, submodel)?;
    }
    Ok(())
}

fn spm_submodels(options: &Options) -> Vec<(String, Box<dyn Submodel>)> {
    let mut out: Vec<(String, Box<dyn Submodel>)> = Vec::with_capacity(10);
    out.push(("external circuit".into(), external_circuit(options.operating_mode())));
    out.push(("current collector".into(), current_collector(options)));
    for electrode in Electrode::ALL {
        out.push((
            format!("{} particle", electrode.as_str()),
            particle(options.particle(), electrode),
        ));
        out.push((
            format!("{} interface", electrode.as_str()),
            interface(options.surface_form(), electrode),
        ));
    }
    out.push(("electrolyte".into(), Box::new(ConstantConcentration)));
    out.push(("thermal".into(), thermal(options)));
    out.push(("terminal voltage".into(), Box::new(TerminalVoltage)));
    out
}

fn external_circuit(mode: OperatingMode) -> Box<dyn Submodel> {
    match FunctionControl::new(mode) {
        Some(control) => Box::new(control),
        None => Box::new(CurrentControl),
    }
}

fn current_collector(options: &Options) -> Box<dyn Submodel> {
    match options.current_collector() {
        CurrentCollectorModel::Uniform => Box::new(Uniform),
        CurrentCollectorModel::SetExternalPotential => Box::new(SetPotential),
        model @ (CurrentCollectorModel::PotentialPair
        | CurrentCollectorModel::PotentialPairQuiteConductive
        | CurrentCollectorModel::SingleParticlePotentialPair) => {
            Box::new(PotentialPair::new(model, options.dimensionality()))
        }
    }
}

fn particle(model: ParticleModel, electrode: Electrode) -> Box<dyn Submodel> {
    match model {
        ParticleModel::FickianDiffusion => Box::new(FickianSingleParticle::new(electrode)),
        ParticleModel::FastDiffusion => Box::new(FastSingleParticle::new(electrode)),
    }
}

fn interface(form: SurfaceForm, electrode: Electrode) -> Box<dyn Submodel> {
    match SurfaceFormReaction::new(electrode, form) {
        Some(reaction) => Box::new(reaction),
        None => Box::new(LeadingOrderReaction::new(electrode)),
    }
}

fn thermal(options: &Options) -> Box<dyn Submodel> {
    match options.thermal() {
        ThermalModel::Isothermal => Box::new(Isothermal),
        ThermalModel::XFull => Box::new(XFull),
        ThermalModel::XLumped | ThermalModel::XyzLumped | ThermalModel::Lumped => {
            Box::new(Lumped::new(options.thermal_current_collector()))
        }
    }
}

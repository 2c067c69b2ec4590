//! The battery model and its one-shot build.
//!
//! A [`BatteryModel`] starts [`Unbuilt`](BuildState::Unbuilt): submodels
//! may be registered and replaced. [`build_model`](BatteryModel::build_model)
//! assembles them into equations and moves the model to
//! [`Built`](BuildState::Built), after which the registry is frozen.
//!
//! # Failed builds
//!
//! Assembly writes into a scratch [`Assembly`] that is only installed on
//! success. A failed build leaves the model `Unbuilt` with its registry
//! as the caller left it; nodes pushed into the arena by the failed
//! attempt stay there unreferenced.

use galvan_core::{
    ConfigMap, DiscretisationError, Domain, ExprId, ModelError, OptionError, Options,
    ParameterError, PipelineError,
};
use galvan_expr::{
    Discretiser, DomainLayout, ExprArena, ParameterProcessor, ParameterValue, ParameterValues,
};
use galvan_space::{DiscretisationCatalog, DomainGeometry, SpatialMethod, SubMeshType, VarPts};
use galvan_submodel::{assemble, Assembly, Equations, Submodel, SubmodelRegistry, Variables};
use indexmap::IndexMap;

use crate::config::ModelConfig;
use crate::parameters;

// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<BatteryModel>();
    }
};

/// Where a model is in its lifecycle. `Built` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildState {
    /// Submodels may still be registered.
    Unbuilt,
    /// Equations are assembled; the registry is frozen.
    Built,
}

/// A battery model: validated options, discretisation defaults, a
/// parameter table, and the submodels that make up its equations.
///
/// # Examples
///
/// ```
/// use galvan_core::{ConfigMap, Domain};
/// use galvan_model::BatteryModel;
/// use galvan_space::SubMeshType;
///
/// let model = BatteryModel::new(&ConfigMap::new()).unwrap();
/// assert!(!model.is_built());
/// assert_eq!(
///     model.default_submesh_type(Domain::CurrentCollector),
///     SubMeshType::ZeroD
/// );
/// ```
pub struct BatteryModel {
    name: String,
    options: Options,
    catalog: DiscretisationCatalog,
    arena: ExprArena,
    parameters: ParameterValues,
    registry: SubmodelRegistry,
    assembly: Assembly,
    state: BuildState,
}

impl BatteryModel {
    /// A model with the options in `config`, default parameters, and
    /// default point counts.
    pub fn new(config: &ConfigMap) -> Result<Self, OptionError> {
        Self::from_config(ModelConfig::from(config.clone()))
    }

    /// A model from a full [`ModelConfig`].
    ///
    /// Parameter overrides are laid over the default lithium-ion table.
    pub fn from_config(config: ModelConfig) -> Result<Self, OptionError> {
        let options = Options::validate(&config.options)?;
        let mut catalog = DiscretisationCatalog::new(&options);
        if let Some(var_pts) = config.var_pts {
            catalog = catalog.with_var_pts(var_pts);
        }

        let mut arena = ExprArena::new();
        let mut parameters = parameters::lithium_ion(&mut arena);
        parameters.update(&ParameterValues::from(config.parameters));

        Ok(Self {
            name: "Unnamed battery model".to_string(),
            options,
            catalog,
            arena,
            parameters,
            registry: SubmodelRegistry::new(),
            assembly: Assembly::default(),
            state: BuildState::Unbuilt,
        })
    }

    /// Rename the model.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validated options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Lifecycle state.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Whether [`build_model`](Self::build_model) has succeeded.
    pub fn is_built(&self) -> bool {
        self.state == BuildState::Built
    }

    // ── Discretisation defaults ────────────────────────────────────

    /// The catalog of discretisation defaults for this model's options.
    pub fn catalog(&self) -> &DiscretisationCatalog {
        &self.catalog
    }

    /// Default coordinate ranges of `domain`.
    pub fn default_geometry(&self, domain: Domain) -> DomainGeometry {
        self.catalog.default_geometry(domain)
    }

    /// Default coordinate ranges of every domain.
    pub fn geometry(&self) -> IndexMap<Domain, DomainGeometry> {
        self.catalog.geometry()
    }

    /// Default submesh type of `domain`.
    pub fn default_submesh_type(&self, domain: Domain) -> SubMeshType {
        self.catalog.default_submesh_type(domain)
    }

    /// Default spatial method of `domain`.
    pub fn default_spatial_method(&self, domain: Domain) -> SpatialMethod {
        self.catalog.default_spatial_method(domain)
    }

    /// Mesh point counts.
    pub fn var_pts(&self) -> &VarPts {
        self.catalog.var_pts()
    }

    // ── Parameters and expressions ─────────────────────────────────

    /// The parameter table used by
    /// [`process_parameters_and_discretise`](Self::process_parameters_and_discretise).
    pub fn parameters(&self) -> &ParameterValues {
        &self.parameters
    }

    /// Overlay `values` on the parameter table.
    ///
    /// # Errors
    ///
    /// [`ParameterError::ForeignExpression`] if an expression value was not
    /// allocated in this model's [`arena`](Self::arena). The table is left
    /// unchanged.
    pub fn update_parameters(&mut self, values: &ParameterValues) -> Result<(), ParameterError> {
        for (name, value) in values.iter() {
            if let ParameterValue::Expression(id) = value {
                if self.arena.get(id).is_none() {
                    return Err(ParameterError::ForeignExpression {
                        name: name.to_string(),
                        id,
                    });
                }
            }
        }
        self.parameters.update(values);
        Ok(())
    }

    /// The arena holding every expression of this model.
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Mutable access to the arena, for building expressions to process.
    pub fn arena_mut(&mut self) -> &mut ExprArena {
        &mut self.arena
    }

    // ── Registry ───────────────────────────────────────────────────

    /// Register `submodel` under `key`, replacing any submodel already
    /// there without moving it in the build order.
    ///
    /// # Errors
    ///
    /// [`ModelError::AlreadyBuilt`] once the model is built.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        submodel: Box<dyn Submodel>,
    ) -> Result<(), ModelError> {
        if self.is_built() {
            return Err(ModelError::AlreadyBuilt);
        }
        let key = key.into();
        let incoming = submodel.name().to_string();
        if let Some(old) = self.registry.insert(key.as_str(), submodel) {
            tracing::warn!(
                key = %key,
                replaced = old.name(),
                by = %incoming,
                "submodel replaced"
            );
        }
        Ok(())
    }

    /// The registered submodels in build order.
    pub fn submodels(&self) -> &SubmodelRegistry {
        &self.registry
    }

    // ── Build ──────────────────────────────────────────────────────

    /// Assemble the registered submodels into this model's equations.
    ///
    /// # Errors
    ///
    /// - [`ModelError::AlreadyBuilt`] if called a second time.
    /// - Any assembly error from [`assemble`]; the model stays unbuilt.
    pub fn build_model(&mut self) -> Result<(), ModelError> {
        if self.is_built() {
            return Err(ModelError::AlreadyBuilt);
        }
        tracing::info!(
            model = %self.name,
            submodels = self.registry.len(),
            "building model"
        );

        let assembly = assemble(&self.registry, &mut self.arena)?;

        tracing::info!(
            model = %self.name,
            variables = assembly.variables.len(),
            rhs = assembly.equations.rhs.len(),
            algebraic = assembly.equations.algebraic.len(),
            "model built"
        );
        self.assembly = assembly;
        self.state = BuildState::Built;
        Ok(())
    }

    /// Every variable of the built model. Empty until built.
    pub fn variables(&self) -> &Variables {
        &self.assembly.variables
    }

    /// Every equation of the built model. Empty until built.
    pub fn equations(&self) -> &Equations {
        &self.assembly.equations
    }

    /// Registry key of the submodel that defined `variable`.
    pub fn defined_by(&self, variable: &str) -> Option<&str> {
        self.assembly.provenance.get(variable).map(String::as_str)
    }

    // ── Pipeline ───────────────────────────────────────────────────

    /// State-vector layout of the built model's state variables.
    ///
    /// An unbuilt model has an empty layout.
    pub fn layout(&self) -> Result<DomainLayout, DiscretisationError> {
        let mut layout = DomainLayout::new();
        layout.set_variable_slices(self.assembly.state_variables(&self.arena), &self.catalog)?;
        Ok(layout)
    }

    /// Substitute this model's parameters into `root`, then replace every
    /// variable with its state-vector slice.
    ///
    /// The layout holds the model's state variables first, then any other
    /// variables of the processed tree in first-appearance order, each sized
    /// by the model's mesh point counts. Variables introduced by
    /// expression-valued parameters are therefore laid out too.
    pub fn process_parameters_and_discretise(
        &mut self,
        root: ExprId,
    ) -> Result<ExprId, PipelineError> {
        let processed = ParameterProcessor::new(&self.parameters).process(&mut self.arena, root)?;
        let mut layout = self.layout()?;
        layout.set_variable_slices(self.arena.variables(processed), &self.catalog)?;
        Ok(Discretiser::new(&layout).discretise(&mut self.arena, processed)?)
    }

    /// Process and discretise every equation of the built model, sharing
    /// one parameter cache and one layout.
    ///
    /// Returns the discretised equations keyed as in
    /// [`equations`](Self::equations) together with the layout used.
    pub fn discretise_equations(&mut self) -> Result<(Equations, DomainLayout), PipelineError> {
        let mut processor = ParameterProcessor::new(&self.parameters);
        let mut processed = Equations::new();
        let source = &self.assembly.equations;
        for (target, from) in [
            (&mut processed.rhs, &source.rhs),
            (&mut processed.algebraic, &source.algebraic),
            (&mut processed.initial_conditions, &source.initial_conditions),
        ] {
            for (name, root) in from {
                target.insert(name.clone(), processor.process(&mut self.arena, *root)?);
            }
        }

        let mut layout = self.layout()?;
        for root in [&processed.rhs, &processed.algebraic, &processed.initial_conditions]
            .into_iter()
            .flat_map(|m| m.values())
        {
            layout.set_variable_slices(self.arena.variables(*root), &self.catalog)?;
        }

        let mut discretiser = Discretiser::new(&layout);
        let mut out = Equations::new();
        for (target, from) in [
            (&mut out.rhs, &processed.rhs),
            (&mut out.algebraic, &processed.algebraic),
            (&mut out.initial_conditions, &processed.initial_conditions),
        ] {
            for (name, root) in from {
                target.insert(name.clone(), discretiser.discretise(&mut self.arena, *root)?);
            }
        }
        tracing::debug!(
            model = %self.name,
            state_size = layout.len(),
            equations = out.len(),
            "equations discretised"
        );
        Ok((out, layout))
    }
}

impl std::fmt::Debug for BatteryModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatteryModel")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("submodels", &self.registry)
            .field("arena_len", &self.arena.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galvan_core::OptionValue;
    use galvan_expr::{Node, VariableRef};
    use galvan_submodel::{CouplingError, EquationMap};

    /// `d(c)/dt = -k c` on the negative particle.
    struct Decay;

    impl Submodel for Decay {
        fn name(&self) -> &str {
            "decay"
        }
        fn fundamental_variables(&self, arena: &mut ExprArena) -> Variables {
            let c = arena.variable(VariableRef::new("c").on(Domain::NegativeParticle));
            Variables::new().with("c", c)
        }
        fn set_rhs(
            &self,
            arena: &mut ExprArena,
            variables: &Variables,
        ) -> Result<EquationMap, CouplingError> {
            let c = variables.require("c")?;
            let k = arena.parameter("Current function");
            let kc = arena.multiply(k, c);
            Ok([("c".to_string(), arena.negate(kc))].into_iter().collect())
        }
        fn set_initial_conditions(
            &self,
            arena: &mut ExprArena,
            _variables: &Variables,
        ) -> Result<EquationMap, CouplingError> {
            Ok([("c".to_string(), arena.scalar(1.0))].into_iter().collect())
        }
    }

    struct Needs(&'static str);

    impl Submodel for Needs {
        fn name(&self) -> &str {
            "needs"
        }
        fn coupled_variables(
            &self,
            _arena: &mut ExprArena,
            variables: &Variables,
        ) -> Result<Variables, CouplingError> {
            variables.require(self.0)?;
            Ok(Variables::new())
        }
    }

    fn model() -> BatteryModel {
        BatteryModel::new(&ConfigMap::new()).unwrap()
    }

    #[test]
    fn second_build_fails() {
        let mut m = model();
        m.register("decay", Box::new(Decay)).unwrap();
        m.build_model().unwrap();
        assert_eq!(m.state(), BuildState::Built);
        let err = m.build_model().unwrap_err();
        assert!(err.to_string().contains("already built"));
    }

    #[test]
    fn register_after_build_fails() {
        let mut m = model();
        m.register("decay", Box::new(Decay)).unwrap();
        m.build_model().unwrap();
        assert_eq!(
            m.register("other", Box::new(Decay)),
            Err(ModelError::AlreadyBuilt)
        );
        assert_eq!(m.submodels().len(), 1);
    }

    #[test]
    fn failed_build_stays_unbuilt() {
        let mut m = model();
        m.register("decay", Box::new(Decay)).unwrap();
        m.register("needs", Box::new(Needs("Terminal voltage"))).unwrap();
        let err = m.build_model().unwrap_err();
        assert!(err.to_string().contains("Submodel"));
        assert!(!m.is_built());
        assert!(m.variables().is_empty());
        assert_eq!(m.submodels().keys().collect::<Vec<_>>(), vec!["decay", "needs"]);

        // Fixing the registry makes a retry succeed.
        m.register("needs", Box::new(Needs("c"))).unwrap();
        m.build_model().unwrap();
        assert_eq!(m.defined_by("c"), Some("decay"));
    }

    #[test]
    fn invalid_options_rejected_up_front() {
        let mut config = ConfigMap::new();
        config.insert("dimensionality".into(), OptionValue::Int(5));
        let err = BatteryModel::new(&config).unwrap_err();
        assert!(err
            .to_string()
            .contains("Dimension of current collectors must be 0, 1, or 2"));
    }

    #[test]
    fn discretised_equations_are_fully_resolved() {
        let mut m = model();
        m.register("decay", Box::new(Decay)).unwrap();
        m.build_model().unwrap();
        let (eqs, layout) = m.discretise_equations().unwrap();
        assert_eq!(layout.len(), 10);
        let rhs = eqs.rhs["c"];
        assert!(m.arena().is_discretised(rhs));
        assert_eq!(m.arena().display(rhs).to_string(), "-(1 * y[0:10])");
        assert!(matches!(
            m.arena().node(eqs.initial_conditions["c"]),
            Node::Scalar(v) if *v == 1.0
        ));
    }
}

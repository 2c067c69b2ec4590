//! Expression node variants and variable references.

use std::fmt;
use std::ops::Range;

use galvan_core::{AuxiliaryDomains, Domain, DomainSet, ExprId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A continuous variable: a name plus the domains it is defined over.
///
/// Two references are the same variable only if name, primary domain, and
/// auxiliary domains all match; this triple is also the key a
/// [`DomainLayout`](crate::DomainLayout) assigns state-vector slices by.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableRef {
    /// Human-readable variable name.
    pub name: String,
    /// Primary domain(s). Empty for a domain-free (scalar) variable.
    #[serde(default)]
    pub domain: DomainSet,
    /// Broadcast domains beyond the primary one.
    #[serde(default)]
    pub auxiliary: AuxiliaryDomains,
}

impl VariableRef {
    /// A variable with no domain.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: DomainSet::new(),
            auxiliary: AuxiliaryDomains::none(),
        }
    }

    /// Set the primary domain to a single domain.
    pub fn on(mut self, domain: Domain) -> Self {
        self.domain = smallvec::smallvec![domain];
        self
    }

    /// Set the primary domain to several adjacent domains.
    pub fn on_domains(mut self, domains: &[Domain]) -> Self {
        self.domain = SmallVec::from_slice(domains);
        self
    }

    /// Set the secondary auxiliary domain.
    pub fn with_secondary(mut self, domain: Domain) -> Self {
        self.auxiliary.secondary = smallvec::smallvec![domain];
        self
    }

    /// Set the tertiary auxiliary domain.
    pub fn with_tertiary(mut self, domain: Domain) -> Self {
        self.auxiliary.tertiary = smallvec::smallvec![domain];
        self
    }
}

impl fmt::Display for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `left + right`
    Add,
    /// `left - right`
    Subtract,
    /// `left * right`
    Multiply,
    /// `left / right`
    Divide,
    /// `left ^ right`
    Power,
}

impl BinaryOp {
    /// Infix symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "**",
        }
    }
}

/// Unary operators.
///
/// `Gradient` and `Divergence` are spatial operators; they are carried
/// through discretisation untouched and left to the spatial method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-child`
    Negate,
    /// `grad(child)`
    Gradient,
    /// `div(child)`
    Divergence,
    /// `x_average(child)`: mean over the through-cell direction.
    XAverage,
}

impl UnaryOp {
    /// Prefix rendering.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Gradient => "grad",
            Self::Divergence => "div",
            Self::XAverage => "x_average",
        }
    }
}

/// One node of an expression tree.
///
/// Children are referenced by [`ExprId`] into the owning
/// [`ExprArena`](crate::ExprArena). `Parameter` and `Variable` are symbolic;
/// `Scalar`, `StateVector`, and `Time` are resolved leaves.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A numeric constant.
    Scalar(f64),
    /// A named parameter awaiting substitution.
    Parameter(String),
    /// A continuous variable awaiting discretisation.
    Variable(VariableRef),
    /// A contiguous slice of the solver's state vector.
    StateVector(Range<usize>),
    /// Simulation time.
    Time,
    /// Unary operator application.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        child: ExprId,
    },
    /// Binary operator application.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: ExprId,
        /// Right operand.
        right: ExprId,
    },
}

impl Node {
    /// Child IDs in left-to-right order.
    pub fn children(&self) -> SmallVec<[ExprId; 2]> {
        match self {
            Self::Unary { child, .. } => smallvec::smallvec![*child],
            Self::Binary { left, right, .. } => smallvec::smallvec![*left, *right],
            _ => SmallVec::new(),
        }
    }

    /// Whether this node still needs parameter processing or discretisation.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Self::Parameter(_) | Self::Variable(_))
    }

    /// Short variant label, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "Scalar",
            Self::Parameter(_) => "Parameter",
            Self::Variable(_) => "Variable",
            Self::StateVector(_) => "StateVector",
            Self::Time => "Time",
            Self::Unary { .. } => "Unary",
            Self::Binary { .. } => "Binary",
        }
    }
}

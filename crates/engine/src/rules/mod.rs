//! Parameter rules and their outcomes.
//!
//! A [`Rule`] is bound to a [`MarkerKind`] in a [`RuleSet`]. Evaluating a
//! parameter applies, in marker order, the rule bound to each of its markers
//! and stops at the first failure. Markers without a bound rule are not
//! validation concerns and are skipped.

mod required;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use tracing::debug;

pub use self::required::Required;
use crate::descriptor::ParameterDescriptor;
use crate::marker::{Marker, MarkerKind};
use crate::value::Value;

/// Why a value failed a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReasonKind {
	/// The absence-of-value sentinel was supplied.
	NullValue,
	/// Text that is empty after trimming whitespace.
	BlankValue,
	/// Produced by an extension rule; completes the sentence
	/// `Parameter "x" ...`.
	Custom(Box<str>),
}

impl ReasonKind {
	pub fn custom(detail: impl Into<Box<str>>) -> Self {
		Self::Custom(detail.into())
	}
}

/// Checks a single argument against one marker.
///
/// Implemented for closures, so ad hoc rules can be registered inline.
pub trait Rule: Send + Sync {
	/// Returns the failure reason, or `Ok` when the value satisfies the marker.
	fn check(&self, marker: &Marker, value: &Value) -> Result<(), ReasonKind>;
}

impl<F> Rule for F
where
	F: Fn(&Marker, &Value) -> Result<(), ReasonKind> + Send + Sync,
{
	fn check(&self, marker: &Marker, value: &Value) -> Result<(), ReasonKind> {
		self(marker, value)
	}
}

/// A failed parameter, with everything needed to render a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
	parameter: Box<str>,
	index: usize,
	marker: MarkerKind,
	reason: ReasonKind,
	message: Option<Box<str>>,
}

impl Violation {
	/// Builds a violation, resolving the display name and message override
	/// from `marker`.
	pub fn new(param: &ParameterDescriptor, marker: &Marker, reason: ReasonKind) -> Self {
		Self {
			parameter: display_name(param, marker).into(),
			index: param.index(),
			marker: marker.kind(),
			reason,
			message: marker.message().map(Into::into),
		}
	}

	/// Resolved display name: the marker's override or the declared name.
	pub fn parameter(&self) -> &str {
		&self.parameter
	}

	/// Position of the failing parameter.
	pub const fn index(&self) -> usize {
		self.index
	}

	/// Kind of the marker whose rule failed.
	pub const fn marker(&self) -> MarkerKind {
		self.marker
	}

	pub const fn reason(&self) -> &ReasonKind {
		&self.reason
	}
}

impl fmt::Display for Violation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(message) = &self.message {
			return f.write_str(message);
		}
		match &self.reason {
			ReasonKind::NullValue => write!(f, "Parameter \"{}\" cannot be null.", self.parameter),
			ReasonKind::BlankValue => write!(f, "Parameter \"{}\" cannot be empty.", self.parameter),
			ReasonKind::Custom(detail) => write!(f, "Parameter \"{}\" {detail}.", self.parameter),
		}
	}
}

/// Non-empty list of violations, first by declaration order.
///
/// Fail-fast evaluation always yields exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations {
	first: Violation,
	rest: Vec<Violation>,
}

impl Violations {
	/// Returns `None` for an empty list.
	pub fn from_vec(violations: Vec<Violation>) -> Option<Self> {
		let mut iter = violations.into_iter();
		let first = iter.next()?;
		Some(Self {
			first,
			rest: iter.collect(),
		})
	}

	pub fn first(&self) -> &Violation {
		&self.first
	}

	pub fn iter(&self) -> impl Iterator<Item = &Violation> {
		std::iter::once(&self.first).chain(&self.rest)
	}

	pub fn count(&self) -> usize {
		1 + self.rest.len()
	}
}

impl From<Violation> for Violations {
	fn from(first: Violation) -> Self {
		Self { first, rest: Vec::new() }
	}
}

impl fmt::Display for Violations {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.first)?;
		for v in &self.rest {
			write!(f, " {v}")?;
		}
		Ok(())
	}
}

/// Result of evaluating one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
	Pass,
	Fail(Violation),
}

impl ValidationOutcome {
	pub const fn is_pass(&self) -> bool {
		matches!(self, Self::Pass)
	}
}

/// Resolves the name a failure message refers to.
pub fn display_name<'a>(param: &'a ParameterDescriptor, marker: &'a Marker) -> &'a str {
	marker.name_override().unwrap_or_else(|| param.name())
}

/// Rules keyed by the marker kind they interpret.
#[derive(Clone)]
pub struct RuleSet {
	rules: HashMap<MarkerKind, Arc<dyn Rule>>,
}

impl Default for RuleSet {
	fn default() -> Self {
		Self::builtin()
	}
}

impl fmt::Debug for RuleSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut kinds: Vec<_> = self.rules.keys().collect();
		kinds.sort();
		f.debug_struct("RuleSet").field("kinds", &kinds).finish()
	}
}

impl RuleSet {
	/// A rule set with no rules; every parameter passes.
	pub fn empty() -> Self {
		Self {
			rules: HashMap::default(),
		}
	}

	/// The built-in rules: [`MarkerKind::REQUIRED`] → [`Required`].
	pub fn builtin() -> Self {
		let mut set = Self::empty();
		set.register(MarkerKind::REQUIRED, Required);
		set
	}

	/// Binds `rule` to `kind`, returning the rule it replaced.
	pub fn register(&mut self, kind: MarkerKind, rule: impl Rule + 'static) -> Option<Arc<dyn Rule>> {
		self.rules.insert(kind, Arc::new(rule))
	}

	pub fn get(&self, kind: MarkerKind) -> Option<&dyn Rule> {
		self.rules.get(&kind).map(|r| &**r)
	}

	pub fn contains(&self, kind: MarkerKind) -> bool {
		self.rules.contains_key(&kind)
	}

	/// Evaluates `value` against every rule-bearing marker of `param`.
	pub fn evaluate(&self, param: &ParameterDescriptor, value: &Value) -> ValidationOutcome {
		for marker in param.markers() {
			let Some(rule) = self.rules.get(&marker.kind()) else {
				debug!(param = param.name(), marker = %marker.kind(), "no rule bound; skipping");
				continue;
			};
			if let Err(reason) = rule.check(marker, value) {
				return ValidationOutcome::Fail(Violation::new(param, marker, reason));
			}
		}
		ValidationOutcome::Pass
	}
}

//! The dispatch pipeline: resolve, check arity, run hooks, gate, invoke.
//!
//! # Invariants
//!
//! - Arity is checked before any hook or rule runs; a wrong argument count
//!   never reaches the target, whatever the argument values.
//! - Parameters are evaluated in declaration order. In
//!   [`ValidationMode::FailFast`] the first failure ends the dispatch.
//! - The target is invoked only when every parameter passed, with the
//!   original arguments in their original order.
//! - Hooks cannot block or fail a dispatch.

use std::sync::Arc;

use tracing::{debug, debug_span};

use crate::cache::DescriptorCache;
use crate::config::{DispatchConfig, ValidationMode};
use crate::descriptor::{MethodDescriptor, TargetDescriptor};
use crate::error::DispatchError;
use crate::hooks::{HookDef, HookTable};
use crate::introspect::{self, Introspect, TargetError};
use crate::marker::MarkerKind;
use crate::rules::{Rule, RuleSet, ValidationOutcome, Violations};
use crate::value::Value;

/// A method that ran. Its own outcome belongs to the target.
#[derive(Debug)]
pub struct Invoked {
	/// Name of the invoked method.
	pub method: Box<str>,
	/// Return value or failure of the method body, passed through untouched.
	pub output: Result<Value, TargetError>,
}

impl Invoked {
	pub fn into_output(self) -> Result<Value, TargetError> {
		self.output
	}
}

/// Dispatches method calls on any [`Introspect`] target.
///
/// Holds only read-only state plus the descriptor cache, so one dispatcher
/// can be shared across threads.
#[derive(Debug)]
pub struct Dispatcher {
	config: DispatchConfig,
	rules: RuleSet,
	hooks: HookTable,
	cache: DescriptorCache,
}

impl Default for Dispatcher {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl Dispatcher {
	/// A dispatcher with the built-in rules and hooks.
	pub fn new(config: DispatchConfig) -> Self {
		Self::builder().config(config).build()
	}

	pub fn builder() -> DispatcherBuilder {
		DispatcherBuilder::default()
	}

	pub fn config(&self) -> &DispatchConfig {
		&self.config
	}

	pub fn rules(&self) -> &RuleSet {
		&self.rules
	}

	pub fn hooks(&self) -> &HookTable {
		&self.hooks
	}

	/// Returns the (cached) descriptor of `T`.
	pub fn describe<T: Introspect>(&self) -> Arc<TargetDescriptor> {
		self.cache.get_or_describe::<T>()
	}

	/// Resolves `method` on `target` and invokes it if every argument passes.
	pub fn dispatch<T: Introspect>(
		&self,
		target: &mut T,
		method: &str,
		args: Vec<Value>,
	) -> Result<Invoked, DispatchError> {
		let descriptor = self.describe::<T>();
		let resolved = introspect::resolve_method(&descriptor, method, self.config.overloads).inspect_err(|err| {
			debug!(error = %err, "dispatch rejected");
		})?;
		self.dispatch_resolved(target, &descriptor, resolved, args)
	}

	/// Dispatches every parameterless method of `target` in declaration order.
	///
	/// Methods that take parameters are skipped. Stops at the first dispatch
	/// error; target failures do not stop the walk.
	pub fn dispatch_all<T: Introspect>(&self, target: &mut T) -> Result<Vec<Invoked>, DispatchError> {
		let descriptor = self.describe::<T>();
		let mut invoked = Vec::new();
		for method in descriptor.methods() {
			if method.arity() > 0 {
				debug!(method = method.name(), arity = method.arity(), "skipping method with parameters");
				continue;
			}
			invoked.push(self.dispatch_resolved(target, &descriptor, method, Vec::new())?);
		}
		Ok(invoked)
	}

	/// Runs the arity check and the parameter gate over `args` without
	/// invoking anything or running hooks.
	pub fn validate(&self, method: &MethodDescriptor, args: &[Value]) -> Result<(), DispatchError> {
		check_arity(method, args.len())?;
		self.gate(method, args).map_err(DispatchError::from)
	}

	fn gate(&self, method: &MethodDescriptor, args: &[Value]) -> Result<(), Violations> {
		let pairs = method.params().iter().zip(args);
		match self.config.validation {
			ValidationMode::FailFast => {
				for (param, value) in pairs {
					if let ValidationOutcome::Fail(violation) = self.rules.evaluate(param, value) {
						return Err(violation.into());
					}
				}
				Ok(())
			}
			ValidationMode::CollectAll => {
				let failed = pairs
					.filter_map(|(param, value)| match self.rules.evaluate(param, value) {
						ValidationOutcome::Fail(violation) => Some(violation),
						ValidationOutcome::Pass => None,
					})
					.collect();
				Violations::from_vec(failed).map_or(Ok(()), Err)
			}
		}
	}

	fn dispatch_resolved<T: Introspect>(
		&self,
		target: &mut T,
		descriptor: &TargetDescriptor,
		method: &MethodDescriptor,
		args: Vec<Value>,
	) -> Result<Invoked, DispatchError> {
		let _span = debug_span!("dispatch", target_type = descriptor.type_name(), method = method.name()).entered();

		check_arity(method, args.len()).inspect_err(|err| {
			debug!(error = %err, "dispatch rejected");
		})?;

		if self.config.hooks {
			let ran = self.hooks.run(descriptor.type_name(), method);
			if ran > 0 {
				debug!(hooks = ran, "pre-invocation hooks ran");
			}
		}

		if let Err(violations) = self.gate(method, &args) {
			debug!(
				violations = violations.count(),
				first = %violations.first(),
				"validation failed"
			);
			return Err(violations.into());
		}

		debug!(args = args.len(), "invoking");
		let output = target.invoke(method, args);
		if let Err(err) = &output {
			debug!(error = %err, "target method failed");
		}

		Ok(Invoked {
			method: method.name().into(),
			output,
		})
	}
}

/// Argument count must equal parameter count; there is no named matching.
fn check_arity(method: &MethodDescriptor, actual: usize) -> Result<(), DispatchError> {
	if actual == method.arity() {
		return Ok(());
	}
	Err(DispatchError::ArityMismatch {
		method: method.name().into(),
		expected: method.arity(),
		actual,
	})
}

/// Assembles a [`Dispatcher`]; starts from the built-in rules and hooks.
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
	config: DispatchConfig,
	rules: RuleSet,
	hooks: HookTable,
}

impl DispatcherBuilder {
	pub fn config(mut self, config: DispatchConfig) -> Self {
		self.config = config;
		self
	}

	/// Binds (or rebinds) a rule to a marker kind.
	pub fn rule(mut self, kind: MarkerKind, rule: impl Rule + 'static) -> Self {
		self.rules.register(kind, rule);
		self
	}

	/// Replaces the whole rule set.
	pub fn rules(mut self, rules: RuleSet) -> Self {
		self.rules = rules;
		self
	}

	pub fn hook(mut self, def: HookDef) -> Self {
		self.hooks.register(def);
		self
	}

	/// Replaces the whole hook table.
	pub fn hooks(mut self, hooks: HookTable) -> Self {
		self.hooks = hooks;
		self
	}

	pub fn build(self) -> Dispatcher {
		Dispatcher {
			config: self.config,
			rules: self.rules,
			hooks: self.hooks,
			cache: DescriptorCache::new(),
		}
	}
}

//! The boundary between the engine and the types it dispatches into.
//!
//! A target implements [`Introspect`]: it declares its methods once, and
//! executes a resolved method when asked. Resolution itself is a pure read
//! over the declared [`TargetDescriptor`].

use serde::{Deserialize, Serialize};

use crate::descriptor::{MethodDescriptor, ParameterDescriptor, TargetDescriptor};
use crate::value::Value;

/// Failure raised by a target method body. Opaque to the engine.
pub type TargetError = anyhow::Error;

/// A type whose methods can be dispatched by name.
pub trait Introspect: 'static {
	/// Declares the methods, parameters and markers of this type.
	///
	/// Called at most once per type per [`crate::DescriptorCache`]; the result
	/// must not depend on instance state.
	fn describe() -> TargetDescriptor
	where
		Self: Sized;

	/// Runs the method body.
	///
	/// `args` has already been checked against `method`'s arity and markers.
	/// Implementations that declare overloads should match on
	/// [`MethodDescriptor::index`] rather than on the name.
	fn invoke(&mut self, method: &MethodDescriptor, args: Vec<Value>) -> Result<Value, TargetError>;
}

/// How to resolve a name shared by several declared methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverloadPolicy {
	/// Fail with [`ResolveError::Ambiguous`].
	#[default]
	Reject,
	/// Take the first method in declaration order.
	FirstDeclared,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("method not found: {type_name}::{method}")]
	NotFound { type_name: Box<str>, method: Box<str> },

	#[error("method {type_name}::{method} is ambiguous: {candidates} declarations share this name")]
	Ambiguous {
		type_name: Box<str>,
		method: Box<str>,
		candidates: usize,
	},
}

/// Looks up `name` among the target's declared methods.
pub fn resolve_method<'a>(
	target: &'a TargetDescriptor,
	name: &str,
	policy: OverloadPolicy,
) -> Result<&'a MethodDescriptor, ResolveError> {
	let mut candidates = target.overloads(name);
	let Some(first) = candidates.next() else {
		return Err(ResolveError::NotFound {
			type_name: target.type_name().into(),
			method: name.into(),
		});
	};

	if policy == OverloadPolicy::Reject {
		let extra = candidates.count();
		if extra > 0 {
			return Err(ResolveError::Ambiguous {
				type_name: target.type_name().into(),
				method: name.into(),
				candidates: extra + 1,
			});
		}
	}

	Ok(first)
}

/// Parameters of a resolved method, in declaration order.
pub fn describe_parameters(method: &MethodDescriptor) -> &[ParameterDescriptor] {
	method.params()
}

#[cfg(test)]
mod tests;

//! Marker-driven method dispatch.
//!
//! A target type declares its methods, their positional parameters and the
//! [`Marker`]s attached to either. The [`Dispatcher`] resolves a method by
//! name, runs the hooks bound to the method's markers, gates the call behind
//! the rules bound to each parameter's markers, and only then invokes the
//! target.
//!
//! # Pipeline
//!
//! | Stage | Component | Failure |
//! |-------|-----------|---------|
//! | resolve | [`introspect::resolve_method`] | [`DispatchError::NotFound`], [`DispatchError::Ambiguous`] |
//! | arity | [`Dispatcher`] | [`DispatchError::ArityMismatch`] |
//! | pre-hooks | [`HookTable`] | never fails |
//! | parameter gate | [`RuleSet`] | [`DispatchError::ValidationFailed`] |
//! | invoke | [`Introspect::invoke`] | carried in [`Invoked::output`] |
//!
//! ```ignore
//! let dispatcher = Dispatcher::default();
//! let mut users = UserService::default();
//! dispatcher.dispatch(&mut users, "createUser", vec!["Jane".into(), "".into()])?;
//! ```

pub mod cache;
pub mod config;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod hooks;
pub mod introspect;
pub mod marker;
pub mod rules;
pub mod value;

#[cfg(test)]
mod test_log;

pub use cache::DescriptorCache;
pub use config::{ConfigError, DispatchConfig, ValidationMode};
pub use descriptor::{MethodDescriptor, ParameterDescriptor, TargetDescriptor};
pub use dispatch::{Dispatcher, DispatcherBuilder, Invoked};
pub use error::DispatchError;
pub use hooks::{HookContext, HookDef, HookHandler, HookTable};
pub use introspect::{Introspect, OverloadPolicy, ResolveError, TargetError};
pub use marker::{Marker, MarkerKind};
pub use rules::{ReasonKind, Rule, RuleSet, ValidationOutcome, Violation, Violations};
pub use value::Value;

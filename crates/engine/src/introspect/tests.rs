use pretty_assertions::assert_eq;

use super::*;
use crate::marker::{Marker, MarkerKind};

fn mailer() -> TargetDescriptor {
	TargetDescriptor::new("Mailer")
		.method(MethodDescriptor::new("send").param("to", [Marker::required()]))
		.method(
			MethodDescriptor::new("send")
				.param("to", [Marker::required()])
				.param("cc", []),
		)
		.method(MethodDescriptor::new("flush"))
}

#[test]
fn resolves_unique_name() {
	let target = mailer();
	let method = resolve_method(&target, "flush", OverloadPolicy::Reject).unwrap();
	assert_eq!(method.index(), 2);
	assert!(describe_parameters(method).is_empty());
}

#[test]
fn missing_method_is_not_found() {
	let target = mailer();
	let err = resolve_method(&target, "Flush", OverloadPolicy::FirstDeclared).unwrap_err();
	assert_eq!(
		err,
		ResolveError::NotFound {
			type_name: "Mailer".into(),
			method: "Flush".into(),
		}
	);
	assert_eq!(err.to_string(), "method not found: Mailer::Flush");
}

#[test]
fn overloads_rejected_by_default() {
	let target = mailer();
	let err = resolve_method(&target, "send", OverloadPolicy::default()).unwrap_err();
	assert_eq!(
		err,
		ResolveError::Ambiguous {
			type_name: "Mailer".into(),
			method: "send".into(),
			candidates: 2,
		}
	);
}

#[test]
fn first_declared_picks_earliest_overload() {
	let target = mailer();
	let method = resolve_method(&target, "send", OverloadPolicy::FirstDeclared).unwrap();
	assert_eq!(method.index(), 0);

	let params = describe_parameters(method);
	assert_eq!(params.len(), 1);
	assert_eq!(params[0].name(), "to");
	assert!(params[0].has_marker(MarkerKind::REQUIRED));
}

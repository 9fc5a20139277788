//! Demo targets and the scripted scenarios run by `vigil scenarios`.

use anyhow::{Context, anyhow, bail};
use tracing::info;
use vigil_engine::{
	DispatchError, Dispatcher, Introspect, Invoked, Marker, MethodDescriptor, TargetDescriptor,
	TargetError, Value,
};

/// A user service whose `name` parameter reports itself as `username`.
#[derive(Debug, Default)]
pub struct UserService {
	pub users: Vec<(String, String)>,
}

impl Introspect for UserService {
	fn describe() -> TargetDescriptor {
		TargetDescriptor::new("UserService").method(
			MethodDescriptor::new("createUser")
				.param("name", [Marker::required().named("username")])
				.param("email", [Marker::required()]),
		)
	}

	fn invoke(&mut self, method: &MethodDescriptor, args: Vec<Value>) -> Result<Value, TargetError> {
		match method.name() {
			"createUser" => create_user(&mut self.users, args),
			other => bail!("UserService has no body for {other}"),
		}
	}
}

/// The same service without a display-name override.
#[derive(Debug, Default)]
pub struct PlainUserService {
	pub users: Vec<(String, String)>,
}

impl Introspect for PlainUserService {
	fn describe() -> TargetDescriptor {
		TargetDescriptor::new("PlainUserService").method(
			MethodDescriptor::new("createUser")
				.param("name", [Marker::required()])
				.param("email", [Marker::required()]),
		)
	}

	fn invoke(&mut self, method: &MethodDescriptor, args: Vec<Value>) -> Result<Value, TargetError> {
		match method.name() {
			"createUser" => create_user(&mut self.users, args),
			other => bail!("PlainUserService has no body for {other}"),
		}
	}
}

fn create_user(users: &mut Vec<(String, String)>, args: Vec<Value>) -> Result<Value, TargetError> {
	let [name, email] =
		<[Value; 2]>::try_from(args).map_err(|args| anyhow!("createUser takes 2 arguments, got {}", args.len()))?;
	let name = text_arg(&name).context("name")?;
	let email = text_arg(&email).context("email")?;

	info!(name, email, "Executing create user logic");
	users.push((name.to_owned(), email.to_owned()));
	Ok(Value::text(format!("created user {name} <{email}>")))
}

fn text_arg(value: &Value) -> anyhow::Result<&str> {
	value
		.as_text()
		.ok_or_else(|| anyhow!("expected text, got {}", value.type_name()))
}

/// Two parameterless methods, one of which carries the `announce` marker.
#[derive(Debug, Default)]
pub struct Showcase;

impl Introspect for Showcase {
	fn describe() -> TargetDescriptor {
		TargetDescriptor::new("Showcase")
			.method(MethodDescriptor::new("annotatedMethod").marked(Marker::announce()))
			.method(MethodDescriptor::new("nonAnnotatedMethod"))
	}

	fn invoke(&mut self, method: &MethodDescriptor, _: Vec<Value>) -> Result<Value, TargetError> {
		Ok(Value::text(format!("Executing {}..", method.name())))
	}
}

/// Renders one dispatch result as a single line, flagged with whether it succeeded.
pub fn report(result: Result<Invoked, DispatchError>) -> (bool, String) {
	match result {
		Ok(invoked) => match invoked.output {
			Ok(Value::Text(text)) => (true, text),
			Ok(Value::Null) => (true, format!("{} returned", invoked.method)),
			Ok(value) => (true, value.to_string()),
			Err(err) => (false, format!("{} failed: {err:#}", invoked.method)),
		},
		Err(err @ DispatchError::ValidationFailed(_)) => (false, format!("Validation failed: {err}")),
		Err(err) => (false, format!("Invalid call: {err}")),
	}
}

/// Runs the scripted scenarios and returns the lines they print.
pub fn scenarios(dispatcher: &Dispatcher) -> Vec<String> {
	let mut lines = vec!["[process]".to_owned()];
	lines.extend(process(dispatcher).1);

	lines.push("[declared names]".to_owned());
	let mut plain = PlainUserService::default();
	for args in invalid_calls() {
		lines.push(report(dispatcher.dispatch(&mut plain, "createUser", args)).1);
	}

	lines.push("[name overrides]".to_owned());
	let mut named = UserService::default();
	for args in invalid_calls() {
		lines.push(report(dispatcher.dispatch(&mut named, "createUser", args)).1);
	}

	lines.push("[valid call]".to_owned());
	let args = vec![Value::text("Jane"), Value::text("hello@email.com")];
	lines.push(report(dispatcher.dispatch(&mut named, "createUser", args)).1);

	lines
}

fn invalid_calls() -> [Vec<Value>; 2] {
	[
		vec![Value::Null, Value::text("hello@email.com")],
		vec![Value::text("Jane"), Value::text("")],
	]
}

/// Dispatches every parameterless method of [`Showcase`].
pub fn process(dispatcher: &Dispatcher) -> (bool, Vec<String>) {
	match dispatcher.dispatch_all(&mut Showcase) {
		Ok(invoked) => {
			let mut all_ok = true;
			let mut lines = Vec::with_capacity(invoked.len());
			for i in invoked {
				let (ok, line) = report(Ok(i));
				all_ok &= ok;
				lines.push(line);
			}
			(all_ok, lines)
		}
		Err(err) => {
			let (_, line) = report(Err(err));
			(false, vec![line])
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use vigil_engine::{DispatchConfig, ValidationMode};

	use super::*;

	#[test]
	fn scenarios_print_expected_lines() {
		let lines = scenarios(&Dispatcher::default());
		assert_eq!(
			lines,
			vec![
				"[process]",
				"Executing annotatedMethod..",
				"Executing nonAnnotatedMethod..",
				"[declared names]",
				"Validation failed: Parameter \"name\" cannot be null.",
				"Validation failed: Parameter \"email\" cannot be empty.",
				"[name overrides]",
				"Validation failed: Parameter \"username\" cannot be null.",
				"Validation failed: Parameter \"email\" cannot be empty.",
				"[valid call]",
				"created user Jane <hello@email.com>",
			]
		);
	}

	#[test]
	fn non_text_argument_fails_inside_target() {
		let dispatcher = Dispatcher::default();
		let mut service = UserService::default();
		let (ok, line) = report(dispatcher.dispatch(&mut service, "createUser", vec![Value::Int(7), Value::text("a@b.c")]));

		assert!(!ok);
		assert_eq!(line, "createUser failed: name: expected text, got int");
		assert!(service.users.is_empty());
	}

	#[test]
	fn collect_all_reports_every_parameter() {
		let dispatcher = Dispatcher::new(DispatchConfig {
			validation: ValidationMode::CollectAll,
			..DispatchConfig::default()
		});
		let mut service = UserService::default();
		let (ok, line) = report(dispatcher.dispatch(&mut service, "createUser", vec![Value::Null, Value::text(" ")]));

		assert!(!ok);
		assert_eq!(
			line,
			"Validation failed: Parameter \"username\" cannot be null. Parameter \"email\" cannot be empty."
		);
	}

	#[test]
	fn unknown_method_is_reported() {
		let (ok, line) = report(Dispatcher::default().dispatch(&mut UserService::default(), "deleteUser", Vec::new()));
		assert!(!ok);
		assert_eq!(line, "Invalid call: method not found: UserService::deleteUser");
	}

	#[test]
	fn wrong_argument_count_is_a_caller_error() {
		let (ok, line) = report(Dispatcher::default().dispatch(&mut UserService::default(), "createUser", vec![Value::text("Jane")]));
		assert!(!ok);
		assert_eq!(line, "Invalid call: createUser expects 2 argument(s), got 1");
	}

	#[test]
	fn process_walks_showcase() {
		let (ok, lines) = process(&Dispatcher::default());
		assert!(ok);
		assert_eq!(lines, vec!["Executing annotatedMethod..", "Executing nonAnnotatedMethod.."]);
	}
}

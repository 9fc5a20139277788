//! Declarative markers attached to methods and parameters.
//!
//! Markers are data. Rules interpret parameter markers, hooks react to method
//! markers; the marker itself never runs anything.

use std::fmt;

use crate::value::Value;

/// Identifies what a marker means. Open set: extension rules and hooks
/// introduce their own kinds with [`MarkerKind::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKind(&'static str);

impl MarkerKind {
	/// Parameter must be present and, if textual, non-blank.
	pub const REQUIRED: Self = Self("required");
	/// Method announces itself through the built-in hook before running.
	pub const ANNOUNCE: Self = Self("announce");

	pub const fn new(name: &'static str) -> Self {
		Self(name)
	}

	pub const fn as_str(self) -> &'static str {
		self.0
	}
}

impl fmt::Display for MarkerKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// A marker instance with its optional configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
	kind: MarkerKind,
	/// Display-name override used in failure messages.
	name: Option<Box<str>>,
	/// Replaces the whole failure message.
	message: Option<Box<str>>,
	/// Free-form configuration for extension rules, in declaration order.
	args: Vec<(Box<str>, Value)>,
}

impl Marker {
	pub fn new(kind: MarkerKind) -> Self {
		Self {
			kind,
			name: None,
			message: None,
			args: Vec::new(),
		}
	}

	/// Shorthand for a [`MarkerKind::REQUIRED`] marker.
	pub fn required() -> Self {
		Self::new(MarkerKind::REQUIRED)
	}

	/// Shorthand for a [`MarkerKind::ANNOUNCE`] marker.
	pub fn announce() -> Self {
		Self::new(MarkerKind::ANNOUNCE)
	}

	/// Overrides the parameter's display name in failure messages.
	pub fn named(mut self, name: impl Into<Box<str>>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Overrides the failure message entirely.
	pub fn with_message(mut self, message: impl Into<Box<str>>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// Attaches a configuration value. A repeated key replaces the earlier value.
	pub fn with_arg(mut self, key: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
		let key = key.into();
		let value = value.into();
		match self.args.iter().position(|(k, _)| *k == key) {
			Some(i) => self.args[i].1 = value,
			None => self.args.push((key, value)),
		}
		self
	}

	pub const fn kind(&self) -> MarkerKind {
		self.kind
	}

	/// Returns the display-name override, ignoring blank overrides.
	pub fn name_override(&self) -> Option<&str> {
		non_blank(self.name.as_deref())
	}

	/// Returns the message override, ignoring blank overrides.
	pub fn message(&self) -> Option<&str> {
		non_blank(self.message.as_deref())
	}

	pub fn arg(&self, key: &str) -> Option<&Value> {
		self.args.iter().find(|(k, _)| &**k == key).map(|(_, v)| v)
	}

	pub fn args(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.args.iter().map(|(k, v)| (&**k, v))
	}
}

fn non_blank(s: Option<&str>) -> Option<&str> {
	s.filter(|s| !s.trim().is_empty())
}

/// Renders as `kind` or `kind(name = "...", key = value)`.
impl fmt::Display for Marker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.kind.as_str())?;

		let mut parts = Vec::new();
		if let Some(name) = &self.name {
			parts.push(format!("name = {name:?}"));
		}
		if let Some(message) = &self.message {
			parts.push(format!("message = {message:?}"));
		}
		for (key, value) in &self.args {
			parts.push(format!("{key} = {value}"));
		}

		if !parts.is_empty() {
			write!(f, "({})", parts.join(", "))?;
		}
		Ok(())
	}
}

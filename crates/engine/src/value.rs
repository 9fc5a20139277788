//! Dynamic values carried through dispatch as arguments and return values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A positional argument or a target method's return value.
///
/// [`Value::Null`] is the absence-of-value sentinel rejected by the
/// `required` rule. The serde representation is untagged so adapters can
/// decode plain JSON arrays straight into an argument list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// No value supplied.
	#[default]
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Text(String),
	List(Vec<Value>),
}

impl Value {
	/// Creates a text value.
	pub fn text(s: impl Into<String>) -> Self {
		Self::Text(s.into())
	}

	pub const fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the string slice if this is a text value.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	pub const fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Short type label used in diagnostics.
	pub const fn type_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Text(_) => "text",
			Self::List(_) => "list",
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(b) => write!(f, "{b}"),
			Self::Int(i) => write!(f, "{i}"),
			Self::Float(x) => write!(f, "{x}"),
			Self::Text(s) => write!(f, "{s:?}"),
			Self::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::Text(s.to_owned())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::Text(s)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Self::Int(i)
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Self::Float(x)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(opt: Option<T>) -> Self {
		opt.map_or(Self::Null, Into::into)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(items: Vec<T>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}
}

use super::{ReasonKind, Rule};
use crate::marker::Marker;
use crate::value::Value;

/// Rejects [`Value::Null`] and blank text.
///
/// Non-text values are never blank, so an empty list or `0` passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
	fn check(&self, _marker: &Marker, value: &Value) -> Result<(), ReasonKind> {
		match value {
			Value::Null => Err(ReasonKind::NullValue),
			Value::Text(s) if s.trim().is_empty() => Err(ReasonKind::BlankValue),
			_ => Ok(()),
		}
	}
}

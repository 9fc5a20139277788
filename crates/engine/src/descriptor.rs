//! Read-only metadata views of a target type, its methods and parameters.
//!
//! Descriptors are declared explicitly by the target (see
//! [`crate::Introspect::describe`]) and never mutated after construction.
//! Indices are assigned in declaration order by the builders below.

use std::fmt;

use rustc_hash::FxHashMap as HashMap;

use crate::marker::{Marker, MarkerKind};

/// One positional parameter of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
	index: usize,
	name: Box<str>,
	markers: Vec<Marker>,
}

impl ParameterDescriptor {
	/// Zero-based position in the method's parameter list.
	pub const fn index(&self) -> usize {
		self.index
	}

	/// Declared identifier, the default display name.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn markers(&self) -> &[Marker] {
		&self.markers
	}

	/// Returns the first marker of the given kind.
	pub fn marker(&self, kind: MarkerKind) -> Option<&Marker> {
		self.markers.iter().find(|m| m.kind() == kind)
	}

	pub fn has_marker(&self, kind: MarkerKind) -> bool {
		self.marker(kind).is_some()
	}
}

impl fmt::Display for ParameterDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for marker in &self.markers {
			write!(f, "#[{marker}] ")?;
		}
		f.write_str(&self.name)
	}
}

/// A method exposed by a target type.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
	index: usize,
	name: Box<str>,
	params: Vec<ParameterDescriptor>,
	markers: Vec<Marker>,
}

impl MethodDescriptor {
	/// Starts a method declaration. The declaration index is assigned when
	/// the method is added to a [`TargetDescriptor`].
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			index: 0,
			name: name.into(),
			params: Vec::new(),
			markers: Vec::new(),
		}
	}

	/// Appends a parameter with its markers.
	pub fn param(mut self, name: impl Into<Box<str>>, markers: impl IntoIterator<Item = Marker>) -> Self {
		self.params.push(ParameterDescriptor {
			index: self.params.len(),
			name: name.into(),
			markers: markers.into_iter().collect(),
		});
		self
	}

	/// Attaches a method-level marker.
	pub fn marked(mut self, marker: Marker) -> Self {
		self.markers.push(marker);
		self
	}

	/// Position of this method in the target's declaration order.
	pub const fn index(&self) -> usize {
		self.index
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn params(&self) -> &[ParameterDescriptor] {
		&self.params
	}

	/// Number of positional parameters.
	pub fn arity(&self) -> usize {
		self.params.len()
	}

	pub fn markers(&self) -> &[Marker] {
		&self.markers
	}

	pub fn has_marker(&self, kind: MarkerKind) -> bool {
		self.markers.iter().any(|m| m.kind() == kind)
	}
}

/// Renders the method as a signature, e.g. `createUser(#[required] name, email)`.
impl fmt::Display for MethodDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for marker in &self.markers {
			write!(f, "#[{marker}] ")?;
		}
		write!(f, "{}(", self.name)?;
		for (i, param) in self.params.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{param}")?;
		}
		f.write_str(")")
	}
}

/// The declared surface of a target type.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDescriptor {
	type_name: Box<str>,
	methods: Vec<MethodDescriptor>,
	/// Method name to declaration indices, in declaration order.
	by_name: HashMap<Box<str>, Vec<usize>>,
}

impl TargetDescriptor {
	pub fn new(type_name: impl Into<Box<str>>) -> Self {
		Self {
			type_name: type_name.into(),
			methods: Vec::new(),
			by_name: HashMap::default(),
		}
	}

	/// Appends a method. Methods sharing a name are kept as overloads.
	pub fn method(mut self, mut method: MethodDescriptor) -> Self {
		method.index = self.methods.len();
		self.by_name.entry(method.name.clone()).or_default().push(method.index);
		self.methods.push(method);
		self
	}

	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// All methods in declaration order.
	pub fn methods(&self) -> &[MethodDescriptor] {
		&self.methods
	}

	pub fn get(&self, index: usize) -> Option<&MethodDescriptor> {
		self.methods.get(index)
	}

	/// Every method declared under `name`, in declaration order.
	pub fn overloads<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a MethodDescriptor> + 'a {
		self.by_name
			.get(name)
			.map_or(&[][..], Vec::as_slice)
			.iter()
			.map(|&i| &self.methods[i])
	}
}

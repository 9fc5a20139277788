//! Pre-invocation hooks bound to method markers.
//!
//! Hooks are advisory: a handler observes the call it precedes and returns
//! nothing, so it can never veto or fail a dispatch. For each method-level
//! marker, hooks bound to that marker kind run in priority order (lower
//! first); hooks with equal priority run in registration order.

mod builtins;

use rustc_hash::FxHashMap as HashMap;
use tracing::trace;

pub use self::builtins::ANNOUNCE;
use crate::descriptor::MethodDescriptor;
use crate::marker::{Marker, MarkerKind};

/// Read-only view of the call a hook precedes.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
	/// Declared name of the target type.
	pub type_name: &'a str,
	/// The resolved method about to run.
	pub method: &'a MethodDescriptor,
	/// The method-level marker that triggered this hook.
	pub marker: &'a Marker,
}

/// Handler function for a hook.
pub type HookHandler = fn(&HookContext<'_>);

/// A hook bound to a marker kind.
#[derive(Clone, Copy)]
pub struct HookDef {
	/// Hook name, used in traces.
	pub name: &'static str,
	/// Marker kind that triggers this hook.
	pub marker: MarkerKind,
	/// Execution priority (lower runs first).
	pub priority: i16,
	pub description: &'static str,
	pub handler: HookHandler,
}

impl std::fmt::Debug for HookDef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HookDef")
			.field("name", &self.name)
			.field("marker", &self.marker)
			.field("priority", &self.priority)
			.finish_non_exhaustive()
	}
}

/// Hooks grouped by the marker kind that triggers them.
#[derive(Debug, Clone)]
pub struct HookTable {
	by_marker: HashMap<MarkerKind, Vec<HookDef>>,
}

impl Default for HookTable {
	fn default() -> Self {
		Self::builtin()
	}
}

impl HookTable {
	pub fn empty() -> Self {
		Self {
			by_marker: HashMap::default(),
		}
	}

	/// The built-in hooks: [`ANNOUNCE`].
	pub fn builtin() -> Self {
		let mut table = Self::empty();
		table.register(ANNOUNCE);
		table
	}

	/// Adds a hook, keeping each marker's list sorted by priority.
	pub fn register(&mut self, def: HookDef) {
		let hooks = self.by_marker.entry(def.marker).or_default();
		let pos = hooks.partition_point(|h| h.priority <= def.priority);
		hooks.insert(pos, def);
	}

	/// Hooks bound to `kind`, in execution order.
	pub fn for_marker(&self, kind: MarkerKind) -> &[HookDef] {
		self.by_marker.get(&kind).map_or(&[], Vec::as_slice)
	}

	/// Total number of registered hooks.
	pub fn len(&self) -> usize {
		self.by_marker.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.by_marker.values().all(Vec::is_empty)
	}

	/// Runs every hook triggered by `method`'s markers. Returns how many ran.
	pub fn run(&self, type_name: &str, method: &MethodDescriptor) -> usize {
		let mut ran = 0;
		for marker in method.markers() {
			let ctx = HookContext {
				type_name,
				method,
				marker,
			};
			for hook in self.for_marker(marker.kind()) {
				trace!(hook = hook.name, method = method.name(), "running hook");
				(hook.handler)(&ctx);
				ran += 1;
			}
		}
		ran
	}
}

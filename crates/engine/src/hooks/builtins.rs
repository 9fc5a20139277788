//! Built-in hook implementations.

use tracing::info;

use super::{HookContext, HookDef};
use crate::marker::MarkerKind;

/// Logs the intent to run a method carrying the `announce` marker.
pub const ANNOUNCE: HookDef = HookDef {
	name: "announce",
	marker: MarkerKind::ANNOUNCE,
	priority: 0,
	description: "Log before executing the marked method",
	handler: announce,
};

fn announce(ctx: &HookContext<'_>) {
	info!(
		target_type = ctx.type_name,
		method = ctx.method.name(),
		"executing {} hook before method {}",
		ctx.marker.kind(),
		ctx.method.name()
	);
}

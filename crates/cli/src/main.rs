//! `vigil`: runs method calls through the vigil dispatch engine.

mod demo;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use vigil_engine::{DispatchConfig, Dispatcher, HookTable, TargetDescriptor, Value};

use crate::demo::{Showcase, UserService};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "vigil")]
#[command(about = "Marker-driven method dispatch with parameter validation")]
struct Args {
	/// Verbose logging
	#[arg(short, long, global = true)]
	verbose: bool,

	/// Dispatch configuration (TOML)
	#[arg(short, long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Replay the scripted demonstrations
	Scenarios,
	/// Dispatch a method on the demo user service
	Call {
		/// Method name, e.g. createUser
		method: String,
		/// Positional arguments as a JSON array
		#[arg(default_value = "[]", value_name = "JSON_ARGS")]
		args: String,
	},
	/// Print the declared methods of the demo targets
	Describe,
	/// Dispatch every parameterless method of the showcase target
	Process,
}

/// What a subcommand prints, and whether it succeeded.
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
	success: bool,
	lines: Vec<String>,
}

impl Outcome {
	fn new(success: bool, lines: Vec<String>) -> Self {
		Self { success, lines }
	}

	fn exit_code(&self) -> ExitCode {
		if self.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
	}
}

fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let dispatcher = Dispatcher::new(load_config(args.config.as_deref())?);
	let outcome = run(args.command, &dispatcher)?;
	for line in &outcome.lines {
		println!("{line}");
	}

	Ok(outcome.exit_code())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DispatchConfig> {
	let config = match path {
		Some(path) => DispatchConfig::load(path)?,
		None => DispatchConfig::default(),
	};
	debug!(?config, "dispatch configuration");
	Ok(config)
}

fn run(command: Command, dispatcher: &Dispatcher) -> anyhow::Result<Outcome> {
	Ok(match command {
		Command::Scenarios => Outcome::new(true, demo::scenarios(dispatcher)),
		Command::Call { method, args } => call(dispatcher, &method, &args)?,
		Command::Describe => Outcome::new(true, describe(dispatcher)),
		Command::Process => {
			let (success, lines) = demo::process(dispatcher);
			Outcome::new(success, lines)
		}
	})
}

/// Dispatches `method` on a fresh [`UserService`] with JSON-encoded arguments.
fn call(dispatcher: &Dispatcher, method: &str, json_args: &str) -> anyhow::Result<Outcome> {
	let args: Vec<Value> = serde_json::from_str(json_args).context("JSON_ARGS must be a JSON array of values")?;
	info!(method, args = args.len(), "dispatching");

	let mut service = UserService::default();
	let (success, line) = demo::report(dispatcher.dispatch(&mut service, method, args));
	Ok(Outcome::new(success, vec![line]))
}

fn describe(dispatcher: &Dispatcher) -> Vec<String> {
	let hooks = dispatcher.config().hooks.then(|| dispatcher.hooks());
	let mut lines = Vec::new();
	describe_target(&mut lines, &dispatcher.describe::<UserService>(), hooks);
	describe_target(&mut lines, &dispatcher.describe::<Showcase>(), hooks);
	lines
}

fn describe_target(lines: &mut Vec<String>, target: &TargetDescriptor, hooks: Option<&HookTable>) {
	lines.push(target.type_name().to_owned());
	for method in target.methods() {
		lines.push(format!("  {method}"));
		let Some(hooks) = hooks else { continue };
		for marker in method.markers() {
			for hook in hooks.for_marker(marker.kind()) {
				lines.push(format!("    hook {}: {}", hook.name, hook.description));
			}
		}
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("vigil_cli=debug,vigil_engine=debug,info")
		} else {
			EnvFilter::new("vigil_cli=info,vigil_engine=info,warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.init();
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

mod cli_commands;

use std::io::stdout;

use clap::builder::styling::Styles;
use clap::{Args, CommandFactory, Parser, crate_description, crate_version};
use clap_complete::{Shell, generate};
use color_eyre::config::HookBuilder;
use color_eyre::eyre::{EyreHandler, InstallError, Result};
use owo_colors::OwoColorize;

use crate::cli_commands::ToplevelCommands;

#[derive(Parser)]
#[command(
	version,
	about = format!("{} v{}", crate_description!(), crate_version!()),
	styles(style()),
	disable_colored_help(false),
	arg_required_else_help(true)
)]
struct CliArguments
{
	#[command(subcommand)]
	pub subcommand: ToplevelCommands,
}

#[derive(Args)]
struct CompletionArguments
{
	shell: Shell,
}

type EyreHookFunc = Box<dyn Fn(&(dyn std::error::Error + 'static)) -> Box<dyn EyreHandler> + Send + Sync + 'static>;
type PanicHookFunc = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Send + Sync + 'static>;

struct AxirtHook
{
	inner_hook: EyreHookFunc,
}

struct AxirtPanic
{
	inner_hook: PanicHookFunc,
}

struct AxirtHandler
{
	inner_handler: Box<dyn EyreHandler>,
}

impl AxirtHook
{
	fn build_handler(&self, error: &(dyn std::error::Error + 'static)) -> AxirtHandler
	{
		AxirtHandler {
			inner_handler: (*self.inner_hook)(error),
		}
	}

	pub fn install(self) -> Result<(), InstallError>
	{
		color_eyre::eyre::set_hook(self.into_eyre_hook())
	}

	pub fn into_eyre_hook(self) -> EyreHookFunc
	{
		Box::new(move |err| Box::new(self.build_handler(err)))
	}
}

impl AxirtPanic
{
	pub fn install(self)
	{
		std::panic::set_hook(self.into_panic_hook());
	}

	pub fn into_panic_hook(self) -> PanicHookFunc
	{
		Box::new(move |panic_info| {
			self.print_header();
			(*self.inner_hook)(panic_info);
			self.print_footer();
		})
	}

	fn print_header(&self)
	{
		eprintln!("------------[ ✂ cut here ✂ ]------------");
		eprintln!("Unhandled crash in axirt-cli v{}", crate_version!());
		eprintln!();
	}

	fn print_footer(&self)
	{
		eprintln!();
		eprintln!("{}", "Please include all lines down to this one from the cut here".yellow());
		eprintln!("{}", "marker, along with the command line that was run, when reporting".yellow());
		eprintln!("{}", "this issue to the AXI-RT maintainers".yellow());
	}
}

impl EyreHandler for AxirtHandler
{
	fn debug(&self, error: &(dyn std::error::Error + 'static), fmt: &mut core::fmt::Formatter<'_>)
	-> core::fmt::Result
	{
		writeln!(fmt, "------------[ ✂ cut here ✂ ]------------")?;
		write!(fmt, "Unhandled error in axirt-cli v{}", crate_version!())?;
		self.inner_handler.debug(error, fmt)?;
		writeln!(fmt)?;
		writeln!(fmt)?;
		writeln!(
			fmt,
			"{}",
			"Please include all lines down to this one from the cut here".yellow()
		)?;
		writeln!(fmt, "{}", "marker, along with the command line that was run, when reporting".yellow())?;
		write!(fmt, "{}", "this issue to the AXI-RT maintainers".yellow())
	}

	fn track_caller(&mut self, location: &'static std::panic::Location<'static>)
	{
		self.inner_handler.track_caller(location);
	}
}

fn install_error_handler() -> Result<()>
{
	// Grab us a new default handler
	let default_handler = HookBuilder::default();
	// Turn that into a pair of hooks, one for panics and the other for errors
	let (panic_hook, eyre_hook) = default_handler.try_into_hooks()?;

	// Wrap the default panic hook so we only have to add the banners around it
	AxirtPanic {
		inner_hook: panic_hook.into_panic_hook(),
	}
	.install();

	// Likewise for the error report hook
	AxirtHook {
		inner_hook: eyre_hook.into_eyre_hook(),
	}
	.install()?;
	Ok(())
}

/// Clap v3 style (approximate)
/// See https://stackoverflow.com/a/75343828
fn style() -> clap::builder::Styles
{
	Styles::styled()
		.usage(
			anstyle::Style::new()
				.fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow)))
				.bold(),
		)
		.header(
			anstyle::Style::new()
				.bold()
				.fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
		)
		.literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
}

fn main() -> Result<()>
{
	install_error_handler()?;
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Info)
		.parse_default_env()
		.init();

	let cli_args = CliArguments::parse();

	match &cli_args.subcommand {
		ToplevelCommands::Stimuli(stimuli_args) => stimuli_args.run(),
		ToplevelCommands::Regmap(regmap_args) => regmap_args.run(),
		ToplevelCommands::Complete(comp_args) => {
			let mut cmd = CliArguments::command();
			generate(comp_args.shell, &mut cmd, "axirt-cli", &mut stdout());
			Ok(())
		},
	}
}

#[cfg(test)]
mod tests
{
	use axirt::StimulusConfig;
	use axirt::axi::Direction;
	use axirt::rng::{EngineKind, Seed};
	use color_eyre::eyre::Result;

	use super::*;

	fn stimuli_config(argv: &[&str]) -> Result<StimulusConfig>
	{
		let cli_args = CliArguments::try_parse_from(argv.iter().copied())?;
		match &cli_args.subcommand {
			ToplevelCommands::Stimuli(stimuli_args) => Ok(StimulusConfig::from_params(stimuli_args)?),
			_ => panic!("{:?} did not select the stimuli command", argv),
		}
	}

	#[test]
	fn command_definition_is_consistent()
	{
		CliArguments::command().debug_assert();
	}

	#[test]
	fn stimuli_positionals_in_order() -> Result<()>
	{
		let config = stimuli_config(&["axirt-cli", "stimuli", "4", "1", "2", "1", "1234", "--seed-kind", "integer"])?;

		assert_eq!(config, StimulusConfig::new(4, 1, 2, Direction::Write, Seed::Integer(1234))?);
		Ok(())
	}

	#[test]
	fn stimuli_engine_option() -> Result<()>
	{
		let config = stimuli_config(&["axirt-cli", "stimuli", "--engine", "chacha", "1", "0", "0", "0", "-7"])?;
		let expected = StimulusConfig::new(1, 0, 0, Direction::Read, Seed::Text("-7".into()))?.engine(EngineKind::ChaCha);

		assert_eq!(config, expected);
		Ok(())
	}

	#[test]
	fn bad_stimuli_arguments_are_rejected()
	{
		assert!(stimuli_config(&["axirt-cli", "stimuli", "-1", "0", "0", "1", "x"]).is_err());
		assert!(stimuli_config(&["axirt-cli", "stimuli", "2", "0", "256", "1", "x"]).is_err());
		assert!(stimuli_config(&["axirt-cli", "stimuli", "2", "5", "3", "1", "x"]).is_err());
		assert!(stimuli_config(&["axirt-cli", "stimuli", "2", "0", "3", "1", "abc", "--seed-kind", "integer"]).is_err());
		assert!(stimuli_config(&["axirt-cli", "stimuli", "2", "0", "3", "1"]).is_err());
		assert!(stimuli_config(&["axirt-cli", "stimuli", "2", "0", "3", "1", "x", "--engine", "xorshift"]).is_err());
	}

	#[test]
	fn regmap_format_option() -> Result<()>
	{
		let cli_args = CliArguments::try_parse_from(["axirt-cli", "regmap", "VERSION", "2", "2", "--format", "c-header"])?;

		assert!(matches!(cli_args.subcommand, ToplevelCommands::Regmap(_)));
		assert!(CliArguments::try_parse_from(["axirt-cli", "regmap", "VERSION", "2", "2", "--format", "yaml"]).is_err());
		Ok(())
	}

	struct Rendered<'a>
	{
		handler: &'a AxirtHandler,
		error: &'a (dyn std::error::Error + 'static),
	}

	impl std::fmt::Debug for Rendered<'_>
	{
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
		{
			self.handler.debug(self.error, f)
		}
	}

	#[test]
	fn error_report_is_framed() -> Result<()>
	{
		let (_, eyre_hook) = HookBuilder::default().try_into_hooks()?;
		let hook = AxirtHook {
			inner_hook: eyre_hook.into_eyre_hook(),
		};
		let error = std::io::Error::other("stdout closed");
		let handler = hook.build_handler(&error);
		let report = format!(
			"{:?}",
			Rendered {
				handler: &handler,
				error: &error,
			}
		);

		assert!(report.starts_with("------------[ ✂ cut here ✂ ]------------\n"));
		assert!(report.contains("stdout closed"));
		assert!(report.contains("marker, along with the command line"));
		assert!(!report.contains(" marker,"));
		Ok(())
	}
}

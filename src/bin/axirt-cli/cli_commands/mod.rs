// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

use clap::Subcommand;

use crate::CompletionArguments;
use crate::cli_commands::regmap::RegmapArguments;
use crate::cli_commands::stimuli::StimuliArguments;

pub mod regmap;
pub mod stimuli;

#[derive(Subcommand)]
pub enum ToplevelCommands
{
	/// Generate AXI4 stimuli for the AXI-RT testbench
	Stimuli(StimuliArguments),
	/// Render the AXI-RT register description for a configuration
	Regmap(RegmapArguments),
	/// Generate completions data for the shell
	Complete(CompletionArguments),
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

//! Drop-in replacement for the testbench's stimulus script: exactly five positional
//! arguments, MT19937 seeded with the seed text, stimuli on stdout.

use std::io::{BufWriter, stdout};

use axirt::axi::Direction;
use axirt::error::AxirtError;
use axirt::rng::{Seed, SeedKind};
use axirt::stimuli::{parse_burst_len, parse_direction, parse_transaction_count, write_stimuli};
use axirt::{StimulusConfig, StimulusParams};
use clap::Parser;
use color_eyre::eyre::Result;

#[derive(Parser)]
#[command(version, about = "Generate AXI4 stimuli for the AXI-RT testbench")]
struct Arguments
{
	#[arg(value_parser = parse_transaction_count, allow_negative_numbers = true)]
	num_transactions: u64,
	#[arg(value_parser = parse_burst_len, allow_negative_numbers = true)]
	min_len: u8,
	#[arg(value_parser = parse_burst_len, allow_negative_numbers = true)]
	max_len: u8,
	#[arg(value_parser = parse_direction, allow_negative_numbers = true)]
	is_write: Direction,
	#[arg(allow_hyphen_values = true)]
	seed: String,
}

impl StimulusParams for Arguments
{
	fn num_transactions(&self) -> u64
	{
		self.num_transactions
	}

	fn min_len(&self) -> u8
	{
		self.min_len
	}

	fn max_len(&self) -> u8
	{
		self.max_len
	}

	fn direction(&self) -> Direction
	{
		self.is_write
	}

	fn seed(&self) -> Result<Seed, AxirtError>
	{
		Seed::parse(&self.seed, SeedKind::Text)
	}
}

fn main() -> Result<()>
{
	color_eyre::install()?;
	env_logger::Builder::new()
		.filter_level(log::LevelFilter::Warn)
		.parse_default_env()
		.init();

	let args = Arguments::parse();
	let config = StimulusConfig::from_params(&args)?;

	let stdout = stdout();
	write_stimuli(&config, &mut BufWriter::new(stdout.lock()))?;
	Ok(())
}

#[cfg(test)]
mod tests
{
	use clap::CommandFactory;
	use color_eyre::eyre::Result;

	use super::*;

	fn config(argv: &[&str]) -> Result<StimulusConfig>
	{
		let args = Arguments::try_parse_from(argv.iter().copied())?;
		Ok(StimulusConfig::from_params(&args)?)
	}

	#[test]
	fn command_definition_is_consistent()
	{
		Arguments::command().debug_assert();
	}

	#[test]
	fn five_positionals_in_order() -> Result<()>
	{
		assert_eq!(
			config(&["gen-stimuli", "3", "0", "3", "1", "7"])?,
			StimulusConfig::new(3, 0, 3, Direction::Write, Seed::Text("7".into()))?
		);
		assert_eq!(
			config(&["gen-stimuli", "6", "2", "9", "0", "axi"])?,
			StimulusConfig::new(6, 2, 9, Direction::Read, Seed::Text("axi".into()))?
		);
		Ok(())
	}

	#[test]
	fn seed_is_always_text() -> Result<()>
	{
		assert_eq!(
			config(&["gen-stimuli", "1", "0", "0", "-3", "-12"])?,
			StimulusConfig::new(1, 0, 0, Direction::Write, Seed::Text("-12".into()))?
		);
		Ok(())
	}

	#[test]
	fn bad_arguments_are_rejected()
	{
		assert!(config(&["gen-stimuli", "-1", "0", "0", "1", "x"]).is_err());
		assert!(config(&["gen-stimuli", "2", "5", "3", "1", "x"]).is_err());
		assert!(config(&["gen-stimuli", "2", "0", "256", "1", "x"]).is_err());
		assert!(config(&["gen-stimuli", "2", "0", "3", "yes", "x"]).is_err());
		assert!(config(&["gen-stimuli", "2", "0", "3", "1"]).is_err());
		assert!(config(&["gen-stimuli", "2", "0", "3", "1", "x", "extra"]).is_err());
		assert!(config(&["gen-stimuli", "2", "0", "3", "1", "x", "--engine", "chacha"]).is_err());
	}
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

use std::io::{BufWriter, stdout};

use axirt::axi::Direction;
use axirt::error::AxirtError;
use axirt::rng::{EngineKind, Seed, SeedKind};
use axirt::stimuli::{parse_burst_len, parse_direction, parse_transaction_count, write_stimuli};
use axirt::{StimulusConfig, StimulusParams};
use clap::Args;
use color_eyre::eyre::{Context, Result};
use log::info;

#[derive(Args)]
pub struct StimuliArguments
{
	#[arg(value_parser = parse_transaction_count, allow_negative_numbers = true)]
	/// Number of transactions to generate
	num_transactions: u64,
	#[arg(value_parser = parse_burst_len, allow_negative_numbers = true)]
	/// Smallest AXI len (beats - 1) to draw
	min_len: u8,
	#[arg(value_parser = parse_burst_len, allow_negative_numbers = true)]
	/// Largest AXI len (beats - 1) to draw
	max_len: u8,
	#[arg(value_parser = parse_direction, allow_negative_numbers = true)]
	/// 0 to generate reads, anything else to generate writes
	is_write: Direction,
	#[arg(allow_hyphen_values = true)]
	/// Seed for the pseudo-random engine
	seed: String,

	#[arg(long = "engine", default_value_t = EngineKind::Mersenne)]
	#[arg(value_enum)]
	/// Pseudo-random engine to draw with
	engine: EngineKind,
	#[arg(long = "seed-kind", default_value = "text")]
	#[arg(value_enum)]
	/// How to interpret the seed
	seed_kind: SeedKind,
}

impl StimulusParams for StimuliArguments
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
		Seed::parse(&self.seed, self.seed_kind)
	}

	fn engine(&self) -> EngineKind
	{
		self.engine
	}
}

impl StimuliArguments
{
	pub fn run(&self) -> Result<()>
	{
		let config = StimulusConfig::from_params(self)?;

		let stdout = stdout();
		let mut out = BufWriter::new(stdout.lock());
		let summary = write_stimuli(&config, &mut out).wrap_err("Failed to write stimuli to stdout")?;

		info!(
			"Generated {} {} transactions carrying {} write beats",
			summary.transactions,
			config.direction(),
			summary.beats
		);
		Ok(())
	}
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

use std::io::Write;

use log::{debug, warn};

use crate::axi::{
	AxTransaction, BEAT_BYTES, DATA_NIBBLES, Direction, MAX_BURST_LEN, STIMULUS_ADDR_STRIDE, STRB_NIBBLES, WBeat,
};
use crate::error::AxirtError;
use crate::log_and_return;
use crate::rng::{EngineKind, Seed, StimulusRng};

/// Types implementing this trait can describe a stimulus run, e.g. parsed command lines.
pub trait StimulusParams
{
	fn num_transactions(&self) -> u64;
	fn min_len(&self) -> u8;
	fn max_len(&self) -> u8;
	fn direction(&self) -> Direction;
	/// Seeds arrive as text and may still fail to parse as the requested kind.
	fn seed(&self) -> Result<Seed, AxirtError>;

	fn engine(&self) -> EngineKind
	{
		EngineKind::Mersenne
	}
}

/// A validated stimulus run description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StimulusConfig
{
	num_transactions: u64,
	min_len: u8,
	max_len: u8,
	direction: Direction,
	seed: Seed,
	engine: EngineKind,
}

impl StimulusConfig
{
	pub fn new(
		num_transactions: u64, min_len: u8, max_len: u8, direction: Direction, seed: Seed,
	) -> Result<Self, AxirtError>
	{
		if min_len > max_len {
			log_and_return!(AxirtError::EmptyLengthRange {
				min_len,
				max_len,
			});
		}

		let burst_bytes = (u64::from(max_len) + 1) * BEAT_BYTES;
		if burst_bytes > STIMULUS_ADDR_STRIDE {
			warn!(
				"Bursts of up to {} bytes overlap the {} byte address stride between transactions",
				burst_bytes, STIMULUS_ADDR_STRIDE
			);
		}

		Ok(Self {
			num_transactions,
			min_len,
			max_len,
			direction,
			seed,
			engine: EngineKind::default(),
		})
	}

	pub fn from_params<Params>(params: &Params) -> Result<Self, AxirtError>
	where
		Params: StimulusParams,
	{
		Ok(Self::new(
			params.num_transactions(),
			params.min_len(),
			params.max_len(),
			params.direction(),
			params.seed()?,
		)?
		.engine(params.engine()))
	}

	/// Select the engine to draw with.
	#[must_use]
	pub fn engine(mut self, engine: EngineKind) -> Self
	{
		self.engine = engine;
		self
	}

	pub fn num_transactions(&self) -> u64
	{
		self.num_transactions
	}

	pub fn direction(&self) -> Direction
	{
		self.direction
	}

	/// Seed a fresh engine and build the generator for this run.
	pub fn generator(&self) -> StimulusGenerator
	{
		StimulusGenerator::new(self, self.engine.seeded(&self.seed))
	}
}

/// One address/control record and the write beats it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst
{
	pub ax: AxTransaction,
	/// Exactly `ax.len + 1` beats for writes, empty for reads.
	pub beats: Vec<WBeat>,
}

impl Burst
{
	pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()>
	{
		self.ax.write_to(out)?;
		for beat in &self.beats {
			beat.write_to(out)?;
		}
		Ok(())
	}
}

/// Lazily produces the bursts of a stimulus run, in order.
pub struct StimulusGenerator
{
	rng: Box<dyn StimulusRng>,
	min_len: u8,
	max_len: u8,
	direction: Direction,
	next_index: u64,
	num_transactions: u64,
}

impl StimulusGenerator
{
	pub fn new(config: &StimulusConfig, rng: Box<dyn StimulusRng>) -> Self
	{
		Self {
			rng,
			min_len: config.min_len,
			max_len: config.max_len,
			direction: config.direction,
			next_index: 0,
			num_transactions: config.num_transactions,
		}
	}

	fn draw_hex(&mut self, nibbles: usize) -> u32
	{
		(0..nibbles).fold(0, |value, _| (value << 4) | u32::from(self.rng.draw_nibble()))
	}

	fn draw_beat(&mut self) -> WBeat
	{
		// Data nibbles are drawn before strobe nibbles
		let data = self.draw_hex(DATA_NIBBLES);
		let strb = self.draw_hex(STRB_NIBBLES) as u8;
		WBeat {
			data,
			strb,
			user: 0,
		}
	}
}

impl Iterator for StimulusGenerator
{
	type Item = Burst;

	fn next(&mut self) -> Option<Burst>
	{
		if self.next_index >= self.num_transactions {
			return None;
		}

		let len = self.rng.draw_inclusive(self.min_len, self.max_len);
		let ax = AxTransaction::incr(self.next_index, len, self.direction);
		let beats = match self.direction {
			Direction::Write => (0..ax.beats()).map(|_| self.draw_beat()).collect(),
			Direction::Read => Vec::new(),
		};
		self.next_index += 1;

		Some(Burst {
			ax,
			beats,
		})
	}

	fn size_hint(&self) -> (usize, Option<usize>)
	{
		let remaining = usize::try_from(self.num_transactions - self.next_index).unwrap_or(usize::MAX);
		(remaining, Some(remaining))
	}
}

/// Counts of what a stimulus run emitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StimulusSummary
{
	pub transactions: u64,
	pub beats: u64,
}

/// Generate the whole run described by `config` into `out`.
///
/// Output is written as it is generated; on a write failure whatever was already written
/// stays written.
pub fn write_stimuli(config: &StimulusConfig, out: &mut impl Write) -> Result<StimulusSummary, AxirtError>
{
	debug!(
		"Generating {} {} transactions with len in [{}, {}] using the {} engine",
		config.num_transactions, config.direction, config.min_len, config.max_len, config.engine
	);

	let mut summary = StimulusSummary::default();
	for burst in config.generator() {
		burst.write_to(out)?;
		summary.transactions += 1;
		summary.beats += burst.beats.len() as u64;
	}
	out.flush()?;

	Ok(summary)
}

/// Parse a non-negative transaction count.
pub fn parse_transaction_count(value: &str) -> Result<u64, AxirtError>
{
	let count: i128 = value
		.trim()
		.parse()
		.map_err(|e| AxirtError::invalid_argument("transaction count", value, e))?;
	u64::try_from(count).map_err(|_| AxirtError::invalid_argument("transaction count", value, "must not be negative"))
}

/// Parse a burst length field value, which must fit AxLEN.
pub fn parse_burst_len(value: &str) -> Result<u8, AxirtError>
{
	let len: i128 = value
		.trim()
		.parse()
		.map_err(|e| AxirtError::invalid_argument("burst length", value, e))?;
	if len < 0 {
		return Err(AxirtError::invalid_argument("burst length", value, "must not be negative"));
	}
	u8::try_from(len).map_err(|_| AxirtError::BurstTooLong {
		len: len.unsigned_abs(),
		limit: MAX_BURST_LEN,
	})
}

/// Parse the integer read/write flag.
pub fn parse_direction(value: &str) -> Result<Direction, AxirtError>
{
	value
		.trim()
		.parse()
		.map(Direction::from_flag)
		.map_err(|e| AxirtError::invalid_argument("write flag", value, e))
}

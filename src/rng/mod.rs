// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

use std::fmt::Display;

use clap::ValueEnum;
use clap::builder::PossibleValue;
use log::debug;

use crate::error::AxirtError;

mod chacha;
mod mersenne;

pub use self::chacha::ChaChaEngine;
pub use self::mersenne::Mt19937;

/// Source of randomness for stimulus generation.
///
/// Everything the generator draws goes through [`StimulusRng::draw_inclusive`], so an
/// engine fully determines the stream for a given seed.
pub trait StimulusRng
{
	/// Draw uniformly from `[low, high]`. Callers guarantee `low <= high`.
	fn draw_inclusive(&mut self, low: u8, high: u8) -> u8;

	/// Draw a single hex character's worth of randomness.
	fn draw_nibble(&mut self) -> u8
	{
		self.draw_inclusive(0, 0xf)
	}
}

/// A seed as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed
{
	/// Seeded by the text itself, which is how the testbench scripts always seeded.
	Text(String),
	Integer(i128),
}

impl Seed
{
	/// Interpret `value` according to `kind`.
	pub fn parse(value: &str, kind: SeedKind) -> Result<Self, AxirtError>
	{
		match kind {
			SeedKind::Text => Ok(Self::Text(value.to_string())),
			SeedKind::Integer => value
				.trim()
				.parse()
				.map(Self::Integer)
				.map_err(|e| AxirtError::invalid_argument("integer seed", value, e)),
		}
	}
}

impl Display for Seed
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self {
			Self::Text(text) => write!(f, "{}", text),
			Self::Integer(value) => write!(f, "{}", value),
		}
	}
}

/// How the seed argument should be interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SeedKind
{
	#[default]
	Text,
	Integer,
}

impl ValueEnum for SeedKind
{
	fn value_variants<'a>() -> &'a [Self]
	{
		&[Self::Text, Self::Integer]
	}

	fn to_possible_value(&self) -> Option<PossibleValue>
	{
		match self {
			Self::Text => Some(PossibleValue::new("text").help("Seed with the argument text verbatim")),
			Self::Integer => Some(PossibleValue::new("integer").help("Parse the argument as a signed integer")),
		}
	}
}

/// The pseudo-random engines stimuli can be generated with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EngineKind
{
	/// MT19937, seeded and consumed exactly as the testbench stimulus scripts did.
	#[default]
	Mersenne,
	/// ChaCha12 from `rand`, seeded from the SHA-256 of the seed text.
	ChaCha,
}

impl EngineKind
{
	/// Construct a freshly seeded engine of this kind.
	pub fn seeded(self, seed: &Seed) -> Box<dyn StimulusRng>
	{
		debug!("Seeding {} engine with {:?}", self, seed);
		match self {
			Self::Mersenne => Box::new(Mt19937::from_seed(seed)),
			Self::ChaCha => Box::new(ChaChaEngine::from_seed(seed)),
		}
	}
}

impl Display for EngineKind
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self {
			Self::Mersenne => write!(f, "mersenne"),
			Self::ChaCha => write!(f, "chacha"),
		}
	}
}

impl ValueEnum for EngineKind
{
	fn value_variants<'a>() -> &'a [Self]
	{
		&[Self::Mersenne, Self::ChaCha]
	}

	fn to_possible_value(&self) -> Option<PossibleValue>
	{
		match self {
			Self::Mersenne => Some("mersenne".into()),
			Self::ChaCha => Some("chacha".into()),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn integer_seed_accepts_sign_and_whitespace()
	{
		assert_eq!(Seed::parse(" -17\n", SeedKind::Integer).unwrap(), Seed::Integer(-17));
		assert_eq!(Seed::parse("42", SeedKind::Text).unwrap(), Seed::Text("42".into()));
		assert!(Seed::parse("forty-two", SeedKind::Integer).is_err());
	}

	#[test]
	fn engine_names_round_trip()
	{
		for engine in EngineKind::value_variants() {
			assert_eq!(EngineKind::from_str(&engine.to_string(), false).unwrap(), *engine);
		}
		assert!(EngineKind::from_str("xorshift", false).is_err());
	}

	#[test]
	fn seeded_engines_stay_in_range()
	{
		for engine in EngineKind::value_variants() {
			let mut rng = engine.seeded(&Seed::Text("range".into()));
			for _ in 0..1000 {
				let value = rng.draw_inclusive(3, 9);
				assert!((3..=9).contains(&value));
				assert!(rng.draw_nibble() <= 0xf);
			}
		}
	}
}

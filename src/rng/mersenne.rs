// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

//! `rand_mt`'s MT19937 behind the seeding and range reduction used by the stimulus scripts
//! the testbenches were built against. Streams are bit-exact with those scripts.

use rand_mt::Mt;
use sha2::{Digest, Sha512};

use super::{Seed, StimulusRng};

pub struct Mt19937
{
	rng: Mt,
}

impl Mt19937
{
	/// Seed the engine from a command-line seed.
	///
	/// Integers key the engine with the 32-bit words of their magnitude. Text is first
	/// extended with its own SHA-512 digest and the result read as one big-endian integer.
	pub fn from_seed(seed: &Seed) -> Self
	{
		let key = match seed {
			Seed::Integer(value) => key_from_be_bytes(&value.unsigned_abs().to_be_bytes()),
			Seed::Text(text) => {
				let mut bytes = text.as_bytes().to_vec();
				bytes.extend_from_slice(&Sha512::digest(text.as_bytes()));
				key_from_be_bytes(&bytes)
			},
		};
		Self {
			rng: Mt::new_with_key(key),
		}
	}

	fn next_u32(&mut self) -> u32
	{
		self.rng.next_u32()
	}

	/// Uniform value in `[0, bound)` by rejection sampling on the top `bitlen(bound)` bits
	/// of each output word. Every rejected word is consumed from the stream.
	fn below(&mut self, bound: u32) -> u32
	{
		debug_assert!(bound > 0);
		let bits = u32::BITS - bound.leading_zeros();
		loop {
			let candidate = self.next_u32() >> (u32::BITS - bits);
			if candidate < bound {
				return candidate;
			}
		}
	}
}

impl StimulusRng for Mt19937
{
	fn draw_inclusive(&mut self, low: u8, high: u8) -> u8
	{
		let width = u32::from(high - low) + 1;
		// The draw is below 256 - low, so this cannot overflow
		low + self.below(width) as u8
	}
}

/// Split a big-endian integer into little-endian 32-bit key words, dropping high-order zero
/// words but always keeping at least one.
fn key_from_be_bytes(bytes: &[u8]) -> Vec<u32>
{
	let mut words: Vec<u32> = bytes
		.rchunks(4)
		.map(|chunk| chunk.iter().fold(0u32, |word, &byte| (word << 8) | u32::from(byte)))
		.collect();
	while words.len() > 1 && words.last() == Some(&0) {
		words.pop();
	}
	if words.is_empty() {
		words.push(0);
	}
	words
}

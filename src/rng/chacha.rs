// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use super::{Seed, StimulusRng};

/// `rand`'s standard engine, for stimuli that do not need to match the historical scripts.
pub struct ChaChaEngine
{
	rng: StdRng,
}

impl ChaChaEngine
{
	/// Integer and text seeds with the same spelling produce the same stream.
	pub fn from_seed(seed: &Seed) -> Self
	{
		let digest: [u8; 32] = Sha256::digest(seed.to_string().as_bytes()).into();
		Self {
			rng: StdRng::from_seed(digest),
		}
	}
}

impl StimulusRng for ChaChaEngine
{
	fn draw_inclusive(&mut self, low: u8, high: u8) -> u8
	{
		self.rng.random_range(low..=high)
	}
}

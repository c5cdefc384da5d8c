// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

pub mod axi;
pub mod error;
pub mod regmap;
pub mod rng;
pub mod stimuli;

pub use crate::error::AxirtError;
pub use crate::stimuli::{StimulusConfig, StimulusParams};

// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors
//! Module for error handling code.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AxirtError
{
	#[error("Invalid {what} '{value}': {reason}")]
	InvalidArgument
	{
		/// The argument being parsed (e.g. `"transaction count"`).
		what: &'static str,
		value: String,
		reason: String,
	},

	#[error("Burst length range is empty: min_len {min_len} is greater than max_len {max_len}")]
	EmptyLengthRange
	{
		min_len: u8,
		max_len: u8,
	},

	#[error("Burst length {len} does not fit the 8-bit AXI4 len field (maximum {limit})")]
	BurstTooLong
	{
		len: u128,
		limit: u8,
	},

	#[error("Invalid register map parameter {what}: {reason}")]
	InvalidRegisterMap
	{
		what: &'static str,
		reason: String,
	},

	#[error("Invalid version string '{0}', expected major.minor.patch")]
	InvalidVersion(String),

	#[error("Failed to read version file {}", path.display())]
	VersionFile
	{
		#[source]
		source: std::io::Error,
		path: PathBuf,
	},

	#[error("Failed to write generated output")]
	Output(#[from] std::io::Error),
}

impl AxirtError
{
	/// Build an [`AxirtError::InvalidArgument`] for the argument `what`.
	pub fn invalid_argument(what: &'static str, value: &str, reason: impl ToString) -> Self
	{
		Self::InvalidArgument {
			what,
			value: value.to_string(),
			reason: reason.to_string(),
		}
	}
}

#[macro_export]
macro_rules! log_and_return
{
	($err:expr) => {
		let err = $err;
		log::error!("{}", err);
		return Err(err);
	}
}

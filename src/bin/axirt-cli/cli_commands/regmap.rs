// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use axirt::regmap::{RegMapFormat, RegMapParams, RegisterMap, Version, write_c_header, write_hjson, write_json};
use clap::Args;
use color_eyre::eyre::{Context, Result};
use log::info;

#[derive(Args)]
pub struct RegmapArguments
{
	/// File holding the hardware version as major.minor.patch
	version_file: PathBuf,
	/// Number of managers the unit is configured for
	num_managers: u32,
	/// Number of subordinate address regions per manager
	num_subordinates: u32,

	#[arg(short = 'f', long = "format", default_value = "hjson")]
	#[arg(value_enum)]
	/// Output format to render
	format: RegMapFormat,
}

impl RegmapArguments
{
	pub fn run(&self) -> Result<()>
	{
		let version = Version::from_file(&self.version_file)?;
		let params = RegMapParams::new(self.num_managers, self.num_subordinates, version)?;
		let map = RegisterMap::new(params);

		let stdout = stdout();
		let mut out = BufWriter::new(stdout.lock());
		match self.format {
			RegMapFormat::Hjson => write_hjson(&map, "axirt-cli", &mut out),
			RegMapFormat::Json => write_json(&map, &mut out),
			RegMapFormat::CHeader => write_c_header(&map, &mut out),
		}
		.and_then(|_| out.flush())
		.wrap_err("Failed to write register description to stdout")?;

		info!(
			"Rendered {} registers of axi_rt v{} for {} managers and {} subordinates",
			map.registers().len(),
			version,
			self.num_managers,
			self.num_subordinates
		);
		Ok(())
	}
}

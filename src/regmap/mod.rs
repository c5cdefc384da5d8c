// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

//! The AXI-RT unit's register file description, parameterised by the number of managers
//! and subordinate regions, and the renderers consumed by the hardware build flow.

use std::fmt::Display;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use clap::builder::PossibleValue;
use log::debug;
use serde::Serialize;

use crate::error::AxirtError;

mod header;
mod hjson;
mod json;

pub use self::header::write_c_header;
pub use self::hjson::write_hjson;
pub use self::json::write_json;

pub const BLOCK_NAME: &str = "axi_rt";
pub const CLOCK_PRIMARY: &str = "clk_i";
pub const REG_WIDTH: u32 = 32;
/// Distance between consecutive registers.
pub const REG_BYTES: u32 = REG_WIDTH / 8;

pub(crate) const SOURCE_COPYRIGHT: &str = "Copyright 2022 ETH Zurich and University of Bologna.";
pub(crate) const SOURCE_LICENSE: &str = "Licensed under Solderpad Hardware License, Version 0.51, see LICENSE for details.";
pub(crate) const SOURCE_SPDX: &str = "SPDX-License-Identifier: SHL-0.51";

/// Hardware release a register file describes, as found in the repository's `VERSION` file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Version
{
	pub major: u32,
	pub minor: u32,
	pub patch: u32,
}

impl Version
{
	pub fn from_file(path: &Path) -> Result<Self, AxirtError>
	{
		let contents = std::fs::read_to_string(path).map_err(|source| AxirtError::VersionFile {
			source,
			path: path.to_path_buf(),
		})?;
		contents.parse()
	}
}

impl FromStr for Version
{
	type Err = AxirtError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		let invalid = || AxirtError::InvalidVersion(value.trim().to_string());
		let parts = value
			.split('.')
			.map(|part| part.trim().parse::<u32>())
			.collect::<Result<Vec<_>, _>>()
			.map_err(|_| invalid())?;

		match parts.as_slice() {
			[major, minor, patch] => Ok(Self {
				major: *major,
				minor: *minor,
				patch: *patch,
			}),
			_ => Err(invalid()),
		}
	}
}

impl Display for Version
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
	}
}

/// Elaboration parameters of the register file.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegMapParams
{
	num_managers: u32,
	num_subordinates: u32,
	version: Version,
}

impl RegMapParams
{
	pub fn new(num_managers: u32, num_subordinates: u32, version: Version) -> Result<Self, AxirtError>
	{
		if num_managers == 0 {
			return Err(AxirtError::InvalidRegisterMap {
				what: "num_managers",
				reason: "at least one manager is required".into(),
			});
		}
		if num_subordinates == 0 {
			return Err(AxirtError::InvalidRegisterMap {
				what: "num_subordinates",
				reason: "at least one subordinate region is required".into(),
			});
		}
		Ok(Self {
			num_managers,
			num_subordinates,
			version,
		})
	}

	pub fn num_managers(&self) -> u32
	{
		self.num_managers
	}

	pub fn num_subordinates(&self) -> u32
	{
		self.num_subordinates
	}

	/// One register set per manager and subordinate region.
	pub fn num_registers(&self) -> u64
	{
		u64::from(self.num_managers) * u64::from(self.num_subordinates)
	}

	pub fn version(&self) -> Version
	{
		self.version
	}

	/// Number of instances a register of the given multiplicity has.
	pub fn count(&self, multiplicity: Multiplicity) -> u64
	{
		match multiplicity {
			Multiplicity::Single => 1,
			Multiplicity::PerManager => self.num_managers.into(),
			Multiplicity::PerRegion => self.num_registers(),
		}
	}

	/// The elaboration parameters exposed in the register description.
	pub fn param_list(&self) -> [Param; 3]
	{
		[
			Param {
				name: Multiplicity::PerManager.param_name(),
				desc: "Maximum number of managers.",
				value: self.num_managers.into(),
			},
			Param {
				name: "NumSub",
				desc: "Configured number of subordinate regions.",
				value: self.num_subordinates.into(),
			},
			Param {
				name: Multiplicity::PerRegion.param_name(),
				desc: "Configured number of required registers.",
				value: self.num_registers(),
			},
		]
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param
{
	pub name: &'static str,
	pub desc: &'static str,
	pub value: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwAccess
{
	Ro,
	Wo,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HwAccess
{
	Hro,
	Hwo,
}

impl Display for SwAccess
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self {
			Self::Ro => write!(f, "ro"),
			Self::Wo => write!(f, "wo"),
		}
	}
}

impl Display for HwAccess
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self {
			Self::Hro => write!(f, "hro"),
			Self::Hwo => write!(f, "hwo"),
		}
	}
}

/// How many copies of a register the register file holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Multiplicity
{
	Single,
	/// One field per manager.
	PerManager,
	/// One field per manager and subordinate region pair.
	PerRegion,
}

impl Multiplicity
{
	/// Name of the parameter giving the count, as used in `count:` entries.
	pub fn param_name(self) -> &'static str
	{
		match self {
			Self::Single => "1",
			Self::PerManager => "NumMrg",
			Self::PerRegion => "NumReg",
		}
	}
}

/// The single field of a register. Fields always start at bit 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field
{
	pub name: String,
	pub width: u32,
}

impl Field
{
	fn new(name: &str, width: u32) -> Self
	{
		Self {
			name: name.to_string(),
			width,
		}
	}

	/// The `msb:lsb` bit range.
	pub fn bits(&self) -> String
	{
		format!("{}:0", self.width - 1)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register
{
	pub name: String,
	pub desc: String,
	pub swaccess: SwAccess,
	pub hwaccess: Option<HwAccess>,
	/// Hardware provides the value and sees read strobes (`hwext`/`hwqe`).
	pub hw_external: bool,
	pub multiplicity: Multiplicity,
	pub resval: Option<u64>,
	pub field: Field,
}

impl Register
{
	fn single(name: &str, desc: &str, swaccess: SwAccess) -> Self
	{
		Self {
			name: name.to_string(),
			desc: desc.to_string(),
			swaccess,
			hwaccess: None,
			hw_external: false,
			multiplicity: Multiplicity::Single,
			resval: None,
			field: Field::new(name, REG_WIDTH),
		}
	}

	fn multi(name: &str, desc: &str, swaccess: SwAccess, multiplicity: Multiplicity, field: Field) -> Self
	{
		Self {
			hwaccess: Some(HwAccess::Hro),
			multiplicity,
			field,
			..Self::single(name, desc, swaccess)
		}
	}

	#[must_use]
	fn external(mut self) -> Self
	{
		self.hwaccess = Some(HwAccess::Hwo);
		self.hw_external = true;
		self
	}

	#[must_use]
	fn reset(mut self, value: u64) -> Self
	{
		self.resval = Some(value);
		self
	}

	pub fn is_multireg(&self) -> bool
	{
		self.multiplicity != Multiplicity::Single
	}

	/// How many copies of the field fit in one register.
	pub fn fields_per_reg(&self) -> u64
	{
		u64::from(REG_WIDTH / self.field.width)
	}
}

/// Where one physical register of a (multi)register lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot
{
	pub offset: u32,
	/// Index among the physical registers, only present when a multireg needs several.
	pub instance: Option<u64>,
	/// Indices of the multireg fields packed into this register.
	pub fields: Range<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterLayout<'m>
{
	pub register: &'m Register,
	pub slots: Vec<Slot>,
}

/// The complete register file for a set of parameters.
pub struct RegisterMap
{
	params: RegMapParams,
	registers: Vec<Register>,
}

impl RegisterMap
{
	pub fn new(params: RegMapParams) -> Self
	{
		use Multiplicity::{PerManager, PerRegion};
		use SwAccess::{Ro, Wo};

		let version = params.version();
		let mut registers = vec![
			Register::single("major_version", "Value of the major_version.", Ro).reset(version.major.into()),
			Register::single("minor_version", "Value of the minor_version.", Ro).reset(version.minor.into()),
			Register::single("patch_version", "Value of the patch_version.", Ro).reset(version.patch.into()),
			Register::multi("rt_enable", "Enable RT feature on master", Wo, PerManager, Field::new("enable", 1)).reset(0),
			Register::multi("rt_bypassed", "Is the RT inactive?", Ro, PerManager, Field::new("bypassed", 1)).external(),
			Register::multi("len_limit", "Fragmentation of the bursts in beats.", Wo, PerManager, Field::new("len", 8))
				.reset(0),
			Register::multi("imtu_enable", "Enables the IMTU.", Wo, PerManager, Field::new("enable", 1)).reset(0),
			Register::multi("imtu_abort", "Resets both the period and the budget.", Wo, PerManager, Field::new("abort", 1))
				.reset(0),
		];

		// The address fields are named write_budget in the generated headers software builds against
		let region_config = [
			("start_addr_sub_low", "The lower 32bit of the start address.", "write_budget"),
			("start_addr_sub_high", "The higher 32bit of the start address.", "write_budget"),
			("end_addr_sub_low", "The lower 32bit of the end address.", "write_budget"),
			("end_addr_sub_high", "The higher 32bit of the end address.", "write_budget"),
			("write_budget", "The budget for writes.", "write_budget"),
			("read_budget", "The budget for reads.", "read_budget"),
			("write_period", "The period for writes.", "write_period"),
			("read_period", "The period for reads.", "read_period"),
		];
		registers.extend(region_config.into_iter().map(|(name, desc, field)| {
			Register::multi(name, desc, Wo, PerRegion, Field::new(field, REG_WIDTH)).reset(0)
		}));

		let region_status = [
			("write_budget_left", "The budget left for writes."),
			("read_budget_left", "The budget left for reads."),
			("write_period_left", "The period left for writes."),
			("read_period_left", "The period left for reads."),
		];
		registers.extend(region_status.into_iter().map(|(name, desc)| {
			Register::multi(name, desc, Ro, PerRegion, Field::new(name, REG_WIDTH))
				.external()
				.reset(0)
		}));

		registers.push(
			Register::multi("isolate", "Is the interface requested to be isolated?", Ro, PerManager, Field::new("isolate", 1))
				.external(),
		);
		registers.push(
			Register::multi("isolated", "Is the interface isolated?", Ro, PerManager, Field::new("isolated", 1)).external(),
		);

		let hardware_params = [
			"num_managers",
			"addr_width",
			"data_width",
			"id_width",
			"user_width",
			"num_pending",
			"w_buffer_depth",
			"num_addr_regions",
			"period_width",
			"budget_width",
		];
		registers.extend(hardware_params.into_iter().map(|name| {
			Register::single(name, &format!("Value of the {} parameter.", name), Ro).external()
		}));

		registers.push(
			Register::single("max_num_managers", "Value of the max_num_managers parameter.", Ro)
				.reset(params.num_managers().into()),
		);

		debug!(
			"Built {} register file v{} with {} registers for {} managers",
			BLOCK_NAME,
			version,
			registers.len(),
			params.num_managers()
		);

		Self {
			params,
			registers,
		}
	}

	pub fn params(&self) -> &RegMapParams
	{
		&self.params
	}

	pub fn registers(&self) -> &[Register]
	{
		&self.registers
	}

	/// Assign register offsets in declaration order.
	///
	/// Multiregs pack as many fields as fit into each 32-bit register and take
	/// `ceil(count / fields_per_reg)` consecutive registers.
	pub fn layout(&self) -> Vec<RegisterLayout<'_>>
	{
		let mut offset = 0;
		self.registers
			.iter()
			.map(|register| {
				let count = self.params.count(register.multiplicity);
				let per_reg = register.fields_per_reg();
				let num_regs = count.div_ceil(per_reg);

				let slots = (0..num_regs)
					.map(|index| {
						let slot = Slot {
							offset,
							instance: (num_regs > 1).then_some(index),
							fields: (index * per_reg)..count.min((index + 1) * per_reg),
						};
						offset += REG_BYTES;
						slot
					})
					.collect();

				RegisterLayout {
					register,
					slots,
				}
			})
			.collect()
	}
}

/// Output formats for the register description.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RegMapFormat
{
	#[default]
	Hjson,
	Json,
	CHeader,
}

impl ValueEnum for RegMapFormat
{
	fn value_variants<'a>() -> &'a [Self]
	{
		&[Self::Hjson, Self::Json, Self::CHeader]
	}

	fn to_possible_value(&self) -> Option<PossibleValue>
	{
		match self {
			Self::Hjson => Some(PossibleValue::new("hjson").help("Register description for the register tool")),
			Self::Json => Some(PossibleValue::new("json").help("Register description as plain JSON")),
			Self::CHeader => Some(PossibleValue::new("c-header").help("Register offset defines for software")),
		}
	}
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

//! AXI4 channel records as consumed by the AXI-RT testbench stimulus loader.
//!
//! The loader reads whitespace-delimited text: one value per line for address/control
//! (AX) records, and one `data strb user` line per write-data (W) beat. Field order and
//! prefixing here are the wire contract with that loader.

use std::fmt::Display;
use std::io::Write;

/// Address of the first generated transaction.
pub const STIMULUS_BASE_ADDR: u64 = 0x100;
/// Distance between the addresses of consecutive transactions, regardless of burst length.
pub const STIMULUS_ADDR_STRIDE: u64 = 64;

/// AxSIZE encoding for 4 byte beats (2^2).
pub const BEAT_SIZE: u8 = 2;
pub const BEAT_BYTES: u64 = 1 << BEAT_SIZE;
/// Largest value the 8-bit AxLEN field can take for an INCR burst.
pub const MAX_BURST_LEN: u8 = u8::MAX;

/// AxBURST encoding of an incrementing burst, the only kind generated.
pub const BURST_INCR: u8 = 1;

/// AxCACHE value used for all stimuli: modifiable, non-bufferable.
pub const CACHE_MODIFIABLE: u8 = 2;

/// Number of independently drawn hex characters in a beat's data value.
pub const DATA_NIBBLES: usize = 8;
/// Number of independently drawn hex characters in a beat's strobe value.
pub const STRB_NIBBLES: usize = 2;

/// Transfer direction of a stimulus run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction
{
	Read,
	Write,
}

impl Direction
{
	/// Interpret an integer flag the way the testbench scripts do: zero is a read, anything
	/// else is a write.
	pub fn from_flag(flag: i64) -> Self
	{
		if flag != 0 { Self::Write } else { Self::Read }
	}

	pub fn is_write(self) -> bool
	{
		self == Self::Write
	}
}

impl Display for Direction
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self {
			Self::Read => write!(f, "read"),
			Self::Write => write!(f, "write"),
		}
	}
}

/// How a single record field is rendered on its line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum FieldValue
{
	Decimal(u64),
	/// `0x` prefixed lowercase hex without padding.
	Hex(u64),
	/// The field has no line at all in this record.
	Omitted,
}

impl FieldValue
{
	fn write_line(self, out: &mut impl Write) -> std::io::Result<()>
	{
		match self {
			Self::Decimal(value) => writeln!(out, "{}", value),
			Self::Hex(value) => writeln!(out, "{:#x}", value),
			Self::Omitted => Ok(()),
		}
	}
}

/// One address/control channel record (AW or AR).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxTransaction
{
	pub id: u32,
	pub addr: u64,
	/// Beats in the burst minus one.
	pub len: u8,
	pub size: u8,
	pub burst: u8,
	pub lock: bool,
	pub cache: u8,
	pub prot: u8,
	pub qos: u8,
	pub region: u8,
	/// Only write transactions carry an atomic operation field.
	pub atop: Option<u8>,
	pub user: u32,
}

impl AxTransaction
{
	/// Build the INCR burst used for stimulus transaction `index`.
	pub fn incr(index: u64, len: u8, direction: Direction) -> Self
	{
		Self {
			id: 0,
			addr: STIMULUS_BASE_ADDR + STIMULUS_ADDR_STRIDE * index,
			len,
			size: BEAT_SIZE,
			burst: BURST_INCR,
			lock: false,
			cache: CACHE_MODIFIABLE,
			prot: 0,
			qos: 0,
			region: 0,
			atop: direction.is_write().then_some(0),
			user: 0,
		}
	}

	/// Number of data beats this burst transfers.
	pub fn beats(&self) -> usize
	{
		self.len as usize + 1
	}

	/// Field values in wire order.
	fn fields(&self) -> [FieldValue; 12]
	{
		[
			FieldValue::Decimal(self.id.into()),
			FieldValue::Hex(self.addr),
			FieldValue::Decimal(self.len.into()),
			FieldValue::Decimal(self.size.into()),
			FieldValue::Decimal(self.burst.into()),
			FieldValue::Decimal(self.lock.into()),
			FieldValue::Decimal(self.cache.into()),
			FieldValue::Decimal(self.prot.into()),
			FieldValue::Decimal(self.qos.into()),
			FieldValue::Decimal(self.region.into()),
			self.atop
				.map_or(FieldValue::Omitted, |atop| FieldValue::Decimal(atop.into())),
			FieldValue::Decimal(self.user.into()),
		]
	}

	pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()>
	{
		for field in self.fields() {
			field.write_line(out)?;
		}
		Ok(())
	}
}

/// One write data channel beat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WBeat
{
	/// Built from [`DATA_NIBBLES`] hex characters, most significant first.
	pub data: u32,
	/// Built from [`STRB_NIBBLES`] hex characters, most significant first.
	pub strb: u8,
	pub user: u32,
}

impl WBeat
{
	pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()>
	{
		writeln!(
			out,
			"0x{:0data_width$x} 0x{:0strb_width$x} {}",
			self.data,
			self.strb,
			self.user,
			data_width = DATA_NIBBLES,
			strb_width = STRB_NIBBLES,
		)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	fn render(transaction: &AxTransaction) -> String
	{
		let mut buffer = Vec::new();
		transaction.write_to(&mut buffer).unwrap();
		String::from_utf8(buffer).unwrap()
	}

	#[test]
	fn read_record_has_no_atop_line()
	{
		let record = render(&AxTransaction::incr(0, 3, Direction::Read));

		assert_eq!(record, "0\n0x100\n3\n2\n1\n0\n2\n0\n0\n0\n0\n");
		assert_eq!(record.lines().count(), 11);
	}

	#[test]
	fn write_record_inserts_atop_before_user()
	{
		let record = render(&AxTransaction::incr(1, 0, Direction::Write));

		assert_eq!(record, "0\n0x140\n0\n2\n1\n0\n2\n0\n0\n0\n0\n0\n");
		assert_eq!(record.lines().count(), 12);
	}

	#[test]
	fn address_advances_by_stride()
	{
		let transaction = AxTransaction::incr(16, 255, Direction::Write);

		assert_eq!(transaction.addr, 0x500);
		assert_eq!(transaction.beats(), 256);
		assert!(render(&transaction).starts_with("0\n0x500\n255\n"));
	}

	#[test]
	fn beat_keeps_leading_zeros()
	{
		let beat = WBeat {
			data: 0x00ab_0c01,
			strb: 0x0f,
			user: 0,
		};
		let mut buffer = Vec::new();
		beat.write_to(&mut buffer).unwrap();

		assert_eq!(String::from_utf8(buffer).unwrap(), "0x00ab0c01 0x0f 0\n");
	}

	#[test]
	fn direction_flag_is_truthy()
	{
		assert_eq!(Direction::from_flag(0), Direction::Read);
		assert_eq!(Direction::from_flag(1), Direction::Write);
		assert_eq!(Direction::from_flag(-3), Direction::Write);
	}
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

use std::io::Write;

use super::{BLOCK_NAME, REG_WIDTH, RegisterLayout, RegisterMap, SOURCE_COPYRIGHT, SOURCE_LICENSE, SOURCE_SPDX, Slot};

/// Render the C register defines software uses to program the unit.
///
/// Names and layout match the register tool's generated `axi_rt_regs.h`.
pub fn write_c_header(map: &RegisterMap, out: &mut impl Write) -> std::io::Result<()>
{
	let prefix = BLOCK_NAME.to_uppercase();
	let guard = format!("_{}_REG_DEFS_", prefix);

	writeln!(out, "// Generated register defines for {}", BLOCK_NAME)?;
	writeln!(out)?;
	writeln!(out, "// Copyright information found in source file:")?;
	writeln!(out, "// {}", SOURCE_COPYRIGHT)?;
	writeln!(out)?;
	writeln!(out, "// Licensing information found in source file:")?;
	writeln!(out, "// {}", SOURCE_LICENSE)?;
	writeln!(out, "// {}", SOURCE_SPDX)?;
	writeln!(out)?;
	writeln!(out, "#ifndef {}", guard)?;
	writeln!(out, "#define {}", guard)?;
	writeln!(out)?;
	writeln!(out, "#ifdef __cplusplus")?;
	writeln!(out, "extern \"C\" {{")?;
	writeln!(out, "#endif")?;

	for param in map.params().param_list() {
		writeln!(out, "// {}", param.desc)?;
		writeln!(out, "#define {}_PARAM_{} {}", prefix, upper_snake(param.name), param.value)?;
		writeln!(out)?;
	}
	writeln!(out, "// Register width")?;
	writeln!(out, "#define {}_PARAM_REG_WIDTH {}", prefix, REG_WIDTH)?;
	writeln!(out)?;

	for entry in map.layout() {
		write_register(&prefix, &entry, out)?;
	}

	writeln!(out, "#ifdef __cplusplus")?;
	writeln!(out, "}}  // extern \"C\"")?;
	writeln!(out, "#endif")?;
	writeln!(out, "#endif  // {}", guard)?;
	// The register tool does not terminate the final line
	write!(out, "// End generated register defines for {}", BLOCK_NAME)
}

fn write_register(prefix: &str, entry: &RegisterLayout, out: &mut impl Write) -> std::io::Result<()>
{
	let register = entry.register;
	let name = format!("{}_{}", prefix, register.name.to_uppercase());

	if !register.is_multireg() {
		let offset = entry.slots.first().map_or(0, |slot| slot.offset);
		writeln!(out, "// {}", register.desc)?;
		writeln!(out, "#define {}_REG_OFFSET {:#x}", name, offset)?;
		writeln!(out)?;
		return Ok(());
	}

	let field_name = format!("{}_{}", name, register.field.name.to_uppercase());
	writeln!(out, "// {} (common parameters)", register.desc)?;
	writeln!(out, "#define {}_FIELD_WIDTH {}", field_name, register.field.width)?;
	writeln!(out, "#define {}_FIELDS_PER_REG {}", field_name, register.fields_per_reg())?;
	writeln!(out, "#define {}_MULTIREG_COUNT {}", name, entry.slots.len())?;
	writeln!(out)?;

	for slot in &entry.slots {
		writeln!(out, "// {}", register.desc)?;
		match slot.instance {
			Some(instance) => writeln!(out, "#define {}_{}_REG_OFFSET {:#x}", name, instance, slot.offset)?,
			None => writeln!(out, "#define {}_REG_OFFSET {:#x}", name, slot.offset)?,
		}
		// Registers holding a single full-width field get no field defines
		if register.fields_per_reg() > 1 {
			write_packed_fields(&field_name, register.field.width, register.fields_per_reg(), slot, out)?;
		}
		writeln!(out)?;
	}
	Ok(())
}

fn write_packed_fields(
	field_name: &str, width: u32, per_reg: u64, slot: &Slot, out: &mut impl Write,
) -> std::io::Result<()>
{
	for index in slot.fields.clone() {
		let lsb = (index % per_reg) * u64::from(width);
		let name = format!("{}_{}", field_name, index);
		if width == 1 {
			writeln!(out, "#define {}_BIT {}", name, lsb)?;
		} else {
			writeln!(out, "#define {}_MASK {:#x}", name, (1u64 << width) - 1)?;
			writeln!(out, "#define {}_OFFSET {}", name, lsb)?;
			writeln!(out, "#define {}_FIELD \\", name)?;
			writeln!(
				out,
				"  ((bitfield_field32_t) {{ .mask = {}_MASK, .index = {}_OFFSET }})",
				name, name
			)?;
		}
	}
	Ok(())
}

/// `NumMrg` -> `NUM_MRG`
fn upper_snake(name: &str) -> String
{
	let mut result = String::with_capacity(name.len() + 4);
	for (index, character) in name.chars().enumerate() {
		if index != 0 && character.is_ascii_uppercase() {
			result.push('_');
		}
		result.push(character.to_ascii_uppercase());
	}
	result
}

// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors

use std::io::Write;

use serde::Serialize;

use super::{BLOCK_NAME, CLOCK_PRIMARY, HwAccess, REG_WIDTH, Register, RegisterMap, SwAccess};

#[derive(Serialize)]
struct Document<'m>
{
	name: &'static str,
	clock_primary: &'static str,
	bus_interfaces: [BusInterface; 1],
	regwidth: u32,
	param_list: Vec<ParamDoc>,
	registers: Vec<Entry<'m>>,
}

#[derive(Serialize)]
struct BusInterface
{
	protocol: &'static str,
	direction: &'static str,
}

#[derive(Serialize)]
struct ParamDoc
{
	name: &'static str,
	desc: &'static str,
	#[serde(rename = "type")]
	kind: &'static str,
	default: String,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Entry<'m>
{
	Single(RegisterDoc<'m>),
	Multi
	{
		multireg: RegisterDoc<'m>,
	},
}

/// Values are strings, as the register tool expects them in hjson.
#[derive(Serialize)]
struct RegisterDoc<'m>
{
	name: &'m str,
	desc: &'m str,
	swaccess: SwAccess,
	#[serde(skip_serializing_if = "Option::is_none")]
	hwaccess: Option<HwAccess>,
	#[serde(skip_serializing_if = "Option::is_none")]
	hwqe: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	hwext: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	count: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	cname: Option<&'m str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	resval: Option<String>,
	fields: [FieldDoc<'m>; 1],
}

#[derive(Serialize)]
struct FieldDoc<'m>
{
	bits: String,
	name: &'m str,
	desc: &'m str,
}

impl<'m> From<&'m Register> for Entry<'m>
{
	fn from(register: &'m Register) -> Self
	{
		let external = register.hw_external.then_some("true");
		let multireg = register.is_multireg();
		let doc = RegisterDoc {
			name: &register.name,
			desc: &register.desc,
			swaccess: register.swaccess,
			hwaccess: register.hwaccess,
			hwqe: external,
			hwext: external,
			count: multireg.then(|| register.multiplicity.param_name()),
			cname: multireg.then_some(register.name.as_str()),
			resval: register.resval.map(|value| value.to_string()),
			fields: [FieldDoc {
				bits: register.field.bits(),
				name: &register.field.name,
				desc: &register.desc,
			}],
		};

		if multireg {
			Self::Multi {
				multireg: doc,
			}
		} else {
			Self::Single(doc)
		}
	}
}

/// Render the register description as plain JSON, for tools without an hjson parser.
///
/// Carries the same content as [`super::write_hjson`].
pub fn write_json(map: &RegisterMap, out: &mut impl Write) -> std::io::Result<()>
{
	let document = Document {
		name: BLOCK_NAME,
		clock_primary: CLOCK_PRIMARY,
		bus_interfaces: [BusInterface {
			protocol: "reg_iface",
			direction: "device",
		}],
		regwidth: REG_WIDTH,
		param_list: map
			.params()
			.param_list()
			.into_iter()
			.map(|param| ParamDoc {
				name: param.name,
				desc: param.desc,
				kind: "int",
				default: param.value.to_string(),
			})
			.collect(),
		registers: map.registers().iter().map(Entry::from).collect(),
	};

	serde_json::to_writer_pretty(&mut *out, &document)?;
	writeln!(out)
}

#[cfg(test)]
mod tests
{
	use serde_json::Value;

	use super::*;
	use crate::regmap::{RegMapParams, Version};

	fn render() -> Value
	{
		let version: Version = "0.3.2".parse().unwrap();
		let map = RegisterMap::new(RegMapParams::new(2, 3, version).unwrap());
		let mut buffer = Vec::new();
		write_json(&map, &mut buffer).unwrap();
		serde_json::from_slice(&buffer).unwrap()
	}

	#[test]
	fn document_header()
	{
		let document = render();

		assert_eq!(document["name"], "axi_rt");
		assert_eq!(document["regwidth"], 32);
		assert_eq!(document["param_list"][2]["name"], "NumReg");
		assert_eq!(document["param_list"][2]["default"], "6");
		assert_eq!(document["param_list"][0]["type"], "int");
	}

	#[test]
	fn registers_keep_their_shape()
	{
		let document = render();
		let registers = document["registers"].as_array().unwrap();

		assert_eq!(registers.len(), 33);
		assert_eq!(registers[1]["resval"], "3");
		assert!(registers[1].get("hwaccess").is_none());

		let bypassed = &registers[4]["multireg"];
		assert_eq!(bypassed["name"], "rt_bypassed");
		assert_eq!(bypassed["hwaccess"], "hwo");
		assert_eq!(bypassed["hwext"], "true");
		assert_eq!(bypassed["count"], "NumMrg");
		assert_eq!(bypassed["fields"][0]["bits"], "0:0");
		assert!(bypassed.get("resval").is_none());
	}
}

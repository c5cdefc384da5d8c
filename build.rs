// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 AXI-RT tooling contributors
//! The only job of this build script is linking the Visual C runtime statically on
//! Windows, so `axirt-cli` and `gen-stimuli` run on simulation hosts without a
//! redistributable installed. It does nothing on other platforms.

fn main()
{
	static_vcruntime::metabuild();
}

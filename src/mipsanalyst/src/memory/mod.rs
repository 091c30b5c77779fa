/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod debug_interface;
mod debug_snapshot;
mod memory_image;
mod memory_reader;

pub use debug_interface::{DebugInterface, RegisterCategory, RegisterValue};
pub use debug_snapshot::DebugSnapshot;
pub use memory_image::MemoryImage;
pub use memory_reader::MemoryReader;

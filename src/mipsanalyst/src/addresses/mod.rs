/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

pub use rabbitizer::{vram::VramOffset, Vram};

mod address_range;
mod size;

pub use address_range::AddressRange;
pub use size::Size;

/// Something that starts at an address and may know how many bytes it spans.
pub trait SizedAddress {
    fn size(&self) -> Option<Size>;
}

/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use alloc::string::String;
use rabbitizer::{Instruction, InstructionDisplayFlags, InstructionFlags, IsaExtension};

use crate::{
    addresses::{AddressRange, Size, Vram},
    memory::MemoryReader,
    symbols::FunctionSymbol,
};

use super::SymDisplayError;

#[derive(Debug, Clone)]
pub struct FunctionDisplaySettings {
    display_flags: InstructionDisplayFlags,
    line_end: Option<String>,
}

impl FunctionDisplaySettings {
    pub fn new(display_flags: InstructionDisplayFlags) -> Self {
        Self {
            display_flags,
            line_end: None,
        }
    }

    pub fn with_line_end(self, line_end: String) -> Self {
        Self {
            line_end: Some(line_end),
            ..self
        }
    }

    pub(crate) fn line_end(&self) -> &str {
        if let Some(line_end) = &self.line_end {
            line_end
        } else {
            "\n"
        }
    }
}

/// Textual listing of a sized function, decoded straight from memory.
#[derive(Debug, Copy, Clone)]
pub struct FunctionDisplay<'sym, 'rdr, 'flg, R: MemoryReader> {
    sym: &'sym FunctionSymbol,
    reader: &'rdr R,
    settings: &'flg FunctionDisplaySettings,
    range: AddressRange<Vram>,
}

impl<'sym, 'rdr, 'flg, R: MemoryReader> FunctionDisplay<'sym, 'rdr, 'flg, R> {
    pub(crate) fn new(
        sym: &'sym FunctionSymbol,
        reader: &'rdr R,
        settings: &'flg FunctionDisplaySettings,
    ) -> Result<Self, SymDisplayError> {
        let range = sym.vram_range().ok_or(SymDisplayError::SizeUnknown {
            address: sym.address(),
        })?;

        let last_word = range.end() - Size::new(4);
        for address in [range.start(), last_word] {
            if !reader.is_valid_address(address) {
                return Err(SymDisplayError::NotMapped { address });
            }
        }

        Ok(Self {
            sym,
            reader,
            settings,
            range,
        })
    }
}

impl<R: MemoryReader> FunctionDisplay<'_, '_, '_, R> {
    fn display_instruction(
        &self,
        f: &mut fmt::Formatter<'_>,
        instr: &Instruction,
        prev_instr_had_delay_slot: bool,
    ) -> fmt::Result {
        if prev_instr_had_delay_slot {
            write!(f, " ")?;
        }

        write!(
            f,
            "{}{}",
            instr.display::<&str>(&self.settings.display_flags, None, 0),
            self.settings.line_end()
        )
    }
}

impl<R: MemoryReader> fmt::Display for FunctionDisplay<'_, '_, '_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.sym.name();
        let line_end = self.settings.line_end();

        write!(f, ".globl {}{}", name, line_end)?;
        write!(f, "{}:{}", name, line_end)?;

        let flags = InstructionFlags::new_extension(IsaExtension::R5900EE);
        let mut prev_instr_had_delay_slot = false;
        let mut vram = self.range.start();
        while vram < self.range.end() {
            let word = self.reader.read32(vram);
            let instr = Instruction::new(word, vram, flags);

            self.display_instruction(f, &instr, prev_instr_had_delay_slot)?;

            prev_instr_had_delay_slot = instr.opcode().has_delay_slot();
            vram += Size::new(4);
        }

        write!(f, ".end {}{}", name, line_end)
    }
}

impl FunctionSymbol {
    /// Lists the function's code as read from `reader`.
    pub fn display<'sym, 'rdr, 'flg, R: MemoryReader>(
        &'sym self,
        reader: &'rdr R,
        settings: &'flg FunctionDisplaySettings,
    ) -> Result<FunctionDisplay<'sym, 'rdr, 'flg, R>, SymDisplayError> {
        FunctionDisplay::new(self, reader, settings)
    }
}

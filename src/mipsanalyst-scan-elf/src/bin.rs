/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use clap::Parser;
use mipsanalyst::{
    addresses::{Size, Vram},
    analysis::FunctionScanner,
    config::{Endian, ScannerConfig},
    memory::MemoryImage,
    rabbitizer::InstructionDisplayFlags,
    symbols::{display::FunctionDisplaySettings, SymbolDatabase},
};
use object::{
    elf,
    read::elf::{ElfFile32, Sym},
    Object, ObjectSection,
};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::PathBuf,
};
use tracing_subscriber::EnvFilter;

mod elf_memory;
mod elf_section_type;
mod utils;

use elf_memory::ElfMemory;
use elf_section_type::{ElfSectionType, ProgbitsType};

/// mipsanalyst-scan-elf: CLI tool to recover the functions of a MIPS elf file using mipsanalyst
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    input_path: PathBuf,

    /// Compute a hash of the code of every newly found function
    #[clap(long)]
    hashes: bool,

    /// Print a disassembly of every function after the symbol list
    #[clap(long)]
    disasm: bool,

    /// Don't seed the symbol database with the elf's own symbols
    #[clap(long)]
    no_elf_symbols: bool,

    /// Don't treat `jal` targets as function starts
    #[clap(long)]
    no_call_split: bool,
}

struct TextSection {
    name: String,
    vram: Vram,
    size: Size,
}

/// Maps every allocated progbits section and returns the executable ones.
fn load_sections(elf_file: &ElfFile32, endian: Endian) -> (ElfMemory, Vec<TextSection>) {
    let mut memory = ElfMemory::new();
    let mut text_sections = Vec::new();

    for section in elf_file.sections() {
        let sh_flags = section.elf_section_header().sh_flags.get(elf_file.endian());
        let sh_type = section.elf_section_header().sh_type.get(elf_file.endian());
        let name = utils::pretty_unwrap(section.name());

        let progbits = match ElfSectionType::new(sh_type, sh_flags) {
            Some(ElfSectionType::Progbits(progbits)) => progbits,
            Some(ElfSectionType::Nobits) => {
                tracing::trace!("Section {} has no data, skipping it", name);
                continue;
            }
            None => continue,
        };
        if progbits == ProgbitsType::Unknown || section.address() == 0 {
            continue;
        }

        let vram = Vram::new(section.address() as u32);
        let raw_bytes = utils::pretty_unwrap(section.data());
        memory.add_image(MemoryImage::new(vram, raw_bytes.to_vec(), endian));

        if progbits == ProgbitsType::Text {
            text_sections.push(TextSection {
                name: name.to_owned(),
                vram,
                size: Size::new(raw_bytes.len() as u32),
            });
        }
    }

    (memory, text_sections)
}

/// Seeds the database with the elf's symbol table.
///
/// Sized functions are trusted as is; everything else named just becomes a label the scanner can
/// take names from.
fn add_elf_symbols(elf_file: &ElfFile32, database: &mut SymbolDatabase) {
    let elf_endian = elf_file.endian();
    let symtab = elf_file.elf_symbol_table();
    let strtab = symtab.strings();
    let source = utils::pretty_unwrap(database.symbol_source("ELF"));

    for sym in symtab.iter() {
        let st_type = sym.st_type();
        if !matches!(st_type, elf::STT_FUNC | elf::STT_OBJECT | elf::STT_NOTYPE) {
            continue;
        }

        let vram = Vram::new(sym.st_value(elf_endian));
        if vram < Vram::new(0x10) {
            continue;
        }

        let raw_name = utils::pretty_unwrap(sym.name(elf_endian, strtab));
        let name = String::from_utf8_lossy(raw_name);
        if name.is_empty() {
            continue;
        }
        let size = Size::new(sym.st_size(elf_endian));

        let result = if st_type == elf::STT_FUNC {
            database
                .create_function(&name, vram, source)
                .map(|x| x.set_size(size))
        } else {
            let size = if size.is_empty() { None } else { Some(size) };
            let is_junk = name.starts_with(".L") || name.starts_with('$');
            database
                .add_label(&name, vram, size, is_junk, source)
                .map(|_| ())
        };

        if let Err(e) = result {
            tracing::warn!("Ignoring elf symbol: {}", e);
        }
    }
}

/// One `address size name [noreturn] [hash=XXXXXXXX]` line per function.
fn write_symbols<W: Write>(out: &mut W, database: &SymbolDatabase) -> io::Result<()> {
    for function in database.functions() {
        write!(
            out,
            "{:08X} {:08X} {}",
            function.address().inner(),
            function.size().inner(),
            function.name()
        )?;
        if function.is_no_return() {
            write!(out, " noreturn")?;
        }
        if let Some(hash) = function.original_hash() {
            write!(out, " hash={:08X}", hash)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_listings<W: Write>(
    out: &mut W,
    database: &SymbolDatabase,
    memory: &ElfMemory,
) -> io::Result<()> {
    let display_settings = FunctionDisplaySettings::new(InstructionDisplayFlags::new());

    for function in database.functions() {
        match function.display(memory, &display_settings) {
            Ok(display) => {
                writeln!(out)?;
                write!(out, "{}", display)?;
            }
            Err(e) => tracing::warn!("Can't list {}: {}", function.name(), e),
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(utils::pretty_unwrap("mipsanalyst=info".parse())),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    tracing::info!("Reading {:?}", args.input_path);
    let binary_data = {
        let mut buf = Vec::new();
        let f = utils::pretty_unwrap(File::open(&args.input_path));
        utils::pretty_unwrap(BufReader::new(f).read_to_end(&mut buf));
        buf
    };
    let elf_file = utils::read_elf(&binary_data);
    let endian = utils::endian_to_endian(elf_file.endian());

    let (memory, text_sections) = load_sections(&elf_file, endian);

    let mut database = SymbolDatabase::new();
    if !args.no_elf_symbols {
        add_elf_symbols(&elf_file, &mut database);
        tracing::info!("Loaded {} functions from the elf", database.function_count());
    }

    let config = ScannerConfig::new().with_split_at_call_targets(!args.no_call_split);
    let scanner = FunctionScanner::new(config);

    for section in &text_sections {
        if section.size.inner() < 4 {
            continue;
        }

        let end = Size::new((section.size.inner() - 4) & !3).add_vram(&section.vram);
        tracing::info!("Scanning {} [0x{}, 0x{}]", section.name, section.vram, end);

        scanner.scan_for_functions(&mut database, &memory, section.vram, end, args.hashes);
    }
    tracing::info!("{} functions in total", database.function_count());

    let mut out = BufWriter::new(io::stdout().lock());

    utils::pretty_unwrap(write_symbols(&mut out, &database));
    if args.disasm {
        utils::pretty_unwrap(write_listings(&mut out, &database, &memory));
    }
    utils::pretty_unwrap(out.flush());
}

/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{collections::btree_map::BTreeMap, sync::Arc, vec::Vec};

use crate::{
    addresses::{AddressRange, Size, Vram},
    collections::addended_ordered_map::{AddendedOrderedMap, FindSettings},
};

use super::{
    FunctionSymbol, LabelSymbol, SymbolDatabaseError, SymbolSource, SymbolSourceHandle,
};

/// Function and label symbols known about a program, indexed by address.
///
/// There's at most one function and one label starting at any given address, and function names
/// are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolDatabase {
    sources: Vec<SymbolSource>,
    functions: AddendedOrderedMap<Vram, FunctionSymbol>,
    function_names: BTreeMap<Arc<str>, Vram>,
    labels: AddendedOrderedMap<Vram, LabelSymbol>,
}

impl SymbolDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SymbolDatabase {
    /// Returns the handle of the source called `name`, registering it first if needed.
    pub fn symbol_source(&mut self, name: &str) -> Result<SymbolSourceHandle, SymbolDatabaseError> {
        if name.is_empty() {
            return Err(SymbolDatabaseError::EmptyName { address: None });
        }

        if let Some(index) = self.sources.iter().position(|x| x.name() == name) {
            return Ok(SymbolSourceHandle::new(index));
        }

        self.sources.push(SymbolSource::new(name.into()));
        Ok(SymbolSourceHandle::new(self.sources.len() - 1))
    }

    #[must_use]
    pub fn source(&self, handle: SymbolSourceHandle) -> Option<&SymbolSource> {
        self.sources.get(handle.index())
    }

    fn check_source(&self, handle: SymbolSourceHandle) -> Result<(), SymbolDatabaseError> {
        if self.source(handle).is_some() {
            Ok(())
        } else {
            Err(SymbolDatabaseError::UnknownSource { handle })
        }
    }
}

impl SymbolDatabase {
    /// Creates a sizeless function symbol.
    ///
    /// Fails if the name is empty or already taken by another function, or if another function
    /// already starts at `address`.
    pub fn create_function(
        &mut self,
        name: &str,
        address: Vram,
        source: SymbolSourceHandle,
    ) -> Result<&mut FunctionSymbol, SymbolDatabaseError> {
        self.check_source(source)?;

        if name.is_empty() {
            return Err(SymbolDatabaseError::EmptyName {
                address: Some(address),
            });
        }
        if let Some(existing) = self.function_at(address) {
            return Err(SymbolDatabaseError::AddressInUse {
                address,
                existing_name: existing.name().into(),
            });
        }
        if let Some(existing_address) = self.function_names.get(name) {
            return Err(SymbolDatabaseError::DuplicateName {
                name: name.into(),
                address,
                existing_address: *existing_address,
            });
        }

        let name: Arc<str> = name.into();
        self.function_names.insert(name.clone(), address);
        Ok(self.functions.find_mut_or_insert_with(
            address,
            FindSettings::new(false),
            || (address, FunctionSymbol::new(name, address, source)),
        ))
    }

    /// Function starting exactly at `address`.
    #[must_use]
    pub fn function_at(&self, address: Vram) -> Option<&FunctionSymbol> {
        self.functions.find(&address, FindSettings::new(false))
    }

    #[must_use]
    pub fn function_at_mut(&mut self, address: Vram) -> Option<&mut FunctionSymbol> {
        self.functions.find_mut(&address, FindSettings::new(false))
    }

    #[must_use]
    pub fn function_named(&self, name: &str) -> Option<&FunctionSymbol> {
        self.function_names
            .get(name)
            .and_then(|address| self.function_at(*address))
    }

    /// Sized function whose range contains `address`.
    #[must_use]
    pub fn function_containing(&self, address: Vram) -> Option<&FunctionSymbol> {
        self.functions
            .find(&address, FindSettings::new(true))
            .filter(|x| !x.size().is_empty())
    }

    /// Functions in address order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionSymbol> {
        self.functions.values()
    }

    #[must_use]
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

impl SymbolDatabase {
    /// Adds a label, or returns the one already at `address`.
    ///
    /// An existing junk label is replaced if the new one isn't junk.
    pub fn add_label(
        &mut self,
        name: &str,
        address: Vram,
        size: Option<Size>,
        is_junk: bool,
        source: SymbolSourceHandle,
    ) -> Result<&mut LabelSymbol, SymbolDatabaseError> {
        self.check_source(source)?;

        if name.is_empty() {
            return Err(SymbolDatabaseError::EmptyName {
                address: Some(address),
            });
        }

        let new_label = || LabelSymbol::new(name.into(), address, size, is_junk, source);

        let label =
            self.labels
                .find_mut_or_insert_with(address, FindSettings::new(false), || {
                    (address, new_label())
                });
        if label.does_new_take_precedence(is_junk) {
            *label = new_label();
        }

        Ok(label)
    }

    /// Label starting exactly at `address`.
    #[must_use]
    pub fn label_at(&self, address: Vram) -> Option<&LabelSymbol> {
        self.labels.find(&address, FindSettings::new(false))
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelSymbol> {
        self.labels.values()
    }
}

impl SymbolDatabase {
    /// Range of the sized function or label that contains `address`, if any.
    ///
    /// Sizeless symbols don't claim anything.
    #[must_use]
    pub fn claimed_range_covering(&self, address: Vram) -> Option<AddressRange<Vram>> {
        let settings = FindSettings::new(true);

        self.functions
            .find(&address, settings)
            .and_then(|x| x.vram_range())
            .or_else(|| {
                self.labels
                    .find(&address, settings)
                    .and_then(|x| x.vram_range())
            })
            .filter(|range| range.in_range(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn sources_are_deduplicated() {
        let mut db = SymbolDatabase::new();

        let a = db.symbol_source("Function Scanner").unwrap();
        let b = db.symbol_source("ELF").unwrap();
        let c = db.symbol_source("Function Scanner").unwrap();

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(db.source(b).map(|x| x.name()), Some("ELF"));
        assert_eq!(
            db.symbol_source(""),
            Err(SymbolDatabaseError::EmptyName { address: None })
        );
    }

    #[test]
    fn function_creation_rules() {
        let mut db = SymbolDatabase::new();
        let source = db.symbol_source("test").unwrap();

        db.create_function("main", Vram::new(0x00100000), source)
            .unwrap()
            .set_size(Size::new(0x20));

        assert!(matches!(
            db.create_function("other", Vram::new(0x00100000), source),
            Err(SymbolDatabaseError::AddressInUse { .. })
        ));
        assert!(matches!(
            db.create_function("main", Vram::new(0x00100100), source),
            Err(SymbolDatabaseError::DuplicateName { .. })
        ));
        assert!(matches!(
            db.create_function("", Vram::new(0x00100100), source),
            Err(SymbolDatabaseError::EmptyName { .. })
        ));
        assert!(matches!(
            db.create_function("x", Vram::new(0x00100100), SymbolSourceHandle::new(7)),
            Err(SymbolDatabaseError::UnknownSource { .. })
        ));

        assert_eq!(db.function_count(), 1);
        assert_eq!(
            db.function_named("main").map(|x| x.address()),
            Some(Vram::new(0x00100000))
        );
        assert!(db.function_named("other").is_none());
        assert_eq!(
            db.function_containing(Vram::new(0x0010001C))
                .map(|x| x.name()),
            Some("main")
        );
        assert_eq!(db.function_containing(Vram::new(0x00100020)), None);
    }

    #[test]
    fn real_labels_replace_junk_ones() {
        let mut db = SymbolDatabase::new();
        let source = db.symbol_source("test").unwrap();

        db.add_label(".L1", Vram::new(0x1000), None, true, source)
            .unwrap();
        db.add_label("func", Vram::new(0x1000), None, false, source)
            .unwrap();
        db.add_label(".L2", Vram::new(0x1000), None, true, source)
            .unwrap();

        let label = db.label_at(Vram::new(0x1000)).unwrap();
        assert_eq!(label.name(), "func");
        assert!(!label.is_junk());
    }

    #[test]
    fn claimed_ranges() {
        let mut db = SymbolDatabase::new();
        let source = db.symbol_source("test").unwrap();

        db.create_function("sizeless", Vram::new(0x1000), source)
            .unwrap();
        db.add_label("table", Vram::new(0x2000), Some(Size::new(0x10)), false, source)
            .unwrap();

        assert_eq!(db.claimed_range_covering(Vram::new(0x1000)), None);
        assert_eq!(
            db.claimed_range_covering(Vram::new(0x200C)),
            Some(AddressRange::new(Vram::new(0x2000), Vram::new(0x2010)))
        );
        assert_eq!(db.claimed_range_covering(Vram::new(0x2010)), None);
    }
}

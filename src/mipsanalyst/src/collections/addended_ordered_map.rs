/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::collections::btree_map::{self, BTreeMap};
use core::ops::{Add, RangeBounds};

use ::polonius_the_crab::prelude::*;

use crate::addresses::{Size, SizedAddress};

pub type Range<'a, K, V> = btree_map::Range<'a, K, V>;

/// Ordered map where a key can also be found through any address inside the value's size.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AddendedOrderedMap<K, V>
where
    K: Ord,
    V: SizedAddress,
{
    inner: BTreeMap<K, V>,
}

impl<K, V> AddendedOrderedMap<K, V>
where
    K: Ord,
    V: SizedAddress,
{
    pub const fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }
}

impl<K, V> AddendedOrderedMap<K, V>
where
    K: Ord + Copy + Add<Size, Output = K>,
    V: SizedAddress,
{
    #[must_use]
    pub fn find(&self, key: &K, settings: FindSettings) -> Option<&V> {
        if !settings.allow_addend {
            self.inner.get(key)
        } else {
            let (other_key, v) = self.inner.range(..=key).next_back()?;

            if other_key == key {
                Some(v)
            } else if let Some(siz) = v.size() {
                if *key < *other_key + siz {
                    Some(v)
                } else {
                    None
                }
            } else if !settings.reject_sizeless_addended {
                Some(v)
            } else {
                None
            }
        }
    }

    #[must_use]
    pub fn find_mut(&mut self, key: &K, settings: FindSettings) -> Option<&mut V> {
        if !settings.allow_addend {
            self.inner.get_mut(key)
        } else {
            let (other_key, v) = self.inner.range_mut(..=key).next_back()?;

            if other_key == key {
                Some(v)
            } else if let Some(siz) = v.size() {
                if *key < *other_key + siz {
                    Some(v)
                } else {
                    None
                }
            } else if !settings.reject_sizeless_addended {
                Some(v)
            } else {
                None
            }
        }
    }

    pub fn find_mut_or_insert_with<F>(
        &mut self,
        key: K,
        settings: FindSettings,
        default: F,
    ) -> &mut V
    where
        F: FnOnce() -> (K, V),
    {
        add_impl(self, key, settings, default)
    }

    /// Returns the previous value if `key` was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

fn add_impl<'slf, K, V, F>(
    mut slf: &'slf mut AddendedOrderedMap<K, V>,
    key: K,
    settings: FindSettings,
    default: F,
) -> &'slf mut V
where
    K: Ord + Copy + Add<Size, Output = K>,
    V: SizedAddress,
    F: FnOnce() -> (K, V),
{
    // TODO: get rid of the polonius stuff when the new borrow checker has been released.

    polonius!(|slf| -> &'polonius mut V {
        if let Some(x) = slf.find_mut(&key, settings) {
            polonius_return!(x);
        }
    });

    let (k, v) = default();
    slf.inner.entry(k).or_insert(v)
}

impl<K, V> AddendedOrderedMap<K, V>
where
    K: Ord,
    V: SizedAddress,
{
    pub fn iter(&self) -> btree_map::Iter<K, V> {
        self.inner.iter()
    }

    pub fn range<R>(&self, range: R) -> Range<'_, K, V>
    where
        R: RangeBounds<K>,
    {
        self.inner.range(range)
    }

    pub fn keys(&self) -> btree_map::Keys<K, V> {
        self.inner.keys()
    }

    pub fn values(&self) -> btree_map::Values<K, V> {
        self.inner.values()
    }
}

impl<K, V> Default for AddendedOrderedMap<K, V>
where
    K: Ord,
    V: SizedAddress,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V> IntoIterator for &'a AddendedOrderedMap<K, V>
where
    K: Ord,
    V: SizedAddress,
{
    type Item = (&'a K, &'a V);
    type IntoIter = btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FindSettings {
    allow_addend: bool,
    reject_sizeless_addended: bool,
}

impl FindSettings {
    pub const fn new(allow_addend: bool) -> Self {
        Self {
            allow_addend,
            reject_sizeless_addended: true,
        }
    }

    pub const fn with_allow_addend(self, allow_addend: bool) -> Self {
        Self {
            allow_addend,
            ..self
        }
    }

    pub const fn with_reject_sizeless_addended(self, reject_sizeless_addended: bool) -> Self {
        Self {
            reject_sizeless_addended,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addresses::Vram;

    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Sym(Vram, Option<Size>);

    impl SizedAddress for Sym {
        fn size(&self) -> Option<Size> {
            self.1
        }
    }

    #[test]
    fn find_with_and_without_addend() {
        let mut map = AddendedOrderedMap::new();
        map.insert(Vram::new(0x1000), Sym(Vram::new(0x1000), Some(Size::new(8))));
        map.insert(Vram::new(0x1010), Sym(Vram::new(0x1010), None));

        assert_eq!(
            map.find(&Vram::new(0x1004), FindSettings::new(true)).map(|x| x.0),
            Some(Vram::new(0x1000))
        );
        assert_eq!(map.find(&Vram::new(0x1004), FindSettings::new(false)), None);
        assert_eq!(map.find(&Vram::new(0x1008), FindSettings::new(true)), None);
        assert_eq!(map.find(&Vram::new(0x1014), FindSettings::new(true)), None);
        assert_eq!(
            map.find(
                &Vram::new(0x1014),
                FindSettings::new(true).with_reject_sizeless_addended(false)
            )
            .map(|x| x.0),
            Some(Vram::new(0x1010))
        );
        assert_eq!(map.find(&Vram::new(0x0FFC), FindSettings::new(true)), None);
    }

    #[test]
    fn insert_only_when_missing() {
        let mut map = AddendedOrderedMap::new();
        map.insert(Vram::new(0x1000), Sym(Vram::new(0x1000), Some(Size::new(8))));

        let existing = map.find_mut_or_insert_with(Vram::new(0x1004), FindSettings::new(true), || {
            (Vram::new(0x1004), Sym(Vram::new(0x1004), None))
        });
        assert_eq!(existing.0, Vram::new(0x1000));
        assert_eq!(map.len(), 1);

        let new = map.find_mut_or_insert_with(Vram::new(0x1008), FindSettings::new(true), || {
            (Vram::new(0x1008), Sym(Vram::new(0x1008), None))
        });
        assert_eq!(new.0, Vram::new(0x1008));
        assert_eq!(map.len(), 2);
    }
}

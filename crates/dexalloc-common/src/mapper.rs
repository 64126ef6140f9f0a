//! The result of register allocation: a mapping from SSA registers to slots in
//! the target register frame.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::register::{Category, Reg};

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum MapperError {
    #[error("register {0} was never mapped")]
    UnknownRegister(Reg),
}

/// A single mapped register: the first slot it occupies and its width.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Mapping {
    pub slot: usize,
    pub category: Category,
}

impl Mapping {
    /// One past the last slot occupied.
    pub fn end(&self) -> usize {
        self.slot + self.category.width()
    }

    pub fn overlaps(&self, other: &Mapping) -> bool {
        self.slot < other.end() && other.slot < self.end()
    }
}

/// An immutable mapping from SSA registers to target slots.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegisterMapper {
    mappings: BTreeMap<Reg, Mapping>,
    register_count: usize,
}

impl RegisterMapper {
    pub fn get(&self, reg: Reg) -> Option<Mapping> {
        self.mappings.get(&reg).copied()
    }

    pub fn slot_for(&self, reg: Reg) -> Result<usize, MapperError> {
        self.get(reg)
            .map(|mapping| mapping.slot)
            .ok_or(MapperError::UnknownRegister(reg))
    }

    pub fn category_for(&self, reg: Reg) -> Result<Category, MapperError> {
        self.get(reg)
            .map(|mapping| mapping.category)
            .ok_or(MapperError::UnknownRegister(reg))
    }

    /// The number of slots needed to hold every mapped register.
    pub fn register_count(&self) -> usize {
        self.register_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (Reg, Mapping)> + '_ {
        self.mappings.iter().map(|(reg, mapping)| (*reg, *mapping))
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Produce a new mapper with every slot passed through `f`.
    #[must_use]
    pub fn map_slots(&self, mut f: impl FnMut(Reg, Mapping) -> usize) -> RegisterMapper {
        let mut builder = MapperBuilder::new();
        for (reg, mapping) in self.iter() {
            builder.add(reg, f(reg, mapping), mapping.category);
        }

        builder.build()
    }
}

#[derive(Debug, Default)]
pub struct MapperBuilder {
    mappings: BTreeMap<Reg, Mapping>,
}

impl MapperBuilder {
    pub fn new() -> Self {
        Self {
            mappings: BTreeMap::new(),
        }
    }

    /// Map `reg` to `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `reg` has already been mapped.
    pub fn add(&mut self, reg: Reg, slot: usize, category: Category) {
        assert!(
            self.mappings
                .insert(reg, Mapping { slot, category })
                .is_none(),
            "{reg} mapped twice"
        );
    }

    pub fn get(&self, reg: Reg) -> Option<Mapping> {
        self.mappings.get(&reg).copied()
    }

    pub fn contains(&self, reg: Reg) -> bool {
        self.mappings.contains_key(&reg)
    }

    pub fn build(self) -> RegisterMapper {
        let register_count = self
            .mappings
            .values()
            .map(Mapping::end)
            .max()
            .unwrap_or(0);

        RegisterMapper {
            mappings: self.mappings,
            register_count,
        }
    }
}

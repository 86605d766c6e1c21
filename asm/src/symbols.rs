use arch::reg::{self, ADDR_MAX, VAR_BASE};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::error::Error;

static PREDEFINED: Lazy<IndexMap<String, u16>> = Lazy::new(|| reg::predefined().collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Predefined,
    Label,
    Variable,
}

/// Name to address map of one assembly unit.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    table: IndexMap<String, (SymbolKind, u16)>,
    next_var: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        let table = PREDEFINED
            .iter()
            .map(|(name, addr)| (name.clone(), (SymbolKind::Predefined, *addr)))
            .collect();
        SymbolTable {
            table,
            next_var: VAR_BASE,
        }
    }

    /// Bind a label. Overwrites user symbols, never a predefined one.
    pub fn add_entry(&mut self, name: &str, addr: u16) {
        if self.kind(name) == Some(SymbolKind::Predefined) {
            return;
        }
        self.table
            .insert(name.to_string(), (SymbolKind::Label, addr));
    }

    /// Allocate the next free variable address for `name`.
    /// The caller checks `contains(name)` first.
    pub fn add_variable(&mut self, name: &str) -> Result<u16, Error> {
        let addr = self.next_var;
        if addr > ADDR_MAX {
            return Err(Error::AddressSpaceOverflow(name.to_string()));
        }
        self.table
            .insert(name.to_string(), (SymbolKind::Variable, addr));
        self.next_var += 1;
        Ok(addr)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn get_address(&self, name: &str) -> Option<u16> {
        self.table.get(name).map(|(_, addr)| *addr)
    }

    pub fn kind(&self, name: &str) -> Option<SymbolKind> {
        self.table.get(name).map(|(kind, _)| *kind)
    }

    /// Entries in insertion order: predefined, then labels and variables as seen.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolKind, u16)> {
        self.table
            .iter()
            .map(|(name, (kind, addr))| (name.as_str(), *kind, *addr))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

//! Compilation unit container

use crate::{FuncId, Function};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One compilation unit: every function declared in a single source file,
/// indexed densely by `FuncId`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Unit {
    functions: Vec<Function>,
    by_name: HashMap<String, FuncId>,
}

impl Unit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a function, assigning its id. Returns `None` if a function
    /// with the same name already exists.
    pub fn insert(&mut self, mut function: Function) -> Option<FuncId> {
        if self.by_name.contains_key(&function.name) {
            return None;
        }

        let id = FuncId(self.functions.len() as u32);
        function.id = id;
        self.by_name.insert(function.name.clone(), id);
        self.functions.push(function);
        Some(id)
    }

    /// Get a function by id
    pub fn get(&self, id: FuncId) -> Option<&Function> {
        self.functions.get(id.0 as usize)
    }

    /// Get a mutable function by id
    pub fn get_mut(&mut self, id: FuncId) -> Option<&mut Function> {
        self.functions.get_mut(id.0 as usize)
    }

    /// Get a function by name
    pub fn get_by_name(&self, name: &str) -> Option<&Function> {
        self.by_name.get(name).map(|id| &self.functions[id.0 as usize])
    }

    /// Get the id for a function name
    pub fn id_of(&self, name: &str) -> Option<FuncId> {
        self.by_name.get(name).copied()
    }

    /// Check if a function exists by name
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterate over all functions in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter()
    }

    /// Iterate over all functions mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Function> {
        self.functions.iter_mut()
    }

    /// Number of functions in the unit
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

// Maskrs Field Registry
// Explicit storage for bound fields, keyed by a host-chosen id

use std::collections::HashMap;
use std::fmt;

use crate::field::MaskedField;

/// Host-side identity of a bound input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u64);

impl From<u64> for FieldId {
    fn from(id: u64) -> Self {
        FieldId(id)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// Map from field id to its mask binding
///
/// Binding a field twice replaces the earlier binding, so reconfiguring an
/// input never leaves two masks fighting over it.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: HashMap<FieldId, MaskedField>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bind `field` to `id`, returning the binding it replaced
    pub fn bind(&mut self, id: FieldId, field: MaskedField) -> Option<MaskedField> {
        let previous = self.fields.insert(id, field);
        if previous.is_some() {
            log::debug!("{} rebound, previous mask discarded", id);
        }
        previous
    }

    pub fn get(&self, id: FieldId) -> Option<&MaskedField> {
        self.fields.get(&id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut MaskedField> {
        self.fields.get_mut(&id)
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Remove the binding and hand back the field's clean value
    pub fn unbind(&mut self, id: FieldId) -> Option<String> {
        self.fields.remove(&id).map(MaskedField::unmask)
    }

    /// Bound ids in ascending order
    pub fn ids(&self) -> Vec<FieldId> {
        let mut ids: Vec<FieldId> = self.fields.keys().copied().collect();
        ids.sort();
        ids
    }
}

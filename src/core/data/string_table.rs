use std::{borrow::Cow, collections::BTreeMap};

use super::TextId;

/// Identifier → text mapping parsed from one `.tra` file.
///
/// Entries iterate in ascending identifier order so sheets are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    texts: BTreeMap<TextId, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a text, handing it back when the id is already defined.
    ///
    /// The table never overwrites: the caller decides how a duplicate fails.
    pub fn insert(&mut self, id: TextId, text: String) -> Result<(), String> {
        match self.texts.entry(id) {
            std::collections::btree_map::Entry::Occupied(_) => Err(text),
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(text);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: TextId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: TextId) -> bool {
        self.texts.contains_key(&id)
    }

    /// Resolve an id, falling back to a `#MISSING(@id)` placeholder.
    pub fn text(&self, id: TextId) -> Cow<'_, str> {
        match self.texts.get(&id) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(missing_placeholder(id)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextId, &str)> {
        self.texts.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

impl FromIterator<(TextId, String)> for StringTable {
    /// Later duplicates are dropped; use [`StringTable::insert`] to detect them.
    fn from_iter<I: IntoIterator<Item = (TextId, String)>>(iter: I) -> Self {
        let mut table = StringTable::new();
        for (id, text) in iter {
            let _ = table.insert(id, text);
        }
        table
    }
}

pub fn missing_placeholder(id: TextId) -> String {
    format!("#MISSING(@{})", id)
}

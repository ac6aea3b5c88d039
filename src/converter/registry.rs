use std::collections::HashMap;

/// Outcome of registering a record name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// First occurrence; the record body must be emitted.
    New,
    /// Same record seen again; emit a short reference.
    Emitted,
    /// A different title already sanitized to this full name.
    Conflict { existing: String },
}

/// Fully qualified record names whose body has been emitted in this run,
/// each with the title it was emitted from.
///
/// A name is registered before its fields are converted, so a record that
/// reaches itself again (directly or through other records) finds its own
/// entry and is emitted as a short reference. Entries are never removed.
#[derive(Debug, Default)]
pub struct RecordRegistry {
    emitted: HashMap<String, String>,
}

impl RecordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `fullname` as emitted from `title`.
    pub fn register(&mut self, fullname: &str, title: &str) -> Registration {
        match self.emitted.get(fullname) {
            Some(existing) if existing == title => Registration::Emitted,
            Some(existing) => Registration::Conflict {
                existing: existing.clone(),
            },
            None => {
                self.emitted.insert(fullname.to_string(), title.to_string());
                Registration::New
            }
        }
    }

    pub fn contains(&self, fullname: &str) -> bool {
        self.emitted.contains_key(fullname)
    }

    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }
}

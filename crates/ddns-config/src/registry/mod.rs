//! Provider registry
//!
//! The registry owns every [`ProviderRecord`] built during a configuration
//! load and hands them to the update engine.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ddns_config::{Cursor, ProviderRegistry};
//!
//! let mut cursor = Cursor::new();
//! let mut next = registry.iterate(&mut cursor, true);
//! while let Some(record) = next {
//!     // check address, send update ...
//!     next = registry.iterate(&mut cursor, false);
//! }
//! ```
//!
//! ## Ordering
//!
//! Records are kept in insertion order. The loader inserts `provider`
//! sections first and `custom` sections after them, each in declaration
//! order.
//!
//! ## Iteration
//!
//! The position of an iteration lives in a [`Cursor`] owned by the caller,
//! not in the registry, so independent iterations never disturb each other.
//! Plain Rust iteration through [`ProviderRegistry::iter`] is also available.

use crate::builder::ProviderBuilder;
use crate::error::SectionError;
use crate::model::SectionRef;
use crate::record::ProviderRecord;
use tracing::debug;

/// Caller-held position in a [`ProviderRegistry`]
///
/// A fresh cursor is unpositioned: advancing it yields nothing until it has
/// been rewound once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: Option<usize>,
}

impl Cursor {
    /// Create an unpositioned cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the current record, if the cursor has been rewound
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

/// Ordered collection of provider records
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    records: Vec<ProviderRecord>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record for `section` and append it
    ///
    /// On failure nothing is inserted and the registry is unchanged.
    pub fn create(
        &mut self,
        section: SectionRef<'_>,
        builder: &ProviderBuilder<'_>,
    ) -> Result<&ProviderRecord, SectionError> {
        let record = builder.build(section)?;
        Ok(self.insert(record))
    }

    /// Append an already built record
    pub fn insert(&mut self, record: ProviderRecord) -> &ProviderRecord {
        debug!("Adding provider {} to registry", record.name());
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Step through the registry with a caller-held cursor
    ///
    /// `reset = true` rewinds to the first record and returns it.
    /// `reset = false` advances and returns the next record. `None` marks
    /// the end of the sequence, an empty registry, or a cursor that was
    /// never rewound.
    pub fn iterate(&self, cursor: &mut Cursor, reset: bool) -> Option<&ProviderRecord> {
        let position = if reset {
            0
        } else {
            let current = cursor.position?;
            (current + 1).min(self.records.len())
        };
        cursor.position = Some(position);
        self.records.get(position)
    }

    /// Iterate records in order
    pub fn iter(&self) -> std::slice::Iter<'_, ProviderRecord> {
        self.records.iter()
    }

    /// Iterate records mutably, e.g. to store encoded passwords
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ProviderRecord> {
        self.records.iter_mut()
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Option<&ProviderRecord> {
        self.records.get(index)
    }

    /// Record named `name`
    pub fn find(&self, name: &str) -> Option<&ProviderRecord> {
        self.records.iter().find(|record| record.name() == name)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Release every record, including encoded passwords
    ///
    /// Returns the number of records released. Safe on an empty registry.
    pub fn destroy_all(&mut self) -> usize {
        let released = self.records.len();
        for record in &mut self.records {
            record.credentials_mut().clear_encoded_password();
        }
        self.records.clear();
        debug!("Released {} provider record(s)", released);
        released
    }
}

impl<'a> IntoIterator for &'a ProviderRegistry {
    type Item = &'a ProviderRecord;
    type IntoIter = std::slice::Iter<'a, ProviderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

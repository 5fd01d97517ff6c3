//! Fixed-capacity strings and lists
//!
//! Provider records keep hostnames, paths, credentials and response patterns
//! in bounded containers. Nothing is ever truncated: a string either fits or
//! is rejected with an [`Overflow`], and a list push either lands or hands the
//! item back through [`Admission::Full`]. Call sites decide whether that is a
//! hard error, a warning or a silent drop.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// A value did not fit into its bounded container
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{len} bytes exceeds capacity of {capacity}")]
pub struct Overflow {
    /// Length of the rejected value
    pub len: usize,
    /// Capacity of the container
    pub capacity: usize,
}

/// A string of at most `N` bytes
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedString<const N: usize>(String);

impl<const N: usize> BoundedString<N> {
    /// Capacity in bytes
    pub const CAPACITY: usize = N;

    /// Admit `value` if it fits, reject it otherwise
    pub fn new(value: impl Into<String>) -> Result<Self, Overflow> {
        let value = value.into();
        if value.len() > N {
            return Err(Overflow {
                len: value.len(),
                capacity: N,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the contents
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> Deref for BoundedString<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> AsRef<str> for BoundedString<N> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> TryFrom<&str> for BoundedString<N> {
    type Error = Overflow;

    fn try_from(value: &str) -> Result<Self, Overflow> {
        Self::new(value)
    }
}

impl<const N: usize> TryFrom<String> for BoundedString<N> {
    type Error = Overflow;

    fn try_from(value: String) -> Result<Self, Overflow> {
        Self::new(value)
    }
}

impl<const N: usize> PartialEq<str> for BoundedString<N> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedString<N> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<const N: usize> fmt::Debug for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> Serialize for BoundedString<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Outcome of pushing onto a [`BoundedList`]
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission<T> {
    /// The item was appended
    Accepted,
    /// The list is at capacity; the item is handed back untouched
    Full(T),
}

impl<T> Admission<T> {
    /// Whether the item was appended
    pub fn is_accepted(&self) -> bool {
        matches!(self, Admission::Accepted)
    }
}

/// An insertion-ordered list of at most `N` items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedList<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> BoundedList<T, N> {
    /// Capacity in entries
    pub const CAPACITY: usize = N;

    /// Create an empty list
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `item` unless the list is full
    ///
    /// Existing entries are never touched by a rejected push.
    pub fn push(&mut self, item: T) -> Admission<T> {
        if self.items.len() >= N {
            return Admission::Full(item);
        }
        self.items.push(item);
        Admission::Accepted
    }

    /// Append items in order until the list is full
    ///
    /// Returns the number of items that did not fit.
    pub fn extend_bounded<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut dropped = 0;
        for item in items {
            if let Admission::Full(_) = self.push(item) {
                dropped += 1;
            }
        }
        dropped
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in insertion order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T, const N: usize> Default for BoundedList<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedList<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize, const N: usize> Serialize for BoundedList<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

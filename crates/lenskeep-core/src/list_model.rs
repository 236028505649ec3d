//! Observable list projection of the profile collection
//!
//! A UI-toolkit-neutral stand-in for a native list model: the backing
//! sequence is exposed through row accessors, and every structural change
//! is reported to observers at the granularity of the rows it touched, so
//! a renderer never has to re-scan the whole list.

use crate::{Error, Result, models::Profile};

/// A structural change to the list, scoped to the rows it affects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// The entire backing sequence was replaced; every previously held
    /// index is invalid and must be re-queried.
    Reset,
    /// Rows `first..=last` were inserted; prior indices remain valid.
    Inserted { first: usize, last: usize },
    /// The row at `index` is about to be removed; it is still present
    /// when the notification is delivered.
    Removed { index: usize },
}

type Observer = Box<dyn FnMut(&ListChange)>;

pub struct ProfileListModel {
    profiles: Vec<Profile>,
    observers: Vec<Observer>,
}

impl ProfileListModel {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles,
            observers: Vec::new(),
        }
    }

    /// Register a callback invoked on every structural change.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&ListChange) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: ListChange) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    pub fn row_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Display value for a row: the profile name.
    pub fn display(&self, row: usize) -> Option<&str> {
        self.profiles.get(row).map(|p| p.name.as_str())
    }

    /// Full entity for a row.
    pub fn profile(&self, row: usize) -> Option<&Profile> {
        self.profiles.get(row)
    }

    /// Replace the entire backing sequence, notifying observers with a
    /// single `Reset`.
    pub fn set_profiles(&mut self, profiles: Vec<Profile>) {
        self.profiles = profiles;
        self.notify(ListChange::Reset);
    }

    /// Append one row at the end, notifying observers with an `Inserted`
    /// covering exactly the new row.
    pub fn append_profile(&mut self, profile: Profile) {
        let row = self.profiles.len();
        self.profiles.push(profile);
        self.notify(ListChange::Inserted {
            first: row,
            last: row,
        });
    }

    /// Remove the first row equal to `profile`, notifying observers with
    /// a `Removed` scoped to that single row.
    pub fn remove_profile(&mut self, profile: &Profile) -> Result<()> {
        let index = self
            .profiles
            .iter()
            .position(|p| p == profile)
            .ok_or_else(|| {
                Error::NotFound(format!("profile '{}' is not in the list", profile.name))
            })?;

        self.notify(ListChange::Removed { index });
        self.profiles.remove(index);
        Ok(())
    }
}

//! The raw option table and its ordered copy.

use std::ffi::{c_char, c_int, CStr};

use crate::error::{Result, RuntimeConfigError};

/// One entry of the native option array.
///
/// Layout matches the C `{ const char *name; int value; }` struct; an entry
/// with a null `name` terminates the array.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ConfigOption {
    pub name: *const c_char,
    pub value: c_int,
}

/// Option name → value, in the order the native table lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTable {
    entries: Vec<(String, i32)>,
}

impl ConfigTable {
    /// Build a table from owned pairs. Names must be unique.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        let mut table = ConfigTable::default();
        for (name, value) in pairs {
            table.insert(name.into(), value)?;
        }
        Ok(table)
    }

    /// Copy a null-name-terminated native option array.
    ///
    /// # Safety
    ///
    /// `options` must point to a readable array of [`ConfigOption`] that ends
    /// with an entry whose `name` is null, and every non-null `name` must be
    /// a valid NUL-terminated string for the duration of the call.
    pub unsafe fn from_raw(options: *const ConfigOption) -> Result<Self> {
        if options.is_null() {
            return Err(RuntimeConfigError::NullTable);
        }

        let mut table = ConfigTable::default();
        let mut index = 0usize;
        loop {
            let option = unsafe { *options.add(index) };
            if option.name.is_null() {
                break;
            }
            let name = unsafe { CStr::from_ptr(option.name) }
                .to_str()
                .map_err(|_| RuntimeConfigError::InvalidName { index })?;
            table.insert(name.to_string(), option.value)?;
            index += 1;
        }

        tracing::debug!(options = table.len(), "read native configuration table");
        Ok(table)
    }

    fn insert(&mut self, name: String, value: i32) -> Result<()> {
        if self.get(&name).is_some() {
            return Err(RuntimeConfigError::DuplicateOption { name });
        }
        self.entries.push((name, value));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Like [`get`](Self::get) but a missing option is an error.
    pub fn require(&self, name: &str) -> Result<i32> {
        self.get(name).ok_or_else(|| RuntimeConfigError::MissingOption {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

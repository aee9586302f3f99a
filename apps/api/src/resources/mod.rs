//! Resources — one generic service + handler set instantiated per record type.
//!
//! Every record family (contacts, enrollments, learnings, skills, posts,
//! progress) gets the same capability set {create, get, list, update, delete}
//! through [`ResourceService<T>`]. The only per-type behavior is the
//! [`UpdatePolicy`] a type declares on [`Resource`]:
//!
//! | Policy              | Existing id                         | Missing id          |
//! |---------------------|-------------------------------------|---------------------|
//! | `MergeFields`       | copy present fields onto stored one | insert under path id |
//! | `ForcedOverwrite`   | replace whole record                | insert under path id |
//! | `GuardedOverwrite`  | replace whole record                | `NotFound`, no write |
//! | `Immutable`         | rejected with `Conflict`            | rejected            |
//!
//! The body's own `id` is always discarded in favor of the path id.

use crate::store::Document;

pub mod handlers;
pub mod posts;
pub mod progress;
pub mod service;

pub use service::ResourceService;

/// How `PUT /<resource>/:id` treats the stored record.
pub enum UpdatePolicy<T> {
    /// Copy the fields present in the request onto the stored record.
    /// Falls back to inserting the request under the path id.
    MergeFields(fn(&mut T, T)),
    /// Replace the stored record with the request, keyed by the path id.
    ForcedOverwrite,
    /// Like `ForcedOverwrite`, but only when a record already exists.
    GuardedOverwrite,
    /// Records cannot be updated once created.
    Immutable,
}

impl<T> UpdatePolicy<T> {
    pub fn allows_update(&self) -> bool {
        !matches!(self, UpdatePolicy::Immutable)
    }
}

/// A record type exposed as a REST resource.
pub trait Resource: Document {
    /// Human-readable name used in log lines and error messages.
    const NAME: &'static str;

    const UPDATE_POLICY: UpdatePolicy<Self>;
}

/// Outcome of a lookup that may legitimately find nothing.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found_or_else<E, F>(self, err: F) -> Result<T, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Lookup::Found(v) => Ok(v),
            Lookup::NotFound => Err(err()),
        }
    }
}

#[cfg(test)]
impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

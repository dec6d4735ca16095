//! Observable cells.
//!
//! A [`Writable`] holds one value, lets its owner replace it with `set` or
//! `update`, and synchronously notifies subscribers. A [`Readable`] is the
//! view handed to everyone else. Cells are explicitly constructed and owned;
//! there is no global registry.

mod writable;

pub use writable::{Readable, Subscription, Writable};

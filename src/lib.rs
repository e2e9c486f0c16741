//! Core library for noted — a single-window, list-based note-taking application.
//!
//! The primary entry points are [`Stores`], which owns the persisted
//! application state across one load/save lifecycle, and [`NoteItemsStore`],
//! the reactive store over the ordered note list. All mutations go through
//! [`NoteItemsStore::dispatch`]; the UI layer subscribes to the store's
//! change streams and renders what they emit.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    error::{NotedError, Result},
    note::{NoteId, NoteItem, NoteItemState},
    observe::Subject,
    ordered_dict::{Identified, OrderedDict},
    store::{Action, NoteItemsStore},
    stores::{store_file_path, Stores, STORE_FILE_ENV},
};

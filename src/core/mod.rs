//! Internal domain modules for the noted core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod error;
pub mod note;
pub mod observe;
pub mod ordered_dict;
pub mod store;
pub mod stores;

#[doc(inline)]
pub use error::{NotedError, Result};
#[doc(inline)]
pub use note::{NoteId, NoteItem, NoteItemState};
#[doc(inline)]
pub use observe::Subject;
#[doc(inline)]
pub use ordered_dict::{Identified, OrderedDict};
#[doc(inline)]
pub use store::{Action, NoteItemsStore};
#[doc(inline)]
pub use stores::{store_file_path, Stores, STORE_FILE_ENV};

use crate::core::ordered_dict::Identified;
use serde::{Deserialize, Serialize};

/// Identifier of a note item. Positive, assigned once by the store's id
/// generator, never reused within a process lifetime.
pub type NoteId = u64;

/// A single editable line in the note list.
///
/// Exactly one item in a store is a placeholder: the trailing empty slot that
/// serves as the "add new item" affordance. Committing text into it (see
/// [`Action::GoNext`](crate::Action::GoNext)) turns it into a real item and
/// appends a fresh placeholder after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteItem {
    pub id: NoteId,
    pub text: String,
    pub is_placeholder: bool,
}

impl NoteItem {
    /// A fresh, empty placeholder item with the given id.
    pub fn placeholder(id: NoteId) -> Self {
        Self {
            id,
            text: String::new(),
            is_placeholder: true,
        }
    }
}

impl Identified for NoteItem {
    type Id = NoteId;

    fn id(&self) -> NoteId {
        self.id
    }
}

/// Render state of one item: the item itself plus whether it currently holds
/// focus. Derived on demand; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItemState {
    pub item: NoteItem,
    pub focus: bool,
}

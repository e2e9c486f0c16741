//! The note-list state store and its action state machine.
//!
//! [`NoteItemsStore`] owns the entire mutable state of the application: an
//! ordered collection of [`NoteItem`]s, the id of the focused item, and a
//! monotonic id generator. All mutation goes through [`NoteItemsStore::dispatch`];
//! reads are either point-in-time ([`NoteItemsStore::note_item`]) or
//! subscription streams that emit on every distinct change.
//!
//! The list always ends in exactly one placeholder item, the empty slot a
//! user types the next note into. Committing text in the placeholder
//! ([`Action::GoNext`]) turns it into a real item and appends a fresh
//! placeholder, so the list can never become empty.

use crate::core::note::{NoteId, NoteItem, NoteItemState};
use crate::core::observe::Subject;
use crate::core::ordered_dict::OrderedDict;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::mpsc::Receiver;

/// A user-intent mutation of the note list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the text of an existing item. Unknown ids are ignored.
    Edit {
        /// Target item.
        id: NoteId,
        /// New full text of the item.
        text: String,
    },
    /// Remove an item, moving focus to a neighbour. The trailing placeholder
    /// is never removed; unknown ids are ignored.
    Remove {
        /// Target item.
        id: NoteId,
    },
    /// Commit the item and advance focus. On a placeholder with non-empty
    /// text this creates the next placeholder; on a real item it moves focus
    /// to the successor. Empty text and unknown ids are ignored.
    GoNext {
        /// Target item.
        id: NoteId,
    },
}

/// The complete store state. This is also the persisted snapshot; its serde
/// representation is the on-disk wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteState {
    note_items: OrderedDict<NoteItem>,
    focus_id: NoteId,
    next_id: NoteId,
}

impl Default for NoteState {
    fn default() -> Self {
        let mut note_items = OrderedDict::new();
        note_items.append(NoteItem::placeholder(1));
        Self {
            note_items,
            focus_id: 1,
            next_id: 2,
        }
    }
}

impl NoteState {
    fn apply(&mut self, action: Action) {
        match action {
            Action::Edit { id, text } => {
                if let Some(item) = self.note_items.get_mut(id) {
                    item.text = text;
                }
            }
            Action::Remove { id } => {
                let Some(is_placeholder) = self.note_items.get(id).map(|i| i.is_placeholder)
                else {
                    return;
                };
                if let Some(prev) = self.note_items.previous_id(id) {
                    self.focus_id = prev;
                } else if let Some(next) = self.note_items.next_id(id) {
                    // Removing the first item focuses the one that takes its place.
                    self.focus_id = next;
                }
                if !is_placeholder {
                    self.note_items.remove(id);
                }
            }
            Action::GoNext { id } => {
                let Some((is_placeholder, is_empty)) = self
                    .note_items
                    .get(id)
                    .map(|i| (i.is_placeholder, i.text.is_empty()))
                else {
                    return;
                };
                if is_empty {
                    return;
                }
                if is_placeholder {
                    let new_id = self.next_id;
                    if let Some(item) = self.note_items.get_mut(id) {
                        item.is_placeholder = false;
                    }
                    self.note_items.append(NoteItem::placeholder(new_id));
                    self.focus_id = new_id;
                    self.next_id += 1;
                } else if let Some(next) = self.note_items.next_id(id) {
                    self.focus_id = next;
                }
            }
        }
    }
}

/// Reactive store over the ordered note list.
///
/// Constructed fresh via [`NoteItemsStore::new`] or restored from a persisted
/// snapshot by the [`Stores`](crate::Stores) composition root. Serializes as
/// `{"noteItems": ..., "focusId": ..., "nextId": ...}`.
pub struct NoteItemsStore {
    state: Subject<NoteState>,
}

impl NoteItemsStore {
    /// A fresh store: one focused, empty placeholder item with id 1.
    pub fn new() -> Self {
        Self {
            state: Subject::new(NoteState::default()),
        }
    }

    /// Point-in-time lookup of a single item.
    pub fn note_item(&self, id: NoteId) -> Option<NoteItem> {
        self.state.with(|st| st.note_items.get(id).cloned())
    }

    /// Stream of the full id order. Emits the current value immediately,
    /// then once per change to the set or order of ids.
    pub fn all_ids(&self) -> Receiver<Vec<NoteId>> {
        self.state.subscribe(|st| st.note_items.all_ids())
    }

    /// Stream of whether the item with `id` holds focus.
    pub fn should_focus_at(&self, id: NoteId) -> Receiver<bool> {
        self.state.subscribe(move |st| st.focus_id == id)
    }

    /// Stream of the render state of one item, `None` once it is removed.
    pub fn item_state(&self, id: NoteId) -> Receiver<Option<NoteItemState>> {
        self.state.subscribe(move |st| {
            st.note_items.get(id).cloned().map(|item| NoteItemState {
                focus: st.focus_id == item.id,
                item,
            })
        })
    }

    /// Applies one action and notifies subscribers exactly once.
    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch: {action:?}");
        self.state.update(|st| st.apply(action));
        self.state.publish();
    }
}

impl Default for NoteItemsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for NoteItemsStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state.with(|st| st.serialize(serializer))
    }
}

impl<'de> Deserialize<'de> for NoteItemsStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NoteState::deserialize(deserializer).map(|st| Self {
            state: Subject::new(st),
        })
    }
}

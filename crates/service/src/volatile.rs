//! Items and comments: process-lifetime lists seeded at startup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::{MemoryStore, Record};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Client-supplied item fields; an `id` in the body is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
}

impl Record for Item {
    type Draft = ItemInput;
    const KIND: &'static str = "item";

    fn id(&self) -> i64 { self.id }

    fn from_draft(id: i64, draft: ItemInput) -> Self {
        Self { id, name: draft.name, description: draft.description }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub text: String,
    pub avatar: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommentInput {
    pub author: String,
    pub text: String,
    pub avatar: String,
}

impl Record for Comment {
    type Draft = CommentInput;
    const KIND: &'static str = "comment";

    fn id(&self) -> i64 { self.id }

    fn from_draft(id: i64, draft: CommentInput) -> Self {
        Self { id, author: draft.author, text: draft.text, avatar: draft.avatar }
    }
}

pub type ItemStore = MemoryStore<Item>;
pub type CommentStore = MemoryStore<Comment>;

/// Both volatile stores, constructed once and shared by the handlers.
#[derive(Clone)]
pub struct VolatileStores {
    pub items: Arc<ItemStore>,
    pub comments: Arc<CommentStore>,
}

impl VolatileStores {
    /// Two sample items and one sample comment.
    pub fn seeded() -> Self {
        let items = vec![
            Item { id: 1, name: "Item 1".into(), description: "This is item 1".into() },
            Item { id: 2, name: "Item 2".into(), description: "This is item 2".into() },
        ];
        let comments = vec![Comment {
            id: 1,
            author: "Admin".into(),
            text: "Welcome! Leave a comment below.".into(),
            avatar: "https://i.pravatar.cc/150?img=1".into(),
        }];
        Self {
            items: Arc::new(MemoryStore::seeded(items)),
            comments: Arc::new(MemoryStore::seeded(comments)),
        }
    }
}

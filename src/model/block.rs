use super::rich_text;
use crate::types::BlockId;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One node of a page's content tree.
///
/// A block is immutable once built. Its `children` start out absent and are
/// populated at most once, by [`Block::with_children`], which consumes the
/// block and returns the expanded one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBlock")]
pub struct Block {
    id: BlockId,
    kind: String,
    payload: Value,
    created_time: Option<DateTime<Utc>>,
    last_edited_time: Option<DateTime<Utc>>,
    has_more: bool,
    children: Option<Vec<Block>>,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, payload: Value) -> Self {
        Self {
            id: BlockId::new(id),
            kind: kind.into(),
            payload,
            created_time: None,
            last_edited_time: None,
            has_more: false,
            children: None,
        }
    }

    /// A block whose payload is a single rich-text run, e.g. a paragraph.
    pub fn with_text(id: impl Into<String>, kind: impl Into<String>, text: &str) -> Self {
        Self::new(
            id,
            kind,
            serde_json::json!({ "rich_text": rich_text::runs(text) }),
        )
    }

    /// Marks whether the remote source reports unfetched children.
    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn with_timestamps(
        mut self,
        created_time: Option<DateTime<Utc>>,
        last_edited_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_time = created_time;
        self.last_edited_time = last_edited_time;
        self
    }

    /// Returns this block expanded with its complete child list.
    pub fn with_children(self, children: Vec<Block>) -> Self {
        debug_assert!(
            self.children.is_none(),
            "block {} expanded twice",
            self.id
        );
        Self {
            children: Some(children),
            ..self
        }
    }

    /// Splits the block from its children, leaving it unexpanded.
    pub(crate) fn detach(mut self) -> (Self, Vec<Block>) {
        let children = self.children.take().unwrap_or_default();
        (self, children)
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The kind-specific object, i.e. the value under the `kind` key.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn created_time(&self) -> Option<DateTime<Utc>> {
        self.created_time
    }

    pub fn last_edited_time(&self) -> Option<DateTime<Utc>> {
        self.last_edited_time
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether the fetch engine attached a child list to this block.
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> &[Block] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Plain text of the payload's `rich_text`, or `None` when it has none.
    pub fn rich_text(&self) -> Option<String> {
        rich_text::plain_text(self.payload.get("rich_text")?)
    }

    /// A boolean payload flag such as `checked` or `is_toggleable`.
    pub fn flag(&self, key: &str) -> bool {
        self.payload
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}

/// Wire shape of a block object: common fields plus one key named after the
/// block's type holding the kind-specific payload.
#[derive(Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    last_edited_time: Option<DateTime<Utc>>,
    #[serde(default)]
    has_children: bool,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawBlock> for Block {
    fn from(mut raw: RawBlock) -> Self {
        let payload = raw.rest.remove(&raw.kind).unwrap_or(Value::Null);
        Self {
            id: BlockId::new(raw.id),
            kind: raw.kind,
            payload,
            created_time: raw.created_time,
            last_edited_time: raw.last_edited_time,
            has_more: raw.has_children,
            children: None,
        }
    }
}

use std::fmt;

use crate::patch::Span;
use crate::{MapDocError, Result};

/// Kind of a map element, classified once from its tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Object,
    Pickup,
    SpawnPoint,
    Checkpoint,
    /// Any other element (`trigger`, `light`, the `map` root itself, ...)
    Other(String),
}

impl ItemKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "object" => Self::Object,
            "pickup" => Self::Pickup,
            "spawnpoint" => Self::SpawnPoint,
            "checkpoint" => Self::Checkpoint,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether items of this kind carry a `posX`/`posY`/`posZ` position.
    pub fn is_positionable(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Object => "object",
            Self::Pickup => "pickup",
            Self::SpawnPoint => "spawnpoint",
            Self::Checkpoint => "checkpoint",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute of an element.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    value: String,
    /// Raw value bytes in the source, without the surrounding quotes
    value_span: Span,
    modified: bool,
}

impl Attribute {
    pub(crate) fn new(name: String, value: String, value_span: Span) -> Self {
        Self {
            name,
            value,
            value_span,
            modified: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unescaped attribute value
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn value_span(&self) -> Span {
        self.value_span
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn set_value(&mut self, value: &str) -> Result<()> {
        let mut stored = String::new();
        stored.try_reserve_exact(value.len())?;
        stored.push_str(value);
        self.value = stored;
        self.modified = true;
        Ok(())
    }
}

/// An element of a map document.
#[derive(Debug, Clone)]
pub struct ItemNode {
    tag: String,
    kind: ItemKind,
    attributes: Vec<Attribute>,
    children: Vec<ItemNode>,
    span: Span,
}

impl ItemNode {
    pub(crate) fn new(
        tag: String,
        attributes: Vec<Attribute>,
        children: Vec<ItemNode>,
        span: Span,
    ) -> Self {
        let kind = ItemKind::from_tag(&tag);
        Self {
            tag,
            kind,
            attributes,
            children,
            span,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn is_positionable(&self) -> bool {
        self.kind.is_positionable()
    }

    /// Span of the whole element in the source
    pub fn span(&self) -> Span {
        self.span
    }

    /// Attributes in document order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Replace the value of an existing attribute.
    ///
    /// Only existing attributes can be rewritten; the serializer patches
    /// values in place and never inserts new markup.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        let tag = &self.tag;
        let attr = self
            .attributes
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| MapDocError::MissingAttribute {
                element: tag.clone(),
                attr: name.to_string(),
            })?;
        attr.set_value(value)
    }

    /// Child elements in document order
    pub fn children(&self) -> &[ItemNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ItemNode] {
        &mut self.children
    }

    /// Depth-first visit of this node and all descendants.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a ItemNode),
    {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

//! In-memory model of XML level maps.
//!
//! A [`MapDocument`] keeps the original source text next to a tree of
//! [`ItemNode`]s. Attribute values can be rewritten through the tree; on
//! serialization only those values are re-emitted and every other byte of the
//! source is copied through untouched.
//!
//! ```
//! use mapdoc::{MapDocument, Point3, read_position, write_position};
//!
//! let mut doc = MapDocument::parse(r#"<map><object posX="1" posY="2" posZ="3"/></map>"#)?;
//! let item = &mut doc.map_node_mut()?.children_mut()[0];
//! let p = read_position(item)?;
//! write_position(item, p + Point3::X)?;
//! assert_eq!(doc.to_xml_string()?, r#"<map><object posX="2" posY="2" posZ="3"/></map>"#);
//! # Ok::<(), mapdoc::MapDocError>(())
//! ```

mod item;
mod parse;
pub mod patch;
mod position;

pub use item::{Attribute, ItemKind, ItemNode};
pub use position::{POSITION_ATTRIBUTES, Point3, read_position, write_position};

use patch::PatchSet;
use roxmltree::{Document, ParsingOptions};
use std::collections::TryReserveError;
use thiserror::Error;

/// Tag name of the root element of every map
pub const MAP_TAG: &str = "map";

#[derive(Debug, Error)]
pub enum MapDocError {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("Missing root <map> element (found <{found}>)")]
    MissingMapNode { found: String },

    #[error("Missing attribute '{attr}' on <{element}>")]
    MissingAttribute { element: String, attr: String },

    #[error("Invalid coordinate '{attr}=\"{value}\"' on <{element}>")]
    InvalidCoordinate {
        element: String,
        attr: String,
        value: String,
    },

    #[error("Cannot format coordinate '{attr}' ({value}) on <{element}>")]
    UnformattableCoordinate {
        element: String,
        attr: String,
        value: f64,
    },

    #[error("Out of memory while storing attribute value: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapDocError>;

/// A parsed map file.
#[derive(Debug, Clone)]
pub struct MapDocument {
    source: String,
    root: ItemNode,
}

impl MapDocument {
    /// Parse a map document from XML text.
    ///
    /// Only well-formedness is checked here; a root other than `<map>` is
    /// reported lazily by [`MapDocument::map_node`]. A `<!DOCTYPE>` is
    /// accepted and copied through on write.
    pub fn parse(xml: &str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        let root = parse::build_node(&doc, doc.root_element());
        log::trace!(
            "Parsed map document: {} bytes, root <{}> with {} children",
            xml.len(),
            root.tag(),
            root.children().len()
        );

        Ok(Self {
            source: xml.to_string(),
            root,
        })
    }

    /// Original XML text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The document's root element, whatever its tag.
    pub fn root(&self) -> &ItemNode {
        &self.root
    }

    /// The root `<map>` element.
    pub fn map_node(&self) -> Result<&ItemNode> {
        if self.root.tag() == MAP_TAG {
            Ok(&self.root)
        } else {
            Err(self.missing_map_node())
        }
    }

    pub fn map_node_mut(&mut self) -> Result<&mut ItemNode> {
        if self.root.tag() == MAP_TAG {
            Ok(&mut self.root)
        } else {
            Err(self.missing_map_node())
        }
    }

    fn missing_map_node(&self) -> MapDocError {
        MapDocError::MissingMapNode {
            found: self.root.tag().to_string(),
        }
    }

    /// Whether any attribute value was rewritten since parsing.
    pub fn is_modified(&self) -> bool {
        let mut modified = false;
        self.root.walk(&mut |node| {
            modified |= node.attributes().iter().any(Attribute::is_modified);
        });
        modified
    }

    fn patches(&self) -> PatchSet {
        let mut patches = PatchSet::new();
        self.root.walk(&mut |node| {
            for attr in node.attributes().iter().filter(|a| a.is_modified()) {
                let escaped = quick_xml::escape::escape(attr.value());
                patches.replace(attr.value_span(), escaped.into_owned());
            }
        });
        patches
    }

    /// Serialize the document, re-emitting only rewritten attribute values.
    pub fn write_to<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let patches = self.patches();
        log::trace!("Writing map document with {} patched values", patches.len());
        patches.write_to(&self.source, writer)?;
        Ok(())
    }

    pub fn to_xml_string(&self) -> Result<String> {
        let mut out = Vec::with_capacity(self.source.len());
        self.write_to(&mut out)?;
        // Source is UTF-8 and patches are UTF-8 strings
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

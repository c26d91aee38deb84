//! MathML tree node definitions
//!
//! Builders produce these nodes; the markup serializer at the bottom of the
//! file turns them into MathML text. Attributes are kept in a sorted map so
//! that serialization is deterministic.

use alloc::collections::BTreeMap;
use core::fmt::{self, Debug, Write as _};

use bon::bon;
use strum::AsRefStr;

use crate::ParseError;
use crate::utils::escape_into;

/// MathML element names emitted by the builders
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MathNodeType {
    /// `<math>` element
    Math,
    /// `<annotation>` element
    Annotation,
    /// `<semantics>` element
    Semantics,
    /// `<mtext>` element
    Mtext,
    /// `<mn>` element
    Mn,
    /// `<mo>` element
    Mo,
    /// `<mi>` element
    Mi,
    /// `<munderover>` element
    Munderover,
    /// `<mfrac>` element
    Mfrac,
    /// `<mrow>` element
    Mrow,
    /// `<mpadded>` element
    Mpadded,
    /// `<mphantom>` element
    Mphantom,
}

/// A node of the output tree: an element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum MathDomNode {
    /// MathML element node
    Math(MathNode),
    /// Text content node
    Text(TextNode),
}

/// General purpose MathML node of any type
#[derive(Clone, PartialEq)]
pub struct MathNode {
    /// The type of MathML node
    pub node_type: MathNodeType,
    /// Attributes of the MathML node, in name order
    pub attributes: BTreeMap<String, String>,
    /// Child nodes of the MathML node
    pub children: Vec<MathDomNode>,
}

impl Debug for MathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathNode")
            .field("node_type", &self.node_type)
            .field("attributes", &self.attributes)
            .field("children", &self.children)
            .finish()
    }
}

#[bon]
impl MathNode {
    /// Create a new MathNode with the given type
    #[builder]
    pub fn new(
        /// Node type
        node_type: MathNodeType,
        /// Node attributes
        attributes: Option<BTreeMap<String, String>>,
        /// Child nodes
        children: Option<Vec<MathDomNode>>,
    ) -> Self {
        Self {
            node_type,
            attributes: attributes.unwrap_or_default(),
            children: children.unwrap_or_default(),
        }
    }

    /// Create a new MathNode with the given type and children
    #[must_use]
    pub const fn with_children(node_type: MathNodeType, children: Vec<MathDomNode>) -> Self {
        Self {
            node_type,
            attributes: BTreeMap::new(),
            children,
        }
    }

    /// Create a leaf element holding a single text child, e.g. `<mi>x</mi>`.
    #[must_use]
    pub fn with_text(node_type: MathNodeType, text: impl Into<String>) -> Self {
        Self::with_children(node_type, vec![TextNode::new(text).into()])
    }

    /// Add a child to this node
    pub fn add_child(&mut self, child: MathDomNode) {
        self.children.push(child);
    }

    /// Set an attribute on this node, replacing any previous value
    pub fn set_attribute<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.insert(key.into(), value.into());
    }

    /// Chaining variant of [`MathNode::set_attribute`].
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Value of the attribute `name`, if set.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Concatenated text content of this node and its descendants.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.children.iter().map(MathDomNode::to_text).collect()
    }

    /// Serialize this node and its subtree as MathML markup.
    pub fn to_markup(&self) -> Result<String, ParseError> {
        let mut out = String::new();
        self.write_markup(&mut out)?;
        Ok(out)
    }

    /// Write this node as MathML markup into `out`.
    pub fn write_markup<W: fmt::Write>(&self, out: &mut W) -> Result<(), ParseError> {
        write!(out, "<{}", self.node_type.as_ref())?;

        for (key, value) in &self.attributes {
            write!(out, " {key}=\"")?;
            escape_into(out, value)?;
            out.write_char('"')?;
        }

        out.write_char('>')?;

        for child in &self.children {
            child.write_markup(out)?;
        }

        write!(out, "</{}>", self.node_type.as_ref())?;
        Ok(())
    }
}

/// Text node for MathML content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    /// The text content of the node
    pub text: String,
}

impl TextNode {
    /// Create a text node.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl MathDomNode {
    /// Convert the node to plain text
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Math(node) => node.to_text(),
            Self::Text(node) => node.text.clone(),
        }
    }

    /// Serialize the node as MathML markup.
    pub fn to_markup(&self) -> Result<String, ParseError> {
        let mut out = String::new();
        self.write_markup(&mut out)?;
        Ok(out)
    }

    /// Write the node as MathML markup into `out`. Text is escaped.
    pub fn write_markup<W: fmt::Write>(&self, out: &mut W) -> Result<(), ParseError> {
        match self {
            Self::Math(node) => node.write_markup(out),
            Self::Text(node) => Ok(escape_into(out, &node.text)?),
        }
    }

    /// Type-safe access to MathNode variant
    #[must_use]
    pub const fn as_math_node(&self) -> Option<&MathNode> {
        match self {
            Self::Math(node) => Some(node),
            Self::Text(_) => None,
        }
    }

    /// Type-safe access to TextNode variant
    #[must_use]
    pub const fn as_text_node(&self) -> Option<&TextNode> {
        match self {
            Self::Text(node) => Some(node),
            Self::Math(_) => None,
        }
    }
}

impl From<MathNode> for MathDomNode {
    fn from(node: MathNode) -> Self {
        Self::Math(node)
    }
}

impl From<TextNode> for MathDomNode {
    fn from(node: TextNode) -> Self {
        Self::Text(node)
    }
}

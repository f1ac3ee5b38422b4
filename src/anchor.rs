//! Anchors: the typed, named ports on a node.
//!
//! An [`Anchor`] has no identity of its own — it is addressed through the
//! `(node uid, side, name)` triple captured by [`AnchorRef`], which resolves
//! lazily against the live [`crate::blueprint::Blueprint`]. Links store two
//! `AnchorRef`s and nothing else, so deleting a node can never leave a
//! dangling pointer, only a reference that fails to resolve.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::uid::Uid;

/// Which side of the node an anchor sits on.
///
/// Left anchors are inputs, right anchors are outputs; the core only cares
/// about the geometric side, the input/output reading is a convention of the
/// node catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// The closed vocabulary of anchor types.
///
/// `Any` is the wildcard that infers a concrete type at link time; `Branch`
/// is the control-flow type (branch anchors connect execution order rather
/// than data). `Nullable` and `List` wrap another type and correspond to the
/// `"?"` prefix and `"[]"` suffix of the textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AnchorType {
    Any,
    Branch,
    Bool,
    Int,
    Float,
    Str,
    Image,
    Nullable(Box<AnchorType>),
    List(Box<AnchorType>),
}

impl AnchorType {
    /// A `"?int"`-style nullable wrapper.
    pub fn nullable(inner: AnchorType) -> Self {
        AnchorType::Nullable(Box::new(inner))
    }

    /// A `"string[]"`-style list wrapper.
    pub fn list(inner: AnchorType) -> Self {
        AnchorType::List(Box::new(inner))
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, AnchorType::Branch)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, AnchorType::Any)
    }
}

impl fmt::Display for AnchorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorType::Any => f.write_str("any"),
            AnchorType::Branch => f.write_str("branch"),
            AnchorType::Bool => f.write_str("bool"),
            AnchorType::Int => f.write_str("int"),
            AnchorType::Float => f.write_str("float"),
            AnchorType::Str => f.write_str("string"),
            AnchorType::Image => f.write_str("image"),
            AnchorType::Nullable(inner) => write!(f, "?{}", inner),
            AnchorType::List(inner) => write!(f, "{}[]", inner),
        }
    }
}

/// Error produced when parsing a textual type tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor type tag {0:?}")]
pub struct TypeParseError(pub String);

impl FromStr for AnchorType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(inner) = s.strip_prefix('?') {
            return Ok(AnchorType::nullable(inner.parse()?));
        }
        if let Some(inner) = s.strip_suffix("[]") {
            return Ok(AnchorType::list(inner.parse()?));
        }
        match s {
            "any" => Ok(AnchorType::Any),
            "branch" => Ok(AnchorType::Branch),
            "bool" => Ok(AnchorType::Bool),
            "int" => Ok(AnchorType::Int),
            "float" => Ok(AnchorType::Float),
            "string" => Ok(AnchorType::Str),
            "image" => Ok(AnchorType::Image),
            other => Err(TypeParseError(other.to_string())),
        }
    }
}

// Serialized as the textual tag so saved graphs read naturally
// ("string", "?int", "string[]").
impl Serialize for AnchorType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AnchorType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(D::Error::custom)
    }
}

/// A typed, named port on a node.
///
/// Anchors are owned by their node; `value` holds the literal entered by the
/// user when the anchor is not linked (forms are the UI layer's job, the core
/// only stores the value).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub label: String,
    #[serde(rename = "type")]
    pub ty: AnchorType,
    pub value: Option<serde_json::Value>,
    pub editable: bool,
}

impl Anchor {
    pub fn new(label: impl Into<String>, ty: AnchorType) -> Self {
        Self {
            label: label.into(),
            ty,
            value: None,
            editable: true,
        }
    }

    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }
}

/// A `(node, side, name)` locator resolving to an [`Anchor`].
///
/// Holds the node's uid rather than any kind of pointer; resolve it with
/// [`crate::blueprint::Blueprint::resolve`]. Two refs are equal when the
/// whole triple is equal, which is the identity links are keyed on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorRef {
    pub node: Uid,
    pub side: Side,
    pub name: String,
}

impl AnchorRef {
    pub fn new(node: Uid, side: Side, name: impl Into<String>) -> Self {
        Self {
            node,
            side,
            name: name.into(),
        }
    }
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}.{}", self.node, self.side, self.name)
    }
}

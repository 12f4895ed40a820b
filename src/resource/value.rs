//! Resource values.
//!
//! A [`Value`] is the payload stored in one configured slot of an entry. It is a closed
//! tagged variant ([`ValueData`]) wrapped with the metadata every kind shares: the
//! declaring [`Source`], a free-text comment, and whether the declaration is *weak*.
//!
//! # Value Kinds
//!
//! Items (may appear inside aggregates):
//! - [`ValueData::Reference`] - `@type/name` or `?attr/name`
//! - [`ValueData::Id`] - the placeholder created by `@+id/name`, always weak
//! - [`ValueData::RawString`] - unprocessed text, kept verbatim
//! - [`ValueData::String`] - processed text
//! - [`ValueData::StyledString`] - text with markup spans
//! - [`ValueData::FileReference`] - a file that is copied or compiled into the package
//! - [`ValueData::BinaryPrimitive`] - an already-encoded scalar (int, bool, color, ...)
//!
//! Aggregates:
//! - [`ValueData::Attribute`], [`ValueData::Style`], [`ValueData::Array`],
//!   [`ValueData::Plural`], [`ValueData::Styleable`]
//!
//! # Weak values
//!
//! A weak value is a placeholder that yields to any concrete declaration of the same
//! key: the implicit `id` created by a `@+id` reference, or an attribute declared as a
//! side effect of a styleable. See [`crate::resource::resolve_value_collision`].
//!
//! # Equality
//!
//! `Value` equality compares payloads only. Two declarations of the same text in
//! different files are equal.

use std::fmt;

use bitflags::bitflags;
use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::{
    file::InputFileRc,
    resource::{ResourceId, ResourceName, StringRef, StyleRef},
    Source,
};

/// Data type tags of encoded scalar values, as written to the binary table.
pub mod res_value {
    /// No data (`@null`, `@empty`)
    pub const TYPE_NULL: u8 = 0x00;
    /// A reference to another resource id
    pub const TYPE_REFERENCE: u8 = 0x01;
    /// A reference to an attribute in the current theme
    pub const TYPE_ATTRIBUTE: u8 = 0x02;
    /// An index into the string pool
    pub const TYPE_STRING: u8 = 0x03;
    /// A single-precision float
    pub const TYPE_FLOAT: u8 = 0x04;
    /// A complex dimension value
    pub const TYPE_DIMENSION: u8 = 0x05;
    /// A complex fraction value
    pub const TYPE_FRACTION: u8 = 0x06;
    /// A decimal integer
    pub const TYPE_INT_DEC: u8 = 0x10;
    /// A hexadecimal integer
    pub const TYPE_INT_HEX: u8 = 0x11;
    /// A boolean, `0` or `0xffffffff`
    pub const TYPE_INT_BOOLEAN: u8 = 0x12;
    /// A color written as `#aarrggbb`
    pub const TYPE_INT_COLOR_ARGB8: u8 = 0x1c;
    /// A color written as `#rrggbb`
    pub const TYPE_INT_COLOR_RGB8: u8 = 0x1d;
    /// A color written as `#argb`
    pub const TYPE_INT_COLOR_ARGB4: u8 = 0x1e;
    /// A color written as `#rgb`
    pub const TYPE_INT_COLOR_RGB4: u8 = 0x1f;

    /// `TYPE_NULL` data for an undefined value (`@null`)
    pub const DATA_NULL_UNDEFINED: u32 = 0;
    /// `TYPE_NULL` data for an explicitly empty value (`@empty`)
    pub const DATA_NULL_EMPTY: u32 = 1;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Formats an attribute accepts
    pub struct FormatFlags: u32 {
        /// A reference to another resource
        const REFERENCE = 1 << 0;
        /// A string
        const STRING = 1 << 1;
        /// An integer
        const INTEGER = 1 << 2;
        /// A boolean
        const BOOLEAN = 1 << 3;
        /// A color
        const COLOR = 1 << 4;
        /// A float
        const FLOAT = 1 << 5;
        /// A dimension
        const DIMENSION = 1 << 6;
        /// A fraction
        const FRACTION = 1 << 7;
        /// Any of the scalar formats
        const ANY = 0x0000_FFFF;
        /// One of the attribute's enum symbols
        const ENUM = 1 << 16;
        /// A combination of the attribute's flag symbols
        const FLAGS = 1 << 17;
    }
}

impl fmt::Display for FormatFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(FormatFlags::ANY) {
            return f.write_str("any");
        }

        let names: Vec<String> = self
            .iter_names()
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect();
        f.write_str(&names.join("|"))
    }
}

/// Whether a reference is resolved against resources or against the current theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceType {
    /// `@type/name`
    #[default]
    Resource,
    /// `?attr/name`
    Attribute,
}

/// A reference to another resource, by name, by id, or both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Reference {
    /// Referenced name, if known
    pub name: Option<ResourceName>,
    /// Referenced id, if known
    pub id: Option<ResourceId>,
    /// Resource or theme-attribute reference
    pub reference_type: ReferenceType,
    /// `@*` reference reaching a private resource of another package
    pub private_reference: bool,
}

impl Reference {
    /// Creates a resource reference by name.
    pub fn new(name: ResourceName) -> Self {
        Reference {
            name: Some(name),
            ..Default::default()
        }
    }

    /// Creates a theme-attribute reference by name.
    pub fn attribute(name: ResourceName) -> Self {
        Reference {
            name: Some(name),
            reference_type: ReferenceType::Attribute,
            ..Default::default()
        }
    }

    /// Creates a resource reference by id.
    pub fn from_id(id: ResourceId) -> Self {
        Reference {
            id: Some(id),
            ..Default::default()
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reference_type {
            ReferenceType::Resource => f.write_str("@")?,
            ReferenceType::Attribute => f.write_str("?")?,
        }

        if self.private_reference {
            f.write_str("*")?;
        }

        match (&self.name, &self.id) {
            (Some(name), _) => write!(f, "{}", name),
            (None, Some(id)) => write!(f, "{}", id),
            (None, None) => f.write_str("null"),
        }
    }
}

/// A file that is copied or compiled into the final package.
///
/// `path` is the file's path inside the package (e.g. `res/drawable/icon.png`); `file` is
/// the optional handle of the input it came from. The table never opens the file.
#[derive(Clone)]
pub struct FileReference {
    /// Interned path of the file in the package
    pub path: StringRef,
    /// Handle to the input file, when known
    pub file: Option<InputFileRc>,
}

impl PartialEq for FileReference {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl fmt::Debug for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileReference")
            .field("path", &self.path)
            .field("file", &self.file.as_ref().map(|file| file.source().clone()))
            .finish()
    }
}

/// An already-encoded scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryPrimitive {
    /// One of the [`res_value`] data type tags
    pub data_type: u8,
    /// Encoded data
    pub data: u32,
}

/// An enum or flag symbol of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSymbol {
    /// The `id` resource naming the symbol
    pub symbol: Reference,
    /// The value the symbol stands for
    pub value: u32,
}

/// An attribute definition (`<attr>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Accepted formats
    pub type_mask: FormatFlags,
    /// Smallest accepted integer
    pub min_int: i32,
    /// Largest accepted integer
    pub max_int: i32,
    /// Enum or flag symbols
    pub symbols: Vec<AttributeSymbol>,
}

impl Attribute {
    /// Creates an attribute accepting `type_mask`, with no range limits or symbols.
    pub fn new(type_mask: FormatFlags) -> Self {
        Attribute {
            type_mask,
            min_int: i32::MIN,
            max_int: i32::MAX,
            symbols: Vec::new(),
        }
    }
}

/// One `<item name="key">value</item>` of a style.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleEntry {
    /// The attribute being set
    pub key: Reference,
    /// The attribute's value
    pub value: Value,
}

/// A style or theme.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    /// Explicit or inferred parent style
    pub parent: Option<Reference>,
    /// True if the parent was derived from a dotted style name
    pub parent_inferred: bool,
    /// The style's items, in declaration order
    pub entries: Vec<StyleEntry>,
}

/// A typed or string array.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    /// Array elements, in order
    pub elements: Vec<Value>,
}

/// Quantity categories of a plural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PluralQuantity {
    /// `zero`
    Zero,
    /// `one`
    One,
    /// `two`
    Two,
    /// `few`
    Few,
    /// `many`
    Many,
    /// `other`
    Other,
}

/// Quantity strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plural {
    /// One optional value per quantity, indexed by [`PluralQuantity`]
    pub values: [Option<Box<Value>>; PluralQuantity::COUNT],
}

impl Plural {
    /// Returns the value for `quantity`.
    #[must_use]
    pub fn get(&self, quantity: PluralQuantity) -> Option<&Value> {
        self.values[quantity as usize].as_deref()
    }

    /// Sets the value for `quantity`.
    pub fn set(&mut self, quantity: PluralQuantity, value: Value) {
        self.values[quantity as usize] = Some(Box::new(value));
    }
}

/// A declared set of attributes (`<declare-styleable>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Styleable {
    /// References to the member attributes
    pub entries: Vec<Reference>,
}

/// The payload of a [`Value`], one variant per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
    /// A reference to another resource or theme attribute
    Reference(Reference),
    /// The placeholder created by `@+id/name`
    Id,
    /// Unprocessed text
    RawString(StringRef),
    /// Processed text
    String(StringRef),
    /// Text with markup spans
    StyledString(StyleRef),
    /// A file copied or compiled into the package
    FileReference(FileReference),
    /// An encoded scalar
    BinaryPrimitive(BinaryPrimitive),
    /// An attribute definition
    Attribute(Attribute),
    /// A style
    Style(Style),
    /// An array
    Array(Array),
    /// Quantity strings
    Plural(Plural),
    /// A declared attribute set
    Styleable(Styleable),
}

/// The kind discriminant of a [`ValueData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ValueKind {
    /// [`ValueData::Reference`]
    Reference,
    /// [`ValueData::Id`]
    Id,
    /// [`ValueData::RawString`]
    RawString,
    /// [`ValueData::String`]
    String,
    /// [`ValueData::StyledString`]
    StyledString,
    /// [`ValueData::FileReference`]
    FileReference,
    /// [`ValueData::BinaryPrimitive`]
    BinaryPrimitive,
    /// [`ValueData::Attribute`]
    Attribute,
    /// [`ValueData::Style`]
    Style,
    /// [`ValueData::Array`]
    Array,
    /// [`ValueData::Plural`]
    Plural,
    /// [`ValueData::Styleable`]
    Styleable,
}

impl ValueKind {
    /// Returns true for kinds that may be nested inside aggregates.
    #[must_use]
    pub fn is_item(&self) -> bool {
        !matches!(
            self,
            ValueKind::Attribute
                | ValueKind::Style
                | ValueKind::Array
                | ValueKind::Plural
                | ValueKind::Styleable
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.into())
    }
}

impl ValueData {
    /// Returns the kind discriminant of this payload.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            ValueData::Reference(_) => ValueKind::Reference,
            ValueData::Id => ValueKind::Id,
            ValueData::RawString(_) => ValueKind::RawString,
            ValueData::String(_) => ValueKind::String,
            ValueData::StyledString(_) => ValueKind::StyledString,
            ValueData::FileReference(_) => ValueKind::FileReference,
            ValueData::BinaryPrimitive(_) => ValueKind::BinaryPrimitive,
            ValueData::Attribute(_) => ValueKind::Attribute,
            ValueData::Style(_) => ValueKind::Style,
            ValueData::Array(_) => ValueKind::Array,
            ValueData::Plural(_) => ValueKind::Plural,
            ValueData::Styleable(_) => ValueKind::Styleable,
        }
    }
}

impl fmt::Display for ValueData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueData::Reference(reference) => write!(f, "{}", reference),
            ValueData::Id => f.write_str("(id)"),
            ValueData::RawString(text) => write!(f, "(raw string) {}", text),
            ValueData::String(text) => write!(f, "(string) \"{}\"", text),
            ValueData::StyledString(styled) => {
                write!(f, "(styled string) \"{}\"", styled.text)?;
                for span in &styled.spans {
                    write!(f, " {}:{},{}", span.name, span.first_char, span.last_char)?;
                }
                Ok(())
            }
            ValueData::FileReference(file) => write!(f, "(file) {}", file.path),
            ValueData::BinaryPrimitive(primitive) => write!(
                f,
                "(primitive) type=0x{:02x} data=0x{:08x}",
                primitive.data_type, primitive.data
            ),
            ValueData::Attribute(attr) => {
                write!(f, "(attr) {}", attr.type_mask)?;
                if !attr.symbols.is_empty() {
                    write!(f, " [{} symbols]", attr.symbols.len())?;
                }
                Ok(())
            }
            ValueData::Style(style) => {
                f.write_str("(style)")?;
                if let Some(parent) = &style.parent {
                    write!(f, " parent={}", parent)?;
                }
                write!(f, " [{} items]", style.entries.len())
            }
            ValueData::Array(array) => write!(f, "(array) [{} elements]", array.elements.len()),
            ValueData::Plural(plural) => {
                let count = plural.values.iter().filter(|v| v.is_some()).count();
                write!(f, "(plural) [{} quantities]", count)
            }
            ValueData::Styleable(styleable) => {
                let entries: Vec<String> =
                    styleable.entries.iter().map(ToString::to_string).collect();
                write!(f, "(styleable) [{}]", entries.join(", "))
            }
        }
    }
}

/// A resource value together with its declaration metadata.
#[derive(Debug, Clone)]
pub struct Value {
    /// Where the value was declared
    pub source: Source,
    /// Developer comment attached to the declaration
    pub comment: String,
    /// Explicitly weak declaration, see [`Value::is_weak`]
    pub weak: bool,
    /// Whether the value should be translated; only meaningful for strings
    pub translatable: bool,
    /// The payload
    pub data: ValueData,
}

impl Value {
    /// Creates a strong, translatable value.
    pub fn new(data: ValueData, source: Source) -> Self {
        Value {
            source,
            comment: String::new(),
            weak: false,
            translatable: true,
            data,
        }
    }

    /// Creates a processed string value.
    pub fn string(text: StringRef, source: Source) -> Self {
        Value::new(ValueData::String(text), source)
    }

    /// Creates a raw string value.
    pub fn raw_string(text: StringRef, source: Source) -> Self {
        Value::new(ValueData::RawString(text), source)
    }

    /// Creates a styled string value.
    pub fn styled_string(text: StyleRef, source: Source) -> Self {
        Value::new(ValueData::StyledString(text), source)
    }

    /// Creates an `id` placeholder.
    pub fn id(source: Source) -> Self {
        Value::new(ValueData::Id, source)
    }

    /// Creates a reference value.
    pub fn reference(reference: Reference, source: Source) -> Self {
        Value::new(ValueData::Reference(reference), source)
    }

    /// Creates a file reference value.
    pub fn file_reference(path: StringRef, file: Option<InputFileRc>, source: Source) -> Self {
        Value::new(ValueData::FileReference(FileReference { path, file }), source)
    }

    /// Creates an encoded scalar value.
    pub fn primitive(data_type: u8, data: u32, source: Source) -> Self {
        Value::new(
            ValueData::BinaryPrimitive(BinaryPrimitive { data_type, data }),
            source,
        )
    }

    /// Creates an attribute definition.
    pub fn attribute(attribute: Attribute, source: Source) -> Self {
        Value::new(ValueData::Attribute(attribute), source)
    }

    /// Marks the value as weak.
    #[must_use]
    pub fn into_weak(mut self) -> Self {
        self.weak = true;
        self
    }

    /// Attaches a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Returns true if this declaration yields to any concrete redeclaration.
    ///
    /// `id` placeholders are always weak.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.weak || matches!(self.data, ValueData::Id)
    }

    /// Returns the kind of the payload.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.data.kind()
    }

    /// Returns the attribute payload, if this is an attribute.
    #[must_use]
    pub fn as_attribute(&self) -> Option<&Attribute> {
        match &self.data {
            ValueData::Attribute(attr) => Some(attr),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

//! Resource naming: types, names and packed numeric ids.
//!
//! A resource is addressed in two ways. Before linking it is known by its
//! [`ResourceName`] (`package:type/entry`); after ids are assigned it is also known by its
//! [`ResourceId`], a 32-bit value packing the package, type and entry ids. Public resources
//! must keep the same id across builds, which is why both forms live side by side in the
//! table.

use std::{fmt, str::FromStr};

use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{resource::utils, Error, Result};

/// The logical kind of a resource.
///
/// The declaration order is the sort order of type buckets inside a package.
/// The string forms are the names used in resource references (`@string/foo`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
)]
pub enum ResourceType {
    /// Tween animations.
    #[strum(serialize = "anim")]
    Anim,
    /// Property animations.
    #[strum(serialize = "animator")]
    Animator,
    /// Typed and string arrays.
    #[strum(serialize = "array")]
    Array,
    /// Attribute definitions.
    #[strum(serialize = "attr")]
    Attr,
    /// Attributes moved out of the public `attr` space; never written by hand.
    #[strum(serialize = "^attr-private")]
    AttrPrivate,
    /// Boolean values.
    #[strum(serialize = "bool")]
    Bool,
    /// Colors and color state lists.
    #[strum(serialize = "color")]
    Color,
    /// Legacy type used by older tools for values varying by configuration.
    #[strum(serialize = "configVarying")]
    ConfigVarying,
    /// Dimensions.
    #[strum(serialize = "dimen")]
    Dimen,
    /// Drawables: bitmaps, vectors, shapes.
    #[strum(serialize = "drawable")]
    Drawable,
    /// Fonts and font families.
    #[strum(serialize = "font")]
    Font,
    /// Fractions.
    #[strum(serialize = "fraction")]
    Fraction,
    /// Identifiers declared with `@+id`.
    #[strum(serialize = "id")]
    Id,
    /// Integer values.
    #[strum(serialize = "integer")]
    Integer,
    /// Animation interpolators.
    #[strum(serialize = "interpolator")]
    Interpolator,
    /// Layouts.
    #[strum(serialize = "layout")]
    Layout,
    /// Menus.
    #[strum(serialize = "menu")]
    Menu,
    /// Launcher icons.
    #[strum(serialize = "mipmap")]
    Mipmap,
    /// Navigation graphs.
    #[strum(serialize = "navigation")]
    Navigation,
    /// Quantity strings.
    #[strum(serialize = "plurals")]
    Plurals,
    /// Raw files copied verbatim.
    #[strum(serialize = "raw")]
    Raw,
    /// Strings.
    #[strum(serialize = "string")]
    String,
    /// Styles and themes.
    #[strum(serialize = "style")]
    Style,
    /// Declared attribute sets.
    #[strum(serialize = "styleable")]
    Styleable,
    /// Scene transitions.
    #[strum(serialize = "transition")]
    Transition,
    /// Arbitrary compiled XML.
    #[strum(serialize = "xml")]
    Xml,
}

impl ResourceType {
    /// Returns the canonical name of this type, as used in references.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Parses a type name, returning `None` for unknown names.
    ///
    /// ```rust
    /// use restable::ResourceType;
    ///
    /// assert_eq!(ResourceType::parse("string"), Some(ResourceType::String));
    /// assert_eq!(ResourceType::parse("strings"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<ResourceType> {
        ResourceType::from_str(name).ok()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully or partially qualified resource name.
///
/// The `package` may be empty, meaning the current package which is only known once the
/// table is linked. Names are case sensitive and order by (package, type, entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName {
    /// Owning package, empty for the implicit current package
    pub package: String,
    /// Logical type of the resource
    pub resource_type: ResourceType,
    /// Entry name within the type
    pub entry: String,
}

impl ResourceName {
    /// Creates a new resource name.
    pub fn new(
        package: impl Into<String>,
        resource_type: ResourceType,
        entry: impl Into<String>,
    ) -> Self {
        ResourceName {
            package: package.into(),
            resource_type,
            entry: entry.into(),
        }
    }

    /// Returns true if the package part is known.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        !self.package.is_empty()
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_empty() {
            write!(f, "{}:", self.package)?;
        }
        write!(f, "{}/{}", self.resource_type, self.entry)
    }
}

impl FromStr for ResourceName {
    type Err = Error;

    /// Parses `[package:]type/entry`.
    ///
    /// A leading `*` (private marker) is rejected here; use
    /// [`crate::resource::utils::parse_resource_name`] to accept it.
    fn from_str(text: &str) -> Result<Self> {
        match utils::parse_resource_name(text) {
            Some((name, false)) => Ok(name),
            _ => Err(Error::InvalidResourceName(text.to_string())),
        }
    }
}

/// A packed resource id: `0xPPTTEEEE`.
///
/// - The high byte (bits 24-31) is the package id
/// - The next byte (bits 16-23) is the type id
/// - The low 16 bits (bits 0-15) are the entry id
///
/// An id is valid once both its package and type bytes are assigned (non-zero). Entry id
/// `0` is a real entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourceId(pub u32);

impl ResourceId {
    /// Creates a new id from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        ResourceId(value)
    }

    /// Creates an id from its three parts
    #[must_use]
    pub fn from_parts(package_id: u8, type_id: u8, entry_id: u16) -> Self {
        ResourceId((u32::from(package_id) << 24) | (u32::from(type_id) << 16) | u32::from(entry_id))
    }

    /// Returns the raw id value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the package id (high byte)
    #[must_use]
    pub fn package_id(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the type id (second byte)
    #[must_use]
    pub fn type_id(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Extracts the entry id (low 16 bits)
    #[must_use]
    pub fn entry_id(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// Returns true if both the package and type ids are assigned
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.package_id() != 0 && self.type_id() != 0
    }

    /// Returns true if the type id is assigned.
    ///
    /// Ids of shared libraries leave the package byte at `0` until load time.
    #[must_use]
    pub fn is_valid_dynamic(&self) -> bool {
        self.type_id() != 0
    }
}

impl From<u32> for ResourceId {
    fn from(value: u32) -> Self {
        ResourceId(value)
    }
}

impl From<ResourceId> for u32 {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    /// Parses a hexadecimal `0xPPTTEEEE` id.
    fn from_str(text: &str) -> Result<Self> {
        utils::parse_resource_id(text).ok_or_else(|| Error::InvalidResourceId(text.to_string()))
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ResourceId(0x{:08x}, package: 0x{:02x}, type: 0x{:02x}, entry: 0x{:04x})",
            self.0,
            self.package_id(),
            self.type_id(),
            self.entry_id()
        )
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_resource_type_names_roundtrip() {
        for resource_type in ResourceType::iter() {
            assert_eq!(ResourceType::parse(resource_type.as_str()), Some(resource_type));
        }
        assert_eq!(ResourceType::COUNT, 26);
        assert_eq!(ResourceType::AttrPrivate.to_string(), "^attr-private");
        assert_eq!(ResourceType::ConfigVarying.as_str(), "configVarying");
        assert_eq!(ResourceType::parse("String"), None);
    }

    #[test]
    fn test_resource_type_order() {
        assert!(ResourceType::Anim < ResourceType::Attr);
        assert!(ResourceType::Attr < ResourceType::AttrPrivate);
        assert!(ResourceType::String < ResourceType::Xml);
    }

    #[test]
    fn test_resource_name_display() {
        let qualified = ResourceName::new("android", ResourceType::Color, "white");
        assert_eq!(qualified.to_string(), "android:color/white");
        assert!(qualified.is_qualified());

        let local = ResourceName::new("", ResourceType::Layout, "main");
        assert_eq!(local.to_string(), "layout/main");
        assert!(!local.is_qualified());
    }

    #[test]
    fn test_resource_name_parse() {
        let name: ResourceName = "app:string/app_name".parse().unwrap();
        assert_eq!(name, ResourceName::new("app", ResourceType::String, "app_name"));

        let name: ResourceName = "id/x".parse().unwrap();
        assert_eq!(name.package, "");

        assert!("app:strin/app_name".parse::<ResourceName>().is_err());
        assert!("string/".parse::<ResourceName>().is_err());
        assert!("*app:string/hidden".parse::<ResourceName>().is_err());
    }

    #[test]
    fn test_resource_id_parts() {
        let id = ResourceId::new(0x7f010002);
        assert_eq!(id.package_id(), 0x7f);
        assert_eq!(id.type_id(), 0x01);
        assert_eq!(id.entry_id(), 0x0002);
        assert_eq!(ResourceId::from_parts(0x7f, 0x01, 0x0002), id);
        assert!(id.is_valid());

        let dynamic = ResourceId::new(0x00020001);
        assert!(!dynamic.is_valid());
        assert!(dynamic.is_valid_dynamic());

        assert!(!ResourceId::default().is_valid_dynamic());
    }

    #[test]
    fn test_resource_id_text() {
        let id: ResourceId = "0x7f010000".parse().unwrap();
        assert_eq!(id.value(), 0x7f010000);
        assert_eq!(id.to_string(), "0x7f010000");

        assert!("0x7f000000".parse::<ResourceId>().is_err());
        assert!("2130771968".parse::<ResourceId>().is_err());
        assert!("hello".parse::<ResourceId>().is_err());
    }
}

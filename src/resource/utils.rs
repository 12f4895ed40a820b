//! Parsing of resource text forms.
//!
//! Resource definitions refer to other resources and encode scalars as text. This module
//! turns that text into typed names, references and encoded primitives:
//!
//! - `[*][package:]type/entry` - [`parse_resource_name`]
//! - `@[+][*][package:]type/entry` - [`parse_reference`]
//! - `?[package:][attr/]entry` - [`parse_attribute_reference`]
//! - `0xPPTTEEEE` - [`parse_resource_id`]
//! - `@null`, `@empty`, `true`, `42`, `0x2a`, `#ff0000` - the `try_parse_*` family
//!
//! Every parser trims surrounding whitespace where the text may come straight from an
//! XML attribute, and returns `None` instead of an error: callers decide whether text
//! that is not a reference should be kept as a plain string.

use crate::resource::{
    res_value, BinaryPrimitive, FormatFlags, Reference, ReferenceType, ResourceId, ResourceName,
    ResourceType, ValueData,
};

/// Splits `[package:]type/entry` into its three parts.
///
/// The first `/` ends the type and the first `:` ends the package, each only while that
/// part is still unset. Missing parts are returned empty.
///
/// Returns `None` if a separator is present but the part before it is empty
/// (e.g. `:string/foo` or `/foo`).
#[must_use]
pub fn extract_resource_name(text: &str) -> Option<(&str, &str, &str)> {
    let mut package = "";
    let mut resource_type = "";
    let mut has_package_separator = false;
    let mut has_type_separator = false;
    let mut start = 0;

    for (index, c) in text.char_indices() {
        if resource_type.is_empty() && c == '/' {
            has_type_separator = true;
            resource_type = &text[start..index];
            start = index + 1;
        } else if package.is_empty() && c == ':' {
            has_package_separator = true;
            package = &text[start..index];
            start = index + 1;
        }
    }

    if (has_package_separator && package.is_empty())
        || (has_type_separator && resource_type.is_empty())
    {
        return None;
    }

    Some((package, resource_type, &text[start..]))
}

/// Parses `[*][package:]type/entry`.
///
/// Returns the name and whether it carried the private `*` marker. The type must be a
/// known [`ResourceType`] and the entry must not be empty.
///
/// ```rust
/// use restable::resource::utils::parse_resource_name;
/// use restable::ResourceType;
///
/// let (name, private) = parse_resource_name("*android:string/ok").unwrap();
/// assert!(private);
/// assert_eq!(name.package, "android");
/// assert_eq!(name.resource_type, ResourceType::String);
/// assert_eq!(name.entry, "ok");
/// ```
#[must_use]
pub fn parse_resource_name(text: &str) -> Option<(ResourceName, bool)> {
    let (private, rest) = match text.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    if rest.is_empty() {
        return None;
    }

    let (package, resource_type, entry) = extract_resource_name(rest)?;
    let resource_type = ResourceType::parse(resource_type)?;
    if entry.is_empty() {
        return None;
    }

    Some((ResourceName::new(package, resource_type, entry), private))
}

/// A reference parsed from `@[+][*][package:]type/entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// The referenced name
    pub name: ResourceName,
    /// `@+`: the reference declares the id it points to
    pub create: bool,
    /// `@*`: the reference reaches a private resource
    pub private_reference: bool,
}

/// Parses a resource reference.
///
/// `@+` is only allowed for `id` references and cannot be combined with `*`.
#[must_use]
pub fn parse_reference(text: &str) -> Option<ParsedReference> {
    let trimmed = text.trim();
    let rest = trimmed.strip_prefix('@')?;

    let (create, rest) = match rest.strip_prefix('+') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };

    let (name, private_reference) = parse_resource_name(rest)?;
    if create && (private_reference || name.resource_type != ResourceType::Id) {
        return None;
    }

    Some(ParsedReference {
        name,
        create,
        private_reference,
    })
}

/// Returns true if `text` is a valid resource reference.
#[must_use]
pub fn is_reference(text: &str) -> bool {
    parse_reference(text).is_some()
}

/// Parses a theme-attribute reference `?[package:][attr/]entry`.
///
/// The type may be omitted; if present it must be `attr`.
#[must_use]
pub fn parse_attribute_reference(text: &str) -> Option<ResourceName> {
    let trimmed = text.trim();
    let rest = trimmed.strip_prefix('?')?;

    let (package, resource_type, entry) = extract_resource_name(rest)?;
    if !resource_type.is_empty() && resource_type != "attr" {
        return None;
    }
    if entry.is_empty() {
        return None;
    }

    Some(ResourceName::new(package, ResourceType::Attr, entry))
}

/// Returns true if `text` is a valid theme-attribute reference.
#[must_use]
pub fn is_attribute_reference(text: &str) -> bool {
    parse_attribute_reference(text).is_some()
}

/// Parses `true`/`false` in lower, upper or title case.
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "TRUE" | "True" => Some(true),
        "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Parses an integer literal and returns its encoded form.
///
/// Decimal literals fit an `i32` and may carry a sign; `0x` literals fit a `u32`.
fn parse_int_literal(text: &str) -> Option<BinaryPrimitive> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let data = u32::from_str_radix(hex, 16).ok()?;
        return Some(BinaryPrimitive {
            data_type: res_value::TYPE_INT_HEX,
            data,
        });
    }

    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let value: i32 = trimmed.parse().ok()?;
    Some(BinaryPrimitive {
        data_type: res_value::TYPE_INT_DEC,
        data: value as u32,
    })
}

/// Parses a decimal or `0x` hexadecimal integer.
///
/// Negative decimals are returned in two's complement.
#[must_use]
pub fn parse_int(text: &str) -> Option<u32> {
    parse_int_literal(text).map(|primitive| primitive.data)
}

/// Parses a resource id.
///
/// Only the hexadecimal form is accepted, and the type byte must be assigned.
#[must_use]
pub fn parse_resource_id(text: &str) -> Option<ResourceId> {
    let primitive = parse_int_literal(text)?;
    if primitive.data_type != res_value::TYPE_INT_HEX {
        return None;
    }

    let id = ResourceId::new(primitive.data);
    id.is_valid_dynamic().then_some(id)
}

/// Parses a resource or theme-attribute reference.
///
/// Returns the reference and whether it was an `@+id` declaration.
#[must_use]
pub fn try_parse_reference(text: &str) -> Option<(Reference, bool)> {
    if let Some(parsed) = parse_reference(text) {
        let reference = Reference {
            name: Some(parsed.name),
            private_reference: parsed.private_reference,
            ..Default::default()
        };
        return Some((reference, parsed.create));
    }

    let name = parse_attribute_reference(text)?;
    Some((
        Reference {
            name: Some(name),
            reference_type: ReferenceType::Attribute,
            ..Default::default()
        },
        false,
    ))
}

/// Parses `@null` (an undefined reference) or `@empty` (an explicitly empty value).
#[must_use]
pub fn try_parse_null_or_empty(text: &str) -> Option<BinaryPrimitive> {
    match text.trim() {
        "@null" => Some(BinaryPrimitive {
            data_type: res_value::TYPE_REFERENCE,
            data: 0,
        }),
        "@empty" => Some(BinaryPrimitive {
            data_type: res_value::TYPE_NULL,
            data: res_value::DATA_NULL_EMPTY,
        }),
        _ => None,
    }
}

/// Parses `#rgb`, `#argb`, `#rrggbb` or `#aarrggbb`.
///
/// Short forms expand each digit to a full byte and forms without alpha are opaque.
#[must_use]
pub fn try_parse_color(text: &str) -> Option<BinaryPrimitive> {
    let digits = text.trim().strip_prefix('#')?;
    let nibbles: Vec<u32> = digits
        .chars()
        .map(|c| c.to_digit(16))
        .collect::<Option<Vec<u32>>>()?;

    let (data_type, color) = match nibbles.as_slice() {
        [r, g, b] => (
            res_value::TYPE_INT_COLOR_RGB4,
            0xff00_0000 | (r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11,
        ),
        [a, r, g, b] => (
            res_value::TYPE_INT_COLOR_ARGB4,
            (a * 0x11) << 24 | (r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11,
        ),
        [_, _, _, _, _, _] => (
            res_value::TYPE_INT_COLOR_RGB8,
            0xff00_0000 | fold_nibbles(&nibbles),
        ),
        [_, _, _, _, _, _, _, _] => (res_value::TYPE_INT_COLOR_ARGB8, fold_nibbles(&nibbles)),
        _ => return None,
    };

    Some(BinaryPrimitive {
        data_type,
        data: color,
    })
}

fn fold_nibbles(nibbles: &[u32]) -> u32 {
    nibbles.iter().fold(0, |acc, nibble| (acc << 4) | nibble)
}

/// Parses a boolean into its encoded form (`0xffffffff` or `0`).
#[must_use]
pub fn try_parse_bool(text: &str) -> Option<BinaryPrimitive> {
    parse_bool(text).map(|value| BinaryPrimitive {
        data_type: res_value::TYPE_INT_BOOLEAN,
        data: if value { 0xffff_ffff } else { 0 },
    })
}

/// Parses an integer into its encoded form, keeping the decimal/hex distinction.
#[must_use]
pub fn try_parse_int(text: &str) -> Option<BinaryPrimitive> {
    parse_int_literal(text)
}

/// Parses text as an item accepted by an attribute of format `type_mask`.
///
/// `@null`/`@empty` and references are always accepted. Colors, booleans and integers
/// are tried only when the mask allows them, in that order. `on_create` is called with
/// the declared name when the text is an `@+id` reference.
///
/// Returns `None` if nothing matched; callers typically fall back to a string.
pub fn try_parse_item_for_mask(
    text: &str,
    type_mask: FormatFlags,
    mut on_create: impl FnMut(&ResourceName),
) -> Option<ValueData> {
    if let Some(primitive) = try_parse_null_or_empty(text) {
        return Some(ValueData::BinaryPrimitive(primitive));
    }

    if let Some((reference, create)) = try_parse_reference(text) {
        if create {
            if let Some(name) = &reference.name {
                on_create(name);
            }
        }
        return Some(ValueData::Reference(reference));
    }

    let parsers: [(FormatFlags, fn(&str) -> Option<BinaryPrimitive>); 3] = [
        (FormatFlags::COLOR, try_parse_color),
        (FormatFlags::BOOLEAN, try_parse_bool),
        (FormatFlags::INTEGER, try_parse_int),
    ];

    parsers
        .iter()
        .filter(|(format, _)| type_mask.intersects(*format))
        .find_map(|(_, parse)| parse(text))
        .map(ValueData::BinaryPrimitive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_resource_name() {
        assert_eq!(
            extract_resource_name("android:color/white"),
            Some(("android", "color", "white"))
        );
        assert_eq!(extract_resource_name("color/white"), Some(("", "color", "white")));
        assert_eq!(extract_resource_name("android:white"), Some(("android", "", "white")));
        assert_eq!(extract_resource_name("white"), Some(("", "", "white")));
        assert_eq!(extract_resource_name(":color/white"), None);
        assert_eq!(extract_resource_name("/white"), None);
    }

    #[test]
    fn test_parse_resource_name() {
        let (name, private) = parse_resource_name("app:layout/main").unwrap();
        assert!(!private);
        assert_eq!(name, ResourceName::new("app", ResourceType::Layout, "main"));

        assert!(parse_resource_name("").is_none());
        assert!(parse_resource_name("*").is_none());
        assert!(parse_resource_name("app:layout/").is_none());
        assert!(parse_resource_name("app:lay/main").is_none());
        assert!(parse_resource_name("main").is_none());
    }

    #[test]
    fn test_parse_reference() {
        let parsed = parse_reference(" @android:string/ok ").unwrap();
        assert_eq!(parsed.name, ResourceName::new("android", ResourceType::String, "ok"));
        assert!(!parsed.create);
        assert!(!parsed.private_reference);

        let parsed = parse_reference("@+id/button").unwrap();
        assert!(parsed.create);
        assert_eq!(parsed.name.resource_type, ResourceType::Id);

        let parsed = parse_reference("@*android:string/hidden").unwrap();
        assert!(parsed.private_reference);

        assert!(parse_reference("@+string/foo").is_none());
        assert!(parse_reference("@+*id/foo").is_none());
        assert!(parse_reference("string/foo").is_none());
        assert!(parse_reference("@").is_none());

        assert!(is_reference("@color/red"));
        assert!(!is_reference("?attr/red"));
    }

    #[test]
    fn test_parse_attribute_reference() {
        assert_eq!(
            parse_attribute_reference("?android:attr/textColor"),
            Some(ResourceName::new("android", ResourceType::Attr, "textColor"))
        );
        assert_eq!(
            parse_attribute_reference("?textColor"),
            Some(ResourceName::new("", ResourceType::Attr, "textColor"))
        );
        assert!(parse_attribute_reference("?string/foo").is_none());
        assert!(parse_attribute_reference("?attr/").is_none());
        assert!(parse_attribute_reference("@attr/foo").is_none());
        assert!(is_attribute_reference("?attr/foo"));
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool(" false "), Some(false));
        assert_eq!(parse_bool("yes"), None);

        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-1"), Some(0xffff_ffff));
        assert_eq!(parse_int("0x2A"), Some(42));
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("4x2"), None);
        assert_eq!(parse_int("99999999999"), None);
    }

    #[test]
    fn test_parse_resource_id() {
        assert_eq!(parse_resource_id("0x7f010000"), Some(ResourceId::new(0x7f010000)));
        assert_eq!(parse_resource_id(" 0x00010000 "), Some(ResourceId::new(0x00010000)));
        assert_eq!(parse_resource_id("0x7f000000"), None);
        assert_eq!(parse_resource_id("2130771968"), None);
    }

    #[test]
    fn test_try_parse_reference() {
        let (reference, create) = try_parse_reference("@+id/title").unwrap();
        assert!(create);
        assert_eq!(reference.reference_type, ReferenceType::Resource);

        let (reference, create) = try_parse_reference("?colorPrimary").unwrap();
        assert!(!create);
        assert_eq!(reference.reference_type, ReferenceType::Attribute);

        assert!(try_parse_reference("hello").is_none());
    }

    #[test]
    fn test_try_parse_null_or_empty() {
        let null = try_parse_null_or_empty("@null").unwrap();
        assert_eq!(null.data_type, res_value::TYPE_REFERENCE);
        assert_eq!(null.data, 0);

        let empty = try_parse_null_or_empty("@empty").unwrap();
        assert_eq!(empty.data_type, res_value::TYPE_NULL);
        assert_eq!(empty.data, res_value::DATA_NULL_EMPTY);

        assert!(try_parse_null_or_empty("@nul").is_none());
    }

    #[test]
    fn test_try_parse_color() {
        let rgb4 = try_parse_color("#f0a").unwrap();
        assert_eq!(rgb4.data_type, res_value::TYPE_INT_COLOR_RGB4);
        assert_eq!(rgb4.data, 0xffff_00aa);

        let argb4 = try_parse_color("#8f0a").unwrap();
        assert_eq!(argb4.data_type, res_value::TYPE_INT_COLOR_ARGB4);
        assert_eq!(argb4.data, 0x88ff_00aa);

        let rgb8 = try_parse_color("#123456").unwrap();
        assert_eq!(rgb8.data_type, res_value::TYPE_INT_COLOR_RGB8);
        assert_eq!(rgb8.data, 0xff12_3456);

        let argb8 = try_parse_color("#80123456").unwrap();
        assert_eq!(argb8.data_type, res_value::TYPE_INT_COLOR_ARGB8);
        assert_eq!(argb8.data, 0x8012_3456);

        assert!(try_parse_color("#12345").is_none());
        assert!(try_parse_color("#ggg").is_none());
        assert!(try_parse_color("123").is_none());
    }

    #[test]
    fn test_try_parse_bool_and_int() {
        let yes = try_parse_bool("true").unwrap();
        assert_eq!(yes.data_type, res_value::TYPE_INT_BOOLEAN);
        assert_eq!(yes.data, 0xffff_ffff);
        assert_eq!(try_parse_bool("false").unwrap().data, 0);

        assert_eq!(try_parse_int("10").unwrap().data_type, res_value::TYPE_INT_DEC);
        assert_eq!(try_parse_int("0x10").unwrap().data_type, res_value::TYPE_INT_HEX);
    }

    #[test]
    fn test_try_parse_item_for_mask() {
        let mut created = Vec::new();
        let item = try_parse_item_for_mask("@+id/title", FormatFlags::REFERENCE, |name| {
            created.push(name.clone())
        });
        assert!(matches!(item, Some(ValueData::Reference(_))));
        assert_eq!(created, vec![ResourceName::new("", ResourceType::Id, "title")]);

        let color = try_parse_item_for_mask("#fff", FormatFlags::COLOR, |_| {});
        assert!(matches!(
            color,
            Some(ValueData::BinaryPrimitive(BinaryPrimitive {
                data_type: res_value::TYPE_INT_COLOR_RGB4,
                ..
            }))
        ));

        assert!(try_parse_item_for_mask("#fff", FormatFlags::STRING, |_| {}).is_none());
        assert!(try_parse_item_for_mask("12", FormatFlags::BOOLEAN, |_| {}).is_none());
        assert!(try_parse_item_for_mask("12", FormatFlags::ANY, |_| {}).is_some());
        assert!(try_parse_item_for_mask("@null", FormatFlags::empty(), |_| {}).is_some());
    }
}

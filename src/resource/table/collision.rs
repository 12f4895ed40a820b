//! Resolution of two values declared for the same (configuration, product) key.
//!
//! When [`crate::resource::ResourceTable::add_resource`] finds a slot already holding a
//! value, it asks the table's [`CollisionResolver`] which of the two survives. Two
//! resolvers ship with the crate:
//!
//! - [`resolve_value_collision`] - lets the last strong definition of the same kind win,
//!   which is what overlaying libraries in merge order needs
//! - [`resolve_value_collision_strict`] - rejects any two strong definitions, as a
//!   single-module compile does
//!
//! Both treat weak values (implicit ids, implicitly declared attributes) as placeholders
//! that yield to any concrete definition.
//!
//! Any `Fn(&Value, &Value) -> CollisionResult` is a resolver, so callers can plug in their
//! own policy with [`crate::resource::ResourceTable::set_collision_resolver`].

use crate::resource::{FormatFlags, Value, ValueData};

/// Outcome of a collision between an existing and an incoming value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionResult {
    /// Keep the existing value and discard the incoming one
    KeepOriginal,
    /// Replace the existing value with the incoming one
    TakeNew,
    /// The two values cannot coexist; the add fails
    Conflict,
}

/// Strategy deciding which of two colliding values survives.
pub trait CollisionResolver: Send + Sync {
    /// Resolves a collision between `existing` (already stored) and `incoming`.
    fn resolve(&self, existing: &Value, incoming: &Value) -> CollisionResult;
}

impl<F> CollisionResolver for F
where
    F: Fn(&Value, &Value) -> CollisionResult + Send + Sync,
{
    fn resolve(&self, existing: &Value, incoming: &Value) -> CollisionResult {
        self(existing, incoming)
    }
}

fn resolve_attributes(existing: &Value, incoming: &Value) -> Option<CollisionResult> {
    let (ValueData::Attribute(existing_attr), ValueData::Attribute(incoming_attr)) =
        (&existing.data, &incoming.data)
    else {
        return None;
    };

    let result = if existing_attr.type_mask == incoming_attr.type_mask {
        // Same format: a concrete declaration replaces an implicit one.
        if existing.is_weak() {
            CollisionResult::TakeNew
        } else {
            CollisionResult::KeepOriginal
        }
    } else if existing.is_weak() && existing_attr.type_mask == FormatFlags::ANY {
        CollisionResult::TakeNew
    } else if incoming.is_weak() && incoming_attr.type_mask == FormatFlags::ANY {
        CollisionResult::KeepOriginal
    } else {
        CollisionResult::Conflict
    };

    Some(result)
}

fn resolve_common(
    existing: &Value,
    incoming: &Value,
    same_kind: CollisionResult,
) -> CollisionResult {
    if let Some(result) = resolve_attributes(existing, incoming) {
        return result;
    }

    if incoming.is_weak() {
        return CollisionResult::KeepOriginal;
    }

    if existing.is_weak() {
        return CollisionResult::TakeNew;
    }

    let existing_attr = existing.as_attribute().is_some();
    let incoming_attr = incoming.as_attribute().is_some();
    if existing_attr != incoming_attr {
        return CollisionResult::Conflict;
    }

    if existing.kind() == incoming.kind() {
        same_kind
    } else {
        CollisionResult::Conflict
    }
}

/// Default resolver, evaluated top to bottom:
///
/// 1. Two attributes: equal formats keep the original unless it is weak; a weak `any`
///    attribute yields to the other; anything else conflicts.
/// 2. A weak incoming value is discarded.
/// 3. A weak existing value is replaced.
/// 4. An attribute never collides with a non-attribute.
/// 5. Two strong values of the same kind: the incoming one wins.
/// 6. Values of different kinds conflict.
///
/// # Examples
///
/// ```rust
/// use restable::resource::{resolve_value_collision, CollisionResult};
/// use restable::{Source, StringPool, Value};
///
/// let pool = StringPool::new();
/// let id = Value::id(Source::new("layout.xml"));
/// let string = Value::string(pool.intern("x"), Source::new("strings.xml"));
///
/// assert_eq!(resolve_value_collision(&id, &string), CollisionResult::TakeNew);
/// assert_eq!(resolve_value_collision(&string, &id), CollisionResult::KeepOriginal);
/// ```
#[must_use]
pub fn resolve_value_collision(existing: &Value, incoming: &Value) -> CollisionResult {
    resolve_common(existing, incoming, CollisionResult::TakeNew)
}

/// Strict resolver: same as [`resolve_value_collision`] except that two strong values
/// of the same kind conflict.
#[must_use]
pub fn resolve_value_collision_strict(existing: &Value, incoming: &Value) -> CollisionResult {
    resolve_common(existing, incoming, CollisionResult::Conflict)
}

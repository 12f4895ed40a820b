//! The table's string interning pool.
//!
//! Every piece of text a value carries (string contents, file paths, style tags) is
//! interned here so that identical text is stored once and can later be written to the
//! serialized table's string pool without duplicates.
//!
//! # Lifetime model
//!
//! Handles are reference counted. A [`StringRef`] keeps its text alive on its own, so a
//! value may outlive the pool that produced it and the drop order of the table's fields
//! carries no safety obligation.
//!
//! # Thread Safety
//!
//! [`StringPool`] is [`Sync`]: parse workers interning text in parallel share one pool
//! through `&StringPool`. The backing `DashMap` shards its locks, so concurrent interning
//! of distinct strings rarely contends.

use std::{borrow::Borrow, fmt, ops::Deref, sync::Arc};

use dashmap::DashMap;

use crate::Result;

/// A handle to interned text.
///
/// Two handles produced by the same pool for equal text point at the same storage.
/// Equality and ordering compare the text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringRef(Arc<str>);

impl StringRef {
    /// Returns the interned text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if both handles share the same storage.
    #[must_use]
    pub fn ptr_eq(this: &StringRef, other: &StringRef) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl Deref for StringRef {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StringRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StringRef {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringRef({:?})", &*self.0)
    }
}

impl fmt::Display for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A markup span inside styled text, e.g. `<b>` covering characters 0 to 4.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    /// Tag name and attributes, e.g. `b` or `font;color=red`
    pub name: StringRef,
    /// Index of the first character covered, in characters
    pub first_char: u32,
    /// Index of the last character covered (inclusive), in characters
    pub last_char: u32,
}

/// Styled text: interned text plus its markup spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleString {
    /// The raw text without markup
    pub text: StringRef,
    /// Spans, in declaration order
    pub spans: Vec<Span>,
}

/// A shared handle to styled text produced by [`StringPool::intern_styled`].
pub type StyleRef = Arc<StyleString>;

/// Deduplicating string store shared by all values of a table.
#[derive(Default)]
pub struct StringPool {
    strings: DashMap<Arc<str>, ()>,
}

impl StringPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, inserting it on first occurrence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use restable::{StringPool, StringRef};
    ///
    /// let pool = StringPool::new();
    /// let a = pool.intern("Hello");
    /// let b = pool.intern("Hello");
    ///
    /// assert_eq!(a, b);
    /// assert!(StringRef::ptr_eq(&a, &b));
    /// assert_eq!(pool.len(), 1);
    /// ```
    pub fn intern(&self, text: &str) -> StringRef {
        if let Some(existing) = self.strings.get(text) {
            return StringRef(Arc::clone(existing.key()));
        }

        // Another thread may insert the same text between the lookup above and the entry
        // call; the entry keeps whichever key landed first.
        let entry = self.strings.entry(Arc::from(text)).or_insert(());
        StringRef(Arc::clone(entry.key()))
    }

    /// Interns styled text: the text and every span name are interned.
    ///
    /// # Arguments
    /// * `text` - The text without markup
    /// * `spans` - `(name, first_char, last_char)` triples, character indices inclusive
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a span is reversed or extends past the text.
    pub fn intern_styled(&self, text: &str, spans: &[(&str, u32, u32)]) -> Result<StyleRef> {
        let char_count = text.chars().count();

        for &(name, first_char, last_char) in spans {
            if first_char > last_char || last_char as usize >= char_count {
                return Err(malformed_error!(
                    "Span <{}> [{}, {}] is outside of text '{}'",
                    name,
                    first_char,
                    last_char,
                    text
                ));
            }
        }

        let interned = spans
            .iter()
            .map(|&(name, first_char, last_char)| Span {
                name: self.intern(name),
                first_char,
                last_char,
            })
            .collect();

        Ok(Arc::new(StyleString {
            text: self.intern(text),
            spans: interned,
        }))
    }

    /// Returns true if `text` has been interned.
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.strings.contains_key(text)
    }

    /// Returns the number of distinct interned strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Returns every interned string, sorted, for deterministic serialization.
    #[must_use]
    pub fn strings(&self) -> Vec<StringRef> {
        let mut strings: Vec<StringRef> = self
            .strings
            .iter()
            .map(|entry| StringRef(Arc::clone(entry.key())))
            .collect();
        strings.sort();
        strings
    }
}

impl fmt::Debug for StringPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringPool")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_intern_deduplicates() {
        let pool = StringPool::new();
        assert!(pool.is_empty());

        let first = pool.intern("Hello");
        assert_eq!(pool.len(), 1);

        let second = pool.intern("Hello");
        assert_eq!(pool.len(), 1);
        assert_eq!(first, second);
        assert!(StringRef::ptr_eq(&first, &second));

        let other = pool.intern("Bonjour");
        assert_eq!(pool.len(), 2);
        assert_ne!(first, other);
        assert!(pool.contains("Bonjour"));
        assert!(!pool.contains("Hola"));
    }

    #[test]
    fn test_handle_outlives_pool() {
        let handle = {
            let pool = StringPool::new();
            pool.intern("survivor")
        };
        assert_eq!(handle.as_str(), "survivor");
    }

    #[test]
    fn test_concurrent_interning() {
        let pool = StringPool::new();

        let handles: Vec<StringRef> = (0..1000)
            .into_par_iter()
            .map(|i| pool.intern(&format!("string_{}", i % 10)))
            .collect();

        assert_eq!(pool.len(), 10);
        for handle in &handles {
            let canonical = pool.intern(handle.as_str());
            assert!(StringRef::ptr_eq(handle, &canonical));
        }
    }

    #[test]
    fn test_sorted_strings() {
        let pool = StringPool::new();
        pool.intern("b");
        pool.intern("a");
        pool.intern("c");
        pool.intern("a");

        let strings: Vec<String> = pool.strings().iter().map(|s| s.to_string()).collect();
        assert_eq!(strings, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_intern_styled() {
        let pool = StringPool::new();
        let styled = pool
            .intern_styled("Hello World", &[("b", 0, 4), ("i", 6, 10)])
            .unwrap();

        assert_eq!(styled.text.as_str(), "Hello World");
        assert_eq!(styled.spans.len(), 2);
        assert_eq!(styled.spans[1].name.as_str(), "i");
        assert!(pool.contains("b"));
        assert!(pool.contains("Hello World"));

        assert!(pool.intern_styled("Hi", &[("b", 0, 2)]).is_err());
        assert!(pool.intern_styled("Hi", &[("b", 1, 0)]).is_err());
    }

    #[test]
    fn test_rejected_styled_text_interns_nothing() {
        let pool = StringPool::new();

        let result = pool.intern_styled("Hi", &[("b", 0, 1), ("u", 0, 5)]);
        assert!(matches!(result, Err(crate::Error::Malformed { .. })));
        assert!(pool.is_empty());
        assert!(!pool.contains("b"));
    }
}

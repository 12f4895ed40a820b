// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]
//#![deny(unsafe_code)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # restable
//!
//! An in-memory table of Android application resources, the central data structure of a
//! resource compiler. Resource definitions (strings, layouts, styles, attributes, ...) are
//! collected into a hierarchy of packages, types and entries, each entry holding one value
//! per device configuration and product.
//!
//! ## Features
//!
//! - **📦 Deduplicated text** - A concurrent interning pool shared by every value
//! - **🔍 Sorted hierarchy** - Packages, types, entries and configured values found by binary search
//! - **⚖️ Pluggable collisions** - Replaceable strategy deciding which of two declarations wins
//! - **🔒 Stable ids** - Supplied resource ids are checked against already recorded ones
//! - **📊 Structured diagnostics** - Every rejected addition is explained, with both sources
//! - **⚡ Parallel ingestion** - Parse inputs on a thread pool, insert deterministically
//!
//! ## Quick Start
//!
//! ```rust
//! use restable::prelude::*;
//!
//! let mut table = ResourceTable::new();
//! let diag = Diagnostics::new();
//!
//! let name: ResourceName = "com.example:string/greeting".parse()?;
//! let default = ConfigDescription::default();
//! let french = ConfigDescription::from("fr");
//!
//! let hello = Value::string(table.string_pool.intern("Hello"), Source::new("values/strings.xml"));
//! let salut = Value::string(table.string_pool.intern("Salut"), Source::new("values-fr/strings.xml"));
//!
//! assert!(table.add_resource(&name, None, &default, "", hello, &diag));
//! assert!(table.add_resource(&name, None, &french, "", salut, &diag));
//!
//! let entry = table.find_resource(&name).unwrap().entry;
//! assert_eq!(entry.values().len(), 2);
//! # Ok::<(), restable::Error>(())
//! ```
//!
//! ## Collisions
//!
//! Adding a second value under the same (configuration, product) key asks the table's
//! [`resource::CollisionResolver`]. Weak placeholders (such as the `id` created by
//! `@+id/name`) always yield to concrete values:
//!
//! ```rust
//! use restable::prelude::*;
//!
//! let mut table = ResourceTable::new();
//! let diag = Diagnostics::new();
//! let name: ResourceName = "app:id/title".parse()?;
//! let default = ConfigDescription::default();
//!
//! assert!(table.add_resource(&name, None, &default, "", Value::id(Source::new("a.xml")), &diag));
//! assert!(table.add_resource(&name, None, &default, "", Value::id(Source::new("b.xml")), &diag));
//! assert!(!diag.has_any());
//! # Ok::<(), restable::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Table mutations return `bool` and describe failures in a [`Diagnostics`] sink, so a
//! compiler can report every problem of a build at once. Everything else (text parsing,
//! package creation, file access) returns [`Result`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events: `trace` for node creation,
//! `debug` for collision outcomes and id assignments, `warn` for ignored visibility
//! downgrades. Install a subscriber in the application to see them.

#[macro_use]
pub(crate) mod error;

mod config;
mod source;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use restable::prelude::*;
///
/// let table = ResourceTable::new();
/// let diag = Diagnostics::new();
/// assert!(table.packages().is_empty());
/// assert!(!diag.has_any());
/// ```
pub mod prelude;

/// Diagnostics reported by table operations.
pub mod diagnostics;

/// Input-file handles referenced by file-reference values.
pub mod file;

/// The resource table, its value model and the resource text parsers.
pub mod resource;

/// `restable` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use restable::{ResourceId, Result};
///
/// fn parse_id(text: &str) -> Result<ResourceId> {
///     text.parse()
/// }
///
/// assert!(parse_id("0x7f010000").is_ok());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `restable` Error type
///
/// The error type of every `Result`-returning operation in this crate.
///
/// # Examples
///
/// ```rust
/// use restable::{Error, ResourceTable};
///
/// let mut table = ResourceTable::new();
/// table.create_package("android", Some(0x01))?;
///
/// match table.create_package("android", Some(0x7f)) {
///     Err(Error::PackageIdConflict { existing, .. }) => assert_eq!(existing, 0x01),
///     other => panic!("unexpected {:?}", other.map(|p| p.name().to_string())),
/// }
/// # Ok::<(), restable::Error>(())
/// ```
pub use error::Error;

/// Policy switches of a [`ResourceTable`].
pub use config::TableConfig;

/// Declaring source locations.
pub use source::Source;

/// Diagnostics sink and entries.
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

/// The table and its most used building blocks.
///
/// See [`resource`] for the complete set.
pub use resource::{
    ConfigDescription, ResourceId, ResourceName, ResourceTable, ResourceType, StringPool,
    StringRef, Symbol, SymbolState, Value, ValueData,
};

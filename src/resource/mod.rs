//! The in-memory resource table and its building blocks.
//!
//! This module holds everything a resource compiler accumulates while it reads resource
//! definitions: names and ids, configuration keys, the interning pool, the value model and
//! the package/type/entry hierarchy rooted at [`ResourceTable`].
//!
//! # Architecture
//!
//! ```text
//! ResourceTable
//! ├── StringPool                         interned text shared by all values
//! └── ResourceTablePackage  (by name)    "android", "com.example.app", ""
//!     └── ResourceTableType (by type)    string, layout, attr, ...
//!         └── ResourceEntry (by name)    app_name, main, ...
//!             └── ResourceConfigValue    (config, product) -> Value
//! ```
//!
//! Every level keeps its children sorted and finds them by binary search. Children are
//! created on first reference and live as long as the table.
//!
//! # Key Components
//!
//! - [`ResourceTable`] - Root container with the add, symbol and lookup operations
//! - [`Value`] / [`ValueData`] - Resource payloads
//! - [`StringPool`] - Concurrent interning pool
//! - [`ResourceName`], [`ResourceType`], [`ResourceId`] - Addressing
//! - [`ConfigDescription`] - Opaque configuration key
//! - [`CollisionResolver`] - Strategy deciding which of two colliding values survives
//! - [`utils`] - Text parsers for names, references and scalar literals

mod configuration;
mod name;
mod pool;
mod table;
pub mod utils;
mod value;

pub use configuration::ConfigDescription;
pub use name::{ResourceId, ResourceName, ResourceType};
pub use pool::{Span, StringPool, StringRef, StyleRef, StyleString};
pub use table::{
    resolve_value_collision, resolve_value_collision_strict, CollisionResolver,
    CollisionResult, PackageType, PendingResource, ResourceConfigValue, ResourceEntry,
    ResourceTable, ResourceTablePackage, ResourceTableType, SearchResult, Symbol, SymbolState,
};
pub use value::{
    res_value, Array, Attribute, AttributeSymbol, BinaryPrimitive, FileReference, FormatFlags,
    Plural, PluralQuantity, Reference, ReferenceType, Style, StyleEntry, Styleable, Value,
    ValueData, ValueKind,
};

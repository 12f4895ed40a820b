//! # restable Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the restable library. Import this module to get quick access to the essential
//! types for building a resource table.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all restable operations
pub use crate::Error;

/// The result type used throughout restable
pub use crate::Result;

/// Policy switches for table construction
pub use crate::TableConfig;

/// Declaring source locations
pub use crate::Source;

/// Diagnostics sink and entry types
pub use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};

// ================================================================================================
// Table Hierarchy
// ================================================================================================

/// Main entry point: the resource table
pub use crate::resource::ResourceTable;

/// Table levels and lookup results
pub use crate::resource::{
    PackageType, ResourceConfigValue, ResourceEntry, ResourceTablePackage, ResourceTableType,
    SearchResult,
};

/// Visibility declarations
pub use crate::resource::{Symbol, SymbolState};

/// Collision resolution
pub use crate::resource::{
    resolve_value_collision, resolve_value_collision_strict, CollisionResolver, CollisionResult,
};

/// Parallel ingestion
pub use crate::resource::PendingResource;

// ================================================================================================
// Naming and Configuration
// ================================================================================================

/// Resource addressing
pub use crate::resource::{ResourceId, ResourceName, ResourceType};

/// Configuration key
pub use crate::resource::ConfigDescription;

// ================================================================================================
// Values and Interning
// ================================================================================================

/// Interning pool and handles
pub use crate::resource::{StringPool, StringRef, StyleRef};

/// The value model
pub use crate::resource::{
    Attribute, FormatFlags, Reference, ReferenceType, Value, ValueData, ValueKind,
};

// ================================================================================================
// Files
// ================================================================================================

/// Input-file handles
pub use crate::file::{FileCollection, InputFile, InputFileRc};

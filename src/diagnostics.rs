//! Diagnostics collection for resource table construction.
//!
//! This module provides the sink that every table-mutating operation reports into. Adding a
//! resource never aborts on bad data: invalid names, id conflicts and value collisions are
//! pushed here as structured entries while the operation returns `false`, so a compilation
//! can keep going and surface every problem in one pass.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Thread-safe container for diagnostic entries
//! - [`Diagnostic`] - Individual diagnostic entry with severity, category and source
//! - [`DiagnosticSeverity`] - Severity level (Note, Info, Warning, Error)
//! - [`DiagnosticCategory`] - Which table rule produced the diagnostic
//!
//! # Usage Examples
//!
//! ```rust
//! use restable::{ConfigDescription, Diagnostics, ResourceTable, Source, Value};
//!
//! let mut table = ResourceTable::new();
//! let diag = Diagnostics::new();
//!
//! let name = "app:string/bad name".parse().unwrap();
//! let value = Value::string(table.string_pool.intern("x"), Source::new("strings.xml"));
//! let added = table.add_resource(&name, None, &ConfigDescription::default(), "", value, &diag);
//!
//! assert!(!added);
//! assert_eq!(diag.error_count(), 1);
//! for entry in diag.iter() {
//!     println!("{}", entry);
//! }
//! ```
//!
//! # Thread Safety
//!
//! All types in this module are [`Send`] and [`Sync`]. The [`Diagnostics`] container
//! uses `boxcar::Vec` internally, which provides lock-free concurrent append operations,
//! so parallel parse workers may report into the same sink as the table thread.

use std::fmt::{self, Write};

use crate::Source;

/// Severity level of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticSeverity {
    /// Supplementary context attached to a preceding error, e.g. where a colliding
    /// value was first defined.
    Note,

    /// Informational message, not indicating a problem.
    ///
    /// Used for reporting overridden values when override reporting is enabled.
    Info,

    /// Warning about a request the table chose to ignore.
    Warning,

    /// The operation was rejected.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Note => write!(f, "NOTE"),
            DiagnosticSeverity::Info => write!(f, "INFO"),
            DiagnosticSeverity::Warning => write!(f, "WARN"),
            DiagnosticSeverity::Error => write!(f, "ERROR"),
        }
    }
}

/// Category indicating which table rule produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    /// Entry names containing characters outside the allowed set.
    Name,

    /// Supplied numeric ids disagreeing with recorded ones.
    Identifier,

    /// Two values for the same (name, configuration, product) judged incompatible.
    Collision,

    /// Visibility changes, including ignored downgrades.
    Symbol,

    /// Package-level problems.
    Package,

    /// Anything else.
    General,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Name => write!(f, "Name"),
            DiagnosticCategory::Identifier => write!(f, "Identifier"),
            DiagnosticCategory::Collision => write!(f, "Collision"),
            DiagnosticCategory::Symbol => write!(f, "Symbol"),
            DiagnosticCategory::Package => write!(f, "Package"),
            DiagnosticCategory::General => write!(f, "General"),
        }
    }
}

/// A single diagnostic entry with context information.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the rule that produced this diagnostic.
    pub category: DiagnosticCategory,

    /// Description of the issue. Composed by the table, never pre-formatted with location.
    pub message: String,

    /// Optional declaring source the diagnostic refers to.
    pub source: Option<Source>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    ///
    /// # Arguments
    ///
    /// * `severity` - Severity level of the diagnostic
    /// * `category` - Category of the diagnostic source
    /// * `message` - Human-readable description
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source location to the diagnostic.
    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{}: ", source)?;
        }

        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)
    }
}

/// Thread-safe container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free concurrent append operations.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds a note attached to the given source.
    pub fn note(&self, category: DiagnosticCategory, source: &Source, message: impl Into<String>) {
        self.push(
            Diagnostic::new(DiagnosticSeverity::Note, category, message).with_source(source.clone()),
        );
    }

    /// Adds an informational diagnostic attached to the given source.
    pub fn info(&self, category: DiagnosticCategory, source: &Source, message: impl Into<String>) {
        self.push(
            Diagnostic::new(DiagnosticSeverity::Info, category, message).with_source(source.clone()),
        );
    }

    /// Adds a warning diagnostic attached to the given source.
    pub fn warning(
        &self,
        category: DiagnosticCategory,
        source: &Source,
        message: impl Into<String>,
    ) {
        self.push(
            Diagnostic::new(DiagnosticSeverity::Warning, category, message)
                .with_source(source.clone()),
        );
    }

    /// Adds an error diagnostic attached to the given source.
    pub fn error(&self, category: DiagnosticCategory, source: &Source, message: impl Into<String>) {
        self.push(
            Diagnostic::new(DiagnosticSeverity::Error, category, message)
                .with_source(source.clone()),
        );
    }

    /// Adds a diagnostic entry directly.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any error-level diagnostics have been collected.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Error)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns the number of error-level diagnostics.
    pub fn error_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Error)
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count_severity(DiagnosticSeverity::Warning)
    }

    fn count_severity(&self, severity: DiagnosticSeverity) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == severity)
            .count()
    }

    /// Returns an iterator over all diagnostics, in the order they were pushed.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns all errors as a vector.
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .collect()
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.iter().filter(|d| d.category == category).collect()
    }

    /// Formats a summary of all diagnostics for display.
    pub fn summary(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "Diagnostics: {} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        );

        for diag in self.iter() {
            let _ = writeln!(output, "  {diag}");
        }

        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

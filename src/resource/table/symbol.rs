use strum::{EnumIter, IntoStaticStr};

use crate::Source;

/// Visibility of a resource outside its package.
///
/// Ordered by strength: `Undefined < Private < Public`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum SymbolState {
    /// No visibility was declared
    #[default]
    Undefined,
    /// Explicitly private (`<java-symbol>`)
    Private,
    /// Public: the id is part of the package's stable interface
    Public,
}

/// Visibility declaration of an entry or type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbol {
    /// The declared state
    pub state: SymbolState,
    /// Where the state was declared
    pub source: Source,
    /// Comment attached to the declaration
    pub comment: String,
}

impl Symbol {
    /// Creates a symbol declared at `source`.
    pub fn new(state: SymbolState, source: Source) -> Self {
        Symbol {
            state,
            source,
            comment: String::new(),
        }
    }

    /// Attaches a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Returns true if the state is [`SymbolState::Public`].
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.state == SymbolState::Public
    }
}

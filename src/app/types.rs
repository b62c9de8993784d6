//! Type definitions for the UI state.

/// Represents which UI component has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Feed,
    Composer,
    Search,
    Reply,
    Apps,
}

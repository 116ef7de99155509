//! Name component used for scene binding and log output

use crate::ecs::Component;

/// Human-readable entity name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameComponent(String);

impl Component for NameComponent {}

impl NameComponent {
    /// Create a name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NameComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Stable ids for widgets repeated within one frame

use egui::Id;
use std::fmt::Display;

/// Id path such as `figure / <title> / 3`, one component per nesting level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetId(Id);

impl WidgetId {
    pub fn new(base: impl Display) -> Self {
        Self(Id::new(base.to_string()))
    }

    pub fn with(self, component: impl Display) -> Self {
        Self(self.0.with(component.to_string()))
    }

    /// Position within a loop
    pub fn index(self, idx: usize) -> Self {
        Self(self.0.with(idx))
    }

    pub fn id(&self) -> Id {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_and_indices_distinguish_ids() {
        let pair = WidgetId::new("figure").with("pair");
        assert_eq!(pair.clone().index(3).id(), WidgetId::new("figure").with("pair").index(3).id());
        assert_ne!(pair.clone().index(3).id(), pair.clone().index(4).id());
        assert_ne!(pair.id(), WidgetId::new("figure").with("joint").id());
    }
}

//! Outside-interaction detection.
//!
//! Each popup-bearing widget owns a [`Boundary`]: the set of screen
//! regions it currently occupies (trigger line plus open popup) and the
//! widget ids that belong to it. The embedding event loop forwards
//! document-level presses and focus changes; anything landing outside
//! every region and every member id requests closure. Interactions inside
//! the boundary — including focus hopping between the trigger and its
//! list — must never dismiss, which is why focus changes are checked
//! against the member subtree rather than merely for presence of a
//! target.

use std::collections::HashSet;
use std::sync::RwLock;

use ratatui::layout::{Position, Rect};

/// Screen regions and member ids belonging to one widget.
///
/// Regions are re-registered every render pass (the popup region only
/// exists while open); member ids are registered once at construction.
#[derive(Debug, Default)]
pub struct Boundary {
    regions: RwLock<Vec<Rect>>,
    members: RwLock<HashSet<String>>,
}

impl Boundary {
    /// Create an empty boundary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all registered regions (start of a render pass).
    pub fn reset_regions(&self) {
        if let Ok(mut regions) = self.regions.write() {
            regions.clear();
        }
    }

    /// Register a screen region as part of this boundary.
    pub fn register_region(&self, rect: Rect) {
        if let Ok(mut regions) = self.regions.write() {
            regions.push(rect);
        }
    }

    /// Register a widget id as part of this boundary's subtree.
    pub fn register_member(&self, id: impl Into<String>) {
        if let Ok(mut members) = self.members.write() {
            members.insert(id.into());
        }
    }

    /// Check whether a screen position lies inside any registered region.
    pub fn contains_point(&self, x: u16, y: u16) -> bool {
        self.regions
            .read()
            .map(|regions| {
                regions
                    .iter()
                    .any(|rect| rect.contains(Position::new(x, y)))
            })
            .unwrap_or(false)
    }

    /// Check whether a widget id belongs to this boundary's subtree.
    pub fn contains_member(&self, id: &str) -> bool {
        self.members
            .read()
            .map(|members| members.contains(id))
            .unwrap_or(false)
    }

    /// A document-level press occurred. Returns `true` when it landed
    /// outside the boundary and the owner should dismiss.
    pub fn pointer_down(&self, x: u16, y: u16) -> bool {
        let outside = !self.contains_point(x, y);
        if outside {
            log::debug!("pointer down at ({x},{y}) outside boundary");
        }
        outside
    }

    /// Focus moved. `next` is the id receiving focus (the "related
    /// target"), or `None` when focus left the application entirely.
    /// Returns `true` when the owner should dismiss.
    pub fn focus_moved(&self, next: Option<&str>) -> bool {
        let outside = match next {
            Some(id) => !self.contains_member(id),
            None => true,
        };
        if outside {
            log::debug!("focus moved to {next:?}, outside boundary");
        }
        outside
    }
}

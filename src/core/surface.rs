//! Rendering seam between the virtual scroller and the document.
//!
//! The scroller never touches the DOM directly; it drives a [`Surface`],
//! which the browser build implements over real elements and tests
//! implement with a recorder.

use crate::core::error::MountError;
use crate::core::layout::ItemRect;
use crate::core::pool::SlotId;
use crate::models::{FileEntry, ViewMode};

pub trait Surface {
    /// Handle to one reusable row/cell element.
    type Node;

    /// Allocate a fresh, detached node for `slot`.
    fn create_node(&mut self, slot: SlotId) -> Result<Self::Node, MountError>;

    /// Fill the node's content for the entry at `index`.
    fn bind_node(&mut self, node: &Self::Node, index: usize, entry: &FileEntry, mode: ViewMode);

    /// Position the node and update its selected marker.
    fn place_node(&mut self, node: &Self::Node, rect: ItemRect, selected: bool);

    fn attach_node(&mut self, node: &Self::Node);

    fn detach_node(&mut self, node: &Self::Node);

    /// Called when the pool is torn down; the node will never be used again.
    fn destroy_node(&mut self, _slot: SlotId, _node: Self::Node) {}

    /// Reset the node's image to the static icon of `entry` and start
    /// observing it. A node re-attached without rebinding may still hold a
    /// handle that was released while it was detached.
    fn watch_thumbnail(&mut self, node: &Self::Node, entry: &FileEntry);

    fn unwatch_thumbnail(&mut self, node: &Self::Node);

    /// Height of the scrollable content layer.
    fn set_total_extent(&mut self, extent: f64);

    fn scroll_to(&mut self, offset: f64);

    /// Show or hide the empty-directory placeholder.
    fn set_empty(&mut self, empty: bool);

    fn set_view_mode(&mut self, mode: ViewMode);
}

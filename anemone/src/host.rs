/******************************************************************************
 *                                                                            *
 * The container/display API of the game server hosting the menus. The core *
 * never touches physical containers directly; it allocates, fills and shows *
 * them through this trait so the same definitions run on any server.        *
 *                                                                            *
 ******************************************************************************/

use std::fmt::Debug;
use std::hash::Hash;

use crate::template::ContainerKind;

/// Trait for game servers that can display item containers to viewers.
pub trait ContainerHost {
    /// Identity of a player looking at a container.
    type Viewer: Clone + Eq + Hash + Debug;

    /// Handle to one physical container. Handles compare by identity.
    type Container: Clone + PartialEq + Debug;

    /// Opaque payload placed into a slot.
    type Content: Clone;

    /// Identity of a plugin/module that keeps the registry alive.
    type Owner: Clone + PartialEq + Debug;

    /// Creates a new empty container of the given kind.
    /// `None` as title means the host picks its default.
    fn allocate(&mut self, kind: ContainerKind, title: Option<&str>) -> Self::Container;

    /// Replaces the content of one slot. `None` clears it.
    /// Implementations should ignore slots past the container's size.
    fn set_slot(&mut self, container: &Self::Container, slot: usize, content: Option<Self::Content>);

    fn slot(&self, container: &Self::Container, slot: usize) -> Option<Self::Content>;

    /// The container currently displayed on top for `viewer`, if any.
    fn top_container(&self, viewer: &Self::Viewer) -> Option<Self::Container>;

    fn show(&mut self, viewer: &Self::Viewer, container: &Self::Container);

    /// Releases a container that will never be displayed again.
    fn discard(&mut self, _container: Self::Container) {}
}

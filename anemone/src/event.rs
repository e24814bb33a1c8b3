/*
 * anemone/src/event.rs
 *
 * Purpose: Interaction and lifecycle events a host feeds into the registry.
 * Slots are raw host slot numbers; they may be negative or point outside the
 * menu (e.g. into the viewer's own inventory) and are filtered on resolve.
 */

use serde::{Deserialize, Serialize};

use crate::host::ContainerHost;

/// How a slot was clicked.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClickAction {
    Left,
    Right,
    ShiftLeft,
    ShiftRight,
    Middle,
    DoubleClick,
    Drop,
    /// Number key pressed while hovering, 0-based hotbar slot.
    NumberKey(u8),
}

/// How a dragged stack is spread over the covered slots.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragMode {
    Even,
    Single,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Click<V> {
    pub viewer: V,
    pub raw_slot: i32,
    pub action: ClickAction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Drag<V> {
    pub viewer: V,
    /// Covered slots in the order the host reported them.
    pub raw_slots: Vec<i32>,
    pub mode: DragMode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent<V, C, O> {
    Click(Click<V>),
    Drag(Drag<V>),
    Open { viewer: V },
    /// `container` is the container being closed, when the host knows it.
    /// A close for a container other than the viewer's current menu is ignored.
    Close { viewer: V, container: Option<C> },
    HostStopping { owner: O },
}

/// The event type for a given host.
pub type EventFor<H> = HostEvent<
    <H as ContainerHost>::Viewer,
    <H as ContainerHost>::Container,
    <H as ContainerHost>::Owner,
>;

impl<V, C, O> HostEvent<V, C, O> {
    /// The viewer an interaction event belongs to.
    pub fn viewer(&self) -> Option<&V> {
        match self {
            HostEvent::Click(click) => Some(&click.viewer),
            HostEvent::Drag(drag) => Some(&drag.viewer),
            HostEvent::Open { viewer } | HostEvent::Close { viewer, .. } => Some(viewer),
            HostEvent::HostStopping { .. } => None,
        }
    }
}

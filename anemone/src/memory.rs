/*
 * anemone/src/memory.rs
 *
 * Purpose: An in-process `ContainerHost` that keeps containers in memory.
 * Useful for exercising container definitions without a running server, and
 * as the host behind the crate's own tests.
 */

use std::collections::HashMap;

use crate::host::ContainerHost;
use crate::template::ContainerKind;

pub type ViewerId = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryContainer<T> {
    pub kind: ContainerKind,
    pub title: Option<String>,
    pub slots: Vec<Option<T>>,
}

#[derive(Clone, Debug)]
pub struct MemoryHost<T> {
    containers: HashMap<ContainerId, MemoryContainer<T>>,
    displayed: HashMap<ViewerId, ContainerId>,
    next_id: u64,
    allocations: usize,
}

impl<T> Default for MemoryHost<T> {
    fn default() -> Self {
        MemoryHost {
            containers: HashMap::new(),
            displayed: HashMap::new(),
            next_id: 1,
            allocations: 0,
        }
    }
}

impl<T: Clone> MemoryHost<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&self, id: &ContainerId) -> Option<&MemoryContainer<T>> {
        self.containers.get(id)
    }

    /// Slot contents of a container, empty if it does not exist.
    pub fn contents(&self, id: &ContainerId) -> &[Option<T>] {
        self.containers
            .get(id)
            .map(|container| container.slots.as_slice())
            .unwrap_or(&[])
    }

    /// Containers allocated and not yet discarded.
    pub fn live_containers(&self) -> usize {
        self.containers.len()
    }

    /// Containers allocated over the host's lifetime.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Removes the viewer's display, as if they closed the menu. Returns the
    /// container that was shown.
    pub fn close_display(&mut self, viewer: ViewerId) -> Option<ContainerId> {
        self.displayed.remove(&viewer)
    }
}

impl<T: Clone> ContainerHost for MemoryHost<T> {
    type Viewer = ViewerId;
    type Container = ContainerId;
    type Content = T;
    type Owner = &'static str;

    fn allocate(&mut self, kind: ContainerKind, title: Option<&str>) -> ContainerId {
        let id = ContainerId(self.next_id);
        self.next_id += 1;
        self.allocations += 1;
        self.containers.insert(
            id,
            MemoryContainer {
                kind,
                title: title.map(str::to_string),
                slots: vec![None; kind.size()],
            },
        );
        id
    }

    fn set_slot(&mut self, container: &ContainerId, slot: usize, content: Option<T>) {
        match self
            .containers
            .get_mut(container)
            .and_then(|c| c.slots.get_mut(slot))
        {
            Some(target) => *target = content,
            None => log::warn!("[MemoryHost] Write to missing slot {} of {:?}", slot, container),
        }
    }

    fn slot(&self, container: &ContainerId, slot: usize) -> Option<T> {
        self.containers
            .get(container)
            .and_then(|c| c.slots.get(slot))
            .cloned()
            .flatten()
    }

    fn top_container(&self, viewer: &ViewerId) -> Option<ContainerId> {
        self.displayed.get(viewer).copied()
    }

    fn show(&mut self, viewer: &ViewerId, container: &ContainerId) {
        self.displayed.insert(*viewer, *container);
    }

    fn discard(&mut self, container: ContainerId) {
        self.containers.remove(&container);
    }
}

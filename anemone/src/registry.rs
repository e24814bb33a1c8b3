/******************************************************************************
 *                                                                            *
 * The routing table between a host and its menus. Holds one shared instance *
 * per registered definition type and the active view of every viewer, and   *
 * dispatches host events to the right view. The registry is an explicit     *
 * context object: create it at startup and pass it to event handling code.  *
 *                                                                            *
 ******************************************************************************/

use std::any::{self, TypeId};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use crate::definition::ContainerDefinition;
use crate::error::{AnemoneError, Result};
use crate::event::{EventFor, HostEvent};
use crate::host::ContainerHost;
use crate::view::View;

pub struct Registry<H: ContainerHost> {
    definitions: HashMap<TypeId, Rc<dyn ContainerDefinition<H>>>,
    views: HashMap<H::Viewer, View<H>>,
    owners: VecDeque<H::Owner>,
}

impl<H: ContainerHost> Registry<H> {
    /// Creates an active registry kept alive by `owner`.
    pub fn new(owner: H::Owner) -> Self {
        log::debug!("[Registry] Initialised by {:?}", owner);
        Registry {
            definitions: HashMap::new(),
            views: HashMap::new(),
            owners: VecDeque::from([owner]),
        }
    }

    /// Adds another owner. The registry stays active until every owner has
    /// stopped.
    pub fn attach(&mut self, owner: H::Owner) {
        log::debug!("[Registry] Attached owner {:?}", owner);
        self.owners.push_back(owner);
    }

    pub fn is_active(&self) -> bool {
        !self.owners.is_empty()
    }

    pub fn owners(&self) -> impl Iterator<Item = &H::Owner> {
        self.owners.iter()
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(AnemoneError::Inactive)
        }
    }

    // --- Definitions ---

    /// Registers a definition instance under its type.
    ///
    /// Each type, and each definition name, may be registered once.
    pub fn register<D>(&mut self, definition: D) -> Result<()>
    where
        D: ContainerDefinition<H> + 'static,
    {
        self.ensure_active()?;
        let name = definition.name();
        let taken = self.definitions.contains_key(&TypeId::of::<D>())
            || self.definitions.values().any(|existing| existing.name() == name);
        if taken {
            return Err(AnemoneError::AlreadyRegistered(name));
        }
        log::info!("[Registry] Registered container definition {}", name);
        self.definitions.insert(TypeId::of::<D>(), Rc::new(definition));
        Ok(())
    }

    /// Registers a definition built from its `Default` implementation.
    pub fn register_default<D>(&mut self) -> Result<()>
    where
        D: ContainerDefinition<H> + Default + 'static,
    {
        self.register(D::default())
    }

    /// Removes a definition type. Returns whether it was registered.
    /// Views already open keep their own handle to the definition.
    pub fn unregister<D: 'static>(&mut self) -> Result<bool> {
        self.ensure_active()?;
        let removed = self.definitions.remove(&TypeId::of::<D>());
        if let Some(definition) = &removed {
            log::info!("[Registry] Unregistered container definition {}", definition.name());
        }
        Ok(removed.is_some())
    }

    pub fn is_registered<D: 'static>(&self) -> bool {
        self.definitions.contains_key(&TypeId::of::<D>())
    }

    pub fn definition<D: 'static>(&self) -> Option<Rc<dyn ContainerDefinition<H>>> {
        self.definitions.get(&TypeId::of::<D>()).cloned()
    }

    pub fn definition_named(&self, name: &str) -> Option<Rc<dyn ContainerDefinition<H>>> {
        self.definitions
            .values()
            .find(|definition| definition.name() == name)
            .cloned()
    }

    // --- Views ---

    /// Opens the registered definition `D` for `viewer`.
    ///
    /// A view the viewer already had is closed first.
    pub fn open<D: 'static>(&mut self, host: &mut H, viewer: H::Viewer) -> Result<&mut View<H>> {
        self.ensure_active()?;
        let definition = self
            .definition::<D>()
            .ok_or_else(|| AnemoneError::NotRegistered(any::type_name::<D>().to_string()))?;
        self.open_definition(host, viewer, definition)
    }

    pub fn open_named(
        &mut self,
        host: &mut H,
        viewer: H::Viewer,
        name: &str,
    ) -> Result<&mut View<H>> {
        self.ensure_active()?;
        let definition = self
            .definition_named(name)
            .ok_or_else(|| AnemoneError::NotRegistered(name.to_string()))?;
        self.open_definition(host, viewer, definition)
    }

    fn open_definition(
        &mut self,
        host: &mut H,
        viewer: H::Viewer,
        definition: Rc<dyn ContainerDefinition<H>>,
    ) -> Result<&mut View<H>> {
        // A definition that cannot be built leaves the current view in place.
        let mut view = View::new(definition, viewer.clone(), host)?;
        if let Some(mut previous) = self.views.remove(&viewer) {
            log::debug!(
                "[Registry] {:?} replaces {} view",
                viewer,
                previous.definition().name()
            );
            previous.handle_close(host)?;
        }
        view.open(host)?;
        Ok(self.insert_view(view))
    }

    /// Tracks `view` as its viewer's active view, replacing any previous one
    /// without running callbacks.
    pub fn insert_view(&mut self, view: View<H>) -> &mut View<H> {
        match self.views.entry(view.viewer().clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(view);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(view),
        }
    }

    pub fn view(&self, viewer: &H::Viewer) -> Option<&View<H>> {
        self.views.get(viewer)
    }

    pub fn view_mut(&mut self, viewer: &H::Viewer) -> Option<&mut View<H>> {
        self.views.get_mut(viewer)
    }

    /// Stops tracking a view without running callbacks.
    pub fn remove_view(&mut self, viewer: &H::Viewer) -> Option<View<H>> {
        self.views.remove(viewer)
    }

    pub fn views(&self) -> impl Iterator<Item = &View<H>> {
        self.views.values()
    }

    // --- Event Routing ---

    /// Routes a host event to the viewer's active view.
    ///
    /// Events for viewers without a view are ignored, as are all events once
    /// the registry is inactive.
    pub fn dispatch(&mut self, host: &mut H, event: EventFor<H>) -> Result<()> {
        if !self.is_active() {
            log::trace!("[Registry] Inactive, dropping event");
            return Ok(());
        }
        match event {
            HostEvent::Click(click) => {
                if let Some(view) = self.views.get_mut(&click.viewer) {
                    view.handle_click(host, &click)?;
                }
            }
            HostEvent::Drag(drag) => {
                if let Some(view) = self.views.get_mut(&drag.viewer) {
                    view.handle_drag(host, &drag)?;
                }
            }
            HostEvent::Open { viewer } => {
                if let Some(view) = self.views.get_mut(&viewer) {
                    view.handle_open(host)?;
                }
            }
            HostEvent::Close { viewer, container } => {
                let Some(view) = self.views.get(&viewer) else {
                    return Ok(());
                };
                if let Some(closed) = &container {
                    if closed != view.container() {
                        log::debug!(
                            "[Registry] Ignoring close of {:?} for {:?}; current menu is {:?}",
                            closed,
                            viewer,
                            view.container()
                        );
                        return Ok(());
                    }
                }
                if let Some(mut view) = self.views.remove(&viewer) {
                    log::info!("[Registry] Closing {} for {:?}", view.definition().name(), viewer);
                    view.handle_close(host)?;
                }
            }
            HostEvent::HostStopping { owner } => self.detach(&owner),
        }
        Ok(())
    }

    /// Removes one owner; clears all state when none remain.
    fn detach(&mut self, owner: &H::Owner) {
        let Some(position) = self.owners.iter().position(|o| o == owner) else {
            return;
        };
        self.owners.remove(position);
        if self.owners.is_empty() {
            log::info!(
                "[Registry] Last owner {:?} stopped; dropping {} definitions and {} views",
                owner,
                self.definitions.len(),
                self.views.len()
            );
            self.definitions.clear();
            self.views.clear();
        }
    }
}

impl<H: ContainerHost> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.definitions.values().map(|d| d.name()).collect();
        f.debug_struct("Registry")
            .field("definitions", &names)
            .field("views", &self.views.len())
            .field("owners", &self.owners)
            .finish()
    }
}

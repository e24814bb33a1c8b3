/******************************************************************************
 *                                                                            *
 * A View binds one container definition to one viewer and a page cursor.    *
 * It owns the live container handle and keeps its contents in sync with    *
 * the definition whenever the page or the content changes, and forwards     *
 * resolved interactions to the definition's callbacks.                      *
 *                                                                            *
 ******************************************************************************/

use std::fmt;
use std::rc::Rc;

use crate::definition::{build_container, fill_container, ContainerDefinition};
use crate::error::Result;
use crate::event::{Click, Drag};
use crate::host::ContainerHost;
use crate::index::{IndexResolver, LogicalIndex};

pub struct View<H: ContainerHost> {
    definition: Rc<dyn ContainerDefinition<H>>,
    viewer: H::Viewer,
    container: H::Container,
    size: usize,
    page: i32,
}

impl<H: ContainerHost> View<H> {
    /// Creates a view on page 0 and fills a freshly allocated container.
    /// The container is not shown until [`View::open`].
    pub fn new(
        definition: Rc<dyn ContainerDefinition<H>>,
        viewer: H::Viewer,
        host: &mut H,
    ) -> Result<Self> {
        let template = definition.template();
        let kind = template.kind()?;
        let container = host.allocate(kind, definition.title().as_deref());
        let view = View {
            definition,
            viewer,
            container,
            size: kind.size(),
            page: 0,
        };
        fill_container(&*view.definition, &template, &view, host, &view.container);
        log::debug!(
            "[View] Created {} view for {:?} ({} slots)",
            view.definition.name(),
            view.viewer,
            view.size
        );
        Ok(view)
    }

    /// Rebuilds a view around a container the host already displays, e.g.
    /// when view state is kept outside the process between events.
    pub fn restore(
        definition: Rc<dyn ContainerDefinition<H>>,
        viewer: H::Viewer,
        container: H::Container,
        page: i32,
    ) -> Result<Self> {
        let size = definition.kind()?.size();
        Ok(View {
            definition,
            viewer,
            container,
            size,
            page,
        })
    }

    pub fn definition(&self) -> &Rc<dyn ContainerDefinition<H>> {
        &self.definition
    }

    pub fn viewer(&self) -> &H::Viewer {
        &self.viewer
    }

    pub fn container(&self) -> &H::Container {
        &self.container
    }

    /// Number of physical slots in the live container.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn page(&self) -> i32 {
        self.page
    }

    pub fn is_open(&self, host: &H) -> bool {
        host.top_container(&self.viewer).as_ref() == Some(&self.container)
    }

    /// Shows the container to the viewer unless it is already on top.
    pub fn open(&mut self, host: &mut H) -> Result<()> {
        if self.is_open(host) {
            return Ok(());
        }
        self.refresh(host)?;
        host.show(&self.viewer, &self.container);
        log::info!("[View] Opened {} for {:?}", self.definition.name(), self.viewer);
        Ok(())
    }

    /// Re-renders the current page into the live container in place, so the
    /// viewer's open display updates instead of being replaced.
    pub fn refresh(&mut self, host: &mut H) -> Result<()> {
        let definition = Rc::clone(&self.definition);
        let scratch = build_container(&*definition, self, host)?;
        for slot in 0..self.size {
            let content = host.slot(&scratch, slot);
            host.set_slot(&self.container, slot, content);
        }
        host.discard(scratch);
        Ok(())
    }

    // --- Page Navigation ---

    pub fn next_page(&mut self, host: &mut H) -> Result<()> {
        self.set_page(host, self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self, host: &mut H) -> Result<()> {
        self.set_page(host, self.page.saturating_sub(1))
    }

    pub fn reset_page(&mut self, host: &mut H) -> Result<()> {
        self.set_page(host, 0)
    }

    /// Moves to `page` and refreshes. Pages are only bounded when the
    /// definition reports a page count.
    pub fn set_page(&mut self, host: &mut H, page: i32) -> Result<()> {
        let page = self.bounded_page(page);
        if page != self.page {
            log::debug!(
                "[View] {} page {} -> {} for {:?}",
                self.definition.name(),
                self.page,
                page,
                self.viewer
            );
        }
        self.page = page;
        self.refresh(host)
    }

    fn bounded_page(&self, page: i32) -> i32 {
        match self.definition.page_count() {
            None => page,
            Some(count) => {
                let last = i32::try_from(count).unwrap_or(i32::MAX).saturating_sub(1).max(0);
                page.clamp(0, last)
            }
        }
    }

    // --- Event Forwarding ---

    /// The logical index of a raw slot on the current page.
    pub fn resolve(&self, raw_slot: i32) -> Option<LogicalIndex> {
        let template = self.definition.template();
        IndexResolver::new(&template).resolve(self.page, raw_slot)
    }

    pub fn handle_click(&mut self, host: &mut H, click: &Click<H::Viewer>) -> Result<()> {
        let Some(index) = self.resolve(click.raw_slot) else {
            log::trace!("[View] Ignoring click on raw slot {}", click.raw_slot);
            return Ok(());
        };
        let definition = Rc::clone(&self.definition);
        definition.on_click(&index, &mut ViewCx::new(self, host), click)
    }

    pub fn handle_drag(&mut self, host: &mut H, drag: &Drag<H::Viewer>) -> Result<()> {
        let template = self.definition.template();
        let resolver = IndexResolver::new(&template);
        let indices: Vec<LogicalIndex> = drag
            .raw_slots
            .iter()
            .filter_map(|&raw_slot| resolver.resolve(self.page, raw_slot))
            .collect();
        let definition = Rc::clone(&self.definition);
        definition.on_drag(&indices, &mut ViewCx::new(self, host), drag)
    }

    pub fn handle_open(&mut self, host: &mut H) -> Result<()> {
        let definition = Rc::clone(&self.definition);
        definition.on_open(&mut ViewCx::new(self, host))
    }

    pub fn handle_close(&mut self, host: &mut H) -> Result<()> {
        let definition = Rc::clone(&self.definition);
        definition.on_close(&mut ViewCx::new(self, host))
    }
}

impl<H: ContainerHost> fmt::Debug for View<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("definition", &self.definition.name())
            .field("viewer", &self.viewer)
            .field("container", &self.container)
            .field("size", &self.size)
            .field("page", &self.page)
            .finish()
    }
}

/// Mutable access to a view and its host, handed to definition callbacks.
pub struct ViewCx<'v, H: ContainerHost> {
    view: &'v mut View<H>,
    host: &'v mut H,
}

impl<'v, H: ContainerHost> ViewCx<'v, H> {
    pub fn new(view: &'v mut View<H>, host: &'v mut H) -> Self {
        ViewCx { view, host }
    }

    pub fn view(&self) -> &View<H> {
        &*self.view
    }

    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    pub fn viewer(&self) -> &H::Viewer {
        self.view.viewer()
    }

    pub fn page(&self) -> i32 {
        self.view.page()
    }

    pub fn open(&mut self) -> Result<()> {
        self.view.open(self.host)
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.view.refresh(self.host)
    }

    pub fn next_page(&mut self) -> Result<()> {
        self.view.next_page(self.host)
    }

    pub fn previous_page(&mut self) -> Result<()> {
        self.view.previous_page(self.host)
    }

    pub fn reset_page(&mut self) -> Result<()> {
        self.view.reset_page(self.host)
    }

    pub fn set_page(&mut self, page: i32) -> Result<()> {
        self.view.set_page(self.host, page)
    }
}

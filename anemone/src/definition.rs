/******************************************************************************
 *                                                                            *
 * Container definitions: the reusable description of one kind of menu.     *
 * A definition supplies a template and the content for each logical index,  *
 * and may react to clicks, drags, opens and closes. The shared layout and   *
 * pagination machinery lives in free functions and in `View`.               *
 *                                                                            *
 ******************************************************************************/

use crate::error::Result;
use crate::event::{Click, Drag};
use crate::host::ContainerHost;
use crate::index::{IndexResolver, LogicalIndex};
use crate::template::{ContainerKind, Shape, Template};
use crate::view::{View, ViewCx};

/// Trait for menus displayed through a [`ContainerHost`].
pub trait ContainerDefinition<H: ContainerHost> {
    /// The layout template. Must be stable for a given definition instance.
    fn template(&self) -> Template;

    /// Content for the slot identified by `index`, rendered in `view`.
    fn content_for(&self, index: &LogicalIndex, view: &View<H>) -> H::Content;

    /// Title of the container. `None` uses the host default.
    fn title(&self) -> Option<String> {
        None
    }

    /// Name used in logs and to look the definition up by string.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Number of pages with meaningful content. When `Some(n)`, page
    /// navigation is clamped to `0..n`; when `None` any page is allowed.
    fn page_count(&self) -> Option<u32> {
        None
    }

    fn on_click(
        &self,
        _index: &LogicalIndex,
        _cx: &mut ViewCx<'_, H>,
        _click: &Click<H::Viewer>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once per drag with every covered slot that resolved.
    fn on_drag(
        &self,
        _indices: &[LogicalIndex],
        _cx: &mut ViewCx<'_, H>,
        _drag: &Drag<H::Viewer>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_open(&self, _cx: &mut ViewCx<'_, H>) -> Result<()> {
        Ok(())
    }

    /// Called before the view is discarded.
    fn on_close(&self, _cx: &mut ViewCx<'_, H>) -> Result<()> {
        Ok(())
    }

    // --- Shape Queries ---

    fn shape(&self) -> Shape {
        self.template().shape()
    }

    fn kind(&self) -> Result<ContainerKind> {
        self.template().kind()
    }

    fn capacity(&self) -> usize {
        self.template().capacity()
    }

    fn count_of(&self, symbol: char) -> usize {
        self.template().count_of(symbol)
    }

    fn symbol_at(&self, slot: usize) -> Option<char> {
        self.template().symbol_at(slot)
    }
}

/// Allocates a new container for `definition` and fills it with the content
/// of `view`'s current page.
///
/// Fails if the template shape has no container kind.
pub fn build_container<H: ContainerHost>(
    definition: &dyn ContainerDefinition<H>,
    view: &View<H>,
    host: &mut H,
) -> Result<H::Container> {
    let template = definition.template();
    let kind = template.kind()?;
    let container = host.allocate(kind, definition.title().as_deref());
    fill_container(definition, &template, view, host, &container);
    Ok(container)
}

/// Writes one page of content into `container`, slot by slot in row-major order.
pub(crate) fn fill_container<H: ContainerHost>(
    definition: &dyn ContainerDefinition<H>,
    template: &Template,
    view: &View<H>,
    host: &mut H,
    container: &H::Container,
) {
    let resolver = IndexResolver::new(template);
    for index in resolver.page(view.page()) {
        let content = definition.content_for(&index, view);
        host.set_slot(container, index.slot(), Some(content));
    }
}

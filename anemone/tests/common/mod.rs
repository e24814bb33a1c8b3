#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anemone::{
    Click, ContainerDefinition, Drag, LogicalIndex, MemoryHost, Template, View, ViewCx,
};

pub type Host = MemoryHost<LogicalIndex>;

pub const VIEWER: u64 = 7;

/// Everything a definition's callbacks saw.
#[derive(Default, Debug)]
pub struct Recorder {
    pub clicks: RefCell<Vec<LogicalIndex>>,
    pub drags: RefCell<Vec<Vec<LogicalIndex>>>,
    pub opens: Cell<usize>,
    pub closes: Cell<usize>,
}

/// Renders each slot's own logical index and records interactions.
/// Clicking `>` or `<` turns the page.
pub struct Grid {
    pub rows: Vec<&'static str>,
    pub pages: Option<u32>,
    pub recorder: Rc<Recorder>,
}

impl Grid {
    pub fn new(rows: &[&'static str]) -> Self {
        Grid {
            rows: rows.to_vec(),
            pages: None,
            recorder: Rc::default(),
        }
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = Some(pages);
        self
    }
}

impl ContainerDefinition<Host> for Grid {
    fn template(&self) -> Template {
        Template::new(self.rows.iter().copied())
    }

    fn content_for(&self, index: &LogicalIndex, _view: &View<Host>) -> LogicalIndex {
        *index
    }

    fn title(&self) -> Option<String> {
        Some("Grid".to_string())
    }

    fn page_count(&self) -> Option<u32> {
        self.pages
    }

    fn on_click(
        &self,
        index: &LogicalIndex,
        cx: &mut ViewCx<'_, Host>,
        _click: &Click<u64>,
    ) -> anemone::Result<()> {
        self.recorder.clicks.borrow_mut().push(*index);
        match index.symbol() {
            '>' => cx.next_page(),
            '<' => cx.previous_page(),
            _ => Ok(()),
        }
    }

    fn on_drag(
        &self,
        indices: &[LogicalIndex],
        _cx: &mut ViewCx<'_, Host>,
        _drag: &Drag<u64>,
    ) -> anemone::Result<()> {
        self.recorder.drags.borrow_mut().push(indices.to_vec());
        Ok(())
    }

    fn on_open(&self, _cx: &mut ViewCx<'_, Host>) -> anemone::Result<()> {
        self.recorder.opens.set(self.recorder.opens.get() + 1);
        Ok(())
    }

    fn on_close(&self, _cx: &mut ViewCx<'_, Host>) -> anemone::Result<()> {
        self.recorder.closes.set(self.recorder.closes.get() + 1);
        Ok(())
    }
}

pub fn open_view(grid: Grid, host: &mut Host) -> View<Host> {
    View::new(Rc::new(grid), VIEWER, host).expect("legal template")
}

/// Contents of the view's live container.
pub fn rendered(view: &View<Host>, host: &Host) -> Vec<Option<LogicalIndex>> {
    host.contents(view.container()).to_vec()
}

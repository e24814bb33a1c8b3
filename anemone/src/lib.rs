//! Template-driven, paginated item containers for game servers.
//!
//! A [`ContainerDefinition`] describes a menu with a textual [`Template`]:
//! every character names the kind of slot at that position. The
//! [`IndexResolver`] assigns each physical slot a [`LogicalIndex`] that stays
//! stable across pages, and translates the raw slot of a click or drag back
//! into that index. A [`View`] binds a definition to one viewer and a page,
//! and the [`Registry`] routes host events to the right view.
//!
//! Hosts plug in through [`ContainerHost`]; [`MemoryHost`] is an in-memory
//! implementation.

pub mod definition;
pub mod error;
pub mod event;
pub mod host;
pub mod index;
pub mod items;
pub mod memory;
pub mod registry;
pub mod template;
pub mod view;

pub use definition::{build_container, ContainerDefinition};
pub use error::{AnemoneError, Result};
pub use event::{Click, ClickAction, Drag, DragMode, EventFor, HostEvent};
pub use host::ContainerHost;
pub use index::{IndexResolver, LogicalIndex};
pub use items::{ItemMeta, Items};
pub use memory::{ContainerId, MemoryHost};
pub use registry::Registry;
pub use template::{ContainerKind, Shape, Template};
pub use view::{View, ViewCx};

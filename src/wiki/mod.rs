//! Wiki module
//!
//! Pages, their flat-file store, rendering, and the view/edit/save handlers.

pub mod handlers;
pub mod page;
pub mod store;
pub mod templates;

pub use handlers::{Wiki, WikiHandlers};
pub use page::Title;
pub use store::PageStore;
pub use templates::Templates;

// Layout engine: font metrics, word wrap, page context and furniture,
// pagination, and the shared entry renderer the section drivers build on.

pub mod context;
pub mod entry_block;
pub mod font_metrics;
pub mod furniture;
pub mod page_fill;
pub mod wrap;

pub use context::LayoutContext;
pub use furniture::Furniture;

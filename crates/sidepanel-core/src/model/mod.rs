// ── Domain model ──
//
// Side panel items and assistant model descriptors. Everything the
// registry, the catalog, and the settings handler pass around.

pub mod ai_model;
pub mod item;

pub use ai_model::{EngineType, ModelCategory, ModelDescriptor};
pub use item::{BuiltInItemType, SidebarItem, default_items};

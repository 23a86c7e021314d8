//! Side panel state and the assistant settings controller.
//!
//! The browser chrome keeps one ordered set of side panel entries per
//! profile. This crate owns that set and everything that reacts to it:
//!
//! - **[`SidebarService`]** — Shared registry of visible and hidden
//!   [`SidebarItem`]s. Mutations notify observers synchronously, after the
//!   state lock is released, and publish a snapshot on a `watch` channel.
//!   Observers are held by [`Subscription`] handles that unregister on drop.
//!
//! - **[`VisibilityController`]** — Toggles, queries, and resets the
//!   assistant entry. Pushes visibility changes to the settings page over a
//!   [`WebUiChannel`] that drops messages while the page isn't ready.
//!
//! - **[`AssistantSettingsHandler`]** — Decodes [`WebUiRequest`]s from the
//!   page and routes them to the controller and the [`ModelCatalog`].
//!
//! - **[`Session`]** — One profile: a registry bound to a [`PrefService`],
//!   optionally persisting the layout back to preferences.
//!
//! - **Glue** — [`layout`] constants for tab strip geometry and
//!   [`features`] flags with typed parameters.

pub mod catalog;
pub mod config;
pub mod error;
pub mod features;
pub mod layout;
pub mod model;
pub mod prefs;
pub mod registry;
pub mod session;
pub mod visibility;
pub mod webui;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::ModelCatalog;
pub use config::RuntimeConfig;
pub use error::{CoreError, PrefError, RegistryError};
pub use features::{Feature, FeatureList, FeatureOverride, FeatureParam, FeatureState};
pub use layout::{LayoutConstant, LayoutContext};
pub use model::{
    BuiltInItemType, EngineType, ModelCategory, ModelDescriptor, SidebarItem, default_items,
};
pub use prefs::PrefService;
pub use registry::{
    ItemRegistry, SidebarObserver, SidebarService, SidebarSnapshot, Subscription, SubscriptionId,
};
pub use session::Session;
pub use visibility::VisibilityController;
pub use webui::{
    AssistantSettingsHandler, ChannelState, Outbound, VISIBILITY_CHANGED_EVENT, WebUiChannel,
    WebUiRequest,
};

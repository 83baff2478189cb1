//! glyphkit: icon font library registry, rendering, and migration flow
//!
//! This crate manages the set of icon font libraries a page-builder host
//! offers to its users: it declares the built-in Font Awesome style variants,
//! lets host plugins contribute further libraries, resolves asset URLs,
//! renders selected icons to markup, and drives the one-time migration from
//! the legacy icon font major version.
//!
//! Host-framework concerns (settings-page rendering, asset enqueueing,
//! authentication, localization) stay on the host side, behind small
//! collaborator traits.
//!
//! # Example
//!
//! ```
//! use glyphkit::{AssetLocator, IconReference, IconRenderer, NoInlineSvg, RegistryBuilder};
//!
//! let locator = AssetLocator::new("https://example.com/assets/", false);
//! let registry = RegistryBuilder::new(&locator).build();
//!
//! let renderer = IconRenderer::new(&registry, &NoInlineSvg);
//! let icon = IconReference::font("solid", "fa-star");
//! let markup = renderer.render_default(&icon).unwrap();
//! assert_eq!(markup, r#"<i class="fa-star"></i>"#);
//! ```
//!
//! # Migration
//!
//! Sites whose icons predate the current library carry a persisted flag.
//! While it is set, [`MigrationManager`] keeps serving the legacy stylesheet
//! and exposes a one-shot administrator action that clears the flag:
//!
//! ```
//! use glyphkit::{MigrationManager, OptionStore, NEEDS_UPDATE_OPTION};
//!
//! # #[derive(Default)]
//! # struct Store(std::collections::HashSet<String>);
//! # impl OptionStore for Store {
//! #     fn has(&self, key: &str) -> bool { self.0.contains(key) }
//! #     fn delete(&mut self, key: &str) { self.0.remove(key); }
//! # }
//! # let mut flags = Store::default();
//! # flags.0.insert(NEEDS_UPDATE_OPTION.to_string());
//! let mut migration = MigrationManager::new(flags);
//! assert!(!migration.is_migration_allowed());
//!
//! // Host routes the authenticated upgrade submission here.
//! let response = migration.complete_upgrade();
//! assert!(!response.message.is_empty());
//! assert!(migration.is_migration_allowed());
//! ```

mod assets;
mod library;
mod migration;
mod registry;
mod render;

pub use assets::{
    legacy_requests, shim_requests, AssetKind, AssetLocator, AssetRequest, FONT_AWESOME_VERSION,
    LEGACY_FONT_AWESOME_VERSION,
};
pub use library::{
    IconReference, IconValue, LibraryDescriptor, RenderFn, RenderStrategy, SvgAttachment,
    SVG_LIBRARY,
};
pub use migration::{
    DefaultPolicy, MigrationManager, MigrationPanel, MigrationPolicy, MigrationState, OptionStore,
    PanelButton, SettingsField, SettingsOption, UpgradeResponse, ICONS_UPDATE_NEEDED_KEY,
    NEEDS_UPDATE_OPTION, UPGRADE_ACTION,
};
pub use registry::{
    IconRegistry, LibraryContributor, RegistryBuilder, RegistryCell, ALL_LIBRARIES,
};
pub use render::{
    AttributeValue, Attributes, IconRenderer, NoInlineSvg, RenderError, SvgResolver, DEFAULT_TAG,
};

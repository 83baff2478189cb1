//! The icon library registry.
//!
//! [`IconRegistry`] maps library names to [`LibraryDescriptor`]s in insertion
//! order. It is built once via [`RegistryBuilder`], which seeds the built-in
//! Font Awesome style variants and then runs collaborator-supplied
//! [`LibraryContributor`]s in two phases:
//!
//! 1. **Native** contributors run against the base set and may add or
//!    override entries (later entries with the same key replace earlier ones).
//! 2. **Additional** contributors run after the base set is frozen and may
//!    only append — an entry whose key already exists is ignored, so
//!    plugin-provided libraries cannot clobber built-ins.
//!
//! For hosts that share one registry across threads, [`RegistryCell`] guards
//! the first build with a compute-once primitive.

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::assets::{AssetLocator, FONT_AWESOME_VERSION};
use crate::library::LibraryDescriptor;

/// Name of the synthetic picker entry that shows every library at once.
pub const ALL_LIBRARIES: &str = "all";

// ============================================================================
// LibraryContributor
// ============================================================================

/// Collaborator that contributes icon libraries to the registry.
///
/// Implemented by host plugins; any `Fn() -> Vec<LibraryDescriptor>` closure
/// also works.
pub trait LibraryContributor {
    /// Returns the descriptors to merge into the registry.
    fn libraries(&self) -> Vec<LibraryDescriptor>;
}

impl<F> LibraryContributor for F
where
    F: Fn() -> Vec<LibraryDescriptor>,
{
    fn libraries(&self) -> Vec<LibraryDescriptor> {
        self()
    }
}

// ============================================================================
// RegistryBuilder
// ============================================================================

/// Builds an [`IconRegistry`].
pub struct RegistryBuilder {
    entries: IndexMap<String, LibraryDescriptor>,
}

impl RegistryBuilder {
    /// Seeds the builder with the built-in libraries: the regular, solid and
    /// brands style variants of the bundled font family. All three share one
    /// version and the same base stylesheet dependency.
    pub fn new(locator: &AssetLocator) -> Self {
        let shared_enqueue = vec![locator.css("fontawesome")];
        let base = [
            ("regular", "Font Awesome - Regular", "far", "fab fa-font-awesome-flag"),
            ("solid", "Font Awesome - Solid", "fas", "fab fa-font-awesome-alt"),
            ("brands", "Font Awesome - Brands", "fab", "fab fa-font-awesome"),
        ];

        let mut entries = IndexMap::new();
        for (name, label, display_prefix, label_icon) in base {
            let descriptor = LibraryDescriptor::new(name, label)
                .with_url(locator.css(name))
                .with_enqueue(shared_enqueue.clone())
                .with_prefix("fa-")
                .with_display_prefix(display_prefix)
                .with_label_icon(label_icon)
                .with_ver(FONT_AWESOME_VERSION)
                .with_fetch_json(locator.url(name, "json", false));
            entries.insert(descriptor.name.clone(), descriptor);
        }
        Self { entries }
    }

    /// Starts from an empty registry, without the built-in libraries.
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Runs a native contributor: its entries are merged in, replacing any
    /// existing entry with the same key.
    pub fn native(mut self, contributor: &dyn LibraryContributor) -> Self {
        for descriptor in contributor.libraries() {
            self.entries.insert(descriptor.name.clone(), descriptor);
        }
        self
    }

    /// Runs an additional contributor: its entries are appended, and entries
    /// whose key already exists are ignored.
    pub fn additional(mut self, contributor: &dyn LibraryContributor) -> Self {
        for descriptor in contributor.libraries() {
            self.entries
                .entry(descriptor.name.clone())
                .or_insert(descriptor);
        }
        self
    }

    /// Freezes the builder into a registry.
    pub fn build(self) -> IconRegistry {
        IconRegistry {
            entries: self.entries,
        }
    }
}

// ============================================================================
// IconRegistry
// ============================================================================

/// Insertion-ordered mapping from library name to descriptor.
///
/// Read-only after construction; build a new registry to change the set of
/// libraries.
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    entries: IndexMap<String, LibraryDescriptor>,
}

impl IconRegistry {
    /// Looks up a library by name.
    pub fn get(&self, name: &str) -> Option<&LibraryDescriptor> {
        self.entries.get(name)
    }

    /// Returns `true` if a library with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LibraryDescriptor> {
        self.entries.values()
    }

    /// Number of registered libraries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no libraries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the picker entry list: the synthetic "show everything" filter
    /// first, then the registered libraries in insertion order.
    pub fn picker_entries(&self) -> Vec<LibraryDescriptor> {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(
            LibraryDescriptor::new(ALL_LIBRARIES, "All Icons").with_label_icon("eicon-filter"),
        );
        entries.extend(self.entries.values().cloned());
        entries
    }
}

impl<'a> IntoIterator for &'a IconRegistry {
    type Item = &'a LibraryDescriptor;
    type IntoIter = indexmap::map::Values<'a, String, LibraryDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

// ============================================================================
// RegistryCell
// ============================================================================

/// Compute-once cell for a process-wide shared registry.
///
/// Guards the first build so concurrent first-access calls in a
/// multi-threaded host cannot race to build the registry twice with
/// diverging contributor results.
#[derive(Debug, Default)]
pub struct RegistryCell {
    inner: OnceLock<IconRegistry>,
}

impl RegistryCell {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Returns the registry, building it on first access. Exactly one caller
    /// runs `init`; every other caller gets the same instance.
    pub fn get_or_init(&self, init: impl FnOnce() -> IconRegistry) -> &IconRegistry {
        self.inner.get_or_init(init)
    }

    /// Returns the registry if it has been built.
    pub fn get(&self) -> Option<&IconRegistry> {
        self.inner.get()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::RenderStrategy;

    fn locator() -> AssetLocator {
        AssetLocator::new("https://example.com/assets/", false)
    }

    #[test]
    fn base_set_has_three_style_variants() {
        let registry = RegistryBuilder::new(&locator()).build();

        assert_eq!(registry.len(), 3);
        let names: Vec<_> = registry.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["regular", "solid", "brands"]);

        let solid = registry.get("solid").unwrap();
        assert_eq!(solid.display_prefix, "fas");
        assert_eq!(solid.ver, FONT_AWESOME_VERSION);
        assert_eq!(
            solid.url,
            "https://example.com/assets/lib/font-awesome/css/solid.min.css"
        );
        assert_eq!(
            solid.enqueue,
            ["https://example.com/assets/lib/font-awesome/css/fontawesome.min.css"]
        );
        assert_eq!(
            solid.fetch_json.as_deref(),
            Some("https://example.com/assets/lib/font-awesome/json/solid.json")
        );
    }

    #[test]
    fn native_contributor_overrides_base_entry() {
        let contributor = || {
            vec![
                LibraryDescriptor::new("solid", "Replacement Solid"),
                LibraryDescriptor::new("duotone", "Font Awesome - Duotone"),
            ]
        };
        let registry = RegistryBuilder::new(&locator()).native(&contributor).build();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("solid").unwrap().label, "Replacement Solid");
        assert!(registry.contains("duotone"));
    }

    #[test]
    fn additional_contributor_cannot_clobber_builtins() {
        let contributor = || {
            vec![
                LibraryDescriptor::new("brands", "Impostor Brands"),
                LibraryDescriptor::new("my-icons", "My Icons"),
            ]
        };
        let registry = RegistryBuilder::new(&locator())
            .additional(&contributor)
            .build();

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("brands").unwrap().label, "Font Awesome - Brands");
        assert_eq!(registry.get("my-icons").unwrap().label, "My Icons");
    }

    #[test]
    fn contributor_may_carry_custom_render() {
        let contributor = || {
            vec![LibraryDescriptor::new("chessboard", "Chess Icons")
                .with_render(RenderStrategy::custom(|_, _, _| "<span/>".to_string()))]
        };
        let registry = RegistryBuilder::empty().native(&contributor).build();
        assert!(registry.get("chessboard").unwrap().render.is_custom());
    }

    #[test]
    fn picker_entries_prepend_all_filter() {
        let registry = RegistryBuilder::new(&locator()).build();
        let entries = registry.picker_entries();

        assert_eq!(entries[0].name, ALL_LIBRARIES);
        assert_eq!(entries[0].label_icon, "eicon-filter");
        assert!(entries[0].url.is_empty());
        assert!(entries[0].enqueue.is_empty());
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].name, "regular");
    }

    #[test]
    fn picker_entries_have_no_duplicate_keys_after_overrides() {
        let native = || vec![LibraryDescriptor::new("solid", "Replacement")];
        let additional = || vec![LibraryDescriptor::new("regular", "Impostor")];
        let registry = RegistryBuilder::new(&locator())
            .native(&native)
            .additional(&additional)
            .build();

        let entries = registry.picker_entries();
        let mut names: Vec<_> = entries.iter().map(|d| d.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), entries.len());
        assert_eq!(entries[0].name, ALL_LIBRARIES);
    }

    #[test]
    fn synthetic_all_entry_serializes_without_asset_fields() {
        let registry = RegistryBuilder::empty().build();
        let entries = registry.picker_entries();
        let json = serde_json::to_string(&entries[0]).unwrap();
        assert_eq!(
            json,
            r#"{"name":"all","label":"All Icons","labelIcon":"eicon-filter"}"#
        );
    }

    #[test]
    fn registry_cell_builds_once() {
        let cell = RegistryCell::new();
        assert!(cell.get().is_none());

        let locator = locator();
        let first = cell.get_or_init(|| RegistryBuilder::new(&locator).build());
        assert_eq!(first.len(), 3);

        // A second init closure must never run.
        let second = cell.get_or_init(|| RegistryBuilder::empty().build());
        assert_eq!(second.len(), 3);
    }
}

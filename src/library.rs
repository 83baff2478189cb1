//! Core types for icon libraries and icon references.
//!
//! A [`LibraryDescriptor`] describes one selectable icon font library
//! (stylesheet location, glyph class prefix, version, picker metadata).
//! An [`IconReference`] is the value a user picks in the editor: either a
//! glyph class inside one of the registered libraries, or an uploaded SVG
//! attachment.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::render::Attributes;

/// Reserved library name signaling an uploaded SVG attachment rather than
/// a font glyph.
pub const SVG_LIBRARY: &str = "svg";

/// Signature of a custom render override.
///
/// Receives the icon reference, the caller-supplied attributes, and the
/// wrapping tag name; returns the finished markup.
pub type RenderFn = Arc<dyn Fn(&IconReference, &Attributes, &str) -> String + Send + Sync>;

// ============================================================================
// RenderStrategy
// ============================================================================

/// How icons of a library are turned into markup.
///
/// Most libraries use [`RenderStrategy::Default`]: the glyph class is merged
/// into the `class` attribute and wrapped in a tag pair. A library may instead
/// carry [`RenderStrategy::Custom`], which fully replaces the default logic —
/// the callback's output is returned verbatim and no class merging happens.
#[derive(Clone, Default)]
pub enum RenderStrategy {
    /// Merge the glyph class into the `class` attribute and wrap in a tag.
    #[default]
    Default,
    /// Library-supplied override; replaces default rendering entirely.
    Custom(RenderFn),
}

impl RenderStrategy {
    /// Creates a custom strategy from a render closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&IconReference, &Attributes, &str) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Returns `true` if this library overrides default rendering.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Debug for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// ============================================================================
// LibraryDescriptor
// ============================================================================

/// Metadata describing one selectable icon library.
///
/// Descriptors are keyed by [`name`](Self::name) in the registry; the
/// remaining fields drive asset loading and the icon picker UI. Serialized
/// descriptors use camelCase field names so they can be shipped to the editor
/// as-is:
///
/// ```json
/// {
///   "name": "solid",
///   "label": "Font Awesome - Solid",
///   "url": "https://example.com/assets/lib/font-awesome/css/solid.min.css",
///   "enqueue": ["https://example.com/assets/lib/font-awesome/css/fontawesome.min.css"],
///   "prefix": "fa-",
///   "displayPrefix": "fas",
///   "labelIcon": "fab fa-font-awesome-alt",
///   "ver": "5.9.0",
///   "fetchJson": "https://example.com/assets/lib/font-awesome/json/solid.json"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LibraryDescriptor {
    /// Unique registry key.
    pub name: String,

    /// Human-readable display name.
    pub label: String,

    /// Primary stylesheet URL.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Additional asset URLs loaded alongside the primary stylesheet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enqueue: Vec<String>,

    /// Glyph class prefix, e.g. `"fa-"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,

    /// Style family short code, e.g. `"fas"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_prefix: String,

    /// Icon classes representing this library in the picker.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label_icon: String,

    /// Semantic version of the bundled library.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ver: String,

    /// URL of a machine-readable glyph catalog (name → class mapping).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_json: Option<String>,

    /// Render dispatch for icons of this library. Not serializable; shipped
    /// descriptors always look like default-rendered libraries.
    #[serde(skip)]
    pub render: RenderStrategy,
}

impl LibraryDescriptor {
    /// Creates a descriptor with the given key and display name; remaining
    /// fields start empty and are filled via the `with_*` builders.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the primary stylesheet URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the additional assets loaded alongside this library.
    pub fn with_enqueue(mut self, enqueue: Vec<String>) -> Self {
        self.enqueue = enqueue;
        self
    }

    /// Sets the glyph class prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the style family short code.
    pub fn with_display_prefix(mut self, display_prefix: impl Into<String>) -> Self {
        self.display_prefix = display_prefix.into();
        self
    }

    /// Sets the picker label icon classes.
    pub fn with_label_icon(mut self, label_icon: impl Into<String>) -> Self {
        self.label_icon = label_icon.into();
        self
    }

    /// Sets the bundled library version.
    pub fn with_ver(mut self, ver: impl Into<String>) -> Self {
        self.ver = ver.into();
        self
    }

    /// Sets the glyph catalog URL.
    pub fn with_fetch_json(mut self, fetch_json: impl Into<String>) -> Self {
        self.fetch_json = Some(fetch_json.into());
        self
    }

    /// Sets the render strategy.
    pub fn with_render(mut self, render: RenderStrategy) -> Self {
        self.render = render;
        self
    }
}

// ============================================================================
// IconReference
// ============================================================================

/// A user-selected icon: a library key plus a library-specific payload.
///
/// Font libraries carry the glyph's CSS class string; the reserved
/// [`SVG_LIBRARY`] carries an attachment reference instead. Both shapes come
/// straight from the editor:
///
/// ```json
/// {"library": "solid", "value": "fas fa-star"}
/// {"library": "svg", "value": {"id": 123, "url": "https://…/star.svg"}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct IconReference {
    /// Registry key, or [`SVG_LIBRARY`].
    #[serde(default)]
    pub library: String,

    /// Library-specific payload.
    #[serde(default)]
    pub value: IconValue,
}

impl IconReference {
    /// Creates a font-glyph reference.
    pub fn font(library: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            value: IconValue::Class(class.into()),
        }
    }

    /// Creates an SVG attachment reference.
    pub fn svg(id: u64) -> Self {
        Self {
            library: SVG_LIBRARY.to_string(),
            value: IconValue::Svg(SvgAttachment {
                id: Some(id),
                url: None,
            }),
        }
    }

    /// Returns `true` if this reference points at an uploaded SVG.
    pub fn is_svg(&self) -> bool {
        self.library == SVG_LIBRARY
    }
}

/// The payload of an [`IconReference`]: a CSS class string for font
/// libraries, or an attachment record for uploaded SVGs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(untagged)]
pub enum IconValue {
    /// Glyph CSS class string, e.g. `"fas fa-star"`.
    Class(String),
    /// Uploaded SVG attachment.
    Svg(SvgAttachment),
}

impl IconValue {
    /// Returns the glyph class string, if this is a font payload.
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Class(class) => Some(class.as_str()),
            Self::Svg(_) => None,
        }
    }

    /// Returns the attachment id, if this is an SVG payload carrying one.
    pub fn attachment_id(&self) -> Option<u64> {
        match self {
            Self::Class(_) => None,
            Self::Svg(attachment) => attachment.id,
        }
    }
}

impl Default for IconValue {
    fn default() -> Self {
        Self::Class(String::new())
    }
}

/// Reference to an uploaded SVG asset in the host's attachment storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SvgAttachment {
    /// Host attachment id; absent when the upload was removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Direct URL of the uploaded file, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

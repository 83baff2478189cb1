//! Asset URL resolution and load plans.
//!
//! [`AssetLocator`] turns a bare filename into a full asset URL by joining a
//! fixed base path, the extension-named subdirectory, and an optional
//! minification suffix. The join is a pure string concatenation by design:
//! filenames pass through unchecked, and identical inputs always produce the
//! same URL.

use serde::{Deserialize, Serialize};

/// Version of the bundled current-generation icon font.
pub const FONT_AWESOME_VERSION: &str = "5.9.0";

/// Version of the legacy icon font served while migration is pending.
pub const LEGACY_FONT_AWESOME_VERSION: &str = "4.7.0";

const LIB_SUBDIR: &str = "lib/font-awesome/";
const MIN_SUFFIX: &str = ".min";

// ============================================================================
// AssetLocator
// ============================================================================

/// Resolves icon font asset URLs under a fixed base path.
///
/// The debug flag is read once at construction and cached for the locator's
/// lifetime; in debug mode the `.min` suffix is never appended.
#[derive(Debug, Clone)]
pub struct AssetLocator {
    base_url: String,
    debug_mode: bool,
}

impl AssetLocator {
    /// Creates a locator rooted at `base_url` (expected to end with `/`).
    pub fn new(base_url: impl Into<String>, debug_mode: bool) -> Self {
        Self {
            base_url: base_url.into(),
            debug_mode,
        }
    }

    /// Whether minified suffixes are suppressed.
    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Builds `{base}lib/font-awesome/{ext}/{filename}[.min].{ext}`.
    ///
    /// The `.min` suffix is appended only when `add_suffix` is set and debug
    /// mode is off.
    pub fn url(&self, filename: &str, ext: &str, add_suffix: bool) -> String {
        let mut url = String::with_capacity(
            self.base_url.len() + LIB_SUBDIR.len() + ext.len() * 2 + filename.len() + 6,
        );
        url.push_str(&self.base_url);
        url.push_str(LIB_SUBDIR);
        url.push_str(ext);
        url.push('/');
        url.push_str(filename);
        if !self.debug_mode && add_suffix {
            url.push_str(MIN_SUFFIX);
        }
        url.push('.');
        url.push_str(ext);
        url
    }

    /// Shorthand for a suffixed stylesheet URL.
    pub fn css(&self, filename: &str) -> String {
        self.url(filename, "css", true)
    }
}

// ============================================================================
// Asset requests
// ============================================================================

/// Kind of asset the host is asked to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    Script,
    Style,
}

/// One asset the host's enqueue collaborator should load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AssetRequest {
    /// Host-side registration handle.
    pub handle: String,
    /// Full asset URL.
    pub src: String,
    /// Handles this asset depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,
    /// Version string used for cache busting.
    pub ver: String,
    /// Script or style.
    pub kind: AssetKind,
}

impl AssetRequest {
    fn style(handle: &str, src: String, ver: &str) -> Self {
        Self {
            handle: handle.to_string(),
            src,
            deps: Vec::new(),
            ver: ver.to_string(),
            kind: AssetKind::Style,
        }
    }

    fn script(handle: &str, src: String, ver: &str) -> Self {
        Self {
            handle: handle.to_string(),
            src,
            deps: Vec::new(),
            ver: ver.to_string(),
            kind: AssetKind::Script,
        }
    }
}

/// Load plan for the current library generation: the v4 compatibility shim
/// script plus the full current stylesheet and the shim stylesheet. The shim
/// keeps glyphs authored against the previous major version rendering
/// correctly.
///
/// `host_ver` is the host plugin's own version, used for cache busting.
pub fn shim_requests(locator: &AssetLocator, host_ver: &str) -> Vec<AssetRequest> {
    vec![
        AssetRequest::script(
            "font-awesome-4-shim",
            locator.url("v4-shim", "js", true),
            host_ver,
        ),
        AssetRequest::style("font-awesome-5-all", locator.css("all"), host_ver),
        AssetRequest::style("font-awesome-4-shim", locator.css("v4-shim"), host_ver),
    ]
}

/// Load plan while migration is pending: the single legacy stylesheet pinned
/// at the old major version.
pub fn legacy_requests(locator: &AssetLocator) -> Vec<AssetRequest> {
    vec![AssetRequest::style(
        "font-awesome",
        locator.css("font-awesome"),
        LEGACY_FONT_AWESOME_VERSION,
    )]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn locator() -> AssetLocator {
        AssetLocator::new("https://example.com/assets/", false)
    }

    #[test]
    fn url_joins_base_subdir_and_extension() {
        assert_eq!(
            locator().url("solid", "css", true),
            "https://example.com/assets/lib/font-awesome/css/solid.min.css"
        );
    }

    #[test]
    fn url_without_suffix() {
        assert_eq!(
            locator().url("regular", "json", false),
            "https://example.com/assets/lib/font-awesome/json/regular.json"
        );
    }

    #[test]
    fn url_is_deterministic() {
        let locator = locator();
        assert_eq!(
            locator.url("regular", "json", false),
            locator.url("regular", "json", false)
        );
    }

    #[test]
    fn suffixed_stylesheet_ends_with_min_css() {
        assert!(locator().css("brands").ends_with(".min.css"));
    }

    #[test]
    fn debug_mode_never_appends_min() {
        let debug = AssetLocator::new("https://example.com/assets/", true);
        assert_eq!(
            debug.url("solid", "css", true),
            "https://example.com/assets/lib/font-awesome/css/solid.css"
        );
    }

    #[test]
    fn malformed_filenames_pass_through() {
        // Intentionally unvalidated: the join is a pure string concatenation.
        assert_eq!(
            locator().url("../weird name", "css", false),
            "https://example.com/assets/lib/font-awesome/css/../weird name.css"
        );
    }

    #[test]
    fn shim_plan_contains_script_and_both_styles() {
        let requests = shim_requests(&locator(), "3.0.0");
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].kind, AssetKind::Script);
        assert!(requests[0].src.ends_with("js/v4-shim.min.js"));
        assert_eq!(requests[1].handle, "font-awesome-5-all");
        assert!(requests[1].src.ends_with("css/all.min.css"));
        assert_eq!(requests[2].handle, "font-awesome-4-shim");
        assert!(requests.iter().all(|r| r.ver == "3.0.0"));
    }

    #[test]
    fn legacy_plan_is_single_pinned_stylesheet() {
        let requests = legacy_requests(&locator());
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].handle, "font-awesome");
        assert_eq!(requests[0].ver, LEGACY_FONT_AWESOME_VERSION);
        assert_eq!(requests[0].kind, AssetKind::Style);
    }
}

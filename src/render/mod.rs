//! Icon rendering.
//!
//! [`IconRenderer`] turns an [`IconReference`] into markup. Dispatch order:
//!
//! 1. An empty `library` fails closed with [`RenderError::MissingLibrary`].
//! 2. The reserved `svg` library delegates to the host's [`SvgResolver`];
//!    a missing attachment id yields empty output but still succeeds. That
//!    asymmetry with the empty-library case is long-standing observable
//!    behavior and is kept intact (and pinned by tests).
//! 3. A registered library with a [`RenderStrategy::Custom`] callback returns
//!    the callback's output verbatim.
//! 4. Everything else gets default rendering: the glyph class is merged into
//!    the `class` attribute and the result wrapped in an open/close tag pair.
//!    Unknown library names still default-render; the registry is consulted
//!    only for custom callbacks.
//!
//! The renderer returns the markup string. Writing it to a response stream is
//! the caller's concern; [`IconRenderer::render_to`] is the thin bridge for
//! hosts that stream output.

pub mod attributes;
pub mod svg;

pub use attributes::{AttributeValue, Attributes};
pub use svg::{NoInlineSvg, SvgResolver};

use std::fmt;

use thiserror::Error;

use crate::library::{IconReference, RenderStrategy, SVG_LIBRARY};
use crate::registry::IconRegistry;

/// Default wrapping tag for font glyphs.
pub const DEFAULT_TAG: &str = "i";

/// Errors produced while rendering an icon.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The icon reference carries no library key.
    #[error("icon reference has no library")]
    MissingLibrary,

    /// Writing the markup to the caller's output failed.
    #[error("failed to write icon markup")]
    Write(#[from] fmt::Error),
}

// ============================================================================
// IconRenderer
// ============================================================================

/// Renders icon references to markup, dispatching on library type.
pub struct IconRenderer<'a> {
    registry: &'a IconRegistry,
    svg: &'a dyn SvgResolver,
}

impl<'a> IconRenderer<'a> {
    /// Creates a renderer over the given registry and SVG resolver.
    pub fn new(registry: &'a IconRegistry, svg: &'a dyn SvgResolver) -> Self {
        Self { registry, svg }
    }

    /// Renders an icon with the given attributes and wrapping tag.
    pub fn render(
        &self,
        icon: &IconReference,
        attributes: Attributes,
        tag: &str,
    ) -> Result<String, RenderError> {
        if icon.library.is_empty() {
            return Err(RenderError::MissingLibrary);
        }

        if icon.library == SVG_LIBRARY {
            return Ok(self.render_svg(icon));
        }

        if let Some(descriptor) = self.registry.get(&icon.library) {
            if let RenderStrategy::Custom(callback) = &descriptor.render {
                return Ok(callback(icon, &attributes, tag));
            }
        }

        Ok(Self::render_font(icon, attributes, tag))
    }

    /// Renders with no extra attributes and the default `<i>` tag.
    pub fn render_default(&self, icon: &IconReference) -> Result<String, RenderError> {
        self.render(icon, Attributes::new(), DEFAULT_TAG)
    }

    /// Renders an icon and writes the markup to `out`.
    pub fn render_to(
        &self,
        out: &mut dyn fmt::Write,
        icon: &IconReference,
        attributes: Attributes,
        tag: &str,
    ) -> Result<(), RenderError> {
        let markup = self.render(icon, attributes, tag)?;
        out.write_str(&markup)?;
        Ok(())
    }

    fn render_svg(&self, icon: &IconReference) -> String {
        match icon.value.attachment_id() {
            Some(id) => self.svg.inline_svg(id).unwrap_or_default(),
            None => String::new(),
        }
    }

    fn render_font(icon: &IconReference, mut attributes: Attributes, tag: &str) -> String {
        if let Some(class) = icon.value.class() {
            attributes.merge("class", class);
        }
        let serialized = attributes.to_html();
        if serialized.is_empty() {
            format!("<{tag}></{tag}>")
        } else {
            format!("<{tag} {serialized}></{tag}>")
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

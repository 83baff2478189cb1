//! Inline SVG resolution.
//!
//! Uploaded vector icons live in the host's attachment storage; the renderer
//! only knows their numeric id. [`SvgResolver`] is the seam through which the
//! host supplies the actual markup.

/// Collaborator resolving attachment ids to inline SVG markup.
pub trait SvgResolver {
    /// Returns the inline markup for an attachment, or `None` if the
    /// attachment does not exist or is not an SVG.
    fn inline_svg(&self, id: u64) -> Option<String>;
}

/// Resolver for hosts without attachment storage: every lookup misses, so
/// SVG icons render as empty output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInlineSvg;

impl SvgResolver for NoInlineSvg {
    fn inline_svg(&self, _id: u64) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_inline_svg_always_misses() {
        assert!(NoInlineSvg.inline_svg(42).is_none());
    }
}

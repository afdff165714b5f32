//! Character asset loading.
//!
//! Loading is synchronous and atomic: either the whole pipeline succeeds
//! (read → parse → adopt) and yields a detached scene subtree with a known
//! intrinsic size, or it fails with [`StripletError::ResourceLoad`] and
//! nothing has been attached. Callers re-invoke on failure; there is no
//! retry or timeout here.

use std::path::Path;

use crate::error::{StripletError, StripletResult};
use crate::scene::{NodeId, SceneGraph};

/// A loaded character drawing: a detached scene subtree plus the intrinsic
/// size every downstream alignment computation depends on.
#[derive(Clone, Copy, Debug)]
pub struct CharacterFragment {
    /// Root of the adopted subtree, not yet attached to the scene tree.
    pub node: NodeId,
    /// Intrinsic width of the drawing.
    pub width: f64,
    /// Intrinsic height of the drawing.
    pub height: f64,
}

/// Fetch and parse `resource` (relative to `root`) into the scene.
///
/// The SVG is validated and measured with `usvg`, then the document's first
/// `<g>` element is cloned into the graph attribute-for-attribute. A
/// document without a group element is not a usable character drawing and
/// is rejected.
#[tracing::instrument(skip(scene, root))]
pub fn load_character_fragment(
    scene: &mut SceneGraph,
    root: &Path,
    resource: &str,
) -> StripletResult<CharacterFragment> {
    let norm = normalize_rel_path(resource)?;
    let path = root.join(&norm);
    let bytes = std::fs::read(&path)
        .map_err(|e| StripletError::resource_load(format!("read '{}': {e}", path.display())))?;

    let tree = usvg::Tree::from_data(&bytes, &usvg::Options::default())
        .map_err(|e| StripletError::resource_load(format!("parse '{norm}': {e}")))?;
    let width = f64::from(tree.size().width());
    let height = f64::from(tree.size().height());

    let text = std::str::from_utf8(&bytes)
        .map_err(|e| StripletError::resource_load(format!("decode '{norm}': {e}")))?;
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| StripletError::resource_load(format!("parse '{norm}': {e}")))?;
    let group = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "g")
        .ok_or_else(|| StripletError::resource_load(format!("'{norm}' has no <g> fragment")))?;

    let node = scene.adopt_fragment(group);
    tracing::debug!(resource = %norm, width, height, "character fragment loaded");
    Ok(CharacterFragment {
        node,
        width,
        height,
    })
}

/// Normalize and validate comic-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> StripletResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(StripletError::resource_load("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(StripletError::resource_load("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(StripletError::resource_load(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(StripletError::resource_load(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

use std::path::Path;

use kurbo::Vec2;

use crate::assets;
use crate::config::{CharacterConfig, Direction, HAlign, VAlign, non_empty_or};
use crate::error::{StripletError, StripletResult};
use crate::layout;
use crate::scene::{NodeId, SceneGraph};
use crate::transform::{self, Placement};

/// A positioned drawable loaded from an external SVG fragment.
///
/// The character's offset is never stored as independent truth: every
/// relayout recomputes it from the current alignment modes, the owning
/// panel's size, and the asset's intrinsic size.
#[derive(Clone, Debug)]
pub struct Character {
    index: usize,
    resource: String,
    v_align: VAlign,
    h_align: HAlign,
    direction: Direction,
    width: f64,
    height: f64,
    offset: Vec2,
    group: NodeId,
}

impl Character {
    /// Load the asset and attach the character under `panel_group`.
    ///
    /// The load happens first: on failure nothing has been attached and the
    /// caller's child sequence is untouched.
    pub(crate) fn new(
        scene: &mut SceneGraph,
        panel_group: NodeId,
        panel_index: usize,
        index: usize,
        config: &CharacterConfig,
        assets_root: &Path,
    ) -> StripletResult<Self> {
        for (name, value) in [("character x", config.x), ("character y", config.y)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(StripletError::invalid_dimension(format!(
                        "{name} must be finite, got {v}"
                    )));
                }
            }
        }

        let resource = non_empty_or(&config.resource, "assets/characters/default.svg");
        let fragment = assets::load_character_fragment(scene, assets_root, &resource)?;

        let group = scene.create_element("g");
        scene.set_attr(group, "id", format!("character{index}_{panel_index}"));
        scene.append_child(group, fragment.node);
        scene.append_child(panel_group, group);

        Ok(Self {
            index,
            resource,
            v_align: config.v_align.unwrap_or(VAlign::Bottom),
            h_align: config.h_align.unwrap_or(HAlign::Left),
            direction: config.direction.unwrap_or(Direction::Right),
            width: fragment.width,
            height: fragment.height,
            // Raw initial offsets; superseded by the relayout the add
            // operation triggers.
            offset: Vec2::new(config.x.unwrap_or(0.0), config.y.unwrap_or(0.0)),
            group,
        })
    }

    /// Recompute the offset from the current panel size and write the
    /// placement transform. Negative offsets are permitted; the panel clip
    /// region crops overflow.
    pub(crate) fn update(&mut self, scene: &mut SceneGraph, panel_width: f64, panel_height: f64) {
        self.offset = Vec2::new(
            layout::h_offset(self.h_align, panel_width, self.width),
            layout::v_offset(self.v_align, panel_height, self.height),
        );
        transform::apply(
            scene,
            self.group,
            Placement::new(self.offset, self.width, self.direction),
        );
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn v_align(&self) -> VAlign {
        self.v_align
    }

    pub fn h_align(&self) -> HAlign {
        self.h_align
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Intrinsic size resolved from the loaded asset.
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Offset within panel-local coordinates, as of the last relayout.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// The character's group node in the scene.
    pub fn node(&self) -> NodeId {
        self.group
    }
}

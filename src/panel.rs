use kurbo::Vec2;

use crate::character::Character;
use crate::config::{PanelConfig, finite_dimension, non_empty_or, non_zero_or};
use crate::dialog::Dialog;
use crate::error::{StripletError, StripletResult};
use crate::layout;
use crate::scene::{NodeId, SceneGraph};
use crate::transform::{self, Placement};

/// One sequential frame of the strip: a clipped rectangular content region
/// owning ordered characters and dialogs.
///
/// A panel's width is flexible unless the caller fixed it; its x-position is
/// always recomputed from the left-to-right chain. Height and y are fixed at
/// creation (header band above, footer band below).
#[derive(Clone, Debug)]
pub struct Panel {
    index: usize,
    width: f64,
    height: f64,
    x: f64,
    y: f64,
    fixed_width: bool,
    fill: String,
    clip_rect: NodeId,
    group: NodeId,
    backdrop: NodeId,
    characters: Vec<Character>,
    dialogs: Vec<Dialog>,
}

impl Panel {
    /// Build the panel's scene scaffolding: a `clipPath` (id `clip{index}`)
    /// with its rect in `defs`, a clipped content group on the root, and the
    /// background rect inside the group.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        scene: &mut SceneGraph,
        defs: NodeId,
        index: usize,
        config: &PanelConfig,
        comic_width: f64,
        comic_height: f64,
        gutter: f64,
        font_size: f64,
        initial_x: f64,
    ) -> StripletResult<Self> {
        let fixed = config.width.filter(|w| *w != 0.0);
        if let Some(w) = fixed {
            finite_dimension("panel width", w)?;
        }
        let height = finite_dimension(
            "panel height",
            non_zero_or(config.height, comic_height - 3.0 * font_size),
        )?;
        for (name, value) in [("panel x", config.x), ("panel y", config.y)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(StripletError::invalid_dimension(format!(
                        "{name} must be finite, got {v}"
                    )));
                }
            }
        }
        let x = non_zero_or(config.x, initial_x);
        let y = non_zero_or(config.y, font_size + 3.0);
        // Provisional width for flexible panels; the relayout that follows
        // the append recomputes the real share.
        let width = fixed.unwrap_or(comic_width - gutter * (index as f64 + 2.0));
        let fill = non_empty_or(&config.fill, "aliceblue");

        let clip_path = scene.create_element("clipPath");
        scene.set_attr(clip_path, "id", format!("clip{index}"));
        let clip_rect = scene.create_element("rect");
        scene.set_attr_num(clip_rect, "width", width);
        scene.set_attr_num(clip_rect, "height", height);
        scene.append_child(clip_path, clip_rect);
        scene.append_child(defs, clip_path);

        let group = scene.create_element("g");
        scene.set_attr(group, "clip-path", format!("url(#clip{index})"));
        scene.set_attr_num(group, "width", width);
        scene.set_attr_num(group, "height", height);
        let root = scene.root();
        scene.append_child(root, group);

        let backdrop = scene.create_element("rect");
        scene.set_attr_num(backdrop, "width", width);
        scene.set_attr_num(backdrop, "height", height);
        scene.set_attr(backdrop, "fill", fill.clone());
        scene.append_child(group, backdrop);

        let mut panel = Self {
            index,
            width,
            height,
            x,
            y,
            fixed_width: fixed.is_some(),
            fill,
            clip_rect,
            group,
            backdrop,
            characters: Vec::new(),
            dialogs: Vec::new(),
        };
        panel.apply_transform(scene);
        Ok(panel)
    }

    /// One relayout step: width (if flexible) → x (always) → scene attribute
    /// propagation → every character, then every dialog, in index order.
    ///
    /// `previous` is the already-laid-out left sibling's `(x, width)`; its
    /// geometry must be final before this panel consumes it.
    pub(crate) fn apply_layout(
        &mut self,
        scene: &mut SceneGraph,
        flexible_width: f64,
        previous: Option<(f64, f64)>,
        gutter: f64,
        font_size: f64,
    ) {
        if !self.fixed_width {
            self.width = flexible_width;
            scene.set_attr_num(self.clip_rect, "width", self.width);
            scene.set_attr_num(self.group, "width", self.width);
            scene.set_attr_num(self.backdrop, "width", self.width);
        }
        self.x = layout::next_panel_x(previous, gutter);
        self.apply_transform(scene);

        for character in &mut self.characters {
            character.update(scene, self.width, self.height);
        }
        for dialog in &mut self.dialogs {
            dialog.update(scene, self.width, self.height, font_size);
        }
    }

    fn apply_transform(&self, scene: &mut SceneGraph) {
        transform::apply(scene, self.group, Placement::at(Vec2::new(self.x, self.y)));
    }

    pub(crate) fn push_character(&mut self, character: Character) {
        self.characters.push(character);
    }

    pub(crate) fn push_dialog(&mut self, dialog: Dialog) {
        self.dialogs.push(dialog);
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_fixed_width(&self) -> bool {
        self.fixed_width
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn dialogs(&self) -> &[Dialog] {
        &self.dialogs
    }

    /// The panel's content group node in the scene.
    pub fn node(&self) -> NodeId {
        self.group
    }
}

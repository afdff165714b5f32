use std::path::{Path, PathBuf};

use crate::character::Character;
use crate::config::{
    CharacterConfig, ComicConfig, DialogConfig, PanelConfig, default_copyright, finite_dimension,
    non_empty_or, non_zero_or,
};
use crate::dialog::Dialog;
use crate::error::{StripletError, StripletResult};
use crate::layout;
use crate::panel::Panel;
use crate::scene::{NodeId, SceneGraph};

/// Handle to a panel within its comic. Panels are never removed, so ids
/// stay valid for the comic's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PanelId(pub(crate) usize);

/// Handle to a character within its panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharacterId {
    pub(crate) panel: PanelId,
    pub(crate) index: usize,
}

/// Handle to a dialog within its panel's stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DialogId {
    pub(crate) panel: PanelId,
    pub(crate) index: usize,
}

impl CharacterId {
    pub fn panel(self) -> PanelId {
        self.panel
    }
}

impl DialogId {
    pub fn panel(self) -> PanelId {
        self.panel
    }
}

/// The composition root: global dimensions, header/footer scaffolding, and
/// the ordered panel sequence.
///
/// Every mutation (`add_panel`, `add_character`, `add_dialog`) finishes its
/// geometry recomputation and scene updates before returning; panels are
/// walked left to right so a panel's width is final before the next panel's
/// x consumes it.
#[derive(Clone, Debug)]
pub struct Comic {
    width: f64,
    height: f64,
    gutter: f64,
    font_size: f64,
    fill: String,
    text_color: String,
    title: String,
    author: String,
    subtitle: String,
    copyright: String,
    assets_root: PathBuf,
    scene: SceneGraph,
    defs: NodeId,
    panels: Vec<Panel>,
}

impl Comic {
    /// Resolve options against defaults, validate dimensions, and build the
    /// scene scaffolding (defs, backdrop, title/author/subtitle/copyright).
    ///
    /// `assets_root` anchors relative character resource paths.
    pub fn new(config: &ComicConfig, assets_root: impl Into<PathBuf>) -> StripletResult<Self> {
        let width = finite_dimension("comic width", non_zero_or(config.width, 800.0))?;
        let height = finite_dimension("comic height", non_zero_or(config.height, 300.0))?;
        let gutter = finite_dimension("comic xGutter", non_zero_or(config.x_gutter, 10.0))?;
        let font_size = finite_dimension("comic fontSize", non_zero_or(config.font_size, 12.0))?;

        let author = non_empty_or(&config.author, "A. N. Onymous");
        let copyright = match &config.copyright {
            Some(c) if !c.is_empty() => c.clone(),
            _ => default_copyright(&author),
        };
        let fill = non_empty_or(&config.fill, "black");
        let text_color = non_empty_or(&config.text_color, "white");
        let title = non_empty_or(&config.title, "Untitled");
        let subtitle = config.subtitle.clone().unwrap_or_default();

        let mut scene = SceneGraph::new();
        let root = scene.root();
        scene.set_attr_num(root, "width", width);
        scene.set_attr_num(root, "height", height);

        let defs = scene.create_element("defs");
        scene.append_child(root, defs);

        let backdrop = scene.create_element("rect");
        scene.set_attr_num(backdrop, "width", width);
        scene.set_attr_num(backdrop, "height", height);
        scene.set_attr(backdrop, "fill", fill.clone());
        scene.append_child(root, backdrop);

        let header_y = font_size + 1.0;
        let footer_y = height - font_size / 2.0;
        caption(&mut scene, &title, &text_color, font_size, gutter, header_y, "start");
        caption(&mut scene, &author, &text_color, font_size, width - gutter, header_y, "end");
        caption(&mut scene, &subtitle, &text_color, font_size, gutter, footer_y, "start");
        caption(&mut scene, &copyright, &text_color, font_size, width - gutter, footer_y, "end");

        Ok(Self {
            width,
            height,
            gutter,
            font_size,
            fill,
            text_color,
            title,
            author,
            subtitle,
            copyright,
            assets_root: assets_root.into(),
            scene,
            defs,
            panels: Vec::new(),
        })
    }

    /// Append a panel and relayout the whole strip. The new panel's index is
    /// its position in the sequence, fixed at creation.
    pub fn add_panel(&mut self, config: &PanelConfig) -> StripletResult<PanelId> {
        let index = self.panels.len();
        let initial_x = layout::next_panel_x(
            self.panels.last().map(|p| (p.x(), p.width())),
            self.gutter,
        );
        let panel = Panel::new(
            &mut self.scene,
            self.defs,
            index,
            config,
            self.width,
            self.height,
            self.gutter,
            self.font_size,
            initial_x,
        )?;
        self.panels.push(panel);
        self.relayout();
        tracing::debug!(panel = index, "panel added");
        Ok(PanelId(index))
    }

    /// Load the character's asset (blocking until its size is known), append
    /// it to the panel, and relayout.
    ///
    /// On a load failure the error propagates, the character is not added,
    /// and layout is unchanged.
    pub fn add_character(
        &mut self,
        panel: PanelId,
        config: &CharacterConfig,
    ) -> StripletResult<CharacterId> {
        let panel_ref = self
            .panels
            .get_mut(panel.0)
            .ok_or_else(|| unknown_id("panel", panel.0))?;
        let index = panel_ref.characters().len();
        let character = Character::new(
            &mut self.scene,
            panel_ref.node(),
            panel_ref.index(),
            index,
            config,
            &self.assets_root,
        )?;
        panel_ref.push_character(character);
        self.relayout();
        Ok(CharacterId { panel, index })
    }

    /// Append a dialog to the owning panel's stack and relayout. The dialog
    /// inherits the character's horizontal alignment unless the config sets
    /// its own.
    pub fn add_dialog(
        &mut self,
        character: CharacterId,
        config: &DialogConfig,
    ) -> StripletResult<DialogId> {
        let panel_ref = self
            .panels
            .get_mut(character.panel.0)
            .ok_or_else(|| unknown_id("panel", character.panel.0))?;
        let inherited = panel_ref
            .characters()
            .get(character.index)
            .ok_or_else(|| unknown_id("character", character.index))?
            .h_align();
        let index = panel_ref.dialogs().len();
        let dialog = Dialog::new(&mut self.scene, panel_ref.node(), index, config, inherited);
        panel_ref.push_dialog(dialog);
        self.relayout();
        Ok(DialogId {
            panel: character.panel,
            index,
        })
    }

    /// Full recomputation pass restoring every geometric invariant.
    ///
    /// Walks panels in index order: flexible width share first, then each
    /// panel's width → x → children, left to right, so earlier panels'
    /// widths have shifted later panels' x-positions before those are read.
    #[tracing::instrument(skip(self), fields(panels = self.panels.len()))]
    pub fn relayout(&mut self) {
        let panel_count = self.panels.len();
        let fixed: Vec<f64> = self
            .panels
            .iter()
            .filter(|p| p.is_fixed_width())
            .map(Panel::width)
            .collect();
        let share = layout::flexible_panel_width(
            self.width,
            self.gutter,
            panel_count,
            fixed.iter().sum(),
            fixed.len(),
        );

        let mut previous = None;
        for panel in &mut self.panels {
            panel.apply_layout(&mut self.scene, share, previous, self.gutter, self.font_size);
            previous = Some((panel.x(), panel.width()));
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn gutter(&self) -> f64 {
        self.gutter
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id.0)
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.panels.get(id.panel.0)?.characters().get(id.index)
    }

    pub fn dialog(&self, id: DialogId) -> Option<&Dialog> {
        self.panels.get(id.panel.0)?.dialogs().get(id.index)
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }
}

fn caption(
    scene: &mut SceneGraph,
    text: &str,
    color: &str,
    font_size: f64,
    x: f64,
    y: f64,
    anchor: &str,
) -> NodeId {
    let node = scene.create_element("text");
    scene.set_text(node, text);
    scene.set_attr(node, "fill", color);
    scene.set_attr_num(node, "x", x);
    scene.set_attr_num(node, "y", y);
    scene.set_attr(node, "text-anchor", anchor);
    scene.set_attr(node, "font-weight", "bold");
    scene.set_attr_num(node, "font-size", font_size);
    let root = scene.root();
    scene.append_child(root, node);
    node
}

fn unknown_id(kind: &str, index: usize) -> StripletError {
    StripletError::Other(anyhow::anyhow!("unknown {kind} index {index}"))
}

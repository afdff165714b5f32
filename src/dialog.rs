use kurbo::Vec2;

use crate::config::{BubbleStyle, DialogConfig, HAlign, VAlign};
use crate::layout;
use crate::scene::{NodeId, SceneGraph};
use crate::transform::{self, Placement};

/// A positioned line of dialog text.
///
/// Dialogs belong to the panel, not to the character that spoke them, so
/// several characters share one stack; the index within the panel's dialog
/// sequence determines vertical stacking order. Horizontal placement is
/// carried by the derived text-anchor, so the text's own extent is zero for
/// alignment purposes.
#[derive(Clone, Debug)]
pub struct Dialog {
    index: usize,
    text: String,
    style: BubbleStyle,
    h_align: HAlign,
    v_align: VAlign,
    offset: Vec2,
    node: NodeId,
}

impl Dialog {
    pub(crate) fn new(
        scene: &mut SceneGraph,
        panel_group: NodeId,
        index: usize,
        config: &DialogConfig,
        inherited_h_align: HAlign,
    ) -> Self {
        let text = config.text.clone().unwrap_or_default();
        let style = config.style.unwrap_or(BubbleStyle::Rounded);
        let h_align = config.h_align.unwrap_or(inherited_h_align);
        let v_align = config.v_align.unwrap_or(VAlign::Top);

        let node = scene.create_element("text");
        scene.set_text(node, text.clone());
        scene.set_attr(node, "fill", "black");
        scene.set_attr(node, "text-anchor", layout::text_anchor(h_align));
        scene.set_attr(node, "class", format!("bubble-{}", style.as_name()));
        scene.append_child(panel_group, node);

        Self {
            index,
            text,
            style,
            h_align,
            v_align,
            offset: Vec2::ZERO,
            node,
        }
    }

    /// Recompute the offset from the current panel size and stack position,
    /// then write the placement transform.
    pub(crate) fn update(
        &mut self,
        scene: &mut SceneGraph,
        panel_width: f64,
        panel_height: f64,
        font_size: f64,
    ) {
        let y = match self.v_align {
            VAlign::Top => layout::stacked_line_y(font_size, self.index),
            VAlign::Middle | VAlign::Bottom => layout::v_offset(self.v_align, panel_height, 0.0),
        };
        self.offset = Vec2::new(layout::h_offset(self.h_align, panel_width, 0.0), y);
        transform::apply(scene, self.node, Placement::at(self.offset));
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> BubbleStyle {
        self.style
    }

    pub fn h_align(&self) -> HAlign {
        self.h_align
    }

    pub fn v_align(&self) -> VAlign {
        self.v_align
    }

    /// Offset within panel-local coordinates, as of the last relayout.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// The dialog's text node in the scene.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

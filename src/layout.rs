//! Pure layout math: panel width partition, x-position chaining, and
//! alignment offsets. Everything here is a total function over validated
//! numeric input; entities decide when to recompute, this module decides
//! what the values are.

use crate::config::{HAlign, VAlign};

/// Equal share of leftover width for one flexible panel.
///
/// Leftover = comic width minus one gutter per panel plus one more for the
/// trailing edge, minus all fixed panel widths. Defined as 0 when every
/// panel is fixed (degenerate case, no division by zero).
pub fn flexible_panel_width(
    comic_width: f64,
    gutter: f64,
    panel_count: usize,
    fixed_width_sum: f64,
    fixed_count: usize,
) -> f64 {
    let flexible_count = panel_count - fixed_count;
    if flexible_count == 0 {
        return 0.0;
    }
    let leftover = comic_width - gutter * (panel_count as f64 + 1.0) - fixed_width_sum;
    leftover / flexible_count as f64
}

/// Next available x-position: one gutter in from the left edge for the
/// first panel, one gutter past the previous panel's right edge otherwise.
pub fn next_panel_x(previous: Option<(f64, f64)>, gutter: f64) -> f64 {
    match previous {
        Some((prev_x, prev_width)) => prev_x + prev_width + gutter,
        None => gutter,
    }
}

/// Horizontal offset of content inside a container.
///
/// Not clamped: content wider than its container yields a negative offset,
/// which the panel clip region crops.
pub fn h_offset(align: HAlign, container: f64, content: f64) -> f64 {
    match align {
        HAlign::Left => 0.0,
        HAlign::Center => container / 2.0 - content / 2.0,
        HAlign::Right => container - content,
    }
}

/// Vertical offset of content inside a container. Unclamped, like
/// [`h_offset`].
pub fn v_offset(align: VAlign, container: f64, content: f64) -> f64 {
    match align {
        VAlign::Top => 0.0,
        VAlign::Middle => container / 2.0 - content / 2.0,
        VAlign::Bottom => container - content,
    }
}

/// Height of one dialog line in panel-local units.
pub fn line_unit(font_size: f64) -> f64 {
    font_size + 3.0
}

/// y-offset of the top-aligned dialog at `index` in its panel's stack.
/// Strictly increasing in `index`, so stacked dialogs never overlap.
pub fn stacked_line_y(font_size: f64, index: usize) -> f64 {
    line_unit(font_size) * (index as f64 + 1.0)
}

/// SVG text-anchor equivalent of a horizontal alignment mode.
pub fn text_anchor(align: HAlign) -> &'static str {
    match align {
        HAlign::Left => "start",
        HAlign::Center => "middle",
        HAlign::Right => "end",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_panels_partition_leftover_equally() {
        // 800 wide, 10 gutter, 2 flexible panels: (800 - 30) / 2.
        assert_eq!(flexible_panel_width(800.0, 10.0, 2, 0.0, 0), 385.0);
        // One fixed 100-wide panel among 3: (800 - 40 - 100) / 2.
        assert_eq!(flexible_panel_width(800.0, 10.0, 3, 100.0, 1), 330.0);
    }

    #[test]
    fn all_fixed_panels_degenerate_to_zero_share() {
        assert_eq!(flexible_panel_width(800.0, 10.0, 2, 700.0, 2), 0.0);
    }

    #[test]
    fn x_positions_chain_left_to_right() {
        assert_eq!(next_panel_x(None, 10.0), 10.0);
        assert_eq!(next_panel_x(Some((10.0, 385.0)), 10.0), 405.0);
    }

    #[test]
    fn offsets_follow_alignment_modes() {
        assert_eq!(h_offset(HAlign::Left, 385.0, 40.0), 0.0);
        assert_eq!(h_offset(HAlign::Center, 385.0, 40.0), 172.5);
        assert_eq!(h_offset(HAlign::Right, 385.0, 40.0), 345.0);

        assert_eq!(v_offset(VAlign::Top, 264.0, 80.0), 0.0);
        assert_eq!(v_offset(VAlign::Middle, 264.0, 80.0), 92.0);
        assert_eq!(v_offset(VAlign::Bottom, 264.0, 80.0), 184.0);
    }

    #[test]
    fn oversized_content_yields_negative_offsets() {
        assert_eq!(h_offset(HAlign::Right, 100.0, 140.0), -40.0);
        assert_eq!(v_offset(VAlign::Bottom, 100.0, 140.0), -40.0);
    }

    #[test]
    fn dialog_lines_stack_without_overlap() {
        assert_eq!(stacked_line_y(12.0, 0), 15.0);
        assert_eq!(stacked_line_y(12.0, 1), 30.0);
        assert_eq!(stacked_line_y(12.0, 2), 45.0);
    }

    #[test]
    fn text_anchor_tracks_h_align() {
        assert_eq!(text_anchor(HAlign::Left), "start");
        assert_eq!(text_anchor(HAlign::Center), "middle");
        assert_eq!(text_anchor(HAlign::Right), "end");
    }
}

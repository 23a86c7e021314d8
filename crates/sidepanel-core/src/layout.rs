// ── Layout constants ──
//
// Pixel values the browser chrome uses for tab strip and toolbar
// geometry. Branded overrides come first; anything they don't handle
// falls back to the upstream table.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::features::{FeatureList, HORIZONTAL_TABS_UPDATE};

/// Named layout constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutConstant {
    TabHeight,
    TabstripToolbarOverlap,
    TabSeparatorHeight,
    LocationBarHeight,
    ToolbarButtonHeight,
    ToolbarElementPadding,
    BookmarkBarHeight,
}

/// Inputs the lookup depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutContext {
    /// Touch-optimized UI is active.
    pub touch_ui: bool,
    /// The horizontal tabs update feature is on.
    pub horizontal_tabs_update: bool,
}

impl LayoutContext {
    pub fn new(touch_ui: bool, features: &FeatureList) -> Self {
        Self {
            touch_ui,
            horizontal_tabs_update: features.is_enabled(&HORIZONTAL_TABS_UPDATE),
        }
    }
}

/// Branded override for `constant`, or `None` if the brand doesn't
/// handle it and the caller should use its own default.
pub fn brand_layout_constant(constant: LayoutConstant, ctx: LayoutContext) -> Option<i32> {
    let touch = ctx.touch_ui;
    match constant {
        LayoutConstant::TabHeight => {
            let tab_height = if ctx.horizontal_tabs_update { 36 } else { 30 };
            let base = if touch { 41 } else { tab_height };
            Some(base + layout_constant(LayoutConstant::TabstripToolbarOverlap, ctx))
        }
        LayoutConstant::TabstripToolbarOverlap => ctx.horizontal_tabs_update.then_some(0),
        LayoutConstant::TabSeparatorHeight => Some(24),
        LayoutConstant::LocationBarHeight => Some(if touch { 36 } else { 34 }),
        _ => None,
    }
}

/// Effective value: branded override, else the upstream default.
pub fn layout_constant(constant: LayoutConstant, ctx: LayoutContext) -> i32 {
    brand_layout_constant(constant, ctx).unwrap_or_else(|| upstream_layout_constant(constant, ctx))
}

/// Branded override looked up by name. Unknown names have no value.
pub fn lookup_by_name(name: &str, ctx: LayoutContext) -> Option<i32> {
    let constant: LayoutConstant = name.parse().ok()?;
    brand_layout_constant(constant, ctx)
}

fn upstream_layout_constant(constant: LayoutConstant, ctx: LayoutContext) -> i32 {
    let touch = ctx.touch_ui;
    match constant {
        LayoutConstant::TabHeight => {
            (if touch { 41 } else { 34 })
                + upstream_layout_constant(LayoutConstant::TabstripToolbarOverlap, ctx)
        }
        LayoutConstant::TabstripToolbarOverlap => 1,
        LayoutConstant::TabSeparatorHeight => {
            if touch {
                24
            } else {
                20
            }
        }
        LayoutConstant::LocationBarHeight => {
            if touch {
                36
            } else {
                28
            }
        }
        LayoutConstant::ToolbarButtonHeight => {
            if touch {
                48
            } else {
                28
            }
        }
        LayoutConstant::ToolbarElementPadding => {
            if touch {
                8
            } else {
                4
            }
        }
        LayoutConstant::BookmarkBarHeight => {
            if touch {
                36
            } else {
                28
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn ctx(touch_ui: bool, horizontal_tabs_update: bool) -> LayoutContext {
        LayoutContext {
            touch_ui,
            horizontal_tabs_update,
        }
    }

    #[test]
    fn tab_height_includes_overlap() {
        // Feature off: the brand doesn't handle the overlap, upstream says 1.
        assert_eq!(brand_layout_constant(LayoutConstant::TabHeight, ctx(false, false)), Some(31));
        // Feature on: taller tabs, no overlap.
        assert_eq!(brand_layout_constant(LayoutConstant::TabHeight, ctx(false, true)), Some(36));
        assert_eq!(brand_layout_constant(LayoutConstant::TabHeight, ctx(true, false)), Some(42));
        assert_eq!(brand_layout_constant(LayoutConstant::TabHeight, ctx(true, true)), Some(41));
    }

    #[test]
    fn overlap_only_handled_with_feature() {
        assert_eq!(
            brand_layout_constant(LayoutConstant::TabstripToolbarOverlap, ctx(false, false)),
            None
        );
        assert_eq!(
            brand_layout_constant(LayoutConstant::TabstripToolbarOverlap, ctx(true, true)),
            Some(0)
        );
        assert_eq!(
            layout_constant(LayoutConstant::TabstripToolbarOverlap, ctx(false, false)),
            1
        );
    }

    #[test]
    fn location_bar_depends_on_touch() {
        assert_eq!(
            brand_layout_constant(LayoutConstant::LocationBarHeight, ctx(false, false)),
            Some(34)
        );
        assert_eq!(
            brand_layout_constant(LayoutConstant::LocationBarHeight, ctx(true, false)),
            Some(36)
        );
    }

    #[test]
    fn separator_is_fixed() {
        for touch in [false, true] {
            assert_eq!(
                brand_layout_constant(LayoutConstant::TabSeparatorHeight, ctx(touch, false)),
                Some(24)
            );
        }
    }

    #[test]
    fn unhandled_constants_fall_back_to_upstream() {
        assert_eq!(
            brand_layout_constant(LayoutConstant::ToolbarButtonHeight, ctx(false, false)),
            None
        );
        assert_eq!(layout_constant(LayoutConstant::ToolbarButtonHeight, ctx(true, false)), 48);
    }

    #[test]
    fn unknown_name_has_no_value() {
        for touch in [false, true] {
            assert_eq!(lookup_by_name("OMNIBOX_WIDTH", ctx(touch, false)), None);
            assert_eq!(lookup_by_name("OMNIBOX_WIDTH", ctx(touch, true)), None);
        }
    }

    #[test]
    fn names_parse_in_screaming_snake_case() {
        assert_eq!(lookup_by_name("TAB_SEPARATOR_HEIGHT", ctx(false, false)), Some(24));
        for constant in LayoutConstant::iter() {
            let parsed: LayoutConstant = constant.to_string().parse().unwrap_or(constant);
            assert_eq!(parsed, constant);
        }
    }

    #[test]
    fn context_reads_feature_state() {
        let features = FeatureList::default();
        assert!(!LayoutContext::new(true, &features).horizontal_tabs_update);
    }
}

// ── Runtime configuration ──
//
// What the process decided at startup: touch mode and the resolved
// feature list. Built by the config crate, never touches disk.

use crate::features::FeatureList;
use crate::layout::LayoutContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Touch-optimized UI.
    pub touch_ui: bool,
    pub features: FeatureList,
}

impl RuntimeConfig {
    pub fn layout_context(&self) -> LayoutContext {
        LayoutContext::new(self.touch_ui, &self.features)
    }
}

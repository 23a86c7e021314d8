// ── Feature flags ──
//
// Process-wide named switches with typed parameters. Declarations are
// statics; the configured state lives in a `FeatureList` built once at
// startup from user configuration.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Whether a feature is on when nothing overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureState {
    EnabledByDefault,
    DisabledByDefault,
}

/// A named switch.
#[derive(Debug)]
pub struct Feature {
    pub name: &'static str,
    pub default_state: FeatureState,
}

/// A typed parameter attached to a [`Feature`].
///
/// Resolves to `default` whenever the feature is off or the configured
/// value doesn't parse.
#[derive(Debug)]
pub struct FeatureParam<T: 'static> {
    pub feature: &'static Feature,
    pub name: &'static str,
    pub default: T,
}

// ── Declarations ─────────────────────────────────────────────────────

/// Serving of inline content ads on the new tab page.
pub static INLINE_CONTENT_AD_SERVING: Feature = Feature {
    name: "InlineContentAdServing",
    default_state: FeatureState::EnabledByDefault,
};

/// Serving algorithm revision for inline content ads.
pub static INLINE_CONTENT_AD_SERVING_VERSION: FeatureParam<i32> = FeatureParam {
    feature: &INLINE_CONTENT_AD_SERVING,
    name: "version",
    default: 2,
};

/// Taller horizontal tab strip.
pub static HORIZONTAL_TABS_UPDATE: Feature = Feature {
    name: "HorizontalTabsUpdate",
    default_state: FeatureState::DisabledByDefault,
};

/// Every declared feature, for listing.
pub fn declared_features() -> [&'static Feature; 2] {
    [&INLINE_CONTENT_AD_SERVING, &HORIZONTAL_TABS_UPDATE]
}

// ── Configured state ─────────────────────────────────────────────────

/// User override for one feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOverride {
    /// Force the feature on or off. `None` keeps the default state.
    pub enabled: Option<bool>,
    /// Raw parameter values, parsed on lookup.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

/// Resolved feature configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureList {
    overrides: BTreeMap<String, FeatureOverride>,
}

impl FeatureList {
    pub fn new(overrides: BTreeMap<String, FeatureOverride>) -> Self {
        for name in overrides.keys() {
            if !declared_features().iter().any(|f| f.name == name) {
                warn!(feature = %name, "override for undeclared feature");
            }
        }
        Self { overrides }
    }

    pub fn is_enabled(&self, feature: &Feature) -> bool {
        self.overrides
            .get(feature.name)
            .and_then(|o| o.enabled)
            .unwrap_or(feature.default_state == FeatureState::EnabledByDefault)
    }

    /// Raw configured value of a parameter, ignoring the feature state.
    pub fn raw_param(&self, feature: &Feature, name: &str) -> Option<&str> {
        self.overrides
            .get(feature.name)
            .and_then(|o| o.params.get(name))
            .map(String::as_str)
    }
}

impl<T: FromStr + Copy> FeatureParam<T> {
    pub fn get(&self, features: &FeatureList) -> T {
        if !features.is_enabled(self.feature) {
            return self.default;
        }
        let Some(raw) = features.raw_param(self.feature, self.name) else {
            return self.default;
        };
        raw.parse().unwrap_or_else(|_| {
            warn!(
                feature = self.feature.name,
                param = self.name,
                value = raw,
                "unparsable feature parameter, using default"
            );
            self.default
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(name: &str, enabled: Option<bool>, params: &[(&str, &str)]) -> FeatureList {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            name.to_owned(),
            FeatureOverride {
                enabled,
                params: params
                    .iter()
                    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                    .collect(),
            },
        );
        FeatureList::new(overrides)
    }

    #[test]
    fn defaults_without_overrides() {
        let features = FeatureList::default();
        assert!(features.is_enabled(&INLINE_CONTENT_AD_SERVING));
        assert!(!features.is_enabled(&HORIZONTAL_TABS_UPDATE));
        assert_eq!(INLINE_CONTENT_AD_SERVING_VERSION.get(&features), 2);
    }

    #[test]
    fn configured_param_is_used() {
        let features = with("InlineContentAdServing", None, &[("version", "3")]);
        assert_eq!(INLINE_CONTENT_AD_SERVING_VERSION.get(&features), 3);
    }

    #[test]
    fn disabled_feature_falls_back_to_default_param() {
        let features = with("InlineContentAdServing", Some(false), &[("version", "3")]);
        assert!(!features.is_enabled(&INLINE_CONTENT_AD_SERVING));
        assert_eq!(INLINE_CONTENT_AD_SERVING_VERSION.get(&features), 2);
    }

    #[test]
    fn unparsable_param_falls_back_to_default() {
        let features = with("InlineContentAdServing", None, &[("version", "two")]);
        assert_eq!(INLINE_CONTENT_AD_SERVING_VERSION.get(&features), 2);
    }

    #[test]
    fn override_enables_disabled_feature() {
        let features = with("HorizontalTabsUpdate", Some(true), &[]);
        assert!(features.is_enabled(&HORIZONTAL_TABS_UPDATE));
    }
}

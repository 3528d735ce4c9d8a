//! Three-layer configuration resolution.
//!
//! Every widget instance runs with one immutable, effective configuration
//! built from, in increasing precedence:
//!
//! 1. the widget's built-in defaults ([`Default`]),
//! 2. caller-supplied overrides (a typed options struct),
//! 3. the node's `data-*` attributes.
//!
//! Attribute values equal to `true` or `false` (any case) become booleans,
//! everything else stays text. The `selector` key only drives scanning and
//! is never applied. A key a widget does not know, or a value of the wrong
//! shape, falls back to the lower layers.

use std::collections::BTreeMap;

/// A declarative attribute value after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Text(String),
}

impl ConfigValue {
    /// Coerce a raw attribute value.
    pub fn from_attribute(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            ConfigValue::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            ConfigValue::Bool(false)
        } else {
            ConfigValue::Text(raw.to_string())
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            ConfigValue::Bool(_) => None,
        }
    }

    /// A non-negative integer spelled as text.
    pub fn as_index(&self) -> Option<usize> {
        self.as_text().and_then(|s| s.trim().parse().ok())
    }
}

/// A widget configuration that can be layered.
pub trait Configure: Default + Clone {
    /// Caller overrides; every field optional.
    type Overrides: Default;

    /// Apply caller overrides on top of `self`.
    fn override_with(&mut self, overrides: &Self::Overrides);

    /// Apply one declarative key (camel-cased, without the `data-` prefix).
    ///
    /// Returns `false` when the key is unknown or the value has the wrong
    /// shape, leaving `self` untouched.
    fn apply(&mut self, key: &str, value: &ConfigValue) -> bool;
}

/// Merge defaults, `overrides` and a node's `dataset` into one effective
/// configuration.
pub fn resolve<C: Configure>(overrides: &C::Overrides, dataset: &BTreeMap<String, String>) -> C {
    let mut config = C::default();
    config.override_with(overrides);
    for (key, raw) in dataset {
        if key == "selector" {
            continue;
        }
        let value = ConfigValue::from_attribute(raw);
        if !config.apply(key, &value) {
            tracing::debug!(key = %key, value = %raw, "declarative config key ignored");
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Demo {
        flag: bool,
        label: String,
    }

    impl Default for Demo {
        fn default() -> Self {
            Self {
                flag: false,
                label: "default".into(),
            }
        }
    }

    #[derive(Default)]
    struct DemoOverrides {
        label: Option<String>,
    }

    impl Configure for Demo {
        type Overrides = DemoOverrides;

        fn override_with(&mut self, overrides: &DemoOverrides) {
            if let Some(label) = &overrides.label {
                self.label = label.clone();
            }
        }

        fn apply(&mut self, key: &str, value: &ConfigValue) -> bool {
            match (key, value) {
                ("flag", ConfigValue::Bool(b)) => self.flag = *b,
                ("label", ConfigValue::Text(s)) => self.label = s.clone(),
                _ => return false,
            }
            true
        }
    }

    fn dataset(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn coercion_is_case_insensitive() {
        assert_eq!(ConfigValue::from_attribute("TRUE"), ConfigValue::Bool(true));
        assert_eq!(ConfigValue::from_attribute("False"), ConfigValue::Bool(false));
        assert_eq!(
            ConfigValue::from_attribute("yes"),
            ConfigValue::Text("yes".into())
        );
        assert_eq!(ConfigValue::Text(" 3 ".into()).as_index(), Some(3));
    }

    #[test]
    fn layers_apply_in_order() {
        let overrides = DemoOverrides {
            label: Some("caller".into()),
        };
        let config: Demo = resolve(&overrides, &dataset(&[]));
        assert_eq!(config.label, "caller");

        let config: Demo = resolve(&overrides, &dataset(&[("label", "node"), ("flag", "TRUE")]));
        assert_eq!(
            config,
            Demo {
                flag: true,
                label: "node".into()
            }
        );
    }

    #[test]
    fn wrong_shape_and_selector_fall_through() {
        let config: Demo = resolve(
            &DemoOverrides::default(),
            &dataset(&[("flag", "maybe"), ("selector", "select"), ("unknown", "1")]),
        );
        assert_eq!(config, Demo::default());
    }
}

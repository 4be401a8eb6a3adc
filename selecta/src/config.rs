//! Widget configuration.

use serde::Deserialize;

use crate::error::SelectaError;

/// Key codes of the alphanumerics on most ISO keyboards (`0-9`, `A-Z`).
pub fn default_keyboard_codes() -> Vec<u16> {
    (48..=57).chain(65..=90).collect()
}

/// Host-facing configuration.
///
/// Defaults match the stock stylesheet class names. Can be loaded from a
/// partial camelCase JSON object; missing keys keep their defaults.
///
/// # Example
///
/// ```ignore
/// let config = SelectaConfig::from_json(r#"{ "selector": "select.fancy", "wrapperHeight": 8 }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectaConfig {
    /// Selector for the native controls to convert.
    pub selector: String,
    /// Selector for a positioned ancestor the popup is placed relative to.
    pub position_relative_selector: Option<String>,

    pub trigger_class: String,
    /// Compensates for the trigger's horizontal text padding.
    pub trigger_padding: i32,
    /// Decorative image drawn before the trigger (empty = none).
    pub trigger_before_image: String,
    pub trigger_before_image_width: i32,
    pub trigger_before_image_height: i32,

    pub wrapper_class: String,
    /// Added to (or subtracted from) the computed popup width.
    pub wrapper_width_adjustment: i32,
    /// Extra class on the popup, e.g. one carrying a shadow.
    pub wrapper_shadow: String,
    /// Maximum popup height before it scrolls; 0 means unlimited.
    pub wrapper_height: i32,

    pub option_class: String,
    pub option_class_selected: String,
    pub option_disabled_class: String,
    pub option_class_over: String,

    /// When false, any host text selection is cleared on open.
    pub allow_text_select: bool,
    /// Key codes eligible for type-ahead search.
    pub allowed_keyboard_codes: Vec<u16>,
    /// Close open popups on clicks outside any trigger.
    pub use_click_listener: bool,
}

impl Default for SelectaConfig {
    fn default() -> Self {
        Self {
            selector: "select.selecta".into(),
            position_relative_selector: None,
            trigger_class: "selectaTrigger".into(),
            trigger_padding: 30 + 5,
            trigger_before_image: String::new(),
            trigger_before_image_width: 0,
            trigger_before_image_height: 0,
            wrapper_class: "selectaWrapper".into(),
            wrapper_width_adjustment: 0,
            wrapper_shadow: "shadowy".into(),
            wrapper_height: 0,
            option_class: "selectaOption".into(),
            option_class_selected: "selectaOptionSelected".into(),
            option_disabled_class: "selectaDisabled".into(),
            option_class_over: "selectaOptionOver".into(),
            allow_text_select: false,
            allowed_keyboard_codes: default_keyboard_codes(),
            use_click_listener: true,
        }
    }
}

impl SelectaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, SelectaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the selector for controls to convert.
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn position_relative_to(mut self, selector: impl Into<String>) -> Self {
        self.position_relative_selector = Some(selector.into());
        self
    }

    pub fn trigger_padding(mut self, padding: i32) -> Self {
        self.trigger_padding = padding;
        self
    }

    /// Prepend a decorative image of the given size to each trigger.
    pub fn trigger_before_image(mut self, url: impl Into<String>, width: i32, height: i32) -> Self {
        self.trigger_before_image = url.into();
        self.trigger_before_image_width = width;
        self.trigger_before_image_height = height;
        self
    }

    pub fn wrapper_width_adjustment(mut self, adjustment: i32) -> Self {
        self.wrapper_width_adjustment = adjustment;
        self
    }

    /// Clamp the popup to `height` rows.
    pub fn wrapper_height(mut self, height: i32) -> Self {
        self.wrapper_height = height;
        self
    }

    pub fn allow_text_select(mut self, allow: bool) -> Self {
        self.allow_text_select = allow;
        self
    }

    pub fn allowed_keyboard_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.allowed_keyboard_codes = codes.into_iter().collect();
        self
    }

    pub fn use_click_listener(mut self, enabled: bool) -> Self {
        self.use_click_listener = enabled;
        self
    }

    pub fn has_before_image(&self) -> bool {
        !self.trigger_before_image.is_empty()
    }

    pub fn is_type_ahead_key(&self, code: u16) -> bool {
        self.allowed_keyboard_codes.contains(&code)
    }
}

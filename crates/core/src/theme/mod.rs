//! Theme configuration and stylesheet rendering.
//!
//! The persisted settings document carries a nested, fully-optional
//! [`ThemeConfig`]. Rendering is split in two pure steps:
//!
//! 1. [`ThemeConfig::resolve`] fills every absent field from the hardcoded
//!    defaults (a per-namespace override, not a recursive merge) and applies
//!    the legacy flat-field precedence rule, yielding a [`ResolvedTheme`]
//!    with no `Option`s left.
//! 2. [`stylesheet::render_stylesheet`] turns a `ResolvedTheme` into the
//!    complete CSS text the storefront links. Identical input produces
//!    byte-identical output, so re-applying a config is a plain stylesheet
//!    replacement.
//!
//! Field values are deliberately not validated: a malformed color or size
//! passes through and the browser ignores the invalid declaration.

pub mod presets;
pub mod stylesheet;

pub use presets::Preset;
pub use stylesheet::render_stylesheet;

use serde::{Deserialize, Serialize};

/// Color roles. Keys match the persisted JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Colors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_stock: Option<String>,
}

/// Typography settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Fonts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h1_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_size: Option<String>,
}

/// Spacing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_padding: Option<String>,
}

/// Layout settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_min_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image_height: Option<String>,
}

/// Shadow depth selection for cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowIntensity {
    None,
    Light,
    #[default]
    Medium,
    Strong,
}

/// Pointer-hover behavior attached to product cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardHoverEffect {
    None,
    #[default]
    Lift,
    Scale,
    Both,
}

/// Style effect settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_intensity: Option<ShadowIntensity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_hover_effect: Option<CardHoverEffect>,
}

/// Horizontal placement of the header logo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoPosition {
    #[default]
    Left,
    Center,
    Right,
}

/// Header customization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_position: Option<LogoPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
}

/// Footer customization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Footer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

/// The theme document as persisted in settings.
///
/// Every field is optional; absent fields fall back to defaults at resolve
/// time. The flat `header_color` / `button_color` / `font_family` fields
/// predate the namespaced ones and are honored only when the corresponding
/// namespace is absent (precedence, not merge), so a stale legacy value can
/// never leak into a fully-specified new theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Colors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<Fonts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Header>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

/// Fully-resolved color roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub card_background: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub header_bg: String,
    pub footer_bg: String,
    pub button_bg: String,
    pub button_text: String,
    pub border_color: String,
    pub in_stock: String,
    pub out_of_stock: String,
}

/// A theme with every field concrete, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub colors: ResolvedColors,
    pub font_primary: String,
    pub font_heading: String,
    pub font_base_size: String,
    pub font_h1_size: String,
    pub font_price_size: String,
    pub product_gap: String,
    pub card_padding: String,
    pub max_width: String,
    pub product_min_width: String,
    pub product_image_height: String,
    pub border_radius: String,
    pub border_width: String,
    pub shadow_intensity: ShadowIntensity,
    pub card_hover_effect: CardHoverEffect,
    pub logo_size: String,
    pub logo_position: LogoPosition,
    pub sticky_header: bool,
    pub footer_padding: String,
    pub footer_alignment: String,
}

/// System font stack used for both body and headings by default.
const SYSTEM_FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, \"Segoe UI\", \"Roboto\", sans-serif";

impl Default for ResolvedTheme {
    fn default() -> Self {
        Self {
            colors: ResolvedColors {
                primary: "#8B5CF6".to_owned(),
                secondary: "#7C3AED".to_owned(),
                background: "#F7F8F9".to_owned(),
                card_background: "#FFFFFF".to_owned(),
                text_primary: "#111827".to_owned(),
                text_secondary: "#6B7280".to_owned(),
                header_bg: "#FFFFFF".to_owned(),
                footer_bg: "#F3F4F6".to_owned(),
                button_bg: "#8B5CF6".to_owned(),
                button_text: "#FFFFFF".to_owned(),
                border_color: "#E5E7EB".to_owned(),
                in_stock: "#10B981".to_owned(),
                out_of_stock: "#EF4444".to_owned(),
            },
            font_primary: SYSTEM_FONT_STACK.to_owned(),
            font_heading: SYSTEM_FONT_STACK.to_owned(),
            font_base_size: "16px".to_owned(),
            font_h1_size: "2.5rem".to_owned(),
            font_price_size: "1.25rem".to_owned(),
            product_gap: "24px".to_owned(),
            card_padding: "24px".to_owned(),
            max_width: "1200px".to_owned(),
            product_min_width: "280px".to_owned(),
            product_image_height: "240px".to_owned(),
            border_radius: "12px".to_owned(),
            border_width: "1px".to_owned(),
            shadow_intensity: ShadowIntensity::Medium,
            card_hover_effect: CardHoverEffect::Lift,
            logo_size: "40px".to_owned(),
            logo_position: LogoPosition::Left,
            sticky_header: true,
            footer_padding: "32px 24px".to_owned(),
            footer_alignment: "center".to_owned(),
        }
    }
}

fn pick(value: Option<String>, default: String) -> String {
    value.unwrap_or(default)
}

impl ThemeConfig {
    /// Resolve the config against the hardcoded defaults.
    ///
    /// Each namespace overrides the default field-by-field; an absent
    /// namespace keeps the default wholesale. The legacy `header_color` /
    /// `button_color` fields map onto the primary/secondary accent roles
    /// (and the button background) only when no `colors` namespace is
    /// present at all; `font_family` likewise fills the body font only when
    /// `fonts` is absent.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn resolve(&self) -> ResolvedTheme {
        let mut resolved = ResolvedTheme::default();

        match self.colors.clone() {
            Some(colors) => {
                let d = resolved.colors;
                resolved.colors = ResolvedColors {
                    primary: pick(colors.primary, d.primary),
                    secondary: pick(colors.secondary, d.secondary),
                    background: pick(colors.background, d.background),
                    card_background: pick(colors.card_background, d.card_background),
                    text_primary: pick(colors.text_primary, d.text_primary),
                    text_secondary: pick(colors.text_secondary, d.text_secondary),
                    header_bg: pick(colors.header_bg, d.header_bg),
                    footer_bg: pick(colors.footer_bg, d.footer_bg),
                    button_bg: pick(colors.button_bg, d.button_bg),
                    button_text: pick(colors.button_text, d.button_text),
                    border_color: pick(colors.border_color, d.border_color),
                    in_stock: pick(colors.in_stock, d.in_stock),
                    out_of_stock: pick(colors.out_of_stock, d.out_of_stock),
                };
            }
            None => {
                if let Some(header_color) = self.header_color.clone() {
                    resolved.colors.primary = header_color;
                }
                if let Some(button_color) = self.button_color.clone() {
                    resolved.colors.secondary = button_color.clone();
                    resolved.colors.button_bg = button_color;
                }
            }
        }

        match self.fonts.clone() {
            Some(fonts) => {
                resolved.font_primary = pick(fonts.primary, resolved.font_primary);
                resolved.font_heading = pick(fonts.heading, resolved.font_heading);
                resolved.font_base_size = pick(fonts.base_size, resolved.font_base_size);
                resolved.font_h1_size = pick(fonts.h1_size, resolved.font_h1_size);
                resolved.font_price_size = pick(fonts.price_size, resolved.font_price_size);
            }
            None => {
                if let Some(font_family) = self.font_family.clone() {
                    resolved.font_primary = font_family;
                }
            }
        }

        if let Some(spacing) = self.spacing.clone() {
            resolved.product_gap = pick(spacing.product_gap, resolved.product_gap);
            resolved.card_padding = pick(spacing.card_padding, resolved.card_padding);
        }

        if let Some(layout) = self.layout.clone() {
            resolved.max_width = pick(layout.max_width, resolved.max_width);
            resolved.product_min_width = pick(layout.product_min_width, resolved.product_min_width);
            resolved.product_image_height =
                pick(layout.product_image_height, resolved.product_image_height);
        }

        if let Some(style) = self.style.clone() {
            resolved.border_radius = pick(style.border_radius, resolved.border_radius);
            resolved.border_width = pick(style.border_width, resolved.border_width);
            resolved.shadow_intensity = style.shadow_intensity.unwrap_or(resolved.shadow_intensity);
            resolved.card_hover_effect =
                style.card_hover_effect.unwrap_or(resolved.card_hover_effect);
        }

        if let Some(header) = self.header.clone() {
            resolved.logo_size = pick(header.logo_size, resolved.logo_size);
            resolved.logo_position = header.logo_position.unwrap_or(resolved.logo_position);
            resolved.sticky_header = header.sticky.unwrap_or(resolved.sticky_header);
        }

        if let Some(footer) = self.footer.clone() {
            resolved.footer_padding = pick(footer.padding, resolved.footer_padding);
            resolved.footer_alignment = pick(footer.alignment, resolved.footer_alignment);
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        let resolved = ThemeConfig::default().resolve();
        assert_eq!(resolved, ResolvedTheme::default());
    }

    #[test]
    fn test_namespace_overrides_field_by_field() {
        let config = ThemeConfig {
            colors: Some(Colors {
                primary: Some("#111111".to_owned()),
                ..Colors::default()
            }),
            ..ThemeConfig::default()
        };

        let resolved = config.resolve();
        assert_eq!(resolved.colors.primary, "#111111");
        // Unspecified fields in a present namespace keep their defaults.
        assert_eq!(resolved.colors.secondary, "#7C3AED");
    }

    #[test]
    fn test_legacy_colors_apply_only_without_colors_namespace() {
        let legacy_only = ThemeConfig {
            header_color: Some("#111111".to_owned()),
            button_color: Some("#222222".to_owned()),
            ..ThemeConfig::default()
        };
        let resolved = legacy_only.resolve();
        assert_eq!(resolved.colors.primary, "#111111");
        assert_eq!(resolved.colors.secondary, "#222222");
        assert_eq!(resolved.colors.button_bg, "#222222");

        // Once a colors object exists, legacy fields lose all effect.
        let with_namespace = ThemeConfig {
            header_color: Some("#111111".to_owned()),
            colors: Some(Colors {
                primary: Some("#ABCDEF".to_owned()),
                ..Colors::default()
            }),
            ..ThemeConfig::default()
        };
        let resolved = with_namespace.resolve();
        assert_eq!(resolved.colors.primary, "#ABCDEF");

        // Even an empty colors object switches precedence to the namespace.
        let empty_namespace = ThemeConfig {
            header_color: Some("#111111".to_owned()),
            colors: Some(Colors::default()),
            ..ThemeConfig::default()
        };
        assert_eq!(empty_namespace.resolve().colors.primary, "#8B5CF6");
    }

    #[test]
    fn test_legacy_font_family_applies_only_without_fonts_namespace() {
        let config = ThemeConfig {
            font_family: Some("Georgia, serif".to_owned()),
            ..ThemeConfig::default()
        };
        assert_eq!(config.resolve().font_primary, "Georgia, serif");

        let config = ThemeConfig {
            font_family: Some("Georgia, serif".to_owned()),
            fonts: Some(Fonts::default()),
            ..ThemeConfig::default()
        };
        assert_eq!(config.resolve().font_primary, SYSTEM_FONT_STACK);
    }

    #[test]
    fn test_unknown_json_keys_are_ignored() {
        let config: ThemeConfig = serde_json::from_str(
            r#"{"colors": {"primary": "#000000", "legacyExtra": "x"}, "somethingElse": 1}"#,
        )
        .expect("config should deserialize");
        assert_eq!(config.resolve().colors.primary, "#000000");
    }

    #[test]
    fn test_malformed_values_pass_through() {
        let config = ThemeConfig {
            colors: Some(Colors {
                primary: Some("not-a-color".to_owned()),
                ..Colors::default()
            }),
            ..ThemeConfig::default()
        };
        // No validation layer: the browser will ignore the bad declaration.
        assert_eq!(config.resolve().colors.primary, "not-a-color");
    }
}

//! Named theme presets.
//!
//! A preset is a partial theme. Applying one merges it over the `default`
//! preset namespace-by-namespace (preset field wins, unspecified fields keep
//! the default's value) and returns the merged [`ThemeConfig`], ready to be
//! persisted or resolved.

use serde::{Deserialize, Serialize};

use super::{CardHoverEffect, Colors, Fonts, Layout, ShadowIntensity, Spacing, Style, ThemeConfig};

/// The built-in preset catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Default,
    Dark,
    Minimal,
    Bold,
    Elegant,
    Modern,
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "dark" => Ok(Self::Dark),
            "minimal" => Ok(Self::Minimal),
            "bold" => Ok(Self::Bold),
            "elegant" => Ok(Self::Elegant),
            "modern" => Ok(Self::Modern),
            _ => Err(format!("unknown preset: {s}")),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Minimal => "minimal",
            Self::Bold => "bold",
            Self::Elegant => "elegant",
            Self::Modern => "modern",
        };
        write!(f, "{name}")
    }
}

fn colors(values: [&str; 10]) -> Colors {
    let [primary, secondary, background, card_background, text_primary, text_secondary, header_bg, footer_bg, button_bg, button_text] =
        values.map(str::to_owned);
    Colors {
        primary: Some(primary),
        secondary: Some(secondary),
        background: Some(background),
        card_background: Some(card_background),
        text_primary: Some(text_primary),
        text_secondary: Some(text_secondary),
        header_bg: Some(header_bg),
        footer_bg: Some(footer_bg),
        button_bg: Some(button_bg),
        button_text: Some(button_text),
        border_color: None,
        in_stock: None,
        out_of_stock: None,
    }
}

impl Preset {
    /// The preset's own (possibly partial) theme fragment.
    #[must_use]
    fn fragment(self) -> ThemeConfig {
        match self {
            Self::Default => ThemeConfig {
                colors: Some(colors([
                    "#8B5CF6", "#7C3AED", "#F7F8F9", "#FFFFFF", "#111827", "#6B7280", "#FFFFFF",
                    "#F3F4F6", "#8B5CF6", "#FFFFFF",
                ])),
                fonts: Some(Fonts {
                    primary: Some(
                        "-apple-system, BlinkMacSystemFont, \"Segoe UI\", \"Roboto\", sans-serif"
                            .to_owned(),
                    ),
                    heading: Some(
                        "-apple-system, BlinkMacSystemFont, \"Segoe UI\", \"Roboto\", sans-serif"
                            .to_owned(),
                    ),
                    base_size: Some("16px".to_owned()),
                    h1_size: None,
                    price_size: Some("1.25rem".to_owned()),
                }),
                spacing: Some(Spacing {
                    product_gap: Some("24px".to_owned()),
                    card_padding: Some("24px".to_owned()),
                }),
                layout: Some(Layout {
                    max_width: Some("1200px".to_owned()),
                    product_min_width: Some("280px".to_owned()),
                    product_image_height: Some("240px".to_owned()),
                }),
                style: Some(Style {
                    border_radius: Some("12px".to_owned()),
                    border_width: Some("1px".to_owned()),
                    shadow_intensity: Some(ShadowIntensity::Medium),
                    card_hover_effect: Some(CardHoverEffect::Lift),
                }),
                ..ThemeConfig::default()
            },
            Self::Dark => ThemeConfig {
                colors: Some(colors([
                    "#A78BFA", "#8B5CF6", "#1F2937", "#111827", "#F9FAFB", "#9CA3AF", "#111827",
                    "#0F172A", "#8B5CF6", "#FFFFFF",
                ])),
                ..ThemeConfig::default()
            },
            Self::Minimal => ThemeConfig {
                colors: Some(colors([
                    "#000000", "#333333", "#FFFFFF", "#FFFFFF", "#000000", "#666666", "#FFFFFF",
                    "#F5F5F5", "#000000", "#FFFFFF",
                ])),
                style: Some(Style {
                    border_radius: Some("0px".to_owned()),
                    border_width: None,
                    shadow_intensity: Some(ShadowIntensity::None),
                    card_hover_effect: Some(CardHoverEffect::None),
                }),
                ..ThemeConfig::default()
            },
            Self::Bold => ThemeConfig {
                colors: Some(colors([
                    "#FF6B6B", "#4ECDC4", "#FFE66D", "#FFFFFF", "#2C3E50", "#7F8C8D", "#FF6B6B",
                    "#4ECDC4", "#FF6B6B", "#FFFFFF",
                ])),
                ..ThemeConfig::default()
            },
            Self::Elegant => ThemeConfig {
                colors: Some(colors([
                    "#8B7355", "#A0826D", "#FAF8F3", "#FFFFFF", "#2C2416", "#6B5D4F", "#FFFFFF",
                    "#F5F1E8", "#8B7355", "#FFFFFF",
                ])),
                fonts: Some(Fonts {
                    primary: Some("'Georgia', serif".to_owned()),
                    heading: Some("'Playfair Display', serif".to_owned()),
                    base_size: None,
                    h1_size: None,
                    price_size: None,
                }),
                ..ThemeConfig::default()
            },
            Self::Modern => ThemeConfig {
                colors: Some(colors([
                    "#0EA5E9", "#06B6D4", "#F8FAFC", "#FFFFFF", "#0F172A", "#64748B", "#FFFFFF",
                    "#F1F5F9", "#0EA5E9", "#FFFFFF",
                ])),
                fonts: Some(Fonts {
                    primary: Some("'Inter', sans-serif".to_owned()),
                    heading: Some("'Inter', sans-serif".to_owned()),
                    base_size: None,
                    h1_size: None,
                    price_size: None,
                }),
                style: Some(Style {
                    border_radius: Some("16px".to_owned()),
                    border_width: None,
                    shadow_intensity: Some(ShadowIntensity::Light),
                    card_hover_effect: None,
                }),
                ..ThemeConfig::default()
            },
        }
    }

    /// The preset merged over the `default` preset.
    ///
    /// A two-level override: each namespace merges field-by-field, fields
    /// the preset leaves unset keep the default preset's value. Namespaces
    /// neither preset specifies (header, footer) stay absent and resolve to
    /// the hardcoded defaults later.
    #[must_use]
    pub fn apply(self) -> ThemeConfig {
        let base = Self::Default.fragment();
        if self == Self::Default {
            return base;
        }
        let preset = self.fragment();

        ThemeConfig {
            header_color: None,
            button_color: None,
            font_family: None,
            colors: merge_colors(base.colors, preset.colors),
            fonts: merge_fonts(base.fonts, preset.fonts),
            spacing: merge_spacing(base.spacing, preset.spacing),
            layout: merge_layout(base.layout, preset.layout),
            style: merge_style(base.style, preset.style),
            header: None,
            footer: None,
        }
    }
}

fn merge_colors(base: Option<Colors>, preset: Option<Colors>) -> Option<Colors> {
    let base = base.unwrap_or_default();
    let preset = preset.unwrap_or_default();
    Some(Colors {
        primary: preset.primary.or(base.primary),
        secondary: preset.secondary.or(base.secondary),
        background: preset.background.or(base.background),
        card_background: preset.card_background.or(base.card_background),
        text_primary: preset.text_primary.or(base.text_primary),
        text_secondary: preset.text_secondary.or(base.text_secondary),
        header_bg: preset.header_bg.or(base.header_bg),
        footer_bg: preset.footer_bg.or(base.footer_bg),
        button_bg: preset.button_bg.or(base.button_bg),
        button_text: preset.button_text.or(base.button_text),
        border_color: preset.border_color.or(base.border_color),
        in_stock: preset.in_stock.or(base.in_stock),
        out_of_stock: preset.out_of_stock.or(base.out_of_stock),
    })
}

fn merge_fonts(base: Option<Fonts>, preset: Option<Fonts>) -> Option<Fonts> {
    let base = base.unwrap_or_default();
    let preset = preset.unwrap_or_default();
    Some(Fonts {
        primary: preset.primary.or(base.primary),
        heading: preset.heading.or(base.heading),
        base_size: preset.base_size.or(base.base_size),
        h1_size: preset.h1_size.or(base.h1_size),
        price_size: preset.price_size.or(base.price_size),
    })
}

fn merge_spacing(base: Option<Spacing>, preset: Option<Spacing>) -> Option<Spacing> {
    let base = base.unwrap_or_default();
    let preset = preset.unwrap_or_default();
    Some(Spacing {
        product_gap: preset.product_gap.or(base.product_gap),
        card_padding: preset.card_padding.or(base.card_padding),
    })
}

fn merge_layout(base: Option<Layout>, preset: Option<Layout>) -> Option<Layout> {
    let base = base.unwrap_or_default();
    let preset = preset.unwrap_or_default();
    Some(Layout {
        max_width: preset.max_width.or(base.max_width),
        product_min_width: preset.product_min_width.or(base.product_min_width),
        product_image_height: preset.product_image_height.or(base.product_image_height),
    })
}

fn merge_style(base: Option<Style>, preset: Option<Style>) -> Option<Style> {
    let base = base.unwrap_or_default();
    let preset = preset.unwrap_or_default();
    Some(Style {
        border_radius: preset.border_radius.or(base.border_radius),
        border_width: preset.border_width.or(base.border_width),
        shadow_intensity: preset.shadow_intensity.or(base.shadow_intensity),
        card_hover_effect: preset.card_hover_effect.or(base.card_hover_effect),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_preset_merges_over_default() {
        let theme = Preset::Dark.apply();

        let colors = theme.colors.expect("colors namespace present");
        assert_eq!(colors.background.as_deref(), Some("#1F2937"));
        assert_eq!(colors.primary.as_deref(), Some("#A78BFA"));

        // Namespaces dark does not specify come from the default preset,
        // never null.
        let fonts = theme.fonts.expect("fonts namespace present");
        assert_eq!(fonts.base_size.as_deref(), Some("16px"));
        let style = theme.style.expect("style namespace present");
        assert_eq!(style.shadow_intensity, Some(ShadowIntensity::Medium));
    }

    #[test]
    fn test_minimal_preset_overrides_style_fields_individually() {
        let theme = Preset::Minimal.apply();
        let style = theme.style.expect("style namespace present");

        assert_eq!(style.border_radius.as_deref(), Some("0px"));
        assert_eq!(style.card_hover_effect, Some(CardHoverEffect::None));
        // border_width is unset in minimal; the default preset's value holds.
        assert_eq!(style.border_width.as_deref(), Some("1px"));
    }

    #[test]
    fn test_default_preset_resolves_like_empty_config() {
        assert_eq!(
            Preset::Default.apply().resolve(),
            ThemeConfig::default().resolve()
        );
    }

    #[test]
    fn test_preset_name_round_trip() {
        for preset in [
            Preset::Default,
            Preset::Dark,
            Preset::Minimal,
            Preset::Bold,
            Preset::Elegant,
            Preset::Modern,
        ] {
            assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
        }
        assert!("neon".parse::<Preset>().is_err());
    }
}

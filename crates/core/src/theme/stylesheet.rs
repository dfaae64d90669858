//! Declarative stylesheet rendering.
//!
//! `render_stylesheet` is the whole theme engine: a resolved theme goes in,
//! the storefront's complete override stylesheet comes out. The storefront
//! and the admin design preview both swap the output in as a single
//! stylesheet, so there is nothing to accumulate and nothing to walk.

use std::fmt::Write;

use super::{CardHoverEffect, LogoPosition, ResolvedTheme, ShadowIntensity};

/// Box-shadow depth table for product cards.
const fn card_shadow(intensity: ShadowIntensity) -> &'static str {
    match intensity {
        ShadowIntensity::None => "none",
        ShadowIntensity::Light => "0 1px 3px rgba(0, 0, 0, 0.08)",
        ShadowIntensity::Medium => "0 4px 12px rgba(0, 0, 0, 0.12)",
        ShadowIntensity::Strong => "0 10px 30px rgba(0, 0, 0, 0.20)",
    }
}

/// Render the complete storefront stylesheet for a resolved theme.
///
/// Deterministic: identical input yields byte-identical CSS, so applying a
/// config twice is a no-op beyond replacing the stylesheet with itself.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn render_stylesheet(theme: &ResolvedTheme) -> String {
    let mut css = String::with_capacity(4096);
    let colors = &theme.colors;

    // Custom properties first so storefront markup can reference roles
    // directly.
    let _ = write!(
        css,
        ":root {{\n  \
           --color-primary: {primary};\n  \
           --color-secondary: {secondary};\n  \
           --color-background: {background};\n  \
           --color-card-bg: {card_bg};\n  \
           --color-text-primary: {text_primary};\n  \
           --color-text-secondary: {text_secondary};\n  \
           --color-header-bg: {header_bg};\n  \
           --color-footer-bg: {footer_bg};\n  \
           --color-button-bg: {button_bg};\n  \
           --color-button-text: {button_text};\n  \
           --color-border: {border};\n  \
           --color-in-stock: {in_stock};\n  \
           --color-out-of-stock: {out_of_stock};\n  \
           --radius: {radius};\n  \
           --border-width: {border_width};\n\
         }}\n",
        primary = colors.primary,
        secondary = colors.secondary,
        background = colors.background,
        card_bg = colors.card_background,
        text_primary = colors.text_primary,
        text_secondary = colors.text_secondary,
        header_bg = colors.header_bg,
        footer_bg = colors.footer_bg,
        button_bg = colors.button_bg,
        button_text = colors.button_text,
        border = colors.border_color,
        in_stock = colors.in_stock,
        out_of_stock = colors.out_of_stock,
        radius = theme.border_radius,
        border_width = theme.border_width,
    );

    let _ = write!(
        css,
        "body {{\n  \
           background: var(--color-background);\n  \
           color: var(--color-text-primary);\n  \
           font-family: {font};\n  \
           font-size: {size};\n\
         }}\n\
         h1, h2, h3, h4, h5, h6 {{ font-family: {heading}; }}\n\
         h1 {{ font-size: {h1_size}; }}\n\
         .price {{ font-size: {price_size}; color: var(--color-text-primary); }}\n\
         .text-secondary {{ color: var(--color-text-secondary); }}\n",
        font = theme.font_primary,
        size = theme.font_base_size,
        heading = theme.font_heading,
        h1_size = theme.font_h1_size,
        price_size = theme.font_price_size,
    );

    let _ = write!(
        css,
        ".page-container {{ max-width: {max_width}; margin: 0 auto; }}\n\
         .product-grid {{\n  \
           display: grid;\n  \
           grid-template-columns: repeat(auto-fill, minmax({min_width}, 1fr));\n  \
           gap: {gap};\n\
         }}\n",
        max_width = theme.max_width,
        min_width = theme.product_min_width,
        gap = theme.product_gap,
    );

    let _ = write!(
        css,
        ".product-card {{\n  \
           background: var(--color-card-bg);\n  \
           border: var(--border-width) solid var(--color-border);\n  \
           border-radius: var(--radius);\n  \
           padding: {padding};\n  \
           box-shadow: {shadow};\n  \
           overflow: hidden;\n  \
           transition: transform 0.2s ease, box-shadow 0.2s ease;\n\
         }}\n\
         .product-card img {{\n  \
           height: {image_height};\n  \
           width: 100%;\n  \
           object-fit: cover;\n  \
           transition: transform 0.2s ease;\n\
         }}\n",
        padding = theme.card_padding,
        shadow = card_shadow(theme.shadow_intensity),
        image_height = theme.product_image_height,
    );

    // Hover effect selection: lift translates the card, scale zooms only the
    // image, both combines, none attaches nothing.
    match theme.card_hover_effect {
        CardHoverEffect::None => {}
        CardHoverEffect::Lift => {
            css.push_str(".product-card:hover { transform: translateY(-4px); }\n");
        }
        CardHoverEffect::Scale => {
            css.push_str(".product-card:hover img { transform: scale(1.04); }\n");
        }
        CardHoverEffect::Both => {
            css.push_str(".product-card:hover { transform: translateY(-4px); }\n");
            css.push_str(".product-card:hover img { transform: scale(1.04); }\n");
        }
    }

    css.push_str(
        ".in-stock { color: var(--color-in-stock); }\n\
         .out-of-stock { color: var(--color-out-of-stock); }\n\
         button, .btn {\n  \
           background: var(--color-button-bg);\n  \
           color: var(--color-button-text);\n  \
           border: none;\n  \
           border-radius: var(--radius);\n\
         }\n",
    );

    let _ = write!(
        css,
        ".site-header {{\n  \
           background: var(--color-header-bg);\n  \
           display: flex;\n  \
           align-items: center;\n  \
           justify-content: {justify};\n\
         {sticky}\
         }}\n\
         .site-logo {{ height: {logo_size}; }}\n",
        justify = match theme.logo_position {
            LogoPosition::Left | LogoPosition::Center => "flex-start",
            LogoPosition::Right => "flex-end",
        },
        sticky = if theme.sticky_header {
            "  position: sticky;\n  top: 0;\n  z-index: 100;\n"
        } else {
            ""
        },
        logo_size = theme.logo_size,
    );

    // Center positioning takes the logo out of the flex flow so sibling nav
    // items cannot push it off true center.
    if theme.logo_position == LogoPosition::Center {
        css.push_str(
            ".site-header { position: relative; }\n\
             .site-logo {\n  \
               position: absolute;\n  \
               left: 50%;\n  \
               transform: translateX(-50%);\n\
             }\n",
        );
    }

    let _ = write!(
        css,
        ".site-footer {{\n  \
           background: var(--color-footer-bg);\n  \
           padding: {padding};\n  \
           text-align: {alignment};\n\
         }}\n",
        padding = theme.footer_padding,
        alignment = theme.footer_alignment,
    );

    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{Colors, Header, Style, ThemeConfig};

    #[test]
    fn test_rendering_is_idempotent() {
        let theme = ThemeConfig::default().resolve();
        assert_eq!(render_stylesheet(&theme), render_stylesheet(&theme));
    }

    #[test]
    fn test_custom_colors_appear_as_custom_properties() {
        let theme = ThemeConfig {
            colors: Some(Colors {
                primary: Some("#123456".to_owned()),
                ..Colors::default()
            }),
            ..ThemeConfig::default()
        }
        .resolve();

        let css = render_stylesheet(&theme);
        assert!(css.contains("--color-primary: #123456;"));
        // Unspecified roles render their defaults, never blank.
        assert!(css.contains("--color-button-bg: #8B5CF6;"));
    }

    #[test]
    fn test_shadow_table() {
        for (intensity, expected) in [
            (ShadowIntensity::None, "box-shadow: none;"),
            (ShadowIntensity::Light, "0 1px 3px"),
            (ShadowIntensity::Medium, "0 4px 12px"),
            (ShadowIntensity::Strong, "0 10px 30px"),
        ] {
            let theme = ThemeConfig {
                style: Some(Style {
                    shadow_intensity: Some(intensity),
                    ..Style::default()
                }),
                ..ThemeConfig::default()
            }
            .resolve();
            assert!(
                render_stylesheet(&theme).contains(expected),
                "missing shadow for {intensity:?}"
            );
        }
    }

    #[test]
    fn test_hover_effect_selection() {
        let css_for = |effect| {
            let theme = ThemeConfig {
                style: Some(Style {
                    card_hover_effect: Some(effect),
                    ..Style::default()
                }),
                ..ThemeConfig::default()
            }
            .resolve();
            render_stylesheet(&theme)
        };

        let none = css_for(CardHoverEffect::None);
        assert!(!none.contains(".product-card:hover"));

        let lift = css_for(CardHoverEffect::Lift);
        assert!(lift.contains("translateY(-4px)"));
        assert!(!lift.contains("scale(1.04)"));

        let scale = css_for(CardHoverEffect::Scale);
        assert!(scale.contains(":hover img"));
        assert!(!scale.contains("translateY(-4px)"));

        let both = css_for(CardHoverEffect::Both);
        assert!(both.contains("translateY(-4px)"));
        assert!(both.contains("scale(1.04)"));
    }

    #[test]
    fn test_center_logo_uses_absolute_centering() {
        let theme = ThemeConfig {
            header: Some(Header {
                logo_position: Some(LogoPosition::Center),
                ..Header::default()
            }),
            ..ThemeConfig::default()
        }
        .resolve();

        let css = render_stylesheet(&theme);
        assert!(css.contains("translateX(-50%)"));
    }

    #[test]
    fn test_sticky_header_toggle() {
        let sticky = ThemeConfig::default().resolve();
        assert!(render_stylesheet(&sticky).contains("position: sticky;"));

        let not_sticky = ThemeConfig {
            header: Some(Header {
                sticky: Some(false),
                ..Header::default()
            }),
            ..ThemeConfig::default()
        }
        .resolve();
        assert!(!render_stylesheet(&not_sticky).contains("position: sticky;"));
    }
}

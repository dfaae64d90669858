//! Shop settings singleton.

use chrono::{DateTime, Utc};
use printworks_core::theme::ThemeConfig;
use serde::Serialize;

/// The single persisted settings record.
///
/// The secret payment key never appears in serialized output; admin
/// responses get it replaced by [`Settings::redacted`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub shop_name: String,
    pub shop_logo: Option<String>,
    pub footer_text: String,
    pub stripe_publishable_key: String,
    #[serde(skip_serializing)]
    pub stripe_secret_key: String,
    pub theme: ThemeConfig,
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    /// Whether a secret key has been configured (the value itself is never
    /// sent to the client).
    #[must_use]
    pub fn redacted(&self) -> RedactedSettings<'_> {
        RedactedSettings {
            settings: self,
            has_stripe_secret_key: !self.stripe_secret_key.is_empty(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shop_name: "Our Store".to_owned(),
            shop_logo: None,
            footer_text: "© 2024. All rights reserved.".to_owned(),
            stripe_publishable_key: String::new(),
            stripe_secret_key: String::new(),
            theme: ThemeConfig::default(),
            updated_at: Utc::now(),
        }
    }
}

/// Admin view of settings: everything except the secret key's value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedSettings<'a> {
    #[serde(flatten)]
    pub settings: &'a Settings,
    pub has_stripe_secret_key: bool,
}

/// Public storefront view of settings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSettings {
    pub shop_name: String,
    pub shop_logo: Option<String>,
    pub theme: ThemeConfig,
    pub footer_text: String,
}

impl From<Settings> for PublicSettings {
    fn from(settings: Settings) -> Self {
        Self {
            shop_name: settings.shop_name,
            shop_logo: settings.shop_logo,
            theme: settings.theme,
            footer_text: settings.footer_text,
        }
    }
}

/// Partial update from the admin branding form; `None` fields are left
/// unchanged. Logo removal is a distinct state from "no change".
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub shop_name: Option<String>,
    pub footer_text: Option<String>,
    pub stripe_publishable_key: Option<String>,
    pub stripe_secret_key: Option<String>,
    /// Legacy flat theme fields; applied onto the stored theme document.
    pub header_color: Option<String>,
    pub button_color: Option<String>,
    pub font_family: Option<String>,
    /// New logo URL from an upload.
    pub shop_logo: Option<String>,
    /// Clear the logo entirely.
    pub remove_logo: bool,
}

impl SettingsPatch {
    /// Apply the patch to a settings record.
    pub fn apply(self, settings: &mut Settings) {
        if let Some(shop_name) = self.shop_name {
            settings.shop_name = shop_name;
        }
        if let Some(footer_text) = self.footer_text {
            settings.footer_text = footer_text;
        }
        if let Some(key) = self.stripe_publishable_key {
            settings.stripe_publishable_key = key;
        }
        if let Some(key) = self.stripe_secret_key {
            settings.stripe_secret_key = key;
        }
        if let Some(color) = self.header_color {
            settings.theme.header_color = Some(color);
        }
        if let Some(color) = self.button_color {
            settings.theme.button_color = Some(color);
        }
        if let Some(font) = self.font_family {
            settings.theme.font_family = Some(font);
        }
        if let Some(logo) = self.shop_logo {
            settings.shop_logo = Some(logo);
        }
        if self.remove_logo {
            settings.shop_logo = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_leaves_unset_fields_alone() {
        let mut settings = Settings::default();
        settings.shop_name = "Printworks".to_owned();

        SettingsPatch {
            footer_text: Some("© Printworks".to_owned()),
            ..SettingsPatch::default()
        }
        .apply(&mut settings);

        assert_eq!(settings.shop_name, "Printworks");
        assert_eq!(settings.footer_text, "© Printworks");
    }

    #[test]
    fn test_remove_logo_wins_over_upload() {
        let mut settings = Settings::default();
        settings.shop_logo = Some("/uploads/old.png".to_owned());

        SettingsPatch {
            shop_logo: Some("/uploads/new.png".to_owned()),
            remove_logo: true,
            ..SettingsPatch::default()
        }
        .apply(&mut settings);

        assert_eq!(settings.shop_logo, None);
    }

    #[test]
    fn test_secret_key_never_serializes() {
        let mut settings = Settings::default();
        settings.stripe_secret_key = "sk_live_abc".to_owned();

        let json = serde_json::to_value(settings.redacted()).expect("serializes");
        assert!(json.get("stripeSecretKey").is_none());
        assert_eq!(json["hasStripeSecretKey"], true);
    }
}

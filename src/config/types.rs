//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Card geometry settings.
///
/// All sizes are logical units; the raster is allocated at
/// `width × device_scale` by `height × device_scale` pixels.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Logical card width (valid range: 200 - 4096)
    #[serde(default = "default_width")]
    pub width: f64,

    /// Logical card height (valid range: 200 - 4096)
    #[serde(default = "default_height")]
    pub height: f64,

    /// Inner margin kept clear of text, in addition to the border (valid range: 0 - 200)
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Device pixel ratio; values above 2.0 are capped at 2.0
    #[serde(default = "default_device_scale")]
    pub device_scale: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin: default_margin(),
            device_scale: default_device_scale(),
        }
    }
}

/// The card's semantic colors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PaletteConfig {
    #[serde(default = "default_bg_start")]
    pub bg_start: ColorSpec,
    #[serde(default = "default_bg_mid")]
    pub bg_mid: ColorSpec,
    #[serde(default = "default_bg_end")]
    pub bg_end: ColorSpec,
    #[serde(default = "default_primary_gold")]
    pub primary_gold: ColorSpec,
    #[serde(default = "default_secondary_gold")]
    pub secondary_gold: ColorSpec,
    #[serde(default = "default_accent_red")]
    pub accent_red: ColorSpec,
    #[serde(default = "default_accent_green")]
    pub accent_green: ColorSpec,
    #[serde(default = "default_accent_blue")]
    pub accent_blue: ColorSpec,
    #[serde(default = "default_accent_orange")]
    pub accent_orange: ColorSpec,
    #[serde(default = "default_white")]
    pub white: ColorSpec,
    #[serde(default = "default_off_white")]
    pub off_white: ColorSpec,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            bg_start: default_bg_start(),
            bg_mid: default_bg_mid(),
            bg_end: default_bg_end(),
            primary_gold: default_primary_gold(),
            secondary_gold: default_secondary_gold(),
            accent_red: default_accent_red(),
            accent_green: default_accent_green(),
            accent_blue: default_accent_blue(),
            accent_orange: default_accent_orange(),
            white: default_white(),
            off_white: default_off_white(),
        }
    }
}

/// Font families and readiness policy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FontConfig {
    /// Family for the greeting and name lines
    #[serde(default = "default_display_family")]
    pub display_family: String,

    /// Generic family used when the display family is missing
    #[serde(default = "default_display_fallback")]
    pub display_fallback: String,

    /// Family for the branding lines
    #[serde(default = "default_branding_family")]
    pub branding_family: String,

    /// Generic family used when the branding family is missing
    #[serde(default = "default_branding_fallback")]
    pub branding_fallback: String,

    /// How long to wait for fonts before rendering anyway (valid range: 0 - 10000 ms)
    #[serde(default = "default_font_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            display_family: default_display_family(),
            display_fallback: default_display_fallback(),
            branding_family: default_branding_family(),
            branding_fallback: default_branding_fallback(),
            timeout_ms: default_font_timeout_ms(),
        }
    }
}

/// Fixed card copy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    #[serde(default = "default_header")]
    pub header: String,
    #[serde(default = "default_subheader")]
    pub subheader: String,
    #[serde(default = "default_footer")]
    pub footer: String,
    #[serde(default = "default_credit")]
    pub credit: String,
    #[serde(default = "default_support")]
    pub support: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            subheader: default_subheader(),
            footer: default_footer(),
            credit: default_credit(),
            support: default_support(),
        }
    }
}

/// Name line auto-fit bounds.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NameFitConfig {
    /// Smallest size the name may shrink to before it is ellipsized
    #[serde(default = "default_name_min_size")]
    pub min_size: f64,

    /// Size used whenever the name fits
    #[serde(default = "default_name_max_size")]
    pub max_size: f64,
}

impl Default for NameFitConfig {
    fn default() -> Self {
        Self {
            min_size: default_name_min_size(),
            max_size: default_name_max_size(),
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory cards are written to; the working directory when unset
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Prefix of the exported file name (`<prefix><name>.png`)
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            filename_prefix: default_filename_prefix(),
        }
    }
}

/// Share caption and fallback link settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ShareConfig {
    /// Title attached to native shares
    #[serde(default = "default_share_title")]
    pub title: String,

    /// Opening greeting of the caption
    #[serde(default = "default_share_greeting")]
    pub greeting: String,

    /// Phrase placed right before the name
    #[serde(default = "default_share_dedication")]
    pub dedication: String,

    /// Label before the developer credit
    #[serde(default = "default_share_developer_label")]
    pub developer_label: String,

    /// Developer credited in the caption
    #[serde(default = "default_share_developer")]
    pub developer: String,

    /// Label before the site link
    #[serde(default = "default_share_site_label")]
    pub site_label: String,

    /// Site link embedded in every caption
    #[serde(default = "default_share_site_url")]
    pub site_url: String,

    /// Messaging deep-link the fallback opens, caption appended as `text`
    #[serde(default = "default_share_fallback_base")]
    pub fallback_base: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            title: default_share_title(),
            greeting: default_share_greeting(),
            dedication: default_share_dedication(),
            developer_label: default_share_developer_label(),
            developer: default_share_developer(),
            site_label: default_share_site_label(),
            site_url: default_share_site_url(),
            fallback_base: default_share_fallback_base(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> f64 {
    1080.0
}

fn default_height() -> f64 {
    1920.0
}

fn default_margin() -> f64 {
    40.0
}

fn default_device_scale() -> f64 {
    1.0
}

fn default_bg_start() -> ColorSpec {
    ColorSpec::hex("#0f0c29")
}

fn default_bg_mid() -> ColorSpec {
    ColorSpec::hex("#302b63")
}

fn default_bg_end() -> ColorSpec {
    ColorSpec::hex("#24243e")
}

fn default_primary_gold() -> ColorSpec {
    ColorSpec::hex("#FFD700")
}

fn default_secondary_gold() -> ColorSpec {
    ColorSpec::hex("#FDB931")
}

fn default_accent_red() -> ColorSpec {
    ColorSpec::hex("#D90429")
}

fn default_accent_green() -> ColorSpec {
    ColorSpec::hex("#006400")
}

fn default_accent_blue() -> ColorSpec {
    ColorSpec::hex("#0077B6")
}

fn default_accent_orange() -> ColorSpec {
    ColorSpec::hex("#FB8500")
}

fn default_white() -> ColorSpec {
    ColorSpec::hex("#FFFFFF")
}

fn default_off_white() -> ColorSpec {
    ColorSpec::hex("#F8F9FA")
}

fn default_display_family() -> String {
    "Amiri".to_string()
}

fn default_display_fallback() -> String {
    "Serif".to_string()
}

fn default_branding_family() -> String {
    "Tajawal".to_string()
}

fn default_branding_fallback() -> String {
    "Sans".to_string()
}

fn default_font_timeout_ms() -> u64 {
    1500
}

fn default_header() -> String {
    "مبارك عليكم الشهر الفضيل".to_string()
}

fn default_subheader() -> String {
    "أسأل الله أن يجعله شهر قَبول ورضوان".to_string()
}

fn default_footer() -> String {
    "تقبّل الله منّا ومنكم صالح الأعمال".to_string()
}

fn default_credit() -> String {
    "Developed by SAEED JAHASH | i3j.io".to_string()
}

fn default_support() -> String {
    "Support: 0510072172".to_string()
}

fn default_name_min_size() -> f64 {
    40.0
}

fn default_name_max_size() -> f64 {
    110.0
}

fn default_filename_prefix() -> String {
    "Ramadan_".to_string()
}

fn default_share_title() -> String {
    "تهنئة رمضان".to_string()
}

fn default_share_greeting() -> String {
    "رمضان كريم!".to_string()
}

fn default_share_dedication() -> String {
    "بطاقة تهنئة خاصة لـ".to_string()
}

fn default_share_developer_label() -> String {
    "تم التطوير بواسطة:".to_string()
}

fn default_share_developer() -> String {
    "SAEED JAHASH".to_string()
}

fn default_share_site_label() -> String {
    "رابط الموقع:".to_string()
}

fn default_share_site_url() -> String {
    "https://i3j.io".to_string()
}

fn default_share_fallback_base() -> String {
    "https://wa.me/".to_string()
}

use std::{fs::File, io::BufReader, path::Path};

use serde_json::Value;

use crate::{
    foundation::error::{BioframeError, BioframeResult},
    frame::spec::{FrameSpec, FrameType, HexColor},
};

/// How link cards are arranged on the profile page.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One card per row.
    #[default]
    List,
    /// Cards in a grid.
    Grid,
}

impl ViewMode {
    /// Lowercase name as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Some(Self::List),
            "grid" => Some(Self::Grid),
            _ => None,
        }
    }
}

/// Profile customization as stored by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileSettings {
    /// Avatar frame shape.
    pub profile_frame_type: FrameType,
    /// Avatar frame colour; also tints vector icons.
    pub profile_frame_color: HexColor,
    /// Social icon size in pixels.
    pub social_icon_size: u32,
    /// Favicon size the icon fallback chain starts from.
    pub favicon_size: u32,
    /// Avatar edge length in pixels.
    pub profile_image_size: u32,
    /// Space above the avatar.
    pub head_to_picture_padding: u32,
    /// Space between avatar and name.
    pub picture_to_name_padding: u32,
    /// Space between link cards.
    pub between_cards_padding: u32,
    /// Link card height.
    pub link_card_height: u32,
    /// Card arrangement.
    pub view_mode: ViewMode,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            profile_frame_type: FrameType::None,
            profile_frame_color: HexColor::default(),
            social_icon_size: 32,
            favicon_size: 32,
            profile_image_size: 96,
            head_to_picture_padding: 24,
            picture_to_name_padding: 16,
            between_cards_padding: 12,
            link_card_height: 56,
            view_mode: ViewMode::List,
        }
    }
}

/// Inclusive bounds enforced at the write boundary.
const SIZE_BOUNDS: &[(&str, u32, u32)] = &[
    ("socialIconSize", 16, 64),
    ("faviconSize", 16, 64),
    ("profileImageSize", 48, 320),
    ("headToPicturePadding", 0, 160),
    ("pictureToNamePadding", 0, 160),
    ("betweenCardsPadding", 0, 160),
    ("linkCardHeight", 32, 200),
];

impl ProfileSettings {
    /// Decode settings for rendering. Never fails: every field that is missing, mistyped or out
    /// of the enumeration falls back to its default.
    pub fn from_value_lenient(v: &Value) -> Self {
        let d = Self::default();
        let field = |name: &str| v.get(name).filter(|f| !f.is_null());
        let size = |name: &str, fallback: u32| match field(name) {
            None => fallback,
            Some(f) => f
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or_else(|| {
                    tracing::warn!(field = name, value = %f, "invalid size setting, using default");
                    fallback
                }),
        };
        Self {
            profile_frame_type: match field("profileFrameType") {
                Some(Value::String(s)) => FrameType::parse_lenient(s),
                Some(_) => FrameType::None,
                None => d.profile_frame_type,
            },
            profile_frame_color: match field("profileFrameColor") {
                Some(Value::String(s)) => HexColor::parse_lenient(s),
                _ => d.profile_frame_color.clone(),
            },
            social_icon_size: size("socialIconSize", d.social_icon_size),
            favicon_size: size("faviconSize", d.favicon_size),
            profile_image_size: size("profileImageSize", d.profile_image_size),
            head_to_picture_padding: size("headToPicturePadding", d.head_to_picture_padding),
            picture_to_name_padding: size("pictureToNamePadding", d.picture_to_name_padding),
            between_cards_padding: size("betweenCardsPadding", d.between_cards_padding),
            link_card_height: size("linkCardHeight", d.link_card_height),
            view_mode: field("viewMode")
                .and_then(Value::as_str)
                .and_then(ViewMode::parse)
                .unwrap_or(d.view_mode),
        }
    }

    /// Write-boundary validation.
    pub fn validate(&self) -> BioframeResult<()> {
        for &(name, lo, hi) in SIZE_BOUNDS {
            let v = self.size_field(name);
            if !(lo..=hi).contains(&v) {
                return Err(BioframeError::validation(format!(
                    "{name} must be in [{lo}, {hi}], got {v}"
                )));
            }
        }
        Ok(())
    }

    fn size_field(&self, name: &str) -> u32 {
        match name {
            "socialIconSize" => self.social_icon_size,
            "faviconSize" => self.favicon_size,
            "profileImageSize" => self.profile_image_size,
            "headToPicturePadding" => self.head_to_picture_padding,
            "pictureToNamePadding" => self.picture_to_name_padding,
            "betweenCardsPadding" => self.between_cards_padding,
            "linkCardHeight" => self.link_card_height,
            _ => 0,
        }
    }

    /// Frame shape and colour.
    pub fn frame_spec(&self) -> FrameSpec {
        FrameSpec {
            frame_type: self.profile_frame_type,
            color_hex: self.profile_frame_color.clone(),
        }
    }

    /// The settings that change page structure and therefore require a preview remount.
    pub fn layout(&self) -> LayoutSettings {
        LayoutSettings {
            head_to_picture_padding: self.head_to_picture_padding,
            picture_to_name_padding: self.picture_to_name_padding,
            between_cards_padding: self.between_cards_padding,
            link_card_height: self.link_card_height,
            profile_image_size: self.profile_image_size,
            profile_frame_type: self.profile_frame_type,
            view_mode: self.view_mode,
        }
    }
}

/// Layout-affecting projection of [`ProfileSettings`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    /// See [`ProfileSettings::head_to_picture_padding`].
    pub head_to_picture_padding: u32,
    /// See [`ProfileSettings::picture_to_name_padding`].
    pub picture_to_name_padding: u32,
    /// See [`ProfileSettings::between_cards_padding`].
    pub between_cards_padding: u32,
    /// See [`ProfileSettings::link_card_height`].
    pub link_card_height: u32,
    /// See [`ProfileSettings::profile_image_size`].
    pub profile_image_size: u32,
    /// See [`ProfileSettings::profile_frame_type`].
    pub profile_frame_type: FrameType,
    /// See [`ProfileSettings::view_mode`].
    pub view_mode: ViewMode,
}

/// Preview image reported for a link.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thumbnail {
    /// Image URL.
    pub url: String,
    /// Intrinsic width, when known.
    pub width: Option<u32>,
    /// Intrinsic height, when known.
    pub height: Option<u32>,
}

/// One entry of the profile's link list.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Link {
    /// Link kind (`"embed"`, `"social"`, `"link"`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Target URL.
    pub url: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Provider name as stored.
    pub provider_name: Option<String>,
    /// Stored embed markup.
    pub embed_html: Option<String>,
    /// Preview images.
    pub thumbnails: Vec<Thumbnail>,
    /// Raw response from the link metadata service.
    pub iframely_meta: Option<Value>,
}

impl Link {
    fn deserialize_value(v: &Value) -> Result<Self, serde_json::Error> {
        <Self as serde::Deserialize>::deserialize(v)
    }

    /// True for embed links and for any link carrying embed markup.
    pub fn is_embed(&self) -> bool {
        self.kind.eq_ignore_ascii_case("embed") || self.effective_embed_html().is_some()
    }

    /// True for social profile links, which get an icon.
    pub fn is_social(&self) -> bool {
        self.kind.eq_ignore_ascii_case("social")
    }

    /// Stored provider name, else the site name reported by the metadata service.
    pub fn effective_provider_name(&self) -> Option<&str> {
        non_blank(self.provider_name.as_deref()).or_else(|| {
            let meta = self.iframely_meta.as_ref()?;
            non_blank(
                meta.pointer("/meta/site")
                    .or_else(|| meta.get("provider_name"))
                    .and_then(Value::as_str),
            )
        })
    }

    /// Stored markup, else the markup returned by the metadata service.
    pub fn effective_embed_html(&self) -> Option<&str> {
        non_blank(self.embed_html.as_deref()).or_else(|| {
            non_blank(
                self.iframely_meta
                    .as_ref()?
                    .get("html")
                    .and_then(Value::as_str),
            )
        })
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// A profile as handed to the renderer: who it belongs to, its settings and its links.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    /// Profile owner; also the public page path.
    pub username: String,
    /// Decoded customization.
    pub settings: ProfileSettings,
    /// Links in display order.
    pub links: Vec<Link>,
}

impl ProfileDocument {
    /// Lenient decode: settings degrade to defaults, malformed links are skipped.
    pub fn from_value(v: &Value) -> BioframeResult<Self> {
        let username = v
            .get("username")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BioframeError::validation("profile document needs a username"))?
            .to_string();
        let settings = v
            .get("settings")
            .map(ProfileSettings::from_value_lenient)
            .unwrap_or_default();
        let links = v
            .get("links")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(idx, item)| match Link::deserialize_value(item) {
                        Ok(link) => Some(link),
                        Err(e) => {
                            tracing::warn!(index = idx, error = %e, "skipping malformed link");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            username,
            settings,
            links,
        })
    }

    /// [`Self::from_value`] over a JSON string.
    pub fn from_json_str(s: &str) -> BioframeResult<Self> {
        let v: Value = serde_json::from_str(s)?;
        Self::from_value(&v)
    }

    /// [`Self::from_value`] over a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> BioframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BioframeError::validation(format!("open profile JSON '{}': {e}", path.display()))
        })?;
        let v: Value = serde_json::from_reader(BufReader::new(f))?;
        Self::from_value(&v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/model.rs"]
mod tests;

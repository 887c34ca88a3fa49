use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::{Character, CharacterId, Thumbnail};
use crate::MISSING_DESCRIPTION;

/// Size variants served by the image CDN.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageVariant {
    /// 50x75, used by list rows.
    PortraitSmall,
    /// 300x450, used by the detail view.
    PortraitUncanny,
}

impl ImageVariant {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::PortraitSmall => "portrait_small",
            Self::PortraitUncanny => "portrait_uncanny",
        }
    }
}

/// `path + "/" + variant + "." + extension`.
///
/// Thumbnail fields are always present on a decoded character, so a URL that
/// does not parse is a logic error and only asserted in debug builds.
#[must_use]
pub fn image_url(thumbnail: &Thumbnail, variant: ImageVariant) -> String {
    let url = format!(
        "{}/{}.{}",
        thumbnail.path,
        variant.segment(),
        thumbnail.extension
    );
    debug_assert!(Url::parse(&url).is_ok(), "malformed image url: {url}");
    url
}

impl Character {
    #[must_use]
    pub fn image_url(&self, variant: ImageVariant) -> String {
        image_url(&self.thumbnail, variant)
    }
}

/// What a list row needs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroListItem {
    pub id: CharacterId,
    pub name: String,
    pub thumbnail_url: String,
}

impl From<&Character> for HeroListItem {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id,
            name: character.name.clone(),
            thumbnail_url: character.image_url(ImageVariant::PortraitSmall),
        }
    }
}

/// Payload for navigating to the detail screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroDetail {
    pub character: Character,
    pub image_url: String,
}

impl HeroDetail {
    #[must_use]
    pub fn new(character: Character) -> Self {
        let image_url = character.image_url(ImageVariant::PortraitUncanny);
        Self {
            character,
            image_url,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.character.name
    }

    #[must_use]
    pub fn description_text(&self) -> &str {
        if self.character.description.is_empty() {
            MISSING_DESCRIPTION
        } else {
            &self.character.description
        }
    }

    #[must_use]
    pub fn series_names(&self) -> Vec<&str> {
        self.character.series.iter().map(|r| r.name.as_str()).collect()
    }

    #[must_use]
    pub fn comic_names(&self) -> Vec<&str> {
        self.character.comics.iter().map(|r| r.name.as_str()).collect()
    }
}

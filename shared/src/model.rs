use serde::{Deserialize, Serialize};
use std::fmt;

/// Lightweight name + URI link to a series or comic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub name: String,
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry. Only `id` identifies it; search matches on `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    pub thumbnail: Thumbnail,
    pub series: Vec<ResourceRef>,
    pub comics: Vec<ResourceRef>,
}

impl Character {
    /// Case-insensitive substring match on the name. `needle` must already be lowercase.
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// One fetched slice of the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    items: Vec<Character>,
    requested_offset: u32,
    requested_limit: u32,
}

impl Page {
    #[must_use]
    pub fn new(items: Vec<Character>, requested_offset: u32, requested_limit: u32) -> Self {
        Self {
            items,
            requested_offset,
            requested_limit,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Character] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Character> {
        self.items
    }

    #[must_use]
    pub fn requested_offset(&self) -> u32 {
        self.requested_offset
    }

    #[must_use]
    pub fn requested_limit(&self) -> u32 {
        self.requested_limit
    }

    /// Always equal to `items().len()`.
    #[must_use]
    pub fn returned_count(&self) -> u32 {
        u32::try_from(self.items.len()).unwrap_or(u32::MAX)
    }
}

// ============================================================================
// Wire format: { data: { count, limit, offset, results: [...] } }
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterDataWrapper {
    pub data: CharacterDataContainer,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterDataContainer {
    pub count: u32,
    pub limit: u32,
    pub offset: u32,
    pub results: Vec<CharacterDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CharacterDto {
    id: u64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    thumbnail: Thumbnail,
    #[serde(default)]
    series: ResourceList,
    #[serde(default)]
    comics: ResourceList,
}

#[derive(Debug, Default, Deserialize)]
struct ResourceList {
    #[serde(default)]
    items: Vec<ResourceRef>,
}

impl From<CharacterDto> for Character {
    fn from(dto: CharacterDto) -> Self {
        Self {
            id: CharacterId(dto.id),
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            thumbnail: dto.thumbnail,
            series: dto.series.items,
            comics: dto.comics.items,
        }
    }
}

/// Upstream error body, e.g. `{"code":"InvalidCredentials","message":"..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default, alias = "status")]
    pub message: Option<String>,
}

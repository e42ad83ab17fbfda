//! Wire records of the remote catalog API.

use serde::{Deserialize, Serialize};

use crate::domain::{Item, ItemId};

/// Body of `GET <base>?limit=<n>&offset=<m>`. Only `results` is read; paging is driven by
/// the local cursor, so `count`, `next` and `previous` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageListing {
    pub results: Vec<ListingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: Option<u32>,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlot {
    #[serde(default)]
    pub slot: Option<u32>,
    pub ability: NamedResource,
}

/// Body of `GET <base>/<name-or-id>`. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    pub height: u32,
    pub weight: u32,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: ItemId(record.id),
            name: record.name,
            types: record.types.into_iter().map(|slot| slot.kind.name).collect(),
            abilities: record
                .abilities
                .into_iter()
                .map(|slot| slot.ability.name)
                .collect(),
            height: record.height,
            weight: record.weight,
            image_url: record.sprites.front_default,
        }
    }
}

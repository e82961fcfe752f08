use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::Image;
use crate::{DDragonClient, Result, uri::DDragonUri};

pub const LEGENDARY_MIN_GOLD: u32 = 3000;
pub const LEGENDARY_MIN_DEPTH: u8 = 3;
/// 鞋子价格需严格大于该值，用于排除基础鞋
pub const BOOTS_MIN_GOLD: u32 = 300;

const TAG_BOOTS: &str = "Boots";
const TAG_TRINKET: &str = "Trinket";
const TAG_CONSUMABLE: &str = "Consumable";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gold {
    pub base: u32,
    pub total: u32,
    pub sell: u32,
    pub purchasable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    // item.json 中 id 是外层的键，反序列化表时填入
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: Image,
    #[serde(default)]
    pub gold: Gold,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub consumed: bool,
    // 合成树深度，基础装备没有该字段
    #[serde(default)]
    pub depth: Option<u8>,
    // 地图ID -> 是否可用
    #[serde(default)]
    pub maps: BTreeMap<String, bool>,
}

impl Item {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn available_on(&self, map_id: u16) -> bool {
        self.maps
            .get(&map_id.to_string())
            .copied()
            .unwrap_or(false)
    }

    /// 传说装备：价格不低于3000、合成深度不低于3，且不是鞋子、饰品或消耗品
    pub fn is_legendary(&self) -> bool {
        self.gold.total >= LEGENDARY_MIN_GOLD
            && !self.consumed
            && !self.has_tag(TAG_TRINKET)
            && !self.has_tag(TAG_CONSUMABLE)
            && !self.has_tag(TAG_BOOTS)
            && self.depth.is_some_and(|depth| depth >= LEGENDARY_MIN_DEPTH)
    }

    pub fn is_boots(&self) -> bool {
        self.has_tag(TAG_BOOTS) && self.gold.total > BOOTS_MIN_GOLD && !self.consumed
    }
}

#[derive(Debug)]
pub struct ItemTable(pub Vec<Item>);

impl<'de> Deserialize<'de> for ItemTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct DataWrapper {
            data: BTreeMap<String, Item>,
        }

        let wrapper = DataWrapper::deserialize(deserializer)?;
        let items = wrapper
            .data
            .into_iter()
            .map(|(id, item)| Item { id, ..item })
            .collect();
        Ok(ItemTable(items))
    }
}

impl DDragonClient {
    pub async fn get_items(&self, version: &str) -> Result<Vec<Item>> {
        let table: ItemTable = self
            .get_json(&DDragonUri::items(version, &self.config.locale))
            .await?;
        Ok(table.0)
    }
}

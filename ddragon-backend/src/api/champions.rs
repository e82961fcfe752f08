use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::Image;
use crate::{DDragonClient, Result, uri::DDragonUri};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub id: String,
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub image: Image,
    // 定位标签，例如 Fighter / Mage
    #[serde(default)]
    pub tags: Vec<String>,
}

/// champion.json 以英雄名为键，展开为按键排序的列表
#[derive(Debug)]
pub struct ChampionTable(pub Vec<Champion>);

impl<'de> Deserialize<'de> for ChampionTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct DataWrapper {
            data: BTreeMap<String, Champion>,
        }

        let wrapper = DataWrapper::deserialize(deserializer)?;
        Ok(ChampionTable(wrapper.data.into_values().collect()))
    }
}

impl DDragonClient {
    pub async fn get_champions(&self, version: &str) -> Result<Vec<Champion>> {
        let table: ChampionTable = self
            .get_json(&DDragonUri::champions(version, &self.config.locale))
            .await?;
        Ok(table.0)
    }
}

#[test]
fn test_champion_table_flatten() {
    let json_data = r#"
    {
        "type": "champion",
        "format": "standAloneComplex",
        "version": "14.1.1",
        "data": {
            "Ahri": {
                "version": "14.1.1",
                "id": "Ahri",
                "key": "103",
                "name": "Ahri",
                "title": "the Nine-Tailed Fox",
                "blurb": "Innately connected to the magic of the spirit realm...",
                "image": {"full": "Ahri.png", "sprite": "champion0.png", "group": "champion", "x": 48, "y": 0, "w": 48, "h": 48},
                "tags": ["Mage", "Assassin"],
                "partype": "Mana"
            },
            "Aatrox": {
                "version": "14.1.1",
                "id": "Aatrox",
                "key": "266",
                "name": "Aatrox",
                "title": "the Darkin Blade",
                "image": {"full": "Aatrox.png", "sprite": "champion0.png", "group": "champion", "x": 0, "y": 0, "w": 48, "h": 48},
                "tags": ["Fighter"]
            }
        }
    }"#;

    let table: ChampionTable = serde_json::from_str(json_data).expect("Deserialization failed");
    let names = table.0.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Aatrox", "Ahri"]);
    assert_eq!(table.0[1].title, "the Nine-Tailed Fox");
    assert_eq!(table.0[1].image.full, "Ahri.png");
    assert_eq!(table.0[1].tags, ["Mage", "Assassin"]);
    assert_eq!(table.0[0].key, "266");
}

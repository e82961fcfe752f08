use serde::{Deserialize, Serialize};

use crate::{DDragonClient, Result, uri::DDragonUri};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rune {
    pub id: u32,
    #[serde(default)]
    pub key: String,
    pub icon: String,
    pub name: String,
    // 含有 <b> 等标记，展示前需要处理
    #[serde(default)]
    pub short_desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuneSlot {
    pub runes: Vec<Rune>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuneTree {
    pub id: u32,
    #[serde(default)]
    pub key: String,
    pub icon: String,
    pub name: String,
    /// 第一个槽位为基石符文
    pub slots: Vec<RuneSlot>,
}

impl RuneTree {
    pub fn keystones(&self) -> &[Rune] {
        self.slots
            .first()
            .map(|slot| slot.runes.as_slice())
            .unwrap_or_default()
    }

    pub fn contains(&self, rune: &Rune) -> bool {
        self.slots.iter().any(|slot| slot.runes.contains(rune))
    }
}

impl DDragonClient {
    pub async fn get_rune_trees(&self, version: &str) -> Result<Vec<RuneTree>> {
        self.get_json(&DDragonUri::rune_trees(version, &self.config.locale))
            .await
    }
}

#[test]
fn test_rune_tree_deserialize() {
    let json_data = r#"
    [{
        "id": 8100,
        "key": "Domination",
        "icon": "perk-images/Styles/7200_Domination.png",
        "name": "Domination",
        "slots": [
            {"runes": [
                {"id": 8112, "key": "Electrocute", "icon": "perk-images/Styles/Domination/Electrocute/Electrocute.png", "name": "Electrocute", "shortDesc": "Hitting a champion with 3 <b>separate</b> attacks deals bonus damage.", "longDesc": "..."},
                {"id": 8128, "key": "DarkHarvest", "icon": "perk-images/Styles/Domination/DarkHarvest/DarkHarvest.png", "name": "Dark Harvest", "shortDesc": "Damaging a low health champion inflicts adaptive damage."}
            ]},
            {"runes": [
                {"id": 8126, "key": "CheapShot", "icon": "perk-images/Styles/Domination/CheapShot/CheapShot.png", "name": "Cheap Shot", "shortDesc": "Deal bonus true damage to enemy champions with impaired movement."}
            ]}
        ]
    }]"#;

    let trees: Vec<RuneTree> = serde_json::from_str(json_data).expect("Deserialization failed");
    assert_eq!(trees.len(), 1);
    let tree = &trees[0];
    assert_eq!(tree.id, 8100);
    assert_eq!(tree.slots.len(), 2);
    assert_eq!(tree.keystones().len(), 2);
    assert_eq!(tree.keystones()[1].name, "Dark Harvest");
    assert!(tree.keystones()[0].short_desc.contains("<b>separate</b>"));
    assert!(tree.contains(&tree.slots[1].runes[0]));
}

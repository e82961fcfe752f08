use futures_util::future::try_join3;
use log::info;
use serde::Serialize;

use crate::{Champion, DDragonClient, Item, Result, RuneTree};

/// 某一数据版本的完整快照，加载后只读，刷新时整体替换
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    version: String,
    champions: Vec<Champion>,
    legendary_items: Vec<Item>,
    boots: Vec<Item>,
    rune_trees: Vec<RuneTree>,
}

impl Catalog {
    /// 由已分类的列表构建
    pub fn new(
        version: impl Into<String>,
        champions: Vec<Champion>,
        legendary_items: Vec<Item>,
        boots: Vec<Item>,
        rune_trees: Vec<RuneTree>,
    ) -> Self {
        Self {
            version: version.into(),
            champions,
            legendary_items,
            boots,
            rune_trees,
        }
    }

    /// 由原始数据构建：只保留指定地图可用的装备，再分出传说装备和鞋子
    pub fn from_datasets(
        version: impl Into<String>,
        champions: Vec<Champion>,
        items: Vec<Item>,
        rune_trees: Vec<RuneTree>,
        map_id: u16,
    ) -> Self {
        let (mut legendary_items, mut boots) = (Vec::new(), Vec::new());
        for item in items.into_iter().filter(|item| item.available_on(map_id)) {
            if item.is_legendary() {
                legendary_items.push(item);
            } else if item.is_boots() {
                boots.push(item);
            }
        }
        Self::new(version, champions, legendary_items, boots, rune_trees)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn champions(&self) -> &[Champion] {
        &self.champions
    }

    pub fn legendary_items(&self) -> &[Item] {
        &self.legendary_items
    }

    pub fn boots(&self) -> &[Item] {
        &self.boots
    }

    pub fn rune_trees(&self) -> &[RuneTree] {
        &self.rune_trees
    }
}

impl DDragonClient {
    /// 加载完整目录，任一数据集失败则整体失败
    pub async fn fetch_catalog(&self) -> Result<Catalog> {
        let version = self.resolve_version().await;
        info!("加载数据版本 {version}");
        let (champions, items, rune_trees) = try_join3(
            self.get_champions(&version),
            self.get_items(&version),
            self.get_rune_trees(&version),
        )
        .await?;
        let catalog = Catalog::from_datasets(
            version,
            champions,
            items,
            rune_trees,
            self.config.map_id,
        );
        info!(
            "数据加载完成: {}个英雄, {}件传说装备, {}双鞋子, {}个符文系",
            catalog.champions.len(),
            catalog.legendary_items.len(),
            catalog.boots.len(),
            catalog.rune_trees.len()
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use crate::{DDragonConfig, config::FALLBACK_VERSION};

    use super::*;

    const CHAMPION_JSON: &str = r#"{"data": {
        "Garen": {"id": "Garen", "key": "86", "name": "Garen", "title": "the Might of Demacia",
                  "image": {"full": "Garen.png"}, "tags": ["Fighter", "Tank"]},
        "Lux": {"id": "Lux", "key": "99", "name": "Lux", "title": "the Lady of Luminosity",
                "image": {"full": "Lux.png"}, "tags": ["Mage", "Support"]}
    }}"#;

    const ITEM_JSON: &str = r#"{"data": {
        "1001": {"name": "Boots", "image": {"full": "1001.png"}, "gold": {"total": 300},
                 "tags": ["Boots"], "maps": {"11": true}},
        "2003": {"name": "Health Potion", "image": {"full": "2003.png"}, "gold": {"total": 50},
                 "tags": ["Consumable"], "consumed": true, "maps": {"11": true}},
        "3020": {"name": "Sorcerer's Shoes", "image": {"full": "3020.png"}, "gold": {"total": 1100},
                 "tags": ["Boots", "MagicPenetration"], "depth": 2, "maps": {"11": true}},
        "3031": {"name": "Infinity Edge", "image": {"full": "3031.png"}, "gold": {"total": 3400},
                 "tags": ["CriticalStrike"], "depth": 3, "maps": {"11": true}},
        "3089": {"name": "Rabadon's Deathcap", "image": {"full": "3089.png"}, "gold": {"total": 3600},
                 "tags": ["SpellDamage"], "depth": 3, "maps": {"11": true, "12": true}},
        "223031": {"name": "Infinity Edge", "image": {"full": "3031.png"}, "gold": {"total": 3400},
                   "tags": ["CriticalStrike"], "depth": 3, "maps": {"11": false, "30": true}}
    }}"#;

    const RUNES_JSON: &str = r#"[
        {"id": 8000, "key": "Precision", "icon": "perk-images/Styles/7201_Precision.png", "name": "Precision",
         "slots": [
            {"runes": [{"id": 8010, "key": "Conqueror", "icon": "c.png", "name": "Conqueror", "shortDesc": "Gain <b>stacks</b>."}]},
            {"runes": [{"id": 9111, "key": "Triumph", "icon": "t.png", "name": "Triumph", "shortDesc": "Heal on takedown."}]}
         ]},
        {"id": 8100, "key": "Domination", "icon": "perk-images/Styles/7200_Domination.png", "name": "Domination",
         "slots": [
            {"runes": [{"id": 8112, "key": "Electrocute", "icon": "e.png", "name": "Electrocute", "shortDesc": "Burst."}]},
            {"runes": [{"id": 8126, "key": "CheapShot", "icon": "cs.png", "name": "Cheap Shot", "shortDesc": "True damage."}]}
         ]}
    ]"#;

    type Route = (String, u16, String);

    /// 本地HTTP桩服务，每个连接只响应一次请求
    async fn serve(routes: Vec<Route>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(routes);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let request = String::from_utf8_lossy(&buf);
                    let path = request.split_whitespace().nth(1).unwrap_or("/");
                    let (status, body) = routes
                        .iter()
                        .find(|(route, _, _)| route == path)
                        .map(|(_, status, body)| (*status, body.clone()))
                        .unwrap_or((404, "not found".to_string()));
                    let reason = if status == 200 { "OK" } else { "Error" };
                    let response = format!(
                        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream.write_all(response.as_bytes()).await.ok();
                    stream.shutdown().await.ok();
                });
            }
        });
        format!("http://{addr}")
    }

    fn dataset_routes(version: &str) -> Vec<Route> {
        vec![
            (
                format!("/cdn/{version}/data/en_US/champion.json"),
                200,
                CHAMPION_JSON.to_string(),
            ),
            (
                format!("/cdn/{version}/data/en_US/item.json"),
                200,
                ITEM_JSON.to_string(),
            ),
            (
                format!("/cdn/{version}/data/en_US/runesReforged.json"),
                200,
                RUNES_JSON.to_string(),
            ),
        ]
    }

    fn client_with(config: DDragonConfig) -> DDragonClient {
        // 桩服务在本机，绕开环境中的代理设置
        DDragonClient {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            config,
        }
    }

    fn client(base_url: String) -> DDragonClient {
        client_with(DDragonConfig {
            base_url,
            ..Default::default()
        })
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[tokio::test]
    async fn fetch_catalog_categorizes_items() {
        let mut routes = dataset_routes("14.1.1");
        routes.push((
            "/api/versions.json".to_string(),
            200,
            r#"["14.1.1", "13.24.1"]"#.to_string(),
        ));
        let client = client(serve(routes).await);

        let catalog = client.fetch_catalog().await.unwrap();
        assert_eq!(catalog.version(), "14.1.1");
        assert_eq!(catalog.champions().len(), 2);
        assert_eq!(ids(catalog.legendary_items()), ["3031", "3089"]);
        assert_eq!(ids(catalog.boots()), ["3020"]);
        assert_eq!(catalog.rune_trees().len(), 2);
    }

    #[tokio::test]
    async fn version_lookup_failure_falls_back() {
        let mut routes = dataset_routes(FALLBACK_VERSION);
        routes.push(("/api/versions.json".to_string(), 500, "oops".to_string()));
        let client = client(serve(routes).await);

        let catalog = client.fetch_catalog().await.unwrap();
        assert_eq!(catalog.version(), FALLBACK_VERSION);
    }

    #[tokio::test]
    async fn empty_version_list_falls_back() {
        let routes = vec![("/api/versions.json".to_string(), 200, "[]".to_string())];
        let client = client(serve(routes).await);
        assert_eq!(client.resolve_version().await, FALLBACK_VERSION);
    }

    #[tokio::test]
    async fn pinned_version_skips_lookup() {
        let base_url = serve(dataset_routes("14.2.1")).await;
        let client = client_with(DDragonConfig {
            base_url,
            version: Some("14.2.1".to_string()),
            ..Default::default()
        });

        let catalog = client.fetch_catalog().await.unwrap();
        assert_eq!(catalog.version(), "14.2.1");
    }

    #[tokio::test]
    async fn missing_dataset_is_data_unavailable() {
        let mut routes = dataset_routes("14.1.1");
        routes.retain(|(path, _, _)| !path.ends_with("item.json"));
        routes.push((
            "/api/versions.json".to_string(),
            200,
            r#"["14.1.1"]"#.to_string(),
        ));
        let client = client(serve(routes).await);

        let err = client.fetch_catalog().await.unwrap_err();
        assert!(err.is_data_unavailable(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn malformed_dataset_is_data_unavailable() {
        let mut routes = dataset_routes("14.1.1");
        routes[0].2 = r#"{"data": ["not", "a", "table"]}"#.to_string();
        routes.push((
            "/api/versions.json".to_string(),
            200,
            r#"["14.1.1"]"#.to_string(),
        ));
        let client = client(serve(routes).await);

        let err = client.fetch_catalog().await.unwrap_err();
        assert!(
            matches!(err, crate::DDragonError::SerializationError(_)),
            "unexpected error: {err}"
        );
        assert!(err.is_data_unavailable());
    }

    #[tokio::test]
    async fn malformed_version_list_falls_back() {
        let routes = vec![(
            "/api/versions.json".to_string(),
            200,
            r#"{"latest": "14.1.1"}"#.to_string(),
        )];
        let client = client(serve(routes).await);
        let err = client.get_versions().await.unwrap_err();
        assert!(matches!(err, crate::DDragonError::SerializationError(_)));
        assert_eq!(client.resolve_version().await, FALLBACK_VERSION);
    }

    #[tokio::test]
    async fn unreachable_source() {
        let client = client("http://127.0.0.1:1".to_string());
        assert_eq!(client.resolve_version().await, FALLBACK_VERSION);
        let err = client.fetch_catalog().await.unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn from_datasets_respects_map() {
        let items = serde_json::from_str::<crate::api::items::ItemTable>(ITEM_JSON)
            .unwrap()
            .0;
        let catalog = Catalog::from_datasets("14.1.1", vec![], items.clone(), vec![], 30);
        assert_eq!(ids(catalog.legendary_items()), ["223031"]);
        assert!(catalog.boots().is_empty());

        let catalog = Catalog::from_datasets("14.1.1", vec![], items, vec![], 12);
        assert_eq!(ids(catalog.legendary_items()), ["3089"]);
    }
}

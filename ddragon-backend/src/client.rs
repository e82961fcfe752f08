use log::debug;
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::{DDragonConfig, DDragonError, Result, uri::DDragonUri};

pub struct DDragonClient {
    pub client: reqwest::Client,
    pub config: DDragonConfig,
}

pub fn default_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(format!("lol-randomizer/{}", env!("CARGO_PKG_VERSION")).as_str())
        .build()
}

impl DDragonClient {
    pub fn new(config: DDragonConfig) -> Result<Self> {
        let client = default_client()?;
        Ok(DDragonClient { client, config })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub(crate) async fn get(&self, api: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), api);
        debug!("GET {url}");
        let r = self.client.get(url).send().await?;
        if !r.status().is_success() {
            let status = r.status();
            let text = r
                .text()
                .await
                .unwrap_or_else(|e| format!("Unknown error: {e}"));
            debug!("请求API({api})失败: {status} {text}");
            Err(DDragonError::ResponseError(format!("{status} {api}: {text}")))
        } else {
            Ok(r)
        }
    }

    /// 读取完整响应体后再反序列化，格式错误归为 SerializationError
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, api: &str) -> Result<T> {
        let body = self.get(api).await?.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            debug!("解析API({api})响应失败: {e}");
            DDragonError::SerializationError(e)
        })
    }

    /// 英雄头像地址
    pub fn champion_image_url(&self, version: &str, image: &str) -> String {
        format!(
            "{}{}",
            self.base_url(),
            DDragonUri::champion_image(version, image)
        )
    }

    pub fn item_image_url(&self, version: &str, image: &str) -> String {
        format!("{}{}", self.base_url(), DDragonUri::item_image(version, image))
    }

    pub fn rune_icon_url(&self, icon: &str) -> String {
        format!("{}{}", self.base_url(), DDragonUri::rune_icon(icon))
    }
}

#[test]
fn test_asset_urls_ignore_trailing_slash() {
    let client = DDragonClient::new(DDragonConfig {
        base_url: "http://localhost:8080/".to_string(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(
        client.champion_image_url("14.1.1", "Ahri.png"),
        "http://localhost:8080/cdn/14.1.1/img/champion/Ahri.png"
    );
    assert_eq!(
        client.rune_icon_url("perk-images/Styles/Precision/Conqueror/Conqueror.png"),
        "http://localhost:8080/cdn/img/perk-images/Styles/Precision/Conqueror/Conqueror.png"
    );
}

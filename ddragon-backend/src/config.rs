use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://ddragon.leagueoflegends.com";
pub const DEFAULT_LOCALE: &str = "en_US";
/// 召唤师峡谷
pub const SUMMONERS_RIFT: u16 = 11;
/// 版本列表获取失败时使用的最后已知版本
pub const FALLBACK_VERSION: &str = "13.24.1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DDragonConfig {
    pub base_url: String,
    pub locale: String,
    pub map_id: u16,
    // 固定数据版本，为空时查询最新版本
    pub version: Option<String>,
    pub fallback_version: String,
}

impl Default for DDragonConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            map_id: SUMMONERS_RIFT,
            version: None,
            fallback_version: FALLBACK_VERSION.to_string(),
        }
    }
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: DDragonConfig =
        serde_json::from_str(r#"{"locale": "zh_CN", "version": "14.1.1"}"#).unwrap();
    assert_eq!(config.locale, "zh_CN");
    assert_eq!(config.version.as_deref(), Some("14.1.1"));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.map_id, SUMMONERS_RIFT);
    assert_eq!(config.fallback_version, FALLBACK_VERSION);
}

use log::{info, warn};

use crate::{DDragonClient, Result, uri::DDragonUri};

impl DDragonClient {
    pub async fn get_versions(&self) -> Result<Vec<String>> {
        self.get_json(DDragonUri::VERSIONS).await
    }

    /// 确定本次加载使用的数据版本
    /// 配置中固定了版本时直接使用，否则取版本列表第一项，查询失败时退回默认版本
    pub async fn resolve_version(&self) -> String {
        if let Some(version) = &self.config.version {
            info!("使用固定数据版本: {version}");
            return version.clone();
        }
        let fallback = &self.config.fallback_version;
        match self.get_versions().await {
            Ok(versions) => match versions.into_iter().next() {
                Some(version) => version,
                None => {
                    warn!("版本列表为空，使用默认版本 {fallback}");
                    fallback.clone()
                }
            },
            Err(e) => {
                warn!("获取最新版本失败: {e}，使用默认版本 {fallback}");
                fallback.clone()
            }
        }
    }
}

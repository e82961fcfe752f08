pub mod champions;
pub mod items;
pub mod runes;
mod versions;

use serde::{Deserialize, Serialize};

/// 图片引用，只保留文件名
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub full: String,
}

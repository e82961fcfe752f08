use std::fmt::Display;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DDragonError>;

/// 抽取时需要非空的目录分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Champions,
    LegendaryItems,
    Boots,
    RuneTrees,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Champions => "champions",
            Category::LegendaryItems => "legendary items",
            Category::Boots => "boots",
            Category::RuneTrees => "rune trees",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum DDragonError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("No {0} available to pick from")]
    EmptyCatalog(Category),
    #[error("Rune tree '{tree}' has no runes in slot {slot}")]
    EmptyRuneSlot { tree: String, slot: usize },
    #[error("At least two distinct rune trees are required, found {0}")]
    InsufficientRuneTrees(usize),
}

impl DDragonError {
    /// 网络或数据格式错误，目录加载整体失败
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            DDragonError::RequestFailed(_)
                | DDragonError::ResponseError(_)
                | DDragonError::SerializationError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_unavailable_grouping() {
        assert!(DDragonError::ResponseError("404".into()).is_data_unavailable());
        let parse = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        assert!(DDragonError::from(parse).is_data_unavailable());
        assert!(!DDragonError::EmptyCatalog(Category::Boots).is_data_unavailable());
        assert!(!DDragonError::InsufficientRuneTrees(1).is_data_unavailable());
    }

    #[test]
    fn category_messages() {
        assert_eq!(
            DDragonError::EmptyCatalog(Category::LegendaryItems).to_string(),
            "No legendary items available to pick from"
        );
        assert_eq!(
            DDragonError::EmptyRuneSlot {
                tree: "Precision".into(),
                slot: 2
            }
            .to_string(),
            "Rune tree 'Precision' has no runes in slot 2"
        );
    }
}

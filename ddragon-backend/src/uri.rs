pub struct DDragonUri;

impl DDragonUri {
    pub const VERSIONS: &'static str = "/api/versions.json";

    pub fn champions(version: &str, locale: &str) -> String {
        format!("/cdn/{version}/data/{locale}/champion.json")
    }

    pub fn items(version: &str, locale: &str) -> String {
        format!("/cdn/{version}/data/{locale}/item.json")
    }

    pub fn rune_trees(version: &str, locale: &str) -> String {
        format!("/cdn/{version}/data/{locale}/runesReforged.json")
    }

    pub fn champion_image(version: &str, image: &str) -> String {
        format!("/cdn/{version}/img/champion/{image}")
    }

    pub fn item_image(version: &str, image: &str) -> String {
        format!("/cdn/{version}/img/item/{image}")
    }

    // 符文图标不区分版本
    pub fn rune_icon(icon: &str) -> String {
        format!("/cdn/img/{icon}")
    }
}

#[test]
fn test_uri_layout() {
    assert_eq!(
        DDragonUri::champions("14.1.1", "en_US"),
        "/cdn/14.1.1/data/en_US/champion.json"
    );
    assert_eq!(
        DDragonUri::rune_trees("14.1.1", "ko_KR"),
        "/cdn/14.1.1/data/ko_KR/runesReforged.json"
    );
    assert_eq!(
        DDragonUri::item_image("14.1.1", "3031.png"),
        "/cdn/14.1.1/img/item/3031.png"
    );
    assert_eq!(
        DDragonUri::rune_icon("perk-images/Styles/7200_Domination.png"),
        "/cdn/img/perk-images/Styles/7200_Domination.png"
    );
}

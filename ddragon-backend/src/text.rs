/// 去除描述文本中的标记：标签直接删除，`<br>` 换行，合并多余空白并去掉空行
pub fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '<' {
            plain.push(c);
            continue;
        }
        let tag = chars.by_ref().take_while(|&c| c != '>').collect::<String>();
        let name = tag.trim().trim_matches('/').trim();
        if name.eq_ignore_ascii_case("br") {
            plain.push('\n');
        }
    }

    plain
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::strip_markup;

    #[test]
    fn inline_tags_are_removed() {
        assert_eq!(
            strip_markup("Hitting a champion with 3 <b>separate</b> attacks deals <lol-uikit-tooltipped-keyword key='LinkTooltip_Description_Adaptive'>adaptive damage</lol-uikit-tooltipped-keyword>."),
            "Hitting a champion with 3 separate attacks deals adaptive damage."
        );
    }

    #[test]
    fn line_breaks() {
        assert_eq!(
            strip_markup("<mainText><stats><attention>45</attention> Ability Power</stats><br><br>Gain <b>Mythic</b> power.<br/></mainText>"),
            "45 Ability Power\nGain Mythic power."
        );
        assert_eq!(strip_markup("first<BR />second"), "first\nsecond");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_markup("  Heal   on takedown. "), "Heal on takedown.");
        assert_eq!(strip_markup(""), "");
    }
}

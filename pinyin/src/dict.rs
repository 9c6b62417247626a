//! Static pinyin reading table.
//!
//! Maps single ideographs to their candidate readings in tone-mark notation,
//! most common reading first. Multi-reading characters carry every accepted
//! reading so the disambiguation surface has real choices to offer.
//!
//! The table covers the high-frequency characters of the question-bank
//! domain; anything outside it surfaces as a lookup error, which the engine
//! degrades to a bare un-annotated character.

use annotate_core::ReadingDict;
use anyhow::anyhow;
use phf::phf_map;

static READINGS: phf::Map<char, &'static [&'static str]> = phf_map! {
    // Multi-reading characters
    '行' => &["xíng", "háng"],
    '重' => &["zhòng", "chóng"],
    '长' => &["cháng", "zhǎng"],
    '乐' => &["lè", "yuè"],
    '还' => &["hái", "huán"],
    '得' => &["dé", "děi", "de"],
    '着' => &["zhe", "zháo", "zhuó"],
    '地' => &["dì", "de"],
    '了' => &["le", "liǎo"],
    '都' => &["dōu", "dū"],
    '为' => &["wèi", "wéi"],
    '发' => &["fā", "fà"],
    '好' => &["hǎo", "hào"],
    '少' => &["shǎo", "shào"],
    '教' => &["jiāo", "jiào"],
    '觉' => &["jué", "jiào"],
    '传' => &["chuán", "zhuàn"],
    '曾' => &["céng", "zēng"],
    '干' => &["gān", "gàn"],
    '相' => &["xiāng", "xiàng"],
    '兴' => &["xìng", "xīng"],
    '应' => &["yīng", "yìng"],
    '数' => &["shù", "shǔ"],
    '便' => &["biàn", "pián"],
    '会' => &["huì", "kuài"],
    '几' => &["jǐ", "jī"],
    '空' => &["kōng", "kòng"],
    '只' => &["zhǐ", "zhī"],
    '种' => &["zhǒng", "zhòng"],
    '分' => &["fēn", "fèn"],
    '背' => &["bèi", "bēi"],
    '卷' => &["juàn", "juǎn"],
    '答' => &["dá", "dā"],
    '难' => &["nán", "nàn"],
    '中' => &["zhōng", "zhòng"],

    // Single-reading characters
    '你' => &["nǐ"],
    '我' => &["wǒ"],
    '他' => &["tā"],
    '她' => &["tā"],
    '是' => &["shì"],
    '不' => &["bù"],
    '的' => &["de"],
    '人' => &["rén"],
    '大' => &["dà"],
    '小' => &["xiǎo"],
    '学' => &["xué"],
    '生' => &["shēng"],
    '天' => &["tiān"],
    '上' => &["shàng"],
    '下' => &["xià"],
    '国' => &["guó"],
    '语' => &["yǔ"],
    '文' => &["wén"],
    '字' => &["zì"],
    '汉' => &["hàn"],
    '拼' => &["pīn"],
    '音' => &["yīn"],
    '读' => &["dú"],
    '写' => &["xiě"],
    '说' => &["shuō"],
    '话' => &["huà"],
    '题' => &["tí"],
    '试' => &["shì"],
    '年' => &["nián"],
    '级' => &["jí"],
    '科' => &["kē"],
    '目' => &["mù"],
    '考' => &["kǎo"],
    '期' => &["qī"],
    '班' => &["bān"],
    '师' => &["shī"],
    '课' => &["kè"],
    '本' => &["běn"],
    '书' => &["shū"],
    '水' => &["shuǐ"],
    '火' => &["huǒ"],
    '山' => &["shān"],
    '日' => &["rì"],
    '月' => &["yuè"],
    '明' => &["míng"],
    '白' => &["bái"],
    '红' => &["hóng"],
    '花' => &["huā"],
    '草' => &["cǎo"],
    '树' => &["shù"],
    '鸟' => &["niǎo"],
    '马' => &["mǎ"],
    '牛' => &["niú"],
    '羊' => &["yáng"],
    '风' => &["fēng"],
    '雨' => &["yǔ"],
    '雪' => &["xuě"],
    '云' => &["yún"],
    '电' => &["diàn"],
    '车' => &["chē"],
    '门' => &["mén"],
    '家' => &["jiā"],
    '爱' => &["ài"],
    '心' => &["xīn"],
    '手' => &["shǒu"],
    '口' => &["kǒu"],
    '和' => &["hé"],
    '在' => &["zài"],
    '有' => &["yǒu"],
    '这' => &["zhè"],
    '那' => &["nà"],
    '什' => &["shén"],
    '么' => &["me"],
};

/// Pronunciation dictionary backed by the static table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinDict;

impl PinyinDict {
    pub fn new() -> Self {
        Self
    }

    /// Number of characters in the table.
    pub fn len(&self) -> usize {
        READINGS.len()
    }

    pub fn is_empty(&self) -> bool {
        READINGS.is_empty()
    }

    /// Whether the table carries an entry for `ch`.
    pub fn contains(&self, ch: char) -> bool {
        READINGS.contains_key(&ch)
    }
}

impl ReadingDict for PinyinDict {
    fn readings(&self, ch: char) -> anyhow::Result<Vec<String>> {
        READINGS
            .get(&ch)
            .map(|list| list.iter().map(|s| s.to_string()).collect())
            .ok_or_else(|| anyhow!("no dictionary entry for '{ch}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_character() {
        let dict = PinyinDict::new();
        assert_eq!(dict.readings('你').unwrap(), vec!["nǐ".to_string()]);
    }

    #[test]
    fn test_multi_reading_order() {
        let dict = PinyinDict::new();
        let readings = dict.readings('行').unwrap();
        assert!(readings.len() >= 2);
        // Most common reading first.
        assert_eq!(readings[0], "xíng");
        assert!(readings.contains(&"háng".to_string()));
    }

    #[test]
    fn test_unknown_character_errors() {
        let dict = PinyinDict::new();
        assert!(dict.readings('龘').is_err());
        assert!(dict.readings('A').is_err());
    }

    #[test]
    fn test_table_has_no_empty_reading_lists() {
        let dict = PinyinDict::new();
        for (ch, list) in READINGS.entries() {
            assert!(!list.is_empty(), "empty reading list for {ch}");
        }
    }
}

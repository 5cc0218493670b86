use std::ops::Range;

/// Code of the auto-detect sentinel entry
pub const AUTO_DETECT: &str = "auto";

/// Code of the only language the dictionary understands
pub const ENGLISH: &str = "EN";

/// Locale used whenever a language has no better match
pub const DEFAULT_LOCALE: &str = "en-US";

/// A selectable language: display name, provider code and speech locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
    pub locale: &'static str,
}

const fn lang(name: &'static str, code: &'static str, locale: &'static str) -> Language {
    Language { name, code, locale }
}

pub static LANGUAGES: [Language; 30] = [
    lang("Detect language", AUTO_DETECT, DEFAULT_LOCALE),
    lang("Bulgarian", "BG", "bg-BG"),
    lang("Chinese (simplified)", "ZH", "zh-CN"),
    lang("Czech", "CS", "cs-CZ"),
    lang("Danish", "DA", "da-DK"),
    lang("Dutch", "NL", "nl-NL"),
    lang("English", ENGLISH, "en-US"),
    lang("Estonian", "ET", "et-EE"),
    lang("Finnish", "FI", "fi-FI"),
    lang("French", "FR", "fr-FR"),
    lang("German", "DE", "de-DE"),
    lang("Greek", "EL", "el-GR"),
    lang("Hungarian", "HU", "hu-HU"),
    lang("Indonesian", "ID", "id-ID"),
    lang("Italian", "IT", "it-IT"),
    lang("Japanese", "JA", "ja-JP"),
    lang("Korean", "KO", "ko-KR"),
    lang("Latvian", "LV", "lv-LV"),
    lang("Lithuanian", "LT", "lt-LT"),
    lang("Norwegian", "NB", "nb-NO"),
    lang("Polish", "PL", "pl-PL"),
    lang("Portuguese", "PT", "pt-PT"),
    lang("Romanian", "RO", "ro-RO"),
    lang("Russian", "RU", "ru-RU"),
    lang("Slovak", "SK", "sk-SK"),
    lang("Slovenian", "SL", "sl-SI"),
    lang("Spanish", "ES", "es-ES"),
    lang("Swedish", "SV", "sv-SE"),
    lang("Turkish", "TR", "tr-TR"),
    lang("Ukrainian", "UK", "uk-UA"),
];

/// Look up a catalog entry by provider code, ignoring case
pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

/// Display name for a code, the code itself when it is not in the catalog
pub fn display_name(code: &str) -> String {
    find(code)
        .map(|l| l.name.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Speech locale for a code, defaulting to `en-US`
pub fn speech_locale(code: &str) -> &'static str {
    find(code).map(|l| l.locale).unwrap_or(DEFAULT_LOCALE)
}

pub fn is_auto(code: &str) -> bool {
    code.eq_ignore_ascii_case(AUTO_DETECT)
}

pub fn is_english(code: &str) -> bool {
    code == ENGLISH
}

/// Catalog entries whose display name contains `query`, ignoring case
pub fn filter(query: &str) -> Vec<&'static Language> {
    let query = query.to_lowercase();
    LANGUAGES
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&query))
        .collect()
}

/// Byte ranges of every case-insensitive occurrence of `query` in `name`
pub fn highlight_ranges(name: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }

    let haystack = name.to_lowercase();
    let needle = query.to_lowercase();
    // Lower-casing can change byte lengths outside ASCII; ranges would not map back
    if haystack.len() != name.len() {
        return Vec::new();
    }

    haystack
        .match_indices(&needle)
        .map(|(start, m)| start..start + m.len())
        .collect()
}

use polyglot_types::LanguageOption;

/// Static record of one supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Target-language identifier sent to the API
    pub code: &'static str,
    /// Identifier accepted when the language is the translation source
    pub source_code: &'static str,
    pub name: &'static str,
    /// BCP 47 tag handed to the speech backend
    pub speech_tag: &'static str,
}

const fn lang(
    code: &'static str,
    source_code: &'static str,
    name: &'static str,
    speech_tag: &'static str,
) -> Language {
    Language {
        code,
        source_code,
        name,
        speech_tag,
    }
}

pub const DEFAULT_SOURCE: &str = "EN";
pub const DEFAULT_TARGETS: [&str; 3] = ["ES", "DE", "RU"];

/// English first, then Spanish, Chinese, German, Russian, then alphabetical
pub static LANGUAGES: [Language; 26] = [
    lang("EN", "EN", "English", "en-GB"),
    lang("EN-US", "EN", "English (US)", "en-US"),
    lang("ES", "ES", "Spanish", "es-ES"),
    lang("ZH-HANS", "ZH", "Chinese (Simplified)", "zh-CN"),
    lang("DE", "DE", "German", "de-DE"),
    lang("RU", "RU", "Russian", "ru-RU"),
    lang("AR", "AR", "Arabic", "ar-SA"),
    lang("CS", "CS", "Czech", "cs-CZ"),
    lang("DA", "DA", "Danish", "da-DK"),
    lang("NL", "NL", "Dutch", "nl-NL"),
    lang("FI", "FI", "Finnish", "fi-FI"),
    lang("FR", "FR", "French", "fr-FR"),
    lang("EL", "EL", "Greek", "el-GR"),
    lang("HU", "HU", "Hungarian", "hu-HU"),
    lang("ID", "ID", "Indonesian", "id-ID"),
    lang("IT", "IT", "Italian", "it-IT"),
    lang("JA", "JA", "Japanese", "ja-JP"),
    lang("KO", "KO", "Korean", "ko-KR"),
    lang("NB", "NB", "Norwegian", "nb-NO"),
    lang("PL", "PL", "Polish", "pl-PL"),
    lang("PT-PT", "PT", "Portuguese", "pt-PT"),
    lang("PT-BR", "PT", "Portuguese (Brazil)", "pt-BR"),
    lang("RO", "RO", "Romanian", "ro-RO"),
    lang("SV", "SV", "Swedish", "sv-SE"),
    lang("TR", "TR", "Turkish", "tr-TR"),
    lang("UK", "UK", "Ukrainian", "uk-UA"),
];

pub const COMMON_PHRASES: [&str; 6] = [
    "Hello",
    "Thank you",
    "How are you?",
    "Goodbye",
    "I love you",
    "Where is the bathroom?",
];

/// Look up a catalog entry by its exact code
pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// Case-insensitive lookup for user-typed codes
pub fn find_loose(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

pub fn is_known(code: &str) -> bool {
    find(code).is_some()
}

/// API source identifier for a catalog code
pub fn api_source_code(code: &str) -> &'static str {
    find(code).map_or(DEFAULT_SOURCE, |l| l.source_code)
}

pub fn display_name(code: &str) -> String {
    find(code).map_or_else(|| code.to_string(), |l| l.name.to_string())
}

impl Language {
    pub fn option(&self) -> LanguageOption {
        LanguageOption {
            code: self.code.to_string(),
            name: self.name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = LANGUAGES.iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), LANGUAGES.len());
    }

    #[test]
    fn regional_variants_share_a_source_code() {
        assert_eq!(api_source_code("EN-US"), "EN");
        assert_eq!(api_source_code("PT-BR"), "PT");
        assert_eq!(api_source_code("PT-PT"), "PT");
        assert_eq!(api_source_code("ZH-HANS"), "ZH");
        assert_eq!(api_source_code("DE"), "DE");
    }

    #[test]
    fn unknown_source_falls_back_to_english() {
        assert_eq!(api_source_code("XX"), "EN");
    }

    #[test]
    fn loose_lookup_ignores_case_and_padding() {
        assert_eq!(find_loose(" pt-br ").map(|l| l.code), Some("PT-BR"));
        assert!(find("pt-br").is_none());
    }

    #[test]
    fn defaults_are_in_the_catalog() {
        assert!(is_known(DEFAULT_SOURCE));
        assert!(DEFAULT_TARGETS.iter().all(|c| is_known(c)));
    }
}

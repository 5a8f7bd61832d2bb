/// The most recent translation, candidate for saving to favorites.
/// Blank fields mean there is no active translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationState {
    pub original: String,
    pub translated: String,
    pub language: String,
    pub flag: String,
}

impl TranslationState {
    pub fn new(original: &str, translated: &str, language: &str, flag: &str) -> Self {
        Self {
            original: original.to_string(),
            translated: translated.to_string(),
            language: language.to_string(),
            flag: flag.to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.original.trim().is_empty() && !self.translated.trim().is_empty()
    }
}

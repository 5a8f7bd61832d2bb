use crate::favorites::FavoriteEntry;
use crate::languages::{Background, Language, LANGUAGES, NEUTRAL_BACKGROUND};
use crate::notification::{Notice, Phase};
use colored::{Color, Colorize};

pub const OUTPUT_PLACEHOLDER: &str = "Translation";
pub const TRANSLATION_ERROR: &str = "Translation error";
pub const EMPTY_FAVORITES: &str = "No saved favorites";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageButton {
    pub code: &'static str,
    pub label: &'static str,
    pub style_class: &'static str,
    pub background: Background,
}

impl From<&Language> for LanguageButton {
    fn from(lang: &Language) -> Self {
        Self {
            code: lang.code,
            label: lang.flag,
            style_class: lang.style_class,
            background: lang.background,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRow {
    pub flag: String,
    pub text: String,
    pub delete_id: u64,
}

/// Everything the user sees; front ends paint it
#[derive(Debug, Clone)]
pub struct Page {
    pub input: String,
    pub output: String,
    pub flag: String,
    pub background: Background,
    pub language_buttons: Vec<LanguageButton>,
    pub favorites: Vec<FavoriteRow>,
    alerts: Vec<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: OUTPUT_PLACEHOLDER.to_string(),
            flag: String::new(),
            background: NEUTRAL_BACKGROUND,
            language_buttons: Vec::new(),
            favorites: Vec::new(),
            alerts: Vec::new(),
        }
    }
}

impl Page {
    pub fn render_language_buttons(&mut self) {
        self.language_buttons = LANGUAGES.iter().map(LanguageButton::from).collect();
    }

    /// Replace the favorites region wholesale
    pub fn render_favorites(&mut self, entries: &[FavoriteEntry]) {
        self.favorites = entries
            .iter()
            .map(|fav| FavoriteRow {
                flag: fav.flag.clone(),
                text: format!("{} → {}", fav.original, fav.translated),
                delete_id: fav.id,
            })
            .collect();
    }

    /// Blocking alert; the front end must show it before anything else
    pub fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Language selector line: "[1 🇬🇧 en] [2 🇫🇷 fr] ..."
    pub fn paint_buttons(&self) -> String {
        self.language_buttons
            .iter()
            .enumerate()
            .map(|(i, button)| {
                format!("[{} {} {}]", i + 1, button.label, button.code)
                    .on_color(button.background.color())
                    .color(Color::Black)
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Translation area painted on the current page background
    pub fn paint_translation(&self) -> String {
        let line = if self.flag.is_empty() {
            format!(" {} ", self.output)
        } else {
            format!(" {} {} ", self.flag, self.output)
        };
        line.on_color(self.background.color())
            .color(Color::Black)
            .to_string()
    }

    pub fn paint_favorites(&self) -> String {
        if self.favorites.is_empty() {
            return EMPTY_FAVORITES.dimmed().to_string();
        }
        self.favorites
            .iter()
            .map(|row| format!("{} {} {}", row.flag, row.text, format!("[{}]", row.delete_id).dimmed()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Paint one notice; `offer_action` is false where nothing can invoke the action afterwards
pub fn paint_notice(notice: &Notice, offer_action: bool) -> String {
    let text = match &notice.action {
        Some(action) if offer_action => {
            format!("» {}  ({}: /undo)", notice.message, action.label)
        }
        _ => format!("» {}", notice.message),
    };
    match notice.phase {
        Phase::Hidden => text.dimmed().to_string(),
        _ => text.bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{ActionKind, NoticeAction, Notifier};
    use std::time::Instant;

    #[test]
    fn test_paint_notice_action_hint() {
        let mut notifier = Notifier::default();
        notifier.show(
            "Favorites cleared",
            Some(NoticeAction {
                label: "Undo".to_string(),
                kind: ActionKind::RestoreFavorites(Vec::new()),
            }),
            Instant::now(),
        );
        let notice = &notifier.notices()[0];

        let offered = paint_notice(notice, true);
        assert!(offered.contains("Favorites cleared"));
        assert!(offered.contains("Undo: /undo"));

        let plain = paint_notice(notice, false);
        assert!(plain.contains("Favorites cleared"));
        assert!(!plain.contains("/undo"));
    }

    #[test]
    fn test_default_page() {
        let page = Page::default();
        assert_eq!(page.output, OUTPUT_PLACEHOLDER);
        assert_eq!(page.background, NEUTRAL_BACKGROUND);
        assert!(page.flag.is_empty());
    }

    #[test]
    fn test_render_buttons_one_per_language() {
        let mut page = Page::default();
        page.render_language_buttons();
        assert_eq!(page.language_buttons.len(), 4);
        assert_eq!(page.language_buttons[2].code, "es");
        assert_eq!(page.language_buttons[2].style_class, "spanish");
    }

    #[test]
    fn test_render_favorites_replaces_region() {
        let mut page = Page::default();
        let entry = FavoriteEntry {
            id: 17,
            original: "casa".to_string(),
            translated: "house".to_string(),
            language: "en".to_string(),
            flag: "🇬🇧".to_string(),
        };
        page.render_favorites(&[entry.clone(), entry]);
        assert_eq!(page.favorites.len(), 2);
        assert_eq!(page.favorites[0].text, "casa → house");
        assert_eq!(page.favorites[0].delete_id, 17);

        page.render_favorites(&[]);
        assert!(page.favorites.is_empty());
        assert!(page.paint_favorites().contains(EMPTY_FAVORITES));
    }

    #[test]
    fn test_alerts_are_drained() {
        let mut page = Page::default();
        page.alert("first");
        assert_eq!(page.take_alerts(), vec!["first".to_string()]);
        assert!(page.take_alerts().is_empty());
    }
}

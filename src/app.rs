use crate::config::Config;
use crate::error::{StoreError, TranslateError};
use crate::favorites::{FavoriteEntry, FavoritesRepository, JsonFileStore};
use crate::languages::{self, Language, NEUTRAL_BACKGROUND, SOURCE_LANGUAGE};
use crate::notification::{ActionKind, NoticeAction, Notifier};
use crate::page::{Page, OUTPUT_PLACEHOLDER, TRANSLATION_ERROR};
use crate::providers::{self, TranslationProvider};
use crate::state::TranslationState;
use crate::words;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

pub const ALERT_EMPTY_INPUT: &str = "Enter some text to translate!";
pub const NOTICE_NOTHING_TO_SAVE: &str = "No translation to save!";
pub const NOTICE_SAVED: &str = "Saved to favorites";
pub const NOTICE_NOTHING_TO_CLEAR: &str = "No favorites to clear";
pub const NOTICE_CLEARED: &str = "Favorites cleared";
pub const NOTICE_REMOVED: &str = "Favorite removed";
pub const NOTICE_RESTORED: &str = "Favorites restored";
pub const NOTICE_NOTHING_TO_UNDO: &str = "Nothing to undo";
pub const UNDO_LABEL: &str = "Undo";

/// Issued when a translation starts; only the latest ticket may update the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationTicket {
    generation: u64,
    language: &'static Language,
}

/// Owns the session translation, the page and every collaborator
pub struct App {
    provider: Box<dyn TranslationProvider>,
    store: Box<dyn FavoritesRepository>,
    notifier: Notifier,
    page: Page,
    session: TranslationState,
    generation: u64,
    rng: StdRng,
}

impl App {
    pub fn new(
        provider: Box<dyn TranslationProvider>,
        store: Box<dyn FavoritesRepository>,
        notifier: Notifier,
    ) -> Self {
        Self::with_rng(provider, store, notifier, StdRng::from_entropy())
    }

    /// Wire the configured provider, the favorites file and notice timings
    pub fn from_config(config: &Config) -> Result<Self, TranslateError> {
        let provider = providers::create_provider(config)?;
        let store = JsonFileStore::open(&config.favorites_file);
        tracing::debug!(path = %store.path().display(), provider = provider.name(), "favorites store opened");
        let notifier = Notifier::new(config.notice_display(), config.notice_exit());
        Ok(Self::new(provider, Box::new(store), notifier))
    }

    /// Swap in collaborators built from a reloaded config; page and session stay as they are
    pub fn apply_config(&mut self, config: &Config) -> Result<(), TranslateError> {
        self.provider = providers::create_provider(config)?;
        self.store = Box::new(JsonFileStore::open(&config.favorites_file));
        self.notifier
            .set_timings(config.notice_display(), config.notice_exit());
        self.refresh_favorites();
        tracing::info!(favorites = %config.favorites_file, provider = self.provider.name(), "configuration applied");
        Ok(())
    }

    pub fn with_rng(
        provider: Box<dyn TranslationProvider>,
        store: Box<dyn FavoritesRepository>,
        notifier: Notifier,
        rng: StdRng,
    ) -> Self {
        let mut app = Self {
            provider,
            store,
            notifier,
            page: Page::default(),
            session: TranslationState::default(),
            generation: 0,
            rng,
        };
        app.page.render_language_buttons();
        app.refresh_favorites();
        app
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn session(&self) -> &TranslationState {
        &self.session
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        self.store.list()
    }

    pub fn set_input(&mut self, text: &str) {
        self.page.input = text.to_string();
    }

    pub fn tick(&mut self, now: Instant) {
        self.notifier.tick(now);
    }

    pub fn reset(&mut self) {
        self.page.input.clear();
        self.page.output = OUTPUT_PLACEHOLDER.to_string();
        self.page.flag.clear();
        self.page.background = NEUTRAL_BACKGROUND;
        self.session = TranslationState::default();
        // Responses still in flight belong to the old page
        self.generation += 1;
    }

    /// Language button click: translate the current input into `code`
    pub async fn press_language(&mut self, code: &str) -> bool {
        let Some(language) = languages::resolve(code) else {
            tracing::warn!(code, "no language button for code");
            return false;
        };

        let text = self.page.input.trim().to_string();
        if text.is_empty() {
            self.page.alert(ALERT_EMPTY_INPUT);
            return false;
        }

        self.translate(&text, language).await
    }

    /// Fill the input with a random word without translating it
    pub fn random_word(&mut self) -> &'static str {
        let word = words::random_word(&mut self.rng);
        self.page.input = word.to_string();
        word
    }

    /// Random word into a random language, translated right away
    pub async fn random_translation(&mut self) -> bool {
        let word = words::random_word(&mut self.rng);
        let language = languages::random_language(&mut self.rng);
        self.page.input = word.to_string();
        self.translate(word, language).await
    }

    pub async fn translate(&mut self, text: &str, language: &'static Language) -> bool {
        let ticket = self.begin_translation(language);
        let result = self
            .provider
            .translate_text(text, SOURCE_LANGUAGE, language.code)
            .await;
        self.finish_translation(ticket, text, result)
    }

    /// Switch the background and issue a ticket for the request about to start
    pub fn begin_translation(&mut self, language: &'static Language) -> TranslationTicket {
        self.generation += 1;
        self.page.background = language.background;
        TranslationTicket {
            generation: self.generation,
            language,
        }
    }

    /// Apply a finished request. Returns true when the page now shows a fresh translation.
    pub fn finish_translation(
        &mut self,
        ticket: TranslationTicket,
        text: &str,
        result: Result<String, TranslateError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale translation response"
            );
            return false;
        }

        match result {
            Ok(translated) => {
                tracing::info!(original = text, translated = %translated, to = ticket.language.code, "translated");
                self.page.output = translated.clone();
                self.page.flag = ticket.language.flag.to_string();
                self.session =
                    TranslationState::new(text, &translated, ticket.language.code, ticket.language.flag);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, original = text, to = ticket.language.code, "translation failed");
                self.page.output = TRANSLATION_ERROR.to_string();
                false
            }
        }
    }

    pub fn save(&mut self, now: Instant) -> Option<FavoriteEntry> {
        match self.store.add(&self.session) {
            Ok(entry) => {
                self.refresh_favorites();
                self.notifier.show(NOTICE_SAVED, None, now);
                Some(entry)
            }
            Err(StoreError::NothingToSave) => {
                self.notifier.show(NOTICE_NOTHING_TO_SAVE, None, now);
                None
            }
            Err(e) => {
                self.report_store_error(&e, now);
                None
            }
        }
    }

    pub fn delete(&mut self, id: u64, now: Instant) -> Option<FavoriteEntry> {
        let removed = match self.store.remove_one(id) {
            Ok(removed) => removed,
            Err(e) => {
                self.report_store_error(&e, now);
                None
            }
        };
        self.refresh_favorites();

        if let Some(entry) = &removed {
            self.notifier.show(NOTICE_REMOVED, Some(undo(vec![entry.clone()])), now);
        }
        removed
    }

    pub fn clear_all(&mut self, now: Instant) -> usize {
        let removed = match self.store.remove_all() {
            Ok(removed) => removed,
            Err(e) => {
                self.report_store_error(&e, now);
                return 0;
            }
        };

        if removed.is_empty() {
            self.notifier.show(NOTICE_NOTHING_TO_CLEAR, None, now);
            return 0;
        }

        let count = removed.len();
        self.refresh_favorites();
        self.notifier.show(NOTICE_CLEARED, Some(undo(removed)), now);
        count
    }

    /// Invoke the action of the newest notice that still offers one
    pub fn undo(&mut self, now: Instant) -> bool {
        let Some(kind) = self
            .notifier
            .latest_actionable()
            .and_then(|id| self.notifier.invoke(id))
        else {
            self.notifier.show(NOTICE_NOTHING_TO_UNDO, None, now);
            return false;
        };

        match kind {
            ActionKind::RestoreFavorites(entries) => match self.store.restore(entries) {
                Ok(()) => {
                    self.refresh_favorites();
                    self.notifier.show(NOTICE_RESTORED, None, now);
                    true
                }
                Err(e) => {
                    self.report_store_error(&e, now);
                    false
                }
            },
        }
    }

    fn refresh_favorites(&mut self) {
        let entries = self.store.list();
        self.page.render_favorites(&entries);
    }

    fn report_store_error(&mut self, error: &StoreError, now: Instant) {
        tracing::error!(error = %error, "favorites storage failed");
        self.notifier.show(&format!("Favorites error: {}", error), None, now);
    }
}

fn undo(entries: Vec<FavoriteEntry>) -> NoticeAction {
    NoticeAction {
        label: UNDO_LABEL.to_string(),
        kind: ActionKind::RestoreFavorites(entries),
    }
}

// interactive.rs
use crate::app::App;
use crate::config::ConfigManager;
use crate::languages;
use crate::page::paint_notice;
use colored::Colorize;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    /// Plain text goes into the input field
    Text(String),
    Translate(String),
    RandomWord,
    RandomTranslation,
    Save,
    Favorites,
    Delete(u64),
    Clear,
    Undo,
    Reset,
    Config,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }
        let Some(command) = line.strip_prefix('/') else {
            return Input::Text(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        match name.as_str() {
            "word" | "w" => Input::RandomWord,
            "random" | "r" => Input::RandomTranslation,
            "save" => Input::Save,
            "fav" | "favorites" | "f" => Input::Favorites,
            "del" | "delete" => match parts.next().and_then(|id| id.parse::<u64>().ok()) {
                Some(id) => Input::Delete(id),
                None => Input::Unknown(line.to_string()),
            },
            "clear" => Input::Clear,
            "undo" | "u" => Input::Undo,
            "reset" => Input::Reset,
            "config" | "c" => Input::Config,
            "help" | "h" | "?" => Input::Help,
            "q" | "quit" | "exit" => Input::Quit,
            other if languages::resolve(other).is_some() => Input::Translate(other.to_string()),
            _ => Input::Unknown(line.to_string()),
        }
    }
}

pub struct InteractiveMode {
    app: App,
    config_manager: Arc<ConfigManager>,
    printed_notices: Vec<u64>,
}

impl InteractiveMode {
    pub fn new(config_manager: Arc<ConfigManager>) -> Result<Self, Box<dyn Error>> {
        let app = App::from_config(&config_manager.get_config())?;

        Ok(Self {
            app,
            config_manager,
            printed_notices: Vec::new(),
        })
    }

    /// Start the interactive loop; returns when the user quits or stdin closes
    pub async fn start(&mut self) -> Result<(), Box<dyn Error>> {
        println!("=== Parola v{} ({}) ===", env!("CARGO_PKG_VERSION"), self.app.provider_name());
        println!("Type an Italian word, then pick a language. '/help' lists commands.");
        println!();
        println!("{}", self.app.page().paint_buttons());
        println!();

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            self.app.tick(Instant::now());
            self.print_notices();

            self.reload_config();
            self.print_prompt()?;

            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    println!("Input error: {}", e);
                    continue;
                }
                None => break,
            };

            if !self.handle(Input::parse(&line)).await {
                println!("Arrivederci!");
                break;
            }
        }

        Ok(())
    }

    /// Pick up config file edits; the page and session survive the swap
    fn reload_config(&mut self) -> bool {
        match self.config_manager.check_and_reload() {
            Ok(true) => {
                let config = self.config_manager.get_config();
                match self.app.apply_config(&config) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(error = %e, "reloaded config not applied");
                        false
                    }
                }
            }
            Ok(false) => false,
            Err(e) => {
                tracing::warn!(error = %e, "config reload failed");
                false
            }
        }
    }

    /// Apply one input; false means quit
    async fn handle(&mut self, input: Input) -> bool {
        let now = Instant::now();
        self.app.tick(now);

        match input {
            Input::Empty => {}
            Input::Text(text) => self.app.set_input(&text),
            Input::Translate(code) => {
                self.app.press_language(&code).await;
                self.print_translation();
            }
            Input::RandomWord => {
                let word = self.app.random_word();
                println!("{}", word);
            }
            Input::RandomTranslation => {
                self.app.random_translation().await;
                println!("{}", self.app.page().input);
                self.print_translation();
            }
            Input::Save => {
                self.app.save(now);
            }
            Input::Favorites => println!("{}", self.app.page().paint_favorites()),
            Input::Delete(id) => {
                self.app.delete(id, now);
                println!("{}", self.app.page().paint_favorites());
            }
            Input::Clear => {
                self.app.clear_all(now);
            }
            Input::Undo => {
                if self.app.undo(now) {
                    println!("{}", self.app.page().paint_favorites());
                }
            }
            Input::Reset => {
                self.app.reset();
                self.print_translation();
            }
            Input::Config => {
                // display_config reloads too; apply the edit before it swallows the change
                self.reload_config();
                if let Err(e) = self.config_manager.display_config() {
                    println!("Config error: {}", e);
                }
            }
            Input::Help => ConfigManager::display_help(),
            Input::Quit => return false,
            Input::Unknown(line) => println!("Unknown command: {} (try /help)", line),
        }

        // Entering notices become visible right after the action
        self.app.tick(Instant::now());
        self.print_notices();
        true
    }

    fn print_prompt(&self) -> io::Result<()> {
        let page = self.app.page();
        let prompt = if page.input.is_empty() {
            "[it]: ".to_string()
        } else {
            format!("[it: {}]: ", page.input)
        };
        let config = self.config_manager.get_config();
        match ConfigManager::parse_color(&config.prompt_color) {
            Some(color) => print!("{}", prompt.color(color)),
            None => print!("{}", prompt),
        }
        io::stdout().flush()
    }

    fn print_translation(&mut self) {
        // Alerts block: they come before the result
        for alert in self.app.page_mut().take_alerts() {
            println!("{}", format!("! {}", alert).red().bold());
        }
        println!("{}", self.app.page().paint_translation());
    }

    fn print_notices(&mut self) {
        let live: Vec<u64> = self.app.notifier().notices().iter().map(|n| n.id).collect();
        self.printed_notices.retain(|id| live.contains(id));

        for notice in self.app.notifier().visible() {
            if !self.printed_notices.contains(&notice.id) {
                println!("{}", paint_notice(notice, true));
                self.printed_notices.push(notice.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_config(path: &std::path::Path, favorites: &std::path::Path, display_millis: u64) {
        let content = format!(
            "[Favorites]\nFavoritesFile = {}\n[Notifications]\nDisplayMillis = {}\nExitMillis = 20\n",
            favorites.display(),
            display_millis
        );
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_reload_applies_new_notice_timing() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("parola.conf");
        let favorites = dir.path().join("favorites.json");
        write_config(&config_path, &favorites, 4000);

        let manager = Arc::new(ConfigManager::new(config_path.to_str().unwrap()).unwrap());
        let mut mode = InteractiveMode::new(manager.clone()).unwrap();
        mode.app.set_input("casa");
        assert!(!mode.reload_config());

        write_config(&config_path, &favorites, 100);
        manager.forget_modified_time();
        assert!(mode.reload_config());
        assert_eq!(mode.app.page().input, "casa");

        let start = Instant::now();
        mode.app.clear_all(start);
        assert_eq!(mode.app.notifier().notices().len(), 1);
        mode.app.tick(start + Duration::from_millis(500));
        assert!(mode.app.notifier().notices().is_empty());
    }

    #[test]
    fn test_plain_text_fills_input() {
        assert_eq!(Input::parse("  casa "), Input::Text("casa".to_string()));
        assert_eq!(Input::parse("   "), Input::Empty);
    }

    #[test]
    fn test_language_commands() {
        assert_eq!(Input::parse("/en"), Input::Translate("en".to_string()));
        assert_eq!(Input::parse("/3"), Input::Translate("3".to_string()));
        assert_eq!(Input::parse("/DE"), Input::Translate("de".to_string()));
        assert_eq!(Input::parse("/it"), Input::Unknown("/it".to_string()));
    }

    #[test]
    fn test_favorites_commands() {
        assert_eq!(Input::parse("/del 1700000000000"), Input::Delete(1_700_000_000_000));
        assert_eq!(Input::parse("/del"), Input::Unknown("/del".to_string()));
        assert_eq!(Input::parse("/undo"), Input::Undo);
        assert_eq!(Input::parse("/clear"), Input::Clear);
        assert_eq!(Input::parse("/q"), Input::Quit);
    }
}

use crate::app::App;
use crate::config::ConfigManager;
use crate::languages::{self, LANGUAGES};
use crate::page::paint_notice;
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

/// One-shot command parsed from the program arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    ShowConfig,
    Languages,
    Favorites,
    Random,
    ClearFavorites,
    Delete(u64),
    Translate {
        text: String,
        target: Option<String>,
        save: bool,
    },
}

impl Command {
    /// Parse `args` without the program name
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let Some(first) = args.first() else {
            return Err("No arguments provided".to_string());
        };

        match first.as_str() {
            "-h" | "--help" => Ok(Command::Help),
            "-v" | "--version" => Ok(Command::Version),
            "-c" | "--config" => Ok(Command::ShowConfig),
            "-l" | "--languages" => Ok(Command::Languages),
            "-f" | "--favorites" => Ok(Command::Favorites),
            "-r" | "--random" => Ok(Command::Random),
            "--clear-favorites" => Ok(Command::ClearFavorites),
            "-d" | "--delete" => {
                let id = args
                    .get(1)
                    .ok_or("No favorite id provided")?
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid favorite id: {}", args[1]))?;
                Ok(Command::Delete(id))
            }
            _ => Self::parse_translate(args),
        }
    }

    fn parse_translate(args: &[String]) -> Result<Self, String> {
        let mut target = None;
        let mut save = false;
        let mut words = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-t" | "--to" => {
                    let code = iter.next().ok_or("No target language provided")?;
                    if languages::resolve(code).is_none() {
                        return Err(format!("Unsupported target language: {}", code));
                    }
                    target = Some(code.to_lowercase());
                }
                "--save" => save = true,
                _ => words.push(arg.as_str()),
            }
        }

        let text = words.join(" ");
        if text.trim().is_empty() {
            return Err("Empty text provided".to_string());
        }

        Ok(Command::Translate { text, target, save })
    }
}

pub struct CliHandler {
    app: App,
    config_manager: Arc<ConfigManager>,
}

impl CliHandler {
    pub fn new(config_manager: Arc<ConfigManager>) -> Result<Self, Box<dyn Error>> {
        let app = App::from_config(&config_manager.get_config())?;

        Ok(Self {
            app,
            config_manager,
        })
    }

    /// Show version information
    pub fn show_version() {
        println!("Parola v{}", env!("CARGO_PKG_VERSION"));
        println!("Italian word translator with favorites");
        println!();
    }

    pub fn show_languages() {
        for (i, lang) in LANGUAGES.iter().enumerate() {
            println!(
                "{}. {} {} ({})",
                i + 1,
                lang.flag,
                lang.code,
                lang.background.name
            );
        }
    }

    /// Process CLI arguments (program name included) and run the command
    pub async fn process_args(&mut self, args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let command = match Command::parse(args.get(1..).unwrap_or_default()) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!("Use --help for usage information");
                return Ok(());
            }
        };

        match command {
            Command::Help => ConfigManager::display_help(),
            Command::Version => Self::show_version(),
            Command::ShowConfig => self.config_manager.display_config()?,
            Command::Languages => Self::show_languages(),
            Command::Favorites => self.show_favorites(),
            Command::Random => {
                self.app.random_translation().await;
                self.print_translation();
            }
            Command::ClearFavorites => {
                self.app.clear_all(Instant::now());
            }
            Command::Delete(id) => {
                if self.app.delete(id, Instant::now()).is_none() {
                    println!("No favorite with id {}", id);
                }
            }
            Command::Translate { text, target, save } => {
                let target = target.unwrap_or_else(|| self.config_manager.get_config().default_target);
                self.app.set_input(&text);
                let translated = self.app.press_language(&target).await;
                self.print_translation();
                if translated && save {
                    self.app.save(Instant::now());
                }
            }
        }

        self.print_notices();
        Ok(())
    }

    fn print_translation(&mut self) {
        for alert in self.app.page_mut().take_alerts() {
            eprintln!("{}", alert);
        }
        let page = self.app.page();
        if page.flag.is_empty() {
            println!("{}", page.output);
        } else {
            println!("{} {}", page.flag, page.output);
        }
    }

    fn show_favorites(&self) {
        println!("{}", self.app.page().paint_favorites());
        println!("{} favorite(s)", self.app.favorites().len());
    }

    /// Notices as printed on exit; the process ends, so no action is offered
    fn notice_lines(&self) -> Vec<String> {
        self.app
            .notifier()
            .notices()
            .iter()
            .map(|notice| paint_notice(notice, false))
            .collect()
    }

    fn print_notices(&self) {
        for line in self.notice_lines() {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::{FavoritesRepository, JsonFileStore};
    use crate::state::TranslationState;
    use std::fs;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn handler_with_favorites(dir: &TempDir) -> (CliHandler, u64) {
        let favorites = dir.path().join("favorites.json");
        let config_path = dir.path().join("parola.conf");
        fs::write(
            &config_path,
            format!("[Favorites]\nFavoritesFile = {}\n", favorites.display()),
        )
        .unwrap();

        let entry = JsonFileStore::open(&favorites)
            .add(&TranslationState::new("casa", "house", "en", "🇬🇧"))
            .unwrap();
        let manager = Arc::new(ConfigManager::new(config_path.to_str().unwrap()).unwrap());
        (CliHandler::new(manager).unwrap(), entry.id)
    }

    #[tokio::test]
    async fn test_clear_favorites_prints_no_undo_hint() {
        let dir = TempDir::new().unwrap();
        let (mut handler, _) = handler_with_favorites(&dir);

        handler
            .process_args(args(&["parola", "--clear-favorites"]))
            .await
            .unwrap();

        assert!(handler.app.favorites().is_empty());
        let lines = handler.notice_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Favorites cleared"));
        assert!(!lines[0].contains("Undo"));
        assert!(!lines[0].contains("/undo"));
    }

    #[tokio::test]
    async fn test_delete_prints_no_undo_hint() {
        let dir = TempDir::new().unwrap();
        let (mut handler, id) = handler_with_favorites(&dir);

        handler
            .process_args(args(&["parola", "--delete", &id.to_string()]))
            .await
            .unwrap();

        let lines = handler.notice_lines();
        assert!(lines.iter().any(|line| line.contains("Favorite removed")));
        assert!(lines.iter().all(|line| !line.contains("/undo")));
    }

    #[test]
    fn test_parse_flags() {
        assert_eq!(Command::parse(&args(&["--help"])), Ok(Command::Help));
        assert_eq!(Command::parse(&args(&["-f"])), Ok(Command::Favorites));
        assert_eq!(Command::parse(&args(&["-d", "42"])), Ok(Command::Delete(42)));
        assert!(Command::parse(&args(&["-d", "x"])).is_err());
        assert!(Command::parse(&args(&[])).is_err());
    }

    #[test]
    fn test_parse_translate() {
        assert_eq!(
            Command::parse(&args(&["buona", "notte"])),
            Ok(Command::Translate {
                text: "buona notte".to_string(),
                target: None,
                save: false,
            })
        );
        assert_eq!(
            Command::parse(&args(&["-t", "FR", "--save", "sole"])),
            Ok(Command::Translate {
                text: "sole".to_string(),
                target: Some("fr".to_string()),
                save: true,
            })
        );
    }

    #[test]
    fn test_parse_translate_errors() {
        assert!(Command::parse(&args(&["-t", "it", "casa"])).is_err());
        assert!(Command::parse(&args(&["-t"])).is_err());
        assert!(Command::parse(&args(&["--save"])).is_err());
    }
}

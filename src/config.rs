use crate::languages::{self, LANGUAGES};
use crate::providers::mymemory::DEFAULT_API_URL;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone)]
pub struct Config {
    pub translate_provider: String,
    pub api_url: String,
    pub contact_email: String,        // Sent as "de=" for a higher MyMemory quota
    pub request_timeout_seconds: u64, // 0 = no timeout
    pub default_target: String,       // Target code for CLI translations without --to
    pub favorites_file: String,
    pub notice_display_millis: u64,
    pub notice_exit_millis: u64,
    pub prompt_color: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        // Keep favorites next to the config file when possible
        let default_favorites = if let Some(config_dir) = dirs::config_dir() {
            let favorites_path = config_dir.join("Parola").join("favorites.json");
            favorites_path.to_string_lossy().to_string()
        } else {
            "favorites.json".to_string()
        };

        Self {
            translate_provider: "mymemory".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            contact_email: String::new(),
            request_timeout_seconds: 0,
            default_target: "en".to_string(),
            favorites_file: default_favorites,
            notice_display_millis: 4000,
            notice_exit_millis: 300,
            prompt_color: "BrightYellow".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn notice_display(&self) -> Duration {
        Duration::from_millis(self.notice_display_millis)
    }

    pub fn notice_exit(&self) -> Duration {
        Duration::from_millis(self.notice_exit_millis)
    }
}

pub struct ConfigManager {
    config_path: String,
    config: Arc<Mutex<Config>>,
    last_modified: Arc<Mutex<Option<SystemTime>>>,
}

type IniSections = HashMap<String, HashMap<String, String>>;

impl ConfigManager {
    /// Get default configuration file path in the user config directory
    pub fn get_default_config_path() -> Result<PathBuf, Box<dyn Error>> {
        let config_dir = dirs::config_dir()
            .ok_or("Failed to get config directory")?
            .join("Parola");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        Ok(config_dir.join("parola.conf"))
    }

    pub fn new(config_path: &str) -> Result<Self, Box<dyn Error>> {
        let manager = Self {
            config_path: config_path.to_string(),
            config: Arc::new(Mutex::new(Config::default())),
            last_modified: Arc::new(Mutex::new(None)),
        };

        manager.load_or_create_config()?;

        Ok(manager)
    }

    fn load_or_create_config(&self) -> Result<(), Box<dyn Error>> {
        if Path::new(&self.config_path).exists() {
            self.load_config()?;
        } else {
            self.create_default_config()?;
        }
        Ok(())
    }

    fn create_default_config(&self) -> Result<(), Box<dyn Error>> {
        let default_config = Config::default();
        let ini_content = Self::create_ini_content(&default_config);

        fs::write(&self.config_path, ini_content)?;
        tracing::info!(path = %self.config_path, "created default configuration file");

        self.update_last_modified_time()?;

        Ok(())
    }

    fn create_ini_content(config: &Config) -> String {
        format!(
            r#"; Parola Configuration File
; Translates Italian words into English, French, Spanish or German
;
; Configuration changes take effect immediately (no restart required)

[Provider]
; Translation service provider
; Supported values: mymemory
TranslateProvider = {}

; Endpoint of the MyMemory "get" API
ApiUrl = {}

; Optional e-mail sent with each request (raises the MyMemory daily quota)
ContactEmail = {}

; Request timeout in seconds, 0 = wait for the service as long as it takes
RequestTimeoutSeconds = {}

[Translation]
; Target language used by 'parola <text>' when --to is not given
; Supported values: {}
DefaultTarget = {}

[Favorites]
; JSON file holding saved translations
FavoritesFile = {}

[Notifications]
; How long a notice stays on screen, in milliseconds
DisplayMillis = {}

; Exit transition length before a hidden notice is removed, in milliseconds
ExitMillis = {}

[Colors]
; Color of the interactive prompt
; Supported values: Black, Red, Green, Yellow, Blue, Magenta, Cyan, White,
; BrightBlack, BrightRed, BrightGreen, BrightYellow, BrightBlue, BrightMagenta, BrightCyan, BrightWhite
; Use "None" to disable color
PromptColor = {}

[Logging]
; Diagnostic output on stderr: error, warn, info, debug, trace
; The PAROLA_LOG environment variable overrides this value
LogLevel = {}
"#,
            config.translate_provider,
            config.api_url,
            config.contact_email,
            config.request_timeout_seconds,
            LANGUAGES.iter().map(|l| l.code).collect::<Vec<_>>().join(", "),
            config.default_target,
            config.favorites_file,
            config.notice_display_millis,
            config.notice_exit_millis,
            config.prompt_color,
            config.log_level,
        )
    }

    fn load_config(&self) -> Result<(), Box<dyn Error>> {
        let content = fs::read_to_string(&self.config_path)?;
        let new_config = Self::config_from_ini(&content);

        if let Ok(mut config) = self.config.lock() {
            *config = new_config;
        }

        self.update_last_modified_time()?;

        Ok(())
    }

    /// Build a config from INI text, falling back to defaults for missing or invalid values
    fn config_from_ini(content: &str) -> Config {
        let parsed = Self::parse_ini(content);
        let defaults = Config::default();

        let get = |section: &str, key: &str| -> Option<String> {
            parsed
                .get(section)
                .and_then(|s| s.get(key))
                .cloned()
        };
        let get_u64 = |section: &str, key: &str, fallback: u64| -> u64 {
            get(section, key)
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(fallback)
        };

        let default_target = match get("Translation", "DefaultTarget") {
            Some(code) if languages::find(&code).is_some() => code.to_lowercase(),
            Some(code) => {
                tracing::warn!(code = %code, "unsupported DefaultTarget, using {}", defaults.default_target);
                defaults.default_target.clone()
            }
            None => defaults.default_target.clone(),
        };

        Config {
            translate_provider: get("Provider", "TranslateProvider")
                .unwrap_or(defaults.translate_provider),
            api_url: get("Provider", "ApiUrl")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_url),
            contact_email: get("Provider", "ContactEmail").unwrap_or_default(),
            request_timeout_seconds: get_u64(
                "Provider",
                "RequestTimeoutSeconds",
                defaults.request_timeout_seconds,
            ),
            default_target,
            favorites_file: get("Favorites", "FavoritesFile")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.favorites_file),
            notice_display_millis: get_u64(
                "Notifications",
                "DisplayMillis",
                defaults.notice_display_millis,
            ),
            notice_exit_millis: get_u64("Notifications", "ExitMillis", defaults.notice_exit_millis),
            prompt_color: get("Colors", "PromptColor").unwrap_or(defaults.prompt_color),
            log_level: get("Logging", "LogLevel").unwrap_or(defaults.log_level),
        }
    }

    /// Parse INI format content
    fn parse_ini(content: &str) -> IniSections {
        let mut sections: IniSections = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section_name = line[1..line.len() - 1].to_string();
                current_section = Some(section_name.clone());
                sections.entry(section_name).or_default();
            } else if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim().to_string();
                let value = line[eq_pos + 1..].trim().to_string();

                if let Some(section) = current_section
                    .as_ref()
                    .and_then(|name| sections.get_mut(name))
                {
                    section.insert(key, value);
                }
            }
        }

        sections
    }

    /// Get current configuration
    pub fn get_config(&self) -> Config {
        match self.config.lock() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Display help information (shared by CLI and interactive modes)
    pub fn display_help() {
        println!();
        println!("=== Parola v{} ===", env!("CARGO_PKG_VERSION"));
        println!("Italian word translator");
        println!();
        println!("USAGE:");
        println!("  parola [OPTIONS] [text]");
        println!();
        println!("OPTIONS:");
        println!("  -h, --help               Show this help message");
        println!("  -v, --version            Show version information");
        println!("  -c, --config             Show current configuration");
        println!("  -l, --languages          List target languages");
        println!("  -t, --to <code> <text>   Translate text into the given language");
        println!("      --save               Save the translation to favorites");
        println!("  -r, --random             Translate a random word into a random language");
        println!("  -f, --favorites          List saved favorites");
        println!("  -d, --delete <id>        Delete one favorite");
        println!("      --clear-favorites    Delete all favorites");
        println!();
        println!("EXAMPLES:");
        println!("  parola                        Start interactive mode");
        println!("  parola casa                   Translate 'casa' into the default target");
        println!("  parola -t fr --save sole      Translate into French and save");
        println!();
        println!("INTERACTIVE MODE:");
        println!("  Type a word and press Enter to put it in the input field.");
        println!("  /en /fr /es /de (or /1../4)  - Translate the input");
        println!("  /word                        - Random word into the input");
        println!("  /random                      - Random word into a random language");
        println!("  /save                        - Save current translation");
        println!("  /fav                         - Show favorites");
        println!("  /del <id>                    - Delete a favorite");
        println!("  /clear                       - Delete all favorites");
        println!("  /undo                        - Undo the last delete or clear");
        println!("  /reset                       - Reset input, output and colors");
        println!("  /config, /help, /q           - Settings, this help, exit");
        println!();
        if let Ok(config_path) = ConfigManager::get_default_config_path() {
            println!("Config file: {}", config_path.display());
        }
        println!();
    }

    /// Display current configuration
    pub fn display_config(&self) -> Result<(), Box<dyn Error>> {
        self.check_and_reload()?;
        let config = self.get_config();

        println!();
        println!("=== Current Configuration ===");
        println!("Translation Provider: {}", config.translate_provider);
        println!("API URL: {}", config.api_url);
        println!(
            "Contact E-mail: {}",
            if config.contact_email.is_empty() {
                "Not set"
            } else {
                config.contact_email.as_str()
            }
        );
        println!(
            "Request Timeout: {}",
            if config.request_timeout_seconds == 0 {
                "Disabled".to_string()
            } else {
                format!("{} seconds", config.request_timeout_seconds)
            }
        );
        println!();
        println!("Source Language: {}", languages::SOURCE_LANGUAGE);
        println!("Default Target: {}", config.default_target);
        println!("Favorites File: {}", config.favorites_file);
        println!(
            "Notices: {} ms on screen, {} ms exit",
            config.notice_display_millis, config.notice_exit_millis
        );
        println!("Prompt Color: {}", config.prompt_color);
        println!("Log Level: {}", config.log_level);
        println!();
        println!("Config file: {}", self.config_path);
        println!("============================");
        println!();

        Ok(())
    }

    /// Check if config file was modified and reload if necessary
    pub fn check_and_reload(&self) -> Result<bool, Box<dyn Error>> {
        if !Path::new(&self.config_path).exists() {
            return Ok(false);
        }

        let metadata = fs::metadata(&self.config_path)?;
        let current_modified = metadata.modified()?;

        let should_reload = match self.last_modified.lock() {
            Ok(last_modified) => match *last_modified {
                Some(last) => current_modified > last,
                None => true,
            },
            Err(_) => true,
        };

        if should_reload {
            self.load_config()?;
            tracing::debug!(path = %self.config_path, "configuration reloaded");
            return Ok(true);
        }

        Ok(false)
    }

    /// Forget the recorded mtime so the next check reloads regardless of timestamp resolution
    #[cfg(test)]
    pub(crate) fn forget_modified_time(&self) {
        if let Ok(mut last_modified) = self.last_modified.lock() {
            *last_modified = None;
        }
    }

    fn update_last_modified_time(&self) -> Result<(), Box<dyn Error>> {
        if Path::new(&self.config_path).exists() {
            let metadata = fs::metadata(&self.config_path)?;
            let modified = metadata.modified()?;

            if let Ok(mut last_modified) = self.last_modified.lock() {
                *last_modified = Some(modified);
            }
        }
        Ok(())
    }

    /// Parse color name to colored::Color enum
    /// Returns None for "None" or empty string (no color)
    pub fn parse_color(color_name: &str) -> Option<colored::Color> {
        let color_lower = color_name.trim().to_lowercase();

        match color_lower.as_str() {
            "black" => Some(colored::Color::Black),
            "red" => Some(colored::Color::Red),
            "green" => Some(colored::Color::Green),
            "yellow" => Some(colored::Color::Yellow),
            "blue" => Some(colored::Color::Blue),
            "magenta" => Some(colored::Color::Magenta),
            "cyan" => Some(colored::Color::Cyan),
            "white" => Some(colored::Color::White),
            "brightblack" => Some(colored::Color::BrightBlack),
            "brightred" => Some(colored::Color::BrightRed),
            "brightgreen" => Some(colored::Color::BrightGreen),
            "brightyellow" => Some(colored::Color::BrightYellow),
            "brightblue" => Some(colored::Color::BrightBlue),
            "brightmagenta" => Some(colored::Color::BrightMagenta),
            "brightcyan" => Some(colored::Color::BrightCyan),
            "brightwhite" => Some(colored::Color::BrightWhite),
            _ => None,
        }
    }
}

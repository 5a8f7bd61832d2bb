use crate::config::Config;
use crate::error::TranslateError;
use async_trait::async_trait;

pub mod mymemory;

// Main translation provider trait
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate text from one language to another
    async fn translate_text(&self, text: &str, from: &str, to: &str)
        -> Result<String, TranslateError>;

    /// Get provider name for display purposes
    fn name(&self) -> &str;
}

/// Create translation provider based on configuration
pub fn create_provider(config: &Config) -> Result<Box<dyn TranslationProvider>, TranslateError> {
    match config.translate_provider.to_lowercase().as_str() {
        "mymemory" => Ok(Box::new(mymemory::MyMemoryProvider::from_config(config)?)),
        other => Err(TranslateError::Unsupported(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_known_provider() {
        let config = Config::default();
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "MyMemory");
    }

    #[test]
    fn test_create_unknown_provider() {
        let config = Config {
            translate_provider: "babelfish".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(TranslateError::Unsupported(name)) if name == "babelfish"
        ));
    }
}

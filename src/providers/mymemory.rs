use super::TranslationProvider;
use crate::config::Config;
use crate::error::TranslateError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<ResponseData>,
    // Usually a number, but the service sends strings like "403" on errors
    response_status: Option<Value>,
    response_details: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

pub struct MyMemoryProvider {
    client: Client,
    api_url: String,
    contact_email: Option<String>,
}

impl MyMemoryProvider {
    pub fn new(api_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.to_string(),
            contact_email: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, TranslateError> {
        let mut builder = Client::builder().user_agent(concat!("parola/", env!("CARGO_PKG_VERSION")));
        if config.request_timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_seconds));
        }

        let contact_email = Some(config.contact_email.trim())
            .filter(|email| !email.is_empty())
            .map(str::to_string);

        Ok(Self {
            client: builder.build()?,
            api_url: config.api_url.clone(),
            contact_email,
        })
    }

    /// Build the request URL; the text is percent-encoded by the query serializer
    fn request_url(&self, text: &str, from: &str, to: &str) -> Result<Url, TranslateError> {
        let langpair = format!("{}|{}", from, to);
        let mut params = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.contact_email {
            params.push(("de", email.as_str()));
        }
        Ok(Url::parse_with_params(&self.api_url, &params)?)
    }

    /// Extract the translated text from a MyMemory response body
    fn parse_response(body: &str) -> Result<String, TranslateError> {
        let response: MyMemoryResponse = serde_json::from_str(body)?;

        let status = match &response.response_status {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => "200".to_string(),
        };
        if status != "200" {
            let details = match response.response_details {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => String::new(),
            };
            return Err(TranslateError::Api { status, details });
        }

        response
            .response_data
            .and_then(|data| data.translated_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(TranslateError::MissingTranslation)
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    async fn translate_text(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, TranslateError> {
        let url = self.request_url(text, from, to)?;
        tracing::debug!(%url, "requesting translation");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TranslateError::Status(response.status()));
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }

    fn name(&self) -> &str {
        "MyMemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_text_and_langpair() {
        let provider = MyMemoryProvider::new(DEFAULT_API_URL);
        let url = provider.request_url("città di notte", "it", "en").unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "città di notte".to_string()),
                ("langpair".to_string(), "it|en".to_string()),
            ]
        );
        assert!(!url.as_str().contains(' '));
        assert!(url.as_str().starts_with(DEFAULT_API_URL));
    }

    #[test]
    fn test_request_url_with_contact_email() {
        let config = Config {
            contact_email: "me@example.org".to_string(),
            ..Config::default()
        };
        let provider = MyMemoryProvider::from_config(&config).unwrap();
        let url = provider.request_url("sole", "it", "fr").unwrap();
        assert!(url
            .query_pairs()
            .any(|(k, v)| k == "de" && v == "me@example.org"));
    }

    #[test]
    fn test_parse_successful_response() {
        let body = r#"{"responseData":{"translatedText":"house","match":1},"responseStatus":200,"responseDetails":""}"#;
        assert_eq!(MyMemoryProvider::parse_response(body).unwrap(), "house");
    }

    #[test]
    fn test_parse_string_error_status() {
        let body = r#"{"responseData":{"translatedText":"INVALID LANGUAGE PAIR"},"responseStatus":"403","responseDetails":"INVALID LANGUAGE PAIR"}"#;
        match MyMemoryProvider::parse_response(body) {
            Err(TranslateError::Api { status, details }) => {
                assert_eq!(status, "403");
                assert_eq!(details, "INVALID LANGUAGE PAIR");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_translation() {
        let body = r#"{"responseData":{},"responseStatus":200}"#;
        assert!(matches!(
            MyMemoryProvider::parse_response(body),
            Err(TranslateError::MissingTranslation)
        ));

        let body = r#"{"responseData":{"translatedText":"  "},"responseStatus":200}"#;
        assert!(matches!(
            MyMemoryProvider::parse_response(body),
            Err(TranslateError::MissingTranslation)
        ));
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(
            MyMemoryProvider::parse_response("<html>busy</html>"),
            Err(TranslateError::Parse(_))
        ));
    }
}

use std::env;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";

#[derive(Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_endpoint: String,
    pub openai_model: String,
    pub port: u16,
    pub max_document_chunks: usize,
}

impl Config {
    /// Read configuration from the environment. A missing API key is a fatal
    /// startup error; no agent call can proceed without it.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set"),
            openai_endpoint: env::var("OPENAI_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            max_document_chunks: env::var("MAX_DOCUMENT_CHUNKS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("MAX_DOCUMENT_CHUNKS must be a valid number"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMProvider};
    use crate::pipeline::workflow::launch;

    fn config_without_credentials() -> Config {
        let mut config = Config::default();
        config.llm.provider = LLMProvider::Gemini;
        config.llm.api_key = String::new();
        config
    }

    #[tokio::test]
    async fn test_launch_aborts_on_missing_credential() {
        // 凭证缺失属于致命配置错误，必须在第一阶段执行前返回
        let config = config_without_credentials();
        let result = launch(&config).await;

        assert!(result.is_err());
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("API key"));
    }

    #[test]
    fn test_validate_accepts_ollama_without_key() {
        // 本地ollama不需要API key
        let mut config = config_without_credentials();
        config.llm.provider = LLMProvider::Ollama;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let mut config = config_without_credentials();
        config.llm.api_key = "   ".to_string();
        assert!(config.validate().is_err());
    }
}

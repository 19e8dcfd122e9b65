#[cfg(test)]
mod tests {
    use super::super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;
    use std::io::Write;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_llm_is_disabled() {
        let config = Config::default();
        assert_eq!(config.llm.mode, LlmMode::Disabled);
        assert_eq!(config.llm.backend, BackendKind::Gemini);
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.llm.selected().model, "gemini-2.5-flash");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.llm.mode, LlmMode::Disabled);
    }

    #[test]
    fn test_toml_partial_sections_keep_defaults() {
        let file = write_config(
            ".toml",
            r#"
[llm]
mode = "remote"
backend = "openai"

[llm.openai]
model = "gpt-4o"
"#,
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.llm.mode, LlmMode::Remote);
        assert_eq!(config.llm.backend, BackendKind::OpenAi);
        assert_eq!(config.llm.selected().model, "gpt-4o");
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.llm.gemini.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_yaml_config() {
        let file = write_config(
            ".yaml",
            "llm:\n  mode: remote\n  backend: openai_compatible\n  openai_compatible:\n    model: qwen2.5\n    base_url: http://localhost:1234\n",
        );
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.llm.backend, BackendKind::OpenAiCompatible);
        let selected = config.llm.selected();
        assert_eq!(selected.model, "qwen2.5");
        assert_eq!(selected.base_url.as_deref(), Some("http://localhost:1234"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let file = write_config(".toml", "[llm\nmode = ");
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_api_key_prefers_config_then_env() {
        let mut llm = LlmConfig::default();
        llm.backend = BackendKind::OpenAi;

        let from_env = llm
            .resolve_api_key_with(|name| (name == "PHARMAGEN_OPENAI_API_KEY").then(|| "sk-env".to_string()))
            .unwrap();
        assert_eq!(from_env.expose_secret(), "sk-env");

        llm.openai.api_key = Some("sk-file".to_string());
        let from_file = llm.resolve_api_key_with(|_| Some("sk-env".to_string())).unwrap();
        assert_eq!(from_file.expose_secret(), "sk-file");
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let mut llm = LlmConfig::default();
        llm.gemini.api_key = Some("  ".to_string());
        assert!(llm.resolve_api_key_with(|_| None).is_none());
        assert!(llm.resolve_api_key_with(|_| Some(String::new())).is_none());
    }

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(include_str!("../../../../pharmagen.example.toml")).unwrap();
        assert_eq!(config.llm.mode, LlmMode::Disabled);
        assert_eq!(config.llm.openai_compatible.base_url.as_deref(), Some("http://localhost:11434"));
    }
}

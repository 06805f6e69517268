#[cfg(test)]
mod tests {
    use lifescope::api::DEFAULT_API_URL;
    use lifescope::libs::aggregation::WeekStart;
    use lifescope::libs::config::{ApiConfig, Config, PlannerConfig, API_URL_ENV, CONFIG_FILE_NAME};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
        path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join(CONFIG_FILE_NAME);
            ConfigTestContext {
                _temp_dir: temp_dir,
                path,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_reads_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.week_start(), WeekStart::Monday);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let config = Config {
            api: Some(ApiConfig {
                api_url: "https://lifescope.example.com/api".to_string(),
            }),
            planner: Some(PlannerConfig {
                week_start: WeekStart::Sunday,
            }),
        };

        config.save_to(&ctx.path).unwrap();
        let read = Config::read_from(&ctx.path).unwrap();

        assert_eq!(read, config);
        assert_eq!(read.week_start(), WeekStart::Sunday);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, r#"{ "planner": { "week_start": "sunday" } }"#).unwrap();

        let config = Config::read_from(&ctx.path).unwrap();

        assert!(config.api.is_none());
        assert_eq!(config.week_start(), WeekStart::Sunday);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        std::fs::write(&ctx.path, "not json").unwrap();
        assert!(Config::read_from(&ctx.path).is_err());
    }

    #[test]
    fn test_default_api_url() {
        assert_eq!(ApiConfig::default().api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_env_overrides_file() {
        let config = Config {
            api: Some(ApiConfig {
                api_url: "http://file.example.com/api".to_string(),
            }),
            planner: None,
        };

        std::env::set_var(API_URL_ENV, "http://env.example.com/api");
        assert_eq!(config.api_url(), "http://env.example.com/api");
        std::env::remove_var(API_URL_ENV);
        assert_eq!(config.api_url(), "http://file.example.com/api");
        assert_eq!(Config::default().api_url(), DEFAULT_API_URL);
    }
}

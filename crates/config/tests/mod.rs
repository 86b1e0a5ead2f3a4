//! Configuration loading tests
//!
//! These tests exercise TOML loading of the builder limits, gas defaults,
//! RPC and logging sections.

mod loading_tests {
    use ptb_config::{ConfigError, ExecutionMode, LogFormat, Network, PtbConfig};
    use std::io::Write;

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config = PtbConfig::from_toml_str(
            r#"
            [limits]
            strict_linearity = true

            [gas]
            budget = 5000000
            "#,
        )
        .unwrap();

        assert!(config.limits.strict_linearity);
        assert_eq!(config.limits.max_commands, 1024);
        assert_eq!(config.gas.budget, 5_000_000);
        assert_eq!(config.gas.price, 1_000);
        assert_eq!(config.rpc.network, Network::Testnet);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_full_file() {
        let config = PtbConfig::from_toml_str(
            r#"
            [limits]
            max_commands = 16
            max_object_inputs = 8

            [rpc]
            network = "devnet"
            url = "http://localhost:9000"
            request_timeout_secs = 5
            execution_mode = "WaitForEffectsCert"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.limits.max_commands, 16);
        assert_eq!(config.limits.max_object_inputs, 8);
        assert_eq!(config.rpc.endpoint(), "http://localhost:9000");
        assert_eq!(config.rpc.execution_mode, ExecutionMode::WaitForEffectsCert);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = PtbConfig::from_toml_str("[limits]\nmax_commands = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = PtbConfig::from_toml_str("[limits]\nmax_commands = 70000\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = PtbConfig::from_toml_str("[limits]\nmax_object_inputs = 65537\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = PtbConfig::from_toml_str("[limits]\nmax_commands = 65536\n").unwrap();
        assert_eq!(config.limits.max_commands, ptb_config::MAX_ADDRESSABLE_INDICES);

        let result = PtbConfig::from_toml_str("[gas]\nprice = \"cheap\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rpc]\nnetwork = \"mainnet\"").unwrap();

        let config = PtbConfig::load(file.path()).unwrap();
        assert_eq!(config.rpc.endpoint(), "https://fullnode.mainnet.sui.io:443");

        let missing = PtbConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}

use continuum_core::{HashAlgorithm, PhysicalNode, RingConfig, RingError};
use figment::Jail;

#[test]
fn test_error_display_messages() {
    let hash_err = RingError::UnavailableHashAlgorithm("sha1".to_string());
    assert_eq!(format!("{hash_err}"), "Hash algorithm unavailable: sha1");

    let node_err = RingError::InvalidNode("cache0".to_string());
    assert_eq!(format!("{node_err}"), "Invalid node address: cache0");
}

#[test]
fn test_unknown_hash_name_reports_name() {
    let err = "whirlpool".parse::<HashAlgorithm>().unwrap_err();
    assert_eq!(err.to_string(), "Hash algorithm unavailable: whirlpool");
}

#[test]
fn test_invalid_node_reports_input() {
    let err = "cache0.server.com".parse::<PhysicalNode>().unwrap_err();
    assert_eq!(err.to_string(), "Invalid node address: cache0.server.com");
}

#[test]
fn test_figment_error_converts_to_config_error() {
    Jail::expect_with(|jail| {
        jail.set_env("CONTINUUM_REPLICAS_PER_NODE", "many");

        let err = RingConfig::load(None).unwrap_err();
        let err = RingError::from(err);
        assert!(matches!(err, RingError::Config(_)));
        assert!(
            err.to_string().starts_with("Configuration error:"),
            "unexpected message: {err}"
        );
        Ok(())
    });
}

#[test]
fn test_errors_are_std_errors() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<RingError>();
}

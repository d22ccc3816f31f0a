use std::env;
use std::path::PathBuf;

use transport_security::constants::TLS_CONFIG_FILE_ENV;
use transport_security::{get_default_config_path, read_options_from_env, TlsConfigError};

// A single test, since the environment is shared by every test in the binary.
#[test]
fn test_read_options_from_env() {
    env::remove_var(TLS_CONFIG_FILE_ENV);
    assert_eq!(get_default_config_path(), None);
    assert!(read_options_from_env().unwrap().is_none());

    env::set_var(TLS_CONFIG_FILE_ENV, "");
    assert_eq!(get_default_config_path(), None);

    env::set_var(TLS_CONFIG_FILE_ENV, "tests/testdata/tls/ok_config.json");
    assert_eq!(
        get_default_config_path(),
        Some(PathBuf::from("tests/testdata/tls/ok_config.json"))
    );
    let options = read_options_from_env().unwrap().unwrap();
    assert_eq!(options.private_key_pem(), "My private key\n");

    env::set_var(TLS_CONFIG_FILE_ENV, "missing_config.json");
    let err = read_options_from_env().unwrap_err();
    assert!(matches!(err, TlsConfigError::ConfigFileUnreadable { .. }));

    env::remove_var(TLS_CONFIG_FILE_ENV);
}

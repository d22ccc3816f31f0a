//! Reading [`TransportSecurityOptions`] from a JSON config file.

use crate::config::source::{
    get_default_config_path, load_from_path, load_from_string, FileSource, LocalFileSource,
};
use crate::config::TransportSecurityConfig;
use crate::error::{Result, TlsConfigError};
use crate::options::{PrivateKeyPem, TransportSecurityOptions};
use crate::prelude::{debug, warn};
use std::path::Path;

/// Reads options from the JSON config file at `path`, using the local filesystem.
///
/// # Errors
///
/// Returns [`TlsConfigError::ConfigFileUnreadable`] if the config file cannot be read,
/// or any error of [`read_options_from_json_string`].
pub fn read_options_from_json_file(path: impl AsRef<Path>) -> Result<TransportSecurityOptions> {
    read_options_from_json_file_with(&LocalFileSource, path.as_ref())
}

/// Reads options from JSON config text, reading the referenced PEM files from the
/// local filesystem.
///
/// # Errors
///
/// Returns the first validation error of the config text, or
/// [`TlsConfigError::ReferencedFileMissing`] for the first PEM file that cannot be read.
///
/// # Examples
///
/// ```
/// use transport_security::read_options_from_json_string;
///
/// let err = read_options_from_json_string(r#"{"files":{}}"#).unwrap_err();
/// assert_eq!(err.to_string(), "TLS config root field 'files' is missing or empty");
/// ```
pub fn read_options_from_json_string(json_text: &str) -> Result<TransportSecurityOptions> {
    read_options_from_json_string_with(&LocalFileSource, json_text)
}

/// Like [`read_options_from_json_file`], reading every file through `files`.
pub fn read_options_from_json_file_with<S: FileSource>(
    files: &S,
    path: &Path,
) -> Result<TransportSecurityOptions> {
    let text = load_from_path(files, path)?;
    read_options_from_json_string_with(files, &text)
}

/// Like [`read_options_from_json_string`], reading the PEM files through `files`.
pub fn read_options_from_json_string_with<S: FileSource>(
    files: &S,
    json_text: &str,
) -> Result<TransportSecurityOptions> {
    let config = TransportSecurityConfig::parse(load_from_string(json_text))?;
    resolve(files, &config)
}

/// Reads options from the config file named by the `TLS_CONFIG_FILE` environment
/// variable.
///
/// Returns `Ok(None)` if the variable is unset or empty.
///
/// # Errors
///
/// Same as [`read_options_from_json_file`].
pub fn read_options_from_env() -> Result<Option<TransportSecurityOptions>> {
    match get_default_config_path() {
        Some(path) => read_options_from_json_file(path).map(Some),
        None => Ok(None),
    }
}

/// Reads the PEM files named by `config`, in the order private key, certificate
/// chain, CA certificates, then compiles the authorization policy and the remaining
/// settings and assembles the options.
///
/// # Errors
///
/// Returns [`TlsConfigError::ReferencedFileMissing`] for the first file that cannot
/// be read. Only once every file has been read are errors of
/// [`TransportSecurityConfig::authorized_peers`],
/// [`TransportSecurityConfig::accepted_ciphers`] and
/// [`TransportSecurityConfig::disable_hostname_validation`] returned, in that order.
pub fn resolve<S: FileSource>(
    files: &S,
    config: &TransportSecurityConfig,
) -> Result<TransportSecurityOptions> {
    let private_key_pem = PrivateKeyPem(read_referenced(files, config.private_key_path())?);
    let cert_chain_pem = read_referenced(files, config.certificate_path())?;
    let ca_certs_pem = read_referenced(files, config.ca_certificates_path())?;

    let authorized_peers = config.authorized_peers()?;
    let accepted_ciphers = config.accepted_ciphers()?;
    let disable_hostname_validation = config.disable_hostname_validation()?;
    if disable_hostname_validation {
        warn!("TLS config disables peer hostname validation");
    }

    Ok(TransportSecurityOptions {
        private_key_pem,
        cert_chain_pem,
        ca_certs_pem,
        authorized_peers,
        accepted_ciphers,
        disable_hostname_validation,
    })
}

fn read_referenced<S: FileSource>(files: &S, path: &Path) -> Result<String> {
    let text = files
        .read_to_string(path)
        .map_err(|source| TlsConfigError::ReferencedFileMissing {
            path: path.display().to_string(),
            source,
        })?;
    debug!("Read '{}' referenced by TLS config", path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryFiles {
        contents: HashMap<PathBuf, String>,
        reads: Mutex<Vec<PathBuf>>,
    }

    impl MemoryFiles {
        fn with(mut self, path: &str, content: &str) -> Self {
            self.contents.insert(PathBuf::from(path), content.to_string());
            self
        }

        fn reads(&self) -> Vec<PathBuf> {
            self.reads.lock().unwrap().clone()
        }
    }

    impl FileSource for MemoryFiles {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.reads.lock().unwrap().push(path.to_path_buf());
            self.contents
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn dummy_files() -> MemoryFiles {
        MemoryFiles::default()
            .with("dummy_privkey.txt", "My private key\n")
            .with("dummy_certs.txt", "My certificate chain\n")
            .with("dummy_ca_certs.txt", "My CA certificates\n")
    }

    const OK_CONFIG: &str = r#"{"files":{"private-key":"dummy_privkey.txt",
                                          "certificates":"dummy_certs.txt",
                                          "ca-certificates":"dummy_ca_certs.txt"}}"#;

    #[test]
    fn test_reads_referenced_files_verbatim() {
        let options = read_options_from_json_string_with(&dummy_files(), OK_CONFIG).unwrap();

        assert_eq!(options.private_key_pem(), "My private key\n");
        assert_eq!(options.cert_chain_pem(), "My certificate chain\n");
        assert_eq!(options.ca_certs_pem(), "My CA certificates\n");
        assert!(options.authorized_peers().allows_all_authenticated());
    }

    #[test]
    fn test_reads_config_file_through_source() {
        let files = dummy_files().with("tls.json", OK_CONFIG);
        let options = read_options_from_json_file_with(&files, Path::new("tls.json")).unwrap();

        assert_eq!(options.ca_certs_pem(), "My CA certificates\n");
        assert_eq!(files.reads()[0], PathBuf::from("tls.json"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = read_options_from_json_file_with(&dummy_files(), Path::new("missing_config.json"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "TLS config file 'missing_config.json' could not be read"
        );
    }

    #[test]
    fn test_first_missing_referenced_file_wins() {
        let files = MemoryFiles::default().with("dummy_certs.txt", "chain");
        let json = r#"{"files":{"private-key":"missing_privkey.txt",
                                 "certificates":"dummy_certs.txt",
                                 "ca-certificates":"missing_ca.txt"}}"#;

        let err = read_options_from_json_string_with(&files, json).unwrap_err();

        assert!(matches!(err, TlsConfigError::ReferencedFileMissing { .. }));
        assert_eq!(
            err.to_string(),
            "File 'missing_privkey.txt' referenced by TLS config does not exist"
        );
        assert_eq!(files.reads(), [PathBuf::from("missing_privkey.txt")]);
    }

    macro_rules! missing_referenced_file_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (missing, expected_reads) = $value;
                let files = MemoryFiles::default()
                    .with("key.pem", "key")
                    .with("chain.pem", "chain")
                    .with("ca.pem", "ca");
                let path_of = |name: &'static str| if name == missing { "gone.pem" } else { name };
                let json = format!(
                    r#"{{"files":{{"private-key":"{}","certificates":"{}","ca-certificates":"{}"}}}}"#,
                    path_of("key.pem"),
                    path_of("chain.pem"),
                    path_of("ca.pem"),
                );

                let err = read_options_from_json_string_with(&files, &json).unwrap_err();

                assert!(matches!(err, TlsConfigError::ReferencedFileMissing { ref path, .. } if path == "gone.pem"));
                assert_eq!(
                    err.to_string(),
                    "File 'gone.pem' referenced by TLS config does not exist"
                );
                assert_eq!(files.reads().len(), expected_reads);
            }
        )*
        }
    }

    missing_referenced_file_tests! {
        missing_private_key_file: ("key.pem", 1),
        missing_certificates_file: ("chain.pem", 2),
        missing_ca_certificates_file: ("ca.pem", 3),
    }

    #[test]
    fn test_files_are_read_in_order() {
        let files = dummy_files();
        read_options_from_json_string_with(&files, OK_CONFIG).unwrap();

        assert_eq!(
            files.reads(),
            [
                PathBuf::from("dummy_privkey.txt"),
                PathBuf::from("dummy_certs.txt"),
                PathBuf::from("dummy_ca_certs.txt"),
            ]
        );
    }

    #[test]
    fn test_missing_referenced_file_wins_over_policy_errors() {
        let json = r#"{"files":{"private-key":"missing_privkey.txt",
                                 "certificates":"missing_c.txt",
                                 "ca-certificates":"missing_ca.txt"},
                       "authorized-peers":[]}"#;

        let err = read_options_from_json_string_with(&dummy_files(), json).unwrap_err();

        assert!(matches!(err, TlsConfigError::ReferencedFileMissing { .. }));
        assert_eq!(
            err.to_string(),
            "File 'missing_privkey.txt' referenced by TLS config does not exist"
        );
    }

    #[test]
    fn test_policy_errors_follow_reading_every_file() {
        let files = dummy_files();
        let json = r#"{"files":{"private-key":"dummy_privkey.txt",
                                 "certificates":"dummy_certs.txt",
                                 "ca-certificates":"dummy_ca_certs.txt"},
                       "authorized-peers":[],
                       "accepted-ciphers":"not an array"}"#;

        let err = read_options_from_json_string_with(&files, json).unwrap_err();

        assert!(matches!(err, TlsConfigError::EmptyPolicyList));
        assert_eq!(files.reads().len(), 3);
    }

    #[test]
    fn test_carries_supplementary_settings() {
        let json = r#"{"files":{"private-key":"dummy_privkey.txt",
                                 "certificates":"dummy_certs.txt",
                                 "ca-certificates":"dummy_ca_certs.txt"},
                       "accepted-ciphers":["TLS13_AES_128_GCM_SHA256"],
                       "disable-hostname-validation":true}"#;

        let options = read_options_from_json_string_with(&dummy_files(), json).unwrap();

        assert_eq!(options.accepted_ciphers(), ["TLS13_AES_128_GCM_SHA256"]);
        assert!(options.disable_hostname_validation());
    }
}

use crate::error::BenchError;
use rustls::client::{ServerCertVerified, ServerCertVerifier};
use rustls::{Certificate, ClientConfig, PrivateKey, RootCertStore, ServerName};
use rustls_pemfile::Item;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

const PLATFORM_TRUST_STORE: &str = "platform trust store";

/// Builds a client configuration that verifies the broker against the
/// platform's trusted root certificates.
pub fn verified_config() -> Result<ClientConfig, BenchError> {
    let native = rustls_native_certs::load_native_certs().map_err(|e| {
        BenchError::CannotLoadTlsMaterial {
            path: PLATFORM_TRUST_STORE.to_owned(),
            reason: e.to_string(),
        }
    })?;
    let ders: Vec<Vec<u8>> = native.into_iter().map(|cert| cert.0).collect();

    let mut roots = RootCertStore::empty();
    let (added, ignored) = roots.add_parsable_certificates(&ders);
    debug!("Loaded {added} trusted root certificates, ignored {ignored}");
    if added == 0 {
        warn!("No trusted root certificates found, TLS brokers will fail verification");
    }

    Ok(ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth())
}

/// Builds a client configuration that presents the given certificate and
/// skips broker certificate verification.
pub fn client_config(cert_path: &str, key_path: &str) -> Result<ClientConfig, BenchError> {
    let certs = load_certificates(cert_path)?;
    let key = load_private_key(key_path)?;
    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_custom_certificate_verifier(SkipServerVerification::new())
        .with_client_auth_cert(certs, key)?;
    Ok(config)
}

fn read_pem_items(path: &str) -> Result<Vec<Item>, BenchError> {
    let file = File::open(path).map_err(|e| BenchError::CannotLoadTlsMaterial {
        path: path.to_owned(),
        reason: e.to_string(),
    })?;
    rustls_pemfile::read_all(&mut BufReader::new(file)).map_err(|e| {
        BenchError::CannotLoadTlsMaterial {
            path: path.to_owned(),
            reason: e.to_string(),
        }
    })
}

pub fn load_certificates(path: &str) -> Result<Vec<Certificate>, BenchError> {
    let certs: Vec<Certificate> = read_pem_items(path)?
        .into_iter()
        .filter_map(|item| match item {
            Item::X509Certificate(der) => Some(Certificate(der)),
            _ => None,
        })
        .collect();

    if certs.is_empty() {
        return Err(BenchError::CannotLoadTlsMaterial {
            path: path.to_owned(),
            reason: "no certificate found".to_owned(),
        });
    }
    Ok(certs)
}

pub fn load_private_key(path: &str) -> Result<PrivateKey, BenchError> {
    read_pem_items(path)?
        .into_iter()
        .find_map(|item| match item {
            Item::RSAKey(der) | Item::PKCS8Key(der) | Item::ECKey(der) => Some(PrivateKey(der)),
            _ => None,
        })
        .ok_or_else(|| BenchError::CannotLoadTlsMaterial {
            path: path.to_owned(),
            reason: "no private key found".to_owned(),
        })
}

struct SkipServerVerification;

impl SkipServerVerification {
    fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

impl ServerCertVerifier for SkipServerVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}

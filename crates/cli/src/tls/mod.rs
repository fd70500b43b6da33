//! # TLS Configuration
//!
//! Certificate and private key loading, and the rustls server configuration
//! used by `serve --tls`.

use std::{io, path::Path, sync::Arc};

use rustls::{
    ServerConfig,
    pki_types::{CertificateDer, PrivateKeyDer, pem::PemObject as _},
};

/// Load certificates from a PEM file
///
/// # Arguments
///
/// * `path` - Path to the PEM file containing certificates
///
/// # Returns
///
/// The certificate chain, or an I/O error if the file is unreadable or holds
/// no certificate.
pub fn load_certs(path: &Path) -> io::Result<Vec<CertificateDer<'static>>> {
    let cert_pem = std::fs::read(path)?;
    let certs = CertificateDer::pem_slice_iter(&cert_pem)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if certs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "No certificates found in file",
        ));
    }
    Ok(certs)
}

/// Load private key from a PEM file
///
/// Accepts PKCS#8, PKCS#1 and SEC1 encodings.
pub fn load_private_key(path: &Path) -> io::Result<PrivateKeyDer<'static>> {
    let key_pem = std::fs::read(path)?;
    PrivateKeyDer::from_pem_slice(&key_pem).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Builds the server configuration with the ring provider, advertising
/// HTTP/2 and HTTP/1.1 over ALPN.
pub fn server_config(cert_path: &Path, key_path: &Path) -> anyhow::Result<Arc<ServerConfig>> {
    let certs = load_certs(cert_path).map_err(|e| anyhow::anyhow!("Failed to load TLS certificate: {}", e))?;
    let key = load_private_key(key_path).map_err(|e| anyhow::anyhow!("Failed to load TLS private key: {}", e))?;

    let mut config = ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|e| anyhow::anyhow!("Failed to configure TLS: {}", e))?
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| anyhow::anyhow!("Failed to configure TLS: {}", e))?;
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(Arc::new(config))
}

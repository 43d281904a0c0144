use std::sync::Once;

/// Installs `ring` as the process-wide rustls provider unless the host
/// application already chose one.
pub(crate) fn ensure_rustls_crypto_provider() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if rustls::crypto::CryptoProvider::get_default().is_none() {
            // Losing a race with another installer is fine: a provider is set either way.
            let _ = rustls::crypto::ring::default_provider().install_default();
        }
    });
}

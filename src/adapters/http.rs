use once_cell::sync::OnceCell;
use reqwest::Client;
use url::Url;

use crate::domain::DomainError;

/// Process-wide HTTP client shared by every remote adapter.
static CLIENT: OnceCell<Client> = OnceCell::new();

/// Get the shared HTTP client, building it on first use.
///
/// One client means one connection pool and one TLS configuration for all
/// three services. Timeouts are left at reqwest defaults.
pub fn shared_client() -> Result<Client, DomainError> {
    let client = CLIENT.get_or_try_init(|| {
        Client::builder()
            .use_rustls_tls()
            .user_agent(format!("Voxlate/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::HttpRequest(format!("Failed to create HTTP client: {}", e)))
    })?;
    Ok(client.clone())
}

/// Resolve a service base URL: a validated override when configured,
/// otherwise the given regional default.
pub fn resolve_base_url(
    override_url: Option<&str>,
    default_url: String,
) -> Result<String, DomainError> {
    match override_url {
        Some(raw) => {
            let parsed = Url::parse(raw)
                .map_err(|e| DomainError::Config(format!("Invalid endpoint override '{}': {}", raw, e)))?;
            Ok(parsed.to_string().trim_end_matches('/').to_string())
        }
        None => Ok(default_url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_passes_through() {
        let url = resolve_base_url(None, "https://westeurope.example.com/v1".to_string()).unwrap();
        assert_eq!(url, "https://westeurope.example.com/v1");
    }

    #[test]
    fn test_override_is_validated_and_trimmed() {
        let url = resolve_base_url(
            Some("http://localhost:9999/translate/"),
            "https://unused.example.com".to_string(),
        )
        .unwrap();
        assert_eq!(url, "http://localhost:9999/translate");
    }

    #[test]
    fn test_bad_override_is_a_config_error() {
        let result = resolve_base_url(Some("not a url"), "https://fallback".to_string());
        assert!(matches!(result, Err(DomainError::Config(_))));
    }
}

use std::path::PathBuf;

/// Runtime configuration, injected into the store and the auth gate at
/// construction. There is no ambient global config.
#[derive(Debug, Clone)]
pub struct Config {
  /// Port for the HTTP server
  pub port: u16,
  /// Path of the backing JSON document
  pub data_file: PathBuf,
  /// Credentials for the three authentication schemes
  pub auth: AuthConfig,
}

/// Secrets for the authentication schemes. A scheme whose secret is `None`
/// fails closed: it never admits a request.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
  /// Value expected in the `x-api-key` header
  pub api_key: Option<String>,
  /// Value expected after `Authorization: Bearer`
  pub bearer_token: Option<String>,
  /// Username for basic authentication
  pub basic_user: Option<String>,
  /// Password for basic authentication
  pub basic_pass: Option<String>,
}

// Configuration module entry point
// Loads application configuration from file, environment and defaults

mod types;

pub use types::{
    Config, EndpointsConfig, FailurePolicy, HttpConfig, LoggingConfig, PageConfig, RemoteConfig,
};

/// Environment variable prefix, e.g. `DISPATCH_REMOTE__PORT=8080`
const ENV_PREFIX: &str = "DISPATCH";

impl Config {
    /// Load configuration from the default "config" file (any supported extension)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("remote.host", "127.0.0.1")?
            .set_default("remote.port", 35000)?
            .set_default("endpoints.hello_path", "/hello")?
            .set_default("endpoints.hello_param", "name")?
            .set_default("endpoints.echo_path", "/echo")?
            .set_default("page.get_input", "nameGet")?
            .set_default("page.get_output", "responseGet")?
            .set_default("page.post_input", "namePost")?
            .set_default("page.post_output", "responsePost")?
            .set_default("http.request_timeout", 0)?
            .set_default("http.user_agent", "form-dispatch/0.1")?
            .set_default("http.failure_policy", "silent")?
            .set_default("logging.level", "info")?
            .set_default("logging.invocation_log", true)?
            .set_default("logging.invocation_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    /// Base URI of the remote collaborator, e.g. `http://127.0.0.1:35000`
    pub fn remote_base(&self) -> Result<String, String> {
        let host = self.remote.host.trim();
        if host.is_empty() {
            return Err("Invalid remote address: empty host".to_string());
        }
        if self.remote.port == 0 {
            return Err("Invalid remote address: port 0".to_string());
        }

        let base = if host.contains(':') && !host.starts_with('[') {
            // bare IPv6 literal
            format!("http://[{host}]:{}", self.remote.port)
        } else {
            format!("http://{host}:{}", self.remote.port)
        };

        base.parse::<hyper::Uri>()
            .map(|_| base.clone())
            .map_err(|e| format!("Invalid remote address '{base}': {e}"))
    }
}

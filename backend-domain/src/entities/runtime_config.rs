// Runtime configuration handed to the application layer

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3240";
pub const DEFAULT_EXPORT_FILE_PREFIX: &str = "inventory_export";
pub const DEFAULT_MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_path: Option<String>,
    pub default_people: Vec<String>,
    pub export_file_prefix: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_token: None,
            data_path: None,
            default_people: Vec::new(),
            export_file_prefix: DEFAULT_EXPORT_FILE_PREFIX.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

use anyhow::{anyhow, Result};

pub fn validate_bind_addr(value: &str) -> Result<()> {
    value
        .parse::<std::net::SocketAddr>()
        .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
    Ok(())
}

pub fn validate_log_format(value: &str) -> Result<()> {
    match value {
        "text" | "json" => Ok(()),
        other => Err(anyhow!("log_format must be 'text' or 'json', got '{}'", other)),
    }
}

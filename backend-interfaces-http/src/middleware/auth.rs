use std::io::Read;

use anyhow::{anyhow, Result};
use axum::http::HeaderMap;
use flate2::read::GzDecoder;

use backend_domain::{RawRow, RuntimeConfig};

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Decodes a JSON array of row objects, gunzipping first when the request
/// says so. Object key order is kept as column order.
pub fn parse_rows(headers: &HeaderMap, body: &[u8]) -> Result<Vec<RawRow>> {
    let content = maybe_gunzip(headers, body)?;
    let rows: Vec<RawRow> = serde_json::from_str(&content)
        .map_err(|err| anyhow!("expected a JSON array of row objects: {}", err))?;
    Ok(rows)
}

fn maybe_gunzip(headers: &HeaderMap, body: &[u8]) -> Result<String> {
    if let Some(encoding) = headers.get("Content-Encoding") {
        if encoding.to_str().unwrap_or("") == "gzip" {
            let mut decoder = GzDecoder::new(body);
            let mut out = String::new();
            decoder.read_to_string(&mut out)?;
            return Ok(out);
        }
    }
    Ok(String::from_utf8(body.to_vec())?)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use axum::http::HeaderValue;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    #[test]
    fn bearer_token_is_required_when_configured() {
        let config = RuntimeConfig {
            api_token: Some("secret".to_string()),
            ..RuntimeConfig::default()
        };
        let mut headers = HeaderMap::new();
        assert!(!authorize(&config, &headers));
        headers.insert("Authorization", HeaderValue::from_static("Bearer secret"));
        assert!(authorize(&config, &headers));
        headers.insert("Authorization", HeaderValue::from_static("Bearer other"));
        assert!(!authorize(&config, &headers));
        assert!(authorize(&RuntimeConfig::default(), &HeaderMap::new()));
    }

    #[test]
    fn gzip_rows_are_decoded() {
        let json = r#"[{"Mã":"1","Tên":"Bút"},{"Mã":"2"}]"#;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(json.as_bytes()).expect("write");
        let body = encoder.finish().expect("finish");

        let mut headers = HeaderMap::new();
        headers.insert("Content-Encoding", HeaderValue::from_static("gzip"));
        let rows = parse_rows(&headers, &body).expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells()[1].0, "Tên");
    }

    #[test]
    fn non_array_body_is_rejected() {
        let err = parse_rows(&HeaderMap::new(), r#"{"Mã":"1"}"#.as_bytes()).expect_err("object");
        assert!(err.to_string().contains("JSON array"));
    }
}

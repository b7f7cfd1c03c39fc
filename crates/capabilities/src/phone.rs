use parley_core::engine::AdapterError;
use parley_core::types::PhoneRecord;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://apilayer.net/api";

// Numverify reports key/quota problems as a 200 with `success: false`, so
// both shapes are decoded from one struct.
#[derive(Debug, Deserialize)]
struct NumverifyResponse {
    success: Option<bool>,
    error: Option<NumverifyError>,
    valid: Option<bool>,
    country_name: Option<String>,
    location: Option<String>,
    carrier: Option<String>,
    line_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NumverifyError {
    #[serde(default)]
    info: String,
}

/// Phone-number validation against the Numverify API.
pub struct PhoneValidationAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PhoneValidationAdapter {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Validate the captured token exactly as routed; a leading `+` is
    /// passed through unnormalized.
    pub async fn validate(&self, number: &str) -> Result<PhoneRecord, AdapterError> {
        let url = self.request_url(number);
        tracing::debug!("phone validation request for '{}'", number);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AdapterError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AdapterError::Api(format!("{}: {}", status, text)));
        }

        let parsed: NumverifyResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        record_from(parsed)
    }

    fn request_url(&self, number: &str) -> String {
        format!(
            "{}/validate?access_key={}&number={}",
            self.base_url.trim_end_matches('/'),
            self.api_key,
            urlencoding::encode(number)
        )
    }
}

fn record_from(parsed: NumverifyResponse) -> Result<PhoneRecord, AdapterError> {
    if parsed.success == Some(false) {
        let info = parsed
            .error
            .map(|e| e.info)
            .filter(|info| !info.is_empty())
            .unwrap_or_else(|| "validation request rejected".to_string());
        return Err(AdapterError::Api(info));
    }

    let valid = parsed
        .valid
        .ok_or_else(|| AdapterError::Parse("response missing 'valid' field".to_string()))?;

    Ok(PhoneRecord {
        valid,
        country: parsed.country_name.unwrap_or_default(),
        location: parsed.location.unwrap_or_default(),
        carrier: parsed.carrier.unwrap_or_default(),
        line_type: parsed.line_type.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_keeps_plus_encoded() {
        let adapter = PhoneValidationAdapter::new("secret".to_string());
        let url = adapter.request_url("+15551234");
        assert_eq!(
            url,
            "http://apilayer.net/api/validate?access_key=secret&number=%2B15551234"
        );
    }

    #[test]
    fn test_valid_number_maps_to_record() {
        let body = r#"{
            "valid": true,
            "number": "14158586273",
            "country_name": "United States of America",
            "location": "Novato",
            "carrier": "AT&T Mobility LLC",
            "line_type": "mobile"
        }"#;
        let parsed: NumverifyResponse = serde_json::from_str(body).unwrap();
        let record = record_from(parsed).unwrap();
        assert!(record.valid);
        assert_eq!(record.country, "United States of America");
        assert_eq!(record.line_type, "mobile");
    }

    #[test]
    fn test_invalid_number_is_still_a_record() {
        let body = r#"{
            "valid": false,
            "number": "123",
            "country_name": "",
            "location": "",
            "carrier": "",
            "line_type": null
        }"#;
        let parsed: NumverifyResponse = serde_json::from_str(body).unwrap();
        let record = record_from(parsed).unwrap();
        assert!(!record.valid);
        assert_eq!(record.line_type, "");
    }

    #[test]
    fn test_rejected_request_is_an_api_error() {
        let body = r#"{
            "success": false,
            "error": {"code": 101, "type": "invalid_access_key", "info": "You have not supplied a valid API Access Key."}
        }"#;
        let parsed: NumverifyResponse = serde_json::from_str(body).unwrap();
        let err = record_from(parsed).unwrap_err();
        match err {
            AdapterError::Api(info) => assert!(info.contains("Access Key")),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_valid_field_is_a_parse_error() {
        let parsed: NumverifyResponse = serde_json::from_str(r#"{"number": "123"}"#).unwrap();
        assert!(matches!(
            record_from(parsed),
            Err(AdapterError::Parse(_))
        ));
    }
}

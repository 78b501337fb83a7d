use serde::Deserialize;
use url::Url;

use super::TransportError;
use super::flag::TransportFlag;
use crate::domain::{ApiToken, ReceiptId, ReceiptResponse};

#[derive(Debug, Clone, Deserialize)]
struct ReceiptJsonResponse {
    status: i64,
    #[serde(default)]
    acknowledged: TransportFlag,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// Build `{endpoint}/{receipt}.json?token=...`, percent-encoding the receipt as one path segment.
pub fn receipt_url(
    endpoint: &str,
    receipt: &ReceiptId,
    token: &ApiToken,
) -> Result<Url, TransportError> {
    let mut url = Url::parse(endpoint)?;
    url.path_segments_mut()
        .map_err(|()| TransportError::CannotBeABase {
            endpoint: endpoint.to_owned(),
        })?
        .pop_if_empty()
        .push(&format!("{}.json", receipt.as_str()));
    url.query_pairs_mut()
        .append_pair(ApiToken::FIELD, token.as_str());
    Ok(url)
}

pub fn decode_receipt_json_response(json: &str) -> Result<ReceiptResponse, TransportError> {
    let parsed: ReceiptJsonResponse = serde_json::from_str(json)?;
    Ok(ReceiptResponse {
        status: parsed.status,
        acknowledged: parsed.acknowledged.is_set(),
        request: parsed.request,
        errors: parsed.errors,
    })
}

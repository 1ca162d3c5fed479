//! Shipping carrier API client
//!
//! Integrates with the FedEx REST APIs for rate quotes and shipping labels.

use base64::Engine;
use chrono::{NaiveDateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::config::CarrierConfig;
use crate::error::{AppError, AppResult};

/// Client for the carrier rate and ship APIs
#[derive(Clone)]
pub struct CarrierClient {
    client: Client,
    config: CarrierConfig,
}

/// Input for a rate quote
#[derive(Debug, Deserialize)]
pub struct RateQuoteInput {
    pub sender_zip: String,
    pub recipient_zip: String,
    pub weight_lb: Decimal,
    pub length_in: u32,
    pub width_in: u32,
    pub height_in: u32,
}

/// A shipping option parsed from the carrier's rate response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOption {
    pub service_type: String,
    pub service_name: String,
    pub total_cost: Option<Decimal>,
    pub saturday_delivery: bool,
    pub estimated_delivery: Option<String>,
}

/// A party on a shipment
#[derive(Debug, Deserialize)]
pub struct ShippingParty {
    pub name: String,
    pub phone: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Input for generating a shipping label
#[derive(Debug, Deserialize)]
pub struct LabelInput {
    pub service_type: String,
    pub shipper: ShippingParty,
    pub recipient: ShippingParty,
    pub weight_lb: Decimal,
    pub length_in: u32,
    pub width_in: u32,
    pub height_in: u32,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Raw carrier rate response
#[derive(Debug, Deserialize)]
pub struct RateResponse {
    pub output: Option<RateOutput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOutput {
    #[serde(default)]
    pub rate_reply_details: Vec<RateReplyDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateReplyDetail {
    pub service_type: Option<String>,
    pub service_name: Option<String>,
    #[serde(default)]
    pub rated_shipment_details: Vec<RatedShipmentDetail>,
    pub commit: Option<CommitDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedShipmentDetail {
    pub total_net_charge: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDetail {
    #[serde(default)]
    pub saturday_delivery: bool,
    pub date_detail: Option<CommitDateDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDateDetail {
    pub day_format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShipResponse {
    output: Option<ShipOutput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShipOutput {
    #[serde(default)]
    transaction_shipments: Vec<TransactionShipment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionShipment {
    #[serde(default)]
    piece_responses: Vec<PieceResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PieceResponse {
    #[serde(default)]
    package_documents: Vec<PackageDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageDocument {
    encoded_label: Option<String>,
}

impl CarrierClient {
    /// Create a new CarrierClient
    pub fn new(config: CarrierConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Obtain an OAuth token from the carrier
    pub async fn get_access_token(&self) -> AppResult<String> {
        if self.config.api_key.is_empty() || self.config.secret_key.is_empty() {
            return Err(AppError::Configuration(
                "Carrier API credentials are not configured".to_string(),
            ));
        }

        let url = format!("{}/oauth/token", self.config.base_url);
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.api_key.as_str()),
            ("client_secret", self.config.secret_key.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::CarrierApi(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::CarrierApi(format!(
                "Token request rejected: {} - {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::CarrierApi(format!("Failed to parse token response: {}", e)))?;

        Ok(token.access_token)
    }

    /// Request rates and transit times for a package
    pub async fn get_rates(&self, input: &RateQuoteInput) -> AppResult<Vec<RateOption>> {
        let token = self.get_access_token().await?;
        let url = format!("{}/rate/v1/rates/quotes", self.config.base_url);

        let payload = json!({
            "accountNumber": { "value": self.config.account_number },
            "rateRequestControlParameters": { "returnTransitTimes": true },
            "requestedShipment": {
                "shipper": {
                    "address": {
                        "postalCode": input.sender_zip,
                        "countryCode": "US",
                        "residential": false
                    }
                },
                "recipient": {
                    "address": {
                        "postalCode": input.recipient_zip,
                        "countryCode": "US",
                        "residential": true
                    }
                },
                "pickupType": "USE_SCHEDULED_PICKUP",
                "packagingType": "YOUR_PACKAGING",
                "shipDateStamp": Utc::now().date_naive().to_string(),
                "requestedPackageLineItems": [{
                    "weight": { "units": "LB", "value": input.weight_lb.to_string() },
                    "dimensions": {
                        "length": input.length_in.to_string(),
                        "width": input.width_in.to_string(),
                        "height": input.height_in.to_string(),
                        "units": "IN"
                    }
                }],
                "rateRequestType": ["ACCOUNT"]
            }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::CarrierApi(format!("Rate request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::CarrierApi(format!(
                "Rate request rejected: {} - {}",
                status, body
            )));
        }

        let data: RateResponse = response
            .json()
            .await
            .map_err(|e| AppError::CarrierApi(format!("Failed to parse rate response: {}", e)))?;

        Ok(parse_rate_options(&data))
    }

    /// Generate a shipping label and return the decoded PDF bytes
    pub async fn generate_label(&self, input: &LabelInput) -> AppResult<Vec<u8>> {
        let token = self.get_access_token().await?;
        let url = format!("{}/ship/v1/shipments", self.config.base_url);

        let payload = json!({
            "labelResponseOptions": "LABEL",
            "mergeLabelDocOption": "NONE",
            "accountNumber": { "value": self.config.account_number },
            "requestedShipment": {
                "shipAction": "CONFIRM",
                "processingOptionType": "SYNCHRONOUS_ONLY",
                "shipper": party_payload(&input.shipper, false),
                "recipients": [party_payload(&input.recipient, true)],
                "pickupType": "USE_SCHEDULED_PICKUP",
                "serviceType": input.service_type,
                "packagingType": "YOUR_PACKAGING",
                "labelSpecification": {
                    "imageType": "PDF",
                    "labelStockType": "PAPER_4X6"
                },
                "requestedPackageLineItems": [{
                    "weight": { "units": "LB", "value": input.weight_lb.to_string() },
                    "dimensions": {
                        "length": input.length_in.to_string(),
                        "width": input.width_in.to_string(),
                        "height": input.height_in.to_string(),
                        "units": "IN"
                    }
                }],
                "rateRequestType": ["ACCOUNT"],
                "shippingChargesPayment": {
                    "paymentType": "SENDER",
                    "payor": {
                        "responsibleParty": {
                            "accountNumber": { "value": self.config.account_number }
                        }
                    }
                }
            }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .header("x-customer-transaction-id", Uuid::new_v4().to_string())
            .header("x-locale", "en_US")
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::CarrierApi(format!("Ship request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::CarrierApi(format!(
                "Ship request rejected: {} - {}",
                status, body
            )));
        }

        let data: ShipResponse = response
            .json()
            .await
            .map_err(|e| AppError::CarrierApi(format!("Failed to parse ship response: {}", e)))?;

        let shipment = data
            .output
            .and_then(|o| o.transaction_shipments.into_iter().next())
            .ok_or_else(|| {
                AppError::CarrierApi(
                    "transactionShipments is missing or empty in the ship response".to_string(),
                )
            })?;
        let piece = shipment.piece_responses.into_iter().next().ok_or_else(|| {
            AppError::CarrierApi("pieceResponses is missing or empty in transactionShipments".to_string())
        })?;
        let document = piece.package_documents.into_iter().next().ok_or_else(|| {
            AppError::CarrierApi("packageDocuments is missing or empty in pieceResponses".to_string())
        })?;
        let encoded = document.encoded_label.ok_or_else(|| {
            AppError::CarrierApi("encodedLabel is missing in packageDocuments".to_string())
        })?;

        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| AppError::CarrierApi(format!("Failed to decode label: {}", e)))
    }
}

/// Flatten the carrier's nested rate reply into display-ready options
pub fn parse_rate_options(response: &RateResponse) -> Vec<RateOption> {
    let details = match &response.output {
        Some(output) => &output.rate_reply_details,
        None => return Vec::new(),
    };

    details
        .iter()
        .map(|detail| {
            let total_cost = detail
                .rated_shipment_details
                .iter()
                .filter_map(|d| d.total_net_charge)
                .last();

            let (saturday_delivery, commit_date) = match &detail.commit {
                Some(commit) => (
                    commit.saturday_delivery,
                    commit.date_detail.as_ref().and_then(|d| d.day_format.clone()),
                ),
                None => (false, None),
            };

            RateOption {
                service_type: detail
                    .service_type
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                service_name: detail
                    .service_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string())
                    .replace('\u{00ae}', ""),
                total_cost,
                saturday_delivery,
                estimated_delivery: commit_date.map(|raw| format_commit_date(&raw)),
            }
        })
        .collect()
}

/// Carrier commit dates arrive as ISO timestamps; render them for display
fn format_commit_date(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        Ok(parsed) => parsed.format("%Y-%m-%d %I:%M %p").to_string(),
        Err(_) => "Invalid date format".to_string(),
    }
}

fn party_payload(party: &ShippingParty, residential: bool) -> serde_json::Value {
    json!({
        "address": {
            "postalCode": party.zip,
            "countryCode": "US",
            "stateOrProvinceCode": party.state,
            "city": party.city,
            "streetLines": [party.street_address],
            "residential": residential
        },
        "contact": {
            "personName": party.name,
            "phoneNumber": party.phone
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_rate_options() {
        let response: RateResponse = serde_json::from_value(json!({
            "output": {
                "rateReplyDetails": [
                    {
                        "serviceType": "FEDEX_GROUND",
                        "serviceName": "FedEx Ground\u{00ae}",
                        "ratedShipmentDetails": [
                            { "totalNetCharge": 12.35 }
                        ],
                        "commit": {
                            "saturdayDelivery": false,
                            "dateDetail": { "dayFormat": "2024-12-10T17:00:00" }
                        }
                    },
                    {
                        "serviceType": "PRIORITY_OVERNIGHT",
                        "serviceName": "FedEx Priority Overnight\u{00ae}",
                        "ratedShipmentDetails": [
                            { "totalNetCharge": 84.20 }
                        ],
                        "commit": { "saturdayDelivery": true }
                    }
                ]
            }
        }))
        .unwrap();

        let options = parse_rate_options(&response);
        assert_eq!(options.len(), 2);

        assert_eq!(options[0].service_type, "FEDEX_GROUND");
        assert_eq!(options[0].service_name, "FedEx Ground");
        assert_eq!(
            options[0].total_cost.map(|c| c.round_dp(2)),
            Some(Decimal::from_str("12.35").unwrap())
        );
        assert!(!options[0].saturday_delivery);
        assert_eq!(
            options[0].estimated_delivery.as_deref(),
            Some("2024-12-10 05:00 PM")
        );

        assert!(options[1].saturday_delivery);
        assert_eq!(options[1].estimated_delivery, None);
    }

    #[test]
    fn test_parse_rate_options_empty_response() {
        let response: RateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parse_rate_options(&response).is_empty());
    }

    #[test]
    fn test_parse_rate_options_missing_fields() {
        let response: RateResponse = serde_json::from_value(json!({
            "output": { "rateReplyDetails": [ {} ] }
        }))
        .unwrap();

        let options = parse_rate_options(&response);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].service_type, "Unknown");
        assert_eq!(options[0].total_cost, None);
        assert!(!options[0].saturday_delivery);
    }

    #[test]
    fn test_format_commit_date_invalid() {
        assert_eq!(format_commit_date("not-a-date"), "Invalid date format");
    }
}

//! HTTP handlers for carrier rate quotes and shipping labels

use axum::{extract::State, http::header, response::IntoResponse, Json};
use rust_decimal::Decimal;

use shared::validation::validate_zip_code;

use crate::error::{AppError, AppResult};
use crate::external::carrier::{LabelInput, RateOption, RateQuoteInput};
use crate::AppState;

/// Get rate quotes for a package
pub async fn get_rates(
    State(state): State<AppState>,
    Json(input): Json<RateQuoteInput>,
) -> AppResult<Json<Vec<RateOption>>> {
    validate_zip(&input.sender_zip, "sender_zip")?;
    validate_zip(&input.recipient_zip, "recipient_zip")?;
    validate_package(input.weight_lb, input.length_in, input.width_in, input.height_in)?;

    let rates = state.carrier.get_rates(&input).await?;
    Ok(Json(rates))
}

/// Generate a shipping label and return it as a PDF attachment
pub async fn generate_label(
    State(state): State<AppState>,
    Json(input): Json<LabelInput>,
) -> AppResult<impl IntoResponse> {
    validate_zip(&input.shipper.zip, "shipper.zip")?;
    validate_zip(&input.recipient.zip, "recipient.zip")?;
    validate_package(input.weight_lb, input.length_in, input.width_in, input.height_in)?;

    let label = state.carrier.generate_label(&input).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shipping_label.pdf\"".to_string(),
            ),
        ],
        label,
    ))
}

fn validate_zip(zip: &str, field: &str) -> AppResult<()> {
    validate_zip_code(zip).map_err(|message| AppError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    })
}

fn validate_package(weight_lb: Decimal, length_in: u32, width_in: u32, height_in: u32) -> AppResult<()> {
    if weight_lb <= Decimal::ZERO {
        return Err(AppError::Validation {
            field: "weight_lb".to_string(),
            message: "Package weight must be positive".to_string(),
        });
    }
    if length_in < 1 || width_in < 1 || height_in < 1 {
        return Err(AppError::Validation {
            field: "dimensions".to_string(),
            message: "Package dimensions must be at least 1 inch".to_string(),
        });
    }
    Ok(())
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shared::{ImageDescriptor, ImageInput, ImageResponse, validate_name};
use crate::entity::dealer;
use crate::error::AppError;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealerRequest {
    pub name: String,
    pub link: String,
    pub location: String,
    pub phone_number: String,
    pub email: String,
    /// Defaults to one past the current maximum.
    #[serde(default)]
    pub order_num: Option<i32>,
    pub image: ImageInput,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealerRequest {
    pub name: String,
    pub link: String,
    pub location: String,
    pub phone_number: String,
    pub email: String,
    /// Must be the current value or one already held by another dealer,
    /// in which case the two dealers trade places.
    pub order_num: i32,
    pub image: ImageInput,
}

/// Trimmed dealer contact fields.
pub struct DealerFields {
    pub name: String,
    pub link: String,
    pub location: String,
    pub phone_number: String,
    pub email: String,
}

fn validate_fields(
    name: &str,
    link: &str,
    location: &str,
    phone_number: &str,
    email: &str,
) -> Result<DealerFields, AppError> {
    let name = validate_name(name, "Name")?;
    let email = email.trim();
    if !email.is_empty() && !email.contains('@') {
        return Err(AppError::Validation("Email must be a valid address".into()));
    }
    let phone_number = phone_number.trim();
    if phone_number.chars().count() > 32 {
        return Err(AppError::Validation(
            "Phone number must be at most 32 characters".into(),
        ));
    }
    Ok(DealerFields {
        name,
        link: link.trim().to_string(),
        location: location.trim().to_string(),
        phone_number: phone_number.to_string(),
        email: email.to_string(),
    })
}

fn validate_order_num(order_num: i32) -> Result<(), AppError> {
    if order_num < 1 {
        return Err(AppError::Validation("Order num must be >= 1".into()));
    }
    Ok(())
}

impl CreateDealerRequest {
    pub fn validate(&self) -> Result<(DealerFields, ImageDescriptor), AppError> {
        if let Some(order_num) = self.order_num {
            validate_order_num(order_num)?;
        }
        let fields = validate_fields(
            &self.name,
            &self.link,
            &self.location,
            &self.phone_number,
            &self.email,
        )?;
        Ok((fields, self.image.validate()?))
    }
}

impl UpdateDealerRequest {
    pub fn validate(&self) -> Result<(DealerFields, ImageDescriptor), AppError> {
        validate_order_num(self.order_num)?;
        let fields = validate_fields(
            &self.name,
            &self.link,
            &self.location,
            &self.phone_number,
            &self.email,
        )?;
        Ok((fields, self.image.validate()?))
    }
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DealerResponse {
    pub id: i32,
    pub name: String,
    pub link: String,
    pub location: String,
    pub phone_number: String,
    pub email: String,
    pub order_num: i32,
    pub image: Option<ImageResponse>,
    pub created_at: DateTime<Utc>,
}

impl DealerResponse {
    pub fn new(m: dealer::Model, image: Option<ImageResponse>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            link: m.link,
            location: m.location,
            phone_number: m.phone_number,
            email: m.email,
            order_num: m.order_num,
            image,
            created_at: m.created_at,
        }
    }
}

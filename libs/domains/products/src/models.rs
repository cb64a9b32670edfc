use rust_decimal::Decimal;
use sea_orm::entity::prelude::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Largest price a `NUMERIC(10,2)` column holds
const MAX_PRICE_CENTS: i64 = 99_999_999_99;

/// Product category
///
/// JSON bodies must carry the exact upper-case name; `FromStr` (used for
/// query strings) ignores case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Category {
    #[default]
    #[sea_orm(string_value = "UNKNOWN")]
    Unknown,
    #[sea_orm(string_value = "CLOTHS")]
    Cloths,
    #[sea_orm(string_value = "FOOD")]
    Food,
    #[sea_orm(string_value = "HOUSEWARES")]
    Housewares,
    #[sea_orm(string_value = "AUTOMOTIVE")]
    Automotive,
    #[sea_orm(string_value = "TOOLS")]
    Tools,
}

/// Product entity as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Exact decimal, serialized as a string
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub available: bool,
    pub category: Category,
}

/// Every mutable field of a product; the body of create and update requests
#[derive(Debug, Clone, PartialEq, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 250))]
    pub description: Option<String>,
    #[schema(value_type = String, example = "12.50")]
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    pub available: bool,
    /// Defaults to `UNKNOWN` when omitted
    pub category: Category,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("negative_price"));
    }
    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("price_precision"));
    }
    if *price > Decimal::new(MAX_PRICE_CENTS, 2) {
        return Err(ValidationError::new("price_range"));
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ProductInput {
    /// Build an input from an untyped request body.
    ///
    /// Unknown keys (including `id`) are ignored and a missing `category`
    /// falls back to `UNKNOWN`. Everything else is checked field by field so
    /// the error names the offending field.
    pub fn from_json(value: Value) -> crate::ProductResult<Self> {
        use crate::ProductError::{MalformedBody, Validation};

        let mut fields: Map<String, Value> = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(MalformedBody(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let name = match fields.remove("name") {
            Some(Value::String(name)) if !name.is_empty() => name,
            None | Some(Value::Null) | Some(Value::String(_)) => {
                return Err(Validation("name is required".to_string()));
            }
            Some(other) => {
                return Err(Validation(format!(
                    "name must be a string, got {}",
                    json_kind(&other)
                )));
            }
        };

        let description = match fields.remove("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(description)) => Some(description),
            Some(other) => {
                return Err(Validation(format!(
                    "description must be a string, got {}",
                    json_kind(&other)
                )));
            }
        };

        let price = match fields.remove("price") {
            Some(Value::String(raw)) => parse_price(&raw)?,
            Some(Value::Number(number)) => parse_price(&number.to_string())?,
            None | Some(Value::Null) => {
                return Err(Validation("price is required".to_string()));
            }
            Some(other) => {
                return Err(Validation(format!(
                    "price must be a decimal, got {}",
                    json_kind(&other)
                )));
            }
        };

        let available = match fields.remove("available") {
            Some(Value::Bool(available)) => available,
            None | Some(Value::Null) => {
                return Err(Validation("available is required".to_string()));
            }
            Some(other) => {
                return Err(Validation(format!(
                    "available must be a boolean, got {}",
                    json_kind(&other)
                )));
            }
        };

        let category = match fields.remove("category") {
            None | Some(Value::Null) => Category::default(),
            Some(value) => serde_json::from_value::<Category>(value.clone()).map_err(|_| {
                Validation(format!("invalid category {}", value))
            })?,
        };

        let mut input = Self {
            name,
            description,
            price,
            available,
            category,
        };
        input.validate()?;
        input.price = to_column_scale(input.price);

        Ok(input)
    }
}

fn parse_price(raw: &str) -> crate::ProductResult<Decimal> {
    Decimal::from_str(raw.trim())
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .map_err(|_| crate::ProductError::Validation(format!("invalid price '{}'", raw)))
}

/// Two decimal places and no negative zero, as a `NUMERIC(10,2)` column returns it
fn to_column_scale(price: Decimal) -> Decimal {
    let mut price = if price.is_zero() { Decimal::ZERO } else { price };
    price.rescale(2);
    price
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            available: product.available,
            category: product.category,
        }
    }
}

/// Query string of `GET /products`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Exact product name
    pub name: Option<String>,
    /// Category name, any case
    pub category: Option<String>,
    /// `true/false`, `yes/no` or `1/0`
    #[serde(alias = "availability")]
    pub available: Option<String>,
}

/// Which subset of the catalog to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    All,
    Name(String),
    Category(Category),
    Available(bool),
}

/// Only the first present parameter counts, in the order name, category, available.
impl TryFrom<ListParams> for ProductQuery {
    type Error = crate::ProductError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        if let Some(name) = params.name {
            return Ok(ProductQuery::Name(name));
        }

        if let Some(raw) = params.category {
            return Category::from_str(raw.trim())
                .map(ProductQuery::Category)
                .map_err(|_| crate::ProductError::InvalidQuery(format!("invalid category '{}'", raw)));
        }

        if let Some(raw) = params.available {
            return match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(ProductQuery::Available(true)),
                "false" | "no" | "0" => Ok(ProductQuery::Available(false)),
                _ => Err(crate::ProductError::InvalidQuery(format!(
                    "invalid availability '{}'",
                    raw
                ))),
            };
        }

        Ok(ProductQuery::All)
    }
}

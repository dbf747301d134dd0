use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A product as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Identifier assigned by the store
    pub id: i32,
    pub name: String,
    /// Price in its canonical string form (e.g. `"2.5"`)
    #[schema(example = "2.5")]
    pub price: String,
    pub description: Option<String>,
    /// Image URL or path
    pub image: Option<String>,
}

/// Price as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// Canonical string form stored in the `price` column.
    ///
    /// Numbers are formatted the shortest way that round-trips (`10.0` →
    /// `"10"`, `2.5` → `"2.5"`); strings are kept as written, minus
    /// surrounding whitespace. Either way the value must be a finite,
    /// non-negative number; negative zero becomes `"0"`.
    pub fn to_price_string(&self) -> Result<String, ValidationError> {
        let (value, text) = match self {
            PriceInput::Number(n) => (*n, n.to_string()),
            PriceInput::Text(s) => {
                let trimmed = s.trim();
                let parsed = trimmed
                    .parse::<f64>()
                    .map_err(|_| price_error("price must be a number"))?;
                (parsed, trimmed.to_string())
            }
        };

        if !value.is_finite() {
            return Err(price_error("price must be a finite number"));
        }
        if value < 0.0 {
            return Err(price_error("price must not be negative"));
        }
        if value == 0.0 && value.is_sign_negative() {
            return Ok("0".to_string());
        }

        Ok(text)
    }
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        PriceInput::Number(value)
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Text(value.to_string())
    }
}

fn price_error(message: &'static str) -> ValidationError {
    ValidationError::new("price").with_message(message.into())
}

fn validate_price(price: &PriceInput) -> Result<(), ValidationError> {
    price.to_price_string().map(|_| ())
}

/// Body of `POST /products` and `PUT /products/{id}`.
///
/// On PUT every field is replaced; an absent `description` or `image`
/// clears the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Pen")]
    pub name: String,
    #[validate(custom(function = "validate_price"))]
    pub price: PriceInput,
    #[serde(default)]
    #[schema(example = "Blue pen")]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2048))]
    #[schema(example = "pen.jpg")]
    pub image: Option<String>,
}

/// Body of `PATCH /products/{id}`.
///
/// Absent fields are left untouched. For `description` and `image` an
/// explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<PriceInput>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 2048))]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

/// Maps a present field to `Some`, so `null` becomes `Some(None)` while a
/// missing field stays `None` through `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Validated insert payload handed to repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Field-level changes handed to repositories; `None` leaves a column as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<String>,
    pub description: Option<Option<String>>,
    pub image: Option<Option<String>>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }

    /// Apply the changes to an in-memory product
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
    }
}

impl TryFrom<CreateProduct> for NewProduct {
    type Error = ValidationError;

    fn try_from(input: CreateProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            price: input.price.to_price_string()?,
            name: input.name,
            description: input.description,
            image: input.image,
        })
    }
}

/// Full replacement: every column is written.
impl TryFrom<CreateProduct> for ProductChanges {
    type Error = ValidationError;

    fn try_from(input: CreateProduct) -> Result<Self, Self::Error> {
        let product = NewProduct::try_from(input)?;
        Ok(Self {
            name: Some(product.name),
            price: Some(product.price),
            description: Some(product.description),
            image: Some(product.image),
        })
    }
}

impl TryFrom<UpdateProduct> for ProductChanges {
    type Error = ValidationError;

    fn try_from(input: UpdateProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            name: input.name,
            price: input.price.map(|p| p.to_price_string()).transpose()?,
            description: input.description,
            image: input.image,
        })
    }
}

/// `{data, message}` envelope returned by the write routes
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductMessage {
    pub data: Product,
    #[schema(example = "Create product successfully")]
    pub message: String,
}

impl ProductMessage {
    pub fn new(data: Product, message: &str) -> Self {
        Self {
            data,
            message: message.to_string(),
        }
    }
}

use serde::{Deserialize, Deserializer, Serialize};

// listing
//  ├── id
//  ├── listing_type          ["เช่า", "ขาย", ...]
//  ├── property_category
//  ├── property_details      (one-element join)
//  │    ├── project_name
//  │    ├── address
//  │    ├── usable_area
//  │    ├── bedrooms / bathrooms / parking_spaces
//  │    ├── house_condition
//  │    ├── highlight
//  │    ├── area_around
//  │    ├── facilities / project_facilities
//  │    ├── description
//  │    ├── price
//  │    ├── images
//  │    └── latitude / longitude
//  └── agent_info            (object or one-element join)
//       ├── company_name
//       ├── license_number
//       └── service_areas

/// Response wrapper every listing endpoint returns.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawListingRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub listing_type: Vec<String>,
    pub property_category: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub property_details: Vec<RawDetailRecord>,
    pub agent_info: Option<OneOrMany<RawAgentInfo>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDetailRecord {
    #[serde(default, deserialize_with = "optional_id_string")]
    pub property_id: Option<String>,
    pub project_name: Option<String>,
    pub address: Option<String>,
    pub usable_area: Option<f64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub parking_spaces: Option<i64>,
    pub house_condition: Option<String>,
    pub highlight: Option<String>,
    pub area_around: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub facilities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub project_facilities: Vec<String>,
    pub description: Option<String>,
    pub price: Option<PriceValue>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Body of `/api/properties/{id}`: a detail row, optionally carrying the
/// parent listing's tags and agent when the endpoint joins them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDetailPayload {
    #[serde(flatten)]
    pub detail: RawDetailRecord,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub listing_type: Vec<String>,
    pub property_category: Option<String>,
    pub agent_info: Option<OneOrMany<RawAgentInfo>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAgentInfo {
    pub company_name: Option<String>,
    pub license_number: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub service_areas: Vec<String>,
}

/// Prices arrive as numbers from the joined query and as strings from the
/// per-id endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PriceValue::Number(n) => Some(*n),
            PriceValue::Text(s) => s.trim().replace(',', "").parse().ok(),
        }
    }
}

/// A joined relation may come back as a single object or an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn first(&self) -> Option<&T> {
        match self {
            OneOrMany::One(item) => Some(item),
            OneOrMany::Many(items) => items.first(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// Table ids are integers in some deployments and uuids in others.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Int(i64),
    Text(String),
}

impl From<IdValue> for String {
    fn from(id: IdValue) -> Self {
        match id {
            IdValue::Int(n) => n.to_string(),
            IdValue::Text(s) => s,
        }
    }
}

pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    IdValue::deserialize(deserializer).map(String::from)
}

fn optional_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IdValue>::deserialize(deserializer)?.map(String::from))
}

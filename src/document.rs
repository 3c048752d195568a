// src/document.rs

//! Plain data types for the registry's create-document payload.
//!
//! The gateway accepts any `Serialize` value; these types are a convenience for
//! callers that build the payload by hand. Absent fields are left out of the JSON.

// dependencies
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "importRequest", default)]
    pub import_request: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_inn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_inn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_inn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "participantInn", default, skip_serializing_if = "Option::is_none")]
    pub participant_inn: Option<String>,
}

/// One product line of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_inn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_inn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tnved_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uit_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uitu_code: Option<String>,
}

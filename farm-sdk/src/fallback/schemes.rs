//! Offline copies of the two nationwide schemes the backend always knows

use serde_json::Map;

use crate::models::{SchemeInfo, SchemeRecord};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn scheme_records() -> Vec<SchemeRecord> {
    vec![
        SchemeRecord {
            id: "scheme_0".to_string(),
            name: "PM-KISAN".to_string(),
            code: "PM-KISAN".to_string(),
            description: "Income support scheme providing ₹6000 annually to farmer families".to_string(),
            eligibility: strings(&[
                "Small and marginal farmer families",
                "Land holding up to 2 hectares",
                "Indian citizenship required",
            ]),
            required_docs: strings(&[
                "Aadhaar Card",
                "Land ownership papers",
                "Bank account details",
                "Mobile number",
            ]),
            benefits: "₹6000 per year in three installments of ₹2000 each".to_string(),
            url: Some("https://pmkisan.gov.in/".to_string()),
            applicable_states: Vec::new(),
            applicable_crops: Vec::new(),
            max_land_size: Some(2.0),
            eligible_farmer_types: strings(&["small", "marginal"]),
            extra: Map::new(),
        },
        SchemeRecord {
            id: "scheme_1".to_string(),
            name: "Pradhan Mantri Fasal Bima Yojana (PMFBY)".to_string(),
            code: "PMFBY".to_string(),
            description: "Crop insurance scheme protecting farmers against crop loss".to_string(),
            eligibility: strings(&[
                "All farmers (landowner/tenant)",
                "Notified crops in notified areas",
                "Compulsory for loanee farmers",
            ]),
            required_docs: strings(&[
                "Application form",
                "Aadhaar/Voter ID",
                "Bank account details",
                "Land records",
                "Sowing certificate",
            ]),
            benefits: "Comprehensive risk cover against all non-preventable natural risks".to_string(),
            url: Some("https://pmfby.gov.in/".to_string()),
            applicable_states: Vec::new(),
            applicable_crops: strings(&["wheat", "rice", "cotton", "sugarcane", "oilseeds"]),
            max_land_size: None,
            eligible_farmer_types: strings(&["small", "marginal", "large"]),
            extra: Map::new(),
        },
    ]
}

impl From<SchemeRecord> for SchemeInfo {
    fn from(record: SchemeRecord) -> Self {
        SchemeInfo {
            name: record.name,
            code: record.code,
            description: record.description,
            eligibility: record.eligibility,
            required_docs: record.required_docs,
            benefits: record.benefits,
            application_url: record.url,
            extra: record.extra,
        }
    }
}

pub fn matched_schemes() -> Vec<SchemeInfo> {
    scheme_records().into_iter().map(SchemeInfo::from).collect()
}

pub const STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Puducherry",
];

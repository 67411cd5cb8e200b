use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields pulled out of raw bill text. Every value is a literal substring of
/// the text it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedBillData {
    pub dates: Vec<String>,
    pub medicines: Vec<String>,
    pub amounts: Vec<String>,
}

impl ExtractedBillData {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.medicines.is_empty() && self.amounts.is_empty()
    }
}

/// A stored bill with the text it was analyzed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub extracted_text: String,
    pub dates: Vec<String>,
    pub medicines: Vec<String>,
    pub amounts: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub fn new(file_name: Option<&str>, text: &str, extracted: ExtractedBillData) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.map(String::from),
            extracted_text: text.to_string(),
            dates: extracted.dates,
            medicines: extracted.medicines,
            amounts: extracted.amounts,
            created_at: Utc::now(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which listing block on a state page a company came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Recommended,
    Regular,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Recommended => "recommended",
            SectionType::Regular => "regular",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One company listing, as exported.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub state: String,
    pub section_type: SectionType,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub service_area: String,
    pub description: String,
}

impl CompanyRecord {
    /// Empty record for `section`; the state is filled in by the pipeline.
    pub fn new(section_type: SectionType) -> Self {
        Self {
            name: String::new(),
            state: String::new(),
            section_type,
            phone: String::new(),
            email: String::new(),
            website: String::new(),
            service_area: String::new(),
            description: String::new(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Export header, in column order.
pub const COLUMNS: [&str; 8] = [
    "name",
    "state",
    "section_type",
    "phone",
    "email",
    "website",
    "service_area",
    "description",
];

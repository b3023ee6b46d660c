use serde::{Deserialize, Serialize};

/// Role-specific profile document nested in a [`crate::UserRecord`].
///
/// Which fields are populated depends on the account role (founders
/// carry a company, investors a firm, builders a skills list). The
/// whole document is replaced on every successful fetch or update,
/// never merged field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileData {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company_name: Option<String>,
    pub firm_name: Option<String>,
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
}

//! Company employees as reported by the PBX

use serde::{Deserialize, Serialize};

/// Employee record from `GET /employees`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub employee_id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub full_number: String,
    pub short_number: String,
    pub group_name: String,
}

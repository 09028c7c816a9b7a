use serde::{Deserialize, Serialize};

use crate::drive::UpcomingDrive;

/// Response of `GET /api/dashboard/summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_students: i64,
    pub vaccinated_students: i64,
    /// Whole-number percentage, `0` when there are no students.
    pub vaccination_rate: i64,
    pub upcoming_drives: Vec<UpcomingDrive>,
}

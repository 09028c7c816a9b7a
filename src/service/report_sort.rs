//! Column sorting for report rows.

use std::cmp::Ordering;
use std::str::FromStr;
use vaxport_schema::ReportRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportColumn {
    StudentName,
    VaccinationStatus,
    StudentClass,
    DateOfBirth,
    VaccinationDriveTitle,
    VaccinationDate,
    VaccineName,
    VaccineQuantity,
    DriveClass,
}

impl ReportColumn {
    /// In the order of the report's columns.
    pub const ALL: [ReportColumn; 9] = [
        ReportColumn::StudentName,
        ReportColumn::VaccinationStatus,
        ReportColumn::StudentClass,
        ReportColumn::DateOfBirth,
        ReportColumn::VaccinationDriveTitle,
        ReportColumn::VaccinationDate,
        ReportColumn::VaccineName,
        ReportColumn::VaccineQuantity,
        ReportColumn::DriveClass,
    ];

    /// Field name in the JSON/CSV row.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportColumn::StudentName => "student_name",
            ReportColumn::VaccinationStatus => "vaccination_status",
            ReportColumn::StudentClass => "student_class",
            ReportColumn::DateOfBirth => "date_of_birth",
            ReportColumn::VaccinationDriveTitle => "vaccination_drive_title",
            ReportColumn::VaccinationDate => "vaccination_date",
            ReportColumn::VaccineName => "vaccine_name",
            ReportColumn::VaccineQuantity => "vaccine_quantity",
            ReportColumn::DriveClass => "drive_class",
        }
    }

    fn compare(self, a: &ReportRow, b: &ReportRow) -> Ordering {
        // `None` sorts before `Some` (Option's Ord).
        match self {
            ReportColumn::StudentName => a.student_name.cmp(&b.student_name),
            ReportColumn::VaccinationStatus => a.vaccination_status.cmp(&b.vaccination_status),
            ReportColumn::StudentClass => a.student_class.cmp(&b.student_class),
            ReportColumn::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
            ReportColumn::VaccinationDriveTitle => {
                a.vaccination_drive_title.cmp(&b.vaccination_drive_title)
            }
            ReportColumn::VaccinationDate => a.vaccination_date.cmp(&b.vaccination_date),
            ReportColumn::VaccineName => a.vaccine_name.cmp(&b.vaccine_name),
            ReportColumn::VaccineQuantity => a.vaccine_quantity.cmp(&b.vaccine_quantity),
            ReportColumn::DriveClass => a.drive_class.cmp(&b.drive_class),
        }
    }
}

impl FromStr for ReportColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown sort column: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSort {
    pub column: ReportColumn,
    pub order: SortOrder,
}

impl ReportSort {
    /// Stable: rows that compare equal keep their query order, in both directions.
    pub fn apply(self, rows: &mut [ReportRow]) {
        rows.sort_by(|a, b| {
            let ord = self.column.compare(a, b);
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }
}

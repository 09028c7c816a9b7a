use ahash::AHashMap;
use vaxport_schema::{StudentWithVaccinations, VaccinationRecord};

use crate::db::{DbStudent, DbVaccinationRecord};

/// Groups link rows by student id and attaches them to the students.
///
/// One pass over each input; students without links get an empty list. Link rows whose
/// student is not in `students` are dropped.
pub fn attach_vaccinations(
    students: Vec<DbStudent>,
    records: Vec<DbVaccinationRecord>,
) -> Vec<StudentWithVaccinations> {
    let mut by_student: AHashMap<i32, Vec<VaccinationRecord>> = AHashMap::new();
    for record in records {
        by_student
            .entry(record.student_id)
            .or_default()
            .push(record.into());
    }

    students
        .into_iter()
        .map(|s| StudentWithVaccinations {
            vaccinations: by_student.remove(&s.id).unwrap_or_default(),
            id: s.id,
            name: s.name,
            classname: s.classname,
            dob: s.dob,
            vaccination_status: s.vaccination_status,
        })
        .collect()
}

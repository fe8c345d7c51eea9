use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// A student enrolled in a class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A teacher in an institute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
}

/// Attendance mark for one student on one day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Excused,
}

pub const ALL_ATTENDANCE_STATUSES: &[AttendanceStatus] = &[
    AttendanceStatus::Present,
    AttendanceStatus::Absent,
    AttendanceStatus::Late,
    AttendanceStatus::Excused,
];

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }

    /// Parse a form value, defaulting to present.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "absent" => AttendanceStatus::Absent,
            "late" => AttendanceStatus::Late,
            "excused" => AttendanceStatus::Excused,
            _ => AttendanceStatus::Present,
        }
    }

    /// Whether the mark counts toward the attendance rate.
    pub fn counts_as_attended(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }
}

/// A stored attendance record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// ISO date (YYYY-MM-DD).
    pub date: String,
    pub status: AttendanceStatus,
}

/// One row of a batch attendance submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceMark {
    pub student_id: String,
    pub status: AttendanceStatus,
}

/// Batch attendance submission for a class on a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkAttendanceRequest {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub marks: Vec<AttendanceMark>,
}

/// Percentage of attended marks, rounded to one decimal. `None` for no records.
pub fn attendance_rate(records: &[AttendanceRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let attended = records
        .iter()
        .filter(|r| r.status.counts_as_attended())
        .count();
    let pct = attended as f64 * 100.0 / records.len() as f64;
    Some((pct * 10.0).round() / 10.0)
}

/// A homework assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Homework {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO date (YYYY-MM-DD).
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

/// Request DTO for creating homework.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateHomeworkRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 200, message = "Title is required"))
    )]
    pub title: String,
    pub description: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(equal = 10, message = "Due date must be YYYY-MM-DD"))
    )]
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

/// An exam scheduled for a class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exam {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub max_marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

/// A student's result for one exam.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamResult {
    pub exam_id: String,
    pub exam_title: String,
    pub marks: f64,
    pub max_marks: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl ExamResult {
    /// Score as a percentage of the maximum, or `None` if the maximum is zero.
    pub fn percentage(&self) -> Option<f64> {
        (self.max_marks > 0.0).then(|| self.marks * 100.0 / self.max_marks)
    }
}

/// Marks awarded to one student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeEntry {
    pub student_id: String,
    pub marks: f64,
}

/// Batch grade submission for an exam.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordGradesRequest {
    pub grades: Vec<GradeEntry>,
}

impl RecordGradesRequest {
    /// Student ids whose marks fall outside `0..=max_marks`.
    pub fn out_of_range(&self, max_marks: f64) -> Vec<String> {
        self.grades
            .iter()
            .filter(|g| !(0.0..=max_marks).contains(&g.marks) || g.marks.is_nan())
            .map(|g| g.student_id.clone())
            .collect()
    }
}

/// A live or recorded lecture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lecture {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
}

/// Aggregated counts for the institute dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InstituteSummary {
    #[serde(default)]
    pub students: i64,
    #[serde(default)]
    pub teachers: i64,
    #[serde(default)]
    pub classes: i64,
    /// Today's attendance rate, if any marks were recorded.
    #[serde(default)]
    pub attendance_rate: Option<f64>,
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

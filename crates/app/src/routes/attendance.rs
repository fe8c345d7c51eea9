use std::collections::HashMap;

use api::{ClassRef, RequestEpoch, StudentScope};
use dioxus::prelude::*;
use shared_types::{
    attendance_rate, AttendanceMark, AttendanceRecord, AttendanceStatus,
    MarkAttendanceRequest, Student, ALL_ATTENDANCE_STATUSES,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, CardGrid, Choice, ChoiceGroup,
    DataTable, DataTableCell, DataTableEmpty, DataTableRow, EmptyState, ErrorNotice, Input,
    PageHeader, SkeletonList, StatCard, ToastOptions,
};

use crate::format_helpers::{format_date, format_percent, today_iso};
use crate::list::{list_view, use_paged};
use crate::session::{use_api, use_selection};

fn status_label(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => "Present",
        AttendanceStatus::Absent => "Absent",
        AttendanceStatus::Late => "Late",
        AttendanceStatus::Excused => "Excused",
    }
}

fn status_badge(status: AttendanceStatus) -> BadgeVariant {
    match status {
        AttendanceStatus::Present => BadgeVariant::Success,
        AttendanceStatus::Absent => BadgeVariant::Destructive,
        AttendanceStatus::Late => BadgeVariant::Warning,
        AttendanceStatus::Excused => BadgeVariant::Secondary,
    }
}

fn status_choices() -> Vec<Choice> {
    ALL_ATTENDANCE_STATUSES
        .iter()
        .map(|s| Choice::new(s.as_str(), status_label(*s)))
        .collect()
}

/// Effective mark per student: an explicit change wins over what is already
/// recorded for the date, and unrecorded students default to present.
fn merge_marks(
    students: &[Student],
    recorded: &[AttendanceRecord],
    changes: &HashMap<String, AttendanceStatus>,
) -> Vec<AttendanceMark> {
    let recorded: HashMap<&str, AttendanceStatus> = recorded
        .iter()
        .map(|r| (r.student_id.as_str(), r.status))
        .collect();
    students
        .iter()
        .map(|s| AttendanceMark {
            student_id: s.id.clone(),
            status: changes
                .get(&s.id)
                .or_else(|| recorded.get(s.id.as_str()))
                .copied()
                .unwrap_or_default(),
        })
        .collect()
}

/// Roster with one status toggle per student for the chosen date.
#[component]
pub fn AttendanceMarking() -> Element {
    let api = use_api();
    let store = use_selection();
    let toast = use_toast();
    let mut date = use_signal(today_iso);
    let mut changes = use_signal(HashMap::<String, AttendanceStatus>::new);
    let mut saving = use_signal(|| false);
    let epoch = use_hook(RequestEpoch::new);

    use_drop({
        let epoch = epoch.clone();
        move || epoch.cancel()
    });

    let load_api = api.clone();
    let mut roster = use_resource(move || {
        let api = load_api.clone();
        let ids = store.class_ids();
        let day = date();
        async move {
            let (institute_id, class_id) =
                ids.ok_or_else(|| shared_types::AppError::bad_request("No class selected"))?;
            let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
            let students = api.class_roster(class).await?;
            let recorded = api.class_attendance(class, &day).await?;
            Ok::<_, shared_types::AppError>((students, recorded))
        }
    });

    let submit_epoch = epoch.clone();
    let submit = move |_: MouseEvent| {
        let Some((students, recorded)) = roster.read().as_ref().and_then(|r| r.as_ref().ok()).cloned() else {
            return;
        };
        let Some((institute_id, class_id)) = store.class_ids() else {
            return;
        };
        let request = MarkAttendanceRequest {
            date: date(),
            subject_id: store.selection().subject_id().map(str::to_string),
            marks: merge_marks(&students, &recorded, &changes.read()),
        };
        let api = api.clone();
        let ticket = submit_epoch.begin();
        saving.set(true);
        spawn(async move {
            let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
            let result = api.mark_attendance(class, &request).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    toast.success(
                        format!("Attendance saved for {}", format_date(&request.date)),
                        ToastOptions::new(),
                    );
                    changes.write().clear();
                    roster.restart();
                }
                Err(e) => {
                    tracing::warn!(kind = %e.kind, error = %e.message, "attendance submit failed");
                    toast.error(e.friendly_message(), ToastOptions::new());
                }
            }
        });
    };

    let body = match &*roster.read() {
        None => rsx! { SkeletonList {} },
        Some(Err(e)) => rsx! {
            ErrorNotice { message: e.friendly_message(), on_retry: move |_| roster.restart() }
        },
        Some(Ok((students, _))) if students.is_empty() => rsx! {
            EmptyState { message: "No students in this class." }
        },
        Some(Ok((students, recorded))) => {
            let marks = merge_marks(students, recorded, &changes.read());
            let rows: Vec<(Student, AttendanceStatus)> = students
                .iter()
                .cloned()
                .zip(marks.into_iter().map(|m| m.status))
                .collect();
            rsx! {
                DataTable { columns: vec!["Student".to_string(), "Status".to_string()],
                    for (student, status) in rows {
                        DataTableRow { key: "{student.id}",
                            DataTableCell { "{student.name}" }
                            DataTableCell {
                                ChoiceGroup {
                                    options: status_choices(),
                                    value: status.as_str().to_string(),
                                    label: format!("Attendance for {}", student.name),
                                    disabled: saving(),
                                    onchange: {
                                        let id = student.id.clone();
                                        move |value: String| {
                                            changes
                                                .write()
                                                .insert(id.clone(), AttendanceStatus::from_str_or_default(&value));
                                        }
                                    },
                                }
                            }
                        }
                    }
                }
                div { class: "form-actions",
                    Button {
                        loading: saving(),
                        loading_label: "Saving...",
                        onclick: submit,
                        "Save attendance"
                    }
                }
            }
        }
    };

    rsx! {
        PageHeader { title: "Mark attendance", subtitle: Some(store.selection().breadcrumb()) }
        div { class: "toolbar",
            Input {
                label: "Date",
                input_type: "date",
                value: date(),
                on_input: move |e: FormEvent| {
                    epoch.cancel();
                    saving.set(false);
                    changes.write().clear();
                    date.set(e.value());
                },
            }
        }
        {body}
    }
}

/// Marks a student present by the code printed on their ID card.
#[component]
pub fn QrAttendance() -> Element {
    let api = use_api();
    let store = use_selection();
    let toast = use_toast();
    let mut code = use_signal(String::new);
    let mut marked = use_signal(Vec::<String>::new);
    let mut busy = use_signal(|| false);
    let epoch = use_hook(RequestEpoch::new);

    use_drop({
        let epoch = epoch.clone();
        move || epoch.cancel()
    });

    let roster_api = api.clone();
    let roster = use_resource(move || {
        let api = roster_api.clone();
        let ids = store.class_ids();
        async move {
            let (institute_id, class_id) =
                ids.ok_or_else(|| shared_types::AppError::bad_request("No class selected"))?;
            let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
            api.class_roster(class).await
        }
    });

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let scanned = code().trim().to_string();
        if scanned.is_empty() {
            return;
        }
        let students = match &*roster.read() {
            Some(Ok(students)) => students.clone(),
            _ => return,
        };
        let Some(student) = find_by_code(&students, &scanned).cloned() else {
            toast.error(format!("No student with code {scanned} in this class"), ToastOptions::new());
            return;
        };
        let Some((institute_id, class_id)) = store.class_ids() else {
            return;
        };
        let request = MarkAttendanceRequest {
            date: today_iso(),
            subject_id: store.selection().subject_id().map(str::to_string),
            marks: vec![AttendanceMark {
                student_id: student.id.clone(),
                status: AttendanceStatus::Present,
            }],
        };
        let api = api.clone();
        let ticket = epoch.begin();
        busy.set(true);
        spawn(async move {
            let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
            let result = api.mark_attendance(class, &request).await;
            let Some(result) = ticket.accept(result) else {
                return;
            };
            busy.set(false);
            match result {
                Ok(()) => {
                    tracing::info!(student_id = %student.id, "marked present by code");
                    marked.write().insert(0, student.name.clone());
                    code.set(String::new());
                }
                Err(e) => toast.error(e.friendly_message(), ToastOptions::new()),
            }
        });
    };

    let roster_state = roster.read().clone();
    let marked_names = marked.read().clone();

    rsx! {
        PageHeader {
            title: "QR attendance",
            subtitle: Some("Scan or type a student code to mark them present today.".to_string()),
        }
        match roster_state {
            None => rsx! { SkeletonList { rows: 2 } },
            Some(Err(e)) => rsx! { EmptyState { message: e.friendly_message() } },
            Some(Ok(_)) => rsx! {
                form { class: "toolbar", onsubmit: submit,
                    Input {
                        label: "Student code",
                        value: code(),
                        placeholder: "e.g. STU-0042",
                        disabled: busy(),
                        on_input: move |e: FormEvent| code.set(e.value()),
                    }
                    Button { submit: true, loading: busy(), "Mark present" }
                }
            },
        }
        if !marked_names.is_empty() {
            div { class: "qr-result",
                h3 { "Marked present" }
                ul {
                    for (i, name) in marked_names.into_iter().enumerate() {
                        li { key: "{i}", "{name}" }
                    }
                }
            }
        }
    }
}

fn find_by_code<'a>(students: &'a [Student], code: &str) -> Option<&'a Student> {
    students.iter().find(|s| {
        s.student_code
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(code))
            || s.id == code
    })
}

/// Attendance of the selected class on one date.
#[component]
pub fn ClassAttendance() -> Element {
    let api = use_api();
    let store = use_selection();
    let mut date = use_signal(today_iso);

    let mut records = use_resource(move || {
        let api = api.clone();
        let ids = store.class_ids();
        let day = date();
        async move {
            let (institute_id, class_id) =
                ids.ok_or_else(|| shared_types::AppError::bad_request("No class selected"))?;
            let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
            api.class_attendance(class, &day).await
        }
    });

    let state = records.read().clone();

    rsx! {
        PageHeader { title: "Class attendance", subtitle: Some(store.selection().breadcrumb()) }
        div { class: "toolbar",
            Input {
                label: "Date",
                input_type: "date",
                value: date(),
                on_input: move |e: FormEvent| date.set(e.value()),
            }
            Button {
                variant: ButtonVariant::Outline,
                onclick: move |_| date.set(today_iso()),
                "Today"
            }
        }
        match state {
            None => rsx! { SkeletonList {} },
            Some(Err(e)) => rsx! {
                ErrorNotice { message: e.friendly_message(), on_retry: move |_| records.restart() }
            },
            Some(Ok(list)) => rsx! {
                CardGrid {
                    StatCard { label: "Recorded", value: list.len().to_string() }
                    StatCard { label: "Attendance", value: format_percent(attendance_rate(&list)) }
                }
                DataTable { columns: vec!["Student".to_string(), "Status".to_string()],
                    if list.is_empty() {
                        DataTableEmpty { colspan: 2, message: "No attendance recorded for this date." }
                    }
                    for record in list {
                        DataTableRow { key: "{record.student_id}",
                            DataTableCell {
                                {record.student_name.clone().unwrap_or_else(|| record.student_id.clone())}
                            }
                            DataTableCell {
                                Badge { variant: status_badge(record.status), "{status_label(record.status)}" }
                            }
                        }
                    }
                }
            },
        }
    }
}

/// A student's own attendance, or a parent's view of the selected child.
#[component]
pub fn StudentAttendance() -> Element {
    let api = use_api();
    let store = use_selection();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let selection = store.selection();
        let child = selection.child_id().map(str::to_string);
        let institute = selection.institute_id().map(str::to_string);
        async move {
            let institute =
                institute.ok_or_else(|| shared_types::AppError::bad_request("No institute selected"))?;
            let scope = match &child {
                Some(id) => StudentScope::Child(id),
                None => StudentScope::Me,
            };
            api.student_attendance(scope, &institute, api.page(page)).await
        }
    });

    let title = match store.selection().child() {
        Some(child) => format!("Attendance: {}", child.name),
        None => "My attendance".to_string(),
    };

    rsx! {
        PageHeader { title, subtitle: store.selection().institute().map(|i| i.name.clone()) }
        {list_view(resource, page, "No attendance has been recorded yet.", |records| rsx! {
            CardGrid {
                StatCard {
                    label: "Attendance on this page",
                    value: format_percent(attendance_rate(&records)),
                }
            }
            DataTable { columns: vec!["Date".to_string(), "Status".to_string()],
                for record in records {
                    DataTableRow { key: "{record.date}",
                        DataTableCell { "{format_date(&record.date)}" }
                        DataTableCell {
                            Badge { variant: status_badge(record.status), "{status_label(record.status)}" }
                        }
                    }
                }
            }
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn student(id: &str, code: Option<&str>) -> Student {
        Student {
            id: id.into(),
            name: format!("Student {id}"),
            student_code: code.map(String::from),
            email: None,
        }
    }

    fn record(id: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            student_id: id.into(),
            student_name: None,
            date: "2026-03-02".into(),
            status,
        }
    }

    #[test]
    fn changes_override_recorded_marks() {
        let students = [student("s1", None), student("s2", None), student("s3", None)];
        let recorded = [record("s1", AttendanceStatus::Absent), record("s2", AttendanceStatus::Late)];
        let changes = HashMap::from([("s2".to_string(), AttendanceStatus::Excused)]);

        let statuses: Vec<AttendanceStatus> = merge_marks(&students, &recorded, &changes)
            .into_iter()
            .map(|m| m.status)
            .collect();
        assert_eq!(
            statuses,
            vec![AttendanceStatus::Absent, AttendanceStatus::Excused, AttendanceStatus::Present]
        );
    }

    #[test]
    fn code_lookup_ignores_case_and_accepts_ids() {
        let students = [student("s1", Some("STU-1")), student("s2", None)];
        assert_eq!(find_by_code(&students, "stu-1").map(|s| s.id.as_str()), Some("s1"));
        assert_eq!(find_by_code(&students, "s2").map(|s| s.id.as_str()), Some("s2"));
        assert!(find_by_code(&students, "STU-9").is_none());
    }

    #[test]
    fn every_status_is_offered() {
        let values: Vec<String> = status_choices().into_iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["present", "absent", "late", "excused"]);
    }
}

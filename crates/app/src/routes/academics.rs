use std::collections::HashMap;

use api::{ClassRef, RequestEpoch, StudentScope};
use dioxus::prelude::*;
use shared_types::{
    AppError, CreateHomeworkRequest, Exam, GradeEntry, ListQuery, RecordGradesRequest, Role,
    Selection, Student, MAX_PAGE_SIZE,
};
use shared_ui::{
    use_toast, AccessDenied, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent,
    CardHeader, CardTitle, DataTable, DataTableCell, DataTableRow, EmptyState, ErrorNotice, Input,
    PageHeader, SkeletonList, ToastOptions,
};
use validator::Validate;

use crate::format_helpers::{format_date, format_datetime, format_marks, format_percent, is_overdue, today_iso};
use crate::list::{list_view, use_paged};
use crate::session::{use_api, use_auth, use_selection};

/// Whose records a screen reads: a class (staff), or one student's own
/// enrollment (students and parents).
#[derive(Debug, Clone, PartialEq)]
enum Scope {
    Class {
        institute_id: String,
        class_id: String,
        subject_id: Option<String>,
    },
    Student {
        institute_id: String,
        child_id: Option<String>,
    },
}

impl Scope {
    fn from_selection(role: Option<Role>, selection: &Selection) -> Result<Self, AppError> {
        let institute_id = selection
            .institute_id()
            .ok_or_else(|| AppError::bad_request("No institute selected"))?
            .to_string();
        match role {
            Some(Role::Student) | Some(Role::Parent) => Ok(Scope::Student {
                institute_id,
                child_id: selection.child_id().map(str::to_string),
            }),
            _ => {
                let class_id = selection
                    .class_id()
                    .ok_or_else(|| AppError::bad_request("No class selected"))?
                    .to_string();
                Ok(Scope::Class {
                    institute_id,
                    class_id,
                    subject_id: selection.subject_id().map(str::to_string),
                })
            }
        }
    }
}

fn student_scope(child_id: &Option<String>) -> StudentScope<'_> {
    match child_id {
        Some(id) => StudentScope::Child(id),
        None => StudentScope::Me,
    }
}

fn subtitle(selection: &Selection) -> Option<String> {
    Some(selection.breadcrumb()).filter(|b| !b.is_empty())
}

/// Homework list; staff can also assign new homework to the class.
#[component]
pub fn Homework() -> Element {
    let api = use_api();
    let auth = use_auth();
    let store = use_selection();
    let mut show_form = use_signal(|| false);

    let (page, mut resource) = use_paged(move |page| {
        let api = api.clone();
        let scope = Scope::from_selection(auth.role(), &store.selection());
        async move {
            let list = api.page(page);
            match scope? {
                Scope::Class { institute_id, class_id, subject_id } => {
                    let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
                    api.list_homework(class, subject_id.as_deref(), list).await
                }
                Scope::Student { institute_id, child_id } => {
                    api.student_homework(student_scope(&child_id), &institute_id, list).await
                }
            }
        }
    });

    let can_manage = auth.role().is_some_and(|r| r.can_manage());
    let today = today_iso();

    rsx! {
        PageHeader { title: "Homework", subtitle: subtitle(&store.selection()),
            if can_manage {
                Button {
                    variant: if show_form() { ButtonVariant::Outline } else { ButtonVariant::Primary },
                    onclick: move |_| show_form.set(!show_form()),
                    if show_form() { "Cancel" } else { "New homework" }
                }
            }
        }
        if show_form() {
            if can_manage {
                HomeworkForm {
                    on_created: move |_| {
                        show_form.set(false);
                        resource.restart();
                    },
                }
            } else {
                AccessDenied {}
            }
        }
        {list_view(resource, page, "No homework has been set.", move |items| rsx! {
            DataTable { columns: vec!["Title".to_string(), "Due".to_string(), "Details".to_string()],
                for hw in items {
                    DataTableRow { key: "{hw.id}",
                        DataTableCell { "{hw.title}" }
                        DataTableCell {
                            span {
                                class: if is_overdue(&hw.due_date, &today) { "overdue" } else { "" },
                                "{format_date(&hw.due_date)}"
                            }
                        }
                        DataTableCell { span { class: "text-muted", "{hw.description}" } }
                    }
                }
            }
        })}
    }
}

#[component]
fn HomeworkForm(on_created: EventHandler<()>) -> Element {
    let api = use_api();
    let store = use_selection();
    let toast = use_toast();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut due_date = use_signal(today_iso);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = CreateHomeworkRequest {
            title: title().trim().to_string(),
            description: description().trim().to_string(),
            due_date: due_date(),
            subject_id: store.selection().subject_id().map(str::to_string),
        };
        if let Err(errors) = request.validate() {
            field_errors.set(AppError::from_validation(&errors).field_errors);
            return;
        }
        let Some((institute_id, class_id)) = store.class_ids() else {
            return;
        };
        field_errors.set(HashMap::new());
        saving.set(true);
        let api = api.clone();
        spawn(async move {
            let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
            let result = api.create_homework(class, &request).await;
            saving.set(false);
            match result {
                Ok(created) => {
                    tracing::info!(homework_id = %created.id, "homework created");
                    toast.success(format!("\"{}\" assigned", created.title), ToastOptions::new());
                    on_created.call(());
                }
                Err(e) if !e.field_errors.is_empty() => field_errors.set(e.field_errors),
                Err(e) => toast.error(e.friendly_message(), ToastOptions::new()),
            }
        });
    };

    rsx! {
        Card {
            CardHeader { CardTitle { "New homework" } }
            CardContent {
                form { class: "form-grid", onsubmit: submit,
                    Input {
                        label: "Title",
                        value: title(),
                        error: field_errors.read().get("title").cloned(),
                        on_input: move |e: FormEvent| title.set(e.value()),
                    }
                    Input {
                        label: "Description",
                        value: description(),
                        on_input: move |e: FormEvent| description.set(e.value()),
                    }
                    Input {
                        label: "Due date",
                        input_type: "date",
                        value: due_date(),
                        error: field_errors.read().get("due_date").cloned(),
                        on_input: move |e: FormEvent| due_date.set(e.value()),
                    }
                    div { class: "form-actions",
                        Button { submit: true, loading: saving(), loading_label: "Saving...", "Assign" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Exams() -> Element {
    let api = use_api();
    let auth = use_auth();
    let store = use_selection();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let scope = Scope::from_selection(auth.role(), &store.selection());
        async move {
            let list = api.page(page);
            match scope? {
                Scope::Class { institute_id, class_id, subject_id } => {
                    let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
                    api.list_exams(class, subject_id.as_deref(), list).await
                }
                Scope::Student { institute_id, child_id } => {
                    api.student_exams(student_scope(&child_id), &institute_id, list).await
                }
            }
        }
    });

    rsx! {
        PageHeader { title: "Exams", subtitle: subtitle(&store.selection()) }
        {list_view(resource, page, "No exams are scheduled.", |exams| rsx! {
            DataTable { columns: vec!["Exam".to_string(), "Date".to_string(), "Max marks".to_string()],
                for exam in exams {
                    DataTableRow { key: "{exam.id}",
                        DataTableCell { "{exam.title}" }
                        DataTableCell {
                            {exam.date.as_deref().map(format_date).unwrap_or_else(|| "TBA".to_string())}
                        }
                        DataTableCell { "{format_marks(exam.max_marks)}" }
                    }
                }
            }
        })}
    }
}

/// Exam results of the signed-in student or the selected child.
#[component]
pub fn Results() -> Element {
    let api = use_api();
    let store = use_selection();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let selection = store.selection();
        let institute = selection.institute_id().map(str::to_string);
        let child = selection.child_id().map(str::to_string);
        async move {
            let institute = institute.ok_or_else(|| AppError::bad_request("No institute selected"))?;
            api.student_results(student_scope(&child), &institute, api.page(page)).await
        }
    });

    let title = match store.selection().child() {
        Some(child) => format!("Results: {}", child.name),
        None => "My results".to_string(),
    };

    rsx! {
        PageHeader { title, subtitle: subtitle(&store.selection()) }
        {list_view(resource, page, "No results have been published yet.", |results| rsx! {
            DataTable {
                columns: vec!["Exam".to_string(), "Marks".to_string(), "Percentage".to_string(), "Grade".to_string()],
                for result in results {
                    DataTableRow { key: "{result.exam_id}",
                        DataTableCell { "{result.exam_title}" }
                        DataTableCell { "{format_marks(result.marks)} / {format_marks(result.max_marks)}" }
                        DataTableCell { "{format_percent(result.percentage())}" }
                        DataTableCell {
                            if let Some(grade) = &result.grade {
                                Badge { variant: BadgeVariant::Secondary, "{grade}" }
                            }
                        }
                    }
                }
            }
        })}
    }
}

/// Lectures of the selected subject (staff) or of the student's institute.
#[component]
pub fn Lectures() -> Element {
    let api = use_api();
    let auth = use_auth();
    let store = use_selection();

    let (page, resource) = use_paged(move |page| {
        let api = api.clone();
        let scope = Scope::from_selection(auth.role(), &store.selection());
        async move {
            let list = api.page(page);
            match scope? {
                Scope::Class { institute_id, class_id, subject_id } => {
                    let subject_id =
                        subject_id.ok_or_else(|| AppError::bad_request("No subject selected"))?;
                    let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
                    api.list_lectures(class, &subject_id, list).await
                }
                Scope::Student { institute_id, child_id } => {
                    api.student_lectures(student_scope(&child_id), &institute_id, list).await
                }
            }
        }
    });

    rsx! {
        PageHeader { title: "Lectures", subtitle: subtitle(&store.selection()) }
        {list_view(resource, page, "No lectures are scheduled.", |lectures| rsx! {
            DataTable { columns: vec!["Lecture".to_string(), "Starts".to_string(), String::new()],
                for lecture in lectures {
                    DataTableRow { key: "{lecture.id}",
                        DataTableCell { "{lecture.title}" }
                        DataTableCell {
                            {lecture.starts_at.as_deref().map(format_datetime).unwrap_or_default()}
                        }
                        DataTableCell {
                            if let Some(url) = &lecture.meeting_url {
                                a { href: "{url}", target: "_blank", rel: "noopener", "Join" }
                                " "
                            }
                            if let Some(url) = &lecture.recording_url {
                                a { href: "{url}", target: "_blank", rel: "noopener", "Recording" }
                            }
                        }
                    }
                }
            }
        })}
    }
}

/// Parse the marks typed for each student. Blank entries are skipped;
/// anything unparsable is reported against the student.
fn parse_grades(
    students: &[Student],
    typed: &HashMap<String, String>,
) -> Result<RecordGradesRequest, HashMap<String, String>> {
    let mut grades = Vec::new();
    let mut errors = HashMap::new();
    for student in students {
        let Some(raw) = typed.get(&student.id).map(|s| s.trim()).filter(|s| !s.is_empty()) else {
            continue;
        };
        match raw.parse::<f64>() {
            Ok(marks) if marks.is_finite() => grades.push(GradeEntry {
                student_id: student.id.clone(),
                marks,
            }),
            _ => {
                errors.insert(student.id.clone(), "Enter a number".to_string());
            }
        }
    }
    if errors.is_empty() {
        Ok(RecordGradesRequest { grades })
    } else {
        Err(errors)
    }
}

/// Record marks for one exam of the selected class.
#[component]
pub fn Grading() -> Element {
    let api = use_api();
    let auth = use_auth();
    let store = use_selection();
    let toast = use_toast();
    let mut exam_id = use_signal(|| Option::<String>::None);
    let mut typed = use_signal(HashMap::<String, String>::new);
    let mut errors = use_signal(HashMap::<String, String>::new);
    let mut saving = use_signal(|| false);
    let epoch = use_hook(RequestEpoch::new);

    use_drop({
        let epoch = epoch.clone();
        move || epoch.cancel()
    });

    let load_api = api.clone();
    let mut data = use_resource(move || {
        let api = load_api.clone();
        let ids = store.class_ids();
        let subject_id = store.selection().subject_id().map(str::to_string);
        async move {
            let (institute_id, class_id) =
                ids.ok_or_else(|| AppError::bad_request("No class selected"))?;
            let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
            let all = ListQuery::new(Some(1), Some(MAX_PAGE_SIZE));
            let exams = api.list_exams(class, subject_id.as_deref(), all).await?.data;
            let students = api.class_roster(class).await?;
            Ok::<_, AppError>((exams, students))
        }
    });

    if !auth.role().is_some_and(|r| r.can_manage()) {
        return rsx! {
            PageHeader { title: "Grading" }
            AccessDenied {}
        };
    }

    let state = data.read().clone();
    let body = match state {
        None => rsx! { SkeletonList {} },
        Some(Err(e)) => rsx! {
            ErrorNotice { message: e.friendly_message(), on_retry: move |_| data.restart() }
        },
        Some(Ok((exams, _))) if exams.is_empty() => rsx! {
            EmptyState { message: "Create an exam before recording marks." }
        },
        Some(Ok((exams, students))) => {
            let selected: Option<Exam> = exam_id
                .read()
                .as_ref()
                .and_then(|id| exams.iter().find(|e| &e.id == id))
                .cloned();
            let roster = students.clone();
            let target = selected.clone();
            let save = move |_: MouseEvent| {
                let Some(exam) = target.clone() else {
                    return;
                };
                let request = match parse_grades(&roster, &typed.read()) {
                    Ok(request) => request,
                    Err(found) => {
                        errors.set(found);
                        return;
                    }
                };
                if request.grades.is_empty() {
                    toast.error("Enter marks for at least one student".to_string(), ToastOptions::new());
                    return;
                }
                let Some((institute_id, class_id)) = store.class_ids() else {
                    return;
                };
                errors.set(HashMap::new());
                saving.set(true);
                let api = api.clone();
                let ticket = epoch.begin();
                spawn(async move {
                    let class = ClassRef { institute_id: &institute_id, class_id: &class_id };
                    let result = api.record_grades(class, &exam, &request).await;
                    let Some(result) = ticket.accept(result) else {
                        return;
                    };
                    saving.set(false);
                    match result {
                        Ok(()) => {
                            tracing::info!(exam_id = %exam.id, count = request.grades.len(), "grades recorded");
                            toast.success(format!("Marks saved for {}", exam.title), ToastOptions::new());
                        }
                        Err(e) if !e.field_errors.is_empty() => errors.set(e.field_errors),
                        Err(e) => toast.error(e.friendly_message(), ToastOptions::new()),
                    }
                });
            };

            rsx! {
                div { class: "toolbar",
                    label { r#for: "grading-exam", "Exam" }
                    select {
                        id: "grading-exam",
                        onchange: move |e: FormEvent| {
                            let value = e.value();
                            typed.write().clear();
                            errors.write().clear();
                            exam_id.set(Some(value).filter(|v| !v.is_empty()));
                        },
                        option { value: "", selected: selected.is_none(), "Choose an exam" }
                        for exam in exams.iter() {
                            option {
                                key: "{exam.id}",
                                value: "{exam.id}",
                                selected: selected.as_ref().is_some_and(|s| s.id == exam.id),
                                "{exam.title}"
                            }
                        }
                    }
                }
                if let Some(exam) = selected.clone() {
                    DataTable { columns: vec!["Student".to_string(), format!("Marks (out of {})", format_marks(exam.max_marks))],
                        for student in students {
                            DataTableRow { key: "{student.id}",
                                DataTableCell { "{student.name}" }
                                DataTableCell {
                                    Input {
                                        class: "marks-input",
                                        input_type: "number",
                                        value: typed.read().get(&student.id).cloned().unwrap_or_default(),
                                        error: errors.read().get(&student.id).cloned(),
                                        disabled: saving(),
                                        on_input: {
                                            let id = student.id.clone();
                                            move |e: FormEvent| {
                                                typed.write().insert(id.clone(), e.value());
                                            }
                                        },
                                    }
                                }
                            }
                        }
                    }
                    div { class: "form-actions",
                        Button { loading: saving(), loading_label: "Saving...", onclick: save, "Save marks" }
                    }
                }
            }
        }
    };

    rsx! {
        PageHeader { title: "Grading", subtitle: subtitle(&store.selection()) }
        {body}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{Class, Institute};

    fn institute(id: &str) -> Institute {
        Institute { id: id.into(), name: format!("Institute {id}"), code: None, logo_url: None }
    }

    fn class(id: &str) -> Class {
        Class { id: id.into(), name: format!("Class {id}"), grade: None, section: None }
    }

    fn student(id: &str) -> Student {
        Student {
            id: id.into(),
            name: id.to_uppercase(),
            student_code: None,
            email: None,
        }
    }

    #[test]
    fn blank_marks_are_skipped() {
        let students = [student("a"), student("b"), student("c")];
        let typed = HashMap::from([
            ("a".to_string(), " 12.5 ".to_string()),
            ("b".to_string(), "   ".to_string()),
        ]);
        let request = parse_grades(&students, &typed).unwrap();
        assert_eq!(
            request.grades,
            vec![GradeEntry { student_id: "a".into(), marks: 12.5 }]
        );
    }

    #[test]
    fn unparsable_marks_are_reported_per_student() {
        let students = [student("a"), student("b")];
        let typed = HashMap::from([
            ("a".to_string(), "ten".to_string()),
            ("b".to_string(), "NaN".to_string()),
        ]);
        let errors = parse_grades(&students, &typed).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["a"], "Enter a number");
    }

    #[test]
    fn students_and_parents_read_their_own_records() {
        let mut selection = Selection::new();
        selection.select_institute(institute("i1"));
        let scope = Scope::from_selection(Some(Role::Student), &selection).unwrap();
        assert_eq!(
            scope,
            Scope::Student { institute_id: "i1".into(), child_id: None }
        );
    }

    #[test]
    fn staff_need_a_class() {
        let mut selection = Selection::new();
        selection.select_institute(institute("i1"));
        assert!(Scope::from_selection(Some(Role::Teacher), &selection).is_err());

        selection.select_class(class("c1")).unwrap();
        let scope = Scope::from_selection(Some(Role::Teacher), &selection).unwrap();
        assert_eq!(
            scope,
            Scope::Class { institute_id: "i1".into(), class_id: "c1".into(), subject_id: None }
        );
    }
}

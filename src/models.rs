//! Frontend Models
//!
//! Data structures matching the REST backend (camelCase JSON, `_id` keys).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Entities addressed by backend id
pub trait Identified {
    fn id(&self) -> &str;
}

/// Replace the entry with the same id, or append it when missing
pub fn upsert_by_id<T: Identified>(list: &mut Vec<T>, entry: T) {
    match list.iter_mut().find(|existing| existing.id() == entry.id()) {
        Some(existing) => *existing = entry,
        None => list.push(entry),
    }
}

pub fn find_by_id<'a, T: Identified>(list: &'a [T], id: &str) -> Option<&'a T> {
    list.iter().find(|entry| entry.id() == id)
}

/// Remove the entry with the given id; returns whether anything was removed
pub fn remove_by_id<T: Identified>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| entry.id() != id);
    list.len() != before
}

/// Unparseable option value coming from a form control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown option `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// Declares a lowercase wire enum with form option metadata
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($value:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// (wire value, label) pairs in display order
            pub const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($value, $label)),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)+
                    other => Err(UnknownVariant(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Story / task / notification priority
    Priority {
        Low => ("low", "Low"),
        Medium => ("medium", "Medium"),
        High => ("high", "High"),
    }
);

wire_enum!(
    /// Workflow status shared by stories and tasks (one board lane each)
    WorkStatus {
        Todo => ("todo", "To Do"),
        Doing => ("doing", "Doing"),
        Done => ("done", "Done"),
    }
);

wire_enum!(
    ProjectStatus {
        Active => ("active", "Active"),
        Archived => ("archived", "Archived"),
    }
);

impl Default for Priority {
    fn default() -> Self {
        Self::Low
    }
}

impl Default for WorkStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl WorkStatus {
    pub const ALL: [WorkStatus; 3] = [WorkStatus::Todo, WorkStatus::Doing, WorkStatus::Done];
}

// ========================
// Projects
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Editable project fields (create / update body)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            tags: project.tags.clone(),
            status: project.status,
        }
    }
}

/// Split a comma-separated tag input into trimmed, non-empty, unique tags
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

// ========================
// Stories
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    pub project: String,
    #[serde(default)]
    pub status: WorkStatus,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl Identified for Story {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Story create / update body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDraft {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub project: String,
    pub status: WorkStatus,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl StoryDraft {
    /// Empty draft for a new story, optionally pre-filled with a project
    pub fn new(project: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            priority: Priority::default(),
            project: project.unwrap_or_default().to_string(),
            status: WorkStatus::default(),
            owner: String::new(),
            created_at: now,
        }
    }

    pub fn is_complete(&self) -> bool {
        [&self.name, &self.description, &self.project, &self.owner]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

impl From<&Story> for StoryDraft {
    fn from(story: &Story) -> Self {
        Self {
            name: story.name.clone(),
            description: story.description.clone(),
            priority: story.priority,
            project: story.project.clone(),
            status: story.status,
            owner: story.owner.clone(),
            created_at: story.created_at,
        }
    }
}

// ========================
// Tasks
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub story: String,
    #[serde(deserialize_with = "deserialize_hours")]
    pub estimated_hours: f64,
    #[serde(default)]
    pub status: WorkStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_user_ref", skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<String>,
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Task {
    /// Assign a user: the task moves to `doing`, gets a start stamp and
    /// loses any earlier finish stamp
    pub fn assign(&mut self, user_id: &str, now: DateTime<Utc>) {
        self.assigned_user = Some(user_id.to_string());
        self.status = WorkStatus::Doing;
        self.start_date = Some(now);
        self.end_date = None;
    }

    /// Mark as done and stamp the end time
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = WorkStatus::Done;
        self.end_date = Some(now);
    }

    /// Partial update moving the task to another board lane.
    ///
    /// Returns `None` when the task already sits in `status`.
    pub fn transition(&self, status: WorkStatus, now: DateTime<Utc>) -> Option<TaskPatch> {
        if self.status == status {
            return None;
        }
        let mut patch = TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        };
        match status {
            WorkStatus::Todo => {}
            WorkStatus::Doing => {
                if self.start_date.is_none() {
                    patch.start_date = Some(now);
                }
            }
            WorkStatus::Done => patch.end_date = Some(Some(now)),
        }
        Some(patch)
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_user.as_deref() == Some(user_id)
    }
}

/// Task create body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub story: String,
    pub estimated_hours: f64,
    pub status: WorkStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<String>,
}

impl TaskDraft {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            priority: Priority::default(),
            story: String::new(),
            estimated_hours: 0.0,
            status: WorkStatus::Todo,
            created_at: now,
            assigned_user: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.story.trim().is_empty()
            && self.estimated_hours > 0.0
    }
}

/// Partial task update; absent fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// `Some(None)` is sent as `null` and clears the stamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_user: Option<String>,
}

impl From<&Task> for TaskPatch {
    fn from(task: &Task) -> Self {
        Self {
            name: Some(task.name.clone()),
            description: Some(task.description.clone()),
            priority: Some(task.priority),
            story: Some(task.story.clone()),
            estimated_hours: Some(task.estimated_hours),
            status: Some(task.status),
            start_date: task.start_date,
            end_date: Some(task.end_date),
            assigned_user: task.assigned_user.clone(),
        }
    }
}

/// Parse the hours field of a form; empty or invalid input yields `None`
pub fn parse_hours(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|hours| hours.is_finite() && *hours >= 0.0)
}

/// Hours arrive either as a JSON number or as a numeric string
fn deserialize_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Hours {
        Number(f64),
        Text(String),
    }

    match Hours::deserialize(deserializer)? {
        Hours::Number(hours) => Ok(hours),
        Hours::Text(text) if text.trim().is_empty() => Ok(0.0),
        Hours::Text(text) => parse_hours(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid estimatedHours `{}`", text))),
    }
}

/// An empty assignee string means "unassigned"
fn deserialize_user_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|id| !id.trim().is_empty()))
}

// ========================
// Users
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Display name for a user id, falling back to the raw id
pub fn user_name<'a>(users: &'a [User], id: &'a str) -> &'a str {
    users
        .iter()
        .find(|user| user.id == id)
        .map(|user| user.first_name.as_str())
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn make_task(id: &str, status: WorkStatus) -> Task {
        Task {
            id: id.to_string(),
            name: format!("Task {}", id),
            description: "desc".to_string(),
            priority: Priority::Medium,
            story: "s1".to_string(),
            estimated_hours: 3.0,
            status,
            created_at: at(8),
            start_date: None,
            end_date: None,
            assigned_user: None,
        }
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_string(&WorkStatus::Doing).unwrap(), "\"doing\"");
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("archived".parse::<ProjectStatus>().unwrap(), ProjectStatus::Archived);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(WorkStatus::Todo.label(), "To Do");
    }

    #[test]
    fn test_project_decodes_backend_shape() {
        let json = r#"{"_id":"p1","name":"Site","description":"Rebuild","__v":0}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, "p1");
        assert!(project.tags.is_empty());
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.created_at, None);
    }

    #[test]
    fn test_task_accepts_hours_as_string_or_number() {
        let json = r#"{"_id":"t1","name":"a","description":"b","priority":"high","story":"s1",
            "estimatedHours":"4.5","status":"todo","createdAt":"2024-05-01T08:00:00.000Z","assignedUser":""}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.estimated_hours, 4.5);
        assert_eq!(task.assigned_user, None);

        let json = r#"{"_id":"t2","name":"a","description":"b","story":"s1",
            "estimatedHours":2,"createdAt":"2024-05-01T08:00:00Z","assignedUser":"u1"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.estimated_hours, 2.0);
        assert_eq!(task.status, WorkStatus::Todo);
        assert!(task.is_assigned_to("u1"));
    }

    #[test]
    fn test_assign_moves_to_doing_and_stamps_start() {
        let mut task = make_task("t1", WorkStatus::Todo);
        task.assign("u7", at(9));
        assert_eq!(task.status, WorkStatus::Doing);
        assert_eq!(task.start_date, Some(at(9)));
        assert!(task.is_assigned_to("u7"));
    }

    #[test]
    fn test_reassigning_finished_task_clears_end() {
        let mut task = make_task("t1", WorkStatus::Done);
        task.start_date = Some(at(8));
        task.end_date = Some(at(12));
        task.assign("u2", at(14));
        assert_eq!(task.status, WorkStatus::Doing);
        assert_eq!(task.start_date, Some(at(14)));
        assert_eq!(task.end_date, None);
    }

    #[test]
    fn test_complete_stamps_end() {
        let mut task = make_task("t1", WorkStatus::Doing);
        task.complete(at(17));
        assert_eq!(task.status, WorkStatus::Done);
        assert_eq!(task.end_date, Some(at(17)));
    }

    #[test]
    fn test_transition_rules() {
        let task = make_task("t1", WorkStatus::Todo);
        assert_eq!(task.transition(WorkStatus::Todo, at(9)), None);

        let to_doing = task.transition(WorkStatus::Doing, at(9)).unwrap();
        assert_eq!(to_doing.status, Some(WorkStatus::Doing));
        assert_eq!(to_doing.start_date, Some(at(9)));
        assert_eq!(to_doing.end_date, None);

        let mut started = make_task("t2", WorkStatus::Done);
        started.start_date = Some(at(8));
        let back_to_doing = started.transition(WorkStatus::Doing, at(10)).unwrap();
        assert_eq!(back_to_doing.start_date, None);

        let to_done = task.transition(WorkStatus::Done, at(11)).unwrap();
        assert_eq!(to_done.end_date, Some(Some(at(11))));
    }

    #[test]
    fn test_patch_serializes_only_present_fields() {
        let patch = TaskPatch {
            status: Some(WorkStatus::Done),
            end_date: Some(Some(at(12))),
            ..TaskPatch::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["status"], "done");
        assert!(object.contains_key("endDate"));
    }

    #[test]
    fn test_full_patch_clears_end_of_reassigned_task() {
        let mut task = make_task("t1", WorkStatus::Done);
        task.end_date = Some(at(12));
        task.assign("u2", at(14));
        let value = serde_json::to_value(TaskPatch::from(&task)).unwrap();
        assert!(value.as_object().unwrap().contains_key("endDate"));
        assert!(value["endDate"].is_null());
        assert_eq!(value["status"], "doing");
        assert_eq!(value["assignedUser"], "u2");
    }

    #[test]
    fn test_drafts_require_fields() {
        let mut story = StoryDraft::new(Some("p1"), at(8));
        assert_eq!(story.project, "p1");
        assert!(!story.is_complete());
        story.name = "Login".into();
        story.description = "As a user".into();
        story.owner = "u1".into();
        assert!(story.is_complete());

        let mut task = TaskDraft::new(at(8));
        task.name = "Form".into();
        task.description = "Build it".into();
        task.story = "s1".into();
        assert!(!task.is_complete());
        task.estimated_hours = 2.0;
        assert!(task.is_complete());
    }

    #[test]
    fn test_parse_tags_and_hours() {
        assert_eq!(parse_tags(" web, ,api,web "), vec!["web".to_string(), "api".to_string()]);
        assert_eq!(join_tags(&parse_tags("a,b")), "a, b");
        assert_eq!(parse_hours("2.5"), Some(2.5));
        assert_eq!(parse_hours("-1"), None);
        assert_eq!(parse_hours("abc"), None);
    }

    #[test]
    fn test_upsert_and_remove_by_id() {
        let mut tasks = vec![make_task("t1", WorkStatus::Todo), make_task("t2", WorkStatus::Todo)];
        upsert_by_id(&mut tasks, make_task("t2", WorkStatus::Done));
        upsert_by_id(&mut tasks, make_task("t3", WorkStatus::Todo));
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1].status, WorkStatus::Done);
        assert_eq!(find_by_id(&tasks, "t2").map(|t| t.status), Some(WorkStatus::Done));
        assert!(find_by_id(&tasks, "t9").is_none());
        assert!(remove_by_id(&mut tasks, "t1"));
        assert!(!remove_by_id(&mut tasks, "t1"));
        assert_eq!(tasks[0].id, "t2");
    }

    #[test]
    fn test_user_name_falls_back_to_id() {
        let users = vec![User { id: "u1".into(), first_name: "Ada".into() }];
        assert_eq!(user_name(&users, "u1"), "Ada");
        assert_eq!(user_name(&users, "u9"), "u9");
    }
}

//! Board Utilities
//!
//! Groups tasks into one lane per status for the Kanban view.

use chrono::{DateTime, Utc};
use leptos_dragdrop::DropTarget;

use crate::models::{find_by_id, Task, TaskPatch, WorkStatus};

/// Board drop target: a card id or a lane status
pub type BoardDrop = DropTarget<String, WorkStatus>;

/// One board column
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub status: WorkStatus,
    pub tasks: Vec<Task>,
}

/// Split tasks into `todo` / `doing` / `done` lanes, keeping list order.
///
/// With `story` set, only that story's tasks are placed.
pub fn build_lanes(tasks: &[Task], story: Option<&str>) -> Vec<Lane> {
    WorkStatus::ALL
        .iter()
        .map(|&status| Lane {
            status,
            tasks: tasks
                .iter()
                .filter(|task| task.status == status)
                .filter(|task| story.map_or(true, |story| task.story == story))
                .cloned()
                .collect(),
        })
        .collect()
}

/// Lane a task currently sits in
pub fn lane_of(tasks: &[Task], task_id: &str) -> Option<WorkStatus> {
    find_by_id(tasks, task_id).map(|task| task.status)
}

/// Column a drop lands in; dropping on a card means that card's column
pub fn drop_lane(tasks: &[Task], target: &BoardDrop) -> Option<WorkStatus> {
    match target {
        DropTarget::Lane(status) => Some(*status),
        DropTarget::Card(card_id) => lane_of(tasks, card_id),
    }
}

/// Partial update for dropping `task_id` on `target`.
///
/// `None` for unknown tasks or cards and for drops into the task's own lane.
pub fn plan_move(tasks: &[Task], task_id: &str, target: &BoardDrop, now: DateTime<Utc>) -> Option<TaskPatch> {
    let lane = drop_lane(tasks, target)?;
    find_by_id(tasks, task_id)?.transition(lane, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::TimeZone;

    fn make_task(id: &str, story: &str, status: WorkStatus) -> Task {
        Task {
            id: id.to_string(),
            name: format!("Task {}", id),
            description: String::new(),
            priority: Priority::Low,
            story: story.to_string(),
            estimated_hours: 1.0,
            status,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            start_date: None,
            end_date: None,
            assigned_user: None,
        }
    }

    fn ids(lane: &Lane) -> Vec<&str> {
        lane.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_build_lanes() {
        let tasks = vec![
            make_task("1", "s1", WorkStatus::Done),
            make_task("2", "s1", WorkStatus::Todo),
            make_task("3", "s2", WorkStatus::Doing),
            make_task("4", "s2", WorkStatus::Todo),
        ];

        let lanes = build_lanes(&tasks, None);
        // Should be: todo [2, 4], doing [3], done [1]
        assert_eq!(lanes.len(), 3);
        assert_eq!(lanes[0].status, WorkStatus::Todo);
        assert_eq!(ids(&lanes[0]), vec!["2", "4"]);
        assert_eq!(ids(&lanes[1]), vec!["3"]);
        assert_eq!(ids(&lanes[2]), vec!["1"]);
    }

    #[test]
    fn test_build_lanes_for_one_story() {
        let tasks = vec![
            make_task("1", "s1", WorkStatus::Todo),
            make_task("2", "s2", WorkStatus::Todo),
        ];
        let lanes = build_lanes(&tasks, Some("s2"));
        assert_eq!(ids(&lanes[0]), vec!["2"]);
        assert!(lanes[1].tasks.is_empty());
        assert!(lanes[2].tasks.is_empty());
    }

    #[test]
    fn test_lane_of() {
        let tasks = vec![make_task("1", "s1", WorkStatus::Doing)];
        assert_eq!(lane_of(&tasks, "1"), Some(WorkStatus::Doing));
        assert_eq!(lane_of(&tasks, "9"), None);
    }

    #[test]
    fn test_drop_on_card_uses_that_cards_lane() {
        let tasks = vec![
            make_task("1", "s1", WorkStatus::Todo),
            make_task("2", "s1", WorkStatus::Done),
        ];
        let on_card = DropTarget::Card("2".to_string());
        assert_eq!(drop_lane(&tasks, &on_card), Some(WorkStatus::Done));
        assert_eq!(drop_lane(&tasks, &DropTarget::Lane(WorkStatus::Doing)), Some(WorkStatus::Doing));
        assert_eq!(drop_lane(&tasks, &DropTarget::Card("9".to_string())), None);

        let now = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let patch = plan_move(&tasks, "1", &on_card, now).unwrap();
        assert_eq!(patch.status, Some(WorkStatus::Done));
        assert_eq!(patch.end_date, Some(Some(now)));
    }

    #[test]
    fn test_drop_into_own_lane_is_not_a_move() {
        let tasks = vec![
            make_task("1", "s1", WorkStatus::Todo),
            make_task("2", "s1", WorkStatus::Todo),
        ];
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        assert_eq!(plan_move(&tasks, "1", &DropTarget::Card("2".to_string()), now), None);
        assert_eq!(plan_move(&tasks, "1", &DropTarget::Lane(WorkStatus::Todo), now), None);
        assert_eq!(plan_move(&tasks, "9", &DropTarget::Lane(WorkStatus::Done), now), None);
    }
}

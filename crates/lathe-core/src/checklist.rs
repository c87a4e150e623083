//! Checklist generation.
//!
//! Flattens a plan's ordered activity/service tree into the linear checklist
//! a new execution freezes at start time. The flatten is activity-major:
//! every service of the first activity precedes any service of the second.

use crate::models::{Activity, ChecklistItem};

/// Produce the initial checklist for an execution from the given activities.
///
/// Each service becomes one item carrying the owning activity's name, the
/// service description, the estimated time, and `completed = false`. The
/// input is expected to already be in sibling order; the output preserves
/// it. An empty tree (no activities, or activities without services) yields
/// an empty checklist, which is valid.
pub fn generate(activities: &[Activity]) -> Vec<ChecklistItem> {
    activities
        .iter()
        .flat_map(|activity| {
            activity.services.iter().map(|service| ChecklistItem {
                activity_name: activity.name.clone(),
                service_description: service.description.clone(),
                estimated_time_min: service.estimated_time_min,
                completed: false,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Service;

    fn activity(id: u64, name: &str, order: u32, services: Vec<Service>) -> Activity {
        Activity {
            id,
            plan_id: 1,
            name: name.to_string(),
            responsible: None,
            order,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            services,
        }
    }

    fn service(id: u64, activity_id: u64, description: &str, minutes: Option<u32>, order: u32) -> Service {
        Service {
            id,
            activity_id,
            description: description.to_string(),
            estimated_time_min: minutes,
            order,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_generate_activity_major_order() {
        let activities = vec![
            activity(
                1,
                "Lubrication",
                1,
                vec![
                    service(1, 1, "Check oil level", Some(5), 1),
                    service(2, 1, "Top up grease", Some(10), 2),
                ],
            ),
            activity(2, "Inspection", 2, vec![service(3, 2, "Visual check", Some(5), 1)]),
        ];

        let checklist = generate(&activities);

        assert_eq!(checklist.len(), 3);
        assert_eq!(checklist[0].activity_name, "Lubrication");
        assert_eq!(checklist[0].service_description, "Check oil level");
        assert_eq!(checklist[0].estimated_time_min, Some(5));
        assert_eq!(checklist[1].activity_name, "Lubrication");
        assert_eq!(checklist[1].service_description, "Top up grease");
        assert_eq!(checklist[2].activity_name, "Inspection");
        assert_eq!(checklist[2].service_description, "Visual check");
        assert!(checklist.iter().all(|item| !item.completed));
    }

    #[test]
    fn test_generate_empty_tree() {
        assert!(generate(&[]).is_empty());
    }

    #[test]
    fn test_generate_skips_empty_activities() {
        let activities = vec![
            activity(
                1,
                "Lubrication",
                1,
                vec![
                    service(1, 1, "Check oil level", Some(5), 1),
                    service(2, 1, "Top up grease", Some(10), 2),
                    service(3, 1, "Wipe fittings", None, 3),
                ],
            ),
            activity(2, "Inspection", 2, vec![]),
        ];

        let checklist = generate(&activities);

        assert_eq!(checklist.len(), 3);
        assert!(checklist.iter().all(|item| item.activity_name == "Lubrication"));
        assert_eq!(checklist[2].estimated_time_min, None);
    }

    #[test]
    fn test_generate_length_matches_service_total() {
        let activities = vec![
            activity(1, "A", 1, vec![service(1, 1, "s1", Some(1), 1)]),
            activity(
                2,
                "B",
                2,
                vec![service(2, 2, "s2", Some(2), 1), service(3, 2, "s3", Some(3), 2)],
            ),
        ];

        let expected: usize = activities.iter().map(|a| a.services.len()).sum();
        assert_eq!(generate(&activities).len(), expected);
    }
}

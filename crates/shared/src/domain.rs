use serde::{Deserialize, Serialize};

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype!(ProjectId);
string_newtype!(OrganizationSlug);

/// Lifecycle state of a project. The wire form is the server's
/// SCREAMING_SNAKE_CASE string; an unrecognized value is a decode error,
/// never coerced to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Active,
    OnHold,
    Completed,
}

impl ProjectStatus {
    /// Human display form, as the dashboard renders status badges.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Completed => "Completed",
        }
    }
}

/// A project as returned by the server. `completed_tasks` and
/// `completion_rate` are server-derived; the client treats them as opaque
/// and never recomputes them from `task_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    pub task_count: u32,
    pub completed_tasks: u32,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub id: String,
    pub name: String,
    pub slug: OrganizationSlug,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_wire_form() {
        for (status, wire) in [
            (ProjectStatus::Active, "\"ACTIVE\""),
            (ProjectStatus::OnHold, "\"ON_HOLD\""),
            (ProjectStatus::Completed, "\"COMPLETED\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            assert_eq!(
                serde_json::from_str::<ProjectStatus>(wire).unwrap(),
                status
            );
        }
    }

    #[test]
    fn unknown_status_is_a_decode_error() {
        let err = serde_json::from_str::<ProjectStatus>("\"ARCHIVED\"");
        assert!(err.is_err());
    }

    #[test]
    fn project_decodes_camel_case_fields() {
        let raw = r#"{
            "id": "1",
            "name": "Site Redesign",
            "status": "ACTIVE",
            "taskCount": 10,
            "completedTasks": 4,
            "completionRate": 40
        }"#;
        let project: Project = serde_json::from_str(raw).unwrap();
        assert_eq!(project.id, ProjectId::new("1"));
        assert_eq!(project.name, "Site Redesign");
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.task_count, 10);
        assert_eq!(project.completed_tasks, 4);
        assert_eq!(project.completion_rate, 40.0);
    }

    #[test]
    fn status_labels_match_display_forms() {
        assert_eq!(ProjectStatus::Active.label(), "Active");
        assert_eq!(ProjectStatus::OnHold.label(), "On Hold");
        assert_eq!(ProjectStatus::Completed.label(), "Completed");
    }
}

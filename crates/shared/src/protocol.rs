//! GraphQL wire shapes for the project dashboard API.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{OrganizationSlug, OrganizationSummary, Project, ProjectStatus},
    error::ApiError,
};

pub const GET_PROJECTS: &str = "\
query GetProjects($organizationSlug: String!) {
  projects(organizationSlug: $organizationSlug) {
    id
    name
    status
    taskCount
    completedTasks
    completionRate
  }
}";

pub const CREATE_PROJECT: &str = "\
mutation CreateProject(
  $organizationSlug: String!
  $name: String!
  $status: String!
  $description: String
) {
  createProject(
    organizationSlug: $organizationSlug
    name: $name
    status: $status
    description: $description
  ) {
    project {
      id
      name
      status
      taskCount
      completedTasks
      completionRate
    }
  }
}";

pub const GET_ORGANIZATIONS: &str = "\
query GetOrganizations {
  organizations {
    id
    name
    slug
  }
}";

#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Standard GraphQL response envelope. A non-empty `errors` array is a
/// server rejection even when `data` is present.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: Deserialize<'de>"))]
pub struct GraphqlResponse<D> {
    #[serde(default)]
    pub data: Option<D>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<D> GraphqlResponse<D> {
    /// Unwrap the envelope: server-reported errors win over data, and a
    /// missing payload without errors is reported as `None`.
    pub fn into_data(self) -> Result<Option<D>, ApiError> {
        if let Some(first) = self.errors.into_iter().next() {
            return Err(ApiError::from_server_message(first.message));
        }
        Ok(self.data)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProjectsVariables {
    pub organization_slug: OrganizationSlug,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectVariables {
    pub organization_slug: OrganizationSlug,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsData {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectData {
    pub create_project: CreateProjectPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectPayload {
    pub project: Project,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationsData {
    pub organizations: Vec<OrganizationSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn request_serializes_query_and_variables() {
        let request = GraphqlRequest {
            query: GET_PROJECTS,
            variables: GetProjectsVariables {
                organization_slug: OrganizationSlug::new("acme"),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["variables"]["organizationSlug"], "acme");
        assert!(value["query"]
            .as_str()
            .unwrap()
            .contains("projects(organizationSlug: $organizationSlug)"));
    }

    #[test]
    fn create_variables_omit_absent_description() {
        let variables = CreateProjectVariables {
            organization_slug: OrganizationSlug::new("acme"),
            name: "Launch".into(),
            status: ProjectStatus::OnHold,
            description: None,
        };
        let value = serde_json::to_value(&variables).unwrap();
        assert_eq!(value["status"], "ON_HOLD");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn response_errors_take_precedence_over_data() {
        let raw = r#"{
            "data": {"projects": []},
            "errors": [{"message": "Organization not found"}]
        }"#;
        let response: GraphqlResponse<ProjectsData> = serde_json::from_str(raw).unwrap();
        let err = response.into_data().unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn create_response_decodes_nested_payload() {
        let raw = r#"{
            "data": {
                "createProject": {
                    "project": {
                        "id": "7",
                        "name": "Launch",
                        "status": "ACTIVE",
                        "taskCount": 0,
                        "completedTasks": 0,
                        "completionRate": 0
                    }
                }
            }
        }"#;
        let response: GraphqlResponse<CreateProjectData> = serde_json::from_str(raw).unwrap();
        let data = response.into_data().unwrap().unwrap();
        assert_eq!(data.create_project.project.name, "Launch");
    }
}

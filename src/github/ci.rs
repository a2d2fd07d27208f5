use crate::github::client::ClassroomClient;
use crate::github::endpoint::Endpoint;
use crate::models::{CiInfo, CiRun, WorkflowList};

/// Display name GitHub Classroom gives its autograding workflow.
pub const CLASSROOM_WORKFLOW_NAME: &str = "GitHub Classroom Workflow";
/// File name of the autograding workflow definition.
pub const CLASSROOM_WORKFLOW_FILE: &str = "classroom.yml";

impl ClassroomClient {
    /// Id of the first workflow that looks like the classroom autograder,
    /// matched by name or by definition path.
    pub async fn find_classroom_workflow_id(&self, repo: &str) -> Option<u64> {
        let endpoint = Endpoint::Workflows {
            owner: self.org().to_string(),
            repo: repo.to_string(),
        };
        match self.fetch::<WorkflowList>(endpoint, Vec::new()).await {
            Ok(list) => list
                .workflows
                .into_iter()
                .find(|w| {
                    w.name.contains(CLASSROOM_WORKFLOW_NAME)
                        || w.path.contains(CLASSROOM_WORKFLOW_FILE)
                })
                .map(|w| w.id),
            Err(e) => {
                tracing::warn!("find_classroom_workflow_id: {} in {}", e, repo);
                None
            }
        }
    }

    /// Runs of the classroom workflow of `repo`.
    ///
    /// `workflow_id` skips discovery when the caller already knows it.
    /// `None` means the repository has no classroom workflow; a failure to
    /// list runs yields a `CiInfo` with no runs.
    pub async fn get_ci_info(&self, repo: &str, workflow_id: Option<u64>) -> Option<CiInfo> {
        let workflow_id = match workflow_id {
            Some(id) => id,
            None => self.find_classroom_workflow_id(repo).await?,
        };

        let runs = self
            .get_workflow_runs(repo, workflow_id)
            .await
            .into_iter()
            .map(CiRun::from)
            .collect();

        Some(CiInfo { workflow_id, runs })
    }
}

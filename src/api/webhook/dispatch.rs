//! The push-ingestion pipeline: verified payload in, submission row +
//! achievements out.
//!
//! Order is fixed: typed parse, participant lookup, folder classification,
//! best-effort content fetch, points, submission upsert, activity log,
//! achievement evaluation. Benign misses stop the pipeline with a 200
//! acknowledgement; only persistence failures surface as errors.

use std::sync::Arc;

use axum::extract::State;
use chrono::Utc;
use http::HeaderMap;
use serde_json::json;
use tracing::instrument;

use crate::api::middleware::verify::VerifiedBody;
use crate::api::server::{AppState, RouteError};
use crate::api::webhook::{GithubEvent, PushEvent, PushOutcome};
use crate::constants::GITHUB_EVENT_HEADER;
use crate::db::prelude::*;
use crate::grading::achievements::{local_hour, newly_qualified};
use crate::grading::classify::detect_submission_folder;
use crate::grading::points::points_for;
use crate::grading::rating::parse_self_rating;
use crate::util::content::fetch_readme;

#[instrument(skip(state, headers, body))]
pub async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: VerifiedBody,
) -> Result<PushOutcome, RouteError> {
    let event_kind: GithubEvent = headers
        .get(GITHUB_EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .into();

    if let GithubEvent::Other(kind) = event_kind {
        tracing::debug!(kind, "ignoring non-push event");
        return Ok(PushOutcome::Ignored("ignored event"));
    }

    let event: PushEvent = body.as_json().map_err(RouteError::MalformedEvent)?;
    process_push(&state, event).await
}

#[instrument(skip(state, event))]
async fn process_push(state: &AppState, event: PushEvent) -> Result<PushOutcome, RouteError> {
    let (Some(username), Some(commit_sha)) = (event.owner_login(), event.commit_sha()) else {
        return Err(RouteError::MissingEventData);
    };

    let participant = match ParticipantRepository::new(state.db_pool)
        .get_by_github_username(username)
        .await?
    {
        Some(p) => p,
        None => {
            tracing::info!(username, "push from unknown participant");
            return Ok(PushOutcome::Ignored("unknown participant"));
        }
    };

    let changed = event.changed_files();
    let Some(folder) = detect_submission_folder(&changed) else {
        tracing::info!(username, "no submission folder in changed files");
        return Ok(PushOutcome::Ignored("no submission folder detected"));
    };

    let assignment = match AssignmentRepository::new(state.db_pool)
        .get_by_folder(folder)
        .await?
    {
        Some(a) => a,
        None => {
            tracing::info!(folder, "folder matches no known assignment");
            return Ok(PushOutcome::Ignored("unknown assignment"));
        }
    };

    // best-effort: a missing branch ref or failed fetch both degrade to no
    // content, never to a pipeline error
    let readme_content = match event.branch() {
        Some(branch) => fetch_readme(username, branch, folder).await,
        None => None,
    };

    let new_submission = prepare_submission(
        &event,
        commit_sha,
        &participant,
        &assignment,
        readme_content,
        Utc::now(),
    );
    let points_earned = new_submission.points_earned;

    let submission = SubmissionRepository::new(state.db_pool)
        .upsert(&new_submission)
        .await?;

    ActivityLogRepository::new(state.db_pool)
        .append(
            &participant.id,
            ActivityAction::Submission,
            json!({
                "assignment_id": assignment.id,
                "commit_sha": commit_sha,
                "folder": folder,
            }),
        )
        .await?;

    check_achievements(state, &participant.id).await?;

    tracing::info!(
        username,
        folder,
        points_earned,
        submission_id = %submission.id,
        "submission ingested"
    );

    Ok(PushOutcome::Accepted {
        submission_id: submission.id,
        points_earned,
    })
}

/// Assembles the submission row from the event and the resolved reference
/// data. Rating extraction and the on-time/late point split both live here,
/// so everything between the lookups and the upsert can be exercised without
/// a database.
fn prepare_submission(
    event: &PushEvent,
    commit_sha: &str,
    participant: &Participant,
    assignment: &Assignment,
    readme_content: Option<String>,
    observed_at: chrono::DateTime<Utc>,
) -> NewSubmission {
    let self_rating = readme_content
        .as_deref()
        .and_then(parse_self_rating)
        .map(i32::from);

    NewSubmission {
        participant_id: participant.id,
        assignment_id: assignment.id,
        commit_sha: commit_sha.to_string(),
        commit_message: event.head_commit.as_ref().and_then(|c| c.message.clone()),
        commit_url: event.head_commit.as_ref().and_then(|c| c.url.clone()),
        readme_content,
        self_rating,
        points_earned: points_for(assignment.max_points, assignment.due_at, observed_at),
    }
}

/// Re-reads the participant's whole history and earned set, then awards any
/// newly qualifying badges. Safe to re-run: the earned-set check skips known
/// codes and the join-table constraint absorbs races.
#[instrument(skip(state))]
async fn check_achievements(
    state: &AppState,
    participant_id: &ParticipantId,
) -> Result<(), RouteError> {
    let history = SubmissionRepository::new(state.db_pool)
        .history_for(participant_id)
        .await?;

    let achievement_repo = AchievementRepository::new(state.db_pool);
    let earned = achievement_repo.earned_codes(participant_id).await?;

    let latest_hour = history.last().map(|ts| local_hour(*ts));
    let codes = newly_qualified(history.len(), latest_hour, &earned);

    for code in codes {
        let Some(achievement) = achievement_repo.get_by_code(code).await? else {
            // catalog not seeded with this badge; skip rather than fail
            tracing::debug!(code, "achievement code missing from catalog");
            continue;
        };

        let awarded = achievement_repo.award(participant_id, &achievement).await?;
        if awarded {
            tracing::info!(
                code,
                points_bonus = achievement.points_bonus,
                "achievement earned"
            );
        }
    }

    Ok(())
}

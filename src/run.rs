//! The single-pass pipeline: select a template, extract fields, file the issue.
//!
//! Control flow is strictly linear: settings in, one issue out. The only
//! decision point is template selection, where a `created` event for a package
//! already present in the index is reinterpreted as an update.

use thiserror::Error;

use crate::events::ReleaseAction;
use crate::links::{make_homepage, make_link};
use crate::registry::{ApiError, IndexClient, RegisteredIssue};
use crate::settings::Settings;
use crate::template::{self, ExtractError, TemplateValues};

/// Template file paths on the index repository, one per action.
pub const REGISTER_TEMPLATE: &str = ".github/ISSUE_TEMPLATE/register.md";
pub const UPDATE_TEMPLATE: &str = ".github/ISSUE_TEMPLATE/update.md";
pub const DELETE_TEMPLATE: &str = ".github/ISSUE_TEMPLATE/delete.md";

/// Error type for a registrar run. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Picks the effective action and template path for this run.
///
/// The effective action also selects the extraction rule table, so a
/// re-registration is processed with the update rules end to end.
pub fn select_template(
    action: ReleaseAction,
    already_indexed: bool,
) -> (ReleaseAction, &'static str) {
    match (action, already_indexed) {
        (ReleaseAction::Created, false) => (ReleaseAction::Created, REGISTER_TEMPLATE),
        (ReleaseAction::Created, true) | (ReleaseAction::Updated, _) => {
            (ReleaseAction::Updated, UPDATE_TEMPLATE)
        }
        (ReleaseAction::Deleted, _) => (ReleaseAction::Deleted, DELETE_TEMPLATE),
    }
}

/// Runs the pipeline once against the index repository.
pub async fn execute(settings: &Settings) -> Result<RegisteredIssue, RunError> {
    let package = settings.package_name();
    let client = IndexClient::from_token(settings.token.expose(), settings.index_repo.clone())?;

    let release = &settings.context.event.release;
    let homepage = make_homepage(&settings.server_url, &settings.context.repository);
    let link = make_link(&homepage, release.tag_name.as_deref().unwrap_or_default());

    let event_action = settings.context.event.action;
    // The membership check only matters for `created`; the other actions map
    // straight to their templates.
    let already_indexed = match event_action {
        ReleaseAction::Created => client.has_package(&package).await?,
        ReleaseAction::Updated | ReleaseAction::Deleted => false,
    };
    let (action, template_path) = select_template(event_action, already_indexed);

    tracing::info!(
        package = %package,
        "package {} from {}",
        action,
        settings.context.repository
    );

    let template = client.fetch_template(template_path).await?;
    let content = template::extract(
        &template,
        &TemplateValues {
            package_name: &package,
            homepage: &homepage,
            link: &link,
            release,
        },
        action,
    )?;

    let issue = client.create_issue(&content).await?;
    tracing::info!(issue = issue.number, url = %issue.url, "issue created");
    Ok(issue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_uses_register_template() {
        assert_eq!(
            select_template(ReleaseAction::Created, false),
            (ReleaseAction::Created, REGISTER_TEMPLATE)
        );
    }

    #[test]
    fn re_registration_becomes_an_update() {
        assert_eq!(
            select_template(ReleaseAction::Created, true),
            (ReleaseAction::Updated, UPDATE_TEMPLATE)
        );
    }

    #[test]
    fn updated_uses_update_template_regardless_of_membership() {
        for already_indexed in [false, true] {
            assert_eq!(
                select_template(ReleaseAction::Updated, already_indexed),
                (ReleaseAction::Updated, UPDATE_TEMPLATE)
            );
        }
    }

    #[test]
    fn deleted_uses_delete_template_regardless_of_membership() {
        for already_indexed in [false, true] {
            assert_eq!(
                select_template(ReleaseAction::Deleted, already_indexed),
                (ReleaseAction::Deleted, DELETE_TEMPLATE)
            );
        }
    }
}

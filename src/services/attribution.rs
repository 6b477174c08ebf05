use tracing::{debug, debug_span, info};

use crate::domain::personal_result::PersonalResult;
use crate::domain::sprint::Sprint;
use crate::domain::user::User;

/// Computes what `person` did in `sprint`.
///
/// `sprint.issues` and every issue's comments must already be populated.
/// The function only reads its inputs, so it can run for any number of
/// (person, sprint) pairs independently.
pub fn attribute<'a>(person: &User, sprint: &'a Sprint) -> PersonalResult<'a> {
    let span = debug_span!("attribute", person = %person.name, sprint = %sprint.name);
    let _entered = span.enter();

    let mut result = PersonalResult::new(person.id.clone(), sprint.id);
    for issue in &sprint.issues {
        let assigned = issue.is_assigned_to(&person.id);
        let mut reviewed = false;

        for comment in &issue.comments {
            if comment.author_id != person.id || !sprint.contains_strictly(comment.published_date) {
                continue;
            }
            let preview: String = comment.text.chars().take(15).collect();
            debug!(issue = %issue.key, %preview, "comment written in sprint");
            result.comments_written.push(comment);
            if !assigned {
                reviewed = true;
            }
        }

        if reviewed {
            debug!(issue = %issue.key, "issue reviewed");
            result.issues_reviewed += 1;
        }

        if !assigned {
            continue;
        }
        let finished = sprint
            .end_date
            .is_some_and(|end| issue.is_resolved_before(end));
        if finished {
            result.finished.push(issue);
        } else {
            result.not_finished.push(issue);
        }
    }

    info!(
        finished = result.finished.len(),
        not_finished = result.not_finished.len(),
        comments = result.comments_written.len(),
        reviewed = result.issues_reviewed,
        "counted sprint results"
    );
    result
}

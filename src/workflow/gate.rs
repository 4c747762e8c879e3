use crate::context::AppContext;
use crate::domain::reference::ReferenceExtractor;
use crate::domain::ticket::{Board, Ticket, TicketResolver};
use crate::domain::verdict::{PolicyGate, Verdict};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The newest commit is a merge commit; those are not judged.
    MergeExempt,
    Evaluated { ticket: Ticket, verdict: Verdict },
}

impl GateOutcome {
    pub fn passed(&self) -> bool {
        match self {
            GateOutcome::MergeExempt => true,
            GateOutcome::Evaluated { verdict, .. } => matches!(verdict, Verdict::Pass),
        }
    }
}

/// Runs a commit message through the full gate: extract the leading
/// reference, resolve it to a ticket, read the ticket's status from its
/// tracker, and judge it against the rejected-status policy.
pub async fn evaluate_message(ctx: &AppContext, message: &str) -> AppResult<GateOutcome> {
    let extractor = ReferenceExtractor::new()?;
    let token = extractor
        .extract(message)
        .ok_or(AppError::NoReferenceFound)?;

    if token.is_merge() {
        return Ok(GateOutcome::MergeExempt);
    }

    let resolver = TicketResolver::new(&ctx.config)?;
    let mut ticket = resolver.resolve(&token)?;

    let tracker: &dyn IssueTrackerService = match ticket.board {
        Board::Jira => ctx.jira_tracker.as_ref(),
        Board::LocalRepo | Board::ForeignRepo { .. } => ctx.github_tracker.as_ref(),
    };
    let status = tracker.fetch_status(&ticket).await?;
    ticket.set_status(status);

    let gate = PolicyGate::new(ctx.config.rejected_statuses.clone());
    let verdict = gate.evaluate(&ticket);

    Ok(GateOutcome::Evaluated { ticket, verdict })
}

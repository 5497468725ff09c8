use anyhow::Context;
use serde::Serialize;
use tally_quotes::{
    Badge, BadgeAssignment, CandidateMatch, QuoteDeck, QuoteId, RankingSession, SwipeDirection,
};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{QuotesCommands, RankArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankReport {
    agreed: Vec<QuoteId>,
    badges: BadgeAssignment,
    results: Vec<CandidateMatch>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRow<'a> {
    id: &'a QuoteId,
    issue: &'a str,
    candidate: &'a str,
    text: &'a str,
    source_name: &'a str,
}

/// Quotes with the speaker's display name resolved from the deck.
fn quote_rows(deck: &QuoteDeck) -> Vec<QuoteRow<'_>> {
    deck.quotes()
        .iter()
        .map(|q| QuoteRow {
            id: &q.id,
            issue: &q.issue,
            candidate: deck
                .candidate(&q.candidate_id)
                .map_or(q.candidate_id.as_str(), |c| c.name.as_str()),
            text: &q.text,
            source_name: &q.source_name,
        })
        .collect()
}

/// Handle `tally quotes`.
pub fn handle(action: &QuotesCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let deck = ctx.deck()?;
    match action {
        QuotesCommands::List { issue } => {
            let deck = deck.filter_issues(issue);
            output(&quote_rows(&deck), flags.format)
        }
        QuotesCommands::Issues => output(&deck.issues(), flags.format),
        QuotesCommands::Rank(args) => output(&rank(&deck, args)?, flags.format),
    }
}

/// Swipe right on every quote in `args.agree`, left on the rest, then apply badges.
fn rank(deck: &QuoteDeck, args: &RankArgs) -> anyhow::Result<RankReport> {
    let deck = deck.filter_issues(&args.issue);

    let unknown = args
        .agree
        .iter()
        .filter(|id| deck.quote(&QuoteId::new(id.as_str())).is_none())
        .map(String::as_str)
        .collect::<Vec<_>>();
    if !unknown.is_empty() {
        anyhow::bail!("unknown quote id(s) in --agree: {}", unknown.join(", "));
    }

    let mut session = RankingSession::new(deck);
    while let Some(quote) = session.current() {
        let direction = if args.agree.iter().any(|id| id == quote.id.as_str()) {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        session.swipe(direction)?;
    }
    tracing::debug!(agreed = session.agreed().len(), "deck exhausted");

    for (badge, quote) in [(Badge::Diamond, &args.diamond), (Badge::Gold, &args.gold)] {
        if let Some(quote) = quote {
            session
                .assign_badge(&QuoteId::new(quote.as_str()), badge)
                .with_context(|| format!("cannot give the {badge} badge to '{quote}'"))?;
        }
    }

    Ok(RankReport {
        agreed: session.agreed().iter().map(|q| q.id.clone()).collect(),
        badges: session.badges().clone(),
        results: session.results(),
    })
}

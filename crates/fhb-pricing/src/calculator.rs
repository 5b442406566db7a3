use fhb_core::{BidDraft, BidError, BidId, Money, PricedBid, PricingInput, Task, Timeline};

pub const MIN_HOURLY_RATE: Money = Money(100 * 100);
pub const MIN_ESTIMATED_HOURS: u32 = 1;
pub const MAX_ATTACHMENTS: usize = 5;
pub const MAX_PORTFOLIO_LINKS: usize = 5;

/// Validate and price one draft against its task. Pure: no clock access
/// (`today_unix` is injected) and no storage.
///
/// Fixed bids are capped at 1.5x the task budget. Hourly totals have NO
/// upper bound; the asymmetry is deliberate.
pub fn price(task: &Task, draft: &BidDraft, today_unix: i64) -> Result<PricedBid, BidError> {
    validate_timeline(&draft.timeline, today_unix)?;
    validate_fields(draft)?;

    let total = match draft.pricing {
        PricingInput::Fixed { amount } => {
            let max = Money::from_paise(task.budget.paise().saturating_mul(3) / 2);
            if !amount.is_positive() || !amount.within_1p5_of(task.budget) {
                return Err(BidError::OutOfBounds { amount, max });
            }
            amount
        }
        PricingInput::Hourly {
            hourly_rate,
            estimated_hours,
        } => {
            if hourly_rate < MIN_HOURLY_RATE {
                return Err(BidError::Validation(format!(
                    "hourly rate must be at least {}",
                    MIN_HOURLY_RATE
                )));
            }
            if estimated_hours < MIN_ESTIMATED_HOURS {
                return Err(BidError::Validation(
                    "estimated hours must be at least 1".to_string(),
                ));
            }
            hourly_rate.times_hours(estimated_hours)
        }
    };

    Ok(PricedBid {
        id: BidId::new(),
        task_id: draft.task_id.clone(),
        model: draft.pricing.model(),
        pricing: draft.pricing.clone(),
        total,
        timeline: draft.timeline,
        notes: draft.notes.clone(),
        attachments: draft.attachments.clone(),
        portfolio_links: draft.portfolio_links.clone(),
    })
}

fn validate_timeline(timeline: &Timeline, today_unix: i64) -> Result<(), BidError> {
    if timeline.proposed_start_unix < today_unix {
        return Err(BidError::InvalidTimeline(
            "proposed start is in the past".to_string(),
        ));
    }
    if timeline.proposed_start_unix >= timeline.proposed_end_unix {
        return Err(BidError::InvalidTimeline(
            "proposed start must be before proposed end".to_string(),
        ));
    }
    Ok(())
}

fn validate_fields(draft: &BidDraft) -> Result<(), BidError> {
    if draft.notes.trim().is_empty() {
        return Err(BidError::Validation("notes must not be empty".to_string()));
    }
    if draft.attachments.len() > MAX_ATTACHMENTS {
        return Err(BidError::Validation(format!(
            "at most {} attachments allowed",
            MAX_ATTACHMENTS
        )));
    }
    if draft.portfolio_links.len() > MAX_PORTFOLIO_LINKS {
        return Err(BidError::Validation(format!(
            "at most {} portfolio links allowed",
            MAX_PORTFOLIO_LINKS
        )));
    }
    for link in &draft.portfolio_links {
        if url::Url::parse(link).is_err() {
            return Err(BidError::Validation(format!(
                "portfolio link is not a valid url: {}",
                link
            )));
        }
    }
    Ok(())
}

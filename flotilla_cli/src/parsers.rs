use jiff::{SignedDuration, Span, SpanRelativeTo};

/// Accepts `"30s"`/`"5m"` friendly spans, ISO durations and bare second
/// counts. Signs are ignored: a budget is always forwards.
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(SignedDuration::from_secs(seconds.abs()));
    }

    input
        .parse::<SignedDuration>()
        .or_else(|_| {
            input
                .parse::<Span>()
                .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
        })
        .map(SignedDuration::abs)
        .map_err(|err| format!("invalid duration {input:?}: {err}"))
}

pub fn parse_week(input: &str) -> Result<jiff::civil::Date, String> {
    input
        .parse::<jiff::civil::Date>()
        .map_err(|err| format!("Invalid week start date: {err}"))
}

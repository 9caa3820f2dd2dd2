use agenda_domain::utils::time::parse_local_date;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::context::AppContext;
use crate::render;

pub fn run(ctx: &AppContext, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let snapshot = ctx.snapshot()?;
    let events = match (from, to) {
        (None, None) => ctx.sync.events(),
        _ => {
            let (start, end) = range(from, to, ctx.tz)?;
            ctx.sync.events_between(start, end)
        }
    };

    render::events(&events, &snapshot, ctx.tz);
    Ok(())
}

/// Resolve `--from`/`--to` days into a half-open UTC range. Missing
/// bounds are open-ended and `to` includes the whole day.
fn range(from: Option<&str>, to: Option<&str>, tz: Tz) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = match from {
        Some(day) => parse_local_date(day, tz)?,
        None => DateTime::<Utc>::MIN_UTC,
    };
    let end = match to {
        Some(day) => {
            let date = NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d")
                .with_context(|| format!("invalid date '{day}'"))?;
            let next = date.succ_opt().context("date out of range")?;
            parse_local_date(&next.format("%Y-%m-%d").to_string(), tz)?
        }
        None => DateTime::<Utc>::MAX_UTC,
    };

    if end <= start {
        anyhow::bail!("--to must not be before --from");
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::Sao_Paulo;

    use super::*;

    #[test]
    fn to_is_inclusive_of_the_whole_day() {
        let (start, end) = range(Some("2024-01-10"), Some("2024-01-10"), Sao_Paulo).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 10, 3, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 11, 3, 0, 0).unwrap());
    }

    #[test]
    fn missing_bounds_are_open() {
        let (start, end) = range(None, Some("2024-01-10"), Sao_Paulo).unwrap();
        assert_eq!(start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 11, 3, 0, 0).unwrap());

        let (_, end) = range(Some("2024-01-10"), None, Sao_Paulo).unwrap();
        assert_eq!(end, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(range(Some("2024-01-12"), Some("2024-01-10"), Sao_Paulo).is_err());
    }
}

//! Appointment mutations and the advisory conflict check

use agenda_domain::constants::DEFAULT_DURATION_MINUTES;
use agenda_domain::utils::time::parse_local_input;
use agenda_domain::{Appointment, AppointmentDraft, AppointmentId};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Args, Subcommand};
use dialoguer::{Confirm, Input};

use super::confirm;
use crate::context::AppContext;
use crate::render;

#[derive(Debug, Subcommand)]
pub enum AppointmentCommand {
    /// Book a new appointment
    Create {
        #[command(flatten)]
        booking: BookingArgs,

        /// Book even if the staff member is already busy
        #[arg(long)]
        allow_conflict: bool,
    },
    /// Change an appointment; omitted fields keep their current value
    Update {
        id: String,

        #[command(flatten)]
        booking: BookingArgs,

        /// Save even if the staff member is already busy
        #[arg(long)]
        allow_conflict: bool,
    },
    /// Cancel an appointment
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Cancel every appointment
    DeleteAll {
        /// Confirmation phrase; prompted for when omitted
        #[arg(long)]
        phrase: Option<String>,
    },
    /// Report double bookings without saving anything
    Check {
        #[command(flatten)]
        booking: BookingArgs,

        /// Appointment being edited, ignored when looking for overlaps
        #[arg(long)]
        exclude: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct BookingArgs {
    #[arg(long)]
    pub client: Option<String>,

    #[arg(long)]
    pub staff: Option<String>,

    #[arg(long)]
    pub procedure: Option<String>,

    /// Local start time (e.g., "2024-01-10T10:00")
    #[arg(short, long)]
    pub start: Option<String>,

    /// Length in minutes
    #[arg(short, long)]
    pub duration: Option<i64>,
}

impl BookingArgs {
    /// Build form input, filling gaps from `current` when editing.
    fn draft(&self, tz: Tz, current: Option<&Appointment>) -> Result<AppointmentDraft> {
        let start = match &self.start {
            Some(input) => Some(parse_local_input(input, tz)?),
            None => current.map(|appointment| appointment.start),
        };

        Ok(AppointmentDraft {
            client_id: pick(&self.client, current.and_then(Appointment::client_id).map(|id| id.as_str())),
            staff_id: pick(&self.staff, current.and_then(Appointment::staff_id).map(|id| id.as_str())),
            procedure_id: pick(
                &self.procedure,
                current.and_then(Appointment::procedure_id).map(|id| id.as_str()),
            ),
            start,
            duration_minutes: self
                .duration
                .or_else(|| current.map(|appointment| appointment.duration_minutes))
                .unwrap_or(DEFAULT_DURATION_MINUTES),
        })
    }
}

fn pick(flag: &Option<String>, current: Option<&str>) -> String {
    flag.clone().or_else(|| current.map(str::to_string)).unwrap_or_default()
}

pub async fn run(ctx: &AppContext, command: AppointmentCommand) -> Result<()> {
    match command {
        AppointmentCommand::Create { booking, allow_conflict } => {
            let draft = booking.draft(ctx.tz, None)?;
            if !accept_conflicts(ctx, &draft, None, allow_conflict)? {
                return Ok(());
            }
            let receipt = ctx.sync.create_appointment(&draft).await?;
            render::receipt("Appointment booked", &receipt);
        }
        AppointmentCommand::Update { id, booking, allow_conflict } => {
            let id = AppointmentId::new(id);
            let snapshot = ctx.snapshot()?;
            let current =
                snapshot.appointment(&id).with_context(|| format!("appointment {id} not found"))?;
            let draft = booking.draft(ctx.tz, Some(current))?;
            if !accept_conflicts(ctx, &draft, Some(&id), allow_conflict)? {
                return Ok(());
            }
            let receipt = ctx.sync.update_appointment(&id, &draft).await?;
            render::receipt("Appointment updated", &receipt);
        }
        AppointmentCommand::Delete { id, yes } => {
            let id = AppointmentId::new(id);
            if !confirm(&format!("Cancel appointment {id}?"), yes)? {
                return Ok(());
            }
            let receipt = ctx.sync.delete_appointment(&id).await?;
            render::receipt("Appointment cancelled", &receipt);
        }
        AppointmentCommand::DeleteAll { phrase } => {
            let expected = &ctx.config.sync.delete_all_phrase;
            let phrase = match phrase {
                Some(phrase) => phrase,
                None => Input::<String>::new()
                    .with_prompt(format!("Type \"{expected}\" to cancel every appointment"))
                    .allow_empty(true)
                    .interact_text()?,
            };
            let receipt = ctx.sync.delete_all_appointments(&phrase).await?;
            render::receipt("All appointments cancelled", &receipt);
        }
        AppointmentCommand::Check { booking, exclude } => {
            let exclude = exclude.map(AppointmentId::new);
            let current = match &exclude {
                Some(id) => ctx.snapshot()?.appointment(id).cloned(),
                None => None,
            };
            let draft = booking.draft(ctx.tz, current.as_ref())?;
            match ctx.sync.check_conflict(&draft, exclude.as_ref())? {
                Some(warning) => render::warning(&warning, ctx.sync.snapshot().as_deref(), ctx.tz),
                None => println!("No overlapping appointments"),
            }
        }
    }
    Ok(())
}

/// Show any double booking and decide whether to go ahead with it.
fn accept_conflicts(
    ctx: &AppContext,
    draft: &AppointmentDraft,
    exclude: Option<&AppointmentId>,
    allow_conflict: bool,
) -> Result<bool> {
    let Some(warning) = ctx.sync.check_conflict(draft, exclude)? else {
        return Ok(true);
    };
    render::warning(&warning, ctx.sync.snapshot().as_deref(), ctx.tz);
    if allow_conflict {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt("Book anyway?").default(false).interact()?)
}

#[cfg(test)]
mod tests {
    use agenda_domain::{EntityRef, StaffId};
    use chrono::{TimeZone, Utc};
    use chrono_tz::America::Sao_Paulo;

    use super::*;

    fn empty_args() -> BookingArgs {
        BookingArgs { client: None, staff: None, procedure: None, start: None, duration: None }
    }

    #[test]
    fn new_booking_defaults_to_an_hour() {
        let args = BookingArgs {
            client: Some("c1".into()),
            staff: Some("s1".into()),
            procedure: Some("p1".into()),
            start: Some("2024-01-10T10:00".into()),
            duration: None,
        };
        let draft = args.draft(Sao_Paulo, None).unwrap();
        assert_eq!(draft.duration_minutes, 60);
        assert_eq!(draft.start, Some(Utc.with_ymd_and_hms(2024, 1, 10, 13, 0, 0).unwrap()));
    }

    #[test]
    fn missing_fields_are_left_for_validation() {
        let draft = empty_args().draft(Sao_Paulo, None).unwrap();
        assert!(draft.client_id.is_empty());
        assert!(draft.start.is_none());
        assert!(draft.validate().is_err());
    }

    #[test]
    fn edit_keeps_current_values() {
        let current = Appointment::new("a1", Utc.with_ymd_and_hms(2024, 1, 10, 13, 0, 0).unwrap(), 45)
            .with_staff(EntityRef::new(StaffId::new("s1")));
        let mut args = empty_args();
        args.duration = Some(30);

        let draft = args.draft(Sao_Paulo, Some(&current)).unwrap();
        assert_eq!(draft.staff_id, "s1");
        assert_eq!(draft.start, Some(current.start));
        assert_eq!(draft.duration_minutes, 30);
        assert!(draft.client_id.is_empty());
    }
}

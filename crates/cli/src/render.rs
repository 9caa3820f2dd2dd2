//! Terminal output

use agenda_core::MutationReceipt;
use agenda_domain::utils::time::format_local;
use agenda_domain::{CalendarEvent, Client, ConflictWarning, ScheduleSnapshot};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

fn local_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%H:%M").to_string()
}

pub fn events(events: &[CalendarEvent], snapshot: &ScheduleSnapshot, tz: Tz) {
    if events.is_empty() {
        println!("No appointments in this period");
        return;
    }

    for event in events {
        let staff = event
            .source
            .staff_id()
            .and_then(|id| snapshot.staff_member(id))
            .map_or("-", |staff| staff.name.as_str());
        println!(
            "{}-{}  {:<40} {:<16} [{}]",
            format_local(event.start, tz),
            local_time(event.end, tz),
            event.title,
            staff,
            event.id()
        );
    }
}

pub fn warning(warning: &ConflictWarning, snapshot: Option<&ScheduleSnapshot>, tz: Tz) {
    let staff = snapshot
        .and_then(|snapshot| snapshot.staff_member(&warning.staff_id))
        .map_or_else(|| warning.staff_id.to_string(), |staff| staff.name.clone());

    println!(
        "Warning: {} already has {} appointment(s) between {} and {}",
        staff,
        warning.conflicting.len(),
        format_local(warning.candidate.start(), tz),
        local_time(warning.candidate.end(), tz)
    );
    for id in &warning.conflicting {
        let detail = snapshot
            .and_then(|snapshot| snapshot.appointment(id))
            .map(|appointment| {
                format!("{}-{}", format_local(appointment.start, tz), local_time(appointment.end(), tz))
            })
            .unwrap_or_default();
        println!("  {id} {detail}");
    }
}

pub fn clients(clients: &[Client]) {
    for client in clients {
        println!(
            "{:<12} {:<32} {:<16} {}",
            client.id,
            client.name,
            client.legal_id.as_deref().unwrap_or("-"),
            client.phone.as_deref().unwrap_or("-")
        );
    }
}

pub fn client_details(client: &Client) {
    println!("Id:         {}", client.id);
    println!("Name:       {}", client.name);
    println!("Email:      {}", client.email.as_deref().unwrap_or("-"));
    println!("Phone:      {}", client.phone.as_deref().unwrap_or("-"));
    println!("CPF:        {}", client.legal_id.as_deref().unwrap_or("-"));
    println!(
        "Birth date: {}",
        client.birth_date.map_or_else(|| "-".to_string(), |date| date.format("%Y-%m-%d").to_string())
    );
}

pub fn receipt(done: &str, receipt: &MutationReceipt) {
    println!("{done}");
    if !receipt.refreshed {
        println!("Saved, but the schedule could not be reloaded; the listing may be out of date.");
    }
}

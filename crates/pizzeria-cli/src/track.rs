//! `track` command: print tracker statuses for a phone number.

use std::io::{BufRead, Write};

use pizzeria_client::{ErrorKind, PowerClient};

use crate::prompt::Prompter;

/// Looks up and prints recent orders for `phone`.
///
/// An undecodable tracker response is reported as a warning and is not an
/// error.
///
/// # Errors
///
/// Returns an error if the phone prompt fails, the phone is blank, or the
/// tracker cannot be reached.
pub(crate) async fn run_track<R: BufRead, W: Write>(
    client: &PowerClient,
    prompter: &mut Prompter<R, W>,
    phone: Option<String>,
) -> anyhow::Result<()> {
    let phone = prompter.ask_unless(phone, "Phone number")?;

    let entries = match client.track_orders(&phone).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::Decode => {
            tracing::warn!(error = %e, "tracker response could not be decoded");
            prompter.say(format!("warning: could not read tracker response: {e}"))?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if entries.is_empty() {
        prompter.say("No recent orders for that phone number.")?;
        return Ok(());
    }

    for entry in &entries {
        let mut line = entry.status.clone();
        if let Some(id) = &entry.order_id {
            line = format!("{id}: {line}");
        }
        if let Some(description) = &entry.description {
            line.push_str(&format!(" ({description})"));
        }
        prompter.say(line)?;
    }
    Ok(())
}

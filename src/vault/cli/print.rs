use chrono::{DateTime, Utc};
use colored::Colorize;
use std::io::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vault::commands::{CmdMessage, MessageLevel};
use vault::model::Record;
use vault::query::Stats;

const VALUE_WIDTH: usize = 40;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> std::io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

pub(super) fn print_error<W: Write>(out: &mut W, error: &dyn std::fmt::Display) -> std::io::Result<()> {
    writeln!(out, "{}", format!("Error: {}", error).red())
}

/// `ID: 1 | Name: Alice | Value: x` plus how long ago it last changed.
pub(super) fn print_records<W: Write>(out: &mut W, records: &[Record]) -> std::io::Result<()> {
    let now = Utc::now();
    for r in records {
        let value = truncate_to_width(&r.value, VALUE_WIDTH);
        let line = format!("ID: {} | Name: {} | Value: {}", r.id, r.name, value);
        let ago = match r.last_modified().as_datetime() {
            Some(at) => format_time_ago(at, now),
            None => String::new(),
        };
        writeln!(out, "{}  {}", line, ago.dimmed())?;
    }
    Ok(())
}

/// Sorted output shows the creation time instead of the value.
pub(super) fn print_sorted<W: Write>(out: &mut W, records: &[Record]) -> std::io::Result<()> {
    for r in records {
        writeln!(out, "ID: {} | Name: {} | Created: {}", r.id, r.name, r.created)?;
    }
    Ok(())
}

pub(super) fn print_stats<W: Write>(out: &mut W, stats: &Stats) -> std::io::Result<()> {
    let date = |d: Option<DateTime<Utc>>| {
        d.map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    };
    let last_modified = stats
        .last_modified
        .map(|d| d.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_else(|| "N/A".to_string());

    writeln!(out, "{}", "Vault Statistics:".bold())?;
    writeln!(out, "--------------------------")?;
    writeln!(out, "Total Records: {}", stats.total_records)?;
    writeln!(out, "Last Modified: {}", last_modified)?;
    writeln!(
        out,
        "Longest Name: {} ({} characters)",
        stats.longest_name.name, stats.longest_name_len
    )?;
    writeln!(out, "Earliest Record: {}", date(stats.earliest))?;
    writeln!(out, "Latest Record: {}", date(stats.latest))?;
    Ok(())
}

pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(at);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

use super::print::{print_error, print_messages, print_records, print_sorted, print_stats};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::Path;
use vault::api::VaultApi;
use vault::commands::CmdResult;
use vault::error::Result;
use vault::store::RecordStore;

const BANNER: &str = "\
===== Vault =====
1. Add Record
2. List Records
3. Update Record
4. Delete Record
5. Exit
6. Search Records
7. Sort Records
8. Export Data
9. View Vault Statistics
=================";

/// What the loop should do after an option ran.
enum Flow {
    Continue,
    Exit,
}

/// Run the numbered menu until the user picks Exit or input ends.
///
/// Errors from an option are printed and the menu is shown again; only
/// failures writing to `out` end the loop early.
pub(super) fn run<S, R, W>(
    api: &mut VaultApi<S>,
    mut input: R,
    out: &mut W,
    export_file: &Path,
) -> Result<()>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(out)?;
        writeln!(out, "{}", BANNER.bold())?;

        let Some(choice) = prompt(&mut input, out, "Choose option: ")? else {
            return say_goodbye(out);
        };

        match handle_choice(api, &mut input, out, choice.trim(), export_file) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return say_goodbye(out),
            Err(e) => {
                tracing::debug!(error = %e, "menu option failed");
                print_error(out, &e)?;
            }
        }
    }
}

fn handle_choice<S, R, W>(
    api: &mut VaultApi<S>,
    input: &mut R,
    out: &mut W,
    choice: &str,
    export_file: &Path,
) -> Result<Flow>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    match choice {
        "1" => {
            let Some(name) = prompt(input, out, "Enter name: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(value) = prompt(input, out, "Enter value: ")? else {
                return Ok(Flow::Exit);
            };
            let result = api.add_record(&name, &value)?;
            print_messages(out, &result.messages)?;
        }
        "2" => {
            let result = api.list_records()?;
            show_listing(out, &result)?;
        }
        "3" => {
            let Some(id) = prompt(input, out, "Enter record ID to update: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(name) = prompt(input, out, "New name: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(value) = prompt(input, out, "New value: ")? else {
                return Ok(Flow::Exit);
            };
            let result = api.update_record(&id, &name, &value)?;
            print_messages(out, &result.messages)?;
        }
        "4" => {
            let Some(id) = prompt(input, out, "Enter record ID to delete: ")? else {
                return Ok(Flow::Exit);
            };
            let result = api.delete_record(&id)?;
            print_messages(out, &result.messages)?;
        }
        "5" => return Ok(Flow::Exit),
        "6" => {
            let Some(keyword) = prompt(input, out, "Enter search keyword (Name or ID): ")? else {
                return Ok(Flow::Exit);
            };
            let result = api.search(&keyword)?;
            show_listing(out, &result)?;
        }
        "7" => {
            let Some(field) = prompt(input, out, "Sort by field (Name/Created): ")? else {
                return Ok(Flow::Exit);
            };
            let Some(order) = prompt(input, out, "Order (Ascending/Descending): ")? else {
                return Ok(Flow::Exit);
            };
            let result = api.sort(&field, &order)?;
            print_messages(out, &result.messages)?;
            print_sorted(out, &result.listed_records)?;
        }
        "8" => {
            let result = api.export(export_file)?;
            print_messages(out, &result.messages)?;
        }
        "9" => {
            let result = api.stats()?;
            if let Some(stats) = &result.stats {
                print_stats(out, stats)?;
            }
            print_messages(out, &result.messages)?;
        }
        _ => writeln!(out, "{}", "Invalid option.".red())?,
    }
    Ok(Flow::Continue)
}

fn show_listing<W: Write>(out: &mut W, result: &CmdResult) -> Result<()> {
    print_messages(out, &result.messages)?;
    print_records(out, &result.listed_records)?;
    Ok(())
}

fn say_goodbye<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Exiting Vault...")?;
    Ok(())
}

/// Show `label`, read one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Some(trimmed.to_string()))
}

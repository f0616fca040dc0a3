#![cfg(feature = "cli")]

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::arg;
use tracing_subscriber::EnvFilter;
use walnut_zonecheck::{
    Configuration, ValidationError,
    rr::{SoaContent, check_rr_priority, validate_content},
    serial::next_serial_from_str,
};

fn main() -> ExitCode {
    match zonecheck() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn zonecheck() -> Result<bool, String> {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = clap::Command::new("walnut-zonecheck")
        .about("Advance SOA serials and validate DNS record content")
        .subcommand_required(true)
        .args([
            arg!(--date <DATE> "Date to use as today (YYYY-MM-DD)")
                .value_parser(clap::value_parser!(NaiveDate))
                .global(true),
            arg!(--"utc-offset" <SECONDS> "Offset from UTC used to determine today")
                .value_parser(clap::value_parser!(i32))
                .allow_hyphen_values(true)
                .global(true),
            arg!(--"record-type" <TYPE> "Accept an additional record type")
                .action(clap::ArgAction::Append)
                .global(true),
        ])
        .subcommand(
            clap::Command::new("next-serial")
                .about("Print the serial that follows SERIAL")
                .arg(arg!(<SERIAL> "Current SOA serial")),
        )
        .subcommand(
            clap::Command::new("bump-soa")
                .about("Print SOA content with its serial advanced")
                .arg(arg!(<CONTENT> "SOA record content")),
        )
        .subcommand(
            clap::Command::new("check")
                .about("Validate record content")
                .arg(arg!(<TYPE> "Record type"))
                .arg(arg!(<CONTENT> "Record content"))
                .arg(arg!(--priority <PRIORITY> "Record priority").allow_hyphen_values(true)),
        );

    let args = app.get_matches();
    let Some((command, matches)) = args.subcommand() else {
        return Err("no command given".to_owned());
    };

    let mut config = Configuration::new().with_record_types(
        matches
            .get_many::<String>("record-type")
            .into_iter()
            .flatten()
            .cloned(),
    );
    if let Some(offset) = matches.get_one::<i32>("utc-offset") {
        config = config.with_utc_offset(*offset);
    }
    let today = matches
        .get_one::<NaiveDate>("date")
        .copied()
        .unwrap_or_else(|| config.today());

    match command {
        "next-serial" => {
            let serial = required(matches, "SERIAL")?;
            println!("{}", next_serial_from_str(serial, today));
            Ok(true)
        }
        "bump-soa" => {
            let content = required(matches, "CONTENT")?;
            println!(
                "{}",
                walnut_zonecheck::compute_updated_soa_content(content, today)
            );
            Ok(true)
        }
        "check" => {
            let rtype = required(matches, "TYPE")?;
            let content = required(matches, "CONTENT")?;
            let priority = matches.get_one::<String>("priority");

            match check(&config, rtype, content, priority) {
                Ok(()) => {
                    println!("ok");
                    Ok(true)
                }
                Err(error) => {
                    println!("invalid: {error}");
                    Ok(false)
                }
            }
        }
        other => Err(format!("unknown command {other}")),
    }
}

fn check(
    config: &Configuration,
    rtype: &str,
    content: &str,
    priority: Option<&String>,
) -> Result<(), ValidationError> {
    let table = config.record_types();
    validate_content(rtype, content, &table)?;

    if let Some(priority) = priority {
        check_rr_priority(priority, rtype, &table)?;
    }

    if rtype.eq_ignore_ascii_case("SOA") {
        if let Ok(soa) = SoaContent::parse(content) {
            for warning in soa.warnings() {
                eprintln!("warning: {warning}");
            }
        }
    }

    Ok(())
}

fn required<'a>(matches: &'a clap::ArgMatches, id: &str) -> Result<&'a str, String> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| format!("{id} is required"))
}

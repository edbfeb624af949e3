//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use domcheck::{DohResponse, DomainRecord, DomainSet, Presence};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tabled::{settings::Style, Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "DMARC")]
    dmarc: String,
    #[tabled(rename = "SPF")]
    spf: String,
    #[tabled(rename = "rDNS")]
    rdns: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&DomainRecord> for RecordRow {
    fn from(record: &DomainRecord) -> Self {
        let status = if record.checking {
            "checking".yellow().to_string()
        } else if let Some(error) = &record.error {
            error.red().to_string()
        } else if record.is_checked() {
            "ok".green().to_string()
        } else {
            "not checked".dimmed().to_string()
        };

        Self {
            domain: record.domain.clone(),
            dmarc: presence_cell(record.dmarc).to_string(),
            spf: presence_cell(record.spf).to_string(),
            rdns: presence_cell(record.rdns).to_string(),
            status,
        }
    }
}

fn presence_cell(presence: Presence) -> ColoredString {
    match presence {
        Presence::Present => "found".green(),
        Presence::Absent => "missing".red(),
        Presence::Unknown => "-".dimmed(),
    }
}

/// CSV cell for a tri-state flag: `true`, `false` or empty.
fn presence_csv(presence: Presence) -> String {
    presence.as_bool().map(|b| b.to_string()).unwrap_or_default()
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Print extracted domain names.
pub fn print_domains(domains: &[&str], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(domains)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(domains)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["domain"])?;
            for domain in domains {
                writer.write_record([domain])?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            if domains.is_empty() {
                println!("{}", "No domains found.".dimmed());
                return Ok(());
            }
            println!(
                "{}",
                format!("Found {} domain{}", domains.len(), plural(domains.len())).bold()
            );
            println!();
            for domain in domains {
                println!("  {}", domain.cyan());
            }
        }
    }

    Ok(())
}

/// Print domain records with their check state.
pub fn print_records(set: &DomainSet, format: OutputFormat) -> Result<()> {
    let records = set.records();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&records)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["domain", "dmarc", "spf", "rdns", "error"])?;
            for r in &records {
                writer.write_record([
                    r.domain.clone(),
                    presence_csv(r.dmarc),
                    presence_csv(r.spf),
                    presence_csv(r.rdns),
                    r.error.clone().unwrap_or_default(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            if records.is_empty() {
                println!("{}", "No domains found.".dimmed());
                return Ok(());
            }

            let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{table}");

            let failed = records.iter().filter(|r| r.error.is_some()).count();
            println!();
            println!(
                "{} domain{} checked, {} failed",
                records.len(),
                plural(records.len()),
                if failed == 0 {
                    failed.to_string().green()
                } else {
                    failed.to_string().red()
                }
            );
        }
    }

    Ok(())
}

/// Print a raw resolver response.
pub fn print_response(name: &str, response: &DohResponse, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(response)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["name", "type", "ttl", "data"])?;
            for a in &response.answer {
                writer.write_record([
                    a.name.clone(),
                    a.record_type.to_string(),
                    a.ttl.to_string(),
                    a.data.clone(),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Pretty => {
            println!("{} {}", "Name:".bold(), name.cyan());
            println!("{} {}", "Status:".bold(), rcode_name(response.status));
            if let Some(comment) = &response.comment {
                println!("{} {}", "Comment:".bold(), comment.dimmed());
            }
            println!();

            if response.answer.is_empty() {
                println!("{}", "No records.".dimmed());
            } else {
                println!("{}", "Answers:".bold().underline());
                for a in &response.answer {
                    println!("  {:6} {:>6}  {}", a.record_type.to_string().yellow(), a.ttl, a.data);
                }
            }
        }
    }

    Ok(())
}

/// Human name for a DNS response code.
fn rcode_name(status: u32) -> String {
    let name = match status {
        0 => "NOERROR",
        1 => "FORMERR",
        2 => "SERVFAIL",
        3 => "NXDOMAIN",
        4 => "NOTIMP",
        5 => "REFUSED",
        _ => return status.to_string(),
    };
    format!("{name} ({status})")
}

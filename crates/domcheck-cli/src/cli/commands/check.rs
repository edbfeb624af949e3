//! `domcheck check` - Check DMARC, SPF and reverse DNS records.

use anyhow::{Context as _, Result};
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use domcheck::{validate_domain, DomainSet};

use super::Context;
use crate::cli::args::CheckArgs;
use crate::education::Explain;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: Context, args: CheckArgs) -> Result<()> {
    let mut set = if args.domains.is_empty() {
        DomainSet::from_text(&args.input.read()?)
    } else {
        DomainSet::from_domains(parse_domains(&args.domains)?)
    };

    if ctx.explain {
        Explain::check(set.len(), ctx.resolver.url()).print();
    }

    if set.is_empty() {
        return output::print_records(&set, ctx.output_format);
    }

    let checker = ctx.checker()?;
    let concurrency = args.concurrency.unwrap_or(ctx.concurrency).max(1);
    let domains: Vec<String> = set.domains().into_iter().map(String::from).collect();
    debug!(count = domains.len(), concurrency, "starting checks");

    for domain in &domains {
        set.begin_check(domain);
    }

    let progress = progress_bar(&ctx, domains.len())?;

    // Checks run concurrently; outcomes are applied here, one at a time, by key.
    let checker = &checker;
    let mut outcomes = stream::iter(domains)
        .map(|domain| async move {
            let outcome = checker.check(&domain).await;
            (domain, outcome)
        })
        .buffer_unordered(concurrency);

    while let Some((domain, outcome)) = outcomes.next().await {
        progress.set_message(domain.clone());
        set.apply(&domain, &outcome);
        progress.inc(1);
    }
    progress.finish_and_clear();

    output::print_records(&set, ctx.output_format)
}

/// Validate explicitly supplied domains, splitting comma-separated values.
fn parse_domains(raw: &[String]) -> Result<Vec<String>> {
    raw.iter()
        .flat_map(|d| d.split(','))
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| validate_domain(d).with_context(|| format!("Cannot check '{d}'")))
        .collect()
}

/// Progress bar on stderr, shown only for pretty output on a terminal.
fn progress_bar(ctx: &Context, len: usize) -> Result<ProgressBar> {
    if ctx.output_format != OutputFormat::Pretty || !console::Term::stderr().is_term() {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    Ok(bar)
}

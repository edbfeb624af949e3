//! `domcheck lookup` - Query the resolver directly.

use anyhow::{Context as _, Result};

use super::Context;
use crate::cli::args::LookupArgs;
use crate::education::Explain;
use crate::output;

pub async fn execute(ctx: Context, args: LookupArgs) -> Result<()> {
    if ctx.explain {
        Explain::lookup(&args.name, args.record_type, ctx.resolver.url()).print();
    }

    let client = ctx.client()?;

    let response = client
        .records()
        .query(args.name.trim())
        .record_type(args.record_type)
        .dnssec(args.dnssec)
        .send()
        .await
        .with_context(|| format!("{} lookup for {} failed", args.record_type, args.name))?;

    output::print_response(&args.name, &response, ctx.output_format)
}

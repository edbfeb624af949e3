//! `domcheck extract` - Extract domain names from text.

use anyhow::Result;
use domcheck::DomainSet;

use super::Context;
use crate::cli::args::ExtractArgs;
use crate::education::Explain;
use crate::output;

pub async fn execute(ctx: Context, args: ExtractArgs) -> Result<()> {
    if ctx.explain {
        Explain::extract().print();
    }

    let text = args.input.read()?;
    let set = DomainSet::from_text(&text);

    output::print_domains(&set.domains(), ctx.output_format)
}

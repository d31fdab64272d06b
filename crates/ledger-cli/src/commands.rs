use anyhow::Result;
use tracing::info_span;

use ledger_cli::generate::{GenerateOutcome, GenerateRequest, generate, merged_config};
use ledger_ingest::AgencyDirectory;

use crate::cli::{AgenciesArgs, GenerateArgs};
use crate::summary::print_agencies;

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateOutcome> {
    let config = merged_config(args.config.as_deref(), args.config_overrides())?;
    let request = GenerateRequest {
        input: args.input.clone(),
        output: args.output.clone(),
        config,
        dry_run: args.dry_run,
    };
    generate(&request)
}

pub fn run_agencies(args: &AgenciesArgs) -> Result<()> {
    let _guard = info_span!("agencies", dir = %args.agency_dir.display()).entered();
    let directory = AgencyDirectory::load(&args.agency_dir);
    print_agencies(&directory);
    Ok(())
}

use clap::Parser;
use log::info;
use wikidata_backlinks::{input, logging, prelude::*};

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> Result<(), BacklinkError> {
    logging::init();
    let config = Config::try_from(Args::parse())?;

    let names = input::load_names_from_path(config.input(), config.column())?;

    let mut builder =
        WikidataApi::builder(config.api_url())?.with_language(config.language().clone());
    if let Some(user_agent) = config.user_agent() {
        builder = builder.with_user_agent(user_agent);
    }
    let api = builder.build();

    // Header is written right away; every row is flushed as soon as it is known
    let mut writer = ResultWriter::create(config.output())?;

    let pipeline = Pipeline::new(&api, &api, TokioWait)
        .with_max_attempts(config.max_attempts())
        .with_retry_delay(config.retry_delay());
    let summary = pipeline.run(&names, &mut writer).await?;

    info!(
        "Wrote {} rows to {} ({} resolved, {} unavailable)",
        summary.rows,
        config.output().display(),
        summary.resolved,
        summary.unavailable
    );
    Ok(())
}

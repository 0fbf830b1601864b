//! Configuration filter: print it, or fetch the configuration it selects.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use junosnap_api::AnyTransport;
use junosnap_core::{ConfigFilter, Poller};

use crate::cli::{FilterArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Fetched<'a> {
    host: &'a str,
    configuration: Value,
}

/// Print the XML filter. Needs no device.
pub fn print(args: &FilterArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let filter = ConfigFilter::new(&args.paths)?;
    debug!(filter = %filter, "built configuration filter");
    output::print_output(&filter.to_xml(), global.quiet);
    Ok(())
}

/// Fetch the filtered configuration from every device.
pub async fn fetch(
    args: &FilterArgs,
    pollers: &[Poller<AnyTransport>],
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let paths = args.paths.as_slice();
    let replies = futures::future::join_all(pollers.iter().map(|p| p.raw_config(paths))).await;
    let mut fetched = Vec::with_capacity(replies.len());
    for (poller, reply) in pollers.iter().zip(replies) {
        fetched.push(Fetched {
            host: poller.host(),
            configuration: reply?,
        });
    }

    let out = match fetched.as_slice() {
        [single] => output::render_structured(global.output, &single.configuration)?,
        many => output::render_structured(global.output, many)?,
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

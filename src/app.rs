//! Application flow
//!
//! Validates everything up front, then hands the request to the dispatcher.
//! Any error returned from [`run`] happened before a single host was
//! contacted; per-host problems only ever reach the reporter.

use crate::cli::Cli;
use crate::dispatch::{Dispatcher, OutcomeReporter};
use crate::domain::ports::SessionConnector;
use crate::error::Result;
use crate::hosts::load_hosts;
use crate::volume::VolumeRequest;
use std::sync::Arc;
use tracing::info;

/// Build the request, load the hosts and configure every host.
///
/// Returns the number of hosts a task was dispatched for.
pub async fn run(
    cli: &Cli,
    connector: Arc<dyn SessionConnector>,
    reporter: Arc<dyn OutcomeReporter>,
) -> Result<usize> {
    cli.validate()?;

    let credentials = cli.credentials();
    let request = VolumeRequest::build(&cli.volume_params(), &credentials)?;
    let hosts = load_hosts(cli.files.as_deref(), &cli.host)?;

    info!(
        controller = cli.controller,
        level = %cli.level,
        hosts = hosts.len(),
        "Configuring RAID volume"
    );

    let dispatcher = Dispatcher::new(cli.dispatcher_config(), connector, reporter);
    Ok(dispatcher.dispatch(hosts, request, credentials).await)
}

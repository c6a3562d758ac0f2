use anyhow::{Context, Result};

use crate::{
    bus,
    cli::{Cli, Command},
    domain, infra, ui,
    usecases::{
        self,
        bootstrap::{self, ConfigOverrides},
    },
};

const BUS_CONNECT_FAILED: &str = "BUS_CONNECT_FAILED";

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let context = bootstrap::bootstrap(overrides(&cli))?;

            tracing::debug!(
                ui = ui::module_name(),
                domain = domain::module_name(),
                bus = bus::module_name(),
                usecases = usecases::module_name(),
                infra = infra::module_name(),
                "module boundaries loaded"
            );

            let mut session = match bootstrap::compose_session(&context) {
                Ok(session) => session,
                Err(error) => {
                    tracing::error!(
                        code = BUS_CONNECT_FAILED,
                        url = %context.config.bus.url,
                        error = %error,
                        "could not reach the message bus"
                    );
                    return Err(error).context("message bus is unavailable");
                }
            };

            ui::shell::start(
                &context,
                &mut session.event_source,
                &mut session.controller,
                &mut session.bus,
                session.inbound_tx.clone(),
            )?;
        }
    }

    Ok(())
}

fn overrides(cli: &Cli) -> ConfigOverrides<'_> {
    ConfigOverrides {
        config_path: cli.config.as_deref(),
        url: cli.url.as_deref(),
        name: cli.name.as_deref(),
    }
}

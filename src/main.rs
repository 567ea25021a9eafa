use clap::Parser;
use color_eyre::Result;

use sysmon::config::Config;
use sysmon::controller::Controller;
use sysmon::event::EventHandler;
use sysmon::system::kill::LibcSignaler;
use sysmon::system::source::FsProcSource;
use sysmon::terminal::{TerminalGuard, install_panic_hook};

#[derive(Parser)]
#[command(
    name = "sysmon",
    version,
    about = "Simple top-like process monitor for Linux"
)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _cli = Cli::parse();

    #[cfg(feature = "perf-tracing")]
    sysmon::perf::init_tracing_json(std::path::Path::new(sysmon::perf::DEFAULT_SPAN_LOG))?;

    let config = Config::default();
    let source = FsProcSource::new(config.proc_root.clone());
    let mut controller = Controller::new(source, LibcSignaler, config);

    let mut guard = TerminalGuard::acquire()?;
    install_panic_hook();

    let mut events = EventHandler::new();
    controller.run(guard.terminal(), &mut events).await
}

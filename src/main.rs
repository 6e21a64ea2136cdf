use anyhow::Context;
use log::{LevelFilter, Log};

use sen_build::config::{self, CONFIG_FILE_NAME};
use sen_build::{run_cli, HostPlatform, Registry, RunLogger, ShellRunner, Workspace};

fn main() -> anyhow::Result<()> {
    let workspace = Workspace::from_process_cwd().context("Failed to read current directory")?;
    let invocation_dir = workspace.current_directory().to_path_buf();

    let config = config::load_or_default(&invocation_dir)
        .with_context(|| format!("Failed to load {}", CONFIG_FILE_NAME))?;

    // The log file is only created once the run gets past its precondition.
    let logger = RunLogger::with_file(&invocation_dir.join(&config.log_dir), LevelFilter::Info);
    let log_file = logger.log_file();
    if let Err(e) = logger.install() {
        eprintln!("[Main] WARNING: Failed to set global logger: {}", e);
    }

    log::info!("Sen.Environment builder {}", sen_build::VERSION);

    let result = run_cli(
        workspace,
        &config,
        HostPlatform,
        ShellRunner,
        Registry::standard(),
        log_file.as_ref(),
    );
    Log::flush(log::logger());

    result.map(|_| ()).map_err(|e| {
        log::error!("{}", e.user_message());
        anyhow::Error::new(e)
    })
}

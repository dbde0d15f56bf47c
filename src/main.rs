use std::process::ExitCode;

use anyhow::Context;
use tokio::runtime::Builder;
use tokio::signal;

use imgur_dl::cli::{Cli, CommandFactory, Parser};
use imgur_dl::config::Config;
use imgur_dl::fetch::HttpFetcher;
use imgur_dl::logging::init_logging;
use imgur_dl::session::{Report, Session};

#[inline]
async fn async_main(config: Config, targets: &[String]) -> anyhow::Result<Report> {
    let fetcher = HttpFetcher::build(&config).context("failed to build reqwest client")?;

    let session = Session::build(fetcher, config.download_dir, config.policy)
        .await
        .context("Unable to ensure the existence of the download directory")?;

    session.run(targets).await.context("download aborted")
}

fn main() -> anyhow::Result<ExitCode> {
    // here, if parse fails, the program will exit with clap's error code,
    // it's okay, because we don't need to clean up anything.
    let cli = Cli::parse();

    let config = match cli.config(&mut Cli::command()) {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            return Ok(ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2)));
        }
    };

    init_logging(cli.verbose);

    // everything is awaited in order, one thread is all we need
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let report = runtime.block_on(async {
        tokio::select! {
            result = async_main(config, &cli.targets) => result.map(Some),
            result = signal::ctrl_c() => {
                result.context("failed to listen for ctrl-c signal")?;
                eprintln!("Ctrl-C received, exiting...");
                Ok(None)
            },
        }
    })?;

    let Some(report) = report else {
        return Ok(ExitCode::FAILURE);
    };

    let success = report.is_success();
    // why `{:#}`: https://docs.rs/anyhow/1.0.86/anyhow/struct.Error.html#display-representations
    for (input, err) in report.failed {
        eprintln!("{input}: {:#}", anyhow::Error::from(err));
    }
    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

// ant-tools: forwards every argument to the configured ant-tools executable
// and prints its records to stdout.
//
// Configuration comes from the environment only (ANT_TOOLS_BIN,
// ANT_TOOLS_OUTPUT, ANT_TOOLS_TIMEOUT_SECS, RUST_LOG).

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use ant_tools_adapter::{AntToolsError, ProcessAdapter};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match forward().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ant-tools: {e:#}");
            let code = e
                .downcast_ref::<AntToolsError>()
                .map_or(1, AntToolsError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

async fn forward() -> Result<()> {
    let args = std::env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| anyhow!("argument is not valid UTF-8: {raw:?}"))
        })
        .collect::<Result<Vec<String>>>()?;

    let adapter = ProcessAdapter::from_env()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::debug!("Interrupted, stopping ant-tools");
            on_interrupt.cancel();
        }
    });

    let mut records = adapter
        .invocation(args)
        .skip_blank_lines(true)
        .cancel_token(cancel)
        .spawn()
        .await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    while let Some(item) = records.next_record().await {
        let record = match item {
            Ok(record) => record,
            Err(e) if e.is_per_record() => {
                log::warn!("{e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = writeln!(out, "{record}") {
            records.close().await?;
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(e).context("writing to stdout");
        }
    }

    out.flush().context("flushing stdout")?;
    Ok(())
}

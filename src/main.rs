use anyhow::Result;
use sigsync::cli::{App, Args};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse_args();
    let mut app = App::from_args(&args)?;
    app.init_logging(&args)?;

    // Failures past this point are already logged to the console and log file
    if app.run(args).await.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

// src/main.rs

use esqlate_startup::dispatch::reject_arguments;
use esqlate_startup::pipeline::Registry;
use esqlate_startup::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("esqlate-startup error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = match cli::try_parse() {
        Ok(args) => args,
        // `--help` and `--version` print to stdout and exit 0.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let mut stderr = std::io::stderr();
            return Ok(reject_arguments(&err, &Registry::standard(), &mut stderr));
        }
    };
    logging::init_logging(args.log_level)?;
    run(args).await
}

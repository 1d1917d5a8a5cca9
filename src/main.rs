use std::process;

use prompt_spec::cli::{build_command, parameters_from_matches};
use prompt_spec::PromptSpec;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_command("prompt-spec").get_matches();
    if let Err(e) = run(&matches).await {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

async fn run(matches: &clap::ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let path = matches
        .get_one::<String>("file")
        .ok_or("missing prompt spec path")?;
    let parameters = parameters_from_matches(matches)?;

    let mut spec = PromptSpec::new(path, !matches.get_flag("no-validate"))?;
    if let Some(model) = matches.get_one::<String>("model") {
        spec = spec.with_model(model.clone());
    }

    let output = if matches.get_flag("dry-run") {
        serde_json::to_string_pretty(&spec.prepare(&parameters)?.redacted())?
    } else {
        serde_json::to_string_pretty(&spec.call(&parameters).await?)?
    };
    println!("{output}");
    Ok(())
}

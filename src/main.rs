use eyre::{Result, bail};
use std::sync::Arc;

use firemon::{FirebaseClassifier, ScanConfig, Scheduler};

const BANNER: &str = r#"
   _____.__                                     
 _/ ____\__|______   ____   _____   ____   ____  
 \   __\|  \_  __ \_/ __ \ /     \ /  _ \ /    \ 
  |  |  |  ||  | \/\  ___/|  Y Y  (  <_> )   |  \
  |__|  |__||__|    \___  >__|_|  /\____/|___|  /
                        \/      \/            \/ 
        Firebase Realtime Database scanner
"#;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = firemon::cli::parse();

    if let Err(e) = firemon::init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {:#}", e);
    }

    // stdout carries only the report
    eprintln!("{}", BANNER);

    let config = ScanConfig::from(&cli);
    log::debug!("[main] config: {:?}", config);

    if cli.inputs.is_empty() {
        bail!("Please provide at least one URL or a file containing URLs");
    }

    let targets = firemon::input::resolve_targets(&cli.inputs);
    if targets.is_empty() {
        bail!("No valid Firebase URLs found");
    }

    log::info!("Processing {} URLs with concurrency {}", targets.len(), config.concurrency);

    let classifier = Arc::new(FirebaseClassifier::new(config.timeout)?);
    let results = Scheduler::new(classifier)
        .with_concurrency(config.concurrency)
        .run(targets)
        .await;

    let rendered = firemon::report::report(&results, &config)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    Ok(())
}

//! Command handlers

use std::io;
use std::path::Path;

use bcsort_app::app::{run_classification, run_demo, Interaction};
use bcsort_app::browser::{Browser, ConsoleBrowser, SystemBrowser};
use bcsort_app::config::Config;
use bcsort_app::demo::is_demo_input;
use bcsort_app::keys::select_key_source;
use bcsort_types::{Error, Result};

use crate::cli::Cli;
use crate::output::{print_demo_result, print_summary};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Override from CLI args
    apply_overrides(&mut config, &cli);
    config.validate()?;

    if cli.show_config {
        println!("{}", config);
        return Ok(());
    }

    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| Error::FileNotFound("no input file given".to_string()))?;

    tracing::debug!(input, no_browser = cli.no_browser, "starting run");

    let mut keys = select_key_source(cli.line_input);
    let mut browser: Box<dyn Browser> = if cli.no_browser {
        Box::new(ConsoleBrowser::stdout())
    } else {
        Box::new(SystemBrowser)
    };
    let mut stdout = io::stdout();
    let mut interaction = Interaction::new(keys.as_mut(), browser.as_mut(), &mut stdout);

    if is_demo_input(input) {
        let result = run_demo(&config, &mut interaction)?;
        print_demo_result(&result);
    } else {
        let summary = run_classification(Path::new(input), &config, &mut interaction)?;
        print_summary(&summary);
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    let columns = [
        (&cli.plate_col, &mut config.plate_column),
        (&cli.bc_col, &mut config.decision_column),
        (&cli.body_col, &mut config.body_column),
        (&cli.make_col, &mut config.make_column),
        (&cli.model_col, &mut config.model_column),
        (&cli.seats_col, &mut config.seats_column),
        (&cli.gross_weight_col, &mut config.gross_weight_column),
        (&cli.unladen_weight_col, &mut config.unladen_weight_column),
    ];
    for (flag, field) in columns {
        if let Some(name) = flag {
            *field = name.clone();
        }
    }

    if let Some(ref body_types) = cli.body_types {
        config.body_types = body_types
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
    if cli.all_body_types {
        config.body_types.clear();
    }
    if cli.no_auto_minibus {
        config.auto_minibus = false;
    }
    if cli.start_new {
        config.trust_previous = false;
    }
    if cli.store.is_some() {
        config.store_path = cli.store.clone();
    }
    if cli.city.is_some() {
        config.city = cli.city.clone();
    }
    if let Some(ref url) = cli.search_url {
        config.search_url = url.clone();
    }
    if let Some(format) = cli.output_format {
        config.output_format = format;
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result, bail};
use config::Config;
use promptdeck_app::AppState;
use promptdeck_client::{PromptStore, RestStore};
use promptdeck_testkit::MemoryStore;
use runtime::StoreRuntime;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `promptdeck --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let mut state = AppState::default();
    state.demo_banner = options.demo || config.demo_banner();

    if options.demo {
        if options.check_only {
            return Ok(());
        }
        let mut runtime = StoreRuntime::new(MemoryStore::with_samples());
        return promptdeck_tui::run_app(&mut state, &mut runtime);
    }

    let Some(base_url) = config.store_base_url() else {
        bail!(
            "no store configured -- set [store].base_url in {} (or PROMPTDECK_STORE_URL), or launch with --demo",
            options.config_path.display()
        );
    };
    let Some(api_key) = config.store_api_key() else {
        bail!(
            "no store credentials -- set [store].api_key in {} (or PROMPTDECK_STORE_KEY)",
            options.config_path.display()
        );
    };

    let store = RestStore::new(&base_url, &api_key, config.store_timeout()?).with_context(|| {
        format!(
            "invalid [store] config in {}; fix base_url/api_key/timeout values",
            options.config_path.display()
        )
    })?;

    if options.check_only {
        store.health_check()?;
        println!("store reachable at {base_url}");
        return Ok(());
    }

    let mut runtime = StoreRuntime::new(store);
    promptdeck_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        demo: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("promptdeck");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch with seeded sample prompts (in-memory)");
    println!("  --check                  Validate config and store reachability");
    println!("  --help                   Show this help");
}

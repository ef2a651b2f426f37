// Maskrs CLI
// Masks values from arguments or stdin and replays keystroke scripts against a field

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use maskrs_core::{
    mask, parse_edit_script, Config, EditStep, FieldEvent, MaskConfig, MaskResult, MaskSpec,
    TranslationTable,
};

/// Input mask formatter
#[derive(Parser, Debug)]
#[command(name = "maskrs")]
#[command(version)]
#[command(about = "Format values with input masks and simulate typing into masked fields", long_about = None)]
struct Args {
    /// Values to mask (one per stdin line when omitted)
    values: Vec<String>,

    /// Mask pattern, e.g. "(00) 0000-0000"
    #[arg(short, long, value_name = "PATTERN", conflicts_with = "named")]
    pattern: Option<String>,

    /// Mask name from the config file or the built-in masks
    #[arg(short, long, value_name = "NAME")]
    named: Option<String>,

    /// Fill the mask from the end of the value
    #[arg(short, long)]
    reverse: bool,

    /// Print the clean value (no separators) instead of the masked one
    #[arg(long)]
    clean: bool,

    /// TOML mask configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Validate config and exit
    #[arg(long)]
    check_config: bool,

    /// List available masks and exit
    #[arg(long)]
    list_masks: bool,

    /// Edit script to replay, e.g. "1198{BACKSPACE}7{PASTE:65432}"
    #[arg(short, long, value_name = "SCRIPT")]
    simulate: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::from_toml_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Config::load_default().context("failed to load default config"),
    }
}

/// Pick the mask from --pattern, --named or the configured default
fn resolve_mask(args: &Args, config: &Config) -> Result<MaskConfig> {
    let mut resolved = if let Some(pattern) = &args.pattern {
        if pattern.is_empty() {
            bail!("--pattern must not be empty");
        }
        MaskConfig {
            name: "cli".to_string(),
            pattern: pattern.clone(),
            reverse: false,
            select_on_focus: false,
            translations: TranslationTable::default(),
            switch: None,
        }
    } else if let Some(name) = &args.named {
        config.mask(name)?
    } else if let Some(default) = config.default_mask() {
        default
    } else {
        bail!("no mask selected: pass --pattern or --named, or set [general] default_mask");
    };

    if args.reverse {
        resolved.reverse = true;
    }
    Ok(resolved)
}

/// Mask `value` once, letting a dynamic switch pick the pattern that fits
fn format_value(resolved: &MaskConfig, value: &str, clean: bool) -> (MaskSpec, MaskResult) {
    let mut spec = resolved.to_spec();
    if let Some(switch) = &resolved.switch {
        let masked = mask(value, &spec, false).masked;
        let target = switch.select(&masked);
        if target != spec.pattern() {
            log::debug!("'{}' selects pattern '{}'", value, target);
            spec = spec.with_pattern(target);
        }
    }
    let result = mask(value, &spec, clean);
    (spec, result)
}

fn list_masks(config: &Config) -> Result<()> {
    for name in config.names() {
        let resolved = config.mask(&name)?;
        let direction = if resolved.reverse { " (reverse)" } else { "" };
        match &resolved.switch {
            Some(switch) => println!("{}: {} | {}{}", name, switch.short, switch.long, direction),
            None => println!("{}: {}{}", name, resolved.pattern, direction),
        }
    }
    Ok(())
}

fn describe_step(step: &EditStep) -> String {
    match step {
        EditStep::Type(c) => format!("'{}'", c),
        EditStep::Key(key) => format!("{{{}}}", key),
        EditStep::Paste(text) => format!("paste \"{}\"", text),
    }
}

fn describe_event(event: &FieldEvent) -> String {
    match event {
        FieldEvent::Complete(_) => "complete".to_string(),
        FieldEvent::Change(_) => "change".to_string(),
        FieldEvent::KeyPress(_) => "keypress".to_string(),
        FieldEvent::MaskSwitched { to, .. } => format!("switched to {}", to),
    }
}

fn simulate(resolved: &MaskConfig, script: &str, initial: Option<&str>) -> Result<()> {
    let steps = parse_edit_script(script).context("invalid edit script")?;
    let mut field = resolved.to_field();
    if let Some(initial) = initial {
        field.set_value(initial);
    }

    println!("{:<16} {:<24} caret", "step", "value");
    println!("{:<16} {:<24} {}", "start", format!("\"{}\"", field.value()), field.caret());
    for step in &steps {
        let update = field.apply(step);
        for entry in &update.invalid {
            log::warn!(
                "rejected '{}' at {} (expected {})",
                entry.character,
                entry.position,
                entry.expected
            );
        }
        let events: Vec<String> = update.events.iter().map(describe_event).collect();
        let notes = if update.bypassed {
            "bypass".to_string()
        } else {
            events.join(", ")
        };
        println!(
            "{:<16} {:<24} {:<5} {}",
            describe_step(step),
            format!("\"{}\"", update.value),
            update.caret,
            notes
        );
    }
    println!("clean: {}", field.clean_value());
    Ok(())
}

fn read_values(args: &Args) -> Result<Vec<String>> {
    if !args.values.is_empty() {
        return Ok(args.values.clone());
    }
    let stdin = io::stdin();
    let mut values = Vec::new();
    for line in stdin.lock().lines() {
        values.push(line.context("failed to read stdin")?);
    }
    Ok(values)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;

    if args.check_config {
        println!("Configuration is valid ({} mask(s))", config.masks.len());
        return Ok(());
    }

    if args.list_masks {
        return list_masks(&config);
    }

    let resolved = resolve_mask(&args, &config)?;
    log::debug!("using mask '{}' ({})", resolved.name, resolved.pattern);

    if let Some(script) = &args.simulate {
        return simulate(&resolved, script, args.values.first().map(String::as_str));
    }

    for value in read_values(&args)? {
        let (spec, result) = format_value(&resolved, &value, args.clean);
        for entry in &result.invalid {
            log::warn!(
                "'{}': rejected '{}' at {} for '{}' (expected {})",
                value,
                entry.character,
                entry.position,
                spec.pattern(),
                entry.expected
            );
        }
        println!("{}", result.masked);
    }

    Ok(())
}

use anyhow::{Context, Result};
use canvas_native_config::Config;
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

mod commands;
mod inspect;

const USAGE: &str = "Usage:
  canvas-native dump <file>
  canvas-native replay <file> <operations.json>
  canvas-native inspect <file>";

fn main() -> Result<()> {
    let mut config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    log::debug!("Config path: {}", Config::config_path().display());

    let args: Vec<String> = env::args().collect();
    match args.iter().skip(1).map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["dump", file] => dump(&config, Path::new(file)),
        ["replay", file, ops] => replay(Path::new(file), Path::new(ops)),
        ["inspect", file] => inspect(&mut config, Path::new(file)),
        _ => {
            eprintln!("{USAGE}");
            process::exit(1);
        }
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn dump(config: &Config, path: &Path) -> Result<()> {
    let text = read_document(path)?;
    let out = commands::dump(&text, config.dump.pretty)?;

    match &config.dump.output_dir {
        Some(dir) => {
            let name = path.file_stem().map_or_else(
                || "document".into(),
                |stem| stem.to_string_lossy().into_owned(),
            );
            let target: PathBuf = dir.join(format!("{name}.json"));
            std::fs::create_dir_all(dir)?;
            std::fs::write(&target, out)
                .with_context(|| format!("writing {}", target.display()))?;
            log::info!("wrote {}", target.display());
        }
        None => println!("{out}"),
    }
    Ok(())
}

fn replay(path: &Path, ops: &Path) -> Result<()> {
    let text = read_document(path)?;
    let ops = commands::read_operations(ops)?;
    for line in commands::replay(&text, &ops)? {
        println!("{line}");
    }
    Ok(())
}

fn inspect(config: &mut Config, path: &Path) -> Result<()> {
    let text = read_document(path)?;
    let title = path.display().to_string();
    let mut app = inspect::App::new(title, &text, config.inspector.show_ranges);
    inspect::run(&mut app)?;

    // remember the range toggle for next time
    if app.show_ranges() != config.inspector.show_ranges {
        config.inspector.show_ranges = app.show_ranges();
        if let Err(e) = config.save() {
            log::warn!("could not save {}: {e:#}", Config::config_path().display());
        }
    }
    Ok(())
}

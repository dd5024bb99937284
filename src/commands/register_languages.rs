use crate::{
    RegisterLanguagesArgs,
    config::DocfixConfig,
    highlight::{Registrar, locate_highlight_module},
};

pub async fn run(args: &RegisterLanguagesArgs) -> Result<(), anyhow::Error> {
    // Determine the config file path
    let config_path = args
        .config_file
        .clone()
        .unwrap_or_else(|| "docfix.yaml".into());
    let config_path = if config_path.is_relative() {
        std::env::current_dir()?.join(&config_path)
    } else {
        config_path
    };

    let config = DocfixConfig::load(&config_path)?;

    let highlight_path = locate_highlight_module(config.generator.module_path.as_deref())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "could not find the highlight.js module; install HonKit or set generator.module_path in {}",
                config_path.display()
            )
        })?;
    println!("Found highlight.js at: {}", highlight_path.display());

    let package_dir = std::env::current_dir()?.join("node_modules/custom-languages");
    let registrar = Registrar::new(highlight_path, package_dir);
    let outcome = registrar.ensure_registered()?;

    println!(
        "Custom language definitions written to {}",
        outcome.package_dir.display()
    );

    match (&outcome.plugin_path, outcome.plugin_patched) {
        (Some(path), true) => {
            println!("Patched highlight plugin at {}", path.display());
        }
        (Some(path), false) => {
            println!(
                "Highlight plugin at {} already loads the custom languages",
                path.display()
            );
        }
        (None, _) => {
            eprintln!(
                "Warning: could not find the HonKit highlight plugin; add\n  require('{}');\nto it manually",
                outcome.package_dir.join("register-languages.js").display()
            );
        }
    }

    Ok(())
}

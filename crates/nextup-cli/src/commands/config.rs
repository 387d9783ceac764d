use color_eyre::Result;

use crate::commands::load_environment;
use crate::output::{Output, OutputFormat};

pub fn run_show(output: &Output) -> Result<()> {
    let env = load_environment()?;

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::to_value(&env.config)?);
        return Ok(());
    }

    output.info(format!("Config file:  {}", env.paths.config_file().display()));
    output.info(format!(
        "Preferences:  {}",
        env.paths.preferences_file().display()
    ));
    output.info(format!(
        "Tracked data: {}",
        env.paths.tracked_shows_file().display()
    ));
    output.info("");
    output.info(toml::to_string_pretty(&env.config)?);
    Ok(())
}

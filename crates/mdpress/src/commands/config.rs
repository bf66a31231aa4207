use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = Config::load_or_default();
            let yaml = serde_yaml::to_string(&config)?;
            if yaml.trim() == "{}" {
                println!("{}", "No configuration set; using defaults:".dimmed());
                println!("  editor.render_debounce_ms: 150");
                println!("  editor.wheel_debounce_ms: 300");
                println!("  defaults.show_preview: true");
            } else {
                print!("{yaml}");
            }
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!("{} {key} = {value}", "Saved".green().bold());
            println!("{}", path.display().to_string().dimmed());
            Ok(())
        }
    }
}

//! Init command implementation

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, Result, miette};
use tracing::info;

const CONFIG_PATH: &str = ".kensa.jsonc";

const DEFAULT_CONFIG: &str = r#"{
  // Inherit the default profile's enabled tools.
  "inherit_from_profile": true,

  // Tools listed here override the profile; the group decides severity.
  "warnings": {
    "tools": {
      "trailing-whitespace": { "quick_fix": true }
    }
  }
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() && !force {
        return Err(miette!(
            "{CONFIG_PATH} already exists. Use --force to overwrite."
        ));
    }

    fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
    info!("Wrote {CONFIG_PATH}");
    println!("Created {CONFIG_PATH}");
    Ok(())
}

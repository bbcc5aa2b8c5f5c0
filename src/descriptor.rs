//! Loading game descriptors produced by the analysis step.

use std::path::Path;

use anyhow::{bail, Context, Result};
use gameprobe_core_types::GameDescriptor;

/// Load a descriptor from a YAML or JSON file, by extension.
pub fn load_descriptor(path: &Path) -> Result<GameDescriptor> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading descriptor {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing YAML descriptor {}", path.display())),
        Some("json") => serde_json::from_str(&raw)
            .with_context(|| format!("parsing JSON descriptor {}", path.display())),
        other => bail!(
            "unsupported descriptor format {:?} for {}",
            other,
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameprobe_core_types::StartHint;
    use std::io::Write;

    #[test]
    fn loads_yaml_descriptor() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "name: snake\ncandidate_keys: [ArrowUp, ArrowDown]\nstart_hint: key\nconfidence: 70"
        )
        .unwrap();

        let descriptor = load_descriptor(file.path()).unwrap();
        assert_eq!(descriptor.name, "snake");
        assert_eq!(descriptor.start_hint, StartHint::Key);
        assert_eq!(descriptor.candidate_keys.len(), 2);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(load_descriptor(file.path()).is_err());
    }
}

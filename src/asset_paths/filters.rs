use std::path::Path;

use crate::config::AssetOptions;

/// Decides which module ids are handled by the asset pipeline.
///
/// A module matches when its extension is configured, no exclude fragment
/// occurs in its id, and it contains an include fragment (when any are set).
#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    extensions: Vec<String>,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl ModuleFilter {
    /// Build a filter from the resolved options.
    pub fn new(options: &AssetOptions) -> Self {
        Self {
            extensions: options.extensions.clone(),
            include: options.include.clone(),
            exclude: options.exclude.clone(),
        }
    }

    /// Whether the module with this id should be resolved as an asset.
    pub fn matches(&self, id: &str) -> bool {
        let Some(ext) = extension_with_dot(id) else {
            return false;
        };
        if !self.extensions.iter().any(|candidate| candidate == &ext) {
            return false;
        }

        if self.exclude.iter().any(|pattern| id.contains(pattern.as_str())) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|pattern| id.contains(pattern.as_str()))
    }
}

/// Extension including the leading dot, matching case-sensitively.
fn extension_with_dot(id: &str) -> Option<String> {
    Path::new(id)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(extensions: &[&str], include: &[&str], exclude: &[&str]) -> ModuleFilter {
        let options = AssetOptions {
            extensions: extensions.iter().map(|value| value.to_string()).collect(),
            include: include.iter().map(|value| value.to_string()).collect(),
            exclude: exclude.iter().map(|value| value.to_string()).collect(),
            ..Default::default()
        };
        ModuleFilter::new(&options)
    }

    #[test]
    fn matches_configured_extensions_only() {
        let filter = filter(&[".png", ".gif"], &[], &[]);
        assert!(filter.matches("test.png"));
        assert!(filter.matches("images/test.gif"));
        assert!(!filter.matches("test.js"));
        assert!(!filter.matches("test.PNG"));
        assert!(!filter.matches("png"));
    }

    #[test]
    fn applies_exclude_before_include() {
        let filter = filter(&[".svg"], &["src/"], &["vendor/"]);
        assert!(filter.matches("src/icons/logo.svg"));
        assert!(!filter.matches("src/vendor/logo.svg"));
        assert!(!filter.matches("lib/logo.svg"));
    }
}

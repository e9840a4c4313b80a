use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Normalise a public path so it can be prepended to an asset name.
///
/// An empty or missing prefix yields nothing; any other prefix always ends
/// with a single trailing `/`, so `"assets"` and `"assets/"` are equivalent.
pub fn public_path_prefix(public_path: Option<&str>) -> String {
    match public_path {
        None | Some("") => String::new(),
        Some(prefix) if prefix.ends_with('/') => prefix.to_string(),
        Some(prefix) => format!("{prefix}/"),
    }
}

/// `./`-relative prefix under which import-preserving copies are referenced.
pub fn import_path_prefix(assets_path: Option<&str>) -> String {
    match assets_path {
        None | Some("") => "./".to_string(),
        Some(path) => format!("./{}/", path.trim_end_matches('/')),
    }
}

/// Express `target` relative to `base` using forward slashes.
///
/// Relative inputs are resolved against the current directory first, so mixed
/// absolute and relative inputs compare like their on-disk locations.
pub fn relative_slash_path(base: &Path, target: &Path) -> String {
    let base = absolutize(base);
    let target = absolutize(target);

    let base_parts: Vec<Component<'_>> = base.components().collect();
    let target_parts: Vec<Component<'_>> = target.components().collect();
    let shared = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(left, right)| left == right)
        .count();

    let mut segments: Vec<String> = Vec::new();
    segments.extend(base_parts[shared..].iter().map(|_| "..".to_string()));
    segments.extend(
        target_parts[shared..]
            .iter()
            .map(|part| part.as_os_str().to_string_lossy().into_owned()),
    );
    segments.join("/")
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.clean();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path).clean(),
        Err(_) => path.clean(),
    }
}

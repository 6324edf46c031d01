use super::platform::{Environment, Platform};
use std::path::PathBuf;

/// The current user's home directory as reported by the platform's variable.
pub fn home_dir(env: &dyn Environment, platform: &Platform) -> Option<String> {
    env.var(platform.home_variable()).filter(|h| !h.is_empty())
}

/// Expands the `~` / `~/rest` shorthand against `home`.
///
/// Other paths, including `~user/...`, are returned unchanged. Returns `None` for an
/// empty path, or when expansion is needed but no home directory is known.
pub fn expand_home_dir(path: &str, home: Option<&str>) -> Option<PathBuf> {
    if path.is_empty() {
        return None;
    }
    if path == "~" {
        return home.map(PathBuf::from);
    }
    let Some(rest) = path.strip_prefix("~/") else {
        return Some(PathBuf::from(path));
    };
    let home = PathBuf::from(home?);
    if rest.is_empty() {
        Some(home)
    } else {
        Some(home.join(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::platform::MapEnvironment;
    use std::path::Path;

    #[test]
    fn tilde_alone_is_home() {
        assert_eq!(
            expand_home_dir("~", Some("/home/dev")),
            Some(PathBuf::from("/home/dev"))
        );
    }

    #[test]
    fn tilde_slash_joins_home() {
        assert_eq!(
            expand_home_dir("~/jdk", Some("/home/dev")),
            Some(Path::new("/home/dev").join("jdk"))
        );
        assert_eq!(
            expand_home_dir("~/", Some("/home/dev")),
            Some(PathBuf::from("/home/dev"))
        );
    }

    #[test]
    fn other_paths_are_untouched() {
        assert_eq!(
            expand_home_dir("/opt/jdk", Some("/home/dev")),
            Some(PathBuf::from("/opt/jdk"))
        );
        assert_eq!(
            expand_home_dir("~user/jdk", Some("/home/dev")),
            Some(PathBuf::from("~user/jdk"))
        );
        assert_eq!(expand_home_dir("/opt/jdk", None), Some(PathBuf::from("/opt/jdk")));
    }

    #[test]
    fn unknown_home_makes_shorthand_absent() {
        assert_eq!(expand_home_dir("~", None), None);
        assert_eq!(expand_home_dir("~/jdk", None), None);
        assert_eq!(expand_home_dir("", Some("/home/dev")), None);
    }

    #[test]
    fn home_dir_follows_platform_variable() {
        let env = MapEnvironment::new()
            .with("HOME", "/home/dev")
            .with("USERPROFILE", "C:\\Users\\dev");
        assert_eq!(
            home_dir(&env, &Platform::unix()).as_deref(),
            Some("/home/dev")
        );
        assert_eq!(
            home_dir(&env, &Platform::windows()).as_deref(),
            Some("C:\\Users\\dev")
        );
        let blank = MapEnvironment::new().with("HOME", "");
        assert_eq!(home_dir(&blank, &Platform::unix()), None);
    }
}

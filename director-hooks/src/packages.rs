use director_config::ConfigSnapshot;

/// Version pins that mean "whatever the archive has".
const UNPINNED: &str = "latest";

fn pinned(package: &str, build: Option<&str>) -> String {
    match build {
        Some(version) if version != UNPINNED => format!("{package}={version}"),
        _ => package.to_string(),
    }
}

/// The ordered set of packages the current configuration requires.
pub fn determine_packages(config: &ConfigSnapshot) -> Vec<String> {
    let mut pkgs = vec![
        pinned("plumgrid-lxc", config.get_str("plumgrid-build")),
        pinned("iovisor-dkms", config.get_str("iovisor-build")),
    ];
    if config.get_bool("enable-sapi").unwrap_or(false) {
        pkgs.push("plumgrid-sigmund".to_string());
    }
    pkgs
}

/// Template files stored under a different name so that package managers and
/// git leave them alone inside the boilerplate package.
const FILE_NAME_MAPPING: [(&str, &str); 7] = [
    ("gitignore", ".gitignore"),
    ("_gitignore", ".gitignore"),
    ("_.gitignore", ".gitignore"),
    ("_package.json", "package.json"),
    ("_.eslintrc", ".eslintrc"),
    ("_.eslintignore", ".eslintignore"),
    ("_.npmignore", ".npmignore"),
];

#[must_use]
pub fn map_file_name(name: &str) -> &str {
    FILE_NAME_MAPPING
        .iter()
        .find(|(from, _)| *from == name)
        .map_or(name, |(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_names() {
        assert_eq!(map_file_name("gitignore"), ".gitignore");
        assert_eq!(map_file_name("_gitignore"), ".gitignore");
        assert_eq!(map_file_name("_.gitignore"), ".gitignore");
        assert_eq!(map_file_name("_package.json"), "package.json");
        assert_eq!(map_file_name("_.eslintrc"), ".eslintrc");
        assert_eq!(map_file_name("_.npmignore"), ".npmignore");
    }

    #[test]
    fn other_names_pass_through() {
        assert_eq!(map_file_name("index.ts"), "index.ts");
        assert_eq!(map_file_name("_config.yml"), "_config.yml");
    }
}

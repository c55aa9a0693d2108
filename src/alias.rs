use std::path::Path;

use crate::config::PromptEntry;

/// One shell `alias` statement per configured prompt, in stored order. Each
/// alias binds the lowercased prompt name to an invocation of this executable
/// with that name as argument.
pub fn alias_lines(exe: &Path, prompts: &[PromptEntry]) -> Vec<String> {
    prompts
        .iter()
        .map(|entry| {
            let alias = entry.name.to_lowercase();
            format!("alias {alias}='{} {alias}'", exe.display())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::alias_lines;
    use crate::config::PromptEntry;

    fn entry(name: &str) -> PromptEntry {
        PromptEntry {
            name: name.to_string(),
            prompt: "template".to_string(),
        }
    }

    #[test]
    fn emits_lowercased_alias_per_prompt_in_order() {
        let lines = alias_lines(Path::new("/usr/local/bin/pipellm"), &[entry("Foo"), entry("BAR")]);
        assert_eq!(
            lines,
            vec![
                "alias foo='/usr/local/bin/pipellm foo'",
                "alias bar='/usr/local/bin/pipellm bar'",
            ]
        );
    }

    #[test]
    fn no_prompts_means_no_lines() {
        let lines = alias_lines(Path::new("/usr/local/bin/pipellm"), &[]);
        assert!(lines.is_empty());
    }
}

//! Programming languages used for code-challenge questions.

use serde::{Deserialize, Serialize};

/// Languages the code-execution collaborator can run, in canonical spelling.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "Assembly",
    "Bash",
    "Basic",
    "C",
    "C#",
    "C++",
    "Clojure",
    "COBOL",
    "Common Lisp",
    "D",
    "Dart",
    "Elixir",
    "Erlang",
    "F#",
    "Fortran",
    "Go",
    "Groovy",
    "Haskell",
    "Java",
    "JavaScript",
    "Kotlin",
    "Lua",
    "Objective-C",
    "OCaml",
    "Octave",
    "Pascal",
    "Perl",
    "PHP",
    "Prolog",
    "Python",
    "R",
    "Ruby",
    "Rust",
    "Scala",
    "SQL",
    "Swift",
    "TypeScript",
    "Visual Basic.Net",
];

/// Maps a detected language name to its canonical supported spelling.
pub fn canonical_language(name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    SUPPORTED_LANGUAGES
        .iter()
        .copied()
        .find(|candidate| candidate.to_lowercase() == wanted)
}

/// A language in the user's code-question rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(default)]
    pub usage_index: u32,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage_index: 0,
        }
    }

    pub fn with_usage_index(mut self, usage_index: u32) -> Self {
        self.usage_index = usage_index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_language_normalizes_case() {
        assert_eq!(canonical_language("python"), Some("Python"));
        assert_eq!(canonical_language(" c++ "), Some("C++"));
        assert_eq!(canonical_language("JAVASCRIPT"), Some("JavaScript"));
    }

    #[test]
    fn canonical_language_rejects_frameworks_and_blanks() {
        assert_eq!(canonical_language("React"), None);
        assert_eq!(canonical_language("Docker"), None);
        assert_eq!(canonical_language(""), None);
    }
}

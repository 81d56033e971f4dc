use regex::Regex;
use std::sync::LazyLock;

static BRANCH_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_\-./]+$").expect("branch pattern compiles"));

static DIRECTORY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_\-/]+$").expect("directory pattern compiles"));

/// Which whitelist a candidate input is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputClass {
    Branch,
    Directory,
}

/// Whitelist checks for values that end up on git and npm command lines.
///
/// This is an injection guard, not a filesystem or ref-format check: a name can
/// pass here and still be rejected later by git itself.
pub struct InputValidator;

impl InputValidator {
    /// Returns true iff `candidate` is non-empty and fully matches the class whitelist.
    pub fn is_valid(candidate: &str, class: InputClass) -> bool {
        match class {
            InputClass::Branch => Self::is_valid_branch_name(candidate),
            InputClass::Directory => Self::is_valid_directory_name(candidate),
        }
    }

    /// ASCII letters, digits, `_`, `-`, `.` and `/`.
    pub fn is_valid_branch_name(name: &str) -> bool {
        BRANCH_NAME.is_match(name)
    }

    /// Same as branch names, without `.`.
    pub fn is_valid_directory_name(name: &str) -> bool {
        DIRECTORY_NAME.is_match(name)
    }
}

//! Message and title formatting for documentation output.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::schema::change::Change;

/// Single-quoted spans of letters, spaces, periods, colons or exclamation marks.
static QUOTED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([a-zA-Z. :!]+)'").expect("Invalid regex"));

/// Rewrite `'Name'` mentions as `` `Name` `` code spans.
///
/// Quoted text containing digits, underscores or other punctuation is left alone.
pub fn clean_message(message: &str) -> String {
    QUOTED_NAME.replace_all(message, "`${1}`").into_owned()
}

/// Clean every change message, keeping order.
pub fn clean_messages(changes: &[Change]) -> Vec<String> {
    changes.iter().map(|c| clean_message(&c.message)).collect()
}

/// Turn a preview name into its documentation display title.
pub fn clean_preview_title(title: &str) -> String {
    match title {
        "UpdateRefsPreview" => "Update refs preview".to_string(),
        "MergeInfoPreview" => "Merge info preview".to_string(),
        _ if title.ends_with("preview") => title.to_string(),
        _ => format!("{} preview", title),
    }
}

/// URL fragment for a cleaned preview title.
pub fn preview_anchor(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_message_wraps_names() {
        assert_eq!(
            clean_message("The field 'name' was removed."),
            "The field `name` was removed."
        );
        assert_eq!(
            clean_message("Field 'Query.foo' changed type from 'String' to 'Int!'"),
            "Field `Query.foo` changed type from `String` to `Int!`"
        );
    }

    #[test]
    fn test_clean_message_leaves_other_quotes() {
        assert_eq!(
            clean_message("The field 'my_field' was removed."),
            "The field 'my_field' was removed."
        );
        assert_eq!(
            clean_message("Argument 'first: Int' added, type '[Int]'"),
            "Argument `first: Int` added, type '[Int]'"
        );
        assert_eq!(clean_message("Default 'v2' set"), "Default 'v2' set");
    }

    #[test]
    fn test_clean_preview_title() {
        assert_eq!(clean_preview_title("UpdateRefsPreview"), "Update refs preview");
        assert_eq!(clean_preview_title("MergeInfoPreview"), "Merge info preview");
        assert_eq!(clean_preview_title("Checks preview"), "Checks preview");
        assert_eq!(clean_preview_title("Deployments"), "Deployments preview");
        // Case-sensitive suffix check.
        assert_eq!(clean_preview_title("FooPreview"), "FooPreview preview");
    }

    #[test]
    fn test_preview_anchor() {
        assert_eq!(preview_anchor("Update refs preview"), "update-refs-preview");
        assert_eq!(
            preview_anchor("Access to package version deletion preview"),
            "access-to-package-version-deletion-preview"
        );
        assert_eq!(preview_anchor("Team review (v2) preview!"), "team-review-v2-preview");
    }
}

//! The "added on" description marker.
//!
//! A task's creation date lives inside the description text itself, as a
//! leading `[Added on: <DD Mon YYYY>] ` prefix. Edits must keep exactly one
//! copy of the original marker no matter what the submitted text contains,
//! so the transform here works purely on strings and is reused verbatim by
//! the repository.

use time::{format_description::FormatItem, macros::format_description, Date};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[day] [month repr:short] [year]");

/// Marker text for a given date, without the trailing space.
pub fn added_on(date: Date) -> String {
    // The format description is static and day/month/year always render.
    let formatted = date.format(&DATE_FORMAT).expect("static date format");
    format!("[Added on: {formatted}]")
}

/// Prefix a fresh description with the marker for `date`.
pub fn prefix(description: &str, date: Date) -> String {
    format!("{} {}", added_on(date), description)
}

/// Splice the original marker onto an edited description.
///
/// Takes the stored description's leading bracketed marker (text up to and
/// including the first `]`), strips any copy of that exact marker the edit
/// may carry (edits usually resubmit the whole text, marker included), and
/// re-prepends it. Descriptions without a marker pass through untouched.
pub fn splice(old_description: &str, new_description: &str) -> String {
    if !old_description.starts_with('[') {
        return new_description.to_string();
    }
    let Some(end) = old_description.find(']') else {
        return new_description.to_string();
    };
    let marker = &old_description[..=end];
    let cleaned = new_description.replace(marker, "");
    format!("{marker} {}", cleaned.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn marker_format_is_stable() {
        assert_eq!(added_on(date!(2026 - 08 - 25)), "[Added on: 25 Aug 2026]");
        assert_eq!(added_on(date!(2026 - 01 - 05)), "[Added on: 05 Jan 2026]");
    }

    #[test]
    fn prefix_puts_marker_before_text() {
        assert_eq!(
            prefix("Buy milk", date!(2026 - 08 - 25)),
            "[Added on: 25 Aug 2026] Buy milk"
        );
    }

    #[test]
    fn two_successive_edits_keep_one_marker() {
        let created = prefix("Buy milk", date!(2026 - 08 - 25));

        // First edit resubmits the whole text, marker included.
        let edit1 = splice(&created, "[Added on: 25 Aug 2026] Buy milk and bread");
        assert_eq!(edit1, "[Added on: 25 Aug 2026] Buy milk and bread");

        // Second edit submits fresh text without the marker.
        let edit2 = splice(&edit1, "Buy cheese");
        assert_eq!(edit2, "[Added on: 25 Aug 2026] Buy cheese");

        assert_eq!(edit2.matches("[Added on:").count(), 1);
    }

    #[test]
    fn repeated_marker_copies_are_all_stripped() {
        let old = "[Added on: 25 Aug 2026] x";
        let new = "[Added on: 25 Aug 2026] [Added on: 25 Aug 2026] y";
        assert_eq!(splice(old, new), "[Added on: 25 Aug 2026] y");
    }

    #[test]
    fn unmarked_description_passes_through() {
        assert_eq!(splice("plain text", "new text"), "new text");
        assert_eq!(splice("[unterminated", "new text"), "new text");
    }

    #[test]
    fn a_different_date_marker_in_the_edit_survives() {
        // Only the original marker text is stripped; other bracketed text
        // the user typed is their own business.
        let old = "[Added on: 25 Aug 2026] x";
        let new = "[Added on: 01 Jan 2020] y";
        assert_eq!(
            splice(old, new),
            "[Added on: 25 Aug 2026] [Added on: 01 Jan 2020] y"
        );
    }
}

//! Rendering of activity events into feed sentences.

use crate::event::{ActivityAction, ActivityKind, ActivityMeta};

/// Render a short human-readable sentence for an activity event.
///
/// Pure and deterministic: same inputs, same sentence. Unrecognized
/// kind/action pairs fall back to `"{KIND} {action}"` with the action
/// lowercased, so new combinations degrade instead of disappearing.
pub fn render_message(kind: ActivityKind, action: ActivityAction, meta: &ActivityMeta) -> String {
    use ActivityAction::*;
    use ActivityKind::*;

    match kind {
        Member => {
            let name = meta.full_name.as_deref().unwrap_or("Member");
            match action {
                New => format!("{name} just registered"),
                Updated => format!("Member {name} was updated"),
                Deleted => format!("Member {name} was deleted"),
            }
        }

        Hot => {
            let name = meta.name.as_deref().unwrap_or("HoT");
            match action {
                New => format!("New HoT added: {name}"),
                Updated => format!("HoT {name} was updated"),
                Deleted => format!("HoT {name} was deleted"),
            }
        }

        Sermon => {
            let title = meta.title.as_deref().unwrap_or("Sermon");
            match action {
                New => format!("New sermon added: {title}"),
                Updated => format!("Sermon updated: {title}"),
                Deleted => format!("Sermon deleted: {title}"),
            }
        }

        Event => {
            let title = meta.title.as_deref().unwrap_or("Event");
            match action {
                New => format!("New event added: {title}"),
                Updated => format!("Event updated: {title}"),
                Deleted => format!("Event deleted: {title}"),
            }
        }

        Announcement => {
            let title = meta.title.as_deref().unwrap_or("Announcement");
            match action {
                New => format!("New announcement added: {title}"),
                Updated => format!("Announcement updated: {title}"),
                Deleted => format!("Announcement deleted: {title}"),
            }
        }

        PrayerRequest => {
            let name = display_name(meta);
            match action {
                New => format!("New prayer request from {name}"),
                Updated => format!("Prayer request from {name} was updated"),
                // Prayer request deletions are not surfaced in the feed.
                Deleted => fallback(kind, action),
            }
        }

        Testimony => {
            let name = display_name(meta);
            match action {
                New => format!("New testimony from {name}"),
                Updated => format!("Testimony from {name} was updated"),
                Deleted => format!("Testimony from {name} was deleted"),
            }
        }
    }
}

/// Privacy-aware name resolution: anonymous submissions never reveal a name,
/// even when the snapshot carries one.
fn display_name(meta: &ActivityMeta) -> &str {
    if meta.anonymous {
        "Anonymous"
    } else {
        meta.full_name.as_deref().unwrap_or("Someone")
    }
}

fn fallback(kind: ActivityKind, action: ActivityAction) -> String {
    format!("{} {}", kind, action.as_str().to_lowercase())
}

//! Conversation content: the chat data model, a built-in seed conversation,
//! and optional loading of a transcript from a TOML file.
//!
//! Nothing here is persisted back; the conversation lives only in the running
//! view.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Me,
    Peer,
}

/// Visual variants of an audio card. Both are driven by the same player
/// controller; they only differ in how the card is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardLayout {
    Compact,
    Legacy,
}

#[derive(Debug, Clone)]
pub struct AudioAttachment {
    pub source: PathBuf,
    pub title: String,
    pub artist: String,
    pub layout: CardLayout,
}

#[derive(Debug, Clone)]
pub enum MessageBody {
    Text(String),
    Photo {
        source: PathBuf,
        caption: Option<String>,
    },
    Audio(AudioAttachment),
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: Sender,
    pub body: MessageBody,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn text(sender: Sender, body: impl Into<String>, sent_at: DateTime<Local>) -> Self {
        ChatMessage {
            sender,
            body: MessageBody::Text(body.into()),
            sent_at,
        }
    }

    pub fn audio_attachment(&self) -> Option<&AudioAttachment> {
        match &self.body {
            MessageBody::Audio(attachment) => Some(attachment),
            _ => None,
        }
    }
}

/// Replies chosen at random after the user sends a message.
pub const REPLY_POOL: [&str; 10] = [
    "Sounds good, noted.",
    "Ha, that's a good one.",
    "True enough.",
    "I was thinking the same.",
    "Let's go with that.",
    "No problem.",
    "Okay, okay.",
    "Got it.",
    "Received.",
    "👍",
];

/// Built-in conversation used when no transcript file is given. Includes a
/// photo and both audio card variants so every interaction is reachable out
/// of the box.
pub fn seed_transcript() -> Vec<ChatMessage> {
    let now = Local::now();
    let at = |minutes_ago: i64| now - Duration::minutes(minutes_ago);

    vec![
        ChatMessage::text(Sender::Peer, "Hey, made it home yet?", at(58)),
        ChatMessage::text(Sender::Me, "Just walked in. The rain caught me halfway.", at(56)),
        ChatMessage {
            sender: Sender::Peer,
            body: MessageBody::Photo {
                source: PathBuf::from("assets/photos/harbor.jpg"),
                caption: Some("The harbor right before the storm rolled in.".to_string()),
            },
            sent_at: at(55),
        },
        ChatMessage::text(Sender::Me, "That sky looks unreal.", at(54)),
        ChatMessage {
            sender: Sender::Peer,
            body: MessageBody::Audio(AudioAttachment {
                source: PathBuf::from("assets/audio/first-snow.ogg"),
                title: "First Snow".to_string(),
                artist: "Aurora Lane".to_string(),
                layout: CardLayout::Compact,
            }),
            sent_at: at(23),
        },
        ChatMessage::text(Sender::Peer, "This is the track I mentioned.", at(23)),
        ChatMessage {
            sender: Sender::Me,
            body: MessageBody::Audio(AudioAttachment {
                source: PathBuf::from("assets/audio/harbor-lights.ogg"),
                title: "Harbor Lights".to_string(),
                artist: "The Quiet Hours".to_string(),
                layout: CardLayout::Legacy,
            }),
            sent_at: at(4),
        },
        ChatMessage::text(Sender::Me, "Trade you this one.", at(3)),
    ]
}

/// Whether a centered time row belongs before `next`, given the timestamp of
/// the message above it.
pub fn needs_timestamp(
    previous: Option<DateTime<Local>>,
    next: DateTime<Local>,
    gap_minutes: i64,
) -> bool {
    match previous {
        None => true,
        Some(previous) => {
            next.signed_duration_since(previous) >= Duration::minutes(gap_minutes)
        }
    }
}

/// Load a conversation from a TOML transcript file.
pub fn load_transcript(path: &Path) -> Result<Vec<ChatMessage>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Reading transcript {}", path.display()))?;
    let messages = parse_transcript(&data)?;
    info!(count = messages.len(), "Parsed transcript");
    Ok(messages)
}

pub fn parse_transcript(data: &str) -> Result<Vec<ChatMessage>> {
    let doc: TranscriptDoc = toml::from_str(data).context("Parsing transcript")?;
    let now = Local::now();

    let messages = doc
        .message
        .into_iter()
        .map(|entry| {
            let sent_at = now - Duration::minutes(entry.minutes_ago);
            let sender = match entry.sender {
                SenderSpec::Me => Sender::Me,
                SenderSpec::Peer => Sender::Peer,
            };
            let body = match entry.body {
                BodySpec::Text { body } => MessageBody::Text(body),
                BodySpec::Photo { source, caption } => {
                    if !source.exists() {
                        warn!(source = %source.display(), "Photo file missing; will render as placeholder");
                    }
                    MessageBody::Photo { source, caption }
                }
                BodySpec::Audio {
                    source,
                    title,
                    artist,
                    layout,
                } => MessageBody::Audio(AudioAttachment {
                    source,
                    title,
                    artist,
                    layout,
                }),
            };
            ChatMessage {
                sender,
                body,
                sent_at,
            }
        })
        .collect();

    Ok(messages)
}

#[derive(Deserialize)]
struct TranscriptDoc {
    #[serde(default)]
    message: Vec<MessageSpec>,
}

#[derive(Deserialize)]
struct MessageSpec {
    sender: SenderSpec,
    #[serde(default)]
    minutes_ago: i64,
    #[serde(flatten)]
    body: BodySpec,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum SenderSpec {
    Me,
    Peer,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
enum BodySpec {
    Text {
        body: String,
    },
    Photo {
        source: PathBuf,
        #[serde(default)]
        caption: Option<String>,
    },
    Audio {
        source: PathBuf,
        title: String,
        artist: String,
        layout: CardLayout,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_covers_every_message_kind() {
        let messages = seed_transcript();
        assert!(messages.iter().any(|m| matches!(m.body, MessageBody::Text(_))));
        assert!(
            messages
                .iter()
                .any(|m| matches!(m.body, MessageBody::Photo { .. }))
        );
        assert!(
            messages
                .iter()
                .any(|m| matches!(&m.body, MessageBody::Audio(a) if a.layout == CardLayout::Compact))
        );
        assert!(
            messages
                .iter()
                .any(|m| matches!(&m.body, MessageBody::Audio(a) if a.layout == CardLayout::Legacy))
        );
    }

    #[test]
    fn seed_timestamps_are_monotonic() {
        let messages = seed_transcript();
        for pair in messages.windows(2) {
            assert!(pair[0].sent_at <= pair[1].sent_at);
        }
    }

    #[test]
    fn parses_all_message_kinds() {
        let doc = r#"
            [[message]]
            sender = "peer"
            kind = "text"
            body = "hello"
            minutes_ago = 30

            [[message]]
            sender = "me"
            kind = "photo"
            source = "assets/photos/x.jpg"
            caption = "view"

            [[message]]
            sender = "peer"
            kind = "audio"
            source = "assets/audio/x.ogg"
            title = "Track"
            artist = "Artist"
            layout = "legacy"
        "#;
        let messages = parse_transcript(doc).expect("transcript parses");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].sender, Sender::Peer);
        assert!(matches!(&messages[2].body, MessageBody::Audio(a) if a.layout == CardLayout::Legacy));
    }

    #[test]
    fn rejects_unknown_kind() {
        let doc = r#"
            [[message]]
            sender = "peer"
            kind = "sticker"
            body = "x"
        "#;
        assert!(parse_transcript(doc).is_err());
    }

    #[test]
    fn first_message_always_gets_a_time_row() {
        assert!(needs_timestamp(None, Local::now(), 10));
    }

    #[test]
    fn close_messages_share_a_time_row() {
        let now = Local::now();
        let recent = now - Duration::minutes(3);
        assert!(!needs_timestamp(Some(recent), now, 10));

        let stale = now - Duration::minutes(25);
        assert!(needs_timestamp(Some(stale), now, 10));
    }
}

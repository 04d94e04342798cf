//! Reply text for Telegram `MarkdownV2`.
//!
//! Every constant here is already escaped; provider text goes through
//! [`escape_markdown`] before it is interpolated.

use crate::domain::model::Digest;

/// Telegram rejects longer message texts. Counted in UTF-16 units, which is
/// never less than what Telegram counts after parsing entities.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

const BLOCK_SEPARATOR: &str = "\n\n";

pub const SEARCHING_MESSAGE: &str = "🔎 Looking for today's best BTTS picks\\.\\.\\.";

pub const NO_MATCHES_MESSAGE: &str = "⚽ No high\\-probability matches found today\\.";

pub const FAILURE_MESSAGE: &str =
    "⚠️ Could not fetch today's fixtures right now\\. Please try again later\\.";

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
        '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

pub fn render_digest(digest: &Digest) -> String {
    if digest.is_empty() {
        return NO_MATCHES_MESSAGE.to_string();
    }

    let zone_label = escape_markdown(&digest.zone_label);
    let mut message = format!(
        "🔥 *High\\-probability BTTS matches \\(today, {}\\)* 🔥\n",
        zone_label
    );

    for fixture in &digest.fixtures {
        let block = format!(
            "\n🏆 *{}*\n⚔️ {} vs {}\n🕒 {} \\({}\\)\n📊 Probability: *{}%*\n",
            escape_markdown(&fixture.league),
            escape_markdown(&fixture.home),
            escape_markdown(&fixture.away),
            escape_markdown(&fixture.kickoff.to_string()),
            zone_label,
            fixture.score,
        );
        message.push_str(&block);
    }

    message
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Splits a rendered message into pieces Telegram will accept.
///
/// Cuts happen between fixture blocks, so every piece keeps its markup
/// balanced. Only a single block longer than `limit` is cut mid-text.
pub fn split_message(message: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for block in message.split(BLOCK_SEPARATOR) {
        let joined_len = if current.is_empty() {
            utf16_len(block)
        } else {
            utf16_len(&current) + utf16_len(BLOCK_SEPARATOR) + utf16_len(block)
        };

        if joined_len <= limit {
            if !current.is_empty() {
                current.push_str(BLOCK_SEPARATOR);
            }
            current.push_str(block);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        if utf16_len(block) <= limit {
            current.push_str(block);
        } else {
            let mut pieces = split_oversized(block, limit);
            current = pieces.pop().unwrap_or_default();
            chunks.extend(pieces);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Cuts at char boundaries and never leaves an escape backslash dangling at
/// the end of a piece.
fn split_oversized(text: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for c in text.chars() {
        if current_len + c.len_utf16() > limit {
            let trailing = current.chars().rev().take_while(|&c| c == '\\').count();
            let carried = if trailing % 2 == 1 {
                current.pop()
            } else {
                None
            };
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
            if let Some(backslash) = carried {
                current.push(backslash);
                current_len = 1;
            }
        }
        current.push(c);
        current_len += c.len_utf16();
    }

    if !current.is_empty() {
        pieces.push(current);
    }

    pieces
}

/// Body of the failure notice sent back to the chat when a run fails.
pub fn render_failure(detail: &str) -> String {
    format!("{}\n_{}_", FAILURE_MESSAGE, escape_markdown(detail))
}

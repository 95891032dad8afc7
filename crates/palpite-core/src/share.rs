//! Shareable message composition for generated tickets.
//!
//! Produces the fixed-form Portuguese share text and the messaging deep
//! link that carries it. The link payload is percent-encoded with the URL
//! query character set: unreserved characters and the query sub-delimiters
//! pass through, everything else (including spaces and the clover emoji)
//! is escaped as UTF-8 `%XX` sequences.

use crate::ticket::Ticket;

/// Deep-link scheme prefix for the external messaging application.
const SHARE_LINK_PREFIX: &str = "whatsapp://send?text=";

/// Composes the share text for a generated ticket.
///
/// Fixed form: `"Os números gerados para {game} foram: {ticket}"`.
#[must_use]
pub fn share_message(game_display: &str, ticket: &Ticket) -> String {
    format!(
        "Os números gerados para {game_display} foram: {}",
        ticket.formatted()
    )
}

/// Composes the messaging deep link carrying the share text.
#[must_use]
pub fn share_link(game_display: &str, ticket: &Ticket) -> String {
    let message = share_message(game_display, ticket);
    format!("{SHARE_LINK_PREFIX}{}", escape_query(&message))
}

/// Percent-encodes a string for use inside a URL query component.
///
/// Pass-through set: ASCII alphanumerics, the unreserved marks `-._~`,
/// and the query-allowed characters `!$&'()*+,;=:@/?`.
#[must_use]
pub fn escape_query(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for byte in input.bytes() {
        if is_query_allowed(byte) {
            escaped.push(byte as char);
        } else {
            escaped.push('%');
            escaped.push(hex_digit(byte >> 4));
            escaped.push(hex_digit(byte & 0x0f));
        }
    }
    escaped
}

const fn is_query_allowed(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'.'
                | b'_'
                | b'~'
                | b'!'
                | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'@'
                | b'/'
                | b'?'
        )
}

const fn hex_digit(nibble: u8) -> char {
    (match nibble {
        0..=9 => b'0' + nibble,
        _ => b'A' + (nibble - 10),
    }) as char
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::ticket;

    fn sample_ticket() -> Ticket {
        let mut rng = StdRng::seed_from_u64(11);
        ticket::generate_with(&mut rng, 6, 60).unwrap()
    }

    #[test]
    fn message_has_the_fixed_form() {
        let ticket = sample_ticket();
        let message = share_message("Mega-Sena", &ticket);
        assert_eq!(
            message,
            format!(
                "Os números gerados para Mega-Sena foram: {}",
                ticket.formatted()
            )
        );
    }

    #[test]
    fn link_carries_the_escaped_message() {
        let ticket = sample_ticket();
        let link = share_link("Quina", &ticket);
        assert!(link.starts_with("whatsapp://send?text=Os%20n%C3%BAmeros"));
        // No raw spaces or raw multibyte characters survive escaping.
        let payload = link.strip_prefix("whatsapp://send?text=").unwrap();
        assert!(payload.is_ascii());
        assert!(!payload.contains(' '));
    }

    #[test]
    fn escape_passes_digits_and_escapes_spaces() {
        assert_eq!(escape_query("03 11"), "03%2011");
        assert_eq!(escape_query("a-b._~"), "a-b._~");
        assert_eq!(escape_query("x=y&z?w/:@"), "x=y&z?w/:@");
    }

    #[test]
    fn escape_encodes_the_clover_as_utf8() {
        // U+1F340 FOUR LEAF CLOVER: F0 9F 8D 80.
        assert_eq!(escape_query("🍀"), "%F0%9F%8D%80");
    }
}

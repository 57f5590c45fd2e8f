//! HTML entity decoding for question text.
//!
//! The trivia API escapes question and answer text (`&quot;`, `&#039;`,
//! `&eacute;`, ...). Decoding is repeated until the text stops changing, so
//! the output never contains a decodable reference and decoding is
//! idempotent.

/// Decode HTML entities in `text`.
///
/// Never fails: if a numeric reference does not name a valid character the
/// input is returned unchanged. Unknown named entities are kept verbatim.
pub fn decode(text: &str) -> String {
    let mut current = match decode_once(text) {
        Some(decoded) => decoded,
        None => return text.to_string(),
    };

    // Every replacement is shorter than the reference it replaces, so this
    // terminates.
    while current.contains('&') {
        match decode_once(&current) {
            Some(next) if next != current => current = next,
            _ => break,
        }
    }

    current
}

/// Single decoding pass. Returns `None` on a malformed numeric reference.
fn decode_once(text: &str) -> Option<String> {
    if !text.contains('&') {
        return Some(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        match parse_reference(tail)? {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    Some(out)
}

/// Parse the reference at the start of `tail` (which begins with `&`).
///
/// Returns `Some(None)` when the text is not a reference at all,
/// `Some(Some((char, len)))` on success, and `None` for a numeric
/// reference that cannot be decoded.
fn parse_reference(tail: &str) -> Option<Option<(char, usize)>> {
    let Some(semi) = tail[1..].find(';').map(|i| i + 1) else {
        return Some(None);
    };
    let body = &tail[1..semi];

    // Longest entity name we know is well under this.
    if body.is_empty() || body.len() > 32 || body.contains(char::is_whitespace) {
        return Some(None);
    }

    let decoded = if let Some(numeric) = body.strip_prefix('#') {
        Some(decode_numeric(numeric)?)
    } else {
        named_entity(body)
    };

    Some(decoded.map(|c| (c, semi + 1)))
}

fn decode_numeric(numeric: &str) -> Option<char> {
    let value = match numeric.strip_prefix('x').or_else(|| numeric.strip_prefix('X')) {
        Some(hex) => {
            if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            u32::from_str_radix(hex, 16).ok()?
        }
        None => {
            if numeric.is_empty() || !numeric.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            numeric.parse::<u32>().ok()?
        }
    };

    char::from_u32(value)
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "quot" => '"',
        "apos" => '\'',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "nbsp" => '\u{00A0}',
        "shy" => '\u{00AD}',
        "iexcl" => '¡',
        "iquest" => '¿',
        "cent" => '¢',
        "pound" => '£',
        "yen" => '¥',
        "euro" => '€',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "deg" => '°',
        "plusmn" => '±',
        "sup2" => '²',
        "sup3" => '³',
        "micro" => 'µ',
        "middot" => '·',
        "frac14" => '¼',
        "frac12" => '½',
        "frac34" => '¾',
        "times" => '×',
        "divide" => '÷',
        "laquo" => '«',
        "raquo" => '»',
        "lsquo" => '‘',
        "rsquo" => '’',
        "sbquo" => '‚',
        "ldquo" => '“',
        "rdquo" => '”',
        "bdquo" => '„',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "prime" => '′',
        "Prime" => '″',
        "Agrave" => 'À',
        "Aacute" => 'Á',
        "Acirc" => 'Â',
        "Atilde" => 'Ã',
        "Auml" => 'Ä',
        "Aring" => 'Å',
        "AElig" => 'Æ',
        "Ccedil" => 'Ç',
        "Egrave" => 'È',
        "Eacute" => 'É',
        "Ecirc" => 'Ê',
        "Euml" => 'Ë',
        "Igrave" => 'Ì',
        "Iacute" => 'Í',
        "Icirc" => 'Î',
        "Iuml" => 'Ï',
        "Ntilde" => 'Ñ',
        "Ograve" => 'Ò',
        "Oacute" => 'Ó',
        "Ocirc" => 'Ô',
        "Otilde" => 'Õ',
        "Ouml" => 'Ö',
        "Oslash" => 'Ø',
        "Ugrave" => 'Ù',
        "Uacute" => 'Ú',
        "Ucirc" => 'Û',
        "Uuml" => 'Ü',
        "Yacute" => 'Ý',
        "szlig" => 'ß',
        "agrave" => 'à',
        "aacute" => 'á',
        "acirc" => 'â',
        "atilde" => 'ã',
        "auml" => 'ä',
        "aring" => 'å',
        "aelig" => 'æ',
        "ccedil" => 'ç',
        "egrave" => 'è',
        "eacute" => 'é',
        "ecirc" => 'ê',
        "euml" => 'ë',
        "igrave" => 'ì',
        "iacute" => 'í',
        "icirc" => 'î',
        "iuml" => 'ï',
        "ntilde" => 'ñ',
        "ograve" => 'ò',
        "oacute" => 'ó',
        "ocirc" => 'ô',
        "otilde" => 'õ',
        "ouml" => 'ö',
        "oslash" => 'ø',
        "ugrave" => 'ù',
        "uacute" => 'ú',
        "ucirc" => 'û',
        "uuml" => 'ü',
        "yacute" => 'ý',
        "yuml" => 'ÿ',
        "Scaron" => 'Š',
        "scaron" => 'š',
        "OElig" => 'Œ',
        "oelig" => 'œ',
        "alpha" => 'α',
        "beta" => 'β',
        "gamma" => 'γ',
        "delta" => 'δ',
        "pi" => 'π',
        "sigma" => 'σ',
        "omega" => 'ω',
        "Omega" => 'Ω',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_common_entities() {
        assert_eq!(
            decode("What is the name of the &quot;Big Apple&quot;?"),
            "What is the name of the \"Big Apple\"?"
        );
        assert_eq!(decode("Don&#039;t Stop Me Now"), "Don't Stop Me Now");
        assert_eq!(decode("Rock &amp; Roll"), "Rock & Roll");
        assert_eq!(decode("it&apos;s"), "it's");
        assert_eq!(decode("1 &lt; 2 &gt; 0"), "1 < 2 > 0");
    }

    #[test]
    fn test_decode_numeric_references() {
        assert_eq!(decode("&#65;&#66;&#67;"), "ABC");
        assert_eq!(decode("&#x41;&#X42;"), "AB");
        assert_eq!(decode("Pok&#233;mon"), "Pokémon");
        assert_eq!(decode("&#128512;"), "😀");
    }

    #[test]
    fn test_decode_named_accents() {
        assert_eq!(decode("Beyonc&eacute;"), "Beyoncé");
        assert_eq!(decode("Mot&ouml;rhead"), "Motörhead");
        assert_eq!(decode("&ldquo;quoted&rdquo; &hellip;"), "“quoted” …");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode(""), "");
        assert_eq!(decode("No entities here"), "No entities here");
    }

    #[test]
    fn test_unknown_and_bare_ampersand_kept() {
        assert_eq!(decode("AT&T"), "AT&T");
        assert_eq!(decode("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(decode("&notanentity; stays"), "&notanentity; stays");
        assert_eq!(decode("trailing &"), "trailing &");
    }

    #[test]
    fn test_malformed_numeric_returns_original() {
        let input = "Broken &#xD800; surrogate &amp; more";
        assert_eq!(decode(input), input);

        let overflow = "&#99999999999999; &quot;";
        assert_eq!(decode(overflow), overflow);

        let empty_hex = "&#x; &quot;";
        assert_eq!(decode(empty_hex), empty_hex);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let samples = [
            "&quot;Thriller&quot; by Michael Jackson",
            "Don&#039;t Panic",
            "Simon &amp; Garfunkel",
            "&amp;quot;double&amp;quot;",
            "&quot;&#039;&amp;&quot;",
            "&#xD800; &amp;",
        ];
        for sample in samples {
            let once = decode(sample);
            assert_eq!(decode(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_double_encoded_text_fully_decoded() {
        assert_eq!(decode("&amp;quot;Hi&amp;quot;"), "\"Hi\"");
        assert_eq!(decode("&amp;amp;"), "&");
    }
}

//! Common regex patterns for markup cleanup and signature extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Markup blocks whose contents are never text
    pub static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style.*?</style>").unwrap();

    pub static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script.*?</script>").unwrap();

    pub static ref TAG: Regex = Regex::new(r"<[^>]+>").unwrap();

    pub static ref BLANK_LINES: Regex = Regex::new(r"\n{2,}").unwrap();

    // French phone number: +33 or 0 prefix, one non-zero digit, four digit pairs.
    // The trailing boundary is ASCII-only, so accented letters do not extend a word.
    pub static ref PHONE_FR: Regex = Regex::new(
        r"(?:\+33 ?|0)[1-9](?:[ .\-]?\d{2}){4}(?-u:\b)"
    ).unwrap();

    pub static ref PHONE_SEPARATORS: Regex = Regex::new(r"[ .\-]").unwrap();

    // Closing phrases and separators that open a signature block
    pub static ref SIGNATURE_BOUNDARY: Regex = Regex::new(
        r"(?i)^(?:-{2,}|cordialement|bien cordialement|sincèrement|best regards|regards)$"
    ).unwrap();

    // Capitalized word, French accents included
    pub static ref NAME_TOKEN: Regex = Regex::new(
        r"^[A-ZÀÂÄÆÇÉÈÊËÎÏÔÖŒÙÛÜŸ][a-zàâäæçéèêëîïôöœùûüÿ'\-]+$"
    ).unwrap();
}

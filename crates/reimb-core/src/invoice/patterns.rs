//! Regex patterns for invoice filenames.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // YYYY-M[M]-D[D]-buyer-amount-number, applied to the stem only.
    // ASCII digit classes: `\d` would also accept non-ASCII digits.
    pub static ref INVOICE_STEM: Regex = Regex::new(concat!(
        r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})",
        r"-(?P<buyer>[a-z]+)",
        r"-(?P<amount>[0-9]+(?:_[0-9]+)?)",
        r"-(?P<invoice_number>[0-9]+)$",
    ))
    .unwrap();
}

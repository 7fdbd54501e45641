//! Decoders for event detail codes.

use crate::error::DetailError;
use widgetcheck_core::key;

/// Selection detail: drag in progress.
pub const SELECTION_DRAG: i32 = 1;
/// Selection detail: check box toggled.
pub const SELECTION_CHECK: i32 = 1 << 5;

/// Selection kinds. Codes are unrelated, so lookup is a linear scan.
const SELECTION_KINDS: &[(i32, &str)] = &[
    (SELECTION_DRAG, "DRAG"),
    (SELECTION_CHECK, "CHECK"),
    (key::ARROW_UP, "ARROW_UP"),
    (key::ARROW_DOWN, "ARROW_DOWN"),
    (key::PAGE_UP, "PAGE_UP"),
    (key::PAGE_DOWN, "PAGE_DOWN"),
    (key::HOME, "HOME"),
    (key::END, "END"),
];

/// Traversal kinds, indexed by the bit position of the detail code.
const TRAVERSAL_KINDS: &[&str] = &[
    "None",
    "ESCAPE",
    "RETURN",
    "TAB_PREVIOUS",
    "TAB_NEXT",
    "ARROW_PREVIOUS",
    "ARROW_NEXT",
    "MNEMONIC",
    "PAGE_PREVIOUS",
    "PAGE_NEXT",
];

/// Traversal detail codes.
pub mod traversal {
    /// No traversal
    pub const NONE: i32 = 0;
    /// Escape
    pub const ESCAPE: i32 = 1 << 1;
    /// Return
    pub const RETURN: i32 = 1 << 2;
    /// Shift+Tab
    pub const TAB_PREVIOUS: i32 = 1 << 3;
    /// Tab
    pub const TAB_NEXT: i32 = 1 << 4;
    /// Arrow to previous
    pub const ARROW_PREVIOUS: i32 = 1 << 5;
    /// Arrow to next
    pub const ARROW_NEXT: i32 = 1 << 6;
    /// Mnemonic key
    pub const MNEMONIC: i32 = 1 << 7;
    /// Ctrl+PageUp
    pub const PAGE_PREVIOUS: i32 = 1 << 8;
    /// Ctrl+PageDown
    pub const PAGE_NEXT: i32 = 1 << 9;
}

/// Subtype name for a selection detail, or `""` when the code is unknown.
///
/// A miss is not an error: plain selections carry detail `0` and get no
/// subtype.
#[must_use]
pub fn decode_selection_detail(code: i32) -> &'static str {
    SELECTION_KINDS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("", |(_, name)| name)
}

/// Code for a selection subtype name, the inverse of [`decode_selection_detail`].
#[must_use]
pub fn selection_code(name: &str) -> Option<i32> {
    SELECTION_KINDS
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(code, _)| *code)
}

/// Every selection detail code the decoder knows.
pub fn selection_codes() -> impl Iterator<Item = i32> {
    SELECTION_KINDS.iter().map(|(code, _)| *code)
}

/// Subtype name for a traversal detail.
///
/// `0` is `"None"`. Any other code must be a single bit whose position indexes
/// the traversal table.
pub fn decode_traversal_detail(code: i32) -> Result<&'static str, DetailError> {
    if code == 0 {
        return Ok(TRAVERSAL_KINDS[0]);
    }
    if code < 0 || code.count_ones() != 1 {
        return Err(DetailError::NotPowerOfTwo(code));
    }
    TRAVERSAL_KINDS
        .get(code.trailing_zeros() as usize)
        .copied()
        .ok_or(DetailError::OutOfRange(code))
}

/// Number of traversal kinds the decoder knows.
#[must_use]
pub const fn traversal_kind_count() -> usize {
    TRAVERSAL_KINDS.len()
}

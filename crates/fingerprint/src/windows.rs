//! Fixed-width character windows over canonical text.
//!
//! Offsets and widths are counted in `char`s, not bytes, so a window never
//! splits a multi-byte character. Both functions run in O(n · w) hashing work
//! over the number of windows.

use rayon::prelude::*;

use crate::fingerprint::WindowHash;

/// Byte offset of every char boundary in `text`, including `text.len()`.
fn char_boundaries(text: &str) -> Vec<usize> {
    let mut bounds = Vec::with_capacity(text.len() + 1);
    bounds.extend(text.char_indices().map(|(i, _)| i));
    bounds.push(text.len());
    bounds
}

/// Number of windows a text with `char_len` characters yields.
pub fn window_count(char_len: usize, window_size: usize) -> usize {
    if window_size == 0 || char_len < window_size {
        0
    } else {
        char_len - window_size + 1
    }
}

/// Hash every window of `window_size` characters, in order of start offset.
///
/// Returns an empty vector when the text is shorter than one window or
/// `window_size` is zero.
pub fn window_hashes(text: &str, window_size: usize) -> Vec<WindowHash> {
    let bounds = char_boundaries(text);
    let count = window_count(bounds.len() - 1, window_size);
    let bytes = text.as_bytes();

    let mut out = Vec::with_capacity(count);
    out.extend((0..count).map(|i| WindowHash::of(&bytes[bounds[i]..bounds[i + window_size]])));
    out
}

/// Parallel variant of [`window_hashes`]. Same output, computed on the
/// rayon pool.
pub fn window_hashes_parallel(text: &str, window_size: usize) -> Vec<WindowHash> {
    let bounds = char_boundaries(text);
    let count = window_count(bounds.len() - 1, window_size);
    let bytes = text.as_bytes();

    (0..count)
        .into_par_iter()
        .map(|i| WindowHash::of(&bytes[bounds[i]..bounds[i + window_size]]))
        .collect()
}

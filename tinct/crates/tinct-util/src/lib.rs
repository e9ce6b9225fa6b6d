//! tinct-util - Foundation Types for the tinct Scanner
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate holds the leaf types every other tinct crate builds on:
//!
//! - [`buffer`] - the immutable text buffer: raw bytes, detected or declared
//!   encoding, decoded characters and the line-start index
//! - [`charset`] - constant-time character membership sets used by language
//!   definitions
//! - [`index_vec`] - vectors addressed by typed indices (keyword group ids)
//! - [`error`] - error types for bounds-checked buffer access
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. IMMUTABLE AFTER LOAD
//!    A [`Buffer`] never changes once built. Scans borrow it, so any number of
//!    scans may run over the same buffer, on any thread.
//!
//! 2. BEST EFFORT, NEVER FATAL
//!    Bytes that do not decode under the buffer's encoding become single
//!    characters and are recorded as [`EncodingIssue`]s. Construction cannot
//!    fail.
//
// 3. CHARACTER OFFSETS
//    Every offset handed out by this crate counts characters, not bytes.
//    A UTF-16 surrogate pair is one character; an undecodable byte is one
//    character.
//
// ============================================================================
// LINE INDEX
// ============================================================================
//
// The buffer computes one line-start offset per line while decoding:
//
// ```
// text:         a b \n c \r \n \r d
// offsets:      0 1 2  3 4  5  6  7
// line starts:  [0, 3, 6, 7]
// ```
//
// `\r\n` is a single break, a lone `\r` is a break of its own. Lookup of the
// line containing an offset is a binary search over this table.

pub mod buffer;
pub mod charset;
pub mod error;
pub mod index_vec;

pub use buffer::{Buffer, Encoding, EncodingIssue, EncodingIssueKind};
pub use charset::CharSet;
pub use error::{BufferError, BufferResult};
pub use index_vec::{Idx, IndexVec};

// Re-export commonly used types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;

/// Defines a `u32` newtype usable as an [`IndexVec`] index.
#[macro_export]
macro_rules! define_idx {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $crate::Idx for $name {
            fn from_usize(idx: usize) -> Self {
                assert!(idx <= u32::MAX as usize);
                $name(idx as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

static_assertions::assert_impl_all!(Buffer: Send, Sync);
static_assertions::assert_impl_all!(CharSet: Send, Sync);

// Complete Owned String Implementation
// Hand-rolled heap buffer with deep-copy semantics

use colored::Colorize;
use std::alloc::{self, Layout};
use std::ffi::CStr;
use std::fmt;
use std::ptr::{self, NonNull};
use std::slice;
use thiserror::Error;

// ============================================================================
// Milestone 1: Buffer Acquisition and Release
// ============================================================================

/// Layout of a buffer holding `len` content bytes plus the terminator.
fn layout_for(len: usize) -> Layout {
    Layout::array::<u8>(len + 1).expect("buffer size exceeds isize::MAX")
}

/// Allocates an uninitialized buffer of `len + 1` bytes.
///
/// Allocation failure is not a recoverable condition here: it is routed
/// through `handle_alloc_error`, the same fatal path `Box` and `Vec` take.
fn allocate(len: usize) -> NonNull<u8> {
    let layout = layout_for(len);
    // SAFETY: layout has non-zero size, len + 1 >= 1.
    let raw = unsafe { alloc::alloc(layout) };
    match NonNull::new(raw) {
        Some(buf) => buf,
        None => alloc::handle_alloc_error(layout),
    }
}

// ============================================================================
// Milestone 2: The String Type and Its Construction Paths
// ============================================================================

/// Error cases for checked construction from raw bytes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrError {
    #[error("interior nul byte at offset {offset}")]
    InteriorNul { offset: usize },
}

/// A string that exclusively owns one nul-terminated heap buffer.
///
/// The buffer always holds exactly `len + 1` bytes, the last being the
/// terminator. It is never shared: every copy allocates its own buffer, so
/// two live `OwnedStr` values never point at the same allocation.
pub struct OwnedStr {
    buf: NonNull<u8>,
    len: usize,
}

impl OwnedStr {
    /// Creates an empty string.
    ///
    /// Even the empty string owns a live one-byte buffer holding only the
    /// terminator, so `buf` is never dangling.
    pub fn new() -> Self {
        let buf = allocate(0);
        // SAFETY: buf points at one writable byte.
        unsafe { buf.as_ptr().write(0) };
        OwnedStr { buf, len: 0 }
    }

    /// Copies `bytes` into a fresh buffer of exactly `bytes.len() + 1` bytes
    /// and appends the terminator.
    ///
    /// Interior nul bytes are rejected: they would make the readable view
    /// shorter than the stored content.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StrError> {
        if let Some(offset) = bytes.iter().position(|&b| b == 0) {
            return Err(StrError::InteriorNul { offset });
        }
        // SAFETY: `bytes` is a live slice with no interior nul.
        Ok(unsafe { Self::copy_from(bytes.as_ptr(), bytes.len()) })
    }

    /// Copies the contents of a borrowed C string.
    pub fn from_c_str(source: &CStr) -> Self {
        let bytes = source.to_bytes();
        // SAFETY: a CStr is live and has no interior nul by construction.
        unsafe { Self::copy_from(bytes.as_ptr(), bytes.len()) }
    }

    /// Allocates a fresh buffer and duplicates `len` bytes from `src`.
    ///
    /// SAFETY: `src` must be valid for reading `len` bytes, none of which
    /// may be nul.
    unsafe fn copy_from(src: *const u8, len: usize) -> Self {
        let buf = allocate(len);
        ptr::copy_nonoverlapping(src, buf.as_ptr(), len);
        buf.as_ptr().add(len).write(0);
        OwnedStr { buf, len }
    }
}

impl Default for OwnedStr {
    fn default() -> Self {
        OwnedStr::new()
    }
}

impl TryFrom<&str> for OwnedStr {
    type Error = StrError;

    fn try_from(text: &str) -> Result<Self, StrError> {
        OwnedStr::from_bytes(text.as_bytes())
    }
}

// ============================================================================
// Milestone 3: Deep Copy and Destruction
// ============================================================================

impl Clone for OwnedStr {
    /// Deep copy: a fresh buffer of exactly the required size, bytes
    /// duplicated. The clone and the source never alias.
    fn clone(&self) -> Self {
        // SAFETY: our own buffer holds `len` non-nul bytes.
        unsafe { Self::copy_from(self.buf.as_ptr(), self.len) }
    }
}

impl Drop for OwnedStr {
    fn drop(&mut self) {
        // SAFETY: `buf` was obtained from `allocate(self.len)` with this
        // exact layout, and single ownership means nobody else frees it.
        unsafe { alloc::dealloc(self.buf.as_ptr(), layout_for(self.len)) };
    }
}

// SAFETY: the buffer is exclusively owned and reachable through exactly one
// handle, so moving or sharing a handle across threads is sound. Mutating
// one handle from several threads still needs outside synchronization.
unsafe impl Send for OwnedStr {}
unsafe impl Sync for OwnedStr {}

// ============================================================================
// Milestone 4: Assignment and the Aliasing Guard
// ============================================================================

impl OwnedStr {
    /// Replaces the owned buffer with an independent copy of `source`'s
    /// content. Returns the receiver so assignments chain.
    ///
    /// Identity is checked first: buffers are never shared, so receiver and
    /// source holding the same buffer means they are the same string, and
    /// releasing before copying would read freed memory. That case is a
    /// no-op.
    pub fn assign(&mut self, source: &OwnedStr) -> &mut OwnedStr {
        if ptr::eq(self.buf.as_ptr(), source.buf.as_ptr()) {
            return self;
        }
        // Build the replacement first, then let the old value release its
        // buffer in Drop.
        // SAFETY: `source`'s buffer holds `source.len` non-nul bytes.
        let fresh = unsafe { Self::copy_from(source.buf.as_ptr(), source.len) };
        *self = fresh;
        self
    }
}

/// Copy-assigns `strings[src]` into `strings[dst]`.
///
/// Indexed assignment is where aliasing actually shows up in safe code:
/// both indices may name the same element. That case short-circuits, so the
/// element is left untouched instead of being read during its own
/// replacement.
pub fn assign_within(strings: &mut [OwnedStr], dst: usize, src: usize) {
    assert!(dst < strings.len(), "dst index out of bounds");
    assert!(src < strings.len(), "src index out of bounds");
    if dst == src {
        return;
    }
    let base = strings.as_mut_ptr();
    // SAFETY: dst != src, so the two elements are disjoint and may be
    // borrowed mutably and shared at the same time.
    unsafe {
        let source = &*base.add(src);
        (*base.add(dst)).assign(source);
    }
}

// ============================================================================
// Milestone 5: Read-Only Views and Text Output
// ============================================================================

impl OwnedStr {
    /// Content length in bytes, terminator excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the content bytes, terminator excluded.
    ///
    /// The view borrows the string, so assigning to it or dropping it while
    /// the view is alive is a compile error rather than a dangling read.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `buf` points at `len` initialized content bytes.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// View including the terminator, for handing to C-style consumers.
    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: the buffer holds `len + 1` initialized bytes, the last is
        // nul and the rest are not.
        unsafe {
            CStr::from_bytes_with_nul_unchecked(slice::from_raw_parts(
                self.buf.as_ptr(),
                self.len + 1,
            ))
        }
    }
}

impl fmt::Display for OwnedStr {
    /// Pass-through text output: the raw content bytes, no escaping or
    /// framing. Bytes that are not valid UTF-8 render as the replacement
    /// character.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for OwnedStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}

impl PartialEq for OwnedStr {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for OwnedStr {}

impl PartialEq<str> for OwnedStr {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for OwnedStr {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<[u8]> for OwnedStr {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

// ============================================================================
// Example usage
// ============================================================================

fn main() {
    println!("=== Owned String ===\n");

    println!("--- Construction ---");
    let empty = OwnedStr::new();
    println!("empty string: {:?} (len {})", empty, empty.len());

    let greeting = OwnedStr::from_bytes(b"hello").expect("no interior nul");
    println!("from bytes:   {:?} (len {})", greeting, greeting.len());

    match OwnedStr::from_bytes(b"bad\0input") {
        Ok(_) => unreachable!("interior nul must be rejected"),
        Err(err) => println!("{} {err}", "rejected:".red()),
    }

    println!("\n--- Deep copies ---");
    let mut copy = greeting.clone();
    println!("clone of {:?}: {:?}", greeting, copy);
    let distinct = !ptr::eq(greeting.as_bytes().as_ptr(), copy.as_bytes().as_ptr());
    println!(
        "{}",
        if distinct {
            "✓ clone owns its own buffer".green()
        } else {
            "✗ clone aliases its source".red()
        }
    );

    println!("\n--- Assignment ---");
    let tail = OwnedStr::from_bytes(b"world").expect("no interior nul");
    copy.assign(&tail);
    println!("after assign: copy = {:?}, source = {:?}", copy, greeting);

    let mut a = OwnedStr::new();
    let mut b = OwnedStr::new();
    a.assign(b.assign(&tail));
    println!("chained assign: a = {:?}, b = {:?}", a, b);

    println!("\n--- Aliased assignment ---");
    let mut slots = vec![greeting, tail];
    assign_within(&mut slots, 0, 0);
    println!("slots[0] assigned to itself: {:?}", slots[0]);
    assign_within(&mut slots, 0, 1);
    println!("slots[1] copied into slots[0]: {:?}", slots[0]);

    println!("\n--- Views ---");
    let owned = OwnedStr::from_bytes(b"view me").expect("no interior nul");
    println!("as_bytes: {:?}", owned.as_bytes());
    println!("as_c_str: {:?}", owned.as_c_str());
    println!("display:  {owned}");
    println!("\n{}", "✓ all demonstrations complete".green());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(text: &str) -> OwnedStr {
        OwnedStr::from_bytes(text.as_bytes()).expect("test input has no nul")
    }

    fn buffer_addr(s: &OwnedStr) -> *const u8 {
        s.as_bytes().as_ptr()
    }

    #[test]
    fn empty_string_owns_a_buffer() {
        let empty = OwnedStr::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.as_bytes(), b"");
        assert_eq!(empty.as_c_str().to_bytes_with_nul(), b"\0");
        assert_eq!(empty.to_string(), "");
        assert!(!buffer_addr(&empty).is_null());
    }

    #[test]
    fn empty_bytes_match_absent_source() {
        let from_empty = OwnedStr::from_bytes(b"").unwrap();
        assert_eq!(from_empty, OwnedStr::new());
        assert_eq!(from_empty.to_string(), "");
    }

    #[test]
    fn round_trip_preserves_content() {
        for text in ["hello", "h", "hello world", "héllo ∞", "tab\tand\nnewline"] {
            let s = OwnedStr::try_from(text).unwrap();
            assert_eq!(s.to_string(), text);
            assert_eq!(s.as_bytes(), text.as_bytes());
            assert_eq!(s.len(), text.len());
        }
    }

    #[test]
    fn interior_nul_is_rejected_with_offset() {
        let err = OwnedStr::from_bytes(b"ab\0cd").unwrap_err();
        assert_eq!(err, StrError::InteriorNul { offset: 2 });
        assert_eq!(err.to_string(), "interior nul byte at offset 2");
    }

    #[test]
    fn from_c_str_copies_content() {
        let source = CStr::from_bytes_with_nul(b"copied\0").unwrap();
        let s = OwnedStr::from_c_str(source);
        assert_eq!(s, "copied");
        assert_eq!(s.as_c_str(), source);
    }

    #[test]
    fn clone_is_deep() {
        let original = owned("deep");
        let copy = original.clone();
        assert_eq!(original, copy);
        assert_ne!(buffer_addr(&original), buffer_addr(&copy));
    }

    #[test]
    fn mutating_a_clone_leaves_the_source_alone() {
        let original = owned("stable");
        let mut copy = original.clone();
        copy.assign(&owned("changed"));
        assert_eq!(original, "stable");
        assert_eq!(copy, "changed");
    }

    #[test]
    fn clone_outlives_its_source() {
        let original = owned("survivor");
        let copy = original.clone();
        drop(original);
        assert_eq!(copy, "survivor");
    }

    #[test]
    fn assign_replaces_the_whole_buffer() {
        let mut dst = owned("old content");
        let src = owned("new");
        dst.assign(&src);
        assert_eq!(dst, "new");
        assert_eq!(dst.len(), 3);
        assert_ne!(buffer_addr(&dst), buffer_addr(&src));
    }

    #[test]
    fn chained_assignment_yields_independent_buffers() {
        let mut a = owned("aaa");
        let mut b = owned("bbb");
        let c = owned("ccc");

        a.assign(b.assign(&c));

        assert_eq!(a, "ccc");
        assert_eq!(b, "ccc");
        assert_eq!(c, "ccc");
        assert_ne!(buffer_addr(&a), buffer_addr(&b));
        assert_ne!(buffer_addr(&b), buffer_addr(&c));
        assert_ne!(buffer_addr(&a), buffer_addr(&c));
    }

    #[test]
    fn self_assignment_is_a_no_op() {
        let mut slots = vec![owned("keep me")];
        let before = buffer_addr(&slots[0]);

        assign_within(&mut slots, 0, 0);

        assert_eq!(slots[0], "keep me");
        // The buffer was neither released nor reallocated.
        assert_eq!(buffer_addr(&slots[0]), before);
    }

    #[test]
    fn assign_within_copies_between_slots() {
        let mut slots = vec![owned("first"), owned("second")];
        assign_within(&mut slots, 0, 1);
        assert_eq!(slots[0], "second");
        assert_eq!(slots[1], "second");
        assert_ne!(buffer_addr(&slots[0]), buffer_addr(&slots[1]));
    }

    #[test]
    #[should_panic(expected = "src index out of bounds")]
    fn assign_within_checks_bounds() {
        let mut slots = vec![owned("only")];
        assign_within(&mut slots, 0, 1);
    }

    #[test]
    fn copy_then_reassign_scenario() {
        let mut a = owned("hello");
        let b = a.clone();
        a.assign(&owned("world"));
        assert_eq!(b.to_string(), "hello");
        assert_eq!(a.to_string(), "world");
    }

    #[test]
    fn display_passes_bytes_through() {
        let s = owned("no framing, no quotes");
        assert_eq!(format!("{s}"), "no framing, no quotes");
        assert_eq!(format!("{s:?}"), "\"no framing, no quotes\"");
    }

    #[test]
    fn non_utf8_content_displays_lossily() {
        let source = CStr::from_bytes_with_nul(b"\xffok\0").unwrap();
        let s = OwnedStr::from_c_str(source);
        assert_eq!(s.as_bytes(), b"\xffok");
        assert_eq!(s.to_string(), "\u{fffd}ok");
    }

    #[test]
    fn equality_is_by_content() {
        assert_eq!(owned("same"), owned("same"));
        assert_ne!(owned("same"), owned("other"));
        assert!(owned("bytes") == b"bytes"[..]);
        assert_eq!(OwnedStr::default(), OwnedStr::new());
    }
}

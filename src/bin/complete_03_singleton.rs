// Complete Singleton Implementation
// One process-wide instance behind a lazily initialized access point

use colored::Colorize;
use lazy_static::lazy_static;
use std::sync::Mutex;

// ============================================================================
// Milestone 1: A Type With No Public Constructor
// ============================================================================

/// Process-wide owner registry.
///
/// The only instance lives behind [`OwnerRegistry::instance`]. The
/// constructor is private and the type is neither `Clone` nor `Default`,
/// so no second instance can be created from outside this module.
pub struct OwnerRegistry {
    name: String,
}

impl OwnerRegistry {
    fn new() -> Self {
        OwnerRegistry {
            name: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

// ============================================================================
// Milestone 2: The Single Access Point
// ============================================================================

impl OwnerRegistry {
    /// Returns the one registry instance, constructing it on first access.
    ///
    /// The instance is guarded by a mutex: every caller goes through the
    /// same lock, so mutation through the shared access point stays sound
    /// under concurrent callers (including the threaded test runner).
    pub fn instance() -> &'static Mutex<OwnerRegistry> {
        lazy_static! {
            static ref INSTANCE: Mutex<OwnerRegistry> = Mutex::new(OwnerRegistry::new());
        }
        &INSTANCE
    }
}

// ============================================================================
// Example usage
// ============================================================================

fn main() {
    println!("=== Singleton ===\n");

    {
        let mut registry = OwnerRegistry::instance().lock().unwrap();
        println!("name at first access: {:?}", registry.name());
        registry.set_name("on-call: Priya");
    }

    // A second lookup reaches the same instance, state included.
    {
        let registry = OwnerRegistry::instance().lock().unwrap();
        println!("name at second access: {:?}", registry.name());
    }

    let same = std::ptr::eq(OwnerRegistry::instance(), OwnerRegistry::instance());
    println!(
        "{}",
        if same {
            "✓ every access resolves to the same instance".green()
        } else {
            "✗ distinct instances observed".red()
        }
    );

    // None of these compile: the constructor is private and there is no
    // Clone impl to copy the instance out of the mutex.
    //
    // let second = OwnerRegistry::new();
    // let copy = OwnerRegistry::instance().lock().unwrap().clone();
}

// ============================================================================
// Tests
// ============================================================================

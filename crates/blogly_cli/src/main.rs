//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `blogly_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("blogly_core ping={}", blogly_core::ping());
    println!("blogly_core version={}", blogly_core::core_version());
}

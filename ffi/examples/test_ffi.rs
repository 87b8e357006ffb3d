fn main() {
    println!("FFI Version: masterful-regen-ffi 0.1.0");

    // Single d6 rolls
    println!("lcg_roll(42, 1, 6) = {}", ffi::lcg_roll(42, 1, 6));
    println!("lcg_roll(43, 1, 6) = {}", ffi::lcg_roll(43, 1, 6));

    // Edge cases
    println!("lcg_roll(42, 0, 6) = {}", ffi::lcg_roll(42, 0, 6));
    println!("lcg_roll(42, 1, 1) = {}", ffi::lcg_roll(42, 1, 1));

    // Determinism
    println!("Determinism check:");
    println!("  First call:  lcg_roll(999, 3, 6) = {}", ffi::lcg_roll(999, 3, 6));
    println!("  Second call: lcg_roll(999, 3, 6) = {}", ffi::lcg_roll(999, 3, 6));
}

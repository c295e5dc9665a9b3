#[cfg(feature = "csr")]
fn main() {
    bingo_web::start();
}

#[cfg(not(feature = "csr"))]
fn main() {
    // This main function is only used for WASM builds
    // The actual mounting happens in lib.rs
}

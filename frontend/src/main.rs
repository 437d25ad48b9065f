//! Entry point for the WASM application

pub fn main() {
    catdog_frontend::start();
}

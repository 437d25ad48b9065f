//! Cat vs Dog Classifier - Frontend Rust/Leptos Application
//!
//! A WebAssembly page for uploading one image and showing whether the
//! inference service sees a cat or a dog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title)                                            │
//! │  ├── UploadSection (picker, preview, reset, submit)          │
//! │  └── ResultPanel (when a prediction exists)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All state lives in one [`catdog::UploadForm`] held in a signal; the
//! components only read it and forward user actions to it.
//!
//! # Modules
//!
//! - [`types`] - Browser file handle and object URL preview
//! - [`components`] - UI components (Hero, Upload, Result)
//! - [`services`] - Inference endpoint communication

use catdog::UploadForm;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{BrowserImage, ObjectUrl};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Set up logging and mount the page. Called from the binary.
pub fn start() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🐾 {} - Starting Leptos App", APP_NAME);

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let config = classifier_config();
    log::info!("Inference endpoint: {}", config.endpoint);

    let form = create_rw_signal(UploadForm::<BrowserImage>::from_config(&config));
    let classifier = store_value(BrowserClassifier::new(&config));

    view! {
        <div class="container">
            <Hero/>

            <UploadSection
                form=form
                classifier=classifier
                max_file_size=config.max_file_size
            />

            <ResultPanel form=form/>
        </div>
    }
}

//! Result panel, shown only when a prediction is available.

use catdog::UploadForm;
use leptos::*;

use crate::BrowserImage;

#[component]
pub fn ResultPanel(form: RwSignal<UploadForm<BrowserImage>>) -> impl IntoView {
    let prediction = move || form.with(|f| f.visible_prediction().cloned());

    move || {
        prediction().map(|p| {
            view! {
                <div class="result-section">
                    <h2 class="result-title">"Result"</h2>
                    <div class=format!("result-body {}", p.label.css_class())>
                        <span class="result-emoji">{p.label.emoji()}</span>
                        <div>
                            <p class="result-headline">{p.headline()}</p>
                            <p class="result-confidence">{p.confidence_label()}</p>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

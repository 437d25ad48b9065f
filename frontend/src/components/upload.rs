//! Image upload component with drag & drop support.
//!
//! Handles file selection, preview, reset and the classify request.

use catdog::{format_size, UploadForm, ADVERTISED_MAX_FILE_SIZE};
use leptos::*;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

use crate::services::BrowserClassifier;
use crate::BrowserImage;

/// Copy under the picker ("JPEG, PNG up to 5MB").
pub fn upload_hint(max_file_size: Option<u64>) -> String {
    format!(
        "JPEG, PNG up to {}",
        format_size(max_file_size.unwrap_or(ADVERTISED_MAX_FILE_SIZE))
    )
}

#[component]
pub fn UploadSection(
    form: RwSignal<UploadForm<BrowserImage>>,
    classifier: StoredValue<BrowserClassifier>,
    /// Enforced limit, if any. Only changes the hint text.
    max_file_size: Option<u64>,
) -> impl IntoView {
    let (dragging, set_dragging) = create_signal(false);

    let select = move |file: File| {
        form.update(|f| {
            // Errors are recorded on the form and rendered below.
            let _ = f.select_file(BrowserImage::from(file));
        });
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            select(file);
        }
        // Picking the same file again must fire `change` again
        input.set_value("");
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(true);
    };

    let on_drag_leave = move |_: DragEvent| set_dragging.set(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            select(file);
        }
    };

    let on_reset = move |_| {
        log::info!("Reset requested");
        form.update(|f| f.reset());
    };

    let on_submit = move |_| {
        let Some(Ok(ticket)) = form.try_update(|f| f.begin_submit()) else {
            return;
        };
        let classifier = classifier.get_value();

        spawn_local(async move {
            let completion = ticket.run(&classifier).await;
            form.update(|f| {
                f.finish_submit(completion);
            });
        });
    };

    let preview_src = move || {
        form.with(|f| {
            f.preview()
                .map(|url| url.as_str().to_string())
                .unwrap_or_default()
        })
    };

    let error_class = move || {
        form.with(|f| {
            f.error()
                .map(|e| format!("error-message {}", e.kind().css_class()))
                .unwrap_or_default()
        })
    };

    let hint = upload_hint(max_file_size);

    view! {
        <div class="upload-section">
            <div
                class="drop-zone"
                class:dragging=move || dragging.get()
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
            >
                <Show
                    when=move || form.with(|f| f.show_reset())
                    fallback=move || {
                        let hint = hint.clone();
                        view! {
                            <label class="picker">
                                <div class="upload-icon">"🖼️"</div>
                                <p class="upload-text">
                                    <span class="upload-link">"Click to upload"</span>
                                    " or drag and drop"
                                </p>
                                <p class="upload-hint">{hint}</p>
                                <input
                                    type="file"
                                    accept="image/*"
                                    class="hidden"
                                    on:change=on_file_change
                                />
                            </label>
                        }
                    }
                >
                    <div class="preview">
                        <img src=preview_src alt="Preview" class="preview-image"/>
                        <button class="reset-button" on:click=on_reset>"✕"</button>
                    </div>
                </Show>
            </div>

            <Show
                when=move || form.with(|f| f.error().is_some())
                fallback=|| view! { }
            >
                <div class=error_class>
                    {move || form.with(|f| f.error_message().unwrap_or_default())}
                </div>
            </Show>

            <button
                class="classify-button"
                on:click=on_submit
                disabled=move || !form.with(|f| f.can_submit())
            >
                {move || if form.with(|f| f.is_loading()) {
                    view! {
                        <span class="loader">
                            <span class="dot"></span>
                            <span class="dot"></span>
                            <span class="dot"></span>
                        </span>
                    }.into_view()
                } else {
                    "Classify Image".into_view()
                }}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_hint_defaults_to_advertised_limit() {
        assert_eq!(upload_hint(None), "JPEG, PNG up to 5MB");
        assert_eq!(upload_hint(Some(2 * 1024 * 1024)), "JPEG, PNG up to 2MB");
    }
}

//! Canvas component driving [`ScratchSurface`] from pointer input.
//!
//! The surface owns the game state; the canvas is only its visual mirror.
//! Every erase segment is applied twice — once to the surface's alpha
//! buffer (which decides the reveal) and once to the canvas with
//! `destination-out` compositing (which the user sees). Browser calls are
//! confined to wasm builds; on native targets the component renders but the
//! canvas stays inert.

use dioxus::prelude::*;

use super::surface::ScratchSurface;

const CANVAS_ID: &str = "scratch-canvas";
const FALLBACK_SIZE: (u32, u32) = (400, 200);
#[cfg(target_arch = "wasm32")]
const COVER_COLOR: &str = "#698c68";
#[cfg(target_arch = "wasm32")]
const GLYPH_COLOR: &str = "#5a7859";
#[cfg(target_arch = "wasm32")]
const PROMPT: &str = "Scratch here to reveal discount";
/// Delay before the remaining cover is removed entirely, in milliseconds.
#[cfg(target_arch = "wasm32")]
const CLEAR_DELAY_MS: u32 = 500;
/// How long the celebration effect stays up, in milliseconds.
#[cfg(target_arch = "wasm32")]
const CELEBRATION_MS: u32 = 5_000;

/// Scratch-to-reveal discount card.
///
/// `on_revealed` fires once, when the erased fraction first crosses the
/// reveal threshold; the surrounding page uses it for its congratulation
/// notice.
#[component]
pub fn ScratchCard(on_revealed: EventHandler<()>) -> Element {
    let mut surface = use_signal(|| Option::<ScratchSurface>::None);
    let mut percent = use_signal(|| 0u32);
    let mut revealed = use_signal(|| false);
    let mut celebrating = use_signal(|| false);

    let mut handle_begin = move |x: f32, y: f32| {
        if let Some(state) = surface.write().as_mut() {
            state.begin_stroke(x, y);
        }
    };

    let mut handle_move = move |x: f32, y: f32| {
        let mut segment = None;
        let mut reveal = None;
        {
            let mut guard = surface.write();
            let Some(state) = guard.as_mut() else { return };
            if !state.is_scratching() {
                return;
            }
            let from = state.last_point().unwrap_or((x, y));
            reveal = state.continue_stroke(x, y);
            segment = Some((from, (x, y)));
            percent.set((state.scratched_fraction() * 100.0) as u32);
        }

        if let Some((from, to)) = segment {
            erase_on_canvas(from, to);
        }

        if reveal.is_some() {
            revealed.set(true);
            celebrating.set(true);
            on_revealed.call(());

            #[cfg(target_arch = "wasm32")]
            {
                spawn(async move {
                    gloo_timers::future::TimeoutFuture::new(CLEAR_DELAY_MS).await;
                    clear_canvas();
                    if let Some(state) = surface.write().as_mut() {
                        state.clear();
                    }
                });
                spawn(async move {
                    gloo_timers::future::TimeoutFuture::new(CELEBRATION_MS).await;
                    celebrating.set(false);
                });
            }
        }
    };

    let mut handle_end = move || {
        if let Some(state) = surface.write().as_mut() {
            state.end_stroke();
        }
    };

    let pct = percent();

    rsx! {
        section { class: "scratch-section",
            h2 { class: "scratch-title", "Scratch & Win" }
            p { class: "scratch-subtitle",
                "Scratch the card below to reveal your special discount!"
            }

            div { class: "scratch-frame",
                div { class: "scratch-reward",
                    p { "You got" }
                    h3 { "20% OFF" }
                    p { "On your first order!" }
                }

                if celebrating() {
                    div { class: "scratch-sparkles",
                        span { class: "sparkle sparkle--top-left", "✦" }
                        span { class: "sparkle sparkle--top-right", "✦" }
                        span { class: "sparkle sparkle--bottom-left", "✦" }
                        span { class: "sparkle sparkle--bottom-right", "✦" }
                        span { class: "sparkle sparkle--centre", "✦" }
                    }
                }

                canvas {
                    id: CANVAS_ID,
                    class: "scratch-canvas",
                    onmounted: move |_| {
                        let (width, height) = prepare_canvas().unwrap_or(FALLBACK_SIZE);
                        surface.set(Some(ScratchSurface::new(width, height)));
                    },
                    onmousedown: move |evt| {
                        let point = evt.element_coordinates();
                        handle_begin(point.x as f32, point.y as f32);
                    },
                    onmousemove: move |evt| {
                        let point = evt.element_coordinates();
                        handle_move(point.x as f32, point.y as f32);
                    },
                    onmouseup: move |_| handle_end(),
                    onmouseleave: move |_| handle_end(),
                    ontouchstart: move |evt| {
                        if let Some((x, y)) = touch_point(&evt) {
                            handle_begin(x, y);
                        }
                    },
                    ontouchmove: move |evt| {
                        evt.prevent_default();
                        if let Some((x, y)) = touch_point(&evt) {
                            handle_move(x, y);
                        }
                    },
                    ontouchend: move |_| handle_end(),
                }
            }

            if !revealed() {
                div { class: "scratch-progress",
                    span { "Scratched: {pct}%" }
                    div { class: "scratch-progress-track",
                        div { class: "scratch-progress-bar", style: "width: {pct}%" }
                    }
                }
            }

            if revealed() {
                div { class: "scratch-claim",
                    a { class: "premium-button", href: "/signup", "Claim Your 20% Discount" }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn canvas_element() -> Option<web_sys::HtmlCanvasElement> {
    use wasm_bindgen::JsCast;
    web_sys::window()?
        .document()?
        .get_element_by_id(CANVAS_ID)?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
fn canvas_context() -> Option<web_sys::CanvasRenderingContext2d> {
    use wasm_bindgen::JsCast;
    canvas_element()?
        .get_context("2d")
        .ok()??
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .ok()
}

/// Size the canvas buffer to its rendered box (CSS pixels) and paint the
/// opaque cover with its prompt. Returns the buffer dimensions.
fn prepare_canvas() -> Option<(u32, u32)> {
    #[cfg(target_arch = "wasm32")]
    {
        let canvas = canvas_element()?;
        let rect = canvas.get_bounding_client_rect();
        let width = rect.width().max(1.0) as u32;
        let height = rect.height().max(1.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas_context()?;
        ctx.set_fill_style_str(COVER_COLOR);
        ctx.fill_rect(0.0, 0.0, width as f64, height as f64);

        // Speckle the cover so it reads as a scratch card.
        ctx.set_font("bold 16px Arial");
        ctx.set_fill_style_str(GLYPH_COLOR);
        ctx.set_text_align("center");
        for _ in 0..30 {
            let x = js_sys::Math::random() * width as f64;
            let y = js_sys::Math::random() * height as f64;
            let _ = ctx.fill_text("✧", x, y);
        }

        ctx.set_font("bold 20px Arial");
        ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
        let _ = ctx.fill_text(PROMPT, width as f64 / 2.0, height as f64 / 2.0);

        Some((width, height))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Mirror one erase segment onto the canvas.
fn erase_on_canvas(from: (f32, f32), to: (f32, f32)) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(ctx) = canvas_context() else { return };
        let _ = ctx.set_global_composite_operation("destination-out");
        ctx.set_line_width(super::BRUSH_WIDTH as f64);
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(from.0 as f64, from.1 as f64);
        ctx.line_to(to.0 as f64, to.1 as f64);
        ctx.stroke();
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (from, to);
    }
}

#[cfg(target_arch = "wasm32")]
fn clear_canvas() {
    let Some(canvas) = canvas_element() else { return };
    let Some(ctx) = canvas_context() else { return };
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
}

/// First touch of a touch event, in surface-local coordinates.
fn touch_point(evt: &Event<TouchData>) -> Option<(f32, f32)> {
    #[cfg(target_arch = "wasm32")]
    {
        let touch = evt.touches().into_iter().next()?;
        let client = touch.client_coordinates();
        let rect = canvas_element()?.get_bounding_client_rect();
        Some(((client.x - rect.left()) as f32, (client.y - rect.top()) as f32))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = evt;
        None
    }
}

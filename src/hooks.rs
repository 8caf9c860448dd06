use crate::host::GlooTimer;
use gloo_timers::callback::Interval;
use input_portal_ui::config::FRAME_INTERVAL_MS;
use input_portal_ui::hover::{self, HoverOverlay};
use input_portal_ui::utils::parse_range_value;
use input_portal_ui::{InterpolatedRange, NumericField};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Live interpolation state and input wiring for one range control.
#[derive(Clone)]
pub struct RangeHandle {
    /// Eased state, advanced by the frame driver.
    pub state: Rc<RefCell<InterpolatedRange>>,
    /// Ref to the `<input type="range">`, used to measure the track.
    pub track: NodeRef,
    /// Callback for the input's `oninput` event. Moves the target while
    /// dragging without contacting the host.
    pub on_input: Callback<InputEvent>,
}

/// Custom hook owning an [`InterpolatedRange`] and its 60 Hz frame driver.
#[hook]
pub fn use_interpolated_range(field: NumericField, initial: u32) -> RangeHandle {
    let state = use_mut_ref(|| {
        let (min, max) = field.bounds();
        InterpolatedRange::new(min, max, initial)
    });
    let track = use_node_ref();
    let redraw = use_force_update();

    {
        let state = state.clone();
        let track = track.clone();
        use_effect_with((), move |_| {
            if let Some(input) = track.cast::<HtmlInputElement>() {
                state.borrow_mut().set_track_width(input.offset_width() as f64);
            }
            let interval = Interval::new(FRAME_INTERVAL_MS, move || {
                state.borrow_mut().tick();
                redraw.force_update();
            });
            move || drop(interval)
        });
    }

    let on_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(value) = parse_range_value(&input.value(), field) {
                state.borrow_mut().set_value(value);
            }
        })
    };

    RangeHandle {
        state,
        track,
        on_input,
    }
}

/// Visibility of a slider's counter overlay plus the pointer callbacks.
#[derive(Clone)]
pub struct HoverHandle {
    pub visible: bool,
    pub on_enter: Callback<MouseEvent>,
    pub on_leave: Callback<MouseEvent>,
}

/// Custom hook for the hover overlay that lingers after the pointer leaves.
#[hook]
pub fn use_hover_overlay() -> HoverHandle {
    let overlay = use_mut_ref(HoverOverlay::default);
    let redraw = use_force_update();

    let on_enter = {
        let overlay = overlay.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            overlay.borrow_mut().enter();
            redraw.force_update();
        })
    };

    let on_leave = {
        let overlay = overlay.clone();
        Callback::from(move |_: MouseEvent| {
            let ticket = overlay.borrow_mut().leave();
            let overlay = overlay.clone();
            let redraw = redraw.clone();
            // a later enter or leave invalidates the ticket
            spawn_local(async move {
                if hover::hide_after(&overlay, ticket, &GlooTimer).await {
                    redraw.force_update();
                }
            });
        })
    };

    let visible = overlay.borrow().is_visible();
    HoverHandle {
        visible,
        on_enter,
        on_leave,
    }
}

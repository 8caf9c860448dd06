//! Yew view components for the settings panel.
//!
//! Switches and the server line are stateless and render from props. The
//! slider and the preset select own a little local state because they must
//! be able to undo what the user did when the host refuses an edit.

use crate::hooks::{use_hover_overlay, use_interpolated_range};
use crate::shell::SyncHandle;
use input_portal_ui::utils::{format_port, parse_range_value, preset_at, preset_index};
use input_portal_ui::{FieldEdit, NumericField};
use log::debug;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// On/off switch rendered as a clickable track.
#[derive(Properties, PartialEq)]
pub struct SwitchProps {
    pub active: bool,
    pub disabled: bool,
    pub onclick: Callback<()>,
}

#[function_component(Switch)]
pub fn switch(props: &SwitchProps) -> Html {
    let class = classes!(
        "switch",
        props.active.then_some("active"),
        props.disabled.then_some("disabled")
    );
    let onclick = {
        let disabled = props.disabled;
        let onclick = props.onclick.clone();
        Callback::from(move |_: MouseEvent| {
            if !disabled {
                onclick.emit(());
            }
        })
    };
    html! {
        <div {class} {onclick} role="switch" aria-checked={props.active.to_string()}>
            <div class="switch-knob"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RangeSliderProps {
    pub field: NumericField,
    /// Committed value at the time the slider was mounted.
    pub initial: u32,
    pub disabled: bool,
    pub sync: SyncHandle,
}

/// Range input with an eased counter overlay and fill line.
///
/// On release the new value is sent through the synchronizer; if the host
/// refuses it the slider snaps back to its last committed value.
#[function_component(RangeSlider)]
pub fn range_slider(props: &RangeSliderProps) -> Html {
    let field = props.field;
    let range = use_interpolated_range(field, props.initial);
    let hover = use_hover_overlay();

    let onchange = {
        let state = range.state.clone();
        let sync = props.sync.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = match parse_range_value(&input.value(), field) {
                Ok(value) => value,
                Err(err) => {
                    debug!("{}", err);
                    state.borrow_mut().revert();
                    return;
                }
            };
            state.borrow_mut().set_value(value);

            let state = state.clone();
            let sync = sync.clone();
            spawn_local(async move {
                let saved = sync.request_update(field.edit(value)).await;
                let mut state = state.borrow_mut();
                if saved {
                    state.mark_committed(value);
                } else {
                    state.revert();
                }
            });
        })
    };

    let view = range.state.borrow();
    let (min, max) = view.bounds();
    html! {
        <div class="setting">
            <span class="setting-label">{ field.label() }</span>
            <div
                class={classes!("fir", props.disabled.then_some("disabled"))}
                onmouseenter={hover.on_enter}
                onmouseleave={hover.on_leave}
            >
                <input
                    type="range"
                    class="fir-range"
                    ref={range.track.clone()}
                    min={min.to_string()}
                    max={max.to_string()}
                    value={view.value().to_string()}
                    disabled={props.disabled}
                    oninput={range.on_input.clone()}
                    {onchange}
                />
                <div
                    class={classes!("fir-counter", hover.visible.then_some("hover"))}
                    style={format!("--position: {:.2}px", view.position())}
                >
                    { format!("{}{}", view.label(), field.unit()) }
                </div>
                <div class="fir-line" style={format!("--size: {:.4}", view.line_size())}></div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PresetSelectProps {
    pub presets: Rc<Vec<String>>,
    pub selected: Option<String>,
    pub disabled: bool,
    pub sync: SyncHandle,
}

/// Preset dropdown; index 0 is the "no preset" placeholder.
#[function_component(PresetSelect)]
pub fn preset_select(props: &PresetSelectProps) -> Html {
    let select_ref = use_node_ref();

    let onchange = {
        let presets = props.presets.clone();
        let sync = props.sync.clone();
        let select_ref = select_ref.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let choice = preset_at(&presets, select.selected_index().max(0) as usize);

            let presets = presets.clone();
            let sync = sync.clone();
            let select_ref = select_ref.clone();
            spawn_local(async move {
                if sync.request_update(FieldEdit::Preset(choice)).await {
                    return;
                }
                // the DOM already shows the refused choice; put the old one back
                let previous = sync.snapshot().preset;
                if let Some(select) = select_ref.cast::<HtmlSelectElement>() {
                    select.set_selected_index(preset_index(&presets, previous.as_deref()) as i32);
                }
            });
        })
    };

    let selected = preset_index(&props.presets, props.selected.as_deref());
    html! {
        <select
            id="preset_select"
            ref={select_ref}
            disabled={props.disabled}
            {onchange}
        >
            <option value="" selected={selected == 0}>{ "No preset" }</option>
            { props.presets.iter().enumerate().map(|(i, name)| html! {
                <option value={name.clone()} selected={selected == i + 1}>{ name }</option>
            }).collect::<Html>() }
        </select>
    }
}

#[derive(Properties, PartialEq)]
pub struct ServerStatusProps {
    pub port: Option<u16>,
}

/// Status dot and port of the local input server.
#[function_component(ServerStatus)]
pub fn server_status(props: &ServerStatusProps) -> Html {
    html! {
        <div id="server">
            <span class={classes!("dot", props.port.is_some().then_some("on"))}></span>
            <span id="port" class={classes!(props.port.is_none().then_some("disabled"))}>
                { format_port(props.port) }
            </span>
        </div>
    }
}

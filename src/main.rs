//! Settings window of Input Portal, rendered with Yew inside the Tauri webview.
//! Wires the synchronizer to the switches, sliders and preset list.

use input_portal_ui::config::CREDIT_SITES;
use input_portal_ui::reveal::Section;
use input_portal_ui::{ConfigSynchronizer, FieldEdit, NumericField, SettingsHost};
use log::error;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod host;
mod logging;
mod shell;

use components::{PresetSelect, RangeSlider, ServerStatus, Switch};
use host::{GlooTimer, TauriHost};
use shell::{PanelAction, PanelState, ShellBridge, SyncHandle};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Flip a boolean setting through the synchronizer.
fn toggle_callback(
    sync: Option<SyncHandle>,
    edit: fn(bool) -> FieldEdit,
    read: fn(&SyncHandle) -> bool,
) -> Callback<()> {
    Callback::from(move |_: ()| {
        let Some(sync) = sync.clone() else {
            return;
        };
        let next = !read(&sync);
        spawn_local(async move {
            sync.request_update(edit(next)).await;
        });
    })
}

fn section_class(visible: bool) -> Classes {
    classes!("setting-set", (!visible).then_some("off"))
}

/// Sliders for `fields`, seeded from the committed document.
fn render_sliders(sync: &SyncHandle, fields: &[NumericField], disabled: bool) -> Html {
    let config = sync.snapshot();
    fields
        .iter()
        .map(|&field| {
            html! {
                <RangeSlider
                    key={field.label()}
                    {field}
                    initial={field.read(&config)}
                    {disabled}
                    sync={sync.clone()}
                />
            }
        })
        .collect()
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary panel component: loads the settings once, then renders them.
#[function_component(Panel)]
fn panel() -> Html {
    let state = use_reducer(PanelState::default);
    let sync = use_state(|| None::<SyncHandle>);

    // Load settings from the host on mount
    {
        let dispatcher = state.dispatcher();
        let sync = sync.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let bridge = ShellBridge::new(dispatcher.clone());
                match ConfigSynchronizer::initialize(TauriHost, bridge, GlooTimer).await {
                    Ok(synchronizer) => sync.set(Some(SyncHandle(Rc::new(synchronizer)))),
                    Err(err) => {
                        error!("{}", err);
                        dispatcher.dispatch(PanelAction::Failed(err.to_string()));
                    }
                }
            });
            || ()
        });
    }

    // these work even when the settings failed to load
    let close = Callback::from(|_: MouseEvent| {
        spawn_local(async { TauriHost.close_window().await });
    });

    let credit = |site: &'static str| {
        Callback::from(move |_: MouseEvent| {
            spawn_local(async move { TauriHost.open_external(site).await });
        })
    };

    let toggle_enable = toggle_callback((*sync).clone(), FieldEdit::Enable, |s| s.snapshot().enable);
    let toggle_mouse = toggle_callback((*sync).clone(), FieldEdit::MouseMoveEnable, |s| {
        s.snapshot().mouse_move_enable
    });

    let locked = state.locked;
    let sections = state.sections;

    let body = match (&*sync, &state.config) {
        (Some(sync), Some(config)) => {
            let presets = Rc::new(sync.info().presets.clone());
            html! {
                <>
                    <div class="setting-set preset">
                        <PresetSelect
                            {presets}
                            selected={config.preset.clone()}
                            disabled={locked}
                            sync={sync.clone()}
                        />
                    </div>
                    <div id="main-switch" class="setting-set">
                        <span class="setting-label">{ "Enable" }</span>
                        <Switch active={config.enable} disabled={locked} onclick={toggle_enable} />
                    </div>
                    <div class={section_class(sections.is_visible(Section::Keys))}>
                        { render_sliders(
                            sync,
                            &[NumericField::KeyDownTransition, NumericField::KeyUpTransition],
                            !sections.is_interactive(Section::Keys, locked),
                        ) }
                    </div>
                    <div
                        id="mouse-move-switch"
                        class={section_class(sections.is_visible(Section::MouseSwitch))}
                    >
                        <span class="setting-label">{ "Mouse move" }</span>
                        <Switch
                            active={config.mouse_move_enable}
                            disabled={!sections.is_interactive(Section::MouseSwitch, locked)}
                            onclick={toggle_mouse}
                        />
                    </div>
                    <div class={section_class(sections.is_visible(Section::MouseSettings))}>
                        { render_sliders(
                            sync,
                            &[NumericField::MouseMoveRadius, NumericField::MouseMoveTransition],
                            !sections.is_interactive(Section::MouseSettings, locked),
                        ) }
                    </div>
                    <ServerStatus port={sync.info().port} />
                </>
            }
        }
        _ => match &state.failure {
            Some(message) => html! { <div class="load-error">{ message }</div> },
            None => html! { <div class="loading">{ "Loading settings…" }</div> },
        },
    };

    let version = (*sync)
        .as_ref()
        .map(|s| format!("v{}", s.info().version))
        .unwrap_or_default();

    html! {
        <div class="container">
            <header class="titlebar" data-tauri-drag-region="">
                <h1>{ "Input Portal" }<span id="version">{ version }</span></h1>
                <button id="close" onclick={close}>{ "×" }</button>
            </header>
            { body }
            <footer class="credits">
                { CREDIT_SITES.iter().map(|&site| html! {
                    <button id={site} class="credit" onclick={credit(site)}>{ site }</button>
                }).collect::<Html>() }
            </footer>
        </div>
    }
}

/// Entry point: installs logging and renders the panel.
fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    yew::Renderer::<Panel>::new().render();
}

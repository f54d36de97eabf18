use dioxus::prelude::*;

use crate::cohort::playback::{PlaybackState, PLAYBACK_SPEEDS};
use crate::core::timing::sleep_ms;
use crate::t;

/// Drive `playback` from a timer owned by the calling component. The loop is
/// the only writer while playing and is dropped with the component.
pub fn use_playback_clock(mut playback: Signal<PlaybackState>) {
    use_future(move || async move {
        loop {
            let interval = playback.peek().tick_interval_ms();
            sleep_ms(u64::from(interval)).await;
            if playback.peek().playing {
                playback.write().tick();
            }
        }
    });
}

#[component]
pub fn PlaybackControls(playback: Signal<PlaybackState>, #[props(default)] show_steps: bool) -> Element {
    let mut playback = playback;
    let state = playback();
    let last = state.frame_count.saturating_sub(1);
    let position = if state.frame_count == 0 {
        0
    } else {
        state.current_index + 1
    };
    let play_label = if state.playing {
        t!("playback-pause")
    } else {
        t!("playback-play")
    };
    let previous_label = t!("playback-previous");
    let next_label = t!("playback-next");
    let scrubber_label = t!("playback-position-label");
    let play_icon = if state.playing { "❚❚" } else { "▶" };

    rsx! {
        div { class: "playback",
            div { class: "playback__buttons",
                if show_steps {
                    button {
                        r#type: "button",
                        class: "button button--small",
                        aria_label: "{previous_label}",
                        disabled: state.current_index == 0,
                        onclick: move |_| playback.write().step_back(),
                        "⏮"
                    }
                }
                button {
                    r#type: "button",
                    class: "button button--small button--primary",
                    aria_label: "{play_label}",
                    onclick: move |_| playback.write().toggle(),
                    "{play_icon}"
                    if !show_steps {
                        " {play_label}"
                    }
                }
                if show_steps {
                    button {
                        r#type: "button",
                        class: "button button--small",
                        aria_label: "{next_label}",
                        disabled: state.current_index >= last,
                        onclick: move |_| playback.write().step_forward(),
                        "⏭"
                    }
                }
            }

            input {
                class: "playback__scrubber",
                r#type: "range",
                min: "0",
                max: "{last}",
                step: "1",
                value: "{state.current_index}",
                aria_label: "{scrubber_label}",
                oninput: move |evt| {
                    if let Ok(index) = evt.value().parse::<usize>() {
                        playback.write().seek(index);
                    }
                },
            }

            span { class: "playback__position mono", {t!("playback-position", position = position, total = state.frame_count)} }

            label { class: "playback__speed",
                {t!("playback-speed")}
                ": "
                select {
                    value: "{state.frames_per_second}",
                    onchange: move |evt| {
                        if let Ok(fps) = evt.value().parse::<u32>() {
                            playback.write().set_speed(fps);
                        }
                    },
                    for (fps, label) in PLAYBACK_SPEEDS {
                        option {
                            key: "{fps}",
                            value: "{fps}",
                            selected: fps == state.frames_per_second,
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

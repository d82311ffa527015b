use dioxus::prelude::*;
use tracing::debug;

use crate::domain::calc::Calculator;

const KEYPAD: [[&str; 4]; 5] = [
    ["(", ")", "%", "/"],
    ["7", "8", "9", "*"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", ".", "00", "sqrt("],
];

#[component]
pub fn CalculatorPanel(mut calculator: Signal<Calculator>) -> Element {
    let mut message = use_signal(String::new);
    let display = calculator.read().input().to_string();
    let display = if display.is_empty() {
        "0".to_string()
    } else {
        display
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; max-width: 320px;",
            input {
                readonly: true,
                style: "font-size: 22px; text-align: right; padding: 8px;",
                value: "{display}",
            }
            if !message().is_empty() {
                p { style: "color: #842029; margin: 0;", "{message}" }
            }
            div {
                style: "display: grid; grid-template-columns: repeat(4, 1fr); gap: 6px;",
                {KEYPAD.iter().flatten().map(|key| {
                    let key = *key;
                    rsx!(
                        button {
                            key: "{key}",
                            onclick: move |_| {
                                message.set(String::new());
                                calculator.write().push(key);
                            },
                            "{key}"
                        }
                    )
                })}
                button {
                    onclick: move |_| {
                        message.set(String::new());
                        calculator.write().clear();
                    },
                    "C"
                }
                button {
                    onclick: move |_| calculator.write().backspace(),
                    "⌫"
                }
                button {
                    onclick: move |_| {
                        let result = calculator.write().sqrt();
                        if let Err(err) = result {
                            debug!(error = %err, "square root rejected");
                            message.set(format!("nuh uh: {err}"));
                        }
                    },
                    "√"
                }
                button {
                    onclick: move |_| {
                        let result = calculator.write().evaluate();
                        match result {
                            Ok(_) => message.set(String::new()),
                            Err(err) => {
                                debug!(error = %err, "expression rejected");
                                message.set(format!("nuh uh: {err}"));
                            }
                        }
                    },
                    "="
                }
            }
        }
    }
}

/*
    Lookbook - page layout editor and exporter
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use lookbook_editor::LookbookEditor;

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger failed to init: {err}");
    }
    dioxus::launch(App);
}

fn App() -> Element {
    rsx! {
        style {
            "{{
                body, html {{
                    margin: 0;
                    padding: 0;
                    height: 100%;
                    width: 100%;
                    overflow: hidden;
                }}
            }}"
        }
        LookbookEditor {}
    }
}

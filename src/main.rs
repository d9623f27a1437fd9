mod components;
mod config;
mod model;
mod state;
mod sync;
mod util;

use components::App;

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use wasm_bindgen_test::*;

    use crate::model::UserColor;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn random_user_color_stays_light() {
        for _ in 0..64 {
            let c = UserColor::random();
            for ch in [c.r, c.g, c.b] {
                assert!(ch >= UserColor::MIN_CHANNEL);
            }
        }
    }
}

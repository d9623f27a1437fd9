use super::board_view::BoardView;
use crate::config::ClientConfig;
use crate::util::set_verbose;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    // Resolved once; the transport cannot change while the page is open
    let config = use_state(|| {
        let cfg = ClientConfig::from_page();
        set_verbose(cfg.debug);
        cfg
    });

    html! {
        <div id="root">
            <BoardView config={(*config).clone()} />
        </div>
    }
}

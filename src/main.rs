use yew::prelude::*;

mod aggregate;
mod api;
mod chart;
mod config;
mod dashboard;
mod error;
mod model;
mod notify;
mod session;
mod table;

use api::HttpGateway;
use config::API_BASE_URL;
use dashboard::DashboardPage;
use session::Session;

#[function_component(App)]
fn app() -> Html {
    let session = use_state(session::read_session);

    {
        let missing = session.is_err();
        use_effect_with_deps(
            move |_| {
                if missing {
                    log::info!("no stored user, redirecting to login");
                    session::redirect_to_login();
                }
                || ()
            },
            (),
        );
    }

    match &*session {
        Ok(Session { user_id }) => html! {
            <DashboardPage gateway={HttpGateway::new(API_BASE_URL, user_id.clone())} />
        },
        Err(_) => html! {
            <div class="min-vh-100 d-flex align-items-center justify-content-center text-muted">
                {"Redirecionando para o login..."}
            </div>
        },
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    yew::Renderer::<App>::new().render();
}
